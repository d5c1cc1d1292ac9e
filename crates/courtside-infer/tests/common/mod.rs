#![allow(dead_code)]

use courtside_base::Tensor;
use courtside_infer::pose::CANDIDATE_FIELDS;
use courtside_infer::{Backend, InferError, ModelSource, Session, INPUT_NAME, OUTPUT_NAME};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct MockState {
    loads: AtomicUsize,
    runs: AtomicUsize,
    session_failures: AtomicUsize,
    fail_load: AtomicBool,
    delay: Mutex<Duration>,
    output: Mutex<Option<Tensor<f32>>>,
}

/// In-process backend that records loads and runs and can inject faults.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<MockState>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output returned by every successful run, shape `[1, 56, n]`.
    pub fn with_output(self, n: usize, data: Vec<f32>) -> Self {
        let tensor = Tensor::new(vec![1, CANDIDATE_FIELDS, n], data).unwrap();
        *self.state.output.lock().unwrap() = Some(tensor);
        self
    }

    /// Each run sleeps this long before answering.
    pub fn with_delay(self, delay: Duration) -> Self {
        *self.state.delay.lock().unwrap() = delay;
        self
    }

    /// The next `count` runs fail with a session fault.
    pub fn fail_next_runs(&self, count: usize) {
        self.state.session_failures.store(count, Ordering::SeqCst);
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.state.fail_load.store(fail, Ordering::SeqCst);
    }

    pub fn loads(&self) -> usize {
        self.state.loads.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> usize {
        self.state.runs.load(Ordering::SeqCst)
    }
}

impl Backend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn load_model(&self, model: &ModelSource) -> Result<Box<dyn Session>, InferError> {
        if self.state.fail_load.load(Ordering::SeqCst) {
            return Err(InferError::ModelLoad(format!("cannot read {model}")));
        }
        self.state.loads.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            state: Arc::clone(&self.state),
            inputs: vec![INPUT_NAME.to_string()],
            outputs: vec![OUTPUT_NAME.to_string()],
        }))
    }
}

struct MockSession {
    state: Arc<MockState>,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl Session for MockSession {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        self.state.runs.fetch_add(1, Ordering::SeqCst);
        let delay = *self.state.delay.lock().unwrap();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }

        let pending = self.state.session_failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.state.session_failures.store(pending - 1, Ordering::SeqCst);
            return Err(InferError::Session("injected fault".to_string()));
        }

        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].0, INPUT_NAME);

        let output = self
            .state
            .output
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| empty_output(1));
        Ok(HashMap::from([(OUTPUT_NAME.to_string(), output)]))
    }

    fn input_names(&self) -> &[String] {
        &self.inputs
    }

    fn output_names(&self) -> &[String] {
        &self.outputs
    }
}

/// A `[1, 56, n]` output with every field zero.
pub fn empty_output(n: usize) -> Tensor<f32> {
    Tensor::zeros(vec![1, CANDIDATE_FIELDS, n]).unwrap()
}

/// Write one candidate into a field-major `[1, 56, n]` buffer.
///
/// Keypoint `k` is placed at `(cx + k, cy + k)` with confidence `kp_conf`.
pub fn fill_candidate(
    data: &mut [f32],
    n: usize,
    i: usize,
    [cx, cy, w, h]: [f32; 4],
    conf: f32,
    kp_conf: f32,
) {
    data[i] = cx;
    data[n + i] = cy;
    data[2 * n + i] = w;
    data[3 * n + i] = h;
    data[4 * n + i] = conf;
    for k in 0..17 {
        let base = 5 + 3 * k;
        data[base * n + i] = cx + k as f32;
        data[(base + 1) * n + i] = cy + k as f32;
        data[(base + 2) * n + i] = kp_conf;
    }
}

pub fn model() -> ModelSource {
    ModelSource::from("models/yolov8n-pose.onnx")
}
