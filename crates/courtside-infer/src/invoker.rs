use crate::{Backend, InferError, ModelSource, Session};
use courtside_base::Tensor;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Input tensor name the pose model is exported with.
pub const INPUT_NAME: &str = "images";
/// Output tensor name holding the `[1, 56, N]` candidate grid.
pub const OUTPUT_NAME: &str = "output0";

enum SessionState {
    Unloaded,
    Loaded {
        source: ModelSource,
        session: Box<dyn Session>,
    },
}

/// Caller-owned handle to a model session.
///
/// Cloning the handle shares the same underlying session. Loads are
/// serialized through the session lock, so concurrent `load_model` calls for
/// the same source collapse into a single load. A `run_inference` call made
/// while another one is outstanding on the same session is rejected with
/// `InferError::Busy` rather than interleaved.
#[derive(Clone)]
pub struct PoseSession {
    backend: Arc<dyn Backend>,
    state: Arc<Mutex<SessionState>>,
}

impl PoseSession {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self::with_backend(Arc::new(backend))
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            state: Arc::new(Mutex::new(SessionState::Unloaded)),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Load a model unless the same source is already loaded.
    ///
    /// Loading a different source replaces the current session. On failure the
    /// previous state is kept and the error is returned; calling again retries.
    pub async fn load_model(&self, source: &ModelSource) -> Result<(), InferError> {
        let mut state = self.state.lock().await;
        if let SessionState::Loaded { source: current, .. } = &*state {
            if current == source {
                log::debug!("model {} already loaded", source);
                return Ok(());
            }
        }

        log::info!("loading model {} on {} backend", source, self.backend.name());
        let backend = Arc::clone(&self.backend);
        let requested = source.clone();
        let session = tokio::task::spawn_blocking(move || backend.load_model(&requested)).await??;

        *state = SessionState::Loaded {
            source: source.clone(),
            session,
        };
        log::info!("model {} loaded", source);
        Ok(())
    }

    pub async fn is_loaded(&self) -> bool {
        matches!(*self.state.lock().await, SessionState::Loaded { .. })
    }

    /// Drop the current session. An in-flight inference finishes first.
    pub async fn unload(&self) {
        let mut state = self.state.lock().await;
        if matches!(*state, SessionState::Loaded { .. }) {
            log::info!("unloading model");
        }
        *state = SessionState::Unloaded;
    }

    /// Run the model on a planar `3 * side * side` tensor and return the
    /// caller-owned output tensor.
    ///
    /// A session-level failure recreates the session from the same source and
    /// retries exactly once; a second failure is returned to the caller.
    pub async fn run_inference(
        &self,
        tensor: Tensor<f32>,
        side: usize,
    ) -> Result<Tensor<f32>, InferError> {
        let mut guard = Arc::clone(&self.state)
            .try_lock_owned()
            .map_err(|_| InferError::Busy)?;
        if matches!(*guard, SessionState::Unloaded) {
            return Err(InferError::ModelNotLoaded);
        }

        let expected = 3 * side * side;
        if tensor.len() != expected {
            return Err(InferError::ShapeMismatch {
                expected: format!("[1, 3, {side}, {side}] ({expected} values)"),
                got: format!("{} values", tensor.len()),
            });
        }
        let input = tensor.reshape(vec![1, 3, side, side])?;

        let backend = Arc::clone(&self.backend);
        tokio::task::spawn_blocking(move || run_with_recovery(&mut guard, backend.as_ref(), &input))
            .await?
    }
}

fn run_with_recovery(
    state: &mut SessionState,
    backend: &dyn Backend,
    input: &Tensor<f32>,
) -> Result<Tensor<f32>, InferError> {
    let SessionState::Loaded { source, session } = state else {
        return Err(InferError::ModelNotLoaded);
    };

    match run_once(session.as_mut(), input) {
        Err(err) if err.is_session_failure() => {
            log::warn!("{err}; recreating session for {source} and retrying once");
            *session = backend.load_model(source)?;
            run_once(session.as_mut(), input)
        }
        result => result,
    }
}

fn run_once(session: &mut dyn Session, input: &Tensor<f32>) -> Result<Tensor<f32>, InferError> {
    let mut outputs = session.run(&[(INPUT_NAME, input)])?;
    outputs.remove(OUTPUT_NAME).ok_or_else(|| InferError::ShapeMismatch {
        expected: format!("output named {OUTPUT_NAME}"),
        got: format!("{:?}", outputs.keys().collect::<Vec<_>>()),
    })
}
