use crate::{Backend, Device, InferError, ModelSource, Session, INPUT_NAME, OUTPUT_NAME};
use courtside_base::Tensor;
use ndarray::{ArrayViewD, IxDyn};
use ort::{inputs, session::Session as OrtSession, value::TensorRef};
use std::collections::HashMap;

/// ONNX Runtime backend for the pose model.
pub struct OnnxBackend {
    device: Device,
}

impl OnnxBackend {
    pub fn new(device: Device) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }
}

impl Default for OnnxBackend {
    fn default() -> Self {
        Self::new(Device::Cpu)
    }
}

impl Backend for OnnxBackend {
    fn name(&self) -> &str {
        "onnx"
    }

    fn load_model(&self, model: &ModelSource) -> Result<Box<dyn Session>, InferError> {
        let builder = OrtSession::builder().map_err(|e| {
            InferError::ModelLoad(format!("failed to create session builder: {}", e))
        })?;

        let builder = match &self.device {
            Device::Cpu => {
                log::debug!("[onnx] using CPU execution provider");
                builder
            }
            #[cfg(feature = "cuda")]
            Device::Cuda { device_id } => {
                use ort::execution_providers::CUDAExecutionProvider;
                log::info!("[onnx] CUDA execution provider requested (device_id={})", device_id);
                builder
                    .with_execution_providers([CUDAExecutionProvider::default()
                        .with_device_id(*device_id)
                        .build()])
                    .map_err(|_| InferError::UnsupportedDevice(self.device.clone()))?
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda { .. } => {
                return Err(InferError::UnsupportedDevice(self.device.clone()));
            }
        };

        let session = match model {
            ModelSource::File(path) => builder.commit_from_file(path).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from {}: {}", path.display(), e))
            })?,
            ModelSource::Memory(bytes) => builder.commit_from_memory(bytes).map_err(|e| {
                InferError::ModelLoad(format!("failed to load model from memory: {}", e))
            })?,
        };

        Ok(Box::new(OnnxSession {
            session,
            input_names: vec![INPUT_NAME.to_string()],
            output_names: vec![OUTPUT_NAME.to_string()],
        }))
    }
}

/// A committed ONNX Runtime session with the pose model's fixed tensor names.
pub struct OnnxSession {
    session: OrtSession,
    input_names: Vec<String>,
    output_names: Vec<String>,
}

impl Session for OnnxSession {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError> {
        // The pose model has exactly one image input
        let [(name, tensor)] = inputs else {
            return Err(InferError::ShapeMismatch {
                expected: "1 input".to_string(),
                got: format!("{} inputs", inputs.len()),
            });
        };
        if !self.input_names.iter().any(|known| known.as_str() == *name) {
            return Err(InferError::ShapeMismatch {
                expected: format!("input named one of {:?}", self.input_names),
                got: name.to_string(),
            });
        }

        let view = ArrayViewD::from_shape(IxDyn(&tensor.shape), &tensor.data).map_err(|e| {
            InferError::ShapeMismatch {
                expected: format!("{:?}", tensor.shape),
                got: format!("{} elements ({})", tensor.data.len(), e),
            }
        })?;
        let tensor_ref = TensorRef::from_array_view(view)
            .map_err(|e| InferError::Runtime(format!("failed to create tensor ref: {}", e)))?;

        let outputs = self
            .session
            .run(inputs![*name => tensor_ref])
            .map_err(|e| InferError::Session(format!("inference failed: {}", e)))?;

        let mut result = HashMap::new();
        for output_name in &self.output_names {
            let array = outputs[output_name.as_str()]
                .try_extract_array::<f32>()
                .map_err(|e| {
                    InferError::Runtime(format!("output '{}' is not f32: {}", output_name, e))
                })?;
            let shape = array.shape().to_vec();
            let data = array.iter().copied().collect();
            result.insert(output_name.clone(), Tensor::new(shape, data)?);
        }

        Ok(result)
    }

    fn input_names(&self) -> &[String] {
        &self.input_names
    }

    fn output_names(&self) -> &[String] {
        &self.output_names
    }
}
