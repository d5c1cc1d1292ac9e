use crate::InferError;
use courtside_base::Tensor;
use std::collections::HashMap;

/// A loaded model that maps named input tensors to named output tensors.
///
/// Engine faults during `run` must surface as `InferError::Session` so the
/// invoker can tell them apart from caller mistakes such as bad shapes.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
