use super::ClassificationModel;
use crate::error::{Error, Result};
use crate::normalize::NormalizedTensor;
use ndarray::CowArray;
use once_cell::sync::OnceCell;
use ort::{
    GraphOptimizationLevel, SessionBuilder, environment::Environment, session::Session,
    tensor::OrtOwnedTensor, value::Value,
};
use std::path::Path;
use std::sync::Arc;

static ORT_ENV: OnceCell<Arc<Environment>> = OnceCell::new();

fn ort_env() -> Result<Arc<Environment>> {
    ORT_ENV
        .get_or_try_init(|| {
            Environment::builder()
                .with_name("wildflower")
                .build()
                .map(Environment::into_arc)
        })
        .cloned()
        .map_err(|e| Error::Model(format!("cannot initialize ONNX Runtime: {e}")))
}

/// Wildflower classifier exported to ONNX, run through ONNX Runtime.
///
/// Expects a `(1, 299, 299, 3)` float input and produces ten class scores.
pub struct OnnxModel {
    session: Session,
}

impl OnnxModel {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Model(format!(
                "model file missing: {}",
                path.display()
            )));
        }
        let env = ort_env()?;
        let session = SessionBuilder::new(&env)
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level1))
            .and_then(|b| b.with_model_from_file(path))
            .map_err(|e| Error::Model(format!("cannot load {}: {e}", path.display())))?;
        tracing::info!(model = %path.display(), "loaded ONNX model");
        Ok(Self { session })
    }
}

impl ClassificationModel for OnnxModel {
    fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>> {
        let cow = CowArray::from(input.view().into_dyn());
        let value = Value::from_array(self.session.allocator(), &cow)
            .map_err(|e| Error::Model(format!("cannot build input tensor: {e}")))?;
        let outputs: Vec<Value> = self
            .session
            .run(vec![value])
            .map_err(|e| Error::Model(format!("inference failed: {e}")))?;
        let first = outputs
            .first()
            .ok_or_else(|| Error::Model("model returned no output".to_string()))?;
        let probs: OrtOwnedTensor<f32, _> = first
            .try_extract()
            .map_err(|e| Error::Model(format!("unexpected output tensor: {e}")))?;
        let scores: Vec<f32> = probs.view().iter().copied().collect();
        Ok(scores)
    }
}
