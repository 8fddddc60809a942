use super::{ClassLabel, Classifier};
use crate::error::{Error, Result};
use crate::normalize::{NormalizedTensor, Normalizer};
use crate::species::SPECIES_COUNT;
use std::sync::Arc;

/// In-process inference runtime: one score per species for a normalized image.
pub trait ClassificationModel: Send + Sync {
    fn infer(&self, input: &NormalizedTensor) -> Result<Vec<f32>>;
}

/// Classifier running a locally loaded model.
///
/// The model is loaded once by the caller and shared read-only.
pub struct LocalClassifier {
    model: Arc<dyn ClassificationModel>,
    normalizer: Normalizer,
}

impl LocalClassifier {
    pub fn new(model: Arc<dyn ClassificationModel>) -> Self {
        Self {
            model,
            normalizer: Normalizer::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Predict from an already normalized tensor.
    pub fn predict_tensor(&self, tensor: &NormalizedTensor) -> Result<ClassLabel> {
        let scores = self.model.infer(tensor)?;
        if scores.len() != SPECIES_COUNT {
            return Err(Error::Model(format!(
                "expected {SPECIES_COUNT} class scores, got {}",
                scores.len()
            )));
        }
        let best = argmax(&scores)
            .ok_or_else(|| Error::Model("model produced no comparable scores".to_string()))?;
        tracing::debug!(class = best, score = scores[best], "local prediction");
        Ok(ClassLabel::Index(best))
    }
}

impl Classifier for LocalClassifier {
    fn name(&self) -> &'static str {
        "local"
    }

    fn predict(&self, image: &[u8]) -> Result<ClassLabel> {
        let tensor = self.normalizer.normalize(image)?;
        self.predict_tensor(&tensor)
    }
}

/// Index of the highest score. Ties go to the lowest index and NaN never wins.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((idx, score)),
        }
    }
    best.map(|(idx, _)| idx)
}
