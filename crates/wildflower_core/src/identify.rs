use crate::classifier::{ClassLabel, Classifier, RemoteClassifier};
use crate::config::{AppConfig, LocalConfig, Strategy};
use crate::error::Result;
use crate::species::SpeciesRecord;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Predicted species with its facts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identification {
    pub label: ClassLabel,
    pub species: &'static SpeciesRecord,
}

impl fmt::Display for Identification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let species = self.species;
        writeln!(f, "Wildflower is likely to be '{}'", species.name)?;
        writeln!(f, "Scientific name: {}", species.scientific_name)?;
        writeln!(f, "Malay name: {}", species.malay_name.unwrap_or("None"))?;
        write!(f, "Fun fact: {}", species.fun_fact)
    }
}

/// Runs one classifier and looks the result up in the species table.
pub struct Identifier {
    classifier: Box<dyn Classifier>,
}

impl Identifier {
    pub fn new(classifier: Box<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Build the backend named by the configuration. For the local strategy
    /// this loads the model, so call it once at startup.
    pub fn from_config(cfg: &AppConfig) -> Result<Self> {
        cfg.validate()?;
        let classifier: Box<dyn Classifier> = match cfg.strategy {
            Strategy::Remote => Box::new(RemoteClassifier::with_timeout(
                cfg.remote.endpoint.clone(),
                cfg.remote.timeout_secs.map(Duration::from_secs),
            )?),
            Strategy::Local => load_local(&cfg.local)?,
        };
        tracing::info!(backend = classifier.name(), "classifier ready");
        Ok(Self::new(classifier))
    }

    pub fn backend(&self) -> &'static str {
        self.classifier.name()
    }

    pub fn identify(&self, image: &[u8]) -> Result<Identification> {
        let label = self.classifier.predict(image)?;
        let species = label.resolve()?;
        tracing::info!(
            backend = self.classifier.name(),
            label = %label,
            species = species.name,
            "identified"
        );
        Ok(Identification { label, species })
    }
}

#[cfg(feature = "ort")]
fn load_local(cfg: &LocalConfig) -> Result<Box<dyn Classifier>> {
    use crate::classifier::{LocalClassifier, OnnxModel};
    use crate::normalize::Normalizer;
    use std::sync::Arc;

    let model = OnnxModel::load(&cfg.model_path)?;
    Ok(Box::new(
        LocalClassifier::new(Arc::new(model)).with_normalizer(Normalizer::new(cfg.input_size)),
    ))
}

#[cfg(not(feature = "ort"))]
fn load_local(cfg: &LocalConfig) -> Result<Box<dyn Classifier>> {
    Err(crate::error::Error::Config(format!(
        "local strategy needs the `ort` feature (model: {})",
        cfg.model_path.display()
    )))
}
