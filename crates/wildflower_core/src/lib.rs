//! Wildflower identification: preprocessing, prediction backends and the
//! species facts table.

pub mod classifier;
pub mod config;
mod error;
mod identify;
pub mod normalize;
pub mod species;

pub use classifier::{
    ClassLabel, ClassificationModel, Classifier, LocalClassifier, RemoteClassifier,
};
pub use config::{AppConfig, LocalConfig, RemoteConfig, Strategy};
pub use error::{Error, Result};
pub use identify::{Identification, Identifier};
pub use normalize::{MODEL_INPUT_SIZE, NormalizedTensor, Normalizer, normalize};
pub use species::{SPECIES, SpeciesRecord};

use std::fs;
use std::path::Path;

/// Whether `path` looks like an image we accept (`.jpg` / `.jpeg`).
pub fn is_supported_image(path: impl AsRef<Path>) -> bool {
    match path.as_ref().extension().and_then(|s| s.to_str()) {
        Some(ext) => {
            let ext = ext.to_ascii_lowercase();
            matches!(ext.as_str(), "jpg" | "jpeg")
        }
        None => false,
    }
}

/// Read the photo to identify from disk.
pub fn read_image(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    Ok(fs::read(path)?)
}
