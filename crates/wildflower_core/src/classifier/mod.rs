//! Prediction backends.
//!
//! A [`Classifier`] turns raw image bytes into a [`ClassLabel`]. The remote
//! backend forwards the bytes to an HTTP endpoint; the local backend
//! normalizes them and runs a [`ClassificationModel`] in-process.

mod local;
#[cfg(feature = "ort")]
mod onnx;
mod remote;

pub use local::{ClassificationModel, LocalClassifier, argmax};
#[cfg(feature = "ort")]
pub use onnx::OnnxModel;
pub use remote::{DEFAULT_ENDPOINT, RemoteClassifier, UPLOAD_FIELD, UPLOAD_FILE_NAME};

use crate::error::Result;
use crate::species::{self, SpeciesRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label produced by a classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassLabel {
    /// Ordinal from the local model, in training label order.
    Index(usize),
    /// Species display name as returned by the remote endpoint.
    Name(String),
}

impl ClassLabel {
    /// Species record for this label, or `UnknownLabel`.
    pub fn resolve(&self) -> Result<&'static SpeciesRecord> {
        match self {
            ClassLabel::Index(index) => species::by_index(*index),
            ClassLabel::Name(name) => species::lookup(name),
        }
    }
}

impl fmt::Display for ClassLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassLabel::Index(index) => write!(f, "#{index}"),
            ClassLabel::Name(name) => f.write_str(name),
        }
    }
}

/// Anything that can predict a species label from encoded image bytes.
pub trait Classifier: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    fn predict(&self, image: &[u8]) -> Result<ClassLabel>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn index_and_name_resolve_to_the_same_record() {
        let by_index = ClassLabel::Index(5).resolve().unwrap();
        let by_name = ClassLabel::Name("Touch-me-not".into()).resolve().unwrap();
        assert_eq!(by_index, by_name);
        assert_eq!(by_index.scientific_name, "Mimosa pudica");
    }

    #[test]
    fn unresolvable_labels_keep_their_text() {
        let err = ClassLabel::Name("Rafflesia".into()).resolve().unwrap_err();
        assert!(matches!(err, Error::UnknownLabel(ref l) if l == "Rafflesia"));
        let err = ClassLabel::Index(42).resolve().unwrap_err();
        assert!(matches!(err, Error::UnknownLabel(ref l) if l == "42"));
    }

    #[test]
    fn labels_serialize_untagged() {
        assert_eq!(serde_json::to_string(&ClassLabel::Index(3)).unwrap(), "3");
        assert_eq!(
            serde_json::to_string(&ClassLabel::Name("Lalang".into())).unwrap(),
            "\"Lalang\""
        );
    }
}
