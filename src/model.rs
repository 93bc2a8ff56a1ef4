//! Language models and the load-once model cache.
//!
//! A [`Model`] is a lexicon plus a mention-coverage level. [`ModelStore`] hands
//! out one shared [`Pipeline`] per [`ModelSize`], built on first use and reused
//! afterwards. The store is a plain value: construct it once at startup and
//! share it (the server keeps it in its state).

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{Lexicon, LexiconExtension};
use crate::mention::MentionDetector;
use crate::pipeline::Pipeline;
use crate::tagger::Tagger;
use crate::token::Document;
use crate::{Error, Result};

/// Model size selector.
///
/// | Size | Mentions |
/// |------|----------|
/// | `Small` | pronouns, proper names |
/// | `Medium` | + determiner/possessor-led noun phrases, "X and Y" groups |
/// | `Large` | + bare noun phrases headed by a known noun ("elderly people") |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    /// Pronouns and names only
    Small,
    /// Default
    #[default]
    Medium,
    /// Widest mention coverage
    Large,
}

impl ModelSize {
    /// All sizes, smallest first.
    pub const ALL: [ModelSize; 3] = [ModelSize::Small, ModelSize::Medium, ModelSize::Large];

    /// Lower-case name, also the lexicon file stem.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModelSize::Small => "small",
            ModelSize::Medium => "medium",
            ModelSize::Large => "large",
        }
    }

    fn slot(self) -> usize {
        match self {
            ModelSize::Small => 0,
            ModelSize::Medium => 1,
            ModelSize::Large => 2,
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" | "sm" => Ok(ModelSize::Small),
            "medium" | "md" => Ok(ModelSize::Medium),
            "large" | "lg" => Ok(ModelSize::Large),
            other => Err(Error::invalid_input(format!(
                "unknown model size '{other}' (expected small, medium or large)"
            ))),
        }
    }
}

/// A loaded language model: tags tokens and detects mentions.
#[derive(Debug, Clone)]
pub struct Model {
    size: ModelSize,
    lexicon: Lexicon,
}

impl Model {
    /// Model backed by the built-in lexicon only.
    #[must_use]
    pub fn builtin(size: ModelSize) -> Self {
        Self {
            size,
            lexicon: Lexicon::builtin(),
        }
    }

    /// Load a model, merging `<lexicon_dir>/<size>.json` into the built-in
    /// lexicon when a directory is given.
    ///
    /// # Errors
    ///
    /// `Error::ModelInit` if the lexicon file is missing or malformed.
    pub fn load(size: ModelSize, lexicon_dir: Option<&Path>) -> Result<Self> {
        let mut model = Self::builtin(size);
        let Some(dir) = lexicon_dir else {
            return Ok(model);
        };

        let path = dir.join(format!("{}.json", size.as_str()));
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Error::model_init(format!("cannot read lexicon {}: {e}", path.display())))?;
        let ext: LexiconExtension = serde_json::from_str(&raw)
            .map_err(|e| Error::model_init(format!("malformed lexicon {}: {e}", path.display())))?;
        log::debug!("[Model] Merging {} words from {}", ext.len(), path.display());
        model.lexicon.extend(ext);
        Ok(model)
    }

    /// Size of this model.
    #[must_use]
    pub fn size(&self) -> ModelSize {
        self.size
    }

    /// Lexicon used for tagging and agreement.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Tag the document's tokens and attach detected mentions.
    pub fn annotate(&self, doc: &mut Document) {
        Tagger::new(&self.lexicon).tag(doc.tokens_mut());
        let mentions = MentionDetector::new(self.size, &self.lexicon).detect(doc.tokens());
        doc.set_mentions(mentions);
    }
}

/// A pipeline shared between requests.
pub type SharedPipeline = Arc<Mutex<Pipeline>>;

/// Load-once cache of one pipeline per model size.
#[derive(Debug, Default)]
pub struct ModelStore {
    lexicon_dir: Option<PathBuf>,
    slots: [OnceCell<SharedPipeline>; 3],
}

impl ModelStore {
    /// Store using only built-in lexicons.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that merges `<dir>/<size>.json` into each model it loads.
    #[must_use]
    pub fn with_lexicon_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            lexicon_dir: Some(dir.into()),
            ..Self::default()
        }
    }

    /// Pipeline for `size`, loading it on first use.
    ///
    /// A failed load leaves the slot empty, so the next call retries.
    ///
    /// # Errors
    ///
    /// Propagates `Error::ModelInit` from [`Model::load`].
    pub fn get(&self, size: ModelSize) -> Result<SharedPipeline> {
        let slot = &self.slots[size.slot()];
        if let Some(pipeline) = slot.get() {
            log::debug!("[Model] Reusing cached {size} model");
            return Ok(Arc::clone(pipeline));
        }
        let pipeline = slot.get_or_try_init(|| {
            let model = Model::load(size, self.lexicon_dir.as_deref())?;
            log::info!("[Model] Loaded {size} model");
            Ok::<_, Error>(Arc::new(Mutex::new(Pipeline::new(model))))
        })?;
        Ok(Arc::clone(pipeline))
    }

    /// True if `size` has been loaded.
    #[must_use]
    pub fn is_loaded(&self, size: ModelSize) -> bool {
        self.slots[size.slot()].get().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::Animacy;
    use std::fs;

    #[test]
    fn test_size_parse_and_display() {
        assert_eq!("small".parse::<ModelSize>().unwrap(), ModelSize::Small);
        assert_eq!(" LG ".parse::<ModelSize>().unwrap(), ModelSize::Large);
        assert_eq!(ModelSize::Medium.to_string(), "medium");
        assert!("huge".parse::<ModelSize>().unwrap_err().is_client_error());
        assert_eq!(ModelSize::default(), ModelSize::Medium);
    }

    #[test]
    fn test_store_loads_once() {
        let store = ModelStore::new();
        assert!(!store.is_loaded(ModelSize::Medium));
        let a = store.get(ModelSize::Medium).unwrap();
        let b = store.get(ModelSize::Medium).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(store.is_loaded(ModelSize::Medium));
        assert!(!store.is_loaded(ModelSize::Small));
    }

    #[test]
    fn test_pipeline_is_mutable_in_place() {
        let store = ModelStore::new();
        let shared = store.get(ModelSize::Small).unwrap();
        shared
            .lock()
            .set_stage(Box::new(crate::coref::CorefStage::default()));
        let again = store.get(ModelSize::Small).unwrap();
        assert!(again.lock().has_stage("coref"));
    }

    #[test]
    fn test_lexicon_dir_extends_model() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("medium.json"), r#"{"animal": ["goat"]}"#).unwrap();
        let model = Model::load(ModelSize::Medium, Some(dir.path())).unwrap();
        assert_eq!(model.lexicon().animacy("goat"), Animacy::Animal);
    }

    #[test]
    fn test_missing_lexicon_is_model_init_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ModelStore::with_lexicon_dir(dir.path());
        let err = store.get(ModelSize::Large).unwrap_err();
        assert!(matches!(err, Error::ModelInit(_)));
        assert!(!store.is_loaded(ModelSize::Large));
    }

    #[test]
    fn test_malformed_lexicon_is_model_init_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("small.json"), "not json").unwrap();
        let err = Model::load(ModelSize::Small, Some(dir.path())).unwrap_err();
        assert!(matches!(err, Error::ModelInit(_)));
    }
}
