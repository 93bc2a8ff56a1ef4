//! Processing pipeline: tokenizer, model, then named stages in order.
//!
//! Stages are identified by name. [`Pipeline::set_stage`] is the idempotent
//! way to attach one: it replaces a stage with the same name in place and
//! otherwise appends, so re-attaching with new parameters never fails.
//!
//! ```rust
//! use corefview::{CorefParams, CorefStage, Model, ModelSize, Pipeline};
//!
//! let mut pipeline = Pipeline::new(Model::builtin(ModelSize::Medium));
//! pipeline.set_stage(Box::new(CorefStage::new(CorefParams::default())));
//! pipeline.set_stage(Box::new(CorefStage::new(CorefParams { greedyness: 0.9, ..Default::default() })));
//! assert_eq!(pipeline.stage_names(), vec!["coref"]);
//!
//! let doc = pipeline.run("My sister has a dog. She loves him.").unwrap();
//! assert!(doc.has_coref());
//! ```

use std::fmt;

use crate::model::Model;
use crate::token::Document;
use crate::tokenizer::Tokenizer;
use crate::{Error, Result};

/// A named processing step run over an annotated document.
pub trait Stage: Send + Sync {
    /// Unique stage name within a pipeline.
    fn name(&self) -> &str;

    /// Process the document in place.
    fn process(&self, doc: &mut Document) -> Result<()>;
}

/// Tokenizer + model + ordered stages.
pub struct Pipeline {
    tokenizer: Tokenizer,
    model: Model,
    stages: Vec<Box<dyn Stage>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("model", &self.model.size())
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Pipeline {
    /// Pipeline with no stages.
    #[must_use]
    pub fn new(model: Model) -> Self {
        Self {
            tokenizer: Tokenizer::new(),
            model,
            stages: Vec::new(),
        }
    }

    /// The underlying model.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Stage names in run order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// True if a stage named `name` is attached.
    #[must_use]
    pub fn has_stage(&self, name: &str) -> bool {
        self.stages.iter().any(|s| s.name() == name)
    }

    /// Append a stage.
    ///
    /// # Errors
    ///
    /// `Error::DuplicateStage` if a stage with the same name exists.
    pub fn add_stage(&mut self, stage: Box<dyn Stage>) -> Result<()> {
        if self.has_stage(stage.name()) {
            return Err(Error::DuplicateStage(stage.name().to_string()));
        }
        self.stages.push(stage);
        Ok(())
    }

    /// Replace the stage with the same name, or append it.
    ///
    /// Returns the replaced stage, if any.
    pub fn set_stage(&mut self, stage: Box<dyn Stage>) -> Option<Box<dyn Stage>> {
        match self.stages.iter().position(|s| s.name() == stage.name()) {
            Some(i) => {
                log::debug!("[Pipeline] Replacing stage '{}'", stage.name());
                Some(std::mem::replace(&mut self.stages[i], stage))
            }
            None => {
                log::debug!("[Pipeline] Adding stage '{}'", stage.name());
                self.stages.push(stage);
                None
            }
        }
    }

    /// Detach the stage named `name`.
    pub fn remove_stage(&mut self, name: &str) -> Option<Box<dyn Stage>> {
        let i = self.stages.iter().position(|s| s.name() == name)?;
        Some(self.stages.remove(i))
    }

    /// Tokenize, annotate, and run every stage over `text`.
    ///
    /// # Errors
    ///
    /// Propagates the first stage error.
    pub fn run(&self, text: &str) -> Result<Document> {
        let tokens = self.tokenizer.tokenize(text);
        let mut doc = Document::new(text, tokens);
        self.model.annotate(&mut doc);
        for stage in &self.stages {
            stage.process(&mut doc)?;
        }
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSize;

    struct Named(&'static str);

    impl Stage for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn process(&self, _doc: &mut Document) -> Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl Stage for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn process(&self, _doc: &mut Document) -> Result<()> {
            Err(Error::inference("boom"))
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(Model::builtin(ModelSize::Small))
    }

    #[test]
    fn test_add_stage_rejects_duplicates() {
        let mut p = pipeline();
        p.add_stage(Box::new(Named("a"))).unwrap();
        let err = p.add_stage(Box::new(Named("a"))).unwrap_err();
        assert!(matches!(err, Error::DuplicateStage(ref n) if n == "a"));
    }

    #[test]
    fn test_set_stage_replaces_in_place() {
        let mut p = pipeline();
        assert!(p.set_stage(Box::new(Named("a"))).is_none());
        p.set_stage(Box::new(Named("b")));
        let old = p.set_stage(Box::new(Named("a")));
        assert_eq!(old.map(|s| s.name().to_string()), Some("a".to_string()));
        assert_eq!(p.stage_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_remove_stage() {
        let mut p = pipeline();
        p.set_stage(Box::new(Named("a")));
        assert!(p.remove_stage("a").is_some());
        assert!(p.remove_stage("a").is_none());
        assert!(!p.has_stage("a"));
    }

    #[test]
    fn test_run_without_stages_has_no_coref() {
        let doc = pipeline().run("She loves him.").unwrap();
        assert!(!doc.has_coref());
        assert_eq!(doc.resolved_text(), "She loves him.");
        assert_eq!(doc.mentions().len(), 2);
    }

    #[test]
    fn test_stage_error_propagates() {
        let mut p = pipeline();
        p.set_stage(Box::new(Failing));
        assert!(matches!(p.run("text").unwrap_err(), Error::Inference(_)));
    }
}
