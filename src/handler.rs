//! The submission handler: acquire the model, attach the coreference stage,
//! run it, render.

use std::sync::Arc;

use crate::coref::{CorefParams, CorefStage};
use crate::form::Submission;
use crate::model::{ModelSize, ModelStore};
use crate::render::Rendering;
use crate::token::Document;
use crate::Result;

/// Resolves submissions against one model size from a shared store.
#[derive(Debug, Clone)]
pub struct Demo {
    store: Arc<ModelStore>,
    size: ModelSize,
}

impl Demo {
    /// Handler using `size` from `store`.
    #[must_use]
    pub fn new(store: Arc<ModelStore>, size: ModelSize) -> Self {
        Self { store, size }
    }

    /// Model size this handler uses.
    #[must_use]
    pub fn size(&self) -> ModelSize {
        self.size
    }

    /// The shared model store.
    #[must_use]
    pub fn store(&self) -> &Arc<ModelStore> {
        &self.store
    }

    /// Attach a fresh coreference stage with `params` and run it over `text`.
    ///
    /// The stage is re-attached on every call, even with unchanged
    /// parameters. Attaching and running happen under one lock, so
    /// concurrent calls never see each other's parameters.
    ///
    /// # Errors
    ///
    /// Model load failures and stage errors.
    pub fn resolve(&self, text: &str, params: CorefParams) -> Result<Document> {
        let shared = self.store.get(self.size)?;
        let mut pipeline = shared.lock();
        pipeline.set_stage(Box::new(CorefStage::new(params)));
        pipeline.run(text)
    }

    /// Resolve a validated submission and render it.
    ///
    /// # Errors
    ///
    /// See [`Demo::resolve`].
    pub fn submit(&self, submission: &Submission) -> Result<Rendering> {
        let doc = self.resolve(&submission.paragraph, submission.params)?;
        log::info!(
            "[Demo] Resolved {} chars: {} clusters",
            submission.paragraph.chars().count(),
            doc.clusters().len()
        );
        Ok(Rendering::from_document(&doc))
    }
}
