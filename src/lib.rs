//! # corefview
//!
//! Interactive coreference resolution for Rust.
//!
//! Submit a paragraph, get back which words refer to the same entity:
//!
//! - **Highlighting**: coreferent tokens wrapped in spans whose tooltip names
//!   the main mention of every cluster they belong to
//! - **Resolved text**: each mention replaced by its cluster's main mention
//! - **Clusters**: `main: [m1, m2, ...]` per entity
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use corefview::{CorefParams, Demo, ModelSize, ModelStore};
//!
//! let demo = Demo::new(Arc::new(ModelStore::new()), ModelSize::Medium);
//! let doc = demo.resolve("My sister has a dog. She loves him.", CorefParams::default()).unwrap();
//!
//! assert!(doc.has_coref());
//! assert_eq!(doc.resolved_text(), "My sister has a dog. My sister loves a dog.");
//! ```
//!
//! ## Pipeline
//!
//! | Step | Module | |
//! |------|--------|-|
//! | tokenize | [`tokenizer`] | whitespace-preserving, sentence ids |
//! | tag | [`tagger`] | word class from lexicon and capitalization |
//! | detect | [`mention`] | pronouns, names, noun phrases (per [`ModelSize`]) |
//! | resolve | [`coref`] | mention-pair scoring with agreement constraints |
//! | render | [`render`] | HTML, terminal text, JSON |
//!
//! Models are cached per size in a [`ModelStore`]; the coreference stage is
//! re-attached with fresh [`CorefParams`] on every submission via
//! [`Pipeline::set_stage`].
//!
//! ## Design Philosophy
//!
//! - **No gender from names**: "Mary" and "John" take any personal pronoun;
//!   gender comes only from pronouns, gendered nouns, and honorifics
//! - **Shallow and inspectable**: lexicons plus scoring rules, no learned weights
//! - **Validated at the boundary**: slider ranges are checked where input arrives

#![warn(missing_docs)]

pub mod config;
pub mod coref;
mod error;
pub mod form;
pub mod handler;
pub mod lexicon;
pub mod mention;
pub mod model;
pub mod page;
pub mod pipeline;
pub mod render;
pub mod server;
pub mod tagger;
pub mod token;
pub mod tokenizer;

pub mod prelude {
    //! Commonly used items, re-exported for convenience.
    //!
    //! ```rust
    //! use corefview::prelude::*;
    //!
    //! let mut pipeline = Pipeline::new(Model::builtin(ModelSize::Medium));
    //! pipeline.set_stage(Box::new(CorefStage::new(CorefParams::default())));
    //! let doc = pipeline.run("Ana and Tom are siblings. Ana is older but her brother is taller.").unwrap();
    //! for cluster in doc.clusters() {
    //!     println!("{cluster}");
    //! }
    //! ```
    pub use crate::coref::{CorefParams, CorefStage};
    pub use crate::error::{Error, Result};
    pub use crate::handler::Demo;
    pub use crate::model::{Model, ModelSize, ModelStore};
    pub use crate::pipeline::{Pipeline, Stage};
    pub use crate::render::Rendering;
    pub use crate::token::{Cluster, Document, Span, Token};
}

// Re-exports
pub use config::Config;
pub use coref::{CorefParams, CorefStage};
pub use error::{Error, Result};
pub use form::{FormInput, Mode, Submission, EXAMPLE_PARAGRAPHS};
pub use handler::Demo;
pub use model::{Model, ModelSize, ModelStore, SharedPipeline};
pub use pipeline::{Pipeline, Stage};
pub use render::Rendering;
pub use token::{Cluster, Document, Span, Tag, Token};
pub use tokenizer::Tokenizer;
