//! Vectorizar: sparse text feature vectors for short documents.
//!
//! Vectorizar turns raw short texts (tweets, chat messages, reviews) into
//! sparse numeric feature vectors for downstream classifiers. The pipeline
//! is a composable text normalizer (case folding, diacritics, duplicated
//! characters, URL/mention/number/emoticon handling), a multi-scheme token
//! generator (word n-grams, skip-grams, character q-grams), and a
//! vector-space weighting model (TF, TF-IDF or entropy).
//!
//! # Quick Start
//!
//! ```
//! use vectorizar::prelude::*;
//!
//! let docs = vec![
//!     Document::new("que buen dia :)"),
//!     Document::new("excelente dia"),
//!     Document::new("odio los lunes"),
//! ];
//!
//! let params = TextModelParams::default()
//!     .with_emoticons(EntityPolicy::Group)
//!     .with_token_list(vec![TokenSpec::NGram(1), TokenSpec::QGram(3)]);
//!
//! let mut model = TextModel::new(params).unwrap();
//! model.fit(&docs).unwrap();
//!
//! // sparse (id, score) pairs, L2-normalized under TF-IDF
//! let vector = model.vector("que dia tan excelente").unwrap();
//! assert!(!vector.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`params`]: model configuration (normalization switches, token list,
//!   filters, weighting selector)
//! - [`normalize`]: raw text → canonical string with entity placeholders
//! - [`tokenize`]: canonical string → token sequences per [`tokenize::TokenSpec`]
//! - [`vocabulary`]: document-frequency counting, filtering and id assignment
//! - [`weighting`]: TF / TF-IDF / entropy vector spaces
//! - [`textmodel`]: the fit/transform façade with byte-blob persistence
//! - [`corpus`]: JSON-lines records and model save/load helpers

pub mod corpus;
pub mod error;
pub mod normalize;
pub mod params;
pub mod prelude;
pub mod textmodel;
pub mod tokenize;
pub mod vocabulary;
pub mod weighting;

pub use error::{Result, VectorizarError};
pub use textmodel::TextModel;
