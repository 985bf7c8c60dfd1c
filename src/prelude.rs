//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use vectorizar::prelude::*;
//! ```

pub use crate::corpus::{load_model, read_documents, save_model, Document, FieldMap, Records};
pub use crate::error::{Result, VectorizarError};
pub use crate::normalize::normalize;
pub use crate::params::{EntityPolicy, TextModelParams};
pub use crate::textmodel::TextModel;
pub use crate::tokenize::{compute_token_groups, tokenize, TokenSpec};
pub use crate::vocabulary::{TokenFilter, Vocabulary};
pub use crate::weighting::{VectorSpace, WeightingScheme};
