//! The text model façade: configuration + fitted vector space.
//!
//! A [`TextModel`] is constructed from [`TextModelParams`], fit exactly
//! once on a document corpus, and then used as an immutable
//! document-to-vector transformer. Fitting replaces the vocabulary and
//! weight table atomically; re-fitting is allowed and replaces them again.
//! After fitting, every operation takes `&self`, so a model can be shared
//! across threads without coordination (serialize concurrent `fit` calls
//! externally if you must re-fit a shared instance).

use serde::{Deserialize, Serialize};

use crate::corpus::Document;
use crate::error::{Result, VectorizarError};
use crate::params::TextModelParams;
use crate::tokenize::tokenize;
use crate::weighting::{VectorSpace, WeightingScheme};

/// A configurable text-to-sparse-vector model.
///
/// # Examples
///
/// ```
/// use vectorizar::corpus::Document;
/// use vectorizar::params::TextModelParams;
/// use vectorizar::textmodel::TextModel;
///
/// let docs = vec![
///     Document::new("buenos dias"),
///     Document::new("excelente dia"),
///     Document::new("odio los lunes"),
/// ];
///
/// let mut model = TextModel::new(TextModelParams::default()).unwrap();
/// model.fit(&docs).unwrap();
///
/// let v = model.vector("buenos dias a todos").unwrap();
/// assert!(!v.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextModel {
    params: TextModelParams,
    space: Option<VectorSpace>,
}

impl TextModel {
    /// Create an unfit model, validating the configuration once.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::InvalidParameter`] for an invalid configuration
    /// (empty token list, zero-sized gram, out-of-range fraction filter).
    pub fn new(params: TextModelParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            space: None,
        })
    }

    /// Create an unfit model with the default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            params: TextModelParams::default(),
            space: None,
        }
    }

    /// Fit the vocabulary and weight table on a document corpus.
    ///
    /// Each document is normalized and tokenized with this model's
    /// configuration; the token lists feed vocabulary construction and the
    /// configured weighting scheme. Entropy weighting requires every
    /// document to carry a class label.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::MissingField`] when entropy weighting is
    /// configured and any document lacks a `klass`.
    pub fn fit(&mut self, docs: &[Document]) -> Result<&mut Self> {
        let corpus: Vec<Vec<String>> = docs
            .iter()
            .map(|d| tokenize(&d.text, &self.params))
            .collect();

        let labels = if self.params.weighting == WeightingScheme::Entropy {
            let labels: Vec<String> = docs
                .iter()
                .map(|d| {
                    d.klass
                        .clone()
                        .ok_or_else(|| VectorizarError::missing_field("klass"))
                })
                .collect::<Result<_>>()?;
            Some(labels)
        } else {
            None
        };

        let space = VectorSpace::fit(
            self.params.weighting,
            &corpus,
            labels.as_deref(),
            self.params.token_min_filter,
            self.params.token_max_filter,
        )?;
        self.space = Some(space);
        Ok(self)
    }

    /// Normalize and tokenize a raw document.
    ///
    /// Works on unfit models too, and is deterministic: repeated calls on
    /// an unfit or identically-fit model yield identical output.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize(text, &self.params)
    }

    /// Sparse feature vector for a raw document.
    ///
    /// Unknown tokens are dropped; a document with no known tokens yields
    /// an empty vector.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::Other`] if the model has not been fit.
    pub fn vector(&self, text: &str) -> Result<Vec<(usize, f64)>> {
        let space = self.space()?;
        Ok(space.vector(&self.tokenize(text)))
    }

    /// Transform a batch of documents into sparse feature vectors.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::Other`] if the model has not been fit.
    pub fn transform(&self, docs: &[Document]) -> Result<Vec<Vec<(usize, f64)>>> {
        let space = self.space()?;
        Ok(docs
            .iter()
            .map(|d| space.vector(&self.tokenize(&d.text)))
            .collect())
    }

    /// Number of terms in the fitted vocabulary; 0 when unfit.
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.space.as_ref().map_or(0, VectorSpace::num_terms)
    }

    /// The model configuration.
    #[must_use]
    pub fn params(&self) -> &TextModelParams {
        &self.params
    }

    /// The fitted vector space, if any.
    #[must_use]
    pub fn vector_space(&self) -> Option<&VectorSpace> {
        self.space.as_ref()
    }

    /// Serialize the whole model (configuration + vocabulary + weights)
    /// into an opaque byte blob.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::Serialization`] on encoding failure.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| VectorizarError::Serialization(e.to_string()))
    }

    /// Restore a model previously produced by [`TextModel::to_bytes`].
    ///
    /// Round-trips with full behavioral fidelity: the restored model
    /// tokenizes and transforms identically to the original, including on
    /// documents never seen during fitting.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::Serialization`] on malformed input,
    /// [`VectorizarError::InvalidParameter`] if the embedded configuration
    /// fails validation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let model: TextModel = serde_json::from_slice(bytes)
            .map_err(|e| VectorizarError::Serialization(e.to_string()))?;
        model.params.validate()?;
        Ok(model)
    }

    fn space(&self) -> Result<&VectorSpace> {
        self.space
            .as_ref()
            .ok_or_else(|| VectorizarError::Other("model is not fit; call fit() first".to_string()))
    }
}
