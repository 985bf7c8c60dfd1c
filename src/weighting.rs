//! Vector-space weighting models.
//!
//! A [`VectorSpace`] owns the fitted [`Vocabulary`] and one scalar weight
//! per token id, and converts token sequences into sparse `(id, score)`
//! vectors. Three closed variants are supported, selected at construction:
//!
//! - **TF-IDF** (default): weight is `log2(N / df)`, scores are
//!   `tf * weight` with the vector L2-normalized;
//! - **TF**: weight is 1, scores are the normalized term frequencies,
//!   no vector normalization;
//! - **Entropy**: weight is a class-discriminativeness score derived from
//!   the Shannon entropy of the token's occurrence distribution across
//!   class labels; scores are the weights themselves.
//!
//! Unknown tokens are silently dropped during transformation; they carry
//! no weight, and this is documented behavior rather than an error.

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizarError};
use crate::vocabulary::{TokenFilter, Vocabulary};

/// Weighting variant selector.
///
/// Parses from the configuration strings `"tfidf"`, `"tf"` and
/// `"entropy"`.
///
/// # Examples
///
/// ```
/// use vectorizar::weighting::WeightingScheme;
///
/// let scheme: WeightingScheme = "entropy".parse().unwrap();
/// assert_eq!(scheme, WeightingScheme::Entropy);
/// assert!("cosine".parse::<WeightingScheme>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightingScheme {
    /// Inverse document frequency weights, L2-normalized vectors.
    #[default]
    TfIdf,
    /// Constant weights; vectors carry raw normalized term frequencies.
    Tf,
    /// Entropy-derived discriminativeness weights; requires class labels.
    Entropy,
}

impl FromStr for WeightingScheme {
    type Err = VectorizarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tfidf" => Ok(WeightingScheme::TfIdf),
            "tf" => Ok(WeightingScheme::Tf),
            "entropy" => Ok(WeightingScheme::Entropy),
            other => Err(VectorizarError::invalid_parameter(
                "weighting",
                other,
                "tfidf|tf|entropy",
            )),
        }
    }
}

impl fmt::Display for WeightingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeightingScheme::TfIdf => "tfidf",
            WeightingScheme::Tf => "tf",
            WeightingScheme::Entropy => "entropy",
        };
        f.write_str(name)
    }
}

/// A fitted weighting model: vocabulary plus per-id weight table.
///
/// Immutable once constructed; every read path takes `&self`, so a fitted
/// space can be shared freely across threads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VectorSpace {
    scheme: WeightingScheme,
    vocab: Vocabulary,
    weight: Vec<f64>,
    ndocs: usize,
}

impl VectorSpace {
    /// Fit a weighting model over a tokenized corpus.
    ///
    /// `labels` must be present and positionally aligned with `corpus` for
    /// [`WeightingScheme::Entropy`]; the other schemes ignore it. The
    /// vocabulary and weight table are built in one pass and share an id
    /// space: every id the vocabulary can return has a weight entry.
    ///
    /// # Errors
    ///
    /// [`VectorizarError::InvalidParameter`] when entropy weighting is
    /// requested without labels, or with a label sequence whose length
    /// does not match the corpus.
    pub fn fit(
        scheme: WeightingScheme,
        corpus: &[Vec<String>],
        labels: Option<&[String]>,
        min_filter: TokenFilter,
        max_filter: TokenFilter,
    ) -> Result<Self> {
        let vocab = Vocabulary::build(corpus, min_filter, max_filter);
        let ndocs = corpus.len();

        let weight = match scheme {
            WeightingScheme::TfIdf => (0..vocab.len())
                .map(|id| (ndocs as f64 / vocab.doc_freq(id) as f64).log2())
                .collect(),
            WeightingScheme::Tf => vec![1.0; vocab.len()],
            WeightingScheme::Entropy => {
                let labels = labels.ok_or_else(|| {
                    VectorizarError::invalid_parameter(
                        "weighting",
                        "entropy",
                        "a class label for every document",
                    )
                })?;
                if labels.len() != corpus.len() {
                    return Err(VectorizarError::invalid_parameter(
                        "labels",
                        labels.len(),
                        &format!("{} labels, one per document", corpus.len()),
                    ));
                }
                entropy_weights(corpus, labels, &vocab)
            }
        };

        Ok(Self {
            scheme,
            vocab,
            weight,
            ndocs,
        })
    }

    /// Map a token sequence to `(ids, term frequencies, weights)`.
    ///
    /// Unknown tokens are dropped. Ids appear in first-seen order; term
    /// frequencies are counts divided by the document's total known-token
    /// count. All three vectors have the same length.
    #[must_use]
    pub fn doc2weight(&self, tokens: &[String]) -> (Vec<usize>, Vec<f64>, Vec<f64>) {
        let mut ids: Vec<usize> = Vec::new();
        let mut counts: Vec<f64> = Vec::new();
        let mut position: HashMap<usize, usize> = HashMap::new();

        for token in tokens {
            if let Some(id) = self.vocab.id(token) {
                match position.entry(id) {
                    Entry::Occupied(e) => counts[*e.get()] += 1.0,
                    Entry::Vacant(e) => {
                        e.insert(ids.len());
                        ids.push(id);
                        counts.push(1.0);
                    }
                }
            }
        }

        let total: f64 = counts.iter().sum();
        if total > 0.0 {
            for c in &mut counts {
                *c /= total;
            }
        }
        let weights = ids.iter().map(|&id| self.weight[id]).collect();
        (ids, counts, weights)
    }

    /// Sparse feature vector for a token sequence.
    ///
    /// TF-IDF scores are `tf * weight` with the whole vector L2-normalized;
    /// a zero norm (no known tokens, or every weight zero) yields an empty
    /// vector rather than a division by zero. TF scores are the term
    /// frequencies as-is; entropy scores are the weights as-is.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectorizar::vocabulary::TokenFilter;
    /// use vectorizar::weighting::{VectorSpace, WeightingScheme};
    ///
    /// let corpus: Vec<Vec<String>> = vec![
    ///     vec!["hola".into(), "mundo".into()],
    ///     vec!["hola".into(), "marte".into()],
    /// ];
    /// let space = VectorSpace::fit(
    ///     WeightingScheme::TfIdf,
    ///     &corpus,
    ///     None,
    ///     TokenFilter::Count(0),
    ///     TokenFilter::Count(1),
    /// ).unwrap();
    ///
    /// let v = space.vector(&corpus[0]);
    /// let norm: f64 = v.iter().map(|(_, s)| s * s).sum();
    /// assert!((norm - 1.0).abs() < 1e-12);
    ///
    /// // out-of-vocabulary tokens are dropped, not errors
    /// assert!(space.vector(&["jupiter".to_string()]).is_empty());
    /// ```
    #[must_use]
    pub fn vector(&self, tokens: &[String]) -> Vec<(usize, f64)> {
        let (ids, tf, w) = self.doc2weight(tokens);
        match self.scheme {
            WeightingScheme::Tf => ids.into_iter().zip(tf).collect(),
            WeightingScheme::Entropy => ids.into_iter().zip(w).collect(),
            WeightingScheme::TfIdf => {
                let scores: Vec<f64> = tf.iter().zip(w.iter()).map(|(a, b)| a * b).collect();
                let norm = scores.iter().map(|s| s * s).sum::<f64>().sqrt();
                if norm == 0.0 {
                    return Vec::new();
                }
                ids.into_iter()
                    .zip(scores)
                    .map(|(id, s)| (id, s / norm))
                    .collect()
            }
        }
    }

    /// The scheme this space was fit with.
    #[must_use]
    pub fn scheme(&self) -> WeightingScheme {
        self.scheme
    }

    /// The fitted vocabulary.
    #[must_use]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Number of terms in the vocabulary (and in the weight table).
    #[must_use]
    pub fn num_terms(&self) -> usize {
        self.vocab.len()
    }

    /// Number of documents the space was fit on.
    #[must_use]
    pub fn ndocs(&self) -> usize {
        self.ndocs
    }

    /// Weight for a token id, if the id is in range.
    #[must_use]
    pub fn weight(&self, id: usize) -> Option<f64> {
        self.weight.get(id).copied()
    }
}

/// Per-token entropy weights over class-conditional occurrence counts.
///
/// Occurrence is distinct-per-document, matching how document frequency is
/// counted. Class labels are sorted before counting, so the result is
/// invariant to the order classes appear in the corpus. Tokens with zero
/// total occurrence fall back to the uniform distribution `1/#classes`.
fn entropy_weights(corpus: &[Vec<String>], labels: &[String], vocab: &Vocabulary) -> Vec<f64> {
    let ntokens = vocab.len();
    if ntokens == 0 {
        return Vec::new();
    }

    let classes: BTreeSet<&str> = labels.iter().map(String::as_str).collect();
    let class_index: HashMap<&str, usize> = classes
        .into_iter()
        .enumerate()
        .map(|(i, c)| (c, i))
        .collect();
    let nclasses = class_index.len();

    let mut counts = vec![vec![0.0f64; ntokens]; nclasses];
    for (label, tokens) in labels.iter().zip(corpus) {
        let ki = class_index[label.as_str()];
        let mut seen: HashSet<&str> = HashSet::new();
        for token in tokens {
            if seen.insert(token.as_str()) {
                if let Some(id) = vocab.id(token) {
                    counts[ki][id] += 1.0;
                }
            }
        }
    }

    // Entropy in bits, rescaled so the maximum (uniform spread) is 1 bit
    // whenever there are more than two classes.
    let scale = if nclasses > 2 {
        (nclasses as f64).log2()
    } else {
        1.0
    };

    (0..ntokens)
        .map(|id| {
            let total: f64 = (0..nclasses).map(|k| counts[k][id]).sum();
            let h: f64 = (0..nclasses)
                .map(|k| {
                    let p = if total > 0.0 {
                        counts[k][id] / total
                    } else {
                        1.0 / nclasses as f64
                    };
                    if p > 0.0 {
                        p * p.log2() / scale
                    } else {
                        0.0
                    }
                })
                .sum();
            1.0 + h
        })
        .collect()
}
