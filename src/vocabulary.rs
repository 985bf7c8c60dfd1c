//! Vocabulary construction from a tokenized corpus.
//!
//! [`Vocabulary::build`] counts per-token document frequency, applies the
//! min/max filters, and assigns dense 0-based ids in ascending document
//! frequency (first-encounter order breaks ties). The id assignment is a
//! deterministic post-processing pass, not a map-iteration accident: two
//! builds over the same corpus with the same filters produce identical ids.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizarError};

/// A document-frequency threshold, either absolute or relative to the
/// corpus size.
///
/// Fractions are converted to `ceil(fraction * corpus_size)`, floored at 1
/// so a tiny fraction over a tiny corpus never excludes everything.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TokenFilter {
    /// Absolute document count.
    Count(usize),
    /// Fraction of the corpus size, in the open interval (0, 1).
    Fraction(f64),
}

impl TokenFilter {
    /// Resolve to an absolute document count for a corpus of `ndocs`.
    #[must_use]
    pub fn resolve(self, ndocs: usize) -> usize {
        match self {
            TokenFilter::Count(c) => c,
            TokenFilter::Fraction(f) => {
                let converted = (f * ndocs as f64).ceil() as usize;
                converted.max(1)
            }
        }
    }

    /// Validate the threshold; fractions must lie in (0, 1).
    pub fn validate(self, param: &str) -> Result<()> {
        if let TokenFilter::Fraction(f) = self {
            if !(f > 0.0 && f < 1.0) {
                return Err(VectorizarError::invalid_parameter(
                    param,
                    f,
                    "fraction in (0, 1)",
                ));
            }
        }
        Ok(())
    }
}

/// Token → dense id mapping with per-id document frequencies.
///
/// Ids are contiguous from 0; `doc_freq(id)` is defined for exactly the ids
/// the mapping returns. An empty vocabulary is a valid state (a degenerate
/// corpus fits to a model that produces empty vectors), never an error.
///
/// # Examples
///
/// ```
/// use vectorizar::vocabulary::{TokenFilter, Vocabulary};
///
/// let corpus: Vec<Vec<String>> = vec![
///     vec!["a".into(), "b".into()],
///     vec!["a".into(), "c".into()],
/// ];
/// let vocab = Vocabulary::build(&corpus, TokenFilter::Count(0), TokenFilter::Count(1));
/// assert_eq!(vocab.len(), 3);
/// // "a" appears in both documents, so it gets the highest id
/// assert_eq!(vocab.id("a"), Some(2));
/// assert_eq!(vocab.doc_freq(2), 2);
/// assert_eq!(vocab.id("zzz"), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    word2id: HashMap<String, usize>,
    doc_freq: Vec<usize>,
}

impl Vocabulary {
    /// Build a vocabulary from a tokenized corpus.
    ///
    /// Document frequency counts presence per document, not raw term
    /// frequency. `min_filter` keeps tokens with frequency strictly greater
    /// than the resolved threshold; `max_filter` keeps tokens with
    /// frequency strictly less, with `Count(1)` meaning "no upper filter".
    #[must_use]
    pub fn build(corpus: &[Vec<String>], min_filter: TokenFilter, max_filter: TokenFilter) -> Self {
        let ndocs = corpus.len();

        // token -> (first-encounter rank, document frequency)
        let mut stats: HashMap<&str, (usize, usize)> = HashMap::new();
        for tokens in corpus {
            let mut seen: HashSet<&str> = HashSet::new();
            for token in tokens {
                let token = token.as_str();
                if seen.insert(token) {
                    let next_rank = stats.len();
                    let entry = stats.entry(token).or_insert((next_rank, 0));
                    entry.1 += 1;
                }
            }
        }

        let min = min_filter.resolve(ndocs);
        let max = match max_filter {
            TokenFilter::Count(1) => None,
            other => Some(other.resolve(ndocs)),
        };

        let mut surviving: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|&(_, (_, df))| df > min && max.map_or(true, |m| df < m))
            .map(|(token, (rank, df))| (token, rank, df))
            .collect();
        surviving.sort_by_key(|&(_, rank, df)| (df, rank));

        let mut word2id = HashMap::with_capacity(surviving.len());
        let mut doc_freq = Vec::with_capacity(surviving.len());
        for (id, (token, _, df)) in surviving.into_iter().enumerate() {
            word2id.insert(token.to_string(), id);
            doc_freq.push(df);
        }
        Vocabulary { word2id, doc_freq }
    }

    /// Id of `token`, if it survived fitting.
    #[must_use]
    pub fn id(&self, token: &str) -> Option<usize> {
        self.word2id.get(token).copied()
    }

    /// Document frequency of the token with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is out of range.
    #[must_use]
    pub fn doc_freq(&self, id: usize) -> usize {
        self.doc_freq[id]
    }

    /// Number of tokens in the vocabulary.
    #[must_use]
    pub fn len(&self) -> usize {
        self.doc_freq.len()
    }

    /// True when no token survived fitting.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.doc_freq.is_empty()
    }

    /// Iterate over `(token, id)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.word2id.iter().map(|(t, &id)| (t.as_str(), id))
    }
}
