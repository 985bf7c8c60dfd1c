//! Token generation over normalized text.
//!
//! A model carries an ordered list of [`TokenSpec`] values; each spec
//! produces one token list from the normalized document, and the lists are
//! concatenated in spec order into the final token sequence. Three schemes
//! are supported:
//!
//! - word n-grams (`NGram`): contiguous whitespace-delimited words,
//! - skip-grams (`SkipGram`): words drawn at a fixed stride,
//! - character q-grams (`QGram`): substrings of the space-stripped text.
//!
//! Multi-word tokens are joined with [`SEPARATOR`].

use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::params::TextModelParams;

/// Separator used to join the words of an n-gram or skip-gram token.
pub const SEPARATOR: &str = "~";

/// One token-generation scheme.
///
/// A document shorter than the scheme's window contributes zero tokens for
/// that scheme; this is not an error.
///
/// # Examples
///
/// ```
/// use vectorizar::tokenize::{compute_token_groups, TokenSpec};
///
/// let groups = compute_token_groups(
///     "el alma de la fiesta",
///     &[TokenSpec::SkipGram { size: 2, skip: 1 }],
/// );
/// assert_eq!(groups[0], vec!["el~de", "alma~la", "de~fiesta"]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenSpec {
    /// Contiguous word n-gram of the given size; size 1 emits bare words.
    NGram(usize),
    /// Contiguous character q-gram of the given size, taken over the
    /// normalized string with inter-word spaces removed.
    QGram(usize),
    /// `size` words at positions `i, i + (skip+1), i + 2*(skip+1), ...`;
    /// `skip = 0` degenerates to `NGram(size)`.
    SkipGram {
        /// Number of words drawn per token
        size: usize,
        /// Number of word positions skipped between consecutive draws
        skip: usize,
    },
}

impl TokenSpec {
    /// Decode the signed-integer configuration encoding: a positive value
    /// `n` is a word n-gram, a negative value is a character q-gram whose
    /// size is the magnitude.
    ///
    /// # Examples
    ///
    /// ```
    /// use vectorizar::tokenize::TokenSpec;
    ///
    /// assert_eq!(TokenSpec::from_signed(2), TokenSpec::NGram(2));
    /// assert_eq!(TokenSpec::from_signed(-3), TokenSpec::QGram(3));
    /// ```
    #[must_use]
    pub fn from_signed(n: i32) -> Self {
        if n < 0 {
            TokenSpec::QGram(n.unsigned_abs() as usize)
        } else {
            TokenSpec::NGram(n as usize)
        }
    }

    /// Smallest number of words (or characters, for q-grams) a document
    /// needs before this spec emits any token.
    #[must_use]
    pub fn window(&self) -> usize {
        match *self {
            TokenSpec::NGram(n) | TokenSpec::QGram(n) => n,
            TokenSpec::SkipGram { size, skip } => {
                if size == 0 {
                    0
                } else {
                    (size - 1) * (skip + 1) + 1
                }
            }
        }
    }
}

/// Compute one token list per spec, in spec order.
///
/// The input is assumed to be normalized already; words are its
/// whitespace-delimited fields. An empty input yields an empty list for
/// every spec.
///
/// # Examples
///
/// ```
/// use vectorizar::tokenize::{compute_token_groups, TokenSpec};
///
/// let groups = compute_token_groups(
///     "buenos dias",
///     &[TokenSpec::NGram(1), TokenSpec::NGram(2), TokenSpec::QGram(3)],
/// );
/// assert_eq!(groups[0], vec!["buenos", "dias"]);
/// assert_eq!(groups[1], vec!["buenos~dias"]);
/// assert_eq!(groups[2][0], "bue");
/// // q-grams cross the (stripped) word boundary
/// assert!(groups[2].contains(&"osd".to_string()));
/// ```
#[must_use]
pub fn compute_token_groups(normalized: &str, specs: &[TokenSpec]) -> Vec<Vec<String>> {
    let words: Vec<&str> = normalized.split_whitespace().collect();
    let chars: Vec<char> = normalized.chars().filter(|c| !c.is_whitespace()).collect();

    specs
        .iter()
        .map(|spec| match *spec {
            TokenSpec::NGram(n) => word_ngrams(&words, n),
            TokenSpec::QGram(q) => char_qgrams(&chars, q),
            TokenSpec::SkipGram { size, skip } => skip_grams(&words, size, skip),
        })
        .collect()
}

/// Normalize a raw document and produce its flat token sequence.
///
/// Equivalent to [`normalize`] followed by [`compute_token_groups`] over
/// `params.token_list`, with the per-spec lists concatenated in spec order.
/// The concatenation order is part of the observable contract.
///
/// # Examples
///
/// ```
/// use vectorizar::params::TextModelParams;
/// use vectorizar::tokenize::{tokenize, TokenSpec};
///
/// let params = TextModelParams::default().with_token_list(vec![TokenSpec::NGram(1)]);
/// assert_eq!(tokenize("Buenos dias", &params), vec!["buenos", "dias"]);
/// ```
#[must_use]
pub fn tokenize(text: &str, params: &TextModelParams) -> Vec<String> {
    let normalized = normalize(text, params);
    compute_token_groups(&normalized, &params.token_list)
        .into_iter()
        .flatten()
        .collect()
}

fn word_ngrams(words: &[&str], n: usize) -> Vec<String> {
    match n {
        0 => Vec::new(),
        1 => words.iter().map(ToString::to_string).collect(),
        _ => words.windows(n).map(|w| w.join(SEPARATOR)).collect(),
    }
}

fn skip_grams(words: &[&str], size: usize, skip: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    if skip == 0 {
        return word_ngrams(words, size);
    }
    let stride = skip + 1;
    let span = (size - 1) * stride;
    (0..words.len().saturating_sub(span))
        .map(|i| {
            (0..size)
                .map(|j| words[i + j * stride])
                .collect::<Vec<_>>()
                .join(SEPARATOR)
        })
        .collect()
}

fn char_qgrams(chars: &[char], q: usize) -> Vec<String> {
    if q == 0 {
        return Vec::new();
    }
    chars.windows(q).map(|w| w.iter().collect()).collect()
}
