//! Model configuration.
//!
//! All normalization switches, the token-generation list, the vocabulary
//! filters and the weighting scheme live in a single [`TextModelParams`]
//! value that is validated once at model construction, not per call.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VectorizarError};
use crate::tokenize::TokenSpec;
use crate::vocabulary::TokenFilter;
use crate::weighting::WeightingScheme;

/// What to do with a recognized entity class (URLs, mentions, numbers,
/// emoticons) during normalization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityPolicy {
    /// Leave matches untouched.
    #[default]
    Off,
    /// Remove matches from the text.
    Delete,
    /// Replace matches with the class placeholder token
    /// (`_usr`, `_url`, `_num`, `_pos`/`_neg`).
    Group,
}

/// Configuration for a [`crate::textmodel::TextModel`].
///
/// Defaults follow the short-text (social media) setup: case folding,
/// diacritic removal and duplicate collapsing on; mentions and URLs grouped
/// into placeholders; numbers and emoticons untouched; word unigrams;
/// no vocabulary filtering; TF-IDF weighting.
///
/// # Examples
///
/// ```
/// use vectorizar::params::{EntityPolicy, TextModelParams};
/// use vectorizar::tokenize::TokenSpec;
///
/// let params = TextModelParams::default()
///     .with_emoticons(EntityPolicy::Group)
///     .with_token_list(vec![TokenSpec::NGram(1), TokenSpec::QGram(3)]);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextModelParams {
    /// Fold case before any other transformation.
    pub lowercase: bool,
    /// Strip diacritic marks, preserving base letters.
    pub del_diac: bool,
    /// Collapse runs of 3+ identical characters to exactly 2.
    pub del_dup: bool,
    /// `@name` user mentions.
    pub usr_option: EntityPolicy,
    /// URL substrings.
    pub url_option: EntityPolicy,
    /// Numeric tokens.
    pub num_option: EntityPolicy,
    /// Emoticon glyph sequences.
    pub emo_option: EntityPolicy,
    /// Ordered token-generation schemes; output concatenation follows this
    /// order exactly.
    pub token_list: Vec<TokenSpec>,
    /// Keep tokens whose document frequency is strictly greater than this
    /// threshold.
    pub token_min_filter: TokenFilter,
    /// Keep tokens whose document frequency is strictly less than this
    /// threshold; `Count(1)` disables upper filtering.
    pub token_max_filter: TokenFilter,
    /// Weighting scheme used when fitting.
    pub weighting: WeightingScheme,
}

impl Default for TextModelParams {
    fn default() -> Self {
        Self {
            lowercase: true,
            del_diac: true,
            del_dup: true,
            usr_option: EntityPolicy::Group,
            url_option: EntityPolicy::Group,
            num_option: EntityPolicy::Off,
            emo_option: EntityPolicy::Off,
            token_list: vec![TokenSpec::NGram(1)],
            token_min_filter: TokenFilter::Count(0),
            token_max_filter: TokenFilter::Count(1),
            weighting: WeightingScheme::TfIdf,
        }
    }
}

impl TextModelParams {
    /// Set case folding.
    #[must_use]
    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Set diacritic removal.
    #[must_use]
    pub fn with_del_diac(mut self, del_diac: bool) -> Self {
        self.del_diac = del_diac;
        self
    }

    /// Set duplicate-character collapsing.
    #[must_use]
    pub fn with_del_dup(mut self, del_dup: bool) -> Self {
        self.del_dup = del_dup;
        self
    }

    /// Set the policy for `@name` mentions.
    #[must_use]
    pub fn with_mentions(mut self, policy: EntityPolicy) -> Self {
        self.usr_option = policy;
        self
    }

    /// Set the policy for URLs.
    #[must_use]
    pub fn with_urls(mut self, policy: EntityPolicy) -> Self {
        self.url_option = policy;
        self
    }

    /// Set the policy for numeric tokens.
    #[must_use]
    pub fn with_numbers(mut self, policy: EntityPolicy) -> Self {
        self.num_option = policy;
        self
    }

    /// Set the policy for emoticons.
    #[must_use]
    pub fn with_emoticons(mut self, policy: EntityPolicy) -> Self {
        self.emo_option = policy;
        self
    }

    /// Set the ordered token-generation list.
    #[must_use]
    pub fn with_token_list(mut self, token_list: Vec<TokenSpec>) -> Self {
        self.token_list = token_list;
        self
    }

    /// Set the minimum document-frequency filter.
    #[must_use]
    pub fn with_min_filter(mut self, filter: TokenFilter) -> Self {
        self.token_min_filter = filter;
        self
    }

    /// Set the maximum document-frequency filter.
    #[must_use]
    pub fn with_max_filter(mut self, filter: TokenFilter) -> Self {
        self.token_max_filter = filter;
        self
    }

    /// Set the weighting scheme.
    #[must_use]
    pub fn with_weighting(mut self, weighting: WeightingScheme) -> Self {
        self.weighting = weighting;
        self
    }

    /// Validate the configuration.
    ///
    /// Rejects empty token lists, zero-sized grams and out-of-range
    /// fraction filters. Called once by
    /// [`crate::textmodel::TextModel::new`].
    pub fn validate(&self) -> Result<()> {
        if self.token_list.is_empty() {
            return Err(VectorizarError::invalid_parameter(
                "token_list",
                "[]",
                "at least one token spec",
            ));
        }
        for spec in &self.token_list {
            let bad = match *spec {
                TokenSpec::NGram(n) | TokenSpec::QGram(n) => n == 0,
                TokenSpec::SkipGram { size, .. } => size == 0,
            };
            if bad {
                return Err(VectorizarError::invalid_parameter(
                    "token_list",
                    format!("{spec:?}"),
                    "gram size >= 1",
                ));
            }
        }
        self.token_min_filter.validate("token_min_filter")?;
        self.token_max_filter.validate("token_max_filter")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(TextModelParams::default().validate().is_ok());
    }

    #[test]
    fn test_empty_token_list_rejected() {
        let params = TextModelParams::default().with_token_list(vec![]);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_zero_gram_rejected() {
        for spec in [
            TokenSpec::NGram(0),
            TokenSpec::QGram(0),
            TokenSpec::SkipGram { size: 0, skip: 1 },
        ] {
            let params = TextModelParams::default().with_token_list(vec![spec]);
            assert!(params.validate().is_err(), "{spec:?} should be rejected");
        }
    }

    #[test]
    fn test_fraction_filter_out_of_range_rejected() {
        let params = TextModelParams::default().with_min_filter(TokenFilter::Fraction(1.5));
        assert!(params.validate().is_err());

        let params = TextModelParams::default().with_max_filter(TokenFilter::Fraction(0.0));
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_builder_chains() {
        let params = TextModelParams::default()
            .with_lowercase(false)
            .with_numbers(EntityPolicy::Delete)
            .with_weighting(WeightingScheme::Tf);
        assert!(!params.lowercase);
        assert_eq!(params.num_option, EntityPolicy::Delete);
        assert_eq!(params.weighting, WeightingScheme::Tf);
        assert!(params.validate().is_ok());
    }
}
