//! Text normalization.
//!
//! [`normalize`] turns a raw document into a canonical string in which
//! recognized entities (URLs, user mentions, numbers, emoticons) are
//! deleted or replaced by placeholder tokens, according to the
//! [`EntityPolicy`] switches in [`TextModelParams`].
//!
//! Transformations apply in a fixed order:
//!
//! 1. case folding,
//! 2. URLs,
//! 3. `@name` mentions,
//! 4. numbers,
//! 5. emoticons,
//! 6. diacritic removal,
//! 7. duplicate-character collapsing,
//! 8. whitespace canonicalization (runs collapse to one space, ends trimmed).
//!
//! Folding precedes substitution so placeholders are never case-mangled,
//! and entity extraction precedes duplicate collapsing so collapsing never
//! fires inside a URL.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::params::{EntityPolicy, TextModelParams};

/// Placeholder for a grouped user mention.
pub const USER_TAG: &str = "_usr";
/// Placeholder for a grouped URL.
pub const URL_TAG: &str = "_url";
/// Placeholder for a grouped number.
pub const NUMBER_TAG: &str = "_num";
/// Placeholder for a positive emoticon.
pub const POSITIVE_TAG: &str = "_pos";
/// Placeholder for a negative emoticon.
pub const NEGATIVE_TAG: &str = "_neg";

// `http(s)://...` or `www....` runs up to the next whitespace. Matched
// case-insensitively so recognition does not depend on the `lowercase`
// switch.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://|www\.)\S+").expect("url pattern is valid")
});

// `@` followed by word characters.
static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\w+").expect("mention pattern is valid"));

// Optionally signed decimals; thousands separators are not recognized.
static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").expect("number pattern is valid"));

// Fixed emoticon table, keyed by the lowercased glyph. Emoticons are
// recognized as standalone whitespace-delimited words, which keeps glyph
// fragments inside ordinary words (the `xc` in "excelente") untouched.
static EMOTICON_CLASS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let positive = [
        ":)", ":-)", ":d", ":-d", ":p", ":-p", ";)", ";-)", "=)", "=d", "xd", "x)", "^^",
    ];
    let negative = [":(", ":-(", ":'(", "=(", ":c", "xc", ":s", ":-s"];

    let mut map = HashMap::new();
    for emo in positive {
        map.insert(emo, POSITIVE_TAG);
    }
    for emo in negative {
        map.insert(emo, NEGATIVE_TAG);
    }
    map
});

/// Apply the configured transformations to `text`.
///
/// Pure given its input and configuration; the result is suitable for
/// [`crate::tokenize::compute_token_groups`].
///
/// # Examples
///
/// ```
/// use vectorizar::params::{EntityPolicy, TextModelParams};
/// use vectorizar::normalize::normalize;
///
/// let params = TextModelParams::default().with_emoticons(EntityPolicy::Group);
/// assert_eq!(normalize("Hi :) :P XD", &params), "hi _pos _pos _pos");
/// ```
#[must_use]
pub fn normalize(text: &str, params: &TextModelParams) -> String {
    let mut text = if params.lowercase {
        text.to_lowercase()
    } else {
        text.to_string()
    };

    text = apply_policy(&text, &URL_RE, params.url_option, URL_TAG);
    text = apply_policy(&text, &MENTION_RE, params.usr_option, USER_TAG);
    text = apply_policy(&text, &NUMBER_RE, params.num_option, NUMBER_TAG);
    text = apply_emoticons(&text, params.emo_option);

    if params.del_diac {
        text = remove_diacritics(&text);
    }
    if params.del_dup {
        text = collapse_duplicates(&text);
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn apply_policy(text: &str, pattern: &Regex, policy: EntityPolicy, tag: &str) -> String {
    match policy {
        EntityPolicy::Off => text.to_string(),
        EntityPolicy::Delete => pattern.replace_all(text, " ").into_owned(),
        EntityPolicy::Group => {
            // Pad the placeholder so adjacent text stays word-separated;
            // whitespace is canonicalized at the end of `normalize`.
            let replacement = format!(" {tag} ");
            pattern
                .replace_all(text, regex::NoExpand(&replacement))
                .into_owned()
        }
    }
}

fn apply_emoticons(text: &str, policy: EntityPolicy) -> String {
    if policy == EntityPolicy::Off {
        return text.to_string();
    }
    text.split_whitespace()
        .filter_map(|word| {
            let lookup = word.to_lowercase();
            match EMOTICON_CLASS.get(lookup.as_str()) {
                Some(tag) => match policy {
                    EntityPolicy::Delete => None,
                    _ => Some((*tag).to_string()),
                },
                None => Some(word.to_string()),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// NFD-decompose and drop combining marks, preserving base letters.
fn remove_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Collapse runs of 3 or more identical characters to exactly 2.
///
/// Single fixed policy: "holaaaa" becomes "holaa", runs of 2 are kept.
fn collapse_duplicates(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0usize;
    for c in text.chars() {
        if last == Some(c) {
            run += 1;
        } else {
            last = Some(c);
            run = 1;
        }
        if run <= 2 {
            out.push(c);
        }
    }
    out
}
