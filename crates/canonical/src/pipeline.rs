use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::NormalizerConfig;
use crate::lexicon::{is_stopword, singularize};
use crate::term::NormalizedTerm;

/// Normalize a raw ingredient or product name with the default configuration.
pub fn normalize(raw: &str) -> NormalizedTerm {
    normalize_with(raw, &NormalizerConfig::default())
}

/// Main entry point. Takes a raw name and a config and returns its normalized
/// term.
///
/// Steps run in a fixed order: trim, Unicode normalization, lowercase,
/// punctuation stripping (internal hyphens survive), whitespace split,
/// stopword removal, singularization. The function is total: empty or
/// whitespace-only input yields an empty term.
pub fn normalize_with(raw: &str, cfg: &NormalizerConfig) -> NormalizedTerm {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return NormalizedTerm::default();
    }

    // Unicode normalization goes first since it can change character boundaries.
    let unicode: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(trimmed.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(trimmed)
    };

    let lowered = lowercase(unicode.as_ref());
    let stripped = strip_punctuation(&lowered);

    let tokens: Vec<String> = stripped
        .split_whitespace()
        .filter(|token| keep_token(token, cfg))
        .map(singularize)
        .collect();

    NormalizedTerm::from_tokens(tokens)
}

/// Lowercase per grapheme cluster; a single character may expand (e.g. "İ").
fn lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for grapheme in text.graphemes(true) {
        out.push_str(&grapheme.to_lowercase());
    }
    out
}

/// Replace punctuation with spaces. Apostrophes are dropped without splitting
/// and a hyphen survives only between two alphanumeric characters.
fn strip_punctuation(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if is_apostrophe(ch) {
            continue;
        } else if ch == '-' && is_internal(&chars, idx) {
            out.push('-');
        } else {
            out.push(' ');
        }
    }

    out
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '`')
}

fn is_internal(chars: &[char], idx: usize) -> bool {
    idx > 0
        && chars[idx - 1].is_alphanumeric()
        && chars.get(idx + 1).is_some_and(|next| next.is_alphanumeric())
}

fn keep_token(token: &str, cfg: &NormalizerConfig) -> bool {
    if cfg.drop_numeric_tokens && token.chars().all(|c| c.is_numeric() || c == '-') {
        return false;
    }
    // Checking the singular form too keeps "cups" and "cup" consistent, which
    // normalization idempotence depends on.
    !is_stopword(token) && !is_stopword(&singularize(token))
}
