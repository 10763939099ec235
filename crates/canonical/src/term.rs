use std::fmt;

/// The normalized form of an ingredient or product name.
///
/// Tokens are lowercase, singular and stopword-free; `text` is the tokens
/// joined with single spaces. Terms are derived per call and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedTerm {
    text: String,
    tokens: Vec<String>,
}

impl NormalizedTerm {
    /// Build a term from already-normalized tokens.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let text = tokens.join(" ");
        Self { text, tokens }
    }

    /// The term as a single space-separated string.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// The dominant (first) token, if any.
    pub fn first_token(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl AsRef<str> for NormalizedTerm {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NormalizedTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(words: &[&str]) -> NormalizedTerm {
        NormalizedTerm::from_tokens(words.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn text_joins_tokens_with_single_spaces() {
        let t = term(&["green", "onion"]);
        assert_eq!(t.as_str(), "green onion");
        assert_eq!(t.first_token(), Some("green"));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn empty_term() {
        let t = NormalizedTerm::default();
        assert!(t.is_empty());
        assert_eq!(t.as_str(), "");
        assert_eq!(t.first_token(), None);
    }
}
