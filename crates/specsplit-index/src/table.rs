use std::collections::HashMap;

/// Decoded contents of one kind's index file.
///
/// Tokens are kept sorted so listings and batch reads are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenTable {
    paths: HashMap<String, String>,
    tokens: Vec<String>,
}

impl TokenTable {
    pub fn new(paths: HashMap<String, String>) -> Self {
        let mut tokens: Vec<String> = paths.keys().cloned().collect();
        tokens.sort_unstable();
        Self { paths, tokens }
    }

    /// Relative path (without extension) of the entity file for `token`.
    pub fn path(&self, token: &str) -> Option<&str> {
        self.paths.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.paths.contains_key(token)
    }

    /// All tokens in ascending order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// `(token, path)` pairs in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.tokens
            .iter()
            .filter_map(|t| self.paths.get(t).map(|p| (t.as_str(), p.as_str())))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<(String, String)> for TokenTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_sorted() {
        let table: TokenTable = [
            ("p:m:Zeta".to_string(), "m/types/zeta-1".to_string()),
            ("p:m:Alpha".to_string(), "m/types/alpha-2".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.tokens(), ["p:m:Alpha", "p:m:Zeta"]);
        assert_eq!(table.path("p:m:Zeta"), Some("m/types/zeta-1"));
        assert_eq!(table.path("p:m:Missing"), None);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs[0], ("p:m:Alpha", "m/types/alpha-2"));
    }

    #[test]
    fn empty_table() {
        let table = TokenTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(!table.contains("x"));
    }
}
