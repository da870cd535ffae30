//! Raw, unvalidated option values as collected from a command line

use std::collections::BTreeMap;

/// One raw option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Bare flag with no value token
    Flag,
    /// Single value token
    Value(String),
    /// Repeated value tokens, in the order given
    List(Vec<String>),
}

impl RawValue {
    /// Empty lists count as "not provided"
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::List(items) if items.is_empty())
    }

    /// Value tokens; a bare flag reads as the single token `true`
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::Flag => vec!["true"],
            Self::Value(v) => vec![v.as_str()],
            Self::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// Token used for scalar options (the last one given wins)
    pub fn last_token(&self) -> Option<&str> {
        self.tokens().last().copied()
    }
}

/// Raw input keyed by option key
///
/// Presence of a key is the only signal that a value was supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    values: BTreeMap<String, RawValue>,
}

impl RawInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_flag(mut self, key: impl Into<String>) -> Self {
        self.insert(key, RawValue::Flag);
        self
    }

    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, RawValue::Value(value.into()));
        self
    }

    pub fn with_list<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, RawValue::List(values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RawValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&RawValue> {
        self.values.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_tokens() {
        assert_eq!(RawValue::Flag.tokens(), vec!["true"]);
        assert_eq!(RawValue::Value("a".into()).tokens(), vec!["a"]);
        assert_eq!(
            RawValue::List(vec!["a".into(), "b".into()]).tokens(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_raw_value_last_token() {
        assert_eq!(RawValue::List(vec!["1".into(), "2".into()]).last_token(), Some("2"));
        assert_eq!(RawValue::List(vec![]).last_token(), None);
    }

    #[test]
    fn test_raw_value_is_empty() {
        assert!(RawValue::List(vec![]).is_empty());
        assert!(!RawValue::Value(String::new()).is_empty());
        assert!(!RawValue::Flag.is_empty());
    }

    #[test]
    fn test_raw_input_builder() {
        let input = RawInput::new()
            .with_value("uid", "42")
            .with_flag("fullPage")
            .with_list("types", ["log", "error"]);

        assert_eq!(input.len(), 3);
        assert_eq!(input.get("uid"), Some(&RawValue::Value("42".into())));
        assert_eq!(input.get("fullPage"), Some(&RawValue::Flag));
        assert!(input.get("missing").is_none());
        assert_eq!(input.keys().collect::<Vec<_>>(), vec!["fullPage", "types", "uid"]);
    }

    #[test]
    fn test_raw_input_later_insert_wins() {
        let input = RawInput::new().with_value("uid", "1").with_value("uid", "2");
        assert_eq!(input.len(), 1);
        assert_eq!(input.get("uid"), Some(&RawValue::Value("2".into())));
    }
}
