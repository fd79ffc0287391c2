//! Classification of raw tokens into positional and keyword tokens.

use serde_json::Value;

/// Keyword name that requests help instead of execution.
pub const HELP: &str = "help";
/// Keyword name that skips the confirmation prompt.
pub const FORCE: &str = "force";

/// Keyword tokens in first-insertion order.
///
/// Re-assigning a key overwrites the value in place, so the key keeps the
/// position of its first occurrence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeywordTokens {
    entries: Vec<(String, Value)>,
}

impl KeywordTokens {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a key.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Value for `name`, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let idx = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no keyword tokens were given.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Tokens split into positional and keyword parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenSet {
    positional: Vec<String>,
    keyword: KeywordTokens,
}

impl TokenSet {
    /// Positional tokens in input order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Keyword tokens in first-insertion order.
    pub fn keyword(&self) -> &KeywordTokens {
        &self.keyword
    }

    /// Whether `--help` (or `-h`) was given with a truthy value.
    pub fn help_requested(&self) -> bool {
        self.keyword.get(HELP).map(is_truthy).unwrap_or(false)
    }

    /// Remove the `force` keyword, reporting whether it was truthy.
    pub fn take_force(&mut self) -> bool {
        self.keyword
            .remove(FORCE)
            .map(|value| is_truthy(&value))
            .unwrap_or(false)
    }
}

/// Split raw tokens into positional and keyword tokens.
///
/// * `--name=value` splits at the first `=`; `true`/`false` become booleans.
/// * `--no-name` sets `name` to `false`.
/// * `--name` sets `name` to `true`.
/// * `-h` and `-f` stand for `--help` and `--force`.
/// * anything else is positional.
pub fn classify<S: AsRef<str>>(tokens: &[S]) -> TokenSet {
    let mut set = TokenSet::default();

    for token in tokens {
        let token = token.as_ref();
        match token {
            "-h" => set.keyword.insert(HELP, Value::Bool(true)),
            "-f" => set.keyword.insert(FORCE, Value::Bool(true)),
            _ => match token.strip_prefix("--") {
                Some(body) => {
                    let (name, value) = keyword_entry(body);
                    set.keyword.insert(name, value);
                }
                None => set.positional.push(token.to_string()),
            },
        }
    }

    set
}

fn keyword_entry(body: &str) -> (&str, Value) {
    if let Some((name, raw)) = body.split_once('=') {
        let value = if raw.eq_ignore_ascii_case("true") {
            Value::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Value::Bool(false)
        } else {
            Value::String(raw.to_string())
        };
        return (name, value);
    }
    match body.strip_prefix("no-") {
        Some(name) => (name, Value::Bool(false)),
        None => (body, Value::Bool(true)),
    }
}

/// Truthiness of a token value: empty strings, zero and `false` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_classify_mixed_tokens() {
        let set = classify(&["a", "--x=1", "b", "--no-y", "--z"]);
        assert_eq!(set.positional(), &["a".to_string(), "b".to_string()]);
        assert_eq!(
            set.keyword().entries(),
            &[
                ("x".to_string(), json!("1")),
                ("y".to_string(), json!(false)),
                ("z".to_string(), json!(true)),
            ]
        );
    }

    #[test]
    fn test_boolean_literals_are_case_insensitive() {
        let set = classify(&["--a=TRUE", "--b=False", "--c=yes"]);
        assert_eq!(set.keyword().get("a"), Some(&json!(true)));
        assert_eq!(set.keyword().get("b"), Some(&json!(false)));
        assert_eq!(set.keyword().get("c"), Some(&json!("yes")));
    }

    #[test]
    fn test_value_splits_at_first_equals() {
        let set = classify(&["--expr=a=b"]);
        assert_eq!(set.keyword().get("expr"), Some(&json!("a=b")));
    }

    #[test]
    fn test_last_write_wins_keeps_first_position() {
        let set = classify(&["--x=1", "--y", "--x=2"]);
        assert_eq!(
            set.keyword().entries(),
            &[("x".to_string(), json!("2")), ("y".to_string(), json!(true))]
        );
    }

    #[test]
    fn test_short_aliases() {
        let mut set = classify(&["-h", "-f", "-x"]);
        assert!(set.help_requested());
        assert!(set.take_force());
        assert!(!set.take_force());
        assert_eq!(set.positional(), &["-x".to_string()]);
    }

    #[test]
    fn test_help_needs_truthy_value() {
        assert!(!classify(&["--help=false"]).help_requested());
        assert!(!classify(&["--help="]).help_requested());
        assert!(classify(&["--help=please"]).help_requested());
        assert!(!classify(&["--no-help"]).help_requested());
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(is_truthy(&json!(2)));
        assert!(!is_truthy(&json!([])));
    }
}
