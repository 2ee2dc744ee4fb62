//! Request parameters and wire-format normalization.

/// Flat key/value pairs ready to serialize as a query string or form body.
pub type WireParams = Vec<(String, String)>;

/// A parameter value in its pre-normalization form.
///
/// The closed set of shapes a caller can supply: a scalar that passes
/// through to the wire, an ordered list that is pipe-joined, or an
/// explicit omission (the boolean `false` of the wire protocol).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Scalar(String),
    List(Vec<String>),
    Omit,
}

impl ParamValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        ParamValue::Scalar(value.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ParamValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<u64> for ParamValue {
    fn from(n: u64) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

impl From<usize> for ParamValue {
    fn from(n: usize) -> Self {
        ParamValue::Scalar(n.to_string())
    }
}

/// `false` means "omit this parameter"; `true` stringifies like any scalar.
impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        if b {
            ParamValue::Scalar("true".to_string())
        } else {
            ParamValue::Omit
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for ParamValue {
    fn from(items: Vec<S>) -> Self {
        ParamValue::list(items)
    }
}

impl<S: Into<String> + Clone> From<&[S]> for ParamValue {
    fn from(items: &[S]) -> Self {
        ParamValue::list(items.iter().cloned())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for ParamValue {
    fn from(items: [S; N]) -> Self {
        ParamValue::list(items)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => ParamValue::Omit,
        }
    }
}

/// Insertion-ordered parameter mapping.
///
/// Later writes to an existing key replace its value in place, so the
/// mapping behaves like a map while keeping a stable wire order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`Params::set`].
    pub fn add(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert a parameter, replacing any existing value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Normalize into wire-ready pairs.
    ///
    /// Omitted values are dropped, lists are pipe-joined, and a
    /// `format=json` pair is appended when the caller supplied no
    /// `format` key of their own. An explicitly omitted `format`
    /// suppresses the default: the key counts as supplied.
    pub fn normalize(&self) -> WireParams {
        let mut wire: WireParams = Vec::with_capacity(self.entries.len() + 1);
        for (key, value) in &self.entries {
            match value {
                ParamValue::Scalar(s) => wire.push((key.clone(), s.clone())),
                ParamValue::List(items) => wire.push((key.clone(), items.join("|"))),
                ParamValue::Omit => {}
            }
        }
        if !self.contains("format") {
            wire.push(("format".to_string(), "json".to_string()));
        }
        wire
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_format_to_json() {
        let wire = Params::new().add("action", "query").normalize();
        assert_eq!(
            wire,
            vec![
                ("action".to_string(), "query".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn normalize_joins_lists_with_pipes() {
        let wire = Params::new()
            .add("action", "query")
            .add("list", ["a", "b"])
            .normalize();
        assert_eq!(
            wire,
            vec![
                ("action".to_string(), "query".to_string()),
                ("list".to_string(), "a|b".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn normalize_drops_omitted_values() {
        let wire = Params::new().add("x", false).add("y", 1i64).normalize();
        assert_eq!(
            wire,
            vec![
                ("y".to_string(), "1".to_string()),
                ("format".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn caller_format_override_wins() {
        let wire = Params::new()
            .add("action", "query")
            .add("format", "xml")
            .normalize();
        let formats: Vec<_> = wire.iter().filter(|(k, _)| k == "format").collect();
        assert_eq!(formats.len(), 1);
        assert_eq!(formats[0].1, "xml");
    }

    #[test]
    fn omitted_format_suppresses_default() {
        let wire = Params::new()
            .add("action", "query")
            .add("format", false)
            .normalize();
        assert!(!wire.iter().any(|(k, _)| k == "format"));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut params = Params::new().add("a", "1").add("b", "2");
        params.set("a", "3");
        let wire = params.normalize();
        assert_eq!(wire[0], ("a".to_string(), "3".to_string()));
        assert_eq!(wire[1], ("b".to_string(), "2".to_string()));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn scalar_conversions() {
        assert_eq!(ParamValue::from(7i64), ParamValue::Scalar("7".into()));
        assert_eq!(ParamValue::from(7u32), ParamValue::Scalar("7".into()));
        assert_eq!(ParamValue::from(true), ParamValue::Scalar("true".into()));
        assert_eq!(ParamValue::from(false), ParamValue::Omit);
        assert_eq!(
            ParamValue::from("title"),
            ParamValue::Scalar("title".into())
        );
    }

    #[test]
    fn option_conversions() {
        assert_eq!(ParamValue::from(None::<&str>), ParamValue::Omit);
        assert_eq!(
            ParamValue::from(Some("x")),
            ParamValue::Scalar("x".into())
        );
    }

    #[test]
    fn list_helper_accepts_mixed_sources() {
        let owned: Vec<String> = vec!["a".into(), "b".into()];
        assert_eq!(
            ParamValue::from(owned),
            ParamValue::List(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            ParamValue::list(["x"]),
            ParamValue::List(vec!["x".into()])
        );
    }

    #[test]
    fn empty_list_serializes_empty() {
        let wire = Params::new()
            .add("titles", ParamValue::list(Vec::<String>::new()))
            .normalize();
        assert_eq!(wire[0], ("titles".to_string(), String::new()));
    }

    #[test]
    fn get_and_contains() {
        let params = Params::new().add("action", "query");
        assert!(params.contains("action"));
        assert!(!params.contains("list"));
        assert_eq!(params.get("action"), Some(&ParamValue::Scalar("query".into())));
        assert!(params.get("list").is_none());
    }
}
