//! Submitted form fields and the intent discriminator.

use serde_json::{Map, Value};

/// Name of the field that selects which update a submission performs.
pub const INTENT_FIELD: &str = "intent";

/// Raw `(name, value)` pairs in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    /// Value submitted under `name`. Repeated names resolve to the last
    /// value, the same one `to_json` keeps.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields as a JSON object of strings. Repeated names keep the last value.
    pub fn to_json(&self) -> Map<String, Value> {
        let mut object = Map::new();
        for (key, value) in &self.fields {
            object.insert(key.clone(), Value::String(value.clone()));
        }
        object
    }

    pub fn intent(&self) -> Option<Intent> {
        self.get(INTENT_FIELD).and_then(Intent::parse)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// HTML checkbox semantics: checked boxes submit `on` (or an explicit
/// `true`), unchecked boxes submit nothing.
pub fn checkbox_checked(value: Option<&str>) -> bool {
    matches!(value, Some("on" | "true"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Todo,
    Comment,
}

impl Intent {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "todo" => Some(Intent::Todo),
            "comment" => Some(Intent::Comment),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Todo => "todo",
            Intent::Comment => "comment",
        }
    }
}
