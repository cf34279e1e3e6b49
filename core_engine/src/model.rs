use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One suggestion returned by the remote service. Identity is `name`; any
/// other fields are kept verbatim for the presentation side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: Map::new(),
        }
    }
}

/// Read-only snapshot handed to whatever renders the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub text: String,
    pub busy: bool,
    pub candidates: Vec<Candidate>,
    #[serde(with = "highlight_index")]
    pub highlight: Option<usize>,
}

// The wire keeps the `-1 == nothing highlighted` convention.
mod highlight_index {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(index) => serializer.serialize_i64(*index as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}
