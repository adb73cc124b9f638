use serde::{Deserialize, Serialize};

/// One building to generate: display name plus the style it should be filed under.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorklistEntry {
    pub name: String,
    pub style: String,
}

impl WorklistEntry {
    pub fn new(name: &str, style: &str) -> Self {
        WorklistEntry {
            name: name.to_string(),
            style: style.to_string(),
        }
    }
}

impl std::fmt::Display for WorklistEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.style)
    }
}
