use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

static KEBAB_CASE_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$")
        .expect("KEBAB_CASE_REGEX is a valid regex pattern")
});

/// One quiz entry. Only `id` and `name` are required; hand-authored and generated
/// records may leave out any other field, and a rewrite keeps absent fields absent.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize, Validate)]
pub struct BuildingRecord {
    #[validate(regex(
        path = *KEBAB_CASE_REGEX,
        message = "Identifier must be lowercase kebab-case"
    ))]
    pub id: String, // Image filename stem, unique within the dataset
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub image_url: Option<String>, // Convention: /images/{id}.jpg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, length(equal = 3))]
    pub style_distractors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub era: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub style_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub engineering_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub engineering_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, length(equal = 3))]
    pub engineering_distractors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub engineering_explanation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required, length(min = 1))]
    pub fun_facts: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(required)]
    pub difficulty: Option<Difficulty>,
    // Hand-authored keys we don't model, kept as-is on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Difficulty label. Labels outside the known three are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Difficulty {
    Beginner,     // Famous buildings
    Intermediate, // Moderately known
    Advanced,     // Specialist knowledge
    Unrecognized(String),
}

impl Difficulty {
    pub fn label(&self) -> &str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
            Difficulty::Unrecognized(label) => label,
        }
    }
}

impl From<String> for Difficulty {
    fn from(label: String) -> Self {
        match label.as_str() {
            "beginner" => Difficulty::Beginner,
            "intermediate" => Difficulty::Intermediate,
            "advanced" => Difficulty::Advanced,
            _ => Difficulty::Unrecognized(label),
        }
    }
}

impl From<Difficulty> for String {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Unrecognized(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl BuildingRecord {
    /// A record carrying only the two required keys.
    pub fn minimal(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_url: None,
            style: None,
            style_distractors: None,
            era: None,
            style_explanation: None,
            engineering_question: None,
            engineering_answer: None,
            engineering_distractors: None,
            engineering_explanation: None,
            fun_facts: None,
            difficulty: None,
            extra: Map::new(),
        }
    }

    /// Public path the app serves this building's photo from.
    pub fn image_url_for(id: &str) -> String {
        format!("/images/{}.jpg", id)
    }

    /// Name of the downloaded photo inside the image output directory.
    /// Always `.jpg`, whatever format the remote file actually is.
    pub fn image_file_name(&self) -> String {
        format!("{}.jpg", self.id)
    }

    /// Field-level problems as a single message, or `None` when the record is clean.
    pub fn validation_warnings(&self) -> Option<String> {
        let mut problems = Vec::new();
        if let Err(e) = self.validate() {
            problems.push(e.to_string());
        }
        if let Some(Difficulty::Unrecognized(label)) = &self.difficulty {
            problems.push(format!("difficulty: unknown label \"{}\"", label));
        }

        if problems.is_empty() {
            None
        } else {
            Some(problems.join("\n"))
        }
    }
}
