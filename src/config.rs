//! Student identity and subject layout for the results sheet.
//!
//! Stored as a JSON object on disk:
//! ```json
//! {
//!   "student": {
//!     "name": "Kyalo Josephine Kathini",
//!     "registration": "C026-01-0935/2022",
//!     "semester": "2.2"
//!   },
//!   "subjects": [
//!     { "name": "Database" },
//!     { "code": "CS102", "name": "Systems" }
//!   ]
//! }
//! ```
//! Subjects are matched to entered units by position. An optional `code`
//! only produces a warning when the entered code differs.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub registration: String,
    pub semester: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub name: String,
}

impl Subject {
    pub fn new(name: &str) -> Self {
        Self {
            code: None,
            name: name.to_string(),
        }
    }

    pub fn with_code(mut self, code: &str) -> Self {
        self.code = Some(code.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    pub student: Student,
    pub subjects: Vec<Subject>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            student: Student {
                name: "Kyalo Josephine Kathini".to_string(),
                registration: "C026-01-0935/2022".to_string(),
                semester: "2.2".to_string(),
            },
            subjects: ["Database", "Systems", "Algorithm", "Statistics"]
                .into_iter()
                .map(Subject::new)
                .collect(),
        }
    }
}

impl ReportConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid config '{}'", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: ReportConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Uses `path` when given, otherwise the built-in identity and subjects.
    pub fn load_or_default(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.subjects.is_empty() {
            bail!("at least one subject must be configured");
        }
        Ok(())
    }
}
