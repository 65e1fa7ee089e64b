use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuration passed to an evaluation and through Runnable compositions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Optional name recorded on the evaluation span.
    #[serde(default)]
    pub name: Option<String>,

    /// Recorded on the evaluation span as a `tags` field.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Unique identifier for this run.
    pub run_id: Uuid,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            name: None,
            tags: Vec::new(),
            run_id: Uuid::new_v4(),
        }
    }
}

impl EvalConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = run_id;
        self
    }
}
