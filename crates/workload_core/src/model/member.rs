use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub points: u64,
}

impl Member {
    /// Name for display, falling back to the id when no name was recorded.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

fn default_level() -> u32 {
    1
}
