use serde::{Deserialize, Serialize};

/// Singleton content of the "about" page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutData {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl AboutData {
    pub fn is_empty(&self) -> bool {
        self.description.is_empty() && self.mission.is_empty() && self.gallery.is_empty()
    }
}
