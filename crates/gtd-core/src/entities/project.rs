use serde::{Deserialize, Serialize};

/// A project as returned by the task service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
}

impl Project {
    /// Find a project by exact name.
    #[must_use]
    pub fn find_by_name<'a>(projects: &'a [Self], name: &str) -> Option<&'a Self> {
        projects.iter().find(|project| project.name == name)
    }

    /// Find a project by id.
    #[must_use]
    pub fn find_by_id<'a>(projects: &'a [Self], id: &str) -> Option<&'a Self> {
        projects.iter().find(|project| project.id == id)
    }
}
