use cohort_core::model::{Attribute, Constraint, Element};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk input for `cohort generate`: the live attribute/element set and
/// the constraint list, as exported by the editing layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    pub name: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub elements: Vec<Element>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl ProjectFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        serde_json::from_str(&raw).map_err(|e| format!("cannot parse '{}': {}", path.display(), e))
    }
}
