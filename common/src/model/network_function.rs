use serde::{Deserialize, Serialize};

/// Version metadata tracked for a network function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    pub name: String,
    pub status: String,
    /// At most one version per network function is expected to carry `true`,
    /// but nothing enforces it atomically.
    #[serde(default)]
    pub latest: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFunction {
    pub nf_name: String,
    #[serde(default)]
    pub versions: Vec<VersionDescriptor>,
}
