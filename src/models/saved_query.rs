use serde::{Deserialize, Serialize};

/// The current on-disk catalog format.
pub const CATALOG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    #[serde(default = "fresh_id")]
    pub id: String,
    #[serde(default = "fallback_name")]
    pub name: String,
    #[serde(default)]
    pub sql: String,
}

/// On-disk wrapper around the saved-query list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFile {
    #[serde(default = "catalog_version")]
    pub version: u32,
    #[serde(default)]
    pub queries: Vec<SavedQuery>,
}

fn fresh_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn fallback_name() -> String {
    "Consulta".to_string()
}

fn catalog_version() -> u32 {
    CATALOG_VERSION
}
