use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{CatalogFile, SavedQuery, CATALOG_VERSION};

/// The saved-query catalog: an in-memory list mirrored to a JSON file.
///
/// Memory is the source of truth. The file is rewritten in full after every
/// mutation; load and save failures are logged and swallowed, leaving the
/// session in-memory only.
pub struct QueryCatalog {
    entries: Vec<SavedQuery>,
    path: PathBuf,
}

impl QueryCatalog {
    /// Opens the catalog at `path`, loading any existing snapshot. A
    /// missing or unreadable file starts the catalog empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        QueryCatalog { entries, path }
    }

    /// The per-user catalog location under the platform data directory.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mirador")
            .join("queries.json")
    }

    /// Adds a saved query with a fresh id and persists. A blank name falls
    /// back to "Consulta".
    pub fn add(&mut self, name: &str, sql: &str) -> SavedQuery {
        let entry = SavedQuery {
            id: uuid::Uuid::new_v4().to_string(),
            name: display_name(name),
            sql: sql.to_string(),
        };
        self.entries.push(entry.clone());
        self.persist();
        entry
    }

    /// Replaces name and sql of an existing entry and persists. Unknown ids
    /// are a no-op.
    pub fn update(&mut self, id: &str, name: &str, sql: &str) {
        let idx = match self.position(id) {
            Some(idx) => idx,
            None => return,
        };
        self.entries[idx].name = display_name(name);
        self.entries[idx].sql = sql.to_string();
        self.persist();
    }

    /// Removes an entry and persists. Unknown ids are a no-op.
    pub fn delete(&mut self, id: &str) {
        let idx = match self.position(id) {
            Some(idx) => idx,
            None => return,
        };
        self.entries.remove(idx);
        self.persist();
    }

    /// Looks up an entry by id, case-insensitively.
    pub fn get(&self, id: &str) -> Option<&SavedQuery> {
        self.entries.iter().find(|e| e.id.eq_ignore_ascii_case(id))
    }

    pub fn entries(&self) -> &[SavedQuery] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.id.eq_ignore_ascii_case(id))
    }

    fn persist(&self) {
        if let Err(e) = self.write_snapshot() {
            log::warn!(
                "Failed to save query catalog to {}: {}",
                self.path.display(),
                e
            );
        }
    }

    fn write_snapshot(&self) -> std::io::Result<()> {
        let file = CatalogFile {
            version: CATALOG_VERSION,
            queries: self.entries.clone(),
        };
        let json = serde_json::to_vec_pretty(&file)?;
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        // write a sibling then rename, so a crash mid-write leaves the
        // previous snapshot intact
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

fn display_name(name: &str) -> String {
    if name.trim().is_empty() {
        "Consulta".to_string()
    } else {
        name.to_string()
    }
}

fn load_entries(path: &Path) -> Vec<SavedQuery> {
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                log::warn!("Failed to read query catalog from {}: {}", path.display(), e);
            }
            return Vec::new();
        }
    };
    match parse_snapshot(&raw) {
        Some(entries) => entries,
        None => {
            log::warn!(
                "Failed to parse query catalog at {}; starting empty",
                path.display()
            );
            Vec::new()
        }
    }
}

/// Accepts the versioned wrapper or a bare array of entries.
fn parse_snapshot(raw: &[u8]) -> Option<Vec<SavedQuery>> {
    if let Ok(file) = serde_json::from_slice::<CatalogFile>(raw) {
        return Some(file.queries);
    }
    serde_json::from_slice::<Vec<SavedQuery>>(raw).ok()
}
