//! Catalog Loader
//!
//! Reads the catalog directory tree into per-category part records. Each
//! sub-directory of the root is one category holding one or more record
//! files; each file directly under the root is its own category. The
//! catalog is edited by hand outside this service, so every load re-reads
//! the filesystem; nothing is cached across requests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use fabrica_models::PartRecord;
use fabrica_utils::error::{FabricaError, FabricaResult};
use fabrica_utils::records::parse_record_file;

/// One full catalog load: per-category records, schemas and titles.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Category -> part records, in file row order.
    pub records: BTreeMap<String, Vec<PartRecord>>,
    /// Category -> widest header seen across the category's files.
    pub schemas: BTreeMap<String, Vec<String>>,
    /// Category -> display title (directive or prettified category name).
    pub titles: BTreeMap<String, String>,
    /// Uppercased identifier -> (category, row index). First occurrence
    /// wins; the traversal order is sorted, so ties are deterministic.
    index: HashMap<String, (String, usize)>,
}

impl Catalog {
    /// Looks up a part record by identifier across all categories,
    /// case-insensitively.
    pub fn find(&self, identifier: &str) -> Option<&PartRecord> {
        let (category, idx) = self.index.get(&identifier.trim().to_uppercase())?;
        self.records.get(category)?.get(*idx)
    }

    /// Total number of part records across all categories.
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

pub struct CatalogLoader {
    root: PathBuf,
}

impl CatalogLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loads the whole catalog tree. Unparseable record files are skipped
    /// with a warning; only an unreadable root is an error.
    pub fn load(&self) -> FabricaResult<Catalog> {
        let entries = fs::read_dir(&self.root).map_err(|e| {
            FabricaError::catalog(format!(
                "Catalog root {} is unreadable: {}",
                self.root.display(),
                e
            ))
        })?;

        // Directories (categories proper) are processed before root-level
        // files, so a part's category record wins the first-occurrence
        // dedup over any structure file that happens to mention it.
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| !is_hidden(path))
            .collect();
        paths.sort_by_key(|path| (!path.is_dir(), path.clone()));

        let mut catalog = Catalog::default();
        let mut seen: HashSet<String> = HashSet::new();

        for path in paths {
            if path.is_dir() {
                let category = name_of(&path);
                let mut files: Vec<PathBuf> = match fs::read_dir(&path) {
                    Ok(entries) => entries
                        .filter_map(|entry| entry.ok())
                        .map(|entry| entry.path())
                        .filter(|p| p.is_file() && !is_hidden(p))
                        .collect(),
                    Err(e) => {
                        warn!(category = %category, error = %e, "Skipping unreadable category directory");
                        continue;
                    }
                };
                files.sort();
                for file in files {
                    merge_file(&mut catalog, &mut seen, &category, &file);
                }
            } else if path.is_file() {
                let category = stem_of(&path);
                merge_file(&mut catalog, &mut seen, &category, &path);
            }
        }

        // Categories without a title directive fall back to a prettified
        // category name.
        for category in catalog.records.keys() {
            catalog
                .titles
                .entry(category.clone())
                .or_insert_with(|| title_case(category));
        }

        Ok(catalog)
    }
}

/// Merges one record file into the catalog under `category`.
fn merge_file(catalog: &mut Catalog, seen: &mut HashSet<String>, category: &str, path: &Path) {
    let file = match parse_record_file(path) {
        Ok(file) => file,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "Skipping unparseable record file");
            return;
        }
    };
    for warning in &file.parse_warnings {
        warn!(file = %path.display(), "{}", warning);
    }

    if let Some(title) = &file.title {
        catalog
            .titles
            .entry(category.to_string())
            .or_insert_with(|| title.clone());
    }

    let schema = catalog.schemas.entry(category.to_string()).or_default();
    if file.headers.len() > schema.len() {
        *schema = file.headers.clone();
    }

    let rows = catalog.records.entry(category.to_string()).or_default();
    for row in &file.rows {
        let Some(identifier) = file.identifier_of(row) else {
            continue;
        };
        // First occurrence wins across the whole load.
        if !seen.insert(identifier.to_uppercase()) {
            continue;
        }
        catalog
            .index
            .insert(identifier.to_uppercase(), (category.to_string(), rows.len()));
        rows.push(PartRecord {
            identifier: identifier.to_string(),
            fields: row.values.clone(),
            category: category.to_string(),
        });
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn stem_of(path: &Path) -> String {
    path.file_stem()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string()
}

fn title_case(name: &str) -> String {
    name.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
