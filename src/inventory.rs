//! @ai:module:intent Canonical-identity keyed inventories and the code inventory collaborator
//! @ai:module:layer application
//! @ai:module:public_api Inventory, CodeInventory, Manifest, ManifestInventory
//! @ai:module:depends_on entry, symbols, canonical, error

use crate::canonical::Canonicalizer;
use crate::entry::ApiEntry;
use crate::error::{Error, Result};
use crate::symbols::SymbolTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// @ai:intent Mapping from canonical identity to the entry that owns it
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    entries: BTreeMap<String, ApiEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Fold entries into an inventory keyed by canonical identity
    /// @ai:post later entries win when two share a canonical identity
    /// @ai:effects pure
    pub fn from_entries<I>(entries: I, canonicalizer: &Canonicalizer<'_>) -> Self
    where
        I: IntoIterator<Item = ApiEntry>,
    {
        let mut inventory = Self::new();
        for entry in entries {
            let canonical = canonicalizer.canonicalize(&entry);
            inventory.insert(canonical, entry);
        }
        inventory
    }

    /// Returns the entry previously owning `canonical`, if any.
    pub fn insert(&mut self, canonical: String, entry: ApiEntry) -> Option<ApiEntry> {
        self.entries.insert(canonical, entry)
    }

    pub fn contains(&self, canonical: &str) -> bool {
        self.entries.contains_key(canonical)
    }

    pub fn get(&self, canonical: &str) -> Option<&ApiEntry> {
        self.entries.get(canonical)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in canonical identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ApiEntry)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// @ai:intent Source of the annotated code-side inventory and its symbol table
pub trait CodeInventory {
    /// @ai:intent Declared symbols under the given root modules
    fn scan(&self, modules: &[String]) -> Result<Vec<ApiEntry>>;

    /// @ai:intent Symbol table used to canonicalize names from both sides
    fn symbols(&self) -> &SymbolTable;
}

/// @ai:intent On-disk output of a code scan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<ApiEntry>,
    #[serde(default)]
    pub symbols: SymbolTable,
}

/// @ai:intent Code inventory backed by a JSON manifest file
#[derive(Debug, Clone, Default)]
pub struct ManifestInventory {
    manifest: Manifest,
}

impl ManifestInventory {
    pub fn new(manifest: Manifest) -> Self {
        Self { manifest }
    }

    /// @ai:intent Load a manifest from a JSON file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let manifest: Manifest =
            serde_json::from_str(&content).map_err(|e| Error::ManifestParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::debug!(
            path = %path.display(),
            entries = manifest.entries.len(),
            namespaces = manifest.symbols.len(),
            "loaded code manifest"
        );

        Ok(Self::new(manifest))
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }
}

/// @ai:intent Check if a dotted name is a root module or nested under it
/// @ai:effects pure
fn is_under(name: &str, module: &str) -> bool {
    name.strip_prefix(module)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
}

impl CodeInventory for ManifestInventory {
    /// An empty module list selects every entry in the manifest.
    fn scan(&self, modules: &[String]) -> Result<Vec<ApiEntry>> {
        let entries = self
            .manifest
            .entries
            .iter()
            .filter(|entry| modules.is_empty() || modules.iter().any(|m| is_under(entry.name(), m)))
            .cloned()
            .collect();

        Ok(entries)
    }

    fn symbols(&self) -> &SymbolTable {
        &self.manifest.symbols
    }
}
