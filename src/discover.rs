//! @ai:module:intent Find the documentation source files that belong to a docs tree
//! @ai:module:layer infrastructure
//! @ai:module:public_api discover_documents, collect_doc_inventory
//! @ai:module:depends_on config, directive, canonical, inventory, error

use crate::canonical::Canonicalizer;
use crate::config::DocsConfig;
use crate::directive::parse_file;
use crate::error::{Error, Result};
use crate::inventory::Inventory;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// @ai:intent Document name relative to the source dir, without extension, using `/`
/// @ai:effects pure
fn document_name(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// @ai:intent List one source file per document under `source_dir`
/// @ai:pre source_dir is a directory
/// @ai:post result is sorted; a document present under several extensions appears once,
///          with the first extension in `config.extensions` that exists
/// @ai:effects fs:read
pub fn discover_documents(source_dir: &Path, config: &DocsConfig) -> Result<Vec<PathBuf>> {
    if !source_dir.is_dir() {
        return Err(Error::InvalidConfig(format!(
            "documentation source directory {} does not exist",
            source_dir.display()
        )));
    }

    let mut documents: BTreeMap<String, BTreeMap<usize, PathBuf>> = BTreeMap::new();

    for entry in WalkDir::new(source_dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable path under {}: {}", source_dir.display(), e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(rank) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| config.extensions.iter().position(|known| known == ext))
        else {
            continue;
        };

        let Ok(relative) = path.strip_prefix(source_dir) else {
            continue;
        };

        let name = document_name(relative);
        if config
            .exclude_prefixes
            .iter()
            .any(|prefix| name.starts_with(prefix.as_str()))
        {
            continue;
        }

        documents
            .entry(name)
            .or_default()
            .insert(rank, path.to_path_buf());
    }

    let files: Vec<PathBuf> = documents
        .into_values()
        .filter_map(|by_rank| by_rank.into_values().next())
        .collect();

    tracing::debug!(
        source_dir = %source_dir.display(),
        count = files.len(),
        "discovered documents"
    );

    Ok(files)
}

/// @ai:intent Parse every document and fold its references into a canonical inventory
/// @ai:post a document that cannot be read is logged and contributes nothing
/// @ai:effects fs:read
pub fn collect_doc_inventory(documents: &[PathBuf], canonicalizer: &Canonicalizer<'_>) -> Inventory {
    let mut inventory = Inventory::new();

    for document in documents {
        match parse_file(document) {
            Ok(references) => {
                for reference in references {
                    let entry = reference.into_entry();
                    let canonical = canonicalizer.canonicalize(&entry);
                    inventory.insert(canonical, entry);
                }
            }
            Err(e) => {
                tracing::warn!("Skipping document {}: {}", document.display(), e);
            }
        }
    }

    inventory
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{Symbol, SymbolTable};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    fn relative_names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| document_name(f.strip_prefix(root).unwrap()) + "." + f.extension().unwrap().to_str().unwrap())
            .collect()
    }

    #[test]
    fn test_discover_prefers_extension_order_and_skips_templates() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(root, "index.rst", "");
        write(root, "tune/api.rst", "");
        write(root, "tune/api.md", "");
        write(root, "tune/guide.ipynb", "{}");
        write(root, "_templates/autosummary/class.rst", "");
        write(root, "conf.py", "");
        write(root, "notes.txt", "");

        let files = discover_documents(root, &DocsConfig::default()).unwrap();

        assert_eq!(
            relative_names(root, &files),
            vec!["index.rst", "tune/api.md", "tune/guide.ipynb"]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = discover_documents(&missing, &DocsConfig::default()).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_collect_doc_inventory_canonicalizes_and_ignores_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        write(
            root,
            "api.rst",
            ".. currentmodule:: pkg.sub\n\n.. autoclass:: Alias\n\n.. autosummary::\n\n    Alias.method\n",
        );

        let mut table = SymbolTable::new();
        table.define(
            "pkg.sub",
            "Alias",
            Symbol::new("pkg.real", "Thing").with_member("method", "method"),
        );
        let canon = Canonicalizer::new(&table);

        let documents = vec![root.join("api.rst"), root.join("gone.rst")];
        let inventory = collect_doc_inventory(&documents, &canon);

        let keys: Vec<_> = inventory.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["pkg.real.Thing", "pkg.real.Thing.method"]);
    }
}
