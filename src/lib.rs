//! @ai:module:intent apidrift library for reconciling documented APIs with annotated code
//! @ai:module:layer infrastructure
//! @ai:module:public_api canonical, check, config, directive, discover, entry, error, inventory, output, reconcile, symbols
//! @ai:module:stateless true
//!
//! # apidrift
//!
//! Compares the API references found in Sphinx `autosummary`/`autoclass`
//! directives with an annotated inventory of the code, after resolving both
//! sides to the location where each symbol is defined.
//!
//! ## Example
//!
//! ```rust,no_run
//! use apidrift::{check_config, output, Config};
//! use std::path::Path;
//!
//! let config = Config::load(Path::new("apidrift.toml")).unwrap();
//! let report = check_config(&config).unwrap();
//! println!("{}", output::format_report(&report, output::OutputFormat::Text));
//! ```

pub mod canonical;
pub mod check;
pub mod config;
pub mod directive;
pub mod discover;
pub mod entry;
pub mod error;
pub mod inventory;
pub mod output;
pub mod reconcile;
pub mod symbols;

pub use canonical::Canonicalizer;
pub use check::{check, check_config};
pub use config::{CodeConfig, Config, DocsConfig};
pub use directive::{extract_references, parse_file, RawReference, References};
pub use discover::{collect_doc_inventory, discover_documents};
pub use entry::{Annotation, ApiEntry, ApiKind, CanonicalApi};
pub use error::{Error, Result};
pub use inventory::{CodeInventory, Inventory, Manifest, ManifestInventory};
pub use output::{format_canonical_names, format_references, format_report, to_json, OutputFormat};
pub use reconcile::{classify, reconcile, reconcile_with_allowlist, Classification, Report, Summary};
pub use symbols::{Symbol, SymbolTable};
