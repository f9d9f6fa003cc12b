//! @ai:module:intent Run a full documentation/code reconciliation
//! @ai:module:layer application
//! @ai:module:public_api check, check_config
//! @ai:module:depends_on config, discover, inventory, canonical, reconcile

use crate::canonical::Canonicalizer;
use crate::config::Config;
use crate::discover::{collect_doc_inventory, discover_documents};
use crate::error::Result;
use crate::inventory::{CodeInventory, Inventory, ManifestInventory};
use crate::reconcile::{reconcile_with_allowlist, Report};
use std::collections::HashSet;
use std::path::PathBuf;

/// @ai:intent Reconcile the given documents against a code inventory
/// @ai:effects fs:read
pub fn check<C: CodeInventory + ?Sized>(
    code: &C,
    modules: &[String],
    documents: &[PathBuf],
    allowlist: &HashSet<String>,
) -> Result<Report> {
    let canonicalizer = Canonicalizer::new(code.symbols());

    let code_inventory = Inventory::from_entries(code.scan(modules)?, &canonicalizer);
    let doc_inventory = collect_doc_inventory(documents, &canonicalizer);

    tracing::info!(
        documents = documents.len(),
        code_apis = code_inventory.len(),
        documented_apis = doc_inventory.len(),
        "reconciling inventories"
    );

    Ok(reconcile_with_allowlist(&code_inventory, &doc_inventory, allowlist))
}

/// @ai:intent Discover documents, load the manifest and reconcile as configured
/// @ai:effects fs:read
pub fn check_config(config: &Config) -> Result<Report> {
    config.validate()?;

    let documents = discover_documents(&config.docs.source_dir, &config.docs)?;
    let code = ManifestInventory::load(&config.code.manifest)?;
    let allowlist: HashSet<String> = config.allowlist.iter().cloned().collect();

    check(&code, &config.code.root_modules(), &documents, &allowlist)
}
