//! @ai:module:intent Resolve raw API names to the location where the symbol is defined
//! @ai:module:layer application
//! @ai:module:public_api Canonicalizer
//! @ai:module:depends_on entry, symbols
//! @ai:module:stateless true

use crate::entry::{ApiEntry, CanonicalApi};
use crate::symbols::SymbolTable;

/// @ai:intent Resolves names against a fully built symbol table
///
/// Resolution failures are not errors: an unresolvable name is its own
/// canonical identity.
#[derive(Debug, Clone, Copy)]
pub struct Canonicalizer<'t> {
    symbols: &'t SymbolTable,
}

impl<'t> Canonicalizer<'t> {
    pub fn new(symbols: &'t SymbolTable) -> Self {
        Self { symbols }
    }

    /// @ai:intent Canonical identity of an entry
    /// @ai:effects pure
    pub fn canonicalize(&self, entry: &ApiEntry) -> String {
        self.canonical_name(entry.name())
    }

    /// @ai:intent Pair an entry with its canonical identity
    /// @ai:effects pure
    pub fn identify(&self, entry: ApiEntry) -> CanonicalApi {
        CanonicalApi::new(self.canonicalize(&entry), entry)
    }

    /// @ai:intent Canonical identity of a dotted name
    /// @ai:post result is the name itself when neither resolution step succeeds
    /// @ai:example ("pkg.sub.Alias") -> "pkg.real.Thing" when pkg.sub re-exports pkg.real.Thing
    /// @ai:example ("pkg.sub.Alias.method") -> "pkg.real.Thing.method"
    /// @ai:example ("nowhere.thing") -> "nowhere.thing"
    /// @ai:effects pure
    pub fn canonical_name(&self, name: &str) -> String {
        self.resolve_attribute(name)
            .or_else(|| self.resolve_member(name))
            .unwrap_or_else(|| name.to_string())
    }

    /// Module-level attribute, possibly re-exported under another name.
    fn resolve_attribute(&self, name: &str) -> Option<String> {
        let (container, leaf) = name.rsplit_once('.')?;
        let symbol = self.symbols.lookup(container, leaf)?;

        Some(symbol.path())
    }

    /// Member of a class reached through a namespace attribute.
    fn resolve_member(&self, name: &str) -> Option<String> {
        let (container, leaf) = name.rsplit_once('.')?;
        let (outer, member) = container.rsplit_once('.')?;
        let symbol = self.symbols.lookup(outer, member)?;
        let defined_name = symbol.member(leaf)?;

        Some(format!("{}.{}", symbol.path(), defined_name))
    }
}
