//! @ai:module:intent Pre-built table of namespaces and the defining location of each attribute
//! @ai:module:layer domain
//! @ai:module:public_api SymbolTable, Symbol
//! @ai:module:stateless true
//!
//! The table is produced by the code scanner alongside the annotated
//! inventory. Every namespace lists the attributes reachable from it, whether
//! defined there or re-exported, each pointing back to where it is defined.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// @ai:intent Defining location of an attribute reachable from a namespace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Symbol {
    /// Namespace the symbol is defined in
    pub module: String,
    /// Qualified path of the symbol inside its defining namespace
    pub qualname: String,
    /// Attributes of a class-like symbol, mapped to the name they are defined under
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, String>,
}

impl Symbol {
    /// @ai:intent Create a symbol with no members
    /// @ai:effects pure
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            qualname: qualname.into(),
            members: BTreeMap::new(),
        }
    }

    /// @ai:intent Add a member reachable as `attribute` and defined as `defined_name`
    /// @ai:effects pure
    pub fn with_member(mut self, attribute: impl Into<String>, defined_name: impl Into<String>) -> Self {
        self.members.insert(attribute.into(), defined_name.into());
        self
    }

    /// `module.qualname`
    pub fn path(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }

    pub fn member(&self, attribute: &str) -> Option<&str> {
        self.members.get(attribute).map(String::as_str)
    }
}

/// @ai:intent Namespace path -> attribute name -> defining location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct SymbolTable {
    namespaces: BTreeMap<String, BTreeMap<String, Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:intent Register an attribute of a namespace, replacing any previous definition
    /// @ai:effects pure
    pub fn define(&mut self, namespace: impl Into<String>, attribute: impl Into<String>, symbol: Symbol) {
        self.namespaces
            .entry(namespace.into())
            .or_default()
            .insert(attribute.into(), symbol);
    }

    /// @ai:intent Register a namespace with no attributes yet
    /// @ai:effects pure
    pub fn declare_namespace(&mut self, namespace: impl Into<String>) {
        self.namespaces.entry(namespace.into()).or_default();
    }

    pub fn has_namespace(&self, namespace: &str) -> bool {
        self.namespaces.contains_key(namespace)
    }

    /// @ai:intent Look up an attribute directly on a namespace
    /// @ai:post None when either the namespace or the attribute is unknown
    /// @ai:effects pure
    pub fn lookup(&self, namespace: &str, attribute: &str) -> Option<&Symbol> {
        self.namespaces.get(namespace)?.get(attribute)
    }

    /// Number of namespaces.
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }
}
