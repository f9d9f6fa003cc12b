//! @ai:module:intent Define the API entry model shared by the code and documentation sides
//! @ai:module:layer domain
//! @ai:module:public_api Annotation, ApiKind, ApiEntry, CanonicalApi
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

const SEPARATOR: char = '.';
const INTERNAL_SEGMENT: &str = "_internal";

/// @ai:intent Maturity/visibility tag declared where a symbol is defined
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Annotation {
    #[serde(rename = "PublicAPI")]
    PublicApi,
    #[serde(rename = "DeveloperAPI")]
    DeveloperApi,
    Deprecated,
    Unknown,
}

impl Annotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Annotation::PublicApi => "PublicAPI",
            Annotation::DeveloperApi => "DeveloperAPI",
            Annotation::Deprecated => "Deprecated",
            Annotation::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Which directive grammar (or code construct) produced an entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiKind {
    Class,
    Function,
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKind::Class => f.write_str("Class"),
            ApiKind::Function => f.write_str("Function"),
        }
    }
}

/// @ai:intent A single API symbol as named on one side of the reconciliation
/// @ai:invariant name is non-empty and never ends with a separator
///
/// Fields are read-only after construction. Identity comparisons go through
/// [`CanonicalApi`], never through the raw name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EntryRecord")]
pub struct ApiEntry {
    name: String,
    annotation: Annotation,
    kind: ApiKind,
}

/// Unvalidated wire shape of an [`ApiEntry`].
#[derive(Deserialize)]
struct EntryRecord {
    name: String,
    annotation: Annotation,
    kind: ApiKind,
}

impl TryFrom<EntryRecord> for ApiEntry {
    type Error = String;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        ApiEntry::new(record.name.clone(), record.annotation, record.kind)
            .ok_or_else(|| format!("invalid API name `{}`", record.name))
    }
}

impl ApiEntry {
    /// @ai:intent Create an entry, rejecting empty names and trailing separators
    /// @ai:post result is None when the name breaks the naming invariant
    /// @ai:example ("pkg.Widget", PublicApi, Class) -> Some(..)
    /// @ai:example ("pkg.", PublicApi, Class) -> None
    /// @ai:effects pure
    pub fn new(name: impl Into<String>, annotation: Annotation, kind: ApiKind) -> Option<Self> {
        let name = name.into();
        if name.is_empty() || name.ends_with(SEPARATOR) {
            return None;
        }

        Some(Self {
            name,
            annotation,
            kind,
        })
    }

    /// @ai:intent Create a documentation-side entry, which is always inferred as public
    /// @ai:effects pure
    pub fn documented(name: impl Into<String>, kind: ApiKind) -> Option<Self> {
        Self::new(name, Annotation::PublicApi, kind)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annotation(&self) -> Annotation {
        self.annotation
    }

    pub fn kind(&self) -> ApiKind {
        self.kind
    }

    /// @ai:intent Last dotted segment of the raw name
    /// @ai:effects pure
    pub fn leaf(&self) -> &str {
        self.name
            .rsplit_once(SEPARATOR)
            .map_or(self.name.as_str(), |(_, leaf)| leaf)
    }

    /// @ai:intent Check if the raw name marks the symbol as private by convention
    /// @ai:post true when the leaf starts with `_` or an inner segment is `_internal`
    /// @ai:example ("pkg._internal_fn") -> true
    /// @ai:example ("pkg._internal.util.fn") -> true
    /// @ai:example ("_internal.fn") -> false
    /// @ai:effects pure
    pub fn has_private_name(&self) -> bool {
        let segments: Vec<&str> = self.name.split(SEPARATOR).collect();
        let leaf_is_private = segments.last().is_some_and(|leaf| leaf.starts_with('_'));

        // Only segments with a neighbour on both sides count as a namespace marker.
        let is_internal = segments.len() > 2
            && segments[1..segments.len() - 1]
                .iter()
                .any(|segment| *segment == INTERNAL_SEGMENT);

        leaf_is_private || is_internal
    }

    pub fn is_public(&self) -> bool {
        self.annotation == Annotation::PublicApi
    }

    pub fn is_developer(&self) -> bool {
        self.annotation == Annotation::DeveloperApi
    }

    pub fn is_deprecated(&self) -> bool {
        self.annotation == Annotation::Deprecated
    }
}

/// @ai:intent An entry paired with its resolved canonical identity
///
/// Equality, ordering and hashing use the canonical identity only, so an alias
/// and its defining location compare equal once resolved.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalApi {
    pub canonical: String,
    #[serde(flatten)]
    pub entry: ApiEntry,
}

impl CanonicalApi {
    pub fn new(canonical: impl Into<String>, entry: ApiEntry) -> Self {
        Self {
            canonical: canonical.into(),
            entry,
        }
    }
}

impl PartialEq for CanonicalApi {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for CanonicalApi {}

impl Hash for CanonicalApi {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl PartialOrd for CanonicalApi {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalApi {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical.cmp(&other.canonical)
    }
}

impl fmt::Display for CanonicalApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn public_fn(name: &str) -> ApiEntry {
        ApiEntry::new(name, Annotation::PublicApi, ApiKind::Function).unwrap()
    }

    #[test]
    fn test_rejects_empty_and_trailing_separator() {
        assert!(ApiEntry::new("", Annotation::PublicApi, ApiKind::Class).is_none());
        assert!(ApiEntry::new("pkg.mod.", Annotation::PublicApi, ApiKind::Class).is_none());
        assert!(ApiEntry::new("pkg.mod", Annotation::PublicApi, ApiKind::Class).is_some());
    }

    #[test]
    fn test_documented_entries_are_public() {
        let entry = ApiEntry::documented("pkg.Widget", ApiKind::Class).unwrap();
        assert!(entry.is_public());
        assert!(!entry.is_developer());
        assert!(!entry.is_deprecated());
    }

    #[test]
    fn test_private_name_by_leaf_underscore() {
        assert!(public_fn("pkg._internal_fn").has_private_name());
        assert!(public_fn("pkg.Thing._helper").has_private_name());
        assert!(!public_fn("pkg.Thing.helper").has_private_name());
    }

    #[test]
    fn test_private_name_by_internal_segment() {
        assert!(public_fn("pkg._internal.util.fn").has_private_name());
        // An `_internal` segment must sit between two other segments.
        assert!(!public_fn("_internal.fn").has_private_name());
        // Non-leading underscore segments elsewhere do not count.
        assert!(!public_fn("pkg._private.fn").has_private_name());
    }

    #[test]
    fn test_leaf() {
        assert_eq!(public_fn("pkg.mod.fn").leaf(), "fn");
        assert_eq!(public_fn("fn").leaf(), "fn");
    }

    #[test]
    fn test_canonical_equality_ignores_raw_name() {
        let alias = CanonicalApi::new("pkg.real.Thing", public_fn("pkg.sub.Alias"));
        let real = CanonicalApi::new("pkg.real.Thing", public_fn("pkg.real.Thing"));
        let other = CanonicalApi::new("pkg.sub.Alias", public_fn("pkg.sub.Alias"));

        assert_eq!(alias, real);
        assert_ne!(alias, other);

        let set: HashSet<_> = [alias, real, other].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deserialize_rejects_invalid_name() {
        let ok: ApiEntry =
            serde_json::from_str(r#"{"name":"pkg.f","annotation":"DeveloperAPI","kind":"Function"}"#)
                .unwrap();
        assert!(ok.is_developer());

        let bad = serde_json::from_str::<ApiEntry>(
            r#"{"name":"pkg.","annotation":"PublicAPI","kind":"Function"}"#,
        );
        assert!(bad.is_err());
    }
}
