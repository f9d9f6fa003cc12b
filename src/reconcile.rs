//! @ai:module:intent Classify code-side APIs against the documented inventory
//! @ai:module:layer application
//! @ai:module:public_api reconcile, reconcile_with_allowlist, classify, Classification, Report, Summary
//! @ai:module:depends_on entry, inventory
//! @ai:module:stateless true

use crate::entry::{ApiEntry, CanonicalApi};
use crate::inventory::Inventory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// @ai:intent Outcome for a single code-side entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Public and documented
    Good,
    /// Public but missing from the docs; `private_name` flags a contradicting name
    UndocumentedPublic { private_name: bool },
    DeprecatedDocumented,
    UndocumentedDeprecatedPublic,
    /// No maturity annotation, yet documented
    PrivateDocumented,
}

/// @ai:intent Decide the outcome for one code entry
/// @ai:post None for developer-tier entries and for unannotated undocumented entries
/// @ai:effects pure
pub fn classify(entry: &ApiEntry, documented: bool) -> Option<Classification> {
    if entry.is_public() {
        if documented {
            Some(Classification::Good)
        } else {
            Some(Classification::UndocumentedPublic {
                private_name: entry.has_private_name(),
            })
        }
    } else if entry.is_developer() {
        None
    } else if entry.is_deprecated() {
        if documented {
            Some(Classification::DeprecatedDocumented)
        } else {
            Some(Classification::UndocumentedDeprecatedPublic)
        }
    } else if documented {
        Some(Classification::PrivateDocumented)
    } else {
        None
    }
}

/// @ai:intent The six outcome sets of a reconciliation run, ordered by canonical identity
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub good: BTreeSet<CanonicalApi>,
    pub private_documented: BTreeSet<CanonicalApi>,
    pub deprecated_documented: BTreeSet<CanonicalApi>,
    pub undocumented_public: BTreeSet<CanonicalApi>,
    pub undocumented_deprecated_public: BTreeSet<CanonicalApi>,
    /// Subset of `undocumented_public`
    pub public_but_private_name: BTreeSet<CanonicalApi>,
}

/// @ai:intent Per-category counts of a report
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Summary {
    pub good: usize,
    pub private_documented: usize,
    pub deprecated_documented: usize,
    pub undocumented_public: usize,
    pub undocumented_deprecated_public: usize,
    pub public_but_private_name: usize,
}

impl Report {
    /// @ai:intent Place a classified entry into its output set(s)
    /// @ai:effects pure
    pub fn record(&mut self, api: CanonicalApi, classification: Classification) {
        match classification {
            Classification::Good => {
                self.good.insert(api);
            }
            Classification::UndocumentedPublic { private_name } => {
                if private_name {
                    self.public_but_private_name.insert(api.clone());
                }
                self.undocumented_public.insert(api);
            }
            Classification::DeprecatedDocumented => {
                self.deprecated_documented.insert(api);
            }
            Classification::UndocumentedDeprecatedPublic => {
                self.undocumented_deprecated_public.insert(api);
            }
            Classification::PrivateDocumented => {
                self.private_documented.insert(api);
            }
        }
    }

    /// @ai:intent Check if any category other than `good` is populated
    pub fn has_drift(&self) -> bool {
        !(self.private_documented.is_empty()
            && self.deprecated_documented.is_empty()
            && self.undocumented_public.is_empty()
            && self.undocumented_deprecated_public.is_empty()
            && self.public_but_private_name.is_empty())
    }

    pub fn summary(&self) -> Summary {
        Summary {
            good: self.good.len(),
            private_documented: self.private_documented.len(),
            deprecated_documented: self.deprecated_documented.len(),
            undocumented_public: self.undocumented_public.len(),
            undocumented_deprecated_public: self.undocumented_deprecated_public.len(),
            public_but_private_name: self.public_but_private_name.len(),
        }
    }
}

/// @ai:intent Partition every code entry into the report categories
/// @ai:pre both inventories are keyed by canonical identity
/// @ai:post entries only present in `docs` do not appear in the report
/// @ai:effects pure
pub fn reconcile(code: &Inventory, docs: &Inventory) -> Report {
    reconcile_with_allowlist(code, docs, &HashSet::new())
}

/// @ai:intent Reconcile, skipping code entries whose canonical identity is allowlisted
/// @ai:effects pure
pub fn reconcile_with_allowlist(
    code: &Inventory,
    docs: &Inventory,
    allowlist: &HashSet<String>,
) -> Report {
    let mut report = Report::default();

    for (canonical, entry) in code.iter() {
        if allowlist.contains(canonical) {
            tracing::debug!(api = canonical, "skipping allowlisted API");
            continue;
        }

        if let Some(classification) = classify(entry, docs.contains(canonical)) {
            report.record(CanonicalApi::new(canonical, entry.clone()), classification);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::Canonicalizer;
    use crate::entry::{Annotation, ApiKind};
    use crate::symbols::{Symbol, SymbolTable};
    use pretty_assertions::assert_eq;

    fn code(name: &str, annotation: Annotation) -> ApiEntry {
        ApiEntry::new(name, annotation, ApiKind::Function).unwrap()
    }

    fn doc(name: &str) -> ApiEntry {
        ApiEntry::documented(name, ApiKind::Function).unwrap()
    }

    fn names(set: &BTreeSet<CanonicalApi>) -> Vec<&str> {
        set.iter().map(|api| api.canonical.as_str()).collect()
    }

    #[test]
    fn test_classify_decision_table() {
        let public = code("pkg.f", Annotation::PublicApi);
        let private_public = code("pkg._f", Annotation::PublicApi);
        let developer = code("pkg.f", Annotation::DeveloperApi);
        let deprecated = code("pkg.f", Annotation::Deprecated);
        let unknown = code("pkg.f", Annotation::Unknown);

        assert_eq!(classify(&public, true), Some(Classification::Good));
        assert_eq!(
            classify(&public, false),
            Some(Classification::UndocumentedPublic { private_name: false })
        );
        assert_eq!(
            classify(&private_public, false),
            Some(Classification::UndocumentedPublic { private_name: true })
        );
        // A documented public API is good even with a private-looking name.
        assert_eq!(classify(&private_public, true), Some(Classification::Good));
        assert_eq!(classify(&developer, true), None);
        assert_eq!(classify(&developer, false), None);
        assert_eq!(classify(&deprecated, true), Some(Classification::DeprecatedDocumented));
        assert_eq!(
            classify(&deprecated, false),
            Some(Classification::UndocumentedDeprecatedPublic)
        );
        assert_eq!(classify(&unknown, true), Some(Classification::PrivateDocumented));
        assert_eq!(classify(&unknown, false), None);
    }

    #[test]
    fn test_reconcile_is_total_and_disjoint() {
        let table = SymbolTable::new();
        let canon = Canonicalizer::new(&table);

        let code_inv = Inventory::from_entries(
            vec![
                code("pkg.good", Annotation::PublicApi),
                code("pkg.missing", Annotation::PublicApi),
                code("pkg._hidden", Annotation::PublicApi),
                code("pkg.dev", Annotation::DeveloperApi),
                code("pkg.old_doc", Annotation::Deprecated),
                code("pkg.old", Annotation::Deprecated),
                code("pkg.private_doc", Annotation::Unknown),
                code("pkg.private", Annotation::Unknown),
            ],
            &canon,
        );
        let doc_inv = Inventory::from_entries(
            vec![
                doc("pkg.good"),
                doc("pkg.dev"),
                doc("pkg.old_doc"),
                doc("pkg.private_doc"),
                doc("pkg.only_in_docs"),
            ],
            &canon,
        );

        let report = reconcile(&code_inv, &doc_inv);

        assert_eq!(names(&report.good), vec!["pkg.good"]);
        assert_eq!(names(&report.undocumented_public), vec!["pkg._hidden", "pkg.missing"]);
        assert_eq!(names(&report.public_but_private_name), vec!["pkg._hidden"]);
        assert_eq!(names(&report.deprecated_documented), vec!["pkg.old_doc"]);
        assert_eq!(names(&report.undocumented_deprecated_public), vec!["pkg.old"]);
        assert_eq!(names(&report.private_documented), vec!["pkg.private_doc"]);

        let exclusive = [
            &report.good,
            &report.undocumented_public,
            &report.deprecated_documented,
            &report.undocumented_deprecated_public,
            &report.private_documented,
        ];
        let total: usize = exclusive.iter().map(|set| set.len()).sum();
        let distinct: BTreeSet<_> = exclusive.iter().flat_map(|set| set.iter()).collect();
        assert_eq!(total, distinct.len());
        // Everything except the developer API and the undocumented unannotated one.
        assert_eq!(total, 6);
    }

    #[test]
    fn test_alias_collapse_is_good() {
        let mut table = SymbolTable::new();
        table.define("pkg.sub", "Alias", Symbol::new("pkg.real", "Thing"));
        table.define("pkg.real", "Thing", Symbol::new("pkg.real", "Thing"));
        let canon = Canonicalizer::new(&table);

        let code_inv = Inventory::from_entries(vec![code("pkg.sub.Alias", Annotation::PublicApi)], &canon);
        let doc_inv = Inventory::from_entries(vec![doc("pkg.sub.Alias")], &canon);

        let report = reconcile(&code_inv, &doc_inv);

        assert_eq!(names(&report.good), vec!["pkg.real.Thing"]);
        assert!(!report.has_drift());
    }

    #[test]
    fn test_method_through_alias_is_good() {
        let thing = Symbol::new("pkg.real", "Thing").with_member("method", "method");
        let mut table = SymbolTable::new();
        table.define("pkg.sub", "Alias", thing.clone());
        table.define("pkg.real", "Thing", thing);
        let canon = Canonicalizer::new(&table);

        let code_inv =
            Inventory::from_entries(vec![code("pkg.real.Thing.method", Annotation::PublicApi)], &canon);
        let doc_inv = Inventory::from_entries(vec![doc("pkg.sub.Alias.method")], &canon);

        let report = reconcile(&code_inv, &doc_inv);

        assert_eq!(names(&report.good), vec!["pkg.real.Thing.method"]);
        assert!(report.undocumented_public.is_empty());
    }

    #[test]
    fn test_unresolvable_aliases_do_not_unify() {
        let table = SymbolTable::new();
        let canon = Canonicalizer::new(&table);

        let code_inv = Inventory::from_entries(vec![code("pkg.real.Thing", Annotation::PublicApi)], &canon);
        let doc_inv = Inventory::from_entries(vec![doc("pkg.sub.Alias")], &canon);

        let report = reconcile(&code_inv, &doc_inv);

        assert!(report.good.is_empty());
        assert_eq!(names(&report.undocumented_public), vec!["pkg.real.Thing"]);
    }

    #[test]
    fn test_private_name_flag_is_additive() {
        let table = SymbolTable::new();
        let canon = Canonicalizer::new(&table);

        let code_inv =
            Inventory::from_entries(vec![code("pkg._internal_fn", Annotation::PublicApi)], &canon);
        let report = reconcile(&code_inv, &Inventory::new());

        assert_eq!(names(&report.undocumented_public), vec!["pkg._internal_fn"]);
        assert_eq!(names(&report.public_but_private_name), vec!["pkg._internal_fn"]);
        assert_eq!(
            report.summary(),
            Summary {
                undocumented_public: 1,
                public_but_private_name: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_allowlist_skips_entries() {
        let table = SymbolTable::new();
        let canon = Canonicalizer::new(&table);

        let code_inv = Inventory::from_entries(
            vec![
                code("pkg.ignored", Annotation::PublicApi),
                code("pkg.kept", Annotation::PublicApi),
            ],
            &canon,
        );
        let allowlist: HashSet<String> = ["pkg.ignored".to_string()].into_iter().collect();

        let report = reconcile_with_allowlist(&code_inv, &Inventory::new(), &allowlist);

        assert_eq!(names(&report.undocumented_public), vec!["pkg.kept"]);
    }

    #[test]
    fn test_empty_inventories() {
        let report = reconcile(&Inventory::new(), &Inventory::new());
        assert_eq!(report.summary(), Summary::default());
        assert!(!report.has_drift());
    }
}
