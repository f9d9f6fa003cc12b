//! @ai:module:intent Extract API references from autosummary/autoclass directives in doc sources
//! @ai:module:layer application
//! @ai:module:public_api extract_references, parse_file, References, RawReference
//! @ai:module:depends_on entry, error
//! @ai:module:stateless true
//!
//! Three directives are recognized, always at column 0:
//!
//! ```rst
//! .. currentmodule:: pkg.mod
//!
//! .. autoclass:: ~pkg.Widget
//!
//! .. autosummary::
//!     :nosignatures:
//!
//!     Widget.render
//!     ~pkg.helpers.make_widget
//! ```

use crate::entry::{ApiEntry, ApiKind};
use crate::error::{Error, Result};
use regex::Regex;
use serde::Serialize;
use std::path::Path;
use std::str::Lines;
use std::sync::OnceLock;

/// Renders only the short name in Sphinx output; irrelevant for identity.
const SHORTEN_MARKER: char = '~';
const OPTION_MARKER: char = ':';

/// @ai:intent An API reference as written in a document, before canonicalization
#[derive(Debug, Clone, Serialize)]
pub struct RawReference {
    #[serde(flatten)]
    pub entry: ApiEntry,
    /// 1-based line of the directive or reference line that produced it
    pub line: usize,
}

impl RawReference {
    pub fn into_entry(self) -> ApiEntry {
        self.entry
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    CurrentModule,
    AutoSummary,
    AutoClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    InsideListBlock,
}

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\.\. (currentmodule|autosummary|autoclass)::(.*)$").expect("Invalid regex")
    })
}

/// @ai:intent Match a column-0 directive line, returning the directive and its argument text
/// @ai:effects pure
fn match_directive(line: &str) -> Option<(Directive, &str)> {
    let captures = directive_regex().captures(line)?;
    let directive = match captures.get(1)?.as_str() {
        "currentmodule" => Directive::CurrentModule,
        "autosummary" => Directive::AutoSummary,
        "autoclass" => Directive::AutoClass,
        _ => return None,
    };
    let argument = captures.get(2).map_or("", |m| m.as_str());

    Some((directive, argument))
}

/// @ai:intent Check if a line ends an autosummary block (non-blank and not indented)
/// @ai:effects pure
fn ends_list_block(line: &str) -> bool {
    !line.trim().is_empty() && !line.starts_with(char::is_whitespace)
}

/// @ai:intent Lazy iterator over the references of a single document
///
/// Holds at most one line of lookahead: the line that terminated an
/// autosummary block is parked in `pending` and re-examined while scanning.
#[derive(Debug)]
pub struct References<'a> {
    lines: std::iter::Enumerate<Lines<'a>>,
    pending: Option<(usize, &'a str)>,
    namespace: Option<String>,
    state: State,
}

/// @ai:intent Start extracting references from the text of one document
/// @ai:post every call starts with no current namespace
/// @ai:effects pure
pub fn extract_references(text: &str) -> References<'_> {
    References {
        lines: text.lines().enumerate(),
        pending: None,
        namespace: None,
        state: State::Scanning,
    }
}

impl<'a> References<'a> {
    /// The namespace that applies to the next directive.
    pub fn current_namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        self.pending.take().or_else(|| self.lines.next())
    }

    fn reference(&self, identifier: &str, kind: ApiKind, line: usize) -> Option<RawReference> {
        let identifier = identifier.strip_prefix(SHORTEN_MARKER).unwrap_or(identifier);
        if identifier.is_empty() {
            tracing::debug!(line, "skipping directive without identifier");
            return None;
        }

        let name = match &self.namespace {
            Some(namespace) => format!("{namespace}.{identifier}"),
            None => identifier.to_string(),
        };

        match ApiEntry::documented(name, kind) {
            Some(entry) => Some(RawReference { entry, line }),
            None => {
                tracing::debug!(line, identifier, "skipping malformed reference");
                None
            }
        }
    }

    fn scan(&mut self, line: &str, line_number: usize) -> Option<RawReference> {
        let (directive, argument) = match_directive(line)?;

        match directive {
            Directive::CurrentModule => {
                let namespace = argument.trim();
                self.namespace = match namespace {
                    "" | "None" => None,
                    _ => Some(namespace.to_string()),
                };
                None
            }
            Directive::AutoClass => self.reference(argument.trim(), ApiKind::Class, line_number),
            Directive::AutoSummary => {
                self.state = State::InsideListBlock;
                None
            }
        }
    }

    fn list_item(&self, line: &str, line_number: usize) -> Option<RawReference> {
        let content = line.trim();
        if content.is_empty() || content.starts_with(OPTION_MARKER) {
            return None;
        }

        self.reference(content, ApiKind::Function, line_number)
    }
}

impl Iterator for References<'_> {
    type Item = RawReference;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, line) = self.next_line()?;
            let line_number = index + 1;

            let produced = match self.state {
                State::Scanning => self.scan(line, line_number),
                State::InsideListBlock if ends_list_block(line) => {
                    self.state = State::Scanning;
                    self.pending = Some((index, line));
                    None
                }
                State::InsideListBlock => self.list_item(line, line_number),
            };

            if produced.is_some() {
                return produced;
            }
        }
    }
}

/// @ai:intent Read a documentation file and extract all of its references
/// @ai:post a missing file yields an empty list rather than an error
/// @ai:effects fs:read
pub fn parse_file(path: &Path) -> Result<Vec<RawReference>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "document does not exist, contributing no references");
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let references: Vec<RawReference> = extract_references(&content).collect();
    tracing::debug!(
        path = %path.display(),
        count = references.len(),
        "parsed document"
    );

    Ok(references)
}
