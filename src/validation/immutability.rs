//! Immutability of seed spec fields across updates.
//!
//! Frozen fields are listed in [`FROZEN_FIELDS`]. Each entry names the field,
//! the rule that governs it and how to read it from a spec. Adding a frozen
//! field means adding a table entry.

use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::{SeedBackup, SeedSpec};

/// How a field may change between the prior and the proposed spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Never changes once the resource exists
    Always,
    /// Free while unset; frozen (including against removal) once set
    OnceSet,
    /// Not compared
    NoCheck,
}

/// A field value as seen by the comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frozen<'a> {
    Absent,
    Text(&'a str),
    /// A record whose children are compared one by one when both sides are
    /// present.
    Record(Vec<FrozenChild<'a>>),
}

/// A named child of a [`Frozen::Record`], with its own rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenChild<'a> {
    pub name: &'static str,
    pub rule: Rule,
    pub value: Frozen<'a>,
}

impl<'a> Frozen<'a> {
    fn from_option(value: Option<&'a str>) -> Self {
        value.map_or(Frozen::Absent, Frozen::Text)
    }

    fn is_absent(&self) -> bool {
        matches!(self, Frozen::Absent)
    }

    /// Value echoed in the diagnostic. A record is only ever reported whole
    /// when it was removed, so only text values are echoed.
    fn render(&self) -> Option<String> {
        match self {
            Frozen::Text(s) => Some(s.to_string()),
            Frozen::Absent | Frozen::Record(_) => None,
        }
    }
}

/// One row of the frozen-field table.
pub struct FrozenField {
    pub path: &'static [&'static str],
    pub rule: Rule,
    pub read: for<'a> fn(&'a SeedSpec) -> Frozen<'a>,
}

fn read_pods(spec: &SeedSpec) -> Frozen<'_> {
    Frozen::Text(&spec.networks.pods)
}

fn read_services(spec: &SeedSpec) -> Frozen<'_> {
    Frozen::Text(&spec.networks.services)
}

fn read_nodes(spec: &SeedSpec) -> Frozen<'_> {
    Frozen::from_option(spec.networks.nodes.as_deref())
}

fn read_backup(spec: &SeedSpec) -> Frozen<'_> {
    spec.backup.as_ref().map_or(Frozen::Absent, backup_record)
}

fn backup_record(backup: &SeedBackup) -> Frozen<'_> {
    Frozen::Record(vec![
        FrozenChild {
            name: "provider",
            rule: Rule::Always,
            value: Frozen::Text(&backup.provider),
        },
        FrozenChild {
            name: "region",
            rule: Rule::Always,
            value: Frozen::from_option(backup.region.as_deref()),
        },
        FrozenChild {
            name: "secretRef",
            rule: Rule::NoCheck,
            value: Frozen::Text(&backup.secret_ref.name),
        },
    ])
}

/// Frozen fields of a seed spec, in declaration order.
pub const FROZEN_FIELDS: &[FrozenField] = &[
    FrozenField {
        path: &["networks", "pods"],
        rule: Rule::Always,
        read: read_pods,
    },
    FrozenField {
        path: &["networks", "services"],
        rule: Rule::Always,
        read: read_services,
    },
    FrozenField {
        path: &["networks", "nodes"],
        rule: Rule::OnceSet,
        read: read_nodes,
    },
    FrozenField {
        path: &["backup"],
        rule: Rule::OnceSet,
        read: read_backup,
    },
];

/// Compare one value pair under `rule`, appending any violation.
fn compare(
    errs: &mut DiagnosticList,
    path: FieldPath,
    rule: Rule,
    old: &Frozen<'_>,
    new: &Frozen<'_>,
) {
    match rule {
        Rule::NoCheck => return,
        Rule::OnceSet if old.is_absent() => return,
        Rule::Always | Rule::OnceSet => {}
    }

    match (old, new) {
        // Both records present: children carry their own rules.
        (Frozen::Record(old_children), Frozen::Record(new_children)) => {
            for (o, n) in old_children.iter().zip(new_children) {
                compare(errs, path.child(o.name), o.rule, &o.value, &n.value);
            }
        }
        _ if old != new => errs.push(Diagnostic::immutable(path, new.render())),
        _ => {}
    }
}

/// Validate that no frozen field of `old` is changed by `new`.
///
/// Every violation is reported; nothing short-circuits.
pub fn validate_spec_update(new: &SeedSpec, old: &SeedSpec, path: &FieldPath) -> DiagnosticList {
    let mut errs = DiagnosticList::new();
    for field in FROZEN_FIELDS {
        compare(
            &mut errs,
            path.children(field.path),
            field.rule,
            &(field.read)(old),
            &(field.read)(new),
        );
    }
    log::trace!("immutability checks at {}: {} diagnostics", path, errs.len());
    errs
}
