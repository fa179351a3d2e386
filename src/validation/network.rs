//! CIDR parsing and overlap checks for the seed network block.

use crate::cidr::Cidr;
use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::SeedNetworks;

/// A declared CIDR together with the path it was declared at.
struct DeclaredCidr<'a> {
    path: FieldPath,
    value: &'a str,
}

/// Collect declared blocks in declaration order. Optional blocks take part
/// only when present.
fn declared_cidrs<'a>(networks: &'a SeedNetworks, path: &FieldPath) -> Vec<DeclaredCidr<'a>> {
    let mut declared = vec![
        DeclaredCidr {
            path: path.child("pods"),
            value: &networks.pods,
        },
        DeclaredCidr {
            path: path.child("services"),
            value: &networks.services,
        },
    ];

    if let Some(ref nodes) = networks.nodes {
        declared.push(DeclaredCidr {
            path: path.child("nodes"),
            value: nodes,
        });
    }

    if let Some(ref defaults) = networks.shoot_defaults {
        if let Some(ref pods) = defaults.pods {
            declared.push(DeclaredCidr {
                path: path.children(&["shootDefaults", "pods"]),
                value: pods,
            });
        }
        if let Some(ref services) = defaults.services {
            declared.push(DeclaredCidr {
                path: path.children(&["shootDefaults", "services"]),
                value: services,
            });
        }
    }

    declared
}

/// Validate every declared CIDR parses and that no two parsed blocks
/// overlap.
///
/// Unparsable entries are reported once and left out of overlap checking.
/// Each overlapping pair is reported once, at the earlier entry's path.
pub fn validate_networks(networks: &SeedNetworks, path: &FieldPath) -> DiagnosticList {
    let mut errs = DiagnosticList::new();
    let mut parsed: Vec<(DeclaredCidr<'_>, Cidr)> = Vec::new();

    for declared in declared_cidrs(networks, path) {
        match Cidr::parse(declared.value) {
            Ok(cidr) => parsed.push((declared, cidr)),
            Err(e) => errs.push(Diagnostic::invalid(
                declared.path.clone(),
                declared.value,
                e.to_string(),
            )),
        }
    }

    for (i, (left, left_cidr)) in parsed.iter().enumerate() {
        for (right, right_cidr) in &parsed[i + 1..] {
            if left_cidr.overlaps(right_cidr) {
                errs.push(Diagnostic::invalid(
                    left.path.clone(),
                    left.value,
                    format!("must not overlap with {:?} ({:?})", right.path.as_str(), right.value),
                ));
            }
        }
    }

    log::trace!("network validation at {}: {} diagnostics", path, errs.len());
    errs
}
