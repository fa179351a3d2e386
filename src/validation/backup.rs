//! Backup configuration consistency.

use crate::apimachinery::SharedValidators;
use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::SeedBackup;

/// Validate the optional backup block against the seed's own provider type.
///
/// A backup hosted on a different provider than the seed must name its
/// region explicitly.
pub fn validate_backup<V: SharedValidators + ?Sized>(
    shared: &V,
    backup: Option<&SeedBackup>,
    seed_provider_type: &str,
    path: &FieldPath,
) -> DiagnosticList {
    let Some(backup) = backup else {
        return DiagnosticList::new();
    };

    let mut errs = DiagnosticList::new();

    if backup.provider.is_empty() {
        errs.push(Diagnostic::required(
            path.child("provider"),
            "must provide a backup cloud provider name",
        ));
    }

    let region_missing = backup.region.as_deref().map_or(true, str::is_empty);
    if backup.provider != seed_provider_type && region_missing {
        errs.push(Diagnostic::invalid(
            path.child("region"),
            "",
            "region must be specified if backup provider is different from provider used in `spec.provider`",
        ));
    }

    errs.and(shared.secret_reference(&backup.secret_ref, &path.child("secretRef")))
}
