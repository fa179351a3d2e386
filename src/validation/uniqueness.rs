//! Duplicate detection over ordered sequences.

use std::collections::HashSet;
use std::hash::Hash;

use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::{SeedTaint, SeedVolumeProvider};

/// Walk the sequence once, reporting each item's own presence problems and
/// then whether its key was already seen earlier.
///
/// `presence` checks the item's mandatory sub-fields, `key` extracts its
/// identity, `path` maps an index to the path a duplicate is reported at and
/// `render` produces the reported value. The first occurrence of a key is
/// never reported, and presence problems never suppress the key check.
pub fn validate_unique<'a, T, K, FQ, FK, FP, FR>(
    items: &'a [T],
    presence: FQ,
    key: FK,
    path: FP,
    render: FR,
) -> DiagnosticList
where
    K: Eq + Hash,
    FQ: Fn(usize, &T) -> DiagnosticList,
    FK: Fn(&'a T) -> K,
    FP: Fn(usize) -> FieldPath,
    FR: Fn(&T) -> String,
{
    let mut seen = HashSet::with_capacity(items.len());
    let mut errs = DiagnosticList::new();

    for (i, item) in items.iter().enumerate() {
        errs = errs.and(presence(i, item));
        if !seen.insert(key(item)) {
            errs.push(Diagnostic::duplicate(path(i), render(item)));
        }
    }

    errs
}

/// Taints: a non-empty key, and `(key, value)` uniqueness.
///
/// The identity pairs the key with the optional value, so a taint without a
/// value never collides with one that has a value, and `a=b` with no value
/// never collides with key `a` and value `b`.
pub fn validate_taints(taints: &[SeedTaint], path: &FieldPath) -> DiagnosticList {
    validate_unique(
        taints,
        |i, t| {
            if t.key.is_empty() {
                Diagnostic::required(path.index(i).child("key"), "cannot be empty").into()
            } else {
                DiagnosticList::new()
            }
        },
        |t| (t.key.as_str(), t.value.as_deref()),
        |i| path.index(i),
        SeedTaint::id,
    )
}

/// Volume providers: non-empty purpose and name, and purpose uniqueness.
pub fn validate_volume_providers(
    providers: &[SeedVolumeProvider],
    path: &FieldPath,
) -> DiagnosticList {
    validate_unique(
        providers,
        |i, p| {
            let idx_path = path.index(i);
            let mut errs = DiagnosticList::new();
            if p.purpose.is_empty() {
                errs.push(Diagnostic::required(idx_path.child("purpose"), "cannot be empty"));
            }
            if p.name.is_empty() {
                errs.push(Diagnostic::required(idx_path.child("name"), "cannot be empty"));
            }
            errs
        },
        |p| p.purpose.as_str(),
        |i| path.index(i).child("purpose"),
        |p| p.purpose.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ErrorKind;

    fn taint(key: &str, value: Option<&str>) -> SeedTaint {
        SeedTaint {
            key: key.to_string(),
            value: value.map(str::to_string),
        }
    }

    fn provider(purpose: &str, name: &str) -> SeedVolumeProvider {
        SeedVolumeProvider {
            purpose: purpose.to_string(),
            name: name.to_string(),
        }
    }

    fn taints_path() -> FieldPath {
        FieldPath::new("spec").child("taints")
    }

    #[test]
    fn test_validate_unique_reports_later_occurrences() {
        let items = vec!["a", "b", "a", "a"];
        let errs = validate_unique(
            &items,
            |_, _| DiagnosticList::new(),
            |s| *s,
            |i| FieldPath::new("items").index(i),
            |s| s.to_string(),
        );
        let paths: Vec<&str> = errs.iter().map(|d| d.field_path.as_str()).collect();
        assert_eq!(paths, vec!["items[2]", "items[3]"]);
    }

    #[test]
    fn test_duplicate_taint_reported_at_second_index() {
        let taints = vec![
            taint("protected", Some("true")),
            taint("other", None),
            taint("protected", Some("true")),
        ];
        let errs = validate_taints(&taints, &taints_path());
        assert_eq!(errs.len(), 1);
        let d = errs.iter().next().unwrap();
        assert_eq!(d.kind, ErrorKind::Duplicate);
        assert_eq!(d.field_path.as_str(), "spec.taints[2]");
        assert_eq!(d.bad_value.as_deref(), Some("protected=true"));
    }

    #[test]
    fn test_taint_value_is_part_of_identity() {
        let taints = vec![
            taint("protected", None),
            taint("protected", Some("")),
            taint("protected", Some("true")),
        ];
        assert!(validate_taints(&taints, &taints_path()).is_empty());
    }

    #[test]
    fn test_taint_identity_does_not_collide_on_separator() {
        let taints = vec![taint("a=b", None), taint("a", Some("b"))];
        assert!(validate_taints(&taints, &taints_path()).is_empty());
    }

    #[test]
    fn test_empty_taint_key_still_checked_for_duplicates() {
        let taints = vec![taint("", None), taint("", None)];
        let errs = validate_taints(&taints, &taints_path());
        let kinds: Vec<ErrorKind> = errs.iter().map(|d| d.kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Required, ErrorKind::Required, ErrorKind::Duplicate]
        );
    }

    #[test]
    fn test_duplicate_volume_purpose() {
        let providers = vec![
            provider("etcd-main", "flexvolume"),
            provider("etcd-main", "csi"),
        ];
        let path = FieldPath::new("spec").children(&["volume", "providers"]);
        let errs = validate_volume_providers(&providers, &path);
        assert_eq!(errs.len(), 1);
        let d = errs.iter().next().unwrap();
        assert_eq!(d.field_path.as_str(), "spec.volume.providers[1].purpose");
        assert_eq!(d.bad_value.as_deref(), Some("etcd-main"));
    }

    #[test]
    fn test_volume_provider_required_fields() {
        let providers = vec![provider("", "")];
        let path = FieldPath::new("spec").children(&["volume", "providers"]);
        let errs = validate_volume_providers(&providers, &path);
        let paths: Vec<&str> = errs.iter().map(|d| d.field_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "spec.volume.providers[0].purpose",
                "spec.volume.providers[0].name"
            ]
        );
    }

    #[test]
    fn test_taint_findings_follow_index_order() {
        let taints = vec![taint("a", None), taint("a", None), taint("", None)];
        let errs = validate_taints(&taints, &taints_path());
        let found: Vec<(&str, ErrorKind)> =
            errs.iter().map(|d| (d.field_path.as_str(), d.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("spec.taints[1]", ErrorKind::Duplicate),
                ("spec.taints[2].key", ErrorKind::Required),
            ]
        );
    }

    #[test]
    fn test_volume_provider_findings_follow_index_order() {
        let providers = vec![provider("x", "a"), provider("x", "b"), provider("y", "")];
        let path = FieldPath::new("spec").children(&["volume", "providers"]);
        let errs = validate_volume_providers(&providers, &path);
        let found: Vec<(&str, ErrorKind)> =
            errs.iter().map(|d| (d.field_path.as_str(), d.kind)).collect();
        assert_eq!(
            found,
            vec![
                ("spec.volume.providers[1].purpose", ErrorKind::Duplicate),
                ("spec.volume.providers[2].name", ErrorKind::Required),
            ]
        );
    }
}
