//! Object metadata validation for create and update.

use std::collections::BTreeMap;

use super::names::{
    is_dns1123_label, is_dns1123_subdomain, is_qualified_name, is_valid_label_value,
};
use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::ObjectMeta;

/// Annotation keys and values together may not exceed this many bytes.
pub const TOTAL_ANNOTATION_SIZE_LIMIT_BYTES: usize = 256 * 1024;

/// Validate metadata of an object being created.
///
/// Cluster-scoped objects (`requires_namespace == false`) must not carry a
/// namespace.
pub fn validate_object_meta(
    meta: &ObjectMeta,
    requires_namespace: bool,
    annotation_limit: usize,
    path: &FieldPath,
) -> DiagnosticList {
    let mut errs = DiagnosticList::new();

    if let Some(ref prefix) = meta.generate_name {
        // Generated names get a random suffix; a trailing dash is fine.
        if !prefix.is_empty() {
            let masked = match prefix.strip_suffix('-') {
                Some(stem) => format!("{}a", stem),
                None => prefix.clone(),
            };
            for msg in is_dns1123_subdomain(&masked) {
                errs.push(Diagnostic::invalid(path.child("generateName"), prefix, msg));
            }
        }
    }

    if meta.name.is_empty() {
        if meta.generate_name.as_deref().unwrap_or("").is_empty() {
            errs.push(Diagnostic::required(
                path.child("name"),
                "name or generateName is required",
            ));
        }
    } else {
        for msg in is_dns1123_subdomain(&meta.name) {
            errs.push(Diagnostic::invalid(path.child("name"), &meta.name, msg));
        }
    }

    let namespace = meta.namespace.as_deref().unwrap_or("");
    if requires_namespace {
        if namespace.is_empty() {
            errs.push(Diagnostic::required(path.child("namespace"), ""));
        } else {
            for msg in is_dns1123_label(namespace) {
                errs.push(Diagnostic::invalid(path.child("namespace"), namespace, msg));
            }
        }
    } else if !namespace.is_empty() {
        errs.push(Diagnostic::invalid(
            path.child("namespace"),
            namespace,
            "not allowed on this type",
        ));
    }

    if let Some(generation) = meta.generation {
        if generation < 0 {
            errs.push(Diagnostic::invalid(
                path.child("generation"),
                generation.to_string(),
                "must be greater than or equal to 0",
            ));
        }
    }

    errs.and(validate_labels(&meta.labels, &path.child("labels")))
        .and(validate_annotations(
            &meta.annotations,
            annotation_limit,
            &path.child("annotations"),
        ))
}

/// Validate metadata of an object being updated against its prior version.
pub fn validate_object_meta_update(
    new: &ObjectMeta,
    old: &ObjectMeta,
    annotation_limit: usize,
    path: &FieldPath,
) -> DiagnosticList {
    let mut errs = DiagnosticList::new();

    if new.name != old.name {
        errs.push(Diagnostic::immutable(
            path.child("name"),
            Some(new.name.clone()),
        ));
    }
    immutable_optional(&mut errs, &new.namespace, &old.namespace, path.child("namespace"));
    immutable_optional(&mut errs, &new.uid, &old.uid, path.child("uid"));
    immutable_optional(
        &mut errs,
        &new.creation_timestamp,
        &old.creation_timestamp,
        path.child("creationTimestamp"),
    );

    // Once set, the deletion timestamp may be neither cleared nor moved.
    if old.deletion_timestamp.is_some() {
        immutable_optional(
            &mut errs,
            &new.deletion_timestamp,
            &old.deletion_timestamp,
            path.child("deletionTimestamp"),
        );
    }

    if let Some(generation) = new.generation {
        if generation < 0 {
            errs.push(Diagnostic::invalid(
                path.child("generation"),
                generation.to_string(),
                "must be greater than or equal to 0",
            ));
        }
    }

    errs.and(validate_labels(&new.labels, &path.child("labels")))
        .and(validate_annotations(
            &new.annotations,
            annotation_limit,
            &path.child("annotations"),
        ))
}

fn immutable_optional(
    errs: &mut DiagnosticList,
    new: &Option<String>,
    old: &Option<String>,
    path: FieldPath,
) {
    if new != old {
        errs.push(Diagnostic::immutable(path, new.clone()));
    }
}

/// Label keys must be qualified names and values valid label values.
pub fn validate_labels(labels: &BTreeMap<String, String>, path: &FieldPath) -> DiagnosticList {
    let mut errs = DiagnosticList::new();
    for (key, value) in labels {
        for msg in is_qualified_name(key) {
            errs.push(Diagnostic::invalid(path.clone(), key, msg));
        }
        for msg in is_valid_label_value(value) {
            errs.push(Diagnostic::invalid(path.child(key), value, msg));
        }
    }
    errs
}

/// Annotation keys must be qualified names (case-insensitively) and the
/// total size of keys and values must stay within `limit` bytes.
pub fn validate_annotations(
    annotations: &BTreeMap<String, String>,
    limit: usize,
    path: &FieldPath,
) -> DiagnosticList {
    let mut errs = DiagnosticList::new();
    let mut total = 0usize;
    for (key, value) in annotations {
        for msg in is_qualified_name(&key.to_lowercase()) {
            errs.push(Diagnostic::invalid(path.clone(), key, msg));
        }
        total += key.len() + value.len();
    }
    if total > limit {
        errs.push(Diagnostic::invalid(
            path.clone(),
            "",
            format!("must have at most {} bytes", limit),
        ));
    }
    errs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ErrorKind;

    fn meta(name: &str) -> ObjectMeta {
        ObjectMeta {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn path() -> FieldPath {
        FieldPath::new("metadata")
    }

    #[test]
    fn test_valid_cluster_scoped_meta() {
        let errs = validate_object_meta(&meta("aws-eu1"), false, 1024, &path());
        assert!(errs.is_empty(), "{}", errs.to_aggregate_string());
    }

    #[test]
    fn test_name_required_without_generate_name() {
        let errs = validate_object_meta(&meta(""), false, 1024, &path());
        assert_eq!(errs.len(), 1);
        let d = errs.iter().next().unwrap();
        assert_eq!(d.field_path.as_str(), "metadata.name");
        assert_eq!(d.kind, ErrorKind::Required);
    }

    #[test]
    fn test_generate_name_satisfies_name() {
        let mut m = meta("");
        m.generate_name = Some("seed-".to_string());
        assert!(validate_object_meta(&m, false, 1024, &path()).is_empty());
    }

    #[test]
    fn test_invalid_name() {
        let errs = validate_object_meta(&meta("Not_Valid"), false, 1024, &path());
        assert_eq!(errs.at_path("metadata.name").count(), 1);
    }

    #[test]
    fn test_namespace_rejected_for_cluster_scoped() {
        let mut m = meta("seed");
        m.namespace = Some("garden".to_string());
        let errs = validate_object_meta(&m, false, 1024, &path());
        let d = errs.at_path("metadata.namespace").next().unwrap();
        assert_eq!(d.kind, ErrorKind::Invalid);
        assert_eq!(d.message, "not allowed on this type");
    }

    #[test]
    fn test_namespace_required_for_namespaced() {
        let errs = validate_object_meta(&meta("seed"), true, 1024, &path());
        assert_eq!(errs.of_kind(ErrorKind::Required).count(), 1);
    }

    #[test]
    fn test_labels_and_annotations() {
        let mut m = meta("seed");
        m.labels.insert("bad key!".to_string(), "ok".to_string());
        m.labels.insert("good".to_string(), "bad value!".to_string());
        m.annotations
            .insert("Example.COM/Owner".to_string(), "x".to_string());
        let errs = validate_object_meta(&m, false, 1024, &path());
        assert_eq!(errs.at_path("metadata.labels").count(), 1);
        assert_eq!(errs.at_path("metadata.labels.good").count(), 1);
        assert_eq!(errs.at_path("metadata.annotations").count(), 0);
    }

    #[test]
    fn test_annotation_size_limit() {
        let mut annotations = BTreeMap::new();
        annotations.insert("k".to_string(), "v".repeat(10));
        assert!(validate_annotations(&annotations, 11, &path()).is_empty());
        assert_eq!(validate_annotations(&annotations, 10, &path()).len(), 1);
    }

    #[test]
    fn test_update_immutable_fields() {
        let mut old = meta("seed");
        old.uid = Some("1234".to_string());
        old.creation_timestamp = Some("2024-01-01T00:00:00Z".to_string());
        let mut new = old.clone();
        assert!(validate_object_meta_update(&new, &old, 1024, &path()).is_empty());

        new.name = "other".to_string();
        new.uid = Some("5678".to_string());
        let errs = validate_object_meta_update(&new, &old, 1024, &path());
        let paths: Vec<&str> = errs.iter().map(|d| d.field_path.as_str()).collect();
        assert_eq!(paths, vec!["metadata.name", "metadata.uid"]);
        assert!(errs.iter().all(|d| d.kind == ErrorKind::Immutable));
    }

    #[test]
    fn test_update_deletion_timestamp_cannot_be_cleared() {
        let mut old = meta("seed");
        let mut new = old.clone();
        new.deletion_timestamp = Some("2024-01-01T00:00:00Z".to_string());
        assert!(validate_object_meta_update(&new, &old, 1024, &path()).is_empty());

        old.deletion_timestamp = new.deletion_timestamp.take();
        let errs = validate_object_meta_update(&new, &old, 1024, &path());
        assert_eq!(errs.at_path("metadata.deletionTimestamp").count(), 1);
    }
}
