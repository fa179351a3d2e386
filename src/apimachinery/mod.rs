//! Shared validators used by the Seed checks.
//!
//! These cover concerns every resource type has in common: object metadata,
//! DNS names, secret references, resource quantities and annotations. The
//! Seed validators only call them through [`SharedValidators`], so an
//! embedding application can substitute its own rules.

use std::collections::BTreeMap;

use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::{ObjectMeta, SecretReference};

pub mod metadata;
pub mod names;
pub mod quantity;

pub use metadata::TOTAL_ANNOTATION_SIZE_LIMIT_BYTES;
pub use quantity::Quantity;

/// Validators shared across resource types.
///
/// Every method returns diagnostics in the same shape as the Seed
/// validators so results merge transparently.
pub trait SharedValidators {
    /// Metadata of an object being created.
    fn object_meta(
        &self,
        meta: &ObjectMeta,
        requires_namespace: bool,
        path: &FieldPath,
    ) -> DiagnosticList;

    /// Metadata of an object being updated.
    fn object_meta_update(
        &self,
        new: &ObjectMeta,
        old: &ObjectMeta,
        path: &FieldPath,
    ) -> DiagnosticList;

    /// A required DNS-1123 subdomain.
    fn dns1123_subdomain(&self, value: &str, path: &FieldPath) -> DiagnosticList;

    /// A secret reference with name and namespace.
    fn secret_reference(&self, secret_ref: &SecretReference, path: &FieldPath) -> DiagnosticList;

    /// A non-negative resource quantity. `key` names the resource in messages.
    fn resource_quantity(&self, key: &str, value: &str, path: &FieldPath) -> DiagnosticList;

    /// Annotation keys and total size.
    fn annotations(&self, annotations: &BTreeMap<String, String>, path: &FieldPath)
        -> DiagnosticList;
}

/// Standard implementation of [`SharedValidators`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apimachinery {
    annotation_size_limit: usize,
}

impl Default for Apimachinery {
    fn default() -> Self {
        Self {
            annotation_size_limit: TOTAL_ANNOTATION_SIZE_LIMIT_BYTES,
        }
    }
}

impl Apimachinery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the total annotation size limit in bytes.
    pub fn with_annotation_size_limit(mut self, limit: usize) -> Self {
        self.annotation_size_limit = limit;
        self
    }

    pub fn annotation_size_limit(&self) -> usize {
        self.annotation_size_limit
    }
}

impl SharedValidators for Apimachinery {
    fn object_meta(
        &self,
        meta: &ObjectMeta,
        requires_namespace: bool,
        path: &FieldPath,
    ) -> DiagnosticList {
        metadata::validate_object_meta(meta, requires_namespace, self.annotation_size_limit, path)
    }

    fn object_meta_update(
        &self,
        new: &ObjectMeta,
        old: &ObjectMeta,
        path: &FieldPath,
    ) -> DiagnosticList {
        metadata::validate_object_meta_update(new, old, self.annotation_size_limit, path)
    }

    fn dns1123_subdomain(&self, value: &str, path: &FieldPath) -> DiagnosticList {
        if value.is_empty() {
            return Diagnostic::required(path.clone(), "must provide a value").into();
        }
        names::is_dns1123_subdomain(value)
            .into_iter()
            .map(|msg| Diagnostic::invalid(path.clone(), value, msg))
            .collect()
    }

    fn secret_reference(&self, secret_ref: &SecretReference, path: &FieldPath) -> DiagnosticList {
        let mut errs = DiagnosticList::new();
        if secret_ref.name.is_empty() {
            errs.push(Diagnostic::required(path.child("name"), "must provide a name"));
        }
        if secret_ref.namespace.is_empty() {
            errs.push(Diagnostic::required(
                path.child("namespace"),
                "must provide a namespace",
            ));
        }
        errs
    }

    fn resource_quantity(&self, key: &str, value: &str, path: &FieldPath) -> DiagnosticList {
        match Quantity::parse(value) {
            Err(e) => Diagnostic::invalid(path.clone(), value, e.to_string()).into(),
            Ok(q) if q.is_negative() => Diagnostic::invalid(
                path.clone(),
                value,
                format!("{} must be greater than or equal to 0", key),
            )
            .into(),
            Ok(_) => DiagnosticList::new(),
        }
    }

    fn annotations(
        &self,
        annotations: &BTreeMap<String, String>,
        path: &FieldPath,
    ) -> DiagnosticList {
        metadata::validate_annotations(annotations, self.annotation_size_limit, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ErrorKind;

    fn path() -> FieldPath {
        FieldPath::new("spec").child("x")
    }

    #[test]
    fn test_dns1123_subdomain_empty_is_required() {
        let errs = Apimachinery::new().dns1123_subdomain("", &path());
        assert_eq!(errs.of_kind(ErrorKind::Required).count(), 1);
    }

    #[test]
    fn test_dns1123_subdomain_invalid() {
        let errs = Apimachinery::new().dns1123_subdomain("Not.Valid", &path());
        assert_eq!(errs.len(), 1);
        assert_eq!(errs.iter().next().unwrap().bad_value.as_deref(), Some("Not.Valid"));
    }

    #[test]
    fn test_secret_reference() {
        let v = Apimachinery::new();
        let ok = SecretReference {
            name: "s".to_string(),
            namespace: "garden".to_string(),
        };
        assert!(v.secret_reference(&ok, &path()).is_empty());

        let errs = v.secret_reference(&SecretReference::default(), &path());
        let paths: Vec<&str> = errs.iter().map(|d| d.field_path.as_str()).collect();
        assert_eq!(paths, vec!["spec.x.name", "spec.x.namespace"]);
    }

    #[test]
    fn test_resource_quantity() {
        let v = Apimachinery::new();
        assert!(v.resource_quantity("minimumSize", "20Gi", &path()).is_empty());

        let errs = v.resource_quantity("minimumSize", "-1Gi", &path());
        assert_eq!(
            errs.iter().next().unwrap().message,
            "minimumSize must be greater than or equal to 0"
        );

        let errs = v.resource_quantity("minimumSize", "lots", &path());
        assert_eq!(errs.of_kind(ErrorKind::Invalid).count(), 1);
    }

    #[test]
    fn test_annotation_limit_override() {
        let v = Apimachinery::new().with_annotation_size_limit(4);
        let mut annotations = BTreeMap::new();
        annotations.insert("key".to_string(), "value".to_string());
        assert_eq!(v.annotations(&annotations, &path()).len(), 1);
        assert!(Apimachinery::new().annotations(&annotations, &path()).is_empty());
    }
}
