//! Seed validation pipelines: create, update and status update.
//!
//! Every pipeline runs all of its checks and concatenates their diagnostics
//! in field declaration order. Nothing short-circuits, so a single call
//! reports every problem with a Seed.
//!
//! # Example
//!
//! ```
//! use seedcheck::seed::Seed;
//! use seedcheck::validation::validate_seed;
//!
//! let seed = Seed::parse(r#"
//! metadata:
//!   name: aws-eu1
//! spec:
//!   provider: {type: aws, region: ""}
//!   dns: {ingressDomain: ingress.example.com}
//!   networks: {pods: 100.96.0.0/11, services: 100.64.0.0/13}
//! "#).unwrap();
//!
//! let errs = validate_seed(&seed);
//! assert_eq!(errs.len(), 1);
//! assert_eq!(errs.iter().next().unwrap().field_path.as_str(), "spec.provider.region");
//! ```

use crate::apimachinery::{Apimachinery, SharedValidators};
use crate::field::{Diagnostic, DiagnosticList, FieldPath};
use crate::seed::{Seed, SeedSpec};

pub mod backup;
pub mod immutability;
pub mod network;
pub mod uniqueness;

pub use immutability::{Rule, FROZEN_FIELDS};

/// Seeds are cluster-scoped.
const SEED_REQUIRES_NAMESPACE: bool = false;

/// Runs the Seed pipelines against a set of shared validators.
#[derive(Debug, Clone, Default)]
pub struct SeedValidator<V = Apimachinery> {
    shared: V,
}

impl SeedValidator<Apimachinery> {
    /// Validator backed by the standard shared validators.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: SharedValidators> SeedValidator<V> {
    /// Validator backed by custom shared validators.
    pub fn with_shared(shared: V) -> Self {
        Self { shared }
    }

    pub fn shared(&self) -> &V {
        &self.shared
    }

    /// Validate a Seed being created.
    pub fn validate_create(&self, seed: &Seed) -> DiagnosticList {
        let errs = self
            .shared
            .object_meta(&seed.metadata, SEED_REQUIRES_NAMESPACE, &FieldPath::new("metadata"))
            .and(self.validate_spec(&seed.spec, &FieldPath::new("spec")));

        log::debug!(
            "create validation of seed {}: {} diagnostics",
            seed.display_name(),
            errs.len()
        );
        errs
    }

    /// Validate a Seed update: metadata transitions, frozen spec fields, then
    /// the full create pipeline against the new Seed.
    pub fn validate_update(&self, new: &Seed, old: &Seed) -> DiagnosticList {
        let errs = self
            .shared
            .object_meta_update(&new.metadata, &old.metadata, &FieldPath::new("metadata"))
            .and(self.validate_spec_update(&new.spec, &old.spec, &FieldPath::new("spec")))
            .and(self.validate_create(new));

        log::debug!(
            "update validation of seed {}: {} diagnostics",
            new.display_name(),
            errs.len()
        );
        errs
    }

    /// Validate a status update. Only metadata transitions are checked; the
    /// spec is not looked at.
    pub fn validate_status_update(&self, new: &Seed, old: &Seed) -> DiagnosticList {
        let errs = self.shared.object_meta_update(
            &new.metadata,
            &old.metadata,
            &FieldPath::new("metadata"),
        );

        log::debug!(
            "status update validation of seed {}: {} diagnostics",
            new.display_name(),
            errs.len()
        );
        errs
    }

    /// Validate a Seed spec on its own.
    pub fn validate_spec(&self, spec: &SeedSpec, path: &FieldPath) -> DiagnosticList {
        let mut errs = DiagnosticList::new();

        let provider_path = path.child("provider");
        if spec.provider.r#type.is_empty() {
            errs.push(Diagnostic::required(
                provider_path.child("type"),
                "must provide a provider type",
            ));
        }
        if spec.provider.region.is_empty() {
            errs.push(Diagnostic::required(
                provider_path.child("region"),
                "must provide a provider region",
            ));
        }

        errs = errs.and(self.shared.dns1123_subdomain(
            &spec.dns.ingress_domain,
            &path.children(&["dns", "ingressDomain"]),
        ));

        if let Some(ref secret_ref) = spec.secret_ref {
            errs = errs.and(self.shared.secret_reference(secret_ref, &path.child("secretRef")));
        }

        errs = errs
            .and(network::validate_networks(&spec.networks, &path.child("networks")))
            .and(backup::validate_backup(
                &self.shared,
                spec.backup.as_ref(),
                &spec.provider.r#type,
                &path.child("backup"),
            ))
            .and(uniqueness::validate_taints(&spec.taints, &path.child("taints")));

        if let Some(ref volume) = spec.volume {
            if let Some(ref minimum_size) = volume.minimum_size {
                errs = errs.and(self.shared.resource_quantity(
                    "minimumSize",
                    minimum_size,
                    &path.children(&["volume", "minimumSize"]),
                ));
            }
            errs = errs.and(uniqueness::validate_volume_providers(
                &volume.providers,
                &path.children(&["volume", "providers"]),
            ));
        }

        if let Some(lb) = spec
            .settings
            .as_ref()
            .and_then(|s| s.load_balancer_services.as_ref())
        {
            errs = errs.and(self.shared.annotations(
                &lb.annotations,
                &path.children(&["settings", "loadBalancerServices", "annotations"]),
            ));
        }

        errs
    }

    /// Validate frozen fields of a spec update.
    pub fn validate_spec_update(
        &self,
        new: &SeedSpec,
        old: &SeedSpec,
        path: &FieldPath,
    ) -> DiagnosticList {
        immutability::validate_spec_update(new, old, path)
    }
}

/// Validate a Seed being created, using the standard shared validators.
pub fn validate_seed(seed: &Seed) -> DiagnosticList {
    SeedValidator::new().validate_create(seed)
}

/// Validate a Seed update, using the standard shared validators.
pub fn validate_seed_update(new: &Seed, old: &Seed) -> DiagnosticList {
    SeedValidator::new().validate_update(new, old)
}

/// Validate a Seed status update, using the standard shared validators.
pub fn validate_seed_status_update(new: &Seed, old: &Seed) -> DiagnosticList {
    SeedValidator::new().validate_status_update(new, old)
}

/// Validate a Seed spec on its own, using the standard shared validators.
pub fn validate_seed_spec(spec: &SeedSpec, path: &FieldPath) -> DiagnosticList {
    SeedValidator::new().validate_spec(spec, path)
}

/// Validate frozen fields of a Seed spec update.
pub fn validate_seed_spec_update(
    new: &SeedSpec,
    old: &SeedSpec,
    path: &FieldPath,
) -> DiagnosticList {
    immutability::validate_spec_update(new, old, path)
}
