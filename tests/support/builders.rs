use seedcheck::seed::{
    ObjectMeta, SecretReference, Seed, SeedBackup, SeedDns, SeedNetworks, SeedProvider, SeedSpec,
    SeedTaint, SeedVolume, SeedVolumeProvider, ShootNetworks,
};

/// Builds seeds that pass create validation unless told otherwise.
pub struct SeedBuilder {
    name: String,
    provider_type: String,
    region: String,
    networks: SeedNetworks,
    backup: Option<SeedBackup>,
    taints: Vec<SeedTaint>,
    volume_providers: Vec<SeedVolumeProvider>,
}

impl SeedBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            provider_type: "aws".to_string(),
            region: "eu-west-1".to_string(),
            networks: SeedNetworks {
                pods: "10.0.0.0/24".to_string(),
                services: "10.1.0.0/24".to_string(),
                nodes: None,
                shoot_defaults: None,
            },
            backup: None,
            taints: Vec::new(),
            volume_providers: Vec::new(),
        }
    }

    pub fn with_provider(mut self, provider_type: &str, region: &str) -> Self {
        self.provider_type = provider_type.to_string();
        self.region = region.to_string();
        self
    }

    pub fn with_pods(mut self, pods: &str) -> Self {
        self.networks.pods = pods.to_string();
        self
    }

    pub fn with_services(mut self, services: &str) -> Self {
        self.networks.services = services.to_string();
        self
    }

    pub fn with_nodes(mut self, nodes: &str) -> Self {
        self.networks.nodes = Some(nodes.to_string());
        self
    }

    pub fn with_shoot_defaults(mut self, pods: Option<&str>, services: Option<&str>) -> Self {
        self.networks.shoot_defaults = Some(ShootNetworks {
            pods: pods.map(str::to_string),
            services: services.map(str::to_string),
        });
        self
    }

    pub fn with_backup(mut self, provider: &str, region: Option<&str>) -> Self {
        self.backup = Some(SeedBackup {
            provider: provider.to_string(),
            region: region.map(str::to_string),
            secret_ref: SecretReference {
                name: "backup-secret".to_string(),
                namespace: "garden".to_string(),
            },
        });
        self
    }

    pub fn with_taint(mut self, key: &str, value: Option<&str>) -> Self {
        self.taints.push(SeedTaint {
            key: key.to_string(),
            value: value.map(str::to_string),
        });
        self
    }

    pub fn with_volume_provider(mut self, purpose: &str, name: &str) -> Self {
        self.volume_providers.push(SeedVolumeProvider {
            purpose: purpose.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub fn build(self) -> Seed {
        let volume = if self.volume_providers.is_empty() {
            None
        } else {
            Some(SeedVolume {
                minimum_size: None,
                providers: self.volume_providers,
            })
        };

        Seed {
            api_version: Some("core.gardener.cloud/v1beta1".to_string()),
            kind: Some("Seed".to_string()),
            metadata: ObjectMeta {
                name: self.name,
                ..ObjectMeta::default()
            },
            spec: SeedSpec {
                provider: SeedProvider {
                    r#type: self.provider_type,
                    region: self.region,
                },
                dns: SeedDns {
                    ingress_domain: "ingress.example.com".to_string(),
                },
                secret_ref: None,
                networks: self.networks,
                backup: self.backup,
                taints: self.taints,
                volume,
                settings: None,
            },
            ..Seed::default()
        }
    }
}
