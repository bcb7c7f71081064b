use std::collections::BTreeMap;

use k8s_openapi::{api::core::v1::EnvVar, apimachinery::pkg::api::resource::Quantity};

use super::{
    attributes::Attributes,
    devfile::{ComponentType, DevfileData},
    error::DetectionError,
    quantity::parse_quantity,
};

pub const CONTAINER_ENV_KEY: &str = "deployment/containerENV";
pub const CONTAINER_PORT_KEY: &str = "deployment/container-port";
pub const ROUTE_KEY: &str = "deployment/route";
pub const REPLICA_KEY: &str = "deployment/replicas";
pub const CPU_LIMIT_KEY: &str = "deployment/cpuLimit";
pub const MEMORY_LIMIT_KEY: &str = "deployment/memoryLimit";
pub const STORAGE_LIMIT_KEY: &str = "deployment/storageLimit";
pub const CPU_REQUEST_KEY: &str = "deployment/cpuRequest";
pub const MEMORY_REQUEST_KEY: &str = "deployment/memoryRequest";
pub const STORAGE_REQUEST_KEY: &str = "deployment/storageRequest";

pub const RESOURCE_CPU: &str = "cpu";
pub const RESOURCE_MEMORY: &str = "memory";
pub const RESOURCE_STORAGE: &str = "storage";

const LIMIT_KEYS: [(&str, &str); 3] = [
    (CPU_LIMIT_KEY, RESOURCE_CPU),
    (MEMORY_LIMIT_KEY, RESOURCE_MEMORY),
    (STORAGE_LIMIT_KEY, RESOURCE_STORAGE),
];

const REQUEST_KEYS: [(&str, &str); 3] = [
    (CPU_REQUEST_KEY, RESOURCE_CPU),
    (MEMORY_REQUEST_KEY, RESOURCE_MEMORY),
    (STORAGE_REQUEST_KEY, RESOURCE_STORAGE),
];

/// Deployment settings read from a devfile's Kubernetes component attributes.
/// `None` and missing resource entries mean the attribute was not set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentAttributes {
    pub env: Option<Vec<EnvVar>>,
    pub target_port: Option<i32>,
    pub route: Option<String>,
    pub replicas: Option<i32>,
    pub limits: BTreeMap<String, Quantity>,
    pub requests: BTreeMap<String, Quantity>,
}

/// Extracts deployment settings from the first Kubernetes component of the devfile.
/// A devfile without Kubernetes components yields empty attributes.
pub fn extract_devfile_attributes(devfile: &DevfileData) -> Result<ComponentAttributes, DetectionError> {
    match devfile.components_of_type(ComponentType::Kubernetes).first() {
        Some(component) => extract_attributes(&component.attributes),
        None => Ok(ComponentAttributes::default()),
    }
}

pub fn extract_attributes(attributes: &Attributes) -> Result<ComponentAttributes, DetectionError> {
    Ok(ComponentAttributes {
        env: attributes.get_into(CONTAINER_ENV_KEY)?,
        target_port: attributes.get_integer(CONTAINER_PORT_KEY)?,
        route: attributes.get_string(ROUTE_KEY)?,
        replicas: attributes.get_integer(REPLICA_KEY)?,
        limits: extract_resources(attributes, &LIMIT_KEYS)?,
        requests: extract_resources(attributes, &REQUEST_KEYS)?,
    })
}

fn extract_resources(
    attributes: &Attributes,
    keys: &[(&str, &str)],
) -> Result<BTreeMap<String, Quantity>, DetectionError> {
    let mut resources = BTreeMap::new();
    for (key, resource) in keys {
        if let Some(value) = attributes.get_string(key)?.filter(|value| !value.is_empty()) {
            resources.insert(resource.to_string(), parse_quantity(key, &value)?);
        }
    }
    Ok(resources)
}
