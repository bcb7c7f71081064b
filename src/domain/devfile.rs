use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::attributes::Attributes;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileData {
    pub schema_version: String,
    #[serde(default)]
    pub metadata: DevfileMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<DevfileComponent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Project>,
    // commands, events, starterProjects... are carried through untouched
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    Kubernetes,
    Openshift,
    Container,
    Image,
    Volume,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevfileComponent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attributes: Attributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<KubernetesComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift: Option<KubernetesComponent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Value>,
}

impl DevfileComponent {
    pub fn component_type(&self) -> Option<ComponentType> {
        if self.kubernetes.is_some() {
            Some(ComponentType::Kubernetes)
        } else if self.openshift.is_some() {
            Some(ComponentType::Openshift)
        } else if self.container.is_some() {
            Some(ComponentType::Container)
        } else if self.image.is_some() {
            Some(ComponentType::Image)
        } else if self.volume.is_some() {
            Some(ComponentType::Volume)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesComponent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlined: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitProjectSource>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitProjectSource {
    pub remotes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_from: Option<CheckoutFrom>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFrom {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl DevfileData {
    pub fn metadata(&self) -> &DevfileMetadata {
        &self.metadata
    }

    pub fn components_of_type(&self, component_type: ComponentType) -> Vec<&DevfileComponent> {
        self.components
            .iter()
            .filter(|component| component.component_type() == Some(component_type))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, kubernetes: bool) -> DevfileComponent {
        DevfileComponent {
            name: name.to_string(),
            kubernetes: kubernetes.then(KubernetesComponent::default),
            container: (!kubernetes).then(|| serde_json::json!({"image": "quay.io/app"})),
            ..Default::default()
        }
    }

    #[test]
    fn filters_components_by_type_in_declaration_order() {
        let devfile = DevfileData {
            schema_version: "2.2.0".into(),
            components: vec![
                component("runtime", false),
                component("outerloop-deploy", true),
                component("outerloop-service", true),
            ],
            ..Default::default()
        };

        let names: Vec<&str> = devfile
            .components_of_type(ComponentType::Kubernetes)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["outerloop-deploy", "outerloop-service"]);
        assert_eq!(devfile.components_of_type(ComponentType::Volume).len(), 0);
    }

    #[test]
    fn component_without_body_has_no_type() {
        assert_eq!(DevfileComponent::default().component_type(), None);
    }
}
