use std::collections::BTreeMap;

use error::DetectionError;
use extract::extract_devfile_attributes;
use itertools::Itertools;
use k8s_openapi::api::core::v1::ResourceRequirements;
use log::info;
use model::{
    Component, ComponentDetectionDescription, ComponentDetectionMap, ComponentDetectionQuery,
    ComponentSource, GitSource, ScanResult,
};
use port::DevfileParser;

pub mod attributes;
pub mod devfile;
pub mod error;
pub mod extract;
pub mod model;
pub mod naming;
pub mod port;
pub mod quantity;
pub mod update;
pub mod webhook;

/// Language and project type recorded for contexts that only carry a Dockerfile.
pub const DOCKERFILE_MARKER: &str = "Dockerfile";

pub struct DetectionService {
    pub devfile_parser: Box<dyn DevfileParser + 'static + Sync + Send>,
    pub application_placeholder: String,
}

/// Builds one component stub per detected context.
///
/// Contexts with a devfile produce a devfile-backed stub (their Dockerfile, if any, is
/// only recorded as provenance); the remaining Dockerfile-only contexts produce minimal
/// stubs marked with [`DOCKERFILE_MARKER`]. Any parse or extraction failure aborts the
/// whole detection.
pub fn detect(
    query: &ComponentDetectionQuery,
    scan: ScanResult,
    service: &DetectionService,
) -> Result<ComponentDetectionMap, DetectionError> {
    let template = query
        .git_source
        .as_ref()
        .ok_or(DetectionError::NilInput("component detection query git source"))?;
    let ScanResult {
        devfiles,
        devfile_urls,
        dockerfiles,
        ports,
    } = scan;

    let mut detected = ComponentDetectionMap::new();
    info!("Devfiles detected: {} [{}]", devfiles.len(), devfiles.keys().join(", "));

    for (context, content) in &devfiles {
        info!("Currently reading the devfile for context {}", context);
        let devfile = service.devfile_parser.parse(content.as_bytes())?;
        let attributes = extract_devfile_attributes(&devfile)?;
        let metadata = devfile.metadata();

        let git_source = GitSource {
            context: Some(context.clone()),
            devfile_url: devfile_urls.get(context).cloned(),
            dockerfile_url: dockerfiles.get(context).cloned(),
            ..template_source(template)
        };
        let component_name = unique_component_name(&git_source, &detected);

        let scanned_port = ports
            .get(context)
            .and_then(|ports| ports.first().copied())
            .unwrap_or(0);
        let target_port = if scanned_port != 0 {
            scanned_port
        } else {
            attributes.target_port.unwrap_or(0)
        };

        let component_stub = Component {
            component_name: component_name.clone(),
            application: service.application_placeholder.clone(),
            source: Some(ComponentSource::Git(git_source)),
            target_port,
            route: attributes.route.unwrap_or_default(),
            replicas: attributes.replicas.unwrap_or(0),
            resources: ResourceRequirements {
                limits: Some(attributes.limits).filter(|limits| !limits.is_empty()),
                requests: Some(attributes.requests).filter(|requests| !requests.is_empty()),
                ..Default::default()
            },
            env: attributes.env.unwrap_or_default(),
        };

        detected.insert(
            component_name,
            ComponentDetectionDescription {
                // a devfile parsed without a recorded URL came from a default or embedded source
                devfile_found: devfile_urls.get(context).is_some_and(|url| !url.is_empty()),
                language: metadata.language.clone().unwrap_or_default(),
                project_type: metadata.project_type.clone().unwrap_or_default(),
                component_stub,
            },
        );
    }

    let dockerfiles = without_devfile_contexts(dockerfiles, &devfiles);
    info!("Dockerfiles detected: {} [{}]", dockerfiles.len(), dockerfiles.keys().join(", "));

    for (context, link) in dockerfiles {
        info!("Currently reading the Dockerfile for context {}", context);
        let git_source = GitSource {
            context: Some(context),
            devfile_url: None,
            dockerfile_url: Some(link),
            ..template_source(template)
        };
        let component_name = unique_component_name(&git_source, &detected);

        detected.insert(
            component_name.clone(),
            ComponentDetectionDescription {
                devfile_found: false,
                language: DOCKERFILE_MARKER.to_string(),
                project_type: DOCKERFILE_MARKER.to_string(),
                component_stub: Component {
                    component_name,
                    application: service.application_placeholder.clone(),
                    source: Some(ComponentSource::Git(git_source)),
                    ..Default::default()
                },
            },
        );
    }

    Ok(detected)
}

fn template_source(template: &GitSource) -> GitSource {
    GitSource {
        url: template.url.clone(),
        revision: template.revision.clone(),
        ..Default::default()
    }
}

fn without_devfile_contexts(
    mut dockerfiles: BTreeMap<String, String>,
    devfiles: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    for context in devfiles.keys() {
        dockerfiles.remove(context);
    }
    dockerfiles
}

fn unique_component_name(git_source: &GitSource, detected: &ComponentDetectionMap) -> String {
    let raw_name = naming::raw_component_name(git_source);
    loop {
        let name = naming::sanitize_component_name(&raw_name);
        if !detected.contains_key(&name) {
            return name;
        }
    }
}
