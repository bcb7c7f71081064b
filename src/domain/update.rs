use std::collections::BTreeMap;

use super::{
    devfile::{DevfileData, GitProjectSource, Project},
    error::DetectionError,
    model::{Component, ComponentSource},
};

pub const CONTAINER_IMAGE_ATTRIBUTE_PREFIX: &str = "containerImage";

pub fn container_image_key(component_name: &str) -> String {
    format!("{CONTAINER_IMAGE_ATTRIBUTE_PREFIX}/{component_name}")
}

/// Adds a component to the application devfile.
///
/// Git sourced components become a project named after the component, image sourced
/// components a `containerImage/<name>` attribute. An empty image counts as no source.
/// The devfile is left untouched when an error is returned.
pub fn attach_component(devfile: &mut DevfileData, component: &Component) -> Result<(), DetectionError> {
    match &component.source {
        Some(ComponentSource::Git(git_source)) => {
            if devfile
                .projects
                .iter()
                .any(|project| project.name == component.component_name)
            {
                return Err(DetectionError::DuplicateName(component.component_name.clone()));
            }
            devfile.projects.push(Project {
                name: component.component_name.clone(),
                git: Some(GitProjectSource {
                    remotes: BTreeMap::from([("origin".to_string(), git_source.url.clone())]),
                    checkout_from: None,
                }),
                ..Default::default()
            });
            Ok(())
        }
        Some(ComponentSource::ContainerImage(image)) if !image.is_empty() => {
            let key = container_image_key(&component.component_name);
            let existing = match devfile.attributes.as_ref() {
                Some(attributes) => attributes.get_string(&key)?,
                None => None,
            };
            if existing.is_some_and(|value| !value.is_empty()) {
                return Err(DetectionError::DuplicateName(component.component_name.clone()));
            }
            devfile
                .attributes
                .get_or_insert_with(Default::default)
                .put_string(key, image.as_str());
            Ok(())
        }
        _ => Err(DetectionError::InvalidSource),
    }
}
