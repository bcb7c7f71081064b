use serde::{Deserialize, Serialize};

use super::{error::DetectionError, model::Component};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationGitRepository {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSpec {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub app_model_repository: ApplicationGitRepository,
    #[serde(default)]
    pub gitops_repository: ApplicationGitRepository,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub spec: ApplicationSpec,
}

/// Object under admission review, tagged by its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AdmissionObject {
    Application(Application),
    Component(Component),
}

impl Application {
    /// Repositories backing an application are fixed once it exists.
    pub fn validate_update(&self, old: &AdmissionObject) -> Result<(), DetectionError> {
        let AdmissionObject::Application(old) = old else {
            return Err(DetectionError::Rejected(
                "runtime object is not of type Application".to_string(),
            ));
        };
        if self.spec.app_model_repository != old.spec.app_model_repository {
            return Err(DetectionError::Rejected(format!(
                "app model repository cannot be updated to {:?}",
                self.spec.app_model_repository
            )));
        }
        if self.spec.gitops_repository != old.spec.gitops_repository {
            return Err(DetectionError::Rejected(format!(
                "gitops repository cannot be updated to {:?}",
                self.spec.gitops_repository
            )));
        }
        Ok(())
    }

    pub fn validate_delete(&self) -> Result<(), DetectionError> {
        Ok(())
    }
}
