use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::{
    detect,
    devfile::DevfileData,
    error::DetectionError,
    model::{Component, ComponentDetectionQuery, ScanResult},
    update::attach_component,
    webhook::{AdmissionObject, Application},
    DetectionService,
};

#[derive(Serialize, Deserialize)]
pub struct DetectionRequest {
    #[serde(default)]
    pub query: ComponentDetectionQuery,
    #[serde(default)]
    pub scan: ScanResult,
}

#[derive(Serialize, Deserialize)]
pub struct AttachRequest {
    pub devfile: DevfileData,
    pub component: Component,
}

#[derive(Serialize, Deserialize)]
pub struct ApplicationUpdateReview {
    pub old: AdmissionObject,
    pub new: Application,
}

#[derive(Serialize, Deserialize)]
pub struct ApplicationDeleteReview {
    pub application: Application,
}

pub fn router(service: DetectionService) -> Router {
    Router::new()
        .route("/detect", post(detect_components))
        .route("/attach", post(attach))
        .route("/validate/application", post(validate_application_update))
        .route("/validate/application/delete", post(validate_application_delete))
        .with_state(Arc::new(service))
}

fn status_of(error: &DetectionError) -> StatusCode {
    match error {
        DetectionError::MalformedValue { .. }
        | DetectionError::Devfile(_)
        | DetectionError::DevfileSyntax(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DetectionError::DuplicateName(_) => StatusCode::CONFLICT,
        DetectionError::InvalidSource | DetectionError::NilInput(_) => StatusCode::BAD_REQUEST,
        DetectionError::Rejected(_) => StatusCode::FORBIDDEN,
    }
}

fn failure(operation: &str, e: DetectionError) -> (StatusCode, String) {
    error!("Error during {} {:?}", operation, e);
    (status_of(&e), format!("Something went wrong: {e}"))
}

async fn detect_components(
    State(service): State<Arc<DetectionService>>,
    Json(payload): Json<DetectionRequest>,
) -> impl IntoResponse {
    detect(&payload.query, payload.scan, service.as_ref())
        .map(Json)
        .map_err(|e| failure("detect_components", e))
}

async fn attach(Json(payload): Json<AttachRequest>) -> impl IntoResponse {
    let AttachRequest {
        mut devfile,
        component,
    } = payload;
    attach_component(&mut devfile, &component)
        .map(|_| Json(devfile))
        .map_err(|e| failure("attach", e))
}

async fn validate_application_update(
    Json(payload): Json<ApplicationUpdateReview>,
) -> impl IntoResponse {
    payload
        .new
        .validate_update(&payload.old)
        .map(|_| (StatusCode::OK, "Application update allowed"))
        .map_err(|e| failure("validate_application_update", e))
}

async fn validate_application_delete(
    Json(payload): Json<ApplicationDeleteReview>,
) -> impl IntoResponse {
    payload
        .application
        .validate_delete()
        .map(|_| (StatusCode::OK, "Application delete allowed"))
        .map_err(|e| failure("validate_application_delete", e))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::infra::devfile::YamlDevfileParser;

    fn app() -> Router {
        router(DetectionService {
            devfile_parser: Box::new(YamlDevfileParser),
            application_placeholder: "insert-application-name".to_string(),
        })
    }

    async fn post_json(uri: &str, body: Value) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn detect_returns_the_detection_map() {
        let response = post_json(
            "/detect",
            json!({
                "query": {"gitSource": {"url": "https://github.com/org/multi"}},
                "scan": {"dockerfiles": {"backend": "https://backend/Dockerfile"}}
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let detected = body.as_object().unwrap();
        assert_eq!(detected.len(), 1);
        let (name, description) = detected.iter().next().unwrap();
        assert!(name.starts_with("backend-multi-"));
        assert_eq!(description["devfileFound"], false);
        assert_eq!(description["projectType"], "Dockerfile");
        assert_eq!(
            description["componentStub"]["source"]["git"]["dockerfileUrl"],
            "https://backend/Dockerfile"
        );
    }

    #[tokio::test]
    async fn detect_without_git_source_is_a_bad_request() {
        let response = post_json("/detect", json!({"scan": {}})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn attach_returns_the_updated_devfile() {
        let response = post_json(
            "/attach",
            json!({
                "devfile": {"schemaVersion": "2.2.0"},
                "component": {
                    "componentName": "svc1",
                    "application": "app",
                    "source": {"containerImage": "quay.io/org/svc1"}
                }
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["attributes"]["containerImage/svc1"], "quay.io/org/svc1");
    }

    #[tokio::test]
    async fn attach_duplicate_is_a_conflict() {
        let response = post_json(
            "/attach",
            json!({
                "devfile": {
                    "schemaVersion": "2.2.0",
                    "attributes": {"containerImage/svc1": "quay.io/org/svc1"}
                },
                "component": {
                    "componentName": "svc1",
                    "application": "app",
                    "source": {"containerImage": "quay.io/org/other"}
                }
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn changing_the_gitops_repository_is_forbidden() {
        let response = post_json(
            "/validate/application",
            json!({
                "old": {"kind": "Application", "spec": {"displayName": "app", "gitopsRepository": {"url": "http://a"}}},
                "new": {"spec": {"displayName": "app", "gitopsRepository": {"url": "http://b"}}}
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn deleting_an_application_is_allowed() {
        let response = post_json(
            "/validate/application/delete",
            json!({"application": {"spec": {"displayName": "app"}}}),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
