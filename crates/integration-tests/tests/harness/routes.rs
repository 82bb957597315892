//! Identity routes that fail in controlled ways

use axum::Router;
use axum::extract::Path;
use axum::routing::{get, patch, post};
use idrepo_core::codes::{MISSING_INPUT_PARAMETER, UNAUTHORIZED};
use idrepo_core::{ErrorTexts, Fault, Operation};
use idrepo_server::{ApiFault, ApiJson};
use serde::Deserialize;

/// Body of VID deactivate/reactivate and identity update calls
#[derive(Debug, Deserialize)]
pub struct VidRequest {
    pub id: String,
    pub version: String,
    pub requesttime: jiff::Timestamp,
}

pub fn router() -> Router {
    Router::new()
        .route("/idrepository/v1/identity/", post(create_identity).patch(update_identity))
        .route("/idrepository/v1/identity/idvid/{uin}", get(retrieve_identity))
        .route("/idrepository/v1/vid/deactivate", post(change_vid_status))
        .route("/idrepository/v1/vid/reactivate", post(change_vid_status))
        .route("/idrepository/v1/vid/{vid}", patch(update_vid))
        .route("/internal/denied", get(denied))
        .route("/internal/crash", get(crash))
        .route("/internal/panic", get(panic_in_handler))
}

async fn create_identity(ApiJson(request): ApiJson<VidRequest>) -> Result<String, ApiFault> {
    let texts: ErrorTexts = [
        ("IDR-IDC-001", format!("Missing Input Parameter - {}", request.id)),
        ("IDR-IDC-009", format!("Missing Input Parameter - {}", request.id)),
        ("IDR-IDC-002", format!("Invalid Input Parameter - {}", request.version)),
    ]
    .into_iter()
    .collect();
    Err(Fault::app_with_texts(texts).into())
}

async fn update_identity(ApiJson(_request): ApiJson<VidRequest>) -> Result<String, ApiFault> {
    Err(Fault::app(MISSING_INPUT_PARAMETER.code, MISSING_INPUT_PARAMETER.message_with("uin"))
        .with_operation(Operation::Read)
        .into())
}

/// Retrieval goes through a lazily built validator that calls the auth service
async fn retrieve_identity(Path(uin): Path<String>) -> Result<String, ApiFault> {
    let declared = match uin.as_str() {
        "forbidden" => 403,
        _ => 0,
    };
    let texts = if declared == 0 {
        ErrorTexts::default()
    } else {
        ErrorTexts::new("KER-ATH-403", "Forbidden")
    };

    Err(Fault::bean_creation("error creating validator")
        .with_cause(Fault::other("rest call failed").with_cause(Fault::authentication(texts, declared)))
        .into())
}

async fn change_vid_status(ApiJson(_request): ApiJson<VidRequest>) -> Result<String, ApiFault> {
    Ok("updated".to_owned())
}

async fn update_vid(Path(_vid): Path<String>) -> Result<String, ApiFault> {
    Err(Fault::app_unchecked(UNAUTHORIZED.code, UNAUTHORIZED.message).into())
}

async fn denied() -> Result<String, ApiFault> {
    Err(Fault::access_denied("missing role").into())
}

async fn crash() -> Result<String, ApiFault> {
    Err(Fault::other("index out of bounds").into())
}

async fn panic_in_handler() -> Result<String, ApiFault> {
    let records: Vec<String> = Vec::new();
    Ok(records[0].clone())
}
