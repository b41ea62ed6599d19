use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn instance(State(state): State<AppState>) -> ApiSuccess<InstanceData> {
    ApiSuccess::new(
        StatusCode::OK,
        InstanceData {
            instance_name: state.instance_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceData {
    #[serde(rename = "instanceName", skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    pub version: String,
}
