use poem_openapi::{payload::Json, ApiResponse, OpenApi};

pub struct HealthApi;

/// Liveness response
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, poem_openapi::Object)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: String,
}

#[derive(ApiResponse)]
pub enum HealthResponse {
    #[oai(status = 200)]
    Ok(Json<HealthStatus>),
}

#[OpenApi]
impl HealthApi {
    /// Liveness check; does not call the Megaport API
    #[oai(path = "/health", method = "get")]
    async fn health(&self) -> HealthResponse {
        HealthResponse::Ok(Json(HealthStatus {
            status: "healthy".to_string(),
            service: "mcrgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }))
    }
}
