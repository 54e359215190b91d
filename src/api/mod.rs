pub mod health;
pub mod mcrs;

pub use health::*;
pub use mcrs::*;

use poem::Route;
use poem_openapi::OpenApiService;
use std::sync::Arc;

use crate::mcr::McrService;

/// Assemble the HTTP application: API under `/`, Swagger UI under `/docs`
/// and the OpenAPI document under `/spec`.
pub fn routes(service: Arc<McrService>, server_url: &str) -> Route {
    let api_service = OpenApiService::new(
        (HealthApi, McrsApi::new(service)),
        "mcrgate API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(server_url);

    let ui = api_service.swagger_ui();
    let spec = api_service.spec_endpoint();

    Route::new()
        .nest("/", api_service)
        .nest("/docs", ui)
        .nest("/spec", spec)
}
