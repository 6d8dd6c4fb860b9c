//! Generic API response models.

use serde::Serialize;
use utoipa::ToSchema;

/// API root response
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiRootResponse {
    #[schema(example = "This is api root.")]
    pub message: String,
    /// Path of the OpenAPI document
    #[schema(example = "/api/docs")]
    pub docs: String,
}

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status
    #[schema(example = "OK")]
    pub status: String,
    /// Status message
    #[schema(example = "Server is running")]
    pub message: String,
}
