// Audience DTOs (standalone category/description pairs)

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// An audience category events can target
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Audience {
    pub id: Uuid,
    pub category: String,
    pub description: String,
}

/// Request to create an audience category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAudienceRequest {
    #[schema(example = "Frontend developers")]
    pub category: String,
    pub description: String,
}
