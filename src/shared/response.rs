use serde::Serialize;
use utoipa::ToSchema;

/// JSON:API resource object
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiResource<T> {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub id: String,
    pub attributes: T,
}

impl<T> JsonApiResource<T> {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>, attributes: T) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
            attributes,
        }
    }
}

/// Top-level JSON:API document
#[derive(Debug, Serialize, ToSchema)]
pub struct JsonApiResponse<T> {
    pub data: T,
}

impl<T> JsonApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
