use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Availability flag values.
#[derive(ToSchema, serde::Serialize)]
pub enum OnSaleDoc {
    #[serde(rename = "SI")]
    Si,
    #[serde(rename = "NO")]
    No,
}

#[derive(ToSchema)]
pub struct RecordDoc {
    pub id: String,
    pub on_sale: OnSaleDoc,
    /// Non-negative, at most two decimals
    pub price: f64,
    pub location: String,
    pub provider: String,
    pub service_name: String,
    pub company_code: String,
    pub company_service_name: String,
}

#[derive(ToSchema)]
pub struct RecordPatchDoc {
    /// Number or numeric string; rounded half away from zero to two decimals
    pub price: Option<f64>,
    pub on_sale: Option<OnSaleDoc>,
}

#[derive(ToSchema)]
pub struct ErrorDoc {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::records::list_records,
        crate::routes::records::patch_record,
    ),
    components(
        schemas(
            HealthResponse,
            OnSaleDoc,
            RecordDoc,
            RecordPatchDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "records")
    )
)]
pub struct ApiDoc;
