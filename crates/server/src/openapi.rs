//! OpenAPI document. Request and record shapes are mirrored here as doc
//! structs so the service and model crates stay free of schema derives.

use chrono::{DateTime, FixedOffset};
use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct LoginResponseDoc { pub message: String, pub is_admin: bool }

#[derive(ToSchema)]
pub struct MessageResponseDoc { pub message: String }

/// Multipart text fields plus an optional `image` file; JSON with the same
/// keys is accepted as well.
#[derive(ToSchema)]
pub struct AdvertisementRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Image file, or the URL of an already hosted image.
    #[schema(format = Binary)]
    pub image: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct AdvertisementDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(ToSchema)]
pub struct ServiceRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(format = Binary)]
    pub image: Option<String>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServiceDoc {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ServicesPageDoc {
    pub services: Vec<ServiceDoc>,
    pub total_count: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

#[derive(ToSchema)]
pub struct EnquiryRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub subject: String,
    pub address: String,
    pub message: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct EnquiryDoc {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub subject: String,
    pub address: String,
    pub message: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(ToSchema)]
pub struct EnquiryResponseDoc { pub message: String, pub enquiry: EnquiryDoc }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VisitRequest {
    /// Falls back to `X-Forwarded-For`, then the peer address.
    pub ip_address: Option<String>,
    pub city: String,
    pub region: String,
    pub country: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct VisitorDoc {
    pub id: Uuid,
    pub ip_address: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub visit_time: DateTime<FixedOffset>,
}

#[derive(ToSchema)]
pub struct IdsRequest { pub ids: Vec<Uuid> }

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct DeleteResponseDoc { pub message: String, pub deleted_count: u64 }

#[derive(ToSchema)]
pub struct UploadRequest {
    #[schema(format = Binary)]
    pub image: String,
}

#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct UploadResponseDoc { pub image_url: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::advertisements::list,
        crate::routes::advertisements::get,
        crate::routes::advertisements::create,
        crate::routes::advertisements::update,
        crate::routes::advertisements::delete_one,
        crate::routes::advertisements::delete_many,
        crate::routes::services::list,
        crate::routes::services::get,
        crate::routes::services::create,
        crate::routes::services::update,
        crate::routes::services::delete_one,
        crate::routes::services::delete_many,
        crate::routes::enquiries::submit,
        crate::routes::enquiries::list,
        crate::routes::enquiries::delete_many,
        crate::routes::visitors::record,
        crate::routes::visitors::list,
        crate::routes::visitors::delete_many,
        crate::routes::uploads::upload,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            LoginResponseDoc,
            MessageResponseDoc,
            AdvertisementRequest,
            AdvertisementDoc,
            ServiceRequest,
            ServiceDoc,
            ServicesPageDoc,
            EnquiryRequest,
            EnquiryDoc,
            EnquiryResponseDoc,
            VisitRequest,
            VisitorDoc,
            IdsRequest,
            DeleteResponseDoc,
            UploadRequest,
            UploadResponseDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "advertisements"),
        (name = "services"),
        (name = "enquiries"),
        (name = "visitors"),
        (name = "uploads")
    )
)]
pub struct ApiDoc;
