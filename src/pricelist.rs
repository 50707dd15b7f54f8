//! Price-list gate check.
//!
//! The price-list page is public-but-gated behind a shared password from the
//! environment. An unconfigured secret answers 500 so a deploy mistake is
//! loud instead of silently open.

use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct GateRequest {
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[utoipa::path(
    context_path = "/api",
    tag = "Price list",
    post,
    path = "/verify-pricelist",
    request_body = GateRequest,
    responses(
        (status = 200, description = "Password accepted", body = GateResponse),
        (status = 401, description = "Wrong password", body = GateResponse),
        (status = 500, description = "Gate password not configured", body = GateResponse)
    )
)]
pub async fn verify_pricelist(
    req: web::Json<GateRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let Some(expected) = data.pricelist_password.as_deref() else {
        log::error!("PRICELIST_PASSWORD environment variable is not set");
        return HttpResponse::InternalServerError().json(GateResponse {
            success: false,
            message: Some("Server configuration error".to_string()),
        });
    };

    if req.password == expected {
        HttpResponse::Ok().json(GateResponse {
            success: true,
            message: None,
        })
    } else {
        HttpResponse::Unauthorized().json(GateResponse {
            success: false,
            message: Some("Password non corretta".to_string()),
        })
    }
}
