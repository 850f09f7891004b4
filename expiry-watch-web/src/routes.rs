//! HTTP routes.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, ResponseError, get, post, web};
use chrono::Utc;
use expiry_watch_app::AppState;
use expiry_watch_core::CoreError;
use serde::Deserialize;
use serde_json::json;

use crate::view;

/// Error surfaced to HTTP clients. Resolution failures never get here.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ResponseError for WebError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::DomainNotFound(_)) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Self::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let Self::Core(e) = self;
        if e.is_expected() {
            tracing::warn!("Request failed: {e}");
        } else {
            tracing::error!("Request failed: {e}");
        }
        HttpResponse::build(self.status_code()).json(e)
    }
}

type WebResult<T> = Result<T, WebError>;

#[derive(Debug, Deserialize)]
pub struct AddDomainsForm {
    #[serde(default)]
    names: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(add_domains)
        .service(delete_domain)
        .service(refresh_all)
        .service(list_domains_json)
        .service(get_domain_json)
        .service(health);
}

fn redirect_home() -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

#[get("/")]
async fn index(state: web::Data<AppState>) -> WebResult<HttpResponse> {
    let records = state.domain_service.list_domains().await?;
    let body = view::render_index(&records, &Utc::now());
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body))
}

#[post("/domains")]
async fn add_domains(
    state: web::Data<AppState>,
    form: web::Form<AddDomainsForm>,
) -> HttpResponse {
    let records = state.domain_service.add_domains(&form.names).await;
    tracing::info!("Processed {} submitted domain(s)", records.len());
    redirect_home()
}

#[post("/domains/{id}/delete")]
async fn delete_domain(state: web::Data<AppState>, id: web::Path<i64>) -> WebResult<HttpResponse> {
    state.domain_service.delete_domain(id.into_inner()).await?;
    Ok(redirect_home())
}

#[post("/refresh")]
async fn refresh_all(state: web::Data<AppState>) -> WebResult<HttpResponse> {
    let summary = state.domain_service.refresh_all().await?;
    tracing::info!(
        "Refreshed {} of {} domain(s)",
        summary.refreshed,
        summary.attempted()
    );
    for failure in &summary.failed {
        tracing::debug!("Not refreshed: {} ({})", failure.name, failure.error);
    }
    Ok(redirect_home())
}

#[get("/api/domains")]
async fn list_domains_json(state: web::Data<AppState>) -> WebResult<HttpResponse> {
    let records = state.domain_service.list_domains().await?;
    Ok(HttpResponse::Ok().json(records))
}

#[get("/api/domains/{id}")]
async fn get_domain_json(state: web::Data<AppState>, id: web::Path<i64>) -> WebResult<HttpResponse> {
    let record = state.domain_service.get_domain(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

#[get("/health")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
