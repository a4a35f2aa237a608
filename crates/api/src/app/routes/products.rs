use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use productlist_core::ProductId;
use productlist_infra::{CatalogQueryService, ProductStoreError};

use crate::app::{dto, errors};
use crate::app::services::{AppServices, SharedRepository};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/search", get(search_products))
        .route("/:id", get(get_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ListProductsParams>,
) -> axum::response::Response {
    let request = params.page_request();
    match query_catalog(services, move |catalog| catalog.list(&request)).await {
        Ok(page) => (StatusCode::OK, Json(dto::products_to_json(&page))).into_response(),
        Err(response) => response,
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = ProductId::new(id);
    let lookup = product_id.clone();
    match query_catalog(services, move |catalog| catalog.get_by_id(&lookup)).await {
        Ok(product) => {
            tracing::info!(%product_id, "product found");
            (StatusCode::OK, Json(dto::product_to_json(&product))).into_response()
        }
        Err(response) => response,
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchProductsParams>,
) -> axum::response::Response {
    let criteria = match params.into_criteria() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(error = %e, "rejected search request");
            return errors::domain_error_to_response(e);
        }
    };

    match query_catalog(services, move |catalog| catalog.search(&criteria)).await {
        Ok(found) if found.is_empty() => {
            errors::json_error(StatusCode::NOT_FOUND, "not_found", errors::NO_MATCHES)
        }
        Ok(found) => (StatusCode::OK, Json(dto::products_to_json(&found))).into_response(),
        Err(response) => response,
    }
}

/// Run `op` on the blocking pool: the first query reads and parses the
/// dataset under the store's load lock.
async fn query_catalog<T, F>(
    services: Arc<AppServices>,
    op: F,
) -> Result<T, axum::response::Response>
where
    T: Send + 'static,
    F: FnOnce(&CatalogQueryService<SharedRepository>) -> Result<T, ProductStoreError>
        + Send
        + 'static,
{
    match tokio::task::spawn_blocking(move || op(services.catalog())).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(errors::store_error_to_response(e)),
        Err(e) => {
            tracing::error!(error = %e, "catalog query task failed");
            Err(errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                errors::INTERNAL_ERROR,
            ))
        }
    }
}
