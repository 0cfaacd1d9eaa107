//! Product handlers
//!
//! Catalog reads are public. Writes require the seller who owns the product.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use shop_service::dto::{
    CreateProductRequest, CsvUploadResponse, ProductDeletedResponse, ProductResponse,
    UpdateProductRequest,
};
use shop_service::services::ProductService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Multipart field carrying the CSV file
pub const CSV_FIELD: &str = "products-csv";

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> ApiResult<Created<Json<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Active products with their sellers
///
/// GET /api/products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.get(product_id).await?))
}

/// GET /api/products/seller/{seller_id}
pub async fn list_seller_products(
    State(state): State<AppState>,
    IdPath(seller_id): IdPath,
) -> ApiResult<Json<Vec<ProductResponse>>> {
    let service = ProductService::new(state.service_context());
    Ok(Json(service.list_by_seller(seller_id).await?))
}

/// PATCH /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(product_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> ApiResult<Json<ProductResponse>> {
    let service = ProductService::new(state.service_context());
    let response = service.update(auth.user_id, product_id, request).await?;
    Ok(Json(response))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<ProductDeletedResponse>> {
    let service = ProductService::new(state.service_context());
    let response = service.delete(auth.user_id, product_id).await?;
    Ok(Json(response))
}

/// Bulk-create products from a CSV file
///
/// POST /api/products/upload
pub async fn upload_products(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<CsvUploadResponse>> {
    let mut data = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() == Some(CSV_FIELD) {
            data = Some(field.bytes().await.map_err(multipart_error)?);
            break;
        }
    }

    let data = data.ok_or_else(|| {
        ApiError::invalid_body(format!("Missing '{CSV_FIELD}' file field"))
    })?;

    let service = ProductService::new(state.service_context());
    let response = service.import_csv(auth.user_id, &data).await?;
    Ok(Json(response))
}

fn multipart_error(err: axum::extract::multipart::MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::invalid_body(err.body_text())
    }
}
