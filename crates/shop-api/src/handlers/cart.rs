//! Cart handlers
//!
//! All routes act on the caller's own cart.

use axum::{extract::State, Json};
use shop_service::dto::{AddToCartRequest, CartResponse};
use shop_service::services::CartService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /api/cart
pub async fn get_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    Ok(Json(service.get(auth.user_id).await?))
}

/// Add to or adjust a cart line
///
/// POST /api/cart
pub async fn add_to_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddToCartRequest>,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    Ok(Json(service.add(auth.user_id, request).await?))
}

/// DELETE /api/cart/{product_id}
pub async fn remove_from_cart(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    Ok(Json(service.remove(auth.user_id, product_id).await?))
}

/// DELETE /api/cart
pub async fn clear_cart(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CartResponse>> {
    let service = CartService::new(state.service_context());
    Ok(Json(service.clear(auth.user_id).await?))
}
