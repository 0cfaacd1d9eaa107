//! Favorite handlers

use axum::{extract::State, Json};
use shop_service::dto::{
    AddFavoriteRequest, FavoriteCreatedResponse, FavoriteResponse, MessageResponse,
};
use shop_service::services::FavoriteService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<FavoriteResponse>>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Json(service.list(auth.user_id).await?))
}

/// POST /api/favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<AddFavoriteRequest>,
) -> ApiResult<Created<Json<FavoriteCreatedResponse>>> {
    let service = FavoriteService::new(state.service_context());
    let response = service.add(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// DELETE /api/favorites/{product_id}
pub async fn remove_favorite(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(product_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = FavoriteService::new(state.service_context());
    Ok(Json(service.remove(auth.user_id, product_id).await?))
}
