//! Seller dashboard handler

use axum::{extract::State, Json};
use shop_service::dto::DashboardResponse;
use shop_service::services::DashboardService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Sales figures for the calling seller
///
/// GET /api/dashboard/seller
pub async fn seller_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<DashboardResponse>> {
    let service = DashboardService::new(state.service_context());
    Ok(Json(service.seller(auth.user_id).await?))
}
