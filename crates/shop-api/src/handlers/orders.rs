//! Order handlers

use axum::{extract::State, Json};
use shop_service::dto::{
    CreateOrderRequest, OrderDeletedResponse, OrderResponse, UpdateOrderStatusRequest,
};
use shop_service::services::OrderService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Turn the caller's cart into an order
///
/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateOrderRequest>,
) -> ApiResult<Created<Json<OrderResponse>>> {
    let service = OrderService::new(state.service_context());
    let response = service.create(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// GET /api/orders
pub async fn list_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let service = OrderService::new(state.service_context());
    Ok(Json(service.list_mine(auth.user_id).await?))
}

/// GET /api/orders/user/{user_id}
pub async fn list_user_orders(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let service = OrderService::new(state.service_context());
    Ok(Json(service.list_for_user(auth.user_id, user_id).await?))
}

/// GET /api/orders/{id}
pub async fn get_order(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
) -> ApiResult<Json<OrderResponse>> {
    let service = OrderService::new(state.service_context());
    Ok(Json(service.get(auth.user_id, order_id).await?))
}

/// PUT /api/orders/{id}/status
pub async fn update_order_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdateOrderStatusRequest>,
) -> ApiResult<Json<OrderResponse>> {
    let service = OrderService::new(state.service_context());
    let response = service.update_status(auth.user_id, order_id, request).await?;
    Ok(Json(response))
}

/// DELETE /api/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(order_id): IdPath,
) -> ApiResult<Json<OrderDeletedResponse>> {
    let service = OrderService::new(state.service_context());
    Ok(Json(service.delete(auth.user_id, order_id).await?))
}
