//! Order handlers: collection, single order, status transition

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResult, OrderPayload, OrderStatusPayload, OrderView, ValidatedJson,
    ValidatedPath, error_codes,
};
use crate::models::OrderId;
use crate::user_auth::Caller;

/// List all orders
///
/// GET /orders/
#[utoipa::path(
    get,
    path = "/orders/",
    responses(
        (status = 200, description = "All orders", body = Vec<OrderView>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<OrderView>>> {
    let orders = state.orders.list().await?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

/// Place a new order
///
/// POST /orders/
#[utoipa::path(
    post,
    path = "/orders/",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Order created with status PENDING", body = OrderView),
        (status = 401, description = "Missing or invalid token, or unknown caller"),
        (status = 422, description = "Invalid size, quantity or flavour")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    ValidatedJson(req): ValidatedJson<OrderPayload>,
) -> ApiResult<(StatusCode, Json<OrderView>)> {
    let user = state
        .user_auth
        .current_user(&caller)
        .await
        .map_err(|e| {
            tracing::error!("Resolving caller {} failed: {}", caller.username, e);
            ApiError::internal()
        })?
        .ok_or_else(|| {
            tracing::warn!("Token subject {} has no user record", caller.username);
            ApiError::unauthorized(error_codes::AUTH_FAILED, "Unknown user")
        })?;

    let order = state.orders.create(req.into_new_order(user.id)).await?;
    tracing::info!(
        "Order {} created by {} ({} x {} {})",
        order.id,
        user.username,
        order.quantity,
        order.size,
        order.flavour
    );
    Ok((StatusCode::CREATED, Json(OrderView::from(order))))
}

/// Retrieve an order by id
///
/// GET /order/{order_id}
#[utoipa::path(
    get,
    path = "/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 200, description = "The order", body = OrderView),
        (status = 400, description = "Order ID is not an integer"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<Arc<AppState>>,
    ValidatedPath(order_id): ValidatedPath<OrderId>,
) -> ApiResult<Json<OrderView>> {
    let order = state
        .orders
        .get(order_id)
        .await?
        .ok_or_else(ApiError::order_not_found)?;
    Ok(Json(OrderView::from(order)))
}

/// Update size, quantity and flavour of an order
///
/// PUT /order/{order_id}
#[utoipa::path(
    put,
    path = "/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    request_body = OrderPayload,
    responses(
        (status = 200, description = "Updated order", body = OrderView),
        (status = 400, description = "Order ID is not an integer"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Invalid size, quantity or flavour")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn update_order(
    State(state): State<Arc<AppState>>,
    ValidatedPath(order_id): ValidatedPath<OrderId>,
    ValidatedJson(req): ValidatedJson<OrderPayload>,
) -> ApiResult<Json<OrderView>> {
    let order = state.orders.update(order_id, req.into_changes()).await?;
    Ok(Json(OrderView::from(order)))
}

/// Delete an order
///
/// DELETE /order/{order_id}
#[utoipa::path(
    delete,
    path = "/order/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 400, description = "Order ID is not an integer"),
        (status = 404, description = "Order not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn delete_order(
    State(state): State<Arc<AppState>>,
    ValidatedPath(order_id): ValidatedPath<OrderId>,
) -> ApiResult<StatusCode> {
    let removed = state.orders.delete(order_id).await?;
    tracing::info!("Order {} deleted", removed.id);
    Ok(StatusCode::NO_CONTENT)
}

/// Overwrite the status of an order
///
/// PATCH /order/status/{order_id}
#[utoipa::path(
    patch,
    path = "/order/status/{order_id}",
    params(("order_id" = i64, Path, description = "Order ID")),
    request_body = OrderStatusPayload,
    responses(
        (status = 200, description = "Order with its new status", body = OrderView),
        (status = 400, description = "Order ID is not an integer"),
        (status = 404, description = "Order not found"),
        (status = 422, description = "Status outside PENDING | IN_TRANSIT | DELIVERED")
    ),
    security(("bearer_jwt" = [])),
    tag = "Orders"
)]
pub async fn update_order_status(
    State(state): State<Arc<AppState>>,
    ValidatedPath(order_id): ValidatedPath<OrderId>,
    ValidatedJson(req): ValidatedJson<OrderStatusPayload>,
) -> ApiResult<Json<OrderView>> {
    let order = state.orders.set_status(order_id, req.order_status).await?;
    tracing::info!("Order {} status -> {}", order.id, order.order_status);
    Ok(Json(OrderView::from(order)))
}
