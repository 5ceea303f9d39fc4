//! Per-user order queries

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
};

use super::super::state::AppState;
use super::super::types::{ApiError, ApiResult, OrderView, ValidatedPath};
use crate::models::{OrderId, User, UserId};
use crate::user_auth::Caller;

/// Load the user addressed by the path, applying the owner scope if enabled
async fn load_path_user(state: &AppState, caller: &Caller, user_id: UserId) -> ApiResult<User> {
    let user = state
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(ApiError::user_not_found)?;

    if state.enforce_owner_scope && user.username != caller.username {
        tracing::warn!(
            "{} denied access to orders of user {}",
            caller.username,
            user_id
        );
        return ApiError::forbidden("Orders of other users are not accessible").into_err();
    }
    Ok(user)
}

/// Get a user's specific order
///
/// Returns `null` when the order does not exist or belongs to someone else.
///
/// GET /user/{user_id}/order/{order_id}/
#[utoipa::path(
    get,
    path = "/user/{user_id}/order/{order_id}/",
    params(
        ("user_id" = i64, Path, description = "User ID"),
        ("order_id" = i64, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "The order, or null", body = Option<OrderView>),
        (status = 400, description = "ID is not an integer"),
        (status = 403, description = "Owner scope enforced and caller is not the user"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "User Orders"
)]
pub async fn get_user_order(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    ValidatedPath((user_id, order_id)): ValidatedPath<(UserId, OrderId)>,
) -> ApiResult<Json<Option<OrderView>>> {
    let user = load_path_user(&state, &caller, user_id).await?;
    let order = state.orders.get_for_user(user.id, order_id).await?;
    Ok(Json(order.map(OrderView::from)))
}

/// Get all orders of one user
///
/// GET /user/{user_id}/orders
#[utoipa::path(
    get,
    path = "/user/{user_id}/orders",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "The user's orders", body = Vec<OrderView>),
        (status = 400, description = "ID is not an integer"),
        (status = 403, description = "Owner scope enforced and caller is not the user"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_jwt" = [])),
    tag = "User Orders"
)]
pub async fn list_user_orders(
    State(state): State<Arc<AppState>>,
    Extension(caller): Extension<Caller>,
    ValidatedPath(user_id): ValidatedPath<UserId>,
) -> ApiResult<Json<Vec<OrderView>>> {
    let user = load_path_user(&state, &caller, user_id).await?;
    let orders = state.orders.list_for_user(user.id).await?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}
