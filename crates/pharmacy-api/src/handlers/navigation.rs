//! Navigation menu handler.

use axum::Json;
use axum::extract::{Query, State};

use pharmacy_auth::navigation::{active_trail, build_menu};
use pharmacy_auth::rbac::PermissionEvaluator;

use crate::dto::request::NavigationQuery;
use crate::dto::response::{ApiResponse, NavigationResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/navigation?location=/admin/catalog/products
pub async fn navigation(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<NavigationQuery>,
) -> Json<ApiResponse<NavigationResponse>> {
    let evaluator = PermissionEvaluator::new(Some(&auth.profile));
    let items = build_menu(&state.menu, &evaluator);
    let location = query.location.as_deref().unwrap_or("/");
    let active = active_trail(&items, location);

    Json(ApiResponse::ok(NavigationResponse { items, active }))
}
