/*
 * Responsibility
 * - /menu 系 CRUD handler
 * - 書き込み系は AdminOnly extractor で role を要求する (body より先に評価される)
 * - extractor の rejection は AppError (400) に揃える
 */
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    api::v1::{
        dto::menu::{CreateMenuItemQuery, MenuItemRequest, MenuItemResponse},
        extractors::AdminOnly,
    },
    error::AppError,
    services::menu::MenuItemInput,
    state::AppState,
};

pub async fn list_menu(State(state): State<AppState>) -> Json<Vec<MenuItemResponse>> {
    Json(
        state
            .menu
            .list()
            .into_iter()
            .map(MenuItemResponse::from)
            .collect(),
    )
}

pub async fn get_menu_item(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MenuItemResponse>, AppError> {
    let Path(id) = id?;
    let item = state.menu.get(id)?;
    Ok(Json(item.into()))
}

pub async fn create_menu_item(
    State(state): State<AppState>,
    admin: AdminOnly,
    query: Result<Query<CreateMenuItemQuery>, QueryRejection>,
    body: Result<Json<MenuItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItemResponse>), AppError> {
    let Query(query) = query?;
    let Json(req) = body?;

    tracing::debug!(user = %admin.principal.username, menu_type = ?query.menu_type, "create menu item");
    let item = state.menu.add(query.menu_type(), &MenuItemInput::from(req))?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_menu_item(
    State(state): State<AppState>,
    admin: AdminOnly,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<MenuItemRequest>, JsonRejection>,
) -> Result<Json<MenuItemResponse>, AppError> {
    let Path(id) = id?;
    let Json(req) = body?;

    tracing::debug!(user = %admin.principal.username, %id, "update menu item");
    let item = state.menu.update(id, &MenuItemInput::from(req))?;

    Ok(Json(item.into()))
}

pub async fn delete_menu_item(
    State(state): State<AppState>,
    admin: AdminOnly,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MenuItemResponse>, AppError> {
    let Path(id) = id?;

    tracing::debug!(user = %admin.principal.username, %id, "delete menu item");
    let item = state.menu.delete(id)?;

    Ok(Json(item.into()))
}
