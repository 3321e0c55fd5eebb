/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health, /menu を登録
 * - role が必要な範囲は handler 側の AdminOnly extractor で宣言する
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{
    health::health,
    menu::{create_menu_item, delete_menu_item, get_menu_item, list_menu, update_menu_item},
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/menu", get(list_menu).post(create_menu_item))
        .route(
            "/menu/{id}",
            get(get_menu_item)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
}
