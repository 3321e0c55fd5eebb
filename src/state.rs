/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - menu: MenuService, auth: Authenticator
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::{auth::Authenticator, menu::MenuService};

#[derive(Clone, Debug)]
pub struct AppState {
    pub menu: Arc<MenuService>,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    pub fn new(menu: Arc<MenuService>, auth: Arc<Authenticator>) -> Self {
        Self { menu, auth }
    }
}
