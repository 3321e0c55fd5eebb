/*
 * Responsibility
 * - factory (生成 + validation) と repo (保存) をつなぐ
 * - 見つからない / validation 失敗は MenuError で返し、HTTP への変換は error.rs に任せる
 */
use thiserror::Error;
use uuid::Uuid;

use crate::models::{MenuItem, MenuType};
use crate::repos::MenuRepo;
use crate::services::menu::{MenuItemInput, factory};
use crate::validation::ValidationError;

#[derive(Debug, Error, PartialEq)]
pub enum MenuError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("menu item not found")]
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct MenuService {
    repo: MenuRepo,
}

impl MenuService {
    pub fn new(repo: MenuRepo) -> Self {
        Self { repo }
    }

    pub fn add(
        &self,
        menu_type: Option<MenuType>,
        req: &MenuItemInput,
    ) -> Result<MenuItem, MenuError> {
        let item = factory::create(menu_type, req)?;
        let saved = self.repo.save(item);
        tracing::info!(id = %saved.id, menu_type = %saved.menu_type(), "menu item created");
        Ok(saved)
    }

    pub fn list(&self) -> Vec<MenuItem> {
        self.repo.find_all()
    }

    pub fn get(&self, id: Uuid) -> Result<MenuItem, MenuError> {
        self.repo.find_by_id(id).ok_or(MenuError::NotFound)
    }

    pub fn update(&self, id: Uuid, req: &MenuItemInput) -> Result<MenuItem, MenuError> {
        req.validate()?;
        let updated = self
            .repo
            .modify(id, |item| factory::apply_update(item, req))
            .ok_or(MenuError::NotFound)?;
        tracing::info!(id = %updated.id, "menu item updated");
        Ok(updated)
    }

    pub fn delete(&self, id: Uuid) -> Result<MenuItem, MenuError> {
        let removed = self.repo.delete(id).ok_or(MenuError::NotFound)?;
        tracing::info!(id = %removed.id, "menu item deleted");
        Ok(removed)
    }
}
