/*
 * Responsibility
 * - Menu の request/response DTO
 * - validation は services::menu::MenuItemInput 側で行う (DTO は形だけ)
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{MenuItem, MenuType};
use crate::services::menu::MenuItemInput;

/// Body of `POST /menu` and `PUT /menu/{id}`.
///
/// Every field is optional on the wire so absent and `null` values surface as
/// field errors instead of JSON errors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_spicy: Option<bool>,
    pub is_cold: Option<bool>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

impl From<MenuItemRequest> for MenuItemInput {
    fn from(req: MenuItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            is_spicy: req.is_spicy,
            is_cold: req.is_cold,
            image: req.image,
            available: req.available,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItemQuery {
    pub menu_type: Option<String>,
}

impl CreateMenuItemQuery {
    /// Absent and unknown tags are both `None`; the factory rejects them.
    pub fn menu_type(&self) -> Option<MenuType> {
        self.menu_type.as_deref().and_then(|raw| raw.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_spicy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_cold: Option<bool>,
    pub menu_type: String,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            is_spicy: item.is_spicy(),
            is_cold: item.is_cold(),
            menu_type: item.menu_type().as_str().to_string(),
            name: item.name,
            description: item.description,
            price: item.price,
            available: item.available,
            image: item.image,
        }
    }
}
