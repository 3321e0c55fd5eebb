/*
 * Responsibility
 * - カタログのエントリ (MenuItem) と variant (Food / Drink) の定義
 * - variant はサブクラスではなく enum で持つ
 */
use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::validation::ValidationError;

/// Type tag selecting the variant on creation (`?menuType=FOOD|DRINK`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuType {
    Food,
    Drink,
}

impl MenuType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuType::Food => "FOOD",
            MenuType::Drink => "DRINK",
        }
    }
}

impl fmt::Display for MenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MenuType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FOOD" => Ok(MenuType::Food),
            "DRINK" => Ok(MenuType::Drink),
            _ => Err(ValidationError::UnknownType),
        }
    }
}

/// Variant-specific payload. Exactly one per entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuItemKind {
    Food { is_spicy: Option<bool> },
    Drink { is_cold: Option<bool> },
}

impl MenuItemKind {
    pub fn menu_type(&self) -> MenuType {
        match self {
            MenuItemKind::Food { .. } => MenuType::Food,
            MenuItemKind::Drink { .. } => MenuType::Drink,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub available: bool,
    pub image: Option<String>,
    pub kind: MenuItemKind,
}

impl MenuItem {
    pub fn menu_type(&self) -> MenuType {
        self.kind.menu_type()
    }

    pub fn is_spicy(&self) -> Option<bool> {
        match self.kind {
            MenuItemKind::Food { is_spicy } => is_spicy,
            MenuItemKind::Drink { .. } => None,
        }
    }

    pub fn is_cold(&self) -> Option<bool> {
        match self.kind {
            MenuItemKind::Drink { is_cold } => is_cold,
            MenuItemKind::Food { .. } => None,
        }
    }
}
