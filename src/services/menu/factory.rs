//! Variant construction keyed by the `menuType` tag.
//!
//! Shared fields are validated before the tag so one response carries every
//! field error. Nothing is persisted here.
use uuid::Uuid;

use crate::models::{MenuItem, MenuItemKind, MenuType};
use crate::services::menu::MenuItemInput;
use crate::validation::ValidationError;

pub fn create(
    menu_type: Option<MenuType>,
    req: &MenuItemInput,
) -> Result<MenuItem, ValidationError> {
    req.validate()?;
    let menu_type = menu_type.ok_or(ValidationError::UnknownType)?;

    let kind = match menu_type {
        MenuType::Food => MenuItemKind::Food {
            is_spicy: req.is_spicy,
        },
        MenuType::Drink => MenuItemKind::Drink {
            is_cold: req.is_cold,
        },
    };

    Ok(MenuItem {
        id: Uuid::new_v4(),
        name: req.name_or_empty(),
        description: req.description_or_empty(),
        price: req.price_or_zero(),
        available: req.available.unwrap_or(true),
        image: req.image.clone(),
        kind,
    })
}

/// Apply an update body in place. `id` and the variant never change.
pub fn apply_update(item: &mut MenuItem, req: &MenuItemInput) {
    item.name = req.name_or_empty();
    item.description = req.description_or_empty();
    item.price = req.price_or_zero();
    item.image = req.image.clone();

    if let Some(available) = req.available {
        item.available = available;
    }

    match &mut item.kind {
        MenuItemKind::Food { is_spicy } => {
            if req.is_spicy.is_some() {
                *is_spicy = req.is_spicy;
            }
        }
        MenuItemKind::Drink { is_cold } => {
            if req.is_cold.is_some() {
                *is_cold = req.is_cold;
            }
        }
    }
}
