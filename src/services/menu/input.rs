//! Untrusted creation/update input, independent of the HTTP body shape.
use crate::validation::{FieldErrors, ValidationError};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub is_spicy: Option<bool>,
    pub is_cold: Option<bool>,
    pub image: Option<String>,
    pub available: Option<bool>,
}

impl MenuItemInput {
    /// Every invalid field is reported, absent and `null` alike.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = FieldErrors::new();
        errors.check(not_blank(&self.name), "name", "Name cannot be empty");
        errors.check(
            not_blank(&self.description),
            "description",
            "Description cannot be empty",
        );
        errors.check(
            self.price.is_some_and(|p| p.is_finite() && p > 0.0),
            "price",
            "Price must be positive",
        );
        errors.finish()
    }

    pub(crate) fn name_or_empty(&self) -> String {
        self.name.clone().unwrap_or_default()
    }

    pub(crate) fn description_or_empty(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Price after `validate()`.
    pub(crate) fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or_default()
    }
}

fn not_blank(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}
