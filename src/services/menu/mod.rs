pub mod factory;
pub mod input;
pub mod service;

pub use input::MenuItemInput;
pub use service::{MenuError, MenuService};
