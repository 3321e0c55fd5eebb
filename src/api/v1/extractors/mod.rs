/*
 * Responsibility
 * - handler に渡す extractor の公開窓口
 */
pub mod auth_ctx;
pub mod authorized;

pub use auth_ctx::AuthCtxExtractor;
pub use authorized::{Admin, AdminOnly, Authorized, RequiredRole};
