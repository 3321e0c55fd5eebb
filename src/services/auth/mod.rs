/*
 * Responsibility
 * - 認証 / 認可まわりの service 群をまとめる
 * - HTTP (axum) 依存は middleware / extractor 側に寄せる
 */
pub mod auth_client;
pub mod authenticator;
pub mod context;
pub mod directory;
pub mod factory;
pub mod gate;
pub mod roles;
pub mod token_codec;

pub use authenticator::{AuthOutcome, Authenticator, Unauthenticated};
pub use context::{AuthCtx, Principal};
pub use factory::build_authenticator;
pub use roles::{Role, RoleSet};
pub use token_codec::{Claims, TokenCodec, TokenError};
