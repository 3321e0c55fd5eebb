/**
 * Responsibility
 *  - endpoint が要求する role のタグ型を宣言する
 *  - type AdminOnly = Authorized<Admin> のような alias
 *
 * 置かないもの
 *  - gate の判定ロジック / extractor 実装
 */
use super::core::{Authorized, RequiredRole};
use crate::services::auth::Role;

// admin
pub enum Admin {}

impl RequiredRole for Admin {
    fn role() -> Role {
        Role::admin()
    }
}

pub type AdminOnly = Authorized<Admin>;
