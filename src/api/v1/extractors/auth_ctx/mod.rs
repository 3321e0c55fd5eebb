/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - middleware が extensions に入れた AuthCtx を handler に提供する
 * - AuthCtx の型定義は services::auth::context に置き、ここは axum 依存だけ
 *
 * Public API:
 * - AuthCtxExtractor
 */

mod core;

pub use core::AuthCtxExtractor;
