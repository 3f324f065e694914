/*!
 * Session context extractor
 *
 * Responsibility:
 * - ログイン済みリクエストのコンテキスト (SessionCtx) を handler に提供する
 * - axum 依存は extractor に、型定義は types に分離する
 */

mod extractor;
mod types;

pub use extractor::SessionCtxExtractor;
pub use types::SessionCtx;
