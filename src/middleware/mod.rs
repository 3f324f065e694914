/*
 * Responsibility
 * - middleware の公開インターフェース
 * - gate (セッション判定), http (request id / trace / timeout), security_headers
 */
pub mod gate;
pub mod http;
pub mod security_headers;
