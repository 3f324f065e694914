/*
 * Responsibility
 * - path の分類 (public / auth-only / protected) と除外判定
 * - セッション有無 + onboarding 状態からの遷移判定 (Continue / Redirect)
 * - HTTP への配線は middleware::gate 側
 */
pub mod decision;
pub mod gatekeeper;
pub mod routes;

pub use decision::Decision;
pub use gatekeeper::{GateOutcome, Gatekeeper};
pub use routes::{PathClass, RouteConfig};
