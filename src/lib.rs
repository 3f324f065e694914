//! Session gate and dashboard shell.
//!
//! Every request in front of the page/API router passes through
//! [`gate::Gatekeeper`], which classifies the path, asks the injected
//! [`services::session::SessionVerifier`] for claims, and either lets the
//! request through or redirects to login, onboarding or the dashboard.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod gate;
pub mod middleware;
pub mod services;
pub mod state;
