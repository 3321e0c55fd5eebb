//! Menu catalog service: bearer-token authentication, role-gated writes and
//! an in-memory catalog of food and drink entries.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod repos;
pub mod services;
pub mod state;
pub mod validation;
