//! Portfolio site backend.
//!
//! Serves the public portfolio content, relays visitor chat questions to the
//! generative-language API, and exposes the admin CRUD surface. The admin
//! dashboard state machine (`admin::dashboard::AdminDashboard`) drives the same
//! content façades the HTTP handlers use.

pub mod admin;
pub mod chat;
pub mod config;
pub mod content;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
#[cfg(test)]
mod test_support;
