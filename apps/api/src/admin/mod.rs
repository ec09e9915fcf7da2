// Admin surface: the credential gate, the CRUD API behind it, and the
// dashboard state machine that drives CRUD workflows.

pub mod auth;
pub mod dashboard;
pub mod handlers;

pub use auth::{AdminGate, AdminSession};
