//! Admin credential gate.
//!
//! A static email/password check against configured credentials. A successful
//! login issues an opaque session token kept in process memory; restarting the
//! process logs everyone out. The admin API and the dashboard both require a
//! session.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Proof of a successful admin login. Only `AdminGate` can create one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    token: Uuid,
}

impl AdminSession {
    pub fn token(&self) -> Uuid {
        self.token
    }
}

#[derive(Clone)]
pub struct AdminGate {
    email: String,
    password: String,
    sessions: Arc<RwLock<HashSet<Uuid>>>,
}

impl AdminGate {
    pub fn new(email: String, password: String) -> Self {
        Self {
            email,
            password,
            sessions: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AdminSession, AppError> {
        if !email.eq_ignore_ascii_case(self.email.trim()) || password != self.password {
            warn!("Rejected admin login for {email}");
            return Err(AppError::Unauthorized);
        }

        let token = Uuid::new_v4();
        self.sessions.write().await.insert(token);
        info!("Admin session opened");
        Ok(AdminSession { token })
    }

    pub async fn logout(&self, session: &AdminSession) {
        self.sessions.write().await.remove(&session.token);
        info!("Admin session closed");
    }

    /// Resolves a bearer token to a live session.
    pub async fn session(&self, token: Uuid) -> Option<AdminSession> {
        self.sessions
            .read()
            .await
            .contains(&token)
            .then_some(AdminSession { token })
    }
}

fn bearer_token(request: &Request) -> Option<Uuid> {
    let value = request.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?;
    Uuid::parse_str(token.trim()).ok()
}

/// Middleware guarding `/api/admin/*`. Puts the resolved `AdminSession` into
/// request extensions for downstream handlers.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;
    let session = state
        .admin_gate
        .session(token)
        .await
        .ok_or(AppError::Unauthorized)?;

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}
