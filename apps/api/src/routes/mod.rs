pub mod health;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::admin::auth::require_admin;
use crate::admin::handlers as admin;
use crate::chat::handlers as chat;
use crate::content::handlers as public;
use crate::models::{AiToolData, CategoryData, ExperienceData, ProjectData, SkillData};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/logout", post(admin::handle_logout))
        .route("/chat/context/refresh", post(chat::handle_refresh_context))
        .nest("/projects", admin::crud_routes::<ProjectData>())
        .nest("/categories", admin::crud_routes::<CategoryData>())
        .nest("/skills", admin::crud_routes::<SkillData>())
        .nest("/experience", admin::crud_routes::<ExperienceData>())
        .nest("/aitools", admin::crud_routes::<AiToolData>())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/chat", post(chat::handle_chat))
        // Public site
        .route("/api/projects", get(public::handle_list_projects))
        .route("/api/projects/:id", get(public::handle_get_project))
        .route(
            "/api/projects/:id/presentation",
            post(public::handle_unlock_presentation),
        )
        .route("/api/experience", get(public::handle_list_experience))
        .route("/api/categories", get(public::handle_list_categories))
        .route("/api/skills", get(public::handle_list_skills))
        .route("/api/aitools", get(public::handle_list_ai_tools))
        // Admin
        .route("/api/admin/login", post(admin::handle_login))
        .nest("/api/admin", protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::chat::prompts::fallback_reply;
    use crate::config::OwnerProfile;
    use crate::store::MemoryStore;
    use crate::test_support::{
        category, project, test_state, StubGenerator, ADMIN_EMAIL, ADMIN_PASSWORD,
    };

    struct TestApp {
        store: Arc<MemoryStore>,
        generator: Arc<StubGenerator>,
        state: AppState,
    }

    impl TestApp {
        fn new(generator: StubGenerator) -> Self {
            let store = Arc::new(MemoryStore::new());
            let generator = Arc::new(generator);
            let state = test_state(store.clone(), generator.clone());
            Self {
                store,
                generator,
                state,
            }
        }

        async fn send(
            &self,
            method: Method,
            uri: &str,
            token: Option<&str>,
            body: Option<Value>,
        ) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(token) = token {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
            }
            let request = match body {
                Some(body) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = build_router(self.state.clone())
                .oneshot(request)
                .await
                .unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap()
            };
            (status, value)
        }

        async fn login(&self) -> String {
            let (status, body) = self
                .send(
                    Method::POST,
                    "/api/admin/login",
                    None,
                    Some(json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            body["token"].as_str().unwrap().to_string()
        }
    }

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let (status, body) = app.send(Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let app = TestApp::new(StubGenerator::replying("hi"));

        let (status, body) = app
            .send(Method::POST, "/api/chat", None, Some(json!({})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");

        let (status, _) = app
            .send(Method::POST, "/api/chat", None, Some(json!({"message": "  "})))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(app.generator.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_chat_provider_failure_degrades_to_fallback() {
        let app = TestApp::new(StubGenerator::failing());
        let (status, body) = app
            .send(
                Method::POST,
                "/api/chat",
                None,
                Some(json!({"message": "What do you build?"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], fallback_reply(&OwnerProfile::default()));
    }

    #[tokio::test]
    async fn test_chat_returns_generated_reply() {
        let app = TestApp::new(StubGenerator::replying("Mostly Rust services."));
        let (status, body) = app
            .send(
                Method::POST,
                "/api/chat",
                None,
                Some(json!({"message": "What do you build?"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Mostly Rust services.");
    }

    #[tokio::test]
    async fn test_admin_routes_require_session() {
        let app = TestApp::new(StubGenerator::replying("hi"));

        let (status, body) = app
            .send(Method::GET, "/api/admin/projects", None, None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");

        let (status, _) = app
            .send(
                Method::GET,
                "/api/admin/projects",
                Some("not-a-token"),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = app
            .send(
                Method::POST,
                "/api/admin/login",
                None,
                Some(json!({"email": ADMIN_EMAIL, "password": "wrong"})),
            )
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_admin_crud_flow() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let token = app.login().await;
        let token = Some(token.as_str());

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/categories",
                token,
                Some(json!({"name": "Web", "order": 0})),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let category_id = body["id"].as_str().unwrap().to_string();

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/projects",
                token,
                Some(json!({
                    "title": "Portfolio",
                    "description": "This site",
                    "tech": ["Rust"],
                    "featured": true,
                    "order": 1,
                    "categoryId": category_id,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let project_id = body["id"].as_str().unwrap().to_string();

        let uri = format!("/api/admin/projects/{project_id}");
        let (status, _) = app
            .send(
                Method::PATCH,
                &uri,
                token,
                Some(json!({"title": "Portfolio v2"})),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) = app.send(Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Portfolio v2");
        assert_eq!(body["description"], "This site");
        assert_eq!(body["categoryId"], category_id.as_str());

        let (status, _) = app.send(Method::DELETE, &uri, token, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = app.send(Method::GET, &uri, token, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app
            .send(
                Method::PATCH,
                "/api/admin/projects/missing",
                token,
                Some(json!({"title": "Ghost"})),
            )
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_create_rejects_project_without_category() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let token = app.login().await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/projects",
                Some(&token),
                Some(json!({"title": "Orphan"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Please select a category");
    }

    #[tokio::test]
    async fn test_admin_rejects_mistyped_bodies_as_json_validation_errors() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let token = app.login().await;

        let (status, body) = app
            .send(
                Method::POST,
                "/api/admin/skills",
                Some(&token),
                Some(json!({"name": "Go", "level": 300, "categoryId": "web"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["error"].is_string());

        let (_, body) = app
            .send(
                Method::POST,
                "/api/admin/categories",
                Some(&token),
                Some(json!({"name": "Web", "order": 0})),
            )
            .await;
        let uri = format!("/api/admin/categories/{}", body["id"].as_str().unwrap());
        let (status, body) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&token),
                Some(json!({"order": "first"})),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_admin_patch_accepts_comma_separated_tech() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let token = app.login().await;
        let id = app
            .state
            .content
            .add(&project("Portfolio", "web", 0, true))
            .await
            .unwrap();

        let uri = format!("/api/admin/projects/{id}");
        let (status, _) = app
            .send(
                Method::PATCH,
                &uri,
                Some(&token),
                Some(json!({"tech": "Rust, axum"})),
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = app.send(Method::GET, &uri, Some(&token), None).await;
        assert_eq!(body["tech"], json!(["Rust", "axum"]));
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let token = app.login().await;

        let (status, _) = app
            .send(Method::POST, "/api/admin/logout", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = app
            .send(Method::GET, "/api/admin/skills", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_public_projects_featured_and_listing() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let content = &app.state.content;
        let web = content.add(&category("Web", 0)).await.unwrap();
        content
            .add(&project("Portfolio", &web, 0, true))
            .await
            .unwrap();
        content
            .add(&project("Scraper", "tools", 1, false))
            .await
            .unwrap();

        let (status, body) = app.send(Method::GET, "/api/projects", None, None).await;
        assert_eq!(status, StatusCode::OK);
        let featured = body.as_array().unwrap();
        assert_eq!(featured.len(), 1);
        assert_eq!(featured[0]["title"], "Portfolio");

        let (_, body) = app
            .send(Method::GET, "/api/projects?scope=all", None, None)
            .await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let (_, body) = app
            .send(
                Method::GET,
                "/api/projects?scope=all&category=tools",
                None,
                None,
            )
            .await;
        let listed = body.as_array().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["title"], "Scraper");
    }

    #[tokio::test]
    async fn test_public_reads_degrade_to_empty_when_store_is_down() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        app.store.set_unavailable(true);

        let (status, body) = app.send(Method::GET, "/api/skills", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_presentation_unlock() {
        let app = TestApp::new(StubGenerator::replying("hi"));
        let mut locked = project("Deck", "web", 0, true);
        locked.presentation_url = Some("https://slides.example.com/deck".to_string());
        locked.presentation_passkey = Some("open sesame".to_string());
        let id = app.state.content.add(&locked).await.unwrap();

        let (status, body) = app
            .send(Method::GET, &format!("/api/projects/{id}"), None, None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["presentationLocked"], true);
        assert!(body["project"].get("presentationUrl").is_none());
        assert!(body["project"].get("presentationPasskey").is_none());
        assert!(body["category"].is_null());

        let uri = format!("/api/projects/{id}/presentation");
        let (status, _) = app
            .send(Method::POST, &uri, None, Some(json!({"passkey": "guess"})))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = app
            .send(
                Method::POST,
                &uri,
                None,
                Some(json!({"passkey": "open sesame"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["presentationUrl"], "https://slides.example.com/deck");
    }

    #[tokio::test]
    async fn test_refresh_context_picks_up_new_content() {
        let app = TestApp::new(StubGenerator::replying("ok"));
        let token = app.login().await;
        let chat = Some(json!({"message": "Tell me about your work"}));

        app.send(Method::POST, "/api/chat", None, chat.clone()).await;
        app.state
            .content
            .add(&project("Late Addition", "web", 3, true))
            .await
            .unwrap();

        app.send(Method::POST, "/api/chat", None, chat.clone()).await;
        assert!(!app.generator.prompts()[1].contains("Late Addition"));

        let (status, _) = app
            .send(
                Method::POST,
                "/api/admin/chat/context/refresh",
                Some(&token),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        app.send(Method::POST, "/api/chat", None, chat).await;
        assert!(app.generator.prompts()[2].contains("Late Addition"));
    }
}
