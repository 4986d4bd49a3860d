use crate::shell::Shell;
use crate::views::search;
use crate::AppState;
use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, RawQuery, State};
use axum::response::Redirect;
use serde::Deserialize;

#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub main: String,
    pub notices: Vec<String>,
    /// JSON string literals, ready to be dropped into the page script.
    pub pushed: Vec<String>,
}

impl IndexTemplate {
    fn from_shell(title: &str, shell: &Shell) -> Self {
        Self {
            title: title.to_string(),
            main: shell.main_html(),
            notices: shell.notices(),
            pushed: shell
                .history()
                .iter()
                .filter_map(|url| serde_json::to_string(&format!("/{}", url)).ok())
                .collect(),
        }
    }
}

/// Page loads and back/forward reloads: the browser already has this history entry.
pub async fn page_handler(State(state): State<AppState>, RawQuery(query): RawQuery) -> IndexTemplate {
    let shell = Shell::new();
    state
        .router
        .pop_state(&shell, query.as_deref().unwrap_or_default())
        .await;
    IndexTemplate::from_shell(&state.config.title, &shell)
}

#[derive(Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub target: String,
}

/// Search bar submissions. The redirect is the one history entry a search creates;
/// the target page then renders as a replay, so reloads and back/forward never push.
pub async fn search_handler(Query(params): Query<SearchParams>) -> Redirect {
    Redirect::to(&format!("/{}", search::search_url(&params.target)))
}

#[cfg(test)]
mod tests {
    use crate::api_client::ApiError;
    use crate::config::WebuiConfig;
    use crate::router::Router as ViewRouter;
    use crate::views::testing::{block_entries, now, StubBackend};
    use crate::{app, AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn state() -> AppState {
        state_with(StubBackend {
            all: Some(json!({ "block": block_entries(2) })),
            search: Some(json!({ "allow": [], "block": block_entries(1), "iptables": [] })),
            ..Default::default()
        })
    }

    fn state_with(backend: StubBackend) -> AppState {
        let backend = Arc::new(backend);
        AppState {
            config: WebuiConfig {
                api_url: "http://blocky.test/api/".to_string(),
                listen_port: 8080,
                title: "Blocky/4".to_string(),
            },
            router: Arc::new(ViewRouter::with_clock(backend, Arc::new(now))),
        }
    }

    async fn get(uri: &str) -> (StatusCode, String) {
        get_with(state(), uri).await
    }

    async fn get_with(state: AppState, uri: &str) -> (StatusCode, String) {
        let response = app(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn page_load_renders_frontpage() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Recent activity (2 blocks in total)</h1>"));
        assert!(!body.contains("pushState"));
    }

    #[tokio::test]
    async fn page_load_replays_search_without_pushing() {
        let (status, body) = get("/?search:192.0.2.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Search results for 192.0.2.0:</h1>"));
        assert!(body.contains("<h2>Block list results (1)</h2>"));
        assert!(!body.contains("pushState"));
    }

    #[tokio::test]
    async fn search_bar_redirects_to_search_view() {
        let response = app(state())
            .oneshot(
                Request::builder()
                    .uri("/search?target=2001%3Adb8%3A%3A1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/?search:2001%3Adb8%3A%3A1");
    }

    #[tokio::test]
    async fn search_bar_keeps_target_verbatim() {
        let response = app(state())
            .oneshot(
                Request::builder()
                    .uri("/search?target=+192.0.2.0+")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/?search:%20192.0.2.0%20");
    }

    #[tokio::test]
    async fn reloading_a_search_never_pushes_history() {
        // Submit, follow the redirect, then reload the same entry (back/forward reloads too).
        let (status, _) = get("/search?target=192.0.2.0").await;
        assert_eq!(status, StatusCode::SEE_OTHER);

        for _ in 0..2 {
            let (status, body) = get("/?search:192.0.2.0").await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.contains("<h1>Search results for 192.0.2.0:</h1>"));
            assert!(!body.contains("pushState"));
        }
    }

    #[tokio::test]
    async fn failed_fetch_shows_one_alert_and_inline_error() {
        let state = state_with(StubBackend {
            failure: Some(ApiError::Status {
                code: 500,
                reason: "Internal Server Error".to_string(),
            }),
            ..Default::default()
        });
        let (status, body) = get_with(state, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.matches(r#"role="alert""#).count(), 1);
        assert!(body.contains(
            r#"<div class="alert" role="alert">HTTP Error 500: Internal Server Error</div>"#
        ));
        assert!(body.contains(
            "<p>Could not load recent activity: HTTP Error 500: Internal Server Error</p>"
        ));
        assert!(!body.contains("<table"));
    }

    #[tokio::test]
    async fn health_reports_api_url() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("http://blocky.test/api/"));
        assert!(body.contains(r#""title":"Blocky/4""#));
    }
}
