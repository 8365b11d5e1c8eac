//! End-to-end tests: scheduler driving the dashboard against a mock help desk

use std::sync::Arc;

use deskdash::app::{Dashboard, DashboardSettings};
use deskdash::cache::ResponseCache;
use deskdash::data::ApiClient;
use deskdash::refresh::{RefreshConfig, RefreshScheduler};
use deskdash::ui::{ContainerId, Panel, RecordingView};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn startup_only() -> RefreshConfig {
    RefreshConfig {
        enabled: false,
        ..Default::default()
    }
}

fn build(server: &MockServer, view: Arc<RecordingView>, settings: DashboardSettings) -> Arc<Dashboard> {
    let client = ApiClient::new(&server.uri()).expect("Failed to build client");
    Arc::new(Dashboard::new(client, Arc::new(ResponseCache::new()), view, settings))
}

async fn mount_help_desk(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v2/requests.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "requests": [{
                "id": 1,
                "status": "open",
                "subject": "X",
                "url": "/t/1",
                "updated_at": "2024-01-01T00:00:00Z"
            }]
        })))
        .expect(2)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/help_center/articles.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "articles": [{ "id": 3, "title": "Reset a password", "html_url": "/a/3" }]
        })))
        .expect(2)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/community/posts.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [{
                "id": 4,
                "title": "Export tips",
                "html_url": "/p/4",
                "author": { "name": "Robin" },
                "comment_count": 2
            }]
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/help_center/sections/360000000123/articles.json"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_no_dashboard_container_performs_no_fetches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let view = Arc::new(RecordingView::without_dashboard());
    let dashboard = build(&server, view.clone(), DashboardSettings::default());

    let handle = RefreshScheduler::new(RefreshConfig::default(), dashboard).start();

    assert!(handle.is_none(), "Scheduler must not start without the dashboard");
    assert!(view.render_log().is_empty());
}

#[tokio::test]
async fn test_startup_fills_every_panel_and_isolates_failures() {
    let server = MockServer::start().await;
    mount_help_desk(&server).await;

    let view = Arc::new(RecordingView::full());
    let dashboard = build(&server, view.clone(), DashboardSettings::default());

    let mut handle = RefreshScheduler::new(startup_only(), dashboard)
        .start()
        .expect("Dashboard is present");
    handle.startup_settled().await;

    assert!(!handle.is_periodic());
    assert!(matches!(view.panel(ContainerId::MyTickets), Some(Panel::Items(_))));
    assert!(matches!(view.panel(ContainerId::CountyTickets), Some(Panel::Items(_))));
    assert!(matches!(view.panel(ContainerId::RecentArticles), Some(Panel::Items(_))));
    assert!(matches!(view.panel(ContainerId::PopularArticles), Some(Panel::Items(_))));
    assert!(matches!(view.panel(ContainerId::CommunityQuestions), Some(Panel::Items(_))));
    assert!(matches!(view.panel(ContainerId::CalendarWidget), Some(Panel::Calendar(_))));
    assert_eq!(view.panel(ContainerId::UpdatesFeed), Some(Panel::no_data("No updates")));
    assert_eq!(
        view.panel(ContainerId::StatusSnapshot),
        Some(Panel::no_data("No status available"))
    );
    assert_eq!(
        view.panel(ContainerId::DueThisWeek),
        Some(Panel::no_data("Nothing due this week"))
    );
    assert!(
        view.panel(ContainerId::SearchSuggestions).is_none(),
        "No query configured, search stays untouched"
    );
}

#[tokio::test]
async fn test_search_initializer_runs_configured_query() {
    let server = MockServer::start().await;
    mount_help_desk(&server).await;
    Mock::given(path("/api/v2/help_center/articles/search.json"))
        .and(query_param("query", "password"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "id": 3, "title": "Reset a password", "html_url": "/a/3" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let view = Arc::new(RecordingView::full());
    let settings = DashboardSettings {
        search_query: Some("password".to_string()),
        ..Default::default()
    };
    let dashboard = build(&server, view.clone(), settings);

    let mut handle = RefreshScheduler::new(startup_only(), dashboard)
        .start()
        .expect("Dashboard is present");
    handle.startup_settled().await;

    match view.panel(ContainerId::SearchSuggestions) {
        Some(Panel::Items(items)) => assert_eq!(items[0].title, "Reset a [password]"),
        other => panic!("Expected suggestions, got {:?}", other),
    }
}
