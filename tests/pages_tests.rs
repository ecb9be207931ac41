use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mini_search::api::{AppState, create_router};
use mini_search::client::ApiClient;
use mini_search::config::ApiConfig;
use mini_search::page_state::PageState;
use mini_search::pages::{AnalyticsPage, CrawledSitesList, SearchPage};
use mini_search::query_params::{CrawledSitesParams, SearchParams, parse_query};

mod test_helpers {
    use super::*;

    pub fn client_for(server: &MockServer) -> ApiClient {
        let config = ApiConfig::new(&server.uri(), Some(Duration::from_secs(5))).unwrap();
        ApiClient::new(config).unwrap()
    }

    /// Issue one GET against a router wired to `server` and return status and body.
    pub async fn get_page(server: &MockServer, uri: &str) -> (StatusCode, String) {
        let app = create_router(AppState::new(client_for(server)), "static");
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    pub async fn mount_crawled(server: &MockServer, offset: &str, urls: Vec<String>, total: u64) {
        Mock::given(method("GET"))
            .and(path("/api/crawled_urls"))
            .and(query_param("offset", offset))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"urls": urls, "total": total})),
            )
            .mount(server)
            .await;
    }

    pub fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://example.com/page/{}", i)).collect()
    }
}

use test_helpers::*;

// =============================================================================
// Search page
// =============================================================================

#[tokio::test]
async fn test_search_renders_results_and_timing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .and(query_param("q", "cats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "title": "A",
                "url": "u1",
                "heading": "",
                "snippet": "all about cats",
                "score": 1.0,
                "scraped_at": 0
            }],
            "took_ms": 42
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_page(&server, "/?q=cats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<li class=\"search-result\">").count(), 1);
    assert!(body.contains("<a href=\"u1\">A</a>"));
    assert!(body.contains("Took 42ms"));
    assert!(body.contains("all about cats"));
    assert!(!body.contains("search-centered"));
}

#[tokio::test]
async fn test_search_empty_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"results": [], "took_ms": 3})),
        )
        .mount(&server)
        .await;

    let (status, body) = get_page(&server, "/?q=nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No results found"));
    assert!(!body.contains("<ol>"));
    assert!(body.contains("Took 3ms"));
}

#[tokio::test]
async fn test_empty_query_does_not_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    for uri in ["/", "/?q=", "/?q=%20%20"] {
        let (status, body) = get_page(&server, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("search-centered"));
        assert!(body.contains("View Analytics"));
    }
}

#[tokio::test]
async fn test_search_escapes_user_input() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "<b>bold</b>", "url": "https://x.test/?a=1&b=2"}],
            "took_ms": 1
        })))
        .mount(&server)
        .await;

    let (_, body) = get_page(&server, "/?q=%3Cscript%3E").await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("value=\"&lt;script&gt;\""));
    assert!(body.contains("&lt;b&gt;bold&lt;/b&gt;"));
    assert!(body.contains("href=\"https://x.test/?a=1&amp;b=2\""));
}

#[tokio::test]
async fn test_search_backend_failure_is_visible() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index unavailable"))
        .mount(&server)
        .await;

    let (status, body) = get_page(&server, "/?q=cats").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Something went wrong"));
    assert!(body.contains("href=\"/?q=cats\">Retry</a>"));
    assert!(!body.contains("Loading..."));
}

#[tokio::test]
async fn test_search_page_same_query_fetches_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{"title": "A", "url": "u1"}],
            "took_ms": 2
        })))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = SearchPage::new();
    let cats = SearchParams::from_map(&parse_query("q=cats"));
    let dogs = SearchParams::from_map(&parse_query("q=dogs"));

    assert!(page.load(&client, &cats).await);
    let first = page.render();
    assert!(!page.load(&client, &cats).await);
    assert_eq!(page.render(), first);
    assert!(page.load(&client, &dogs).await);
    assert_eq!(page.query(), Some("dogs"));

    assert!(!page.load(&client, &SearchParams::default()).await);
    assert_eq!(page.state(), &PageState::Idle);
}

// =============================================================================
// Analytics page
// =============================================================================

#[tokio::test]
async fn test_analytics_table_rows_link_to_domain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"domain": "example.com", "count": 23},
            {"domain": "books.toscrape.com", "count": 7},
            {"domain": "a b.org", "count": 1}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = get_page(&server, "/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.matches("<td class=\"domain-cell\">").count(), 3);
    assert!(body.contains(
        "<a href=\"/analytics/crawled_sites?domain=example.com\">example.com</a></td><td>23</td>"
    ));
    assert!(body.contains("/analytics/crawled_sites?domain=books.toscrape.com"));
    assert!(body.contains("/analytics/crawled_sites?domain=a%20b.org"));
    assert!(body.contains("Back to search"));
}

#[tokio::test]
async fn test_analytics_empty_and_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (_, body) = get_page(&server, "/analytics").await;
    assert!(body.contains("No domains crawled yet"));
    assert!(!body.contains("<table>"));

    let down = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&down)
        .await;
    let (status, body) = get_page(&down, "/analytics").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("href=\"/analytics\">Retry</a>"));
}

#[tokio::test]
async fn test_analytics_page_retries_only_after_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/analytics"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"domain": "a.com", "count": 1}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut page = AnalyticsPage::new();
    assert!(page.load(&client).await);
    assert!(matches!(page.state(), PageState::Failed(_)));

    assert!(page.load(&client).await);
    assert!(matches!(page.state(), PageState::Populated(entries) if entries.len() == 1));

    assert!(!page.load(&client).await);
}

// =============================================================================
// Crawled sites page
// =============================================================================

#[tokio::test]
async fn test_crawled_sites_middle_page_shows_both_buttons() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/crawled_urls"))
        .and(query_param("domain", "example.com"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "urls": urls(5),
            "total": 23
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) =
        get_page(&server, "/analytics/crawled_sites?domain=example.com&limit=5&offset=10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Showing 10-15 of 23 results"));
    assert_eq!(body.matches("target=\"_blank\"").count(), 5);
    assert!(body.contains(
        "href=\"/analytics/crawled_sites?domain=example.com&amp;limit=5&amp;offset=5\">Prev</a>"
    ));
    assert!(body.contains(
        "href=\"/analytics/crawled_sites?domain=example.com&amp;limit=5&amp;offset=15\">Next</a>"
    ));
}

#[tokio::test]
async fn test_crawled_sites_first_page_has_no_prev() {
    let server = MockServer::start().await;
    mount_crawled(&server, "0", urls(10), 30).await;

    let (_, body) = get_page(&server, "/analytics/crawled_sites").await;
    assert!(!body.contains(">Prev</a>"));
    assert!(body.contains("limit=10&amp;offset=10\">Next</a>"));
    assert!(body.contains("Showing 0-10 of 30 results"));
}

#[tokio::test]
async fn test_crawled_sites_last_page_has_no_next() {
    let server = MockServer::start().await;
    mount_crawled(&server, "20", urls(3), 23).await;

    let (_, body) = get_page(&server, "/analytics/crawled_sites?offset=20").await;
    assert!(body.contains(">Prev</a>"));
    assert!(!body.contains(">Next</a>"));
    assert!(body.contains("Showing 20-23 of 23 results"));
}

#[tokio::test]
async fn test_crawled_sites_prev_clamps_to_zero() {
    let server = MockServer::start().await;
    mount_crawled(&server, "3", urls(10), 50).await;

    let (_, body) = get_page(&server, "/analytics/crawled_sites?limit=10&offset=3").await;
    assert!(body.contains("href=\"/analytics/crawled_sites?limit=10&amp;offset=0\">Prev</a>"));
}

#[tokio::test]
async fn test_crawled_sites_huge_offset_renders() {
    let server = MockServer::start().await;
    let huge = usize::MAX.to_string();
    mount_crawled(&server, &huge, vec!["a".to_string()], 5).await;

    let (status, body) = get_page(
        &server,
        &format!("/analytics/crawled_sites?offset={}&limit=10", huge),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("Showing {0}-{0} of 5 results", huge)));
    assert!(body.contains(">Prev</a>"));
    assert!(!body.contains(">Next</a>"));
}

#[tokio::test]
async fn test_crawled_sites_empty() {
    let server = MockServer::start().await;
    mount_crawled(&server, "40", vec![], 23).await;

    let (status, body) = get_page(&server, "/analytics/crawled_sites?offset=40").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No sites found"));
    assert!(!body.contains("<ul>"));
    assert!(body.contains(">Prev</a>"));
    assert!(!body.contains(">Next</a>"));
}

#[tokio::test]
async fn test_crawled_sites_list_navigation() {
    let server = MockServer::start().await;
    mount_crawled(&server, "10", urls(5), 23).await;
    mount_crawled(&server, "15", urls(5), 20).await;

    let client = client_for(&server);
    let mut page = CrawledSitesList::new();
    let params = CrawledSitesParams::from_query_str("domain=example.com&limit=5&offset=10");

    assert!(page.load(&client, params.clone()).await);
    assert!(page.show_prev());
    assert!(page.show_next());
    assert_eq!(page.total(), 23);

    // no-op navigation reuses the current listing
    let before = page.render();
    assert!(!page.load(&client, params.clone()).await);
    assert_eq!(page.render(), before);

    let next = params.next();
    assert_eq!(next.offset, 15);
    assert!(page.load(&client, next).await);
    assert_eq!(page.params().offset, 15);
    assert_eq!(page.total(), 20);
    assert!(!page.show_next());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_unknown_route_is_404() {
    let server = MockServer::start().await;
    let (status, body) = get_page(&server, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("No page at /nope"));
}
