use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::Html,
};
use std::collections::HashMap;

use crate::page_state::PageState;
use crate::pages::{self, AnalyticsPage, CrawledSitesList, SearchPage};
use crate::query_params::{CrawledSitesParams, SearchParams};

use super::models::AppState;

type PageResponse = (StatusCode, Html<String>);

fn respond<T>(state: &PageState<T>, html: String) -> PageResponse {
    let status = match state {
        PageState::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    };
    (status, Html(html))
}

pub async fn search_page(
    State(app): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> PageResponse {
    let params = SearchParams::from_map(&raw);
    let mut page = SearchPage::new();
    page.load(&app.client, &params).await;
    respond(page.state(), page.render())
}

pub async fn analytics_page(State(app): State<AppState>) -> PageResponse {
    let mut page = AnalyticsPage::new();
    page.load(&app.client).await;
    respond(page.state(), page.render())
}

pub async fn crawled_sites_page(
    State(app): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> PageResponse {
    let params = CrawledSitesParams::from_map(&raw);
    let mut page = CrawledSitesList::new();
    page.load(&app.client, params).await;
    respond(page.state(), page.render())
}

pub async fn not_found(uri: Uri) -> PageResponse {
    (StatusCode::NOT_FOUND, Html(pages::not_found(uri.path())))
}
