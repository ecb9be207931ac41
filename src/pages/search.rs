use crate::client::ApiClient;
use crate::data_models::{SearchResponse, SearchResult};
use crate::page_state::{Loader, PageState};
use crate::query_params::{ANALYTICS_PATH, SEARCH_PATH, SearchParams, search_href};

use super::html::{self, escape};

/// Search box plus ranked results for the committed `q` parameter.
#[derive(Debug, Default)]
pub struct SearchPage {
    loader: Loader<String, SearchResponse>,
    took_ms: Option<f64>,
}

impl SearchPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<SearchResponse> {
        self.loader.state()
    }

    pub fn query(&self) -> Option<&str> {
        self.loader.params().map(String::as_str)
    }

    /// Fetch results for `params` if the committed query changed.
    /// An empty query clears the page without touching the backend.
    /// Returns whether a request was issued.
    pub async fn load(&mut self, client: &ApiClient, params: &SearchParams) -> bool {
        let Some(q) = params.query() else {
            self.loader.reset();
            return false;
        };
        let Some(tag) = self.loader.begin(q.to_string()) else {
            return false;
        };
        let result = client.fetch_search_results(tag.params()).await;
        let took_ms = result.as_ref().ok().map(|resp| {
            tracing::info!(
                query = q,
                results = resp.results.len(),
                took_ms = resp.took_ms,
                "search completed"
            );
            resp.took_ms
        });
        if self.loader.resolve(tag, result) {
            self.took_ms = took_ms;
        }
        true
    }

    pub fn render(&self) -> String {
        let query = self.query().unwrap_or("");
        let centered = matches!(self.state(), PageState::Idle);

        let mut body = String::new();
        body.push_str(if centered {
            "<div class=\"search-centered\">\n"
        } else {
            "<div>\n"
        });
        body.push_str("<h1>Mini Search</h1>\n");
        body.push_str(&format!(
            "<form method=\"get\" action=\"{}\"><div class=\"search-container\">\
             <input class=\"search-input\" type=\"text\" name=\"q\" placeholder=\"Search...\" value=\"{}\">\
             <button type=\"submit\">Search</button></div></form>\n",
            SEARCH_PATH,
            escape(query)
        ));

        match self.state() {
            PageState::Idle => {}
            PageState::Loading => body.push_str(html::loading()),
            PageState::Populated(resp) => {
                body.push_str("<div class=\"search-results\">\n");
                body.push_str(&took_line(resp.took_ms));
                body.push_str("<ol>\n");
                for result in &resp.results {
                    body.push_str(&render_result(result));
                }
                body.push_str("</ol>\n</div>\n");
            }
            PageState::Empty => {
                body.push_str("<div class=\"search-results\">\n");
                if let Some(ms) = self.took_ms {
                    body.push_str(&took_line(ms));
                }
                body.push_str("<p>No results found</p>\n</div>\n");
            }
            PageState::Failed(message) => {
                body.push_str(&html::error_block(message, &search_href(query)));
            }
        }

        body.push_str(&format!(
            "<div class=\"view-analytics-container\"><a href=\"{}\">View Analytics</a></div>\n</div>",
            ANALYTICS_PATH
        ));

        let title = if query.is_empty() {
            "Mini Search".to_string()
        } else {
            format!("{} - Mini Search", query)
        };
        html::document(&title, &body)
    }
}

fn took_line(ms: f64) -> String {
    format!(
        "<span class=\"took\">Took {}ms</span>\n",
        html::format_millis(ms)
    )
}

fn render_result(result: &SearchResult) -> String {
    let mut item = format!(
        "<li class=\"search-result\"><a href=\"{}\">{}</a>",
        escape(&result.url),
        escape(if result.title.is_empty() {
            &result.url
        } else {
            &result.title
        })
    );
    if !result.heading.is_empty() && result.heading != result.title {
        item.push_str(&format!("<h3>{}</h3>", escape(&result.heading)));
    }
    if !result.snippet.is_empty() {
        item.push_str(&format!("<p class=\"snippet\">{}</p>", escape(&result.snippet)));
    }
    item.push_str(&format!("<cite>{}</cite>", escape(&result.url)));
    if let Some(at) = result.scraped_at_utc() {
        item.push_str(&format!(
            " <small>crawled {}</small>",
            at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    item.push_str("</li>\n");
    item
}
