use crate::client::ApiClient;
use crate::data_models::CrawledSitesPage;
use crate::page_state::{Loader, PageState};
use crate::query_params::{ANALYTICS_PATH, CrawledSitesParams};

use super::html::{self, escape};

/// Paginated crawled-URL listing driven by `domain`, `limit` and `offset`.
#[derive(Debug, Default)]
pub struct CrawledSitesList {
    loader: Loader<CrawledSitesParams, CrawledSitesPage>,
    params: CrawledSitesParams,
    // Last total the backend reported; paging buttons use it until a new
    // response arrives.
    total: u64,
}

impl CrawledSitesList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<CrawledSitesPage> {
        self.loader.state()
    }

    pub fn params(&self) -> &CrawledSitesParams {
        &self.params
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn show_prev(&self) -> bool {
        self.params.has_prev()
    }

    pub fn show_next(&self) -> bool {
        self.params.has_next(self.total)
    }

    pub async fn load(&mut self, client: &ApiClient, params: CrawledSitesParams) -> bool {
        self.params = params.clone();
        let Some(tag) = self.loader.begin(params) else {
            return false;
        };
        let result = client.fetch_crawled_sites(tag.params()).await;
        let total = result.as_ref().ok().map(|page| page.total);
        if self.loader.resolve(tag, result) {
            if let Some(total) = total {
                self.total = total;
            }
        }
        true
    }

    pub fn render(&self) -> String {
        let mut body = String::from("<h1>Crawled Sites</h1>\n");
        body.push_str(&format!("<a href=\"{}\">Back to analytics</a>\n", ANALYTICS_PATH));
        if let Some(domain) = &self.params.domain {
            body.push_str(&format!("<p class=\"filter\">Domain: {}</p>\n", escape(domain)));
        }

        match self.state() {
            PageState::Idle => {}
            PageState::Loading => body.push_str(html::loading()),
            PageState::Populated(page) => {
                body.push_str(&format!(
                    "<p class=\"showing\">Showing {}-{} of {} results</p>\n<ul>\n",
                    self.params.offset,
                    self.params.window_end(page.urls.len()),
                    page.total
                ));
                for url in &page.urls {
                    body.push_str(&format!(
                        "<li><a href=\"{0}\" target=\"_blank\" rel=\"noopener noreferrer\">{0}</a></li>\n",
                        escape(url)
                    ));
                }
                body.push_str("</ul>\n");
            }
            PageState::Empty => body.push_str("<p>No sites found</p>\n"),
            PageState::Failed(message) => {
                body.push_str(&html::error_block(message, &self.params.href()));
            }
        }

        if !self.state().is_loading() {
            body.push_str(&self.render_pagination());
        }

        html::document("Crawled Sites - Mini Search", &body)
    }

    fn render_pagination(&self) -> String {
        let mut nav = String::from("<nav class=\"pagination\">");
        if self.show_prev() {
            nav.push_str(&format!(
                "<a class=\"button\" href=\"{}\">Prev</a>",
                escape(&self.params.prev().href())
            ));
        }
        if self.show_next() {
            nav.push_str(&format!(
                "<a class=\"button\" href=\"{}\">Next</a>",
                escape(&self.params.next().href())
            ));
        }
        nav.push_str("</nav>\n");
        nav
    }
}
