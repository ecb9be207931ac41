use crate::client::ApiClient;
use crate::data_models::AnalyticsEntry;
use crate::page_state::{Loader, PageState};
use crate::query_params::{ANALYTICS_PATH, SEARCH_PATH, crawled_sites_href};

use super::html::{self, escape};

/// Pages-per-domain summary. Loaded once; takes no parameters.
#[derive(Debug, Default)]
pub struct AnalyticsPage {
    loader: Loader<(), Vec<AnalyticsEntry>>,
}

impl AnalyticsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<Vec<AnalyticsEntry>> {
        self.loader.state()
    }

    /// Fetch on first call; later calls are no-ops unless the previous one
    /// failed.
    pub async fn load(&mut self, client: &ApiClient) -> bool {
        let tag = match self.loader.begin(()) {
            Some(tag) => tag,
            None => match self.loader.retry() {
                Some(tag) => tag,
                None => return false,
            },
        };
        let result = client.fetch_analytics().await;
        self.loader.resolve(tag, result);
        true
    }

    pub fn render(&self) -> String {
        let mut body = String::from("<h1>Analytics</h1>\n");
        body.push_str(&format!("<a href=\"{}\">Back to search</a>\n", SEARCH_PATH));

        match self.state() {
            PageState::Idle => {}
            PageState::Loading => body.push_str(html::loading()),
            PageState::Populated(entries) => {
                body.push_str(
                    "<table>\n<tr><th class=\"domain-cell\">Domain</th><th>No of pages scraped</th></tr>\n",
                );
                for entry in entries {
                    body.push_str(&format!(
                        "<tr><td class=\"domain-cell\"><a href=\"{}\">{}</a></td><td>{}</td></tr>\n",
                        escape(&crawled_sites_href(&entry.domain)),
                        escape(&entry.domain),
                        entry.count
                    ));
                }
                body.push_str("</table>\n");
            }
            PageState::Empty => body.push_str("<p>No domains crawled yet</p>\n"),
            PageState::Failed(message) => {
                body.push_str(&html::error_block(message, ANALYTICS_PATH));
            }
        }

        html::document("Analytics - Mini Search", &body)
    }
}
