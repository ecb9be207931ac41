pub mod analytics;
pub mod crawled_sites;
pub mod html;
pub mod search;

pub use analytics::AnalyticsPage;
pub use crawled_sites::CrawledSitesList;
pub use search::SearchPage;

/// Page shown for unknown routes.
pub fn not_found(path: &str) -> String {
    html::document(
        "Not found - Mini Search",
        &format!(
            "<h1>Not found</h1>\n<p>No page at {}</p>\n<a href=\"/\">Back to search</a>",
            html::escape(path)
        ),
    )
}
