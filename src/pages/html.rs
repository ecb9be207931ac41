//! Small HTML building blocks shared by the pages.

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap a page body in the common document shell.
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n\
         <body>\n{}\n</body>\n\
         </html>\n",
        escape(title),
        body
    )
}

pub fn loading() -> &'static str {
    "<p class=\"loading\">Loading...</p>"
}

/// Visible failure notice with a link that re-requests the same page.
pub fn error_block(message: &str, retry_href: &str) -> String {
    format!(
        "<div class=\"error\"><p>Something went wrong: {}</p><a href=\"{}\">Retry</a></div>",
        escape(message),
        escape(retry_href)
    )
}

/// Millisecond durations without trailing zeros: `42`, `3.5`, `0.27`.
pub fn format_millis(ms: f64) -> String {
    let s = format!("{:.2}", ms);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
