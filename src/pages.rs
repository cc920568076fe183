//! Landing page.

use axum::response::Html;
use chrono::{NaiveDate, Utc};

pub const RESOURCES: &[&str] = &["users", "profiles", "articles", "comments", "tags"];

/// Alphabetically sorted items joined with ", ".
pub fn sorted_joined(items: &[&str]) -> String {
    let mut sorted = items.to_vec();
    sorted.sort_unstable();
    sorted.join(", ")
}

/// `MM dd, yyyy`, e.g. `03 26, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m %d, %Y").to_string()
}

pub fn render_index(today: NaiveDate) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><title>Conduit</title></head>\n<body>\n<h1>Conduit</h1>\n<p>Resources: {}</p>\n<p>{}</p>\n</body>\n</html>\n",
        sorted_joined(RESOURCES),
        format_date(today)
    )
}

pub async fn index() -> Html<String> {
    Html(render_index(Utc::now().date_naive()))
}
