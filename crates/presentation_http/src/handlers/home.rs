//! Landing page listing the available routes

use axum::response::Html;

const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/&lt;start&gt;",
    "/api/v1.0/&lt;start&gt;/&lt;end&gt;",
];

/// Welcome text with one route per line
pub async fn home() -> Html<String> {
    let mut page = String::from("Welcome to the Climate API!<br>Available Routes:<br>");
    for route in ROUTES {
        page.push_str(route);
        page.push_str("<br>");
    }
    Html(page)
}
