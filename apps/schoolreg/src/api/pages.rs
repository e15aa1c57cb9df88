//! Browser pages. Both are static and talk to `/api/schools` from the client.

use axum::response::Html;

/// Add-school form with an image preview.
pub const ADD_SCHOOL_PAGE: &str = include_str!("../../assets/index.html");

/// Card grid of registered schools.
pub const SHOW_SCHOOLS_PAGE: &str = include_str!("../../assets/show_schools.html");

pub async fn add_school() -> Html<&'static str> {
    Html(ADD_SCHOOL_PAGE)
}

pub async fn show_schools() -> Html<&'static str> {
    Html(SHOW_SCHOOLS_PAGE)
}
