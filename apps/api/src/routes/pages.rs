use axum::response::Html;

/// GET /
/// Main page with the course recommendation form.
pub async fn index_page() -> Html<&'static str> {
    Html(include_str!("../../templates/index.html"))
}

/// GET /recommendations
/// Page that displays course recommendations.
pub async fn recommendations_page() -> Html<&'static str> {
    Html(include_str!("../../templates/recommendations.html"))
}

/// GET /courses
/// Page that lists the available courses.
pub async fn courses_page() -> Html<&'static str> {
    Html(include_str!("../../templates/courses.html"))
}
