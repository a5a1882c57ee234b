use aide::axum::ApiRouter;
use axum::{response::Html, routing::get};

const INDEX_HTML: &str = include_str!("../../templates/index.html");

pub fn handler() -> ApiRouter {
    ApiRouter::new().route("/", get(index))
}

/// Upload form and gallery page
#[allow(clippy::unused_async)]
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
