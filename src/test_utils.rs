//! Helpers for inspecting HTML responses in tests.
#![allow(missing_docs)]

use axum::{body::Body, response::Response};
use scraper::{Html, Selector};

pub(crate) async fn parse_html_document(response: Response<Body>) -> Html {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not get response body");

    Html::parse_document(&String::from_utf8_lossy(&body))
}

#[track_caller]
pub(crate) fn assert_valid_html(html: &Html) {
    assert!(
        html.errors.is_empty(),
        "Got HTML parsing errors: {:?}",
        html.errors
    );
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let content_type_header = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");

    assert_eq!(content_type_header, content_type);
}

/// The text inside the first element matching `selector`.
#[track_caller]
pub(crate) fn text_of(document: &Html, selector: &str) -> String {
    let parsed = Selector::parse(selector).expect("Invalid CSS selector");

    document
        .select(&parsed)
        .next()
        .unwrap_or_else(|| panic!("Could not find an element matching {selector:?}"))
        .text()
        .collect()
}
