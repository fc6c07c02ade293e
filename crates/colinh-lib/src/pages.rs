//! Browser front-ends: a typed-text page and a voice page.
//!
//! Both call `POST /api/co-linh`. The voice page drives the browser's speech
//! recognition and speech synthesis with the settings in
//! [`colinh_core::speech`].

use axum::response::Html;

const TEXT_PAGE: &str = include_str!("../assets/index.html");
const VOICE_PAGE: &str = include_str!("../assets/voice.html");

pub async fn text_page() -> Html<&'static str> {
    Html(TEXT_PAGE)
}

pub async fn voice_page() -> Html<&'static str> {
    Html(VOICE_PAGE)
}
