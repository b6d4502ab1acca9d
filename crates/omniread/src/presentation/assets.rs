use axum::{
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use super::rest::error_response;

const INDEX: &str = "index.html";

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/web"]
struct Asset;

// serves embedded files by path, the application shell for everything else
pub async fn static_handler(req: Request) -> Response {
    let path = req.uri().path().trim_start_matches('/');

    match Asset::get(path).map(|content| (path, content)) {
        Some((path, content)) if !path.is_empty() => file_response(path, content.data.into_owned()),
        _ => match Asset::get(INDEX) {
            Some(content) => file_response(INDEX, content.data.into_owned()),
            None => error_response(StatusCode::NOT_FOUND, "not found"),
        },
    }
}

fn file_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    ([(header::CONTENT_TYPE, mime.to_string())], data).into_response()
}
