//! Static page module
//!
//! The page is read from disk on every request, so edits show up without a
//! restart and a missing file only fails that one request.

use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

const LOAD_FAILED: &str = "Could not load page";

/// Serve the configured HTML document
pub async fn serve_index(index_file: &str) -> Response<Full<Bytes>> {
    match fs::read(index_file).await {
        Ok(content) => http::build_html_response(content),
        Err(e) => {
            logger::log_error(&format!("Failed to read page '{index_file}': {e}"));
            http::build_500_response(LOAD_FAILED)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use std::io::Write;

    #[tokio::test]
    async fn test_serves_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<h1>Artist Bio</h1>").unwrap();

        let response = serve_index(file.path().to_str().unwrap()).await;
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"],
            "text/html; charset=utf-8"
        );
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, "<h1>Artist Bio</h1>");
    }

    #[tokio::test]
    async fn test_missing_file_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("index.html");

        let response = serve_index(missing.to_str().unwrap()).await;
        assert_eq!(response.status(), 500);
        assert_eq!(response.headers()["content-type"], "text/plain");
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body, LOAD_FAILED);
    }
}
