use axum::body::to_bytes;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;

use crate::shared::format::format_number;

/// Prints one console line per request with local time, duration, response
/// size, status, method and path
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    // Body is buffered to learn its real size
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(_) => {
            println!(
                "{}",
                format_line(parts.status, &method, &path, start.elapsed().as_millis(), None)
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    println!(
        "{}",
        format_line(
            parts.status,
            &method,
            &path,
            start.elapsed().as_millis(),
            Some(bytes.len())
        )
    );

    Response::from_parts(parts, Body::from(bytes))
}

/// Cyan time for 2xx, yellow otherwise
fn format_line(
    status: StatusCode,
    method: &Method,
    path: &str,
    millis: u128,
    size: Option<usize>,
) -> String {
    let color_code = if status.is_success() { "36" } else { "33" };
    let size = size.map(format_number).unwrap_or_else(|| "error".to_string());
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color_code,
        Local::now().format("%H:%M:%S"),
        millis,
        size,
        status.as_u16(),
        method,
        path
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_carries_status_method_and_path() {
        let line = format_line(
            StatusCode::CREATED,
            &Method::POST,
            "/api/pengajuan",
            12,
            Some(2048),
        );
        assert!(line.starts_with("\x1b[36m"));
        assert!(line.contains("201"));
        assert!(line.contains("POST /api/pengajuan"));
    }

    #[test]
    fn failed_requests_are_yellow() {
        let line = format_line(StatusCode::NOT_FOUND, &Method::GET, "/api/x", 1, None);
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.contains("error"));
    }
}
