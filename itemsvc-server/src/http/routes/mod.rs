//! Route handlers

pub mod greeting;
pub mod items;

use axum::http::{Method, StatusCode, Uri};

/// Fallback for unmatched routes: `404 Cannot <METHOD> <path>`.
pub async fn not_found(method: Method, uri: Uri) -> (StatusCode, String) {
    (
        StatusCode::NOT_FOUND,
        format!("Cannot {} {}", method, uri.path()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn not_found_names_method_and_path() {
        let (status, body) = not_found(Method::DELETE, Uri::from_static("/items/3?x=1")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, "Cannot DELETE /items/3");
    }
}
