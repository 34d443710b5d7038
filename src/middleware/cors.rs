use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::error::{Error, Result};

/// Restricted to `origin` when one is configured, permissive otherwise.
pub fn cors_layer(origin: Option<&str>) -> Result<CorsLayer> {
    let Some(origin) = origin else {
        return Ok(CorsLayer::permissive());
    };

    let origin = origin
        .parse::<HeaderValue>()
        .map_err(|e| Error::Config(format!("invalid CORS_ALLOWED_ORIGIN: {}", e)))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers(Any))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_origin() {
        assert!(matches!(cors_layer(Some("bad\norigin")), Err(Error::Config(_))));
        assert!(cors_layer(Some("https://placements.example.edu")).is_ok());
        assert!(cors_layer(None).is_ok());
    }
}
