//! Path identifier extractor that never rejects

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use tracing::debug;

/// Raw identifier segment of a request path.
///
/// A segment that cannot be decoded (invalid percent-encoding or UTF-8) is
/// kept as `None`, so handlers treat it like any other identifier that
/// matches no document instead of answering with a plain-text rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathId(pub Option<String>);

impl PathId {
    /// The decoded identifier, or an empty string when it could not be decoded
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(Self(Some(id))),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "Undecodable path identifier");
                Ok(Self(None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn echo(id: PathId) -> String {
        format!("{:?}", id.0)
    }

    async fn extract(uri: &str) -> String {
        let app = Router::new().route("/items/{id}", get(echo));
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_decoded_identifier() {
        assert_eq!(extract("/items/abc").await, "Some(\"abc\")");
        assert_eq!(extract("/items/a%20b").await, "Some(\"a b\")");
    }

    #[tokio::test]
    async fn test_undecodable_identifier_is_none() {
        assert_eq!(extract("/items/%FF").await, "None");
    }

    #[test]
    fn test_as_str() {
        assert_eq!(PathId(Some("abc".to_string())).as_str(), "abc");
        assert_eq!(PathId(None).as_str(), "");
    }
}
