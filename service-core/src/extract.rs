//! Request extractors that reject with [`AppError`] instead of axum's plain-text rejections.

use crate::error::AppError;
use axum::extract::FromRequest;

/// JSON body extractor whose rejection uses the `{"detail": ...}` error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use http_body_util::BodyExt;
    use serde::{Deserialize, Serialize};
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Serialize)]
    struct Echo {
        value: String,
    }

    fn router() -> Router {
        Router::new().route(
            "/echo",
            post(|AppJson(echo): AppJson<Echo>| async move { axum::Json(echo) }),
        )
    }

    #[tokio::test]
    async fn accepts_valid_json() {
        let response = router()
            .oneshot(
                Request::post("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"value":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request_with_detail() {
        let response = router()
            .oneshot(
                Request::post("/echo")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body:")
        );
    }

    #[tokio::test]
    async fn missing_content_type_is_bad_request() {
        let response = router()
            .oneshot(
                Request::post("/echo")
                    .body(Body::from(r#"{"value":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .contains("Content-Type")
        );
    }
}
