use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Response, routing, Router};
use folio_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use folio_models::contact::ContactMessage;

use super::{error, error_with_details, method_not_allowed, ok};
use crate::models::contact::ApiContactForm;

pub fn router(service: Arc<impl ContactFeatureService>) -> Router<()> {
    Router::new()
        .route(
            "/api/contact",
            routing::post(send_message).fallback(method_not_allowed),
        )
        .with_state(service)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    form: ApiContactForm,
) -> Response {
    let Ok(message) = ContactMessage::try_from(form) else {
        return error(StatusCode::BAD_REQUEST, "All fields are required");
    };

    match service.send_message(message).await {
        Ok(()) => ok(),
        Err(ContactSendMessageError::NotConfigured) => error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Contact relay is not configured",
        ),
        Err(ContactSendMessageError::Send { details }) => {
            error_with_details(StatusCode::BAD_GATEWAY, "Could not send message", details)
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Method, Request},
    };
    use folio_core_contact_contracts::MockContactFeatureService;
    use folio_models::contact::ContactMessageAuthor;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;

    const JSON_BODY: &str = r#"{"name":"Alice","email":"a@example.com","message":"Hi"}"#;

    #[tokio::test]
    async fn json_ok() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(alice(), Ok(()));

        // Act
        let (status, body) = call(service, post(Some("application/json"), JSON_BODY)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn url_encoded_ok() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(bob(), Ok(()));

        // Act
        let (status, body) = call(
            service,
            post(
                Some("application/x-www-form-urlencoded"),
                "name=Bob&email=b%40x.com&message=Hello",
            ),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn multipart_ok() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(bob(), Ok(()));

        let body = [("name", "Bob"), ("email", "b@x.com"), ("message", "Hello")]
            .into_iter()
            .map(|(name, value)| {
                format!(
                    "--XBOUNDARY\r\nContent-Disposition: form-data; \
                     name=\"{name}\"\r\n\r\n{value}\r\n"
                )
            })
            .chain(["--XBOUNDARY--\r\n".into()])
            .collect::<String>();

        // Act
        let (status, body) = call(
            service,
            post(Some("multipart/form-data; boundary=XBOUNDARY"), &body),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn fallback_without_content_type() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(bob(), Ok(()));

        // Act
        let (status, _) = call(service, post(None, "name=Bob&email=b@x.com&message=Hello")).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn fallback_json_with_other_content_type() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(alice(), Ok(()));

        // Act
        let (status, _) = call(service, post(Some("text/plain"), JSON_BODY)).await;

        // Assert
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn wrong_method() {
        for method in [Method::GET, Method::PUT, Method::DELETE, Method::PATCH] {
            // Arrange
            let service = MockContactFeatureService::new();
            let request = Request::builder()
                .method(method)
                .uri("/api/contact")
                .body(Body::empty())
                .unwrap();

            // Act
            let (status, body) = call(service, request).await;

            // Assert
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
            assert_eq!(body, json!({"ok": false, "error": "Method not allowed"}));
        }
    }

    #[tokio::test]
    async fn missing_fields() {
        for body in [
            r#"{"name":"Alice","email":"a@example.com"}"#,
            r#"{"name":"Alice","email":"a@example.com","message":""}"#,
            r#"{"name":"   ","email":"a@example.com","message":"Hi"}"#,
            r#"{"name":"Alice","email":"\t\n","message":"Hi"}"#,
            r#"{"name":null,"email":"a@example.com","message":"Hi"}"#,
            "[]",
            "",
            "   ",
        ] {
            // Arrange
            let service = MockContactFeatureService::new();

            // Act
            let (status, response) = call(service, post(Some("application/json"), body)).await;

            // Assert
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body:?}");
            assert_eq!(
                response,
                json!({"ok": false, "error": "All fields are required"})
            );
        }
    }

    #[tokio::test]
    async fn malformed_json() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = call(service, post(Some("application/json"), "{bad")).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"ok": false, "error": "Invalid JSON"}));
    }

    #[tokio::test]
    async fn malformed_multipart() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = call(
            service,
            post(Some("multipart/form-data; boundary=XBOUNDARY"), "garbage"),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"ok": false, "error": "Invalid form data"}));
    }

    #[tokio::test]
    async fn multipart_empty_body() {
        // Arrange
        let service = MockContactFeatureService::new();

        // Act
        let (status, body) = call(
            service,
            post(Some("multipart/form-data; boundary=XBOUNDARY"), ""),
        )
        .await;

        // Assert
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"ok": false, "error": "All fields are required"}));
    }

    #[tokio::test]
    async fn not_configured() {
        // Arrange
        let service = MockContactFeatureService::new()
            .with_send_message(alice(), Err(ContactSendMessageError::NotConfigured));

        // Act
        let (status, body) = call(service, post(Some("application/json"), JSON_BODY)).await;

        // Assert
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"ok": false, "error": "Contact relay is not configured"})
        );
    }

    #[tokio::test]
    async fn upstream_error() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(
            alice(),
            Err(ContactSendMessageError::Send {
                details: Some(r#"{"ok":false,"description":"Unauthorized"}"#.into()),
            }),
        );

        // Act
        let (status, body) = call(service, post(Some("application/json"), JSON_BODY)).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(
            body,
            json!({
                "ok": false,
                "error": "Could not send message",
                "details": r#"{"ok":false,"description":"Unauthorized"}"#,
            })
        );
    }

    #[tokio::test]
    async fn upstream_error_without_details() {
        // Arrange
        let service = MockContactFeatureService::new().with_send_message(
            alice(),
            Err(ContactSendMessageError::Send { details: None }),
        );

        // Act
        let (status, body) = call(service, post(Some("application/json"), JSON_BODY)).await;

        // Assert
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"ok": false, "error": "Could not send message"}));
    }

    #[tokio::test]
    async fn duplicate_requests_are_relayed_twice() {
        // Arrange
        let mut service = MockContactFeatureService::new();
        service
            .expect_send_message()
            .times(2)
            .returning(|_| Box::pin(std::future::ready(Ok(()))));
        let router = router(Arc::new(service));

        for _ in 0..2 {
            // Act
            let response = router
                .clone()
                .oneshot(post(Some("application/json"), JSON_BODY))
                .await
                .unwrap();

            // Assert
            assert_eq!(response.status(), StatusCode::OK);
        }
    }

    async fn call(service: MockContactFeatureService, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(Arc::new(service)).oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn post(content_type: Option<&str>, body: &str) -> Request<Body> {
        let mut request = Request::builder().method(Method::POST).uri("/api/contact");
        if let Some(content_type) = content_type {
            request = request.header(CONTENT_TYPE, content_type);
        }
        request.body(Body::from(body.to_owned())).unwrap()
    }

    fn alice() -> ContactMessage {
        ContactMessage {
            author: ContactMessageAuthor {
                name: "Alice".try_into().unwrap(),
                email: "a@example.com".try_into().unwrap(),
            },
            content: "Hi".try_into().unwrap(),
        }
    }

    fn bob() -> ContactMessage {
        ContactMessage {
            author: ContactMessageAuthor {
                name: "Bob".try_into().unwrap(),
                email: "b@x.com".try_into().unwrap(),
            },
            content: "Hello".try_into().unwrap(),
        }
    }
}
