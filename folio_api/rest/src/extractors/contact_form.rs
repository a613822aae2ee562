//! Decode contact form submissions sent as JSON, url encoded form or
//! multipart form data.

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{models::contact::ApiContactForm, routes::error};

#[async_trait]
impl<S> FromRequest<S> for ApiContactForm
where
    S: Send + Sync,
{
    type Rejection = ContactFormRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let formats = BodyFormat::candidates(&content_type);
        let headers = request.headers().clone();

        let body = Bytes::from_request(request, state)
            .await
            .map_err(ContactFormRejection::Body)?;
        if body.trim_ascii().is_empty() {
            return Ok(Self::default());
        }

        if let [BodyFormat::Multipart] = formats {
            let mut request = Request::new(Body::from(body));
            *request.headers_mut() = headers;
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|_| ContactFormRejection::InvalidFormData)?;
            return parse_multipart(multipart).await;
        }

        let body = String::from_utf8_lossy(&body);
        let mut last_error = ContactFormRejection::InvalidJson;
        for format in formats {
            match format.parse(&body) {
                Ok(form) => return Ok(form),
                Err(err) => last_error = err,
            }
        }
        Err(last_error)
    }
}

#[derive(Debug)]
pub enum ContactFormRejection {
    InvalidJson,
    InvalidFormData,
    Body(BytesRejection),
}

impl IntoResponse for ContactFormRejection {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidJson => error(StatusCode::BAD_REQUEST, "Invalid JSON"),
            Self::InvalidFormData => error(StatusCode::BAD_REQUEST, "Invalid form data"),
            Self::Body(rejection) => error(rejection.status(), "Could not read request body"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    UrlEncoded,
    Multipart,
}

impl BodyFormat {
    /// Formats to try in order for a (lowercase) content type.
    fn candidates(content_type: &str) -> &'static [Self] {
        if content_type.contains("application/json") {
            &[Self::Json]
        } else if content_type.contains("application/x-www-form-urlencoded") {
            &[Self::UrlEncoded]
        } else if content_type.contains("multipart/form-data") {
            &[Self::Multipart]
        } else {
            &[Self::Json, Self::UrlEncoded]
        }
    }

    /// Parse a non-empty text body. Multipart bodies are streamed instead and
    /// never reach this function.
    fn parse(self, body: &str) -> Result<ApiContactForm, ContactFormRejection> {
        match self {
            Self::Json => parse_json(body),
            Self::UrlEncoded => Ok(parse_url_encoded(body)),
            Self::Multipart => Err(ContactFormRejection::InvalidFormData),
        }
    }
}

fn parse_json(body: &str) -> Result<ApiContactForm, ContactFormRejection> {
    let value =
        serde_json::from_str::<Value>(body).map_err(|_| ContactFormRejection::InvalidJson)?;

    // a valid document which is not an object has no fields
    let Value::Object(object) = value else {
        return Ok(ApiContactForm::default());
    };

    Ok(object
        .into_iter()
        .filter_map(|(key, value)| Some((key, field_text(value)?)))
        .collect())
}

/// Text of a JSON field. `null`, `false`, `0` and objects count as missing,
/// arrays are joined with commas.
fn field_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("true".into()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    item => field_text(item).unwrap_or_default(),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Bool(false) | Value::Number(_) | Value::Object(_) => None,
    }
}

fn parse_url_encoded(body: &str) -> ApiContactForm {
    url::form_urlencoded::parse(body.as_bytes())
        .into_owned()
        .collect()
}

async fn parse_multipart(mut multipart: Multipart) -> Result<ApiContactForm, ContactFormRejection> {
    let mut form = ApiContactForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ContactFormRejection::InvalidFormData)?
    {
        let Some(name) = field.name().map(ToOwned::to_owned) else {
            continue;
        };

        // uploaded files are represented by their file name
        let file_name = field.file_name().map(ToOwned::to_owned);
        let value = match file_name {
            Some(file_name) => file_name,
            None => field
                .text()
                .await
                .map_err(|_| ContactFormRejection::InvalidFormData)?,
        };

        form.0.insert(name, value);
    }

    Ok(form)
}
