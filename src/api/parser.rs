// src/api/parser.rs
//! Turns raw API responses into domain values or typed errors.

use crate::error::{AppError, NotionErrorCode};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use reqwest::StatusCode;
use serde::Deserialize;

/// A response body with the metadata needed to interpret it.
#[derive(Debug)]
pub struct ApiResponse {
    pub body: String,
    pub status: StatusCode,
    pub url: String,
}

/// Notion's error object.
#[derive(Debug, Deserialize)]
struct NotionError {
    code: String,
    message: String,
}

/// Parses a successful body into `T`, or the error body into an `AppError`.
pub fn parse_api_response<T>(response: ApiResponse) -> Result<T, AppError>
where
    T: serde::de::DeserializeOwned,
{
    if !response.status.is_success() {
        return Err(parse_error(&response));
    }

    serde_json::from_str(&response.body).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", response.url, e);
        AppError::MalformedResponse(format!(
            "{} (from {}): {}",
            e,
            response.url,
            preview(&response.body)
        ))
    })
}

fn parse_error(response: &ApiResponse) -> AppError {
    match serde_json::from_str::<NotionError>(&response.body) {
        Ok(error) => AppError::NotionService {
            code: NotionErrorCode::from_api_response(&error.code),
            message: error.message,
            status: response.status,
        },
        Err(_) => AppError::NotionService {
            code: NotionErrorCode::from_http_status(response.status.as_u16()),
            message: format!("HTTP {} from {}", response.status, response.url),
            status: response.status,
        },
    }
}

fn preview(body: &str) -> String {
    if body.len() > ERROR_BODY_PREVIEW_LENGTH {
        let cut = (0..=ERROR_BODY_PREVIEW_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Page;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            body: body.to_string(),
            status: StatusCode::from_u16(status).unwrap(),
            url: "https://api.notion.com/v1/pages/x".to_string(),
        }
    }

    #[test]
    fn parses_success_bodies() {
        let body = r#"{"object":"page","id":"aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                       "parent":{"type":"workspace","workspace":true},"properties":{}}"#;
        let page: Page = parse_api_response(response(200, body)).unwrap();
        assert_eq!(page.id.as_str(), "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa");
    }

    #[test]
    fn notion_error_bodies_become_typed_errors() {
        let body = r#"{"object":"error","status":404,"code":"object_not_found","message":"gone"}"#;
        match parse_api_response::<Page>(response(404, body)) {
            Err(AppError::NotionService { code, message, .. }) => {
                assert_eq!(code, NotionErrorCode::ObjectNotFound);
                assert_eq!(message, "gone");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn unparseable_error_bodies_fall_back_to_status() {
        match parse_api_response::<Page>(response(502, "<html>bad gateway</html>")) {
            Err(AppError::NotionService { code, .. }) => {
                assert_eq!(code, NotionErrorCode::ServiceUnavailable)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn malformed_success_bodies_are_reported() {
        let err = parse_api_response::<Page>(response(200, "{\"id\": 3}")).unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse(_)));
    }
}
