//! Thin JSON client over `gloo-net`.
//!
//! Every request carries the stored bearer token. A 401 clears the token and
//! sends the browser to the login page; other failures come back as
//! [`ApiError`] with the backend's `detail` text when there is one.

use contracts::shared::ApiError;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::api_utils::api_url;
use crate::system::auth::storage::{bearer_header, clear_tokens, get_access_token};

const LOGIN_PATH: &str = "/login";

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match get_access_token() {
        Some(token) => builder.header("Authorization", &bearer_header(&token)),
        None => builder,
    }
}

/// `GET path` and decode the JSON body.
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_json(path, response).await
}

/// `POST path` with a JSON body and decode the JSON response.
pub async fn post_json<B, T>(path: &str, body: &B) -> Result<T, ApiError>
where
    B: Serialize,
    T: DeserializeOwned,
{
    let response = authorized(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| ApiError::Payload(format!("failed to encode request: {}", e)))?
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_json(path, response).await
}

/// `DELETE path` and decode the JSON response.
pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
    let response = authorized(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| network_error(path, e))?;
    read_json(path, response).await
}

/// Drop the session and leave for the login page.
pub fn sign_out() {
    clear_tokens();
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(LOGIN_PATH) {
            log::error!("Failed to redirect to login: {:?}", e);
        }
    }
}

fn network_error(path: &str, e: gloo_net::Error) -> ApiError {
    log::warn!("Request to {} failed: {}", path, e);
    ApiError::Network(e.to_string())
}

async fn read_json<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !ok {
        let error = ApiError::from_status(status, &body);
        log::warn!("{} returned {}: {}", path, status, error);
        if error.is_unauthorized() {
            sign_out();
        }
        return Err(error);
    }

    decode_body(&body)
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::sys_files::UploadedFilesResponse;

    #[test]
    fn test_decode_body_maps_shape_errors_to_payload() {
        let ok: UploadedFilesResponse = decode_body(r#"{"files": []}"#).unwrap();
        assert!(ok.files.is_empty());

        let err = decode_body::<UploadedFilesResponse>(r#"{"files": 3}"#).unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }
}
