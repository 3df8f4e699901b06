pub mod demand;
pub mod inventory;
pub mod logistics;
pub mod reports;
pub mod scenarios;

use common::{ApiResponse, ErrorBody};
use futures::future::{self, Either};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::settings;

fn api_url(endpoint: &str) -> String {
    settings::get_settings().api_url(endpoint)
}

/// Turns a backend answer into its `data`, or a message for the user.
///
/// Non-2xx answers carry an [`ErrorBody`] when the backend produced them.
/// A 2xx answer whose `success` flag is false is an error too.
async fn read_response<T>(method: &str, endpoint: &str, response: Response) -> Result<T, String>
where
    T: DeserializeOwned,
{
    if !response.ok() {
        log::warn!("{} {} - Non-OK response: {}", method, endpoint, response.status());
        let status = response.status();
        return Err(match response.json::<ErrorBody>().await {
            Ok(err) => {
                log::error!("{} {} - API error {}: {}", method, endpoint, err.code, err.error);
                format!("Error: {}", err.error)
            }
            Err(_) => {
                let error_msg = format!("HTTP error: {}", status);
                log::error!("{} {} - {}", method, endpoint, error_msg);
                error_msg
            }
        });
    }

    log::trace!("{} {} - Response received, parsing JSON", method, endpoint);
    let api_response: ApiResponse<T> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;

    if !api_response.success {
        log::error!("{} {} - Backend reported failure: {}", method, endpoint, api_response.message);
        return Err(api_response.message);
    }

    log::info!("{} {} - Success", method, endpoint);
    Ok(api_response.data)
}

/// Sends the request, giving up once the configured timeout elapses.
async fn dispatch(method: &str, endpoint: &str, request: Request) -> Result<Response, String> {
    let timeout_ms = settings::get_settings().request_timeout_ms;
    let pending = Box::pin(request.send());
    match future::select(pending, TimeoutFuture::new(timeout_ms)).await {
        Either::Left((Ok(response), _)) => Ok(response),
        Either::Left((Err(e), _)) => {
            let error_msg = format!("Request failed: {}", e);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            Err(error_msg)
        }
        Either::Right(((), _)) => {
            let error_msg = timeout_message(timeout_ms);
            log::error!("{} {} - {}", method, endpoint, error_msg);
            Err(error_msg)
        }
    }
}

fn timeout_message(timeout_ms: u32) -> String {
    format!("Request timed out after {} ms", timeout_ms)
}

async fn send<T>(method: &str, endpoint: &str, request: RequestBuilder) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let request = request.build().map_err(|e| {
        let error_msg = format!("Failed to build request: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;
    let response = dispatch(method, endpoint, request).await?;
    read_response(method, endpoint, response).await
}

async fn send_json<T, B>(
    method: &str,
    endpoint: &str,
    request: RequestBuilder,
    body: &B,
) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let request = request.json(body).map_err(|e| {
        let error_msg = format!("Failed to serialize request: {}", e);
        log::error!("{} {} - {}", method, endpoint, error_msg);
        error_msg
    })?;
    let response = dispatch(method, endpoint, request).await?;
    read_response(method, endpoint, response).await
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, String>
where
    T: DeserializeOwned,
{
    get_with_query(endpoint, &[]).await
}

/// GET with query parameters. Values are URL-encoded.
pub async fn get_with_query<T>(endpoint: &str, params: &[(&str, String)]) -> Result<T, String>
where
    T: DeserializeOwned,
{
    let url = api_url(endpoint);
    log::debug!("GET request to: {} ({} params)", url, params.len());
    let request = Request::get(&url).query(params.iter().map(|(k, v)| (*k, v.as_str())));
    send("GET", endpoint, request).await
}

/// Common POST request handler
pub async fn post<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    post_with_query(endpoint, &[], body).await
}

pub async fn post_with_query<T, B>(
    endpoint: &str,
    params: &[(&str, String)],
    body: &B,
) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("POST request to: {}", url);
    let request = Request::post(&url).query(params.iter().map(|(k, v)| (*k, v.as_str())));
    send_json("POST", endpoint, request, body).await
}

/// Common PUT request handler
pub async fn put<T, B>(endpoint: &str, body: &B) -> Result<T, String>
where
    T: DeserializeOwned,
    B: Serialize,
{
    let url = api_url(endpoint);
    log::debug!("PUT request to: {}", url);
    send_json("PUT", endpoint, Request::put(&url), body).await
}

/// Query parameters for the optional values that are set.
pub fn optional_params<'a>(params: &[(&'a str, Option<String>)]) -> Vec<(&'a str, String)> {
    params
        .iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| (*key, v.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_the_limit() {
        assert_eq!(timeout_message(30_000), "Request timed out after 30000 ms");
    }

    #[test]
    fn test_optional_params_skip_blank_values() {
        let params = optional_params(&[
            ("category", Some("Grocery".to_string())),
            ("status", None),
            ("search", Some("  ".to_string())),
        ]);
        assert_eq!(params, vec![("category", "Grocery".to_string())]);
    }
}
