//! Typed endpoints over the authenticated client. Every function checks the
//! response status and parses the body against the endpoint's schema.

pub mod auth;
pub mod finances;
pub mod tasks;

use serde::de::DeserializeOwned;
use url::form_urlencoded;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse};

/// Appends percent-encoded query parameters to `path`.
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

fn check(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    match response.status {
        401 => Err(ApiError::Unauthorized),
        _ if response.ok() => Ok(response),
        status => Err(ApiError::Status {
            status,
            body: response.body,
        }),
    }
}

pub(crate) async fn send_json<T: DeserializeOwned>(
    client: &ApiClient,
    request: ApiRequest,
) -> Result<T, ApiError> {
    let response = check(client.fetch(request).await?)?;
    response
        .json::<T>()
        .map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) async fn send_empty(client: &ApiClient, request: ApiRequest) -> Result<(), ApiError> {
    check(client.fetch(request).await?)?;
    Ok(())
}

pub(crate) fn json_request<T: serde::Serialize>(
    request: ApiRequest,
    body: &T,
) -> Result<ApiRequest, ApiError> {
    request
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::rc::Rc;

    use crate::client::ApiClient;
    use crate::config::AppConfig;
    use crate::session::Session;
    use crate::storage::MemoryStore;
    use crate::transport::testing::ScriptedTransport;

    pub fn client_with(transport: ScriptedTransport) -> (ApiClient, Rc<ScriptedTransport>) {
        let transport = Rc::new(transport);
        let client = ApiClient::new(
            AppConfig::default(),
            Session::new(Rc::new(MemoryStore::with_token("abc"))),
            transport.clone(),
        );
        (client, transport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_values_are_encoded() {
        let url = with_query(
            "/api/tasks/",
            &[("view", "day".to_string()), ("tag", "home & car".to_string())],
        );
        assert_eq!(url, "/api/tasks/?view=day&tag=home+%26+car");
        assert_eq!(with_query("/api/tasks/", &[]), "/api/tasks/");
    }

    #[test]
    fn unauthorized_is_its_own_error() {
        assert_eq!(
            check(ApiResponse::new(401, "")).unwrap_err(),
            ApiError::Unauthorized
        );
        assert_eq!(
            check(ApiResponse::new(404, "missing")).unwrap_err(),
            ApiError::Status {
                status: 404,
                body: "missing".into()
            }
        );
        assert!(check(ApiResponse::new(204, "")).is_ok());
    }
}
