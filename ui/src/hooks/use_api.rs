use payloads::{ClientError, RequestOptions};
use secrecy::SecretString;
use yew::prelude::*;

use crate::get_api_client;
use crate::hooks::use_auth;

/// Sends requests on behalf of the current session.
#[derive(Clone, PartialEq)]
pub struct ApiHandle {
    token: Option<String>,
}

impl ApiHandle {
    /// Send a request with the session's bearer token. See
    /// [`payloads::APIClient::authenticated_request`].
    ///
    /// A 401 is only logged; the session is not ended here.
    pub async fn request(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<reqwest::Response, ClientError> {
        let token = self.token.clone().map(SecretString::from);
        get_api_client()
            .authenticated_request(url, options, token.as_ref())
            .await
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[hook]
pub fn use_api() -> ApiHandle {
    let session = use_auth();
    ApiHandle {
        token: session.token,
    }
}
