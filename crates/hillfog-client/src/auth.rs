//! Session-based authentication
//!
//! The backend tracks the session with a cookie held by the transport. The
//! user profile returned by login is persisted through the injected
//! [`SessionStore`].

use hillfog_core::{EntityTransformer, MultipartPayload, User};
use serde_json::Value;
use std::sync::Arc;

use crate::adapter::{from_wire, HillfogClient};
use crate::error::{ApiError, ApiResult};
use crate::session::SessionStore;
use crate::transport::ApiRequest;

pub const LOGIN_PATH: &str = "/login.action";
pub const LOGOUT_PATH: &str = "/logout.action";
pub const SESSION_CHECK_PATH: &str = "/session/check.action";

pub struct AuthApi<'a> {
    client: &'a HillfogClient,
    store: Arc<dyn SessionStore>,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a HillfogClient, store: Arc<dyn SessionStore>) -> Self {
        Self { client, store }
    }

    /// Log in and persist the returned profile.
    pub async fn login(&self, account: &str, password: &str) -> ApiResult<User> {
        let form = MultipartPayload::new()
            .text("account", account)
            .text("password", password);
        let request = ApiRequest::post(LOGIN_PATH).with_multipart(form);

        let payload = self.client.execute(request).await?.into_value();
        let user = decode_user(payload)?;
        self.store.save(&user).await?;

        tracing::info!("Logged in as {}", user.account);
        Ok(user)
    }

    /// Log out. The stored profile is cleared whether or not the call
    /// succeeds.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self.client.execute(ApiRequest::post(LOGOUT_PATH)).await;
        self.store.clear().await?;

        if let Err(e) = &result {
            tracing::warn!("Logout request failed, local session cleared anyway: {}", e);
        }
        result.map(|_| ())
    }

    /// Ask the backend whether the session is still valid.
    ///
    /// An expired session or a failure envelope is `Ok(None)`; other errors
    /// propagate.
    pub async fn check_session(&self) -> ApiResult<Option<User>> {
        match self.client.execute(ApiRequest::get(SESSION_CHECK_PATH)).await {
            Ok(normalized) => match normalized.into_value() {
                Value::Null => Ok(None),
                payload => decode_user(payload).map(Some),
            },
            Err(ApiError::Unauthorized) | Err(ApiError::Validation { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Profile saved by the last successful login
    pub async fn current_user(&self) -> ApiResult<Option<User>> {
        Ok(self.store.load().await?)
    }
}

/// The profile lives under `user` or is the payload itself.
fn decode_user(payload: Value) -> ApiResult<User> {
    let value = match payload {
        Value::Object(mut map) => match map.remove("user") {
            Some(user @ Value::Object(_)) => user,
            _ => Value::Object(map),
        },
        other => other,
    };
    from_wire(&EntityTransformer::new(), "user", value)
}
