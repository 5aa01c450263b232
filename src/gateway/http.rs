//! REST gateway backed by `reqwest`.
//!
//! Speaks the conventional `/users` resource:
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /users` |
//! | get | `GET /users/{id}` |
//! | create | `POST /users` |
//! | update | `PUT /users/{id}` |
//! | delete | `DELETE /users/{id}` |
//!
//! Status codes map onto the error categories: `404` is not found, `400` and `422` are
//! validation failures, anything else unsuccessful is a network error. Transport
//! failures (refused connections, timeouts) are network errors and unparseable bodies
//! are decode errors.

use super::DirectoryGateway;
use crate::domain::{DirectoryError, Result, User, UserId, UserInput};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// HTTP implementation of [`DirectoryGateway`].
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    client_ids: bool,
}

impl HttpGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("userdeck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DirectoryError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            client_ids: false,
        })
    }

    /// Builds the gateway described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError::Config`] if the HTTP client cannot be built.
    pub fn from_config(config: &crate::Config) -> Result<Self> {
        Ok(Self::new(&config.api_base_url, Duration::from_secs(config.request_timeout_secs))?
            .with_client_ids(config.client_ids))
    }

    /// Overrides the server-assigned id of created users with a client-side one.
    ///
    /// Some demo backends acknowledge every create with the same identifier. With this
    /// enabled, created users get the current Unix time in milliseconds instead.
    #[must_use]
    pub const fn with_client_ids(mut self, enabled: bool) -> Self {
        self.client_ids = enabled;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: &UserId) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    /// Maps an unsuccessful status onto the gateway error categories.
    async fn check(response: Response, id: Option<&UserId>) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body_len = body.len(), "request rejected");

        Err(match status {
            StatusCode::NOT_FOUND => DirectoryError::NotFound(
                id.map_or_else(|| "resource".to_string(), ToString::to_string),
            ),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let detail = body.trim();
                DirectoryError::Validation(if detail.is_empty() {
                    format!("request rejected with status {status}")
                } else {
                    detail.to_string()
                })
            }
            _ => DirectoryError::Network(format!("unexpected status {status}")),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn transport_error(err: reqwest::Error) -> DirectoryError {
    if err.is_timeout() {
        DirectoryError::Network(format!("request timed out: {err}"))
    } else {
        DirectoryError::Network(err.to_string())
    }
}

/// Fills in what a backend left out of its reply to an update with what was sent.
///
/// Some backends answer a `PUT` with only the fields they model, which would strip
/// the address and company details from the local record.
fn restore_omitted(user: &mut User, input: &UserInput) {
    if user.extra.is_empty() && !input.extra.is_empty() {
        tracing::debug!(fields = input.extra.len(), "response omitted unmodelled fields");
        user.extra = input.extra.clone();
    }

    if let (Some(returned), Some(sent)) = (user.organization.as_mut(), input.organization.as_ref()) {
        if returned.name == sent.name {
            returned.catch_phrase = returned.catch_phrase.take().or_else(|| sent.catch_phrase.clone());
            returned.bs = returned.bs.take().or_else(|| sent.bs.clone());
        }
    }
}

#[async_trait]
impl DirectoryGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<User>> {
        let url = self.collection_url();
        tracing::debug!(%url, "listing users");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;
        let users: Vec<User> = Self::decode(Self::check(response, None).await?).await?;

        tracing::debug!(count = users.len(), "users listed");
        Ok(users)
    }

    async fn get(&self, id: &UserId) -> Result<User> {
        let response = self
            .client
            .get(self.user_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        Self::decode(Self::check(response, Some(id)).await?).await
    }

    async fn create(&self, input: &UserInput) -> Result<User> {
        let response = self
            .client
            .post(self.collection_url())
            .json(input)
            .send()
            .await
            .map_err(transport_error)?;
        let mut user: User = Self::decode(Self::check(response, None).await?).await?;

        if self.client_ids {
            let assigned = UserId::Number(chrono::Utc::now().timestamp_millis());
            tracing::debug!(server_id = %user.id, client_id = %assigned, "replacing server-assigned id");
            user.id = assigned;
        }
        Ok(user)
    }

    async fn update(&self, id: &UserId, input: &UserInput) -> Result<User> {
        let response = self
            .client
            .put(self.user_url(id))
            .json(input)
            .send()
            .await
            .map_err(transport_error)?;
        let mut user: User = Self::decode(Self::check(response, Some(id)).await?).await?;

        // The record is replaced by id locally, so keep the id that was edited.
        if user.id != *id {
            tracing::debug!(requested = %id, returned = %user.id, "server returned a different id");
            user.id = id.clone();
        }
        restore_omitted(&mut user, input);
        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<UserId> {
        let response = self
            .client
            .delete(self.user_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response, Some(id)).await?;
        Ok(id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Organization;
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway(server: &MockServer) -> HttpGateway {
        HttpGateway::new(&server.base_url(), Duration::from_secs(5)).unwrap()
    }

    fn input() -> UserInput {
        UserInput {
            name: "Ada Lovelace".into(),
            username: Some("ada".into()),
            email: "ada@example.com".into(),
            phone: "555-0100".into(),
            website: "ada.dev".into(),
            organization: None,
            ..UserInput::default()
        }
    }

    #[tokio::test]
    async fn list_decodes_users() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    { "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
                      "phone": "1-770-736-8031", "website": "hildegard.org",
                      "company": { "name": "Romaguera-Crona" }, "address": { "city": "Gwenborough" } },
                    { "id": "b2", "name": "Ervin Howell" }
                ]));
        });

        let users = gateway(&server).list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].organization_name(), Some("Romaguera-Crona"));
        assert_eq!(users[1].id, UserId::Text("b2".into()));
        mock.assert();
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = gateway(&server).list().await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn server_error_is_a_network_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/users");
            then.status(503);
        });

        let err = gateway(&server).list().await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let gateway = HttpGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = gateway.list().await.unwrap_err();
        assert_eq!(err.kind(), "network");
    }

    #[tokio::test]
    async fn create_posts_input_and_can_assign_client_ids() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/users").json_body(json!({
                "name": "Ada Lovelace", "username": "ada", "email": "ada@example.com",
                "phone": "555-0100", "website": "ada.dev"
            }));
            then.status(201).json_body(json!({
                "id": 11, "name": "Ada Lovelace", "username": "ada", "email": "ada@example.com",
                "phone": "555-0100", "website": "ada.dev"
            }));
        });

        let created = gateway(&server).create(&input()).await.unwrap();
        assert_eq!(created.id, UserId::Number(11));

        let created = gateway(&server).with_client_ids(true).create(&input()).await.unwrap();
        assert!(matches!(created.id, UserId::Number(n) if n > 1_600_000_000_000));
        mock.assert_hits(2);
    }

    #[tokio::test]
    async fn rejected_create_is_a_validation_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/users");
            then.status(422).body("email is invalid");
        });

        let err = gateway(&server).create(&input()).await.unwrap_err();
        assert_eq!(err.to_string(), "Validation error: email is invalid");
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/users/42");
            then.status(404).body("{}");
        });

        let err = gateway(&server).update(&UserId::Number(42), &input()).await.unwrap_err();
        assert_eq!(err.to_string(), "User 42 not found");
    }

    #[tokio::test]
    async fn update_keeps_requested_id() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(PUT).path("/users/3");
            then.status(200).json_body(json!({ "id": "3", "name": "Ada Lovelace" }));
        });

        let updated = gateway(&server).update(&UserId::Number(3), &input()).await.unwrap();
        assert_eq!(updated.id, UserId::Number(3));
        assert_eq!(updated.name, "Ada Lovelace");
    }

    #[tokio::test]
    async fn update_sends_and_keeps_address_and_company_details() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/users/1").json_body(json!({
                "name": "Ada Lovelace", "username": "ada", "email": "ada@example.com",
                "phone": "555-0100", "website": "ada.dev",
                "company": { "name": "Analytical", "catchPhrase": "Engines all the way down", "bs": "compute tables" },
                "address": { "city": "London" }
            }));
            then.status(200).json_body(json!({
                "id": 1, "name": "Ada Lovelace", "username": "ada", "email": "ada@example.com",
                "phone": "555-0100", "website": "ada.dev", "company": { "name": "Analytical" }
            }));
        });

        let mut sent = input();
        sent.organization = Some(Organization {
            name: "Analytical".into(),
            catch_phrase: Some("Engines all the way down".into()),
            bs: Some("compute tables".into()),
        });
        sent.extra.insert("address".into(), json!({ "city": "London" }));

        let updated = gateway(&server).update(&UserId::Number(1), &sent).await.unwrap();
        mock.assert();
        assert_eq!(updated.extra["address"]["city"], "London");
        assert_eq!(updated.organization, sent.organization);
        assert_eq!(updated, User::from_input(UserId::Number(1), &sent));
    }

    #[tokio::test]
    async fn delete_and_get_use_user_paths() {
        let server = MockServer::start();
        let delete = server.mock(|when, then| {
            when.method(DELETE).path("/users/7");
            then.status(200).body("{}");
        });
        let get = server.mock(|when, then| {
            when.method(GET).path("/users/8");
            then.status(200).json_body(json!({ "id": 8, "name": "Nicholas Runolfsdottir V" }));
        });

        let gateway = gateway(&server);
        assert_eq!(gateway.delete(&UserId::Number(7)).await.unwrap(), UserId::Number(7));
        assert_eq!(gateway.get(&UserId::Number(8)).await.unwrap().name, "Nicholas Runolfsdottir V");
        delete.assert();
        get.assert();
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let gateway = HttpGateway::new("http://localhost:3000/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:3000/api");
        assert_eq!(gateway.user_url(&UserId::Text("x".into())), "http://localhost:3000/api/users/x");
    }
}
