//! Users API client.
//!
//! Performs network IO against `{api_url}/users`. Callers map the results
//! into [`UserDirectory`](crate::UserDirectory) updates; nothing here touches
//! local state.

use thiserror::Error;
use ustr::Ustr;

use crate::BusinessConfig;
use crate::http::{Client, HttpError, RequestBuilder, Response};
use crate::user::{User, UserDraft, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsersApiError {
    #[error("could not reach the users API: {0}")]
    Transport(String),
    #[error("users API returned status {0}")]
    Status(u16),
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("failed to parse {what}: {message}")]
    Decode { what: &'static str, message: String },
    #[error("failed to serialize request: {0}")]
    Encode(String),
}

impl From<HttpError> for UsersApiError {
    fn from(err: HttpError) -> Self {
        Self::Transport(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, UsersApiError>;

#[derive(Debug, Clone)]
pub struct UsersApi {
    client: Client,
    api_url: Ustr,
}

impl UsersApi {
    pub fn new(config: &BusinessConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &BusinessConfig) -> Self {
        Self {
            client,
            api_url: config.api_url(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/users", self.api_url)
    }

    fn user_url(&self, id: &UserId) -> String {
        format!("{}/users/{id}", self.api_url)
    }

    /// GET `/users`
    pub async fn list_users(&self) -> ApiResult<Vec<User>> {
        let response = self.client.get(self.collection_url()).send().await?;
        ensure_success(&response, None)?;
        decode(&response, "user list")
    }

    /// GET `/users/{id}`
    pub async fn get_user(&self, id: &UserId) -> ApiResult<User> {
        let response = self.client.get(self.user_url(id)).send().await?;
        ensure_success(&response, Some(id))?;
        decode(&response, "user")
    }

    /// POST `/users`
    pub async fn create_user(&self, draft: &UserDraft) -> ApiResult<User> {
        let request = with_body(self.client.post(self.collection_url()), draft)?;
        let response = request.send().await?;
        ensure_success(&response, None)?;
        decode(&response, "created user")
    }

    /// PUT `/users/{id}`
    pub async fn update_user(&self, id: &UserId, draft: &UserDraft) -> ApiResult<User> {
        let request = with_body(self.client.put(self.user_url(id)), draft)?;
        let response = request.send().await?;
        ensure_success(&response, Some(id))?;
        decode(&response, "updated user")
    }

    /// DELETE `/users/{id}`; the backend answers `204 No Content`.
    pub async fn delete_user(&self, id: &UserId) -> ApiResult<()> {
        let response = self.client.delete(self.user_url(id)).send().await?;
        ensure_success(&response, Some(id))
    }
}

fn with_body(request: RequestBuilder, draft: &UserDraft) -> ApiResult<RequestBuilder> {
    request
        .json(draft)
        .map_err(|e| UsersApiError::Encode(e.to_string()))
}

fn ensure_success(response: &Response, id: Option<&UserId>) -> ApiResult<()> {
    if response.is_success() {
        return Ok(());
    }

    log::warn!("Users API returned status {}", response.status);
    match (response.status, id) {
        (404, Some(id)) => Err(UsersApiError::NotFound(id.clone())),
        (status, _) => Err(UsersApiError::Status(status)),
    }
}

fn decode<T: serde::de::DeserializeOwned>(response: &Response, what: &'static str) -> ApiResult<T> {
    response.json().map_err(|e| UsersApiError::Decode {
        what,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16) -> Response {
        Response {
            status,
            body: Vec::new(),
        }
    }

    #[test]
    fn test_urls() {
        let api = UsersApi::new(&BusinessConfig::new("http://localhost:8080"));
        assert_eq!(api.collection_url(), "http://localhost:8080/api/users");
        assert_eq!(
            api.user_url(&UserId::Number(7)),
            "http://localhost:8080/api/users/7"
        );
    }

    #[test]
    fn test_not_found_only_for_single_user_calls() {
        let id = UserId::Number(3);
        assert_eq!(
            ensure_success(&response(404), Some(&id)),
            Err(UsersApiError::NotFound(id))
        );
        assert_eq!(
            ensure_success(&response(404), None),
            Err(UsersApiError::Status(404))
        );
        assert_eq!(ensure_success(&response(204), None), Ok(()));
    }

    #[test]
    fn test_decode_error_names_payload() {
        let err = decode::<User>(&response(200), "user").unwrap_err();
        assert!(matches!(err, UsersApiError::Decode { what: "user", .. }));
    }
}
