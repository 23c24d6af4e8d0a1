use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{ListEnvelope, Page, RegisterRequest, UserProfile};

impl ApiClient {
    /// `GET /users?page=N`. Admin only.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Forbidden`] for non-admin accounts.
    pub async fn list_users(&self, page: u32) -> Result<Page<UserProfile>, ResearchHubError> {
        self.request
            .json::<ListEnvelope<UserProfile>>(
                self.builder(Method::GET, "/users").query(&[("page", page)]),
            )
            .await
            .map(Into::into)
    }

    /// `POST /users`. Admin only.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn create_user(&self, request: &RegisterRequest) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::POST, "/users").json(request))
            .await
    }

    /// `DELETE /users/:id`. Admin only.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn delete_user(&self, id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::DELETE, &format!("/users/{id}")))
            .await
    }
}
