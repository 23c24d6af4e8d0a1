use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{Equipment, EquipmentInput, ListEnvelope, Page};

impl ApiClient {
    /// `GET /equipment?page=N`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn list_equipment(&self, page: u32) -> Result<Page<Equipment>, ResearchHubError> {
        self.request
            .json::<ListEnvelope<Equipment>>(
                self.builder(Method::GET, "/equipment")
                    .query(&[("page", page)]),
            )
            .await
            .map(Into::into)
    }

    /// `POST /equipment`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn create_equipment(&self, input: &EquipmentInput) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::POST, "/equipment").json(input))
            .await
    }

    /// `PUT /equipment/:id`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn update_equipment(
        &self,
        id: u64,
        input: &EquipmentInput,
    ) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::PUT, &format!("/equipment/{id}")).json(input))
            .await
    }

    /// `DELETE /equipment/:id`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn delete_equipment(&self, id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::DELETE, &format!("/equipment/{id}")))
            .await
    }
}
