use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{ListEnvelope, Page, Reservation, ReservationInput};

impl ApiClient {
    /// `GET /reservations`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn list_reservations(&self) -> Result<Page<Reservation>, ResearchHubError> {
        self.get_json::<ListEnvelope<Reservation>>("/reservations")
            .await
            .map(Into::into)
    }

    /// `POST /reservations`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when the slot or a field is
    /// rejected.
    pub async fn create_reservation(
        &self,
        input: &ReservationInput,
    ) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::POST, "/reservations").json(input))
            .await
    }

    /// `DELETE /reservations/:id`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn delete_reservation(&self, id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::DELETE, &format!("/reservations/{id}")))
            .await
    }
}
