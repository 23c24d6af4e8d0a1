use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{Experiment, ExperimentInput, ListEnvelope, Page};

impl ApiClient {
    /// `GET /experiments`: every experiment visible to the account.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn list_experiments(&self) -> Result<Page<Experiment>, ResearchHubError> {
        self.get_json::<ListEnvelope<Experiment>>("/experiments")
            .await
            .map(Into::into)
    }

    /// `POST /projects/experiments`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn create_experiment(
        &self,
        input: &ExperimentInput,
    ) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::POST, "/projects/experiments").json(input))
            .await
    }
}
