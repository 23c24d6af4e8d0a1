//! Projects and paper search.

use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{Experiment, ListEnvelope, Page, Project, ProjectInput, ProjectSearch};

impl ApiClient {
    /// `GET /projects`: the projects visible to the signed-in account.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn list_projects(&self) -> Result<Page<Project>, ResearchHubError> {
        self.get_json::<ListEnvelope<Project>>("/projects")
            .await
            .map(Into::into)
    }

    /// `POST /projects`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn create_project(&self, input: &ProjectInput) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::POST, "/projects").json(input))
            .await
    }

    /// `PUT /projects/:id`.
    ///
    /// # Errors
    /// Returns [`ResearchHubError::Validation`] when a field is rejected.
    pub async fn update_project(
        &self,
        id: u64,
        input: &ProjectInput,
    ) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::PUT, &format!("/projects/{id}")).json(input))
            .await
    }

    /// `DELETE /projects/:id`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn delete_project(&self, id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(self.builder(Method::DELETE, &format!("/projects/{id}")))
            .await
    }

    /// `GET /projects/search`: one page of published papers.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn search_projects(
        &self,
        search: &ProjectSearch,
    ) -> Result<Page<Project>, ResearchHubError> {
        self.request
            .json::<ListEnvelope<Project>>(
                self.builder(Method::GET, "/projects/search").query(search),
            )
            .await
            .map(Into::into)
    }

    /// `GET /projects/:id/experiments`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn project_experiments(
        &self,
        project_id: u64,
    ) -> Result<Page<Experiment>, ResearchHubError> {
        self.get_json::<ListEnvelope<Experiment>>(&format!("/projects/{project_id}/experiments"))
            .await
            .map(Into::into)
    }
}
