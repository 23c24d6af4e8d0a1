use reqwest::Method;

use super::ApiClient;
use crate::error::ResearchHubError;
use crate::models::{Favorite, FavoriteRequest, FavoritesEnvelope};

impl ApiClient {
    /// `GET /favorites`: the papers saved by the signed-in account.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn list_favorites(&self) -> Result<Vec<Favorite>, ResearchHubError> {
        self.get_json::<FavoritesEnvelope>("/favorites")
            .await
            .map(|envelope| envelope.favorites)
    }

    /// `POST /favorites`.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn add_favorite(&self, project_id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(
                self.builder(Method::POST, "/favorites")
                    .json(&FavoriteRequest { project_id }),
            )
            .await
    }

    /// `DELETE /favorites`. The project id travels in the body.
    ///
    /// # Errors
    /// Returns the backend or transport error.
    pub async fn remove_favorite(&self, project_id: u64) -> Result<(), ResearchHubError> {
        self.request
            .send(
                self.builder(Method::DELETE, "/favorites")
                    .json(&FavoriteRequest { project_id }),
            )
            .await
    }
}
