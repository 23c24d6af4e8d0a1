use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// A `Role` decides which screens and actions an account may use.
///
/// Serialized in lowercase, the same way the backend and the client route
/// paths spell it (`/autenticate/researcher/...`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    AsRefStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Manages equipment and accounts, sees every project.
    Admin,
    /// Runs projects, experiments and equipment reservations.
    Researcher,
    /// Browses and saves papers.
    User,
}

impl Role {
    /// Every role, in descending order of privilege.
    pub const ALL: [Self; 3] = [Self::Admin, Self::Researcher, Self::User];

    /// Landing path for an authenticated account of this role.
    #[must_use]
    pub fn home_path(self) -> String {
        format!("/autenticate/{self}")
    }
}
