//! Records exchanged with the `ResearchHub` backend.
//!
//! Field names follow the backend's JSON. Where the backend nests a record
//! (a reservation's equipment, a paper's leader) the nested record is kept
//! as-is.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use crate::Role;

/// The authenticated account's descriptive record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Decides which screens are reachable.
    pub role: Role,
}

/// `GET /me` answers either `{ "user": {...} }` or the bare profile.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileEnvelope {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl From<ProfileEnvelope> for UserProfile {
    fn from(envelope: ProfileEnvelope) -> Self {
        match envelope {
            ProfileEnvelope::Wrapped { user } | ProfileEnvelope::Bare(user) => user,
        }
    }
}

/// Successful answer to `POST /login` and `POST /register`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// The signed-in account.
    pub user: UserProfile,
}

/// Body of `POST /login`.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plain password, sent once over TLS.
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `POST /register` and of the admin's `POST /users`.
#[derive(Clone, Serialize)]
pub struct RegisterRequest {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plain password, sent once over TLS.
    pub password: String,
    /// Requested role.
    pub role: Role,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("role", &self.role)
            .finish()
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Records on this page.
    pub data: Vec<T>,
    /// 1-based page number, when the endpoint paginates.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// Number of the last page, when the endpoint paginates.
    #[serde(default)]
    pub last_page: Option<u32>,
}

impl<T> Page<T> {
    /// `true` when the backend reported further pages.
    #[must_use]
    pub const fn has_more(&self) -> bool {
        match (self.current_page, self.last_page) {
            (Some(current), Some(last)) => current < last,
            _ => false,
        }
    }
}

/// Some list endpoints answer `{ "data": [...] }`, others a bare array.
///
/// The shape is picked before the records are decoded, so a bad record
/// reports its own serde error.
#[derive(Debug)]
pub(crate) struct ListEnvelope<T>(Page<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for ListEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let page = match Value::deserialize(deserializer)? {
            Value::Array(records) => Page {
                data: serde_json::from_value(Value::Array(records)).map_err(D::Error::custom)?,
                current_page: None,
                last_page: None,
            },
            value @ Value::Object(_) => serde_json::from_value(value).map_err(D::Error::custom)?,
            other => {
                return Err(D::Error::custom(format!(
                    "expected a list or an object with `data`, found {other}"
                )))
            }
        };
        Ok(Self(page))
    }
}

impl<T> From<ListEnvelope<T>> for Page<T> {
    fn from(envelope: ListEnvelope<T>) -> Self {
        envelope.0
    }
}

/// Error payload the backend attaches to rejected requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorPayload {
    /// Summary message.
    #[serde(default)]
    pub message: Option<String>,
    /// Per-field validation messages.
    #[serde(default)]
    pub errors: BTreeMap<String, Vec<String>>,
}

/// Lifecycle of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Running.
    Active,
    /// Finished.
    Completed,
    /// Not started yet.
    Pending,
    /// A state this client does not know, kept verbatim.
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

/// Budget as sent by the backend, either a number or a decimal string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Budget {
    /// Numeric amount.
    Number(f64),
    /// Decimal string, e.g. `"12000.00"`.
    Text(String),
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Project lead as embedded in a paper.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Leader {
    /// Display name.
    pub name: String,
}

/// A research project. Published projects are browsed as "papers".
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    /// Backend identifier.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Free text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Research field, e.g. `"Physics"`.
    #[serde(default)]
    pub category: Option<String>,
    /// Start date, `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// End date, `YYYY-MM-DD`, open-ended when absent.
    #[serde(default)]
    pub end_date: Option<String>,
    /// Funding.
    #[serde(default)]
    pub budget: Option<Budget>,
    /// Project lead.
    #[serde(default)]
    pub leader: Option<Leader>,
    /// Link to the published document.
    #[serde(default)]
    pub document_url: Option<String>,
}

/// Body of `POST /projects` and `PUT /projects/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInput {
    /// Title.
    pub title: String,
    /// Free text description.
    pub description: String,
    /// Lifecycle state.
    pub status: ProjectStatus,
    /// Start date, `YYYY-MM-DD`.
    pub start_date: String,
    /// End date, `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Query of `GET /projects/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectSearch {
    /// Substring of the title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Research field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 1-based page.
    pub page: u32,
}

/// Research fields offered by the paper search.
pub const RESEARCH_FIELDS: [&str; 7] = [
    "IT",
    "Medicine",
    "Biology",
    "Physics",
    "Chemistry",
    "Data Science",
    "Engineering",
];

/// State of an experiment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperimentStatus {
    /// Finished.
    Completed,
    /// Still running.
    InProgress,
    /// Unrecognised state.
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

/// Minimal project reference embedded in other records.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRef {
    /// Backend identifier.
    pub id: u64,
    /// Title.
    pub title: String,
}

/// An experiment run as part of a project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Experiment {
    /// Backend identifier.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Protocol followed.
    #[serde(default)]
    pub protocol: Option<String>,
    /// When it ran, `YYYY-MM-DD[ HH:MM:SS]`.
    #[serde(default)]
    pub date_performed: Option<String>,
    /// State.
    pub status: ExperimentStatus,
    /// Owning project id.
    #[serde(default)]
    pub project_id: Option<u64>,
    /// Owning project, when embedded.
    #[serde(default)]
    pub project: Option<ProjectRef>,
}

/// Body of `POST /projects/experiments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExperimentInput {
    /// Name.
    pub name: String,
    /// Protocol followed.
    pub protocol: String,
    /// When it ran, `YYYY-MM-DD`.
    pub date_performed: String,
    /// State.
    pub status: ExperimentStatus,
    /// Owning project.
    pub project_id: u64,
}

/// Availability of a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum EquipmentStatus {
    /// Free to reserve.
    Available,
    /// Currently used.
    InUse,
    /// Out of service.
    Maintenance,
    /// Unrecognised availability, e.g. a state added by a newer backend.
    #[strum(default)]
    #[serde(untagged)]
    Other(String),
}

/// Laboratory equipment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Equipment {
    /// Backend identifier.
    pub id: u64,
    /// Name.
    pub name: String,
    /// Manufacturer's model number.
    #[serde(default)]
    pub model_number: Option<String>,
    /// Availability.
    pub status: EquipmentStatus,
    /// Manufacturer.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Where it is kept.
    #[serde(default)]
    pub location: Option<String>,
}

/// Body of `POST /equipment` and `PUT /equipment/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentInput {
    /// Name.
    pub name: String,
    /// Manufacturer's model number.
    pub model_number: String,
    /// Availability.
    pub status: EquipmentStatus,
    /// Manufacturer.
    pub manufacturer: String,
    /// Where it is kept.
    pub location: String,
}

/// Minimal equipment reference embedded in a reservation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EquipmentRef {
    /// Backend identifier.
    pub id: u64,
    /// Name.
    pub name: String,
}

/// A time slot during which a project holds a piece of equipment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reservation {
    /// Backend identifier.
    pub id: u64,
    /// Reserved equipment.
    pub equipment: EquipmentRef,
    /// Project the reservation is for.
    #[serde(default)]
    pub project: Option<ProjectRef>,
    /// Start of the slot, `YYYY-MM-DD HH:MM`.
    #[serde(default, alias = "start_date")]
    pub start_time: Option<String>,
    /// End of the slot, `YYYY-MM-DD HH:MM`.
    #[serde(default, alias = "end_date")]
    pub end_time: Option<String>,
    /// What the equipment is used for.
    #[serde(default)]
    pub purpose: Option<String>,
}

/// Body of `POST /reservations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReservationInput {
    /// Equipment to reserve.
    pub equipment_id: u64,
    /// Project the reservation is for.
    pub project_id: u64,
    /// Start of the slot, `YYYY-MM-DD HH:MM`.
    pub start_time: String,
    /// End of the slot, `YYYY-MM-DD HH:MM`.
    pub end_time: String,
    /// What the equipment is used for.
    pub purpose: String,
}

/// A paper saved by the signed-in account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Favorite {
    /// Backend identifier.
    #[serde(default)]
    pub id: Option<u64>,
    /// The saved paper.
    pub project: Project,
}

/// Answer of `GET /favorites`.
#[derive(Debug, Deserialize)]
pub(crate) struct FavoritesEnvelope {
    #[serde(default)]
    pub(crate) favorites: Vec<Favorite>,
}

/// Body of `POST /favorites` and `DELETE /favorites`.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct FavoriteRequest {
    pub(crate) project_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_envelope_accepts_both_shapes() {
        let wrapped: ProfileEnvelope = serde_json::from_str(
            r#"{"user":{"id":1,"name":"Ana","email":"ana@lab.rs","role":"admin"}}"#,
        )
        .unwrap();
        let bare: ProfileEnvelope = serde_json::from_str(
            r#"{"id":1,"name":"Ana","email":"ana@lab.rs","role":"admin"}"#,
        )
        .unwrap();
        assert_eq!(UserProfile::from(wrapped), UserProfile::from(bare));
    }

    #[test]
    fn test_list_envelope_accepts_bare_array() {
        let page: Page<ProjectRef> =
            serde_json::from_str::<ListEnvelope<ProjectRef>>(r#"[{"id":3,"title":"X"}]"#)
                .unwrap()
                .into();
        assert_eq!(page.data.len(), 1);
        assert!(!page.has_more());
    }

    #[test]
    fn test_list_envelope_reports_the_failing_field() {
        let err = serde_json::from_str::<ListEnvelope<Reservation>>(
            r#"{"data":[{"id":1,"start_time":"2026-10-20 09:00"}]}"#,
        )
        .unwrap_err()
        .to_string();
        assert!(err.contains("missing field `equipment`"), "{err}");

        let err = serde_json::from_str::<ListEnvelope<ProjectRef>>(r#""nope""#)
            .unwrap_err()
            .to_string();
        assert!(err.contains("expected a list"), "{err}");
    }

    #[test]
    fn test_unlisted_statuses_are_kept() {
        let project: Project =
            serde_json::from_str(r#"{"id":2,"title":"Archive","status":"on_hold"}"#).unwrap();
        assert_eq!(project.status, ProjectStatus::Other("on_hold".to_string()));
        assert_eq!(project.status.to_string(), "on_hold");

        let equipment: Equipment =
            serde_json::from_str(r#"{"id":4,"name":"Centrifuge","status":"retired"}"#).unwrap();
        assert_eq!(equipment.status, EquipmentStatus::Other("retired".to_string()));
        assert_eq!(serde_json::to_string(&equipment.status).unwrap(), "\"retired\"");

        let known: ExperimentStatus = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(known, ExperimentStatus::InProgress);
    }

    #[test]
    fn test_reservation_accepts_both_slot_spellings() {
        let timed: Reservation = serde_json::from_str(
            r#"{"id":1,"equipment":{"id":2,"name":"Microscope"},"start_time":"2026-10-20 09:00","end_time":"2026-10-20 12:00"}"#,
        )
        .unwrap();
        assert_eq!(timed.start_time.as_deref(), Some("2026-10-20 09:00"));

        let dated: Reservation = serde_json::from_str(
            r#"{"id":1,"equipment":{"id":2,"name":"Microscope"},"start_date":"2026-10-20"}"#,
        )
        .unwrap();
        assert_eq!(dated.start_time.as_deref(), Some("2026-10-20"));
        assert!(dated.end_time.is_none());
    }

    #[test]
    fn test_reservation_input_uses_time_fields() {
        let input = ReservationInput {
            equipment_id: 2,
            project_id: 3,
            start_time: "2026-10-20 09:00".to_string(),
            end_time: "2026-10-20 12:00".to_string(),
            purpose: "imaging".to_string(),
        };
        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["start_time"], "2026-10-20 09:00");
        assert!(body.get("start_date").is_none());
    }

    #[test]
    fn test_page_has_more() {
        let page: Page<ProjectRef> = serde_json::from_str(
            r#"{"data":[],"current_page":1,"last_page":3}"#,
        )
        .unwrap();
        assert!(page.has_more());
    }

    #[test]
    fn test_equipment_status_spelling() {
        assert_eq!(EquipmentStatus::InUse.to_string(), "in-use");
        assert_eq!(
            serde_json::to_string(&EquipmentStatus::InUse).unwrap(),
            "\"in-use\""
        );
        assert_eq!(ExperimentStatus::InProgress.to_string(), "in_progress");
    }

    #[test]
    fn test_paper_with_string_budget() {
        let project: Project = serde_json::from_str(
            r#"{"id":9,"title":"Dark matter","status":"active","category":"Physics",
                "budget":"12000.00","leader":{"name":"Mira"},"end_date":null}"#,
        )
        .unwrap();
        assert_eq!(project.budget.unwrap().to_string(), "12000.00");
        assert_eq!(project.leader.unwrap().name, "Mira");
        assert!(project.end_date.is_none());
    }

    #[test]
    fn test_search_query_skips_empty_filters() {
        let search = ProjectSearch {
            title: None,
            category: Some("IT".to_string()),
            page: 2,
        };
        assert_eq!(
            serde_json::to_value(&search).unwrap(),
            serde_json::json!({"category": "IT", "page": 2})
        );
    }

    #[test]
    fn test_login_request_debug_is_redacted() {
        let request = LoginRequest {
            email: "a@b.c".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
