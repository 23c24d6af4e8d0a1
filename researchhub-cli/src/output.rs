//! Text rendering of records and errors.

use researchhub_core::models::{
    Equipment, Experiment, Page, Project, Reservation, UserProfile,
};
use researchhub_core::ResearchHubError;

const NONE: &str = "-";

/// Prints a failed command to stderr, one line per rejected field for
/// validation errors.
pub fn print_error(report: &eyre::Report) {
    match report.downcast_ref::<ResearchHubError>() {
        Some(ResearchHubError::Validation { message, errors }) => {
            eprintln!("error: {message}");
            for (field, messages) in errors {
                for message in messages {
                    eprintln!("  {field}: {message}");
                }
            }
        }
        Some(ResearchHubError::Api { status, body }) => {
            eprintln!("error: backend answered {status}");
            if !body.trim().is_empty() {
                eprintln!("{body}");
            }
        }
        _ => eprintln!("error: {report:#}"),
    }
}

pub fn profile(profile: &UserProfile) -> String {
    format!("#{} {} <{}> [{}]", profile.id, profile.name, profile.email, profile.role)
}

pub fn project(project: &Project) -> String {
    let mut line = format!("#{} {} [{}]", project.id, project.title, project.status);
    if let Some(category) = &project.category {
        line.push_str(&format!(" {category}"));
    }
    line.push_str(&format!(
        " {} .. {}",
        project.start_date.as_deref().unwrap_or(NONE),
        project.end_date.as_deref().unwrap_or(NONE)
    ));
    if let Some(budget) = &project.budget {
        line.push_str(&format!(" budget {budget}"));
    }
    if let Some(leader) = &project.leader {
        line.push_str(&format!(" led by {}", leader.name));
    }
    line
}

pub fn experiment(experiment: &Experiment) -> String {
    let project = experiment
        .project
        .as_ref()
        .map(|p| p.title.clone())
        .or_else(|| experiment.project_id.map(|id| format!("project #{id}")))
        .unwrap_or_else(|| NONE.to_string());
    format!(
        "#{} {} [{}] {} ({project})",
        experiment.id,
        experiment.name,
        experiment.status,
        experiment.date_performed.as_deref().unwrap_or(NONE),
    )
}

pub fn equipment(equipment: &Equipment) -> String {
    format!(
        "#{} {} {} [{}] {} @ {}",
        equipment.id,
        equipment.name,
        equipment.model_number.as_deref().unwrap_or(NONE),
        equipment.status,
        equipment.manufacturer.as_deref().unwrap_or(NONE),
        equipment.location.as_deref().unwrap_or(NONE),
    )
}

pub fn reservation(reservation: &Reservation) -> String {
    let project = reservation
        .project
        .as_ref()
        .map_or(NONE, |p| p.title.as_str());
    format!(
        "#{} {} for {project}: {} .. {} {}",
        reservation.id,
        reservation.equipment.name,
        reservation.start_time.as_deref().unwrap_or(NONE),
        reservation.end_time.as_deref().unwrap_or(NONE),
        reservation.purpose.as_deref().unwrap_or_default(),
    )
}

/// Prints every record of `page`, then the page position when the backend
/// paginates.
pub fn print_page<T>(page: &Page<T>, empty: &str, render: impl Fn(&T) -> String) {
    if page.data.is_empty() {
        println!("{empty}");
    }
    for item in &page.data {
        println!("{}", render(item));
    }
    if let (Some(current), Some(last)) = (page.current_page, page.last_page) {
        println!("page {current} of {last}");
    }
}

#[cfg(test)]
mod tests {
    use researchhub_core::Role;

    use super::*;

    #[test]
    fn test_project_line_skips_missing_fields() {
        let project: Project = serde_json::from_str(
            r#"{"id":3,"title":"Protein folding","status":"active","start_date":"2026-01-10"}"#,
        )
        .unwrap();
        assert_eq!(
            super::project(&project),
            "#3 Protein folding [active] 2026-01-10 .. -"
        );
    }

    #[test]
    fn test_equipment_status_is_kebab_case() {
        let equipment: Equipment = serde_json::from_str(
            r#"{"id":4,"name":"Centrifuge","model_number":"C-9","status":"in-use","manufacturer":"Acme","location":"Lab B"}"#,
        )
        .unwrap();
        assert_eq!(
            super::equipment(&equipment),
            "#4 Centrifuge C-9 [in-use] Acme @ Lab B"
        );
    }

    #[test]
    fn test_unknown_status_is_shown_verbatim() {
        let equipment: Equipment = serde_json::from_str(
            r#"{"id":5,"name":"Spectrometer","status":"calibrating"}"#,
        )
        .unwrap();
        assert_eq!(
            super::equipment(&equipment),
            "#5 Spectrometer - [calibrating] - @ -"
        );
    }

    #[test]
    fn test_reservation_line_shows_time_slot() {
        let reservation: Reservation = serde_json::from_str(
            r#"{"id":1,"equipment":{"id":2,"name":"Microscope"},"start_time":"2026-10-20 09:00","end_time":"2026-10-20 12:00","purpose":"imaging"}"#,
        )
        .unwrap();
        assert_eq!(
            super::reservation(&reservation),
            "#1 Microscope for -: 2026-10-20 09:00 .. 2026-10-20 12:00 imaging"
        );
    }

    #[test]
    fn test_profile_line() {
        let profile = UserProfile {
            id: 7,
            name: "Ana".to_string(),
            email: "ana@lab.rs".to_string(),
            role: Role::Researcher,
        };
        assert_eq!(super::profile(&profile), "#7 Ana <ana@lab.rs> [researcher]");
    }
}
