//! Client paths, the sidebar and the role dashboards.

use eyre::bail;
use researchhub_core::routes::{menu as sidebar, navigate, Navigation, Route, Section};
use researchhub_core::Role;

use crate::context::Context;
use crate::output;

fn describe(route: Route) -> String {
    match route {
        Route::Root => "/".to_string(),
        Route::Login => "login screen".to_string(),
        Route::Register => "registration screen".to_string(),
        Route::Protected { role, section } => format!("{} ({role})", section.label()),
    }
}

pub async fn open(ctx: &Context, path: &str) -> eyre::Result<()> {
    let session = ctx.session().await;
    match navigate(&session, path) {
        Navigation::Render(route) => println!("{path} -> {}", describe(route)),
        Navigation::Redirect(target) => println!("{path} -> redirect to {target}"),
        Navigation::Pending => println!("{path} -> waiting for the session"),
        Navigation::NotFound => bail!("no screen at {path}"),
    }
    Ok(())
}

pub async fn menu(ctx: &Context) -> eyre::Result<()> {
    let profile = ctx.enter(Section::Home).await?;
    for item in sidebar(profile.role) {
        println!("{:<14} {}", item.section.label(), item.route);
    }
    Ok(())
}

/// The dashboard of each role shows what that role works with most.
pub async fn home(ctx: &Context) -> eyre::Result<()> {
    let profile = ctx.enter(Section::Home).await?;
    println!("Welcome, {}", profile.name);

    match profile.role {
        Role::Admin => {
            let equipment = ctx.api.list_equipment(1).await?;
            println!("\nEquipment");
            output::print_page(&equipment, "no equipment", output::equipment);
            let users = ctx.api.list_users(1).await?;
            println!("\nUsers");
            output::print_page(&users, "no users", output::profile);
        }
        Role::Researcher => {
            let projects = ctx.api.list_projects().await?;
            println!("\nProjects");
            output::print_page(&projects, "no projects", output::project);
            let reservations = ctx.api.list_reservations().await?;
            println!("\nReservations");
            output::print_page(&reservations, "no reservations", output::reservation);
        }
        Role::User => {
            let favorites = ctx.api.list_favorites().await?;
            println!("\nSaved papers");
            if favorites.is_empty() {
                println!("no saved papers");
            }
            for favorite in &favorites {
                println!("{}", output::project(&favorite.project));
            }
        }
    }
    Ok(())
}
