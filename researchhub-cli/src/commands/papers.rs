//! Paper search and saved papers.

use researchhub_core::models::{ProjectSearch, RESEARCH_FIELDS};
use researchhub_core::routes::Section;

use crate::context::Context;
use crate::output;

pub async fn search(
    ctx: &Context,
    title: Option<String>,
    category: Option<String>,
    page: u32,
) -> eyre::Result<()> {
    ctx.enter(Section::Papers).await?;
    if let Some(category) = category.as_deref() {
        if !RESEARCH_FIELDS.contains(&category) {
            tracing::warn!(category, "not one of the known research fields");
        }
    }

    let search = ProjectSearch {
        title,
        category,
        page,
    };
    let results = ctx.api.search_projects(&search).await?;
    output::print_page(&results, "no papers found", output::project);
    Ok(())
}

pub async fn save(ctx: &Context, project_id: u64) -> eyre::Result<()> {
    ctx.enter(Section::SavedPapers).await?;
    ctx.api.add_favorite(project_id).await?;
    println!("Saved paper #{project_id}");
    Ok(())
}

pub async fn unsave(ctx: &Context, project_id: u64) -> eyre::Result<()> {
    ctx.enter(Section::SavedPapers).await?;
    ctx.api.remove_favorite(project_id).await?;
    println!("Removed paper #{project_id}");
    Ok(())
}

pub async fn saved(ctx: &Context) -> eyre::Result<()> {
    ctx.enter(Section::SavedPapers).await?;
    let favorites = ctx.api.list_favorites().await?;
    if favorites.is_empty() {
        println!("no saved papers");
    }
    for favorite in &favorites {
        println!("{}", output::project(&favorite.project));
    }
    Ok(())
}
