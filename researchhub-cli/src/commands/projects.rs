use researchhub_core::models::ProjectInput;
use researchhub_core::routes::Section;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context) -> eyre::Result<()> {
    ctx.enter(Section::Projects).await?;
    let projects = ctx.api.list_projects().await?;
    output::print_page(&projects, "no projects", output::project);
    Ok(())
}

pub async fn create(ctx: &Context, input: ProjectInput) -> eyre::Result<()> {
    ctx.enter(Section::Projects).await?;
    ctx.api.create_project(&input).await?;
    println!("Created project {}", input.title);
    Ok(())
}

pub async fn update(ctx: &Context, id: u64, input: ProjectInput) -> eyre::Result<()> {
    ctx.enter(Section::Projects).await?;
    ctx.api.update_project(id, &input).await?;
    println!("Updated project #{id}");
    Ok(())
}

pub async fn delete(ctx: &Context, id: u64) -> eyre::Result<()> {
    ctx.enter(Section::Projects).await?;
    ctx.api.delete_project(id).await?;
    println!("Deleted project #{id}");
    Ok(())
}

pub async fn experiments(ctx: &Context, id: u64) -> eyre::Result<()> {
    ctx.enter(Section::Experiments).await?;
    let experiments = ctx.api.project_experiments(id).await?;
    output::print_page(&experiments, "no experiments", output::experiment);
    Ok(())
}
