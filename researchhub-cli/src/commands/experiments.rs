use researchhub_core::models::ExperimentInput;
use researchhub_core::routes::Section;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context) -> eyre::Result<()> {
    ctx.enter(Section::Experiments).await?;
    let experiments = ctx.api.list_experiments().await?;
    output::print_page(&experiments, "no experiments", output::experiment);
    Ok(())
}

pub async fn create(ctx: &Context, input: ExperimentInput) -> eyre::Result<()> {
    ctx.enter(Section::Experiments).await?;
    ctx.api.create_experiment(&input).await?;
    println!("Recorded experiment {} for project #{}", input.name, input.project_id);
    Ok(())
}
