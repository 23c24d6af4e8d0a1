use researchhub_core::models::EquipmentInput;
use researchhub_core::routes::Section;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context, page: u32) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    let equipment = ctx.api.list_equipment(page).await?;
    output::print_page(&equipment, "no equipment", output::equipment);
    Ok(())
}

pub async fn create(ctx: &Context, input: EquipmentInput) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    ctx.api.create_equipment(&input).await?;
    println!("Added {}", input.name);
    Ok(())
}

pub async fn update(ctx: &Context, id: u64, input: EquipmentInput) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    ctx.api.update_equipment(id, &input).await?;
    println!("Updated equipment #{id}");
    Ok(())
}

pub async fn delete(ctx: &Context, id: u64) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    ctx.api.delete_equipment(id).await?;
    println!("Removed equipment #{id}");
    Ok(())
}
