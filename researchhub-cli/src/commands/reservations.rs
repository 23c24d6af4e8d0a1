//! Reservations live on the equipment screen.

use researchhub_core::models::ReservationInput;
use researchhub_core::routes::Section;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    let reservations = ctx.api.list_reservations().await?;
    output::print_page(&reservations, "no reservations", output::reservation);
    Ok(())
}

pub async fn create(ctx: &Context, input: ReservationInput) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    if input.end_time < input.start_time {
        eyre::bail!("end time {} is before start time {}", input.end_time, input.start_time);
    }
    ctx.api.create_reservation(&input).await?;
    println!(
        "Reserved equipment #{} from {} to {}",
        input.equipment_id, input.start_time, input.end_time
    );
    Ok(())
}

pub async fn delete(ctx: &Context, id: u64) -> eyre::Result<()> {
    ctx.enter(Section::Equipment).await?;
    ctx.api.delete_reservation(id).await?;
    println!("Cancelled reservation #{id}");
    Ok(())
}
