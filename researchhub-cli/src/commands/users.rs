use researchhub_core::models::RegisterRequest;
use researchhub_core::routes::Section;
use researchhub_core::Role;

use crate::context::Context;
use crate::output;

pub async fn list(ctx: &Context, page: u32) -> eyre::Result<()> {
    ctx.enter(Section::Users).await?;
    let users = ctx.api.list_users(page).await?;
    output::print_page(&users, "no users", output::profile);
    Ok(())
}

pub async fn create(
    ctx: &Context,
    name: String,
    email: String,
    password: String,
    role: Role,
) -> eyre::Result<()> {
    ctx.enter(Section::Users).await?;
    let request = RegisterRequest {
        name,
        email,
        password,
        role,
    };
    ctx.api.create_user(&request).await?;
    println!("Created {} account {}", request.role, request.email);
    Ok(())
}

pub async fn delete(ctx: &Context, id: u64) -> eyre::Result<()> {
    let admin = ctx.enter(Section::Users).await?;
    if admin.id == id {
        eyre::bail!("refusing to delete the signed-in account");
    }
    ctx.api.delete_user(id).await?;
    println!("Deleted user #{id}");
    Ok(())
}
