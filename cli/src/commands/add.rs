//! Create a user.

use anyhow::{Context as _, Result};
use tracing::instrument;
use userdir_business::UserDraft;

use crate::context::AppContext;
use crate::output::Output;
use crate::render::render_user;

/// Validation runs before any request is sent.
#[instrument(skip_all, name = "add_user")]
pub async fn run_add(ctx: AppContext, name: String, email: String) -> Result<()> {
    let out = Output::new();

    let draft = UserDraft::new(&name, &email)?;
    let user = ctx
        .api
        .create_user(&draft)
        .await
        .context("Failed to create user")?;

    tracing::info!(id = %user.id, "User created");
    out.success("User created successfully");
    render_user(&out, &user);
    Ok(())
}
