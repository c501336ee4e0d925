//! Update a user's name and/or email.

use anyhow::{Context as _, Result, bail};
use tracing::instrument;
use userdir_business::{UserDraft, UserId};

use crate::context::AppContext;
use crate::output::Output;
use crate::render::render_user;

#[instrument(skip_all, name = "edit_user", fields(id = id.as_str()))]
pub async fn run_edit(
    ctx: AppContext,
    id: String,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    let out = Output::new();

    if name.is_none() && email.is_none() {
        bail!("Nothing to change: pass --name and/or --email");
    }

    let id = UserId::from(id.as_str());
    let current = ctx
        .api
        .get_user(&id)
        .await
        .with_context(|| format!("Failed to load user {id}"))?;

    let draft = UserDraft::merged(&current, name.as_deref(), email.as_deref())?;
    let updated = ctx
        .api
        .update_user(&id, &draft)
        .await
        .context("Failed to update user")?;

    tracing::info!(id = %updated.id, "User updated");
    out.success("User updated successfully");
    render_user(&out, &updated);
    Ok(())
}
