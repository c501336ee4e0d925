//! Show a single user.

use anyhow::{Context as _, Result};
use tracing::instrument;
use userdir_business::UserId;

use crate::context::AppContext;
use crate::output::Output;
use crate::render::render_user;

#[instrument(skip_all, name = "show_user", fields(id = id.as_str()))]
pub async fn run_show(ctx: AppContext, id: String) -> Result<()> {
    let out = Output::new();
    let id = UserId::from(id.as_str());

    let user = ctx
        .api
        .get_user(&id)
        .await
        .with_context(|| format!("Failed to load user {id}"))?;

    render_user(&out, &user);
    Ok(())
}
