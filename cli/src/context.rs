//! Resolved configuration plus the API client shared by all commands.

use anyhow::Result;
use chrono::Utc;
use tracing::instrument;
use userdir_business::{ApiResult, BusinessConfig, UserDirectory, UserDraft, UserId, UsersApi};

use crate::config::Config;

pub struct AppContext {
    pub config: BusinessConfig,
    pub api: UsersApi,
}

impl AppContext {
    pub fn new(config: BusinessConfig) -> Self {
        let api = UsersApi::new(&config);
        Self { config, api }
    }

    /// Config file, then `USERDIR_*` environment, then `--api-url`.
    pub fn from_cli(api_url: Option<String>) -> Result<Self> {
        let file = Config::load()?;
        let config = file.resolve(std::env::vars(), api_url)?;
        Ok(Self::new(config))
    }

    /// Fetch the full collection into a fresh directory.
    #[instrument(skip_all, name = "load_directory", fields(api = %self.config.api_url()))]
    pub async fn load_directory(&self, items_per_page: Option<usize>) -> Result<UserDirectory> {
        let mut directory = UserDirectory::with_items_per_page(
            items_per_page.unwrap_or(self.config.items_per_page),
        )?;
        self.refresh(&mut directory).await?;
        Ok(directory)
    }

    /// Re-fetch the collection, keeping the view state.
    #[instrument(skip_all, name = "refresh")]
    pub async fn refresh(&self, directory: &mut UserDirectory) -> Result<()> {
        directory.set_fetching();
        match self.api.list_users().await {
            Ok(users) => {
                tracing::info!(count = users.len(), "Users loaded");
                directory.replace_users(users, Utc::now());
                Ok(())
            }
            Err(err) => {
                let err = anyhow::Error::new(err)
                    .context("Failed to load users. Make sure the backend is running");
                directory.set_error(format!("{err:#}"));
                Err(err)
            }
        }
    }

    /// POST `draft` and put the created user at the front of `directory`.
    #[instrument(skip_all, name = "create_into")]
    pub async fn create_into(
        &self,
        directory: &mut UserDirectory,
        draft: &UserDraft,
    ) -> ApiResult<()> {
        let user = self.api.create_user(draft).await?;
        tracing::info!(id = %user.id, "User created");
        directory.apply_created(user);
        Ok(())
    }

    /// PUT `draft` and swap the returned user into `directory`.
    #[instrument(skip_all, name = "update_into", fields(id = %id))]
    pub async fn update_into(
        &self,
        directory: &mut UserDirectory,
        id: &UserId,
        draft: &UserDraft,
    ) -> ApiResult<()> {
        let user = self.api.update_user(id, draft).await?;
        tracing::info!(id = %user.id, "User updated");
        directory.apply_updated(user);
        Ok(())
    }

    /// DELETE on the server, then drop the user from `directory`.
    #[instrument(skip_all, name = "delete_from", fields(id = %id))]
    pub async fn delete_from(&self, directory: &mut UserDirectory, id: &UserId) -> ApiResult<()> {
        self.api.delete_user(id).await?;
        tracing::info!(%id, "User deleted");
        directory.apply_deleted(id);
        Ok(())
    }
}
