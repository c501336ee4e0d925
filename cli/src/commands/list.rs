//! List users command, with an optional interactive browser.

use std::fmt;

use anyhow::{Context as _, Result};
use inquire::{Confirm, CustomType, Select, Text};
use tracing::instrument;
use userdir_business::{SortKey, UserDirectory, UserDraft, UserId};

use crate::context::AppContext;
use crate::output::Output;
use crate::render::render_directory;

pub struct ListArgs {
    pub search: String,
    pub sort: String,
    pub page: usize,
    pub per_page: Option<usize>,
    pub interactive: bool,
}

#[instrument(skip_all, name = "list", fields(sort = %args.sort, page = args.page))]
pub async fn run_list(ctx: AppContext, args: ListArgs) -> Result<()> {
    let out = Output::new();

    let mut directory = ctx.load_directory(args.per_page).await?;
    apply_args(&mut directory, &args);

    if args.interactive {
        return browse(&ctx, &mut directory, &out).await;
    }

    render_directory(&out, &directory);
    Ok(())
}

/// Search first: it resets the page, which the explicit page then overrides.
fn apply_args(directory: &mut UserDirectory, args: &ListArgs) {
    let key: SortKey = args
        .sort
        .parse()
        .unwrap_or_else(|never: std::convert::Infallible| match never {});
    directory.set_search(args.search.as_str());
    directory.set_sort(key);
    directory.go_to_page(args.page);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseAction {
    Next,
    Previous,
    GoTo,
    Search,
    Sort,
    PageSize,
    Add,
    Edit,
    Delete,
    Refresh,
    Quit,
}

impl fmt::Display for BrowseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Next => "Next page",
            Self::Previous => "Previous page",
            Self::GoTo => "Go to page...",
            Self::Search => "Search...",
            Self::Sort => "Sort by...",
            Self::PageSize => "Users per page...",
            Self::Add => "Add user...",
            Self::Edit => "Edit user...",
            Self::Delete => "Delete user...",
            Self::Refresh => "Refresh",
            Self::Quit => "Quit",
        })
    }
}

struct SortChoice(SortKey);

impl fmt::Display for SortChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.label())
    }
}

/// A card on the current page, offered by the edit and delete pickers.
#[derive(Debug)]
struct UserChoice {
    id: UserId,
    label: String,
}

impl fmt::Display for UserChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn page_choices(directory: &UserDirectory) -> Vec<UserChoice> {
    directory
        .view()
        .items
        .iter()
        .map(|user| UserChoice {
            id: user.id.clone(),
            label: format!("{} {} <{}>", user.initials(), user.name, user.email),
        })
        .collect()
}

/// Actions that make sense for the page currently shown.
fn available_actions(directory: &UserDirectory) -> Vec<BrowseAction> {
    let view = directory.view();
    let mut actions = Vec::with_capacity(11);
    if view.pagination.has_next {
        actions.push(BrowseAction::Next);
    }
    if view.pagination.has_prev {
        actions.push(BrowseAction::Previous);
    }
    if view.pagination.total_pages > 1 {
        actions.push(BrowseAction::GoTo);
    }
    actions.extend([
        BrowseAction::Search,
        BrowseAction::Sort,
        BrowseAction::PageSize,
        BrowseAction::Add,
    ]);
    if !view.items.is_empty() {
        actions.extend([BrowseAction::Edit, BrowseAction::Delete]);
    }
    actions.extend([BrowseAction::Refresh, BrowseAction::Quit]);
    actions
}

async fn browse(ctx: &AppContext, directory: &mut UserDirectory, out: &Output) -> Result<()> {
    loop {
        out.newline();
        render_directory(out, directory);

        let Some(action) = Select::new("What next?", available_actions(directory))
            .with_help_message("Use arrow keys to navigate, Enter to select, Esc to quit")
            .prompt_skippable()
            .context("Failed to read action")?
        else {
            return Ok(());
        };

        match action {
            BrowseAction::Next => {
                directory.next_page();
            }
            BrowseAction::Previous => {
                directory.previous_page();
            }
            BrowseAction::GoTo => {
                let help = format!("1-{}", directory.view().pagination.total_pages);
                let page = CustomType::<usize>::new("Page:")
                    .with_help_message(&help)
                    .with_error_message("Please type a page number")
                    .prompt_skippable()
                    .context("Failed to read page")?;
                if let Some(page) = page {
                    directory.go_to_page(page);
                }
            }
            BrowseAction::Search => {
                let current = directory.view_state().search_term().to_owned();
                let term = Text::new("Search:")
                    .with_initial_value(&current)
                    .with_help_message("Matches name or email; empty shows everyone")
                    .prompt_skippable()
                    .context("Failed to read search term")?;
                if let Some(term) = term {
                    directory.set_search(term);
                }
            }
            BrowseAction::Sort => {
                let choices: Vec<SortChoice> = SortKey::ALL.into_iter().map(SortChoice).collect();
                if let Some(SortChoice(key)) = Select::new("Sort by:", choices)
                    .prompt_skippable()
                    .context("Failed to read sort order")?
                {
                    directory.set_sort(key);
                }
            }
            BrowseAction::PageSize => {
                let per_page = CustomType::<usize>::new("Users per page:")
                    .with_default(directory.view_state().items_per_page())
                    .with_error_message("Please type a number")
                    .prompt_skippable()
                    .context("Failed to read page size")?;
                if let Some(per_page) = per_page {
                    if let Err(err) = directory.set_items_per_page(per_page) {
                        out.error(err);
                    }
                }
            }
            BrowseAction::Add => add_user(ctx, directory, out).await?,
            BrowseAction::Edit => edit_user(ctx, directory, out).await?,
            BrowseAction::Delete => delete_user(ctx, directory, out).await?,
            BrowseAction::Refresh => {
                // Failures stay on the directory and show with the next render.
                if let Err(err) = ctx.refresh(directory).await {
                    tracing::debug!("{err:#}");
                }
            }
            BrowseAction::Quit => return Ok(()),
        }
    }
}

/// Name and email prompts, pre-filled when editing. `None` if skipped.
fn prompt_draft(name: &str, email: &str) -> Result<Option<(String, String)>> {
    let Some(name) = Text::new("Name:")
        .with_initial_value(name)
        .prompt_skippable()
        .context("Failed to read name")?
    else {
        return Ok(None);
    };
    let Some(email) = Text::new("Email:")
        .with_initial_value(email)
        .prompt_skippable()
        .context("Failed to read email")?
    else {
        return Ok(None);
    };
    Ok(Some((name, email)))
}

fn pick_user(directory: &UserDirectory, message: &str) -> Result<Option<UserId>> {
    let choice = Select::new(message, page_choices(directory))
        .prompt_skippable()
        .context("Failed to read user")?;
    Ok(choice.map(|choice| choice.id))
}

async fn add_user(ctx: &AppContext, directory: &mut UserDirectory, out: &Output) -> Result<()> {
    let Some((name, email)) = prompt_draft("", "")? else {
        return Ok(());
    };
    let draft = match UserDraft::new(&name, &email) {
        Ok(draft) => draft,
        Err(err) => {
            out.error(err);
            return Ok(());
        }
    };

    match ctx.create_into(directory, &draft).await {
        Ok(()) => out.success("User created successfully"),
        Err(err) => out.error(format!("Failed to create user: {err}")),
    }
    Ok(())
}

async fn edit_user(ctx: &AppContext, directory: &mut UserDirectory, out: &Output) -> Result<()> {
    let Some(id) = pick_user(directory, "Edit which user?")? else {
        return Ok(());
    };
    let Some(current) = directory.find(&id).cloned() else {
        return Ok(());
    };
    let Some((name, email)) = prompt_draft(&current.name, &current.email)? else {
        return Ok(());
    };
    let draft = match UserDraft::new(&name, &email) {
        Ok(draft) => draft,
        Err(err) => {
            out.error(err);
            return Ok(());
        }
    };

    match ctx.update_into(directory, &id, &draft).await {
        Ok(()) => out.success("User updated successfully"),
        Err(err) => out.error(format!("Failed to update user: {err}")),
    }
    Ok(())
}

async fn delete_user(ctx: &AppContext, directory: &mut UserDirectory, out: &Output) -> Result<()> {
    let Some(id) = pick_user(directory, "Delete which user?")? else {
        return Ok(());
    };
    let Some(user) = directory.find(&id) else {
        return Ok(());
    };

    let message = format!("Are you sure you want to delete {} <{}>?", user.name, user.email);
    let confirmed = Confirm::new(&message)
        .with_default(false)
        .prompt()
        .context("Failed to read confirmation")?;
    if !confirmed {
        out.info("Cancelled");
        return Ok(());
    }

    match ctx.delete_from(directory, &id).await {
        Ok(()) => out.success("User deleted successfully"),
        Err(err) => out.error(format!("Failed to delete user: {err}")),
    }
    Ok(())
}
