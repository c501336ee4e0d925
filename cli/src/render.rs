//! Card and pagination rendering for projected views.

use chrono::Local;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use userdir_business::{PaginationInfo, User, UserDirectory, View};

use crate::output::Output;

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "")]
    avatar: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Created")]
    created: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

impl From<&User> for CardRow {
    fn from(user: &User) -> Self {
        Self {
            avatar: user.initials(),
            id: user.id.to_string(),
            name: truncate_str(&user.name, 28),
            email: truncate_str(&user.email, 32),
            created: date_or_dash(user.created_at.map(|t| t.date_label())),
            updated: date_or_dash(user.updated_at.map(|t| t.date_label())),
        }
    }
}

fn date_or_dash(date: Option<String>) -> String {
    date.unwrap_or_else(|| "-".to_owned())
}

pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    } else {
        s.to_owned()
    }
}

pub fn cards_table(users: &[&User]) -> String {
    let rows: Vec<CardRow> = users.iter().map(|user| CardRow::from(*user)).collect();
    let mut table = Table::new(&rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Header rows shown above the cards.
fn stats(directory: &UserDirectory) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Total users", directory.total_users().to_string())];
    if let Some(at) = directory.last_fetch() {
        rows.push((
            "Last updated",
            at.with_timezone(&Local).format("%H:%M:%S").to_string(),
        ));
    }
    rows
}

/// Stats, the last fetch error if any, then the current page.
pub fn render_directory(out: &Output, directory: &UserDirectory) {
    if directory.is_fetching() {
        out.dim("Loading users...");
    }
    if let Some(error) = directory.error() {
        out.error(error);
    }
    for (label, value) in stats(directory) {
        out.labeled(label, value);
    }
    out.newline();
    render_view(out, &directory.view(), directory.total_users());
}

/// Render one page of the directory, or the empty state.
pub fn render_view(out: &Output, view: &View<'_>, total_users: usize) {
    if view.is_empty() {
        out.dim(if total_users == 0 {
            "No users yet. Add one with `userdir add`."
        } else {
            "No users match your search."
        });
        return;
    }

    if view.items.is_empty() {
        out.warning(format!(
            "Page {} is past the last page ({}).",
            view.pagination.current_page, view.pagination.total_pages
        ));
    } else {
        out.print(cards_table(&view.items));
    }

    render_pagination(out, &view.pagination);
}

pub fn render_pagination(out: &Output, pagination: &PaginationInfo) {
    out.dim(pagination.summary());
    out.page_numbers(
        &pagination.page_numbers,
        pagination.current_page,
        pagination.has_prev,
        pagination.has_next,
    );
}

pub fn render_user(out: &Output, user: &User) {
    out.header(format!("{} {}", user.initials(), user.name));
    out.labeled("ID", &user.id);
    out.labeled("Email", &user.email);
    out.labeled(
        "Created",
        date_or_dash(user.created_at.map(|t| t.date_label())),
    );
    out.labeled(
        "Updated",
        date_or_dash(user.updated_at.map(|t| t.date_label())),
    );
}
