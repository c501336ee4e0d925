//! Shell-side state for the user directory.
//!
//! `UserDirectory` mirrors the server's user collection and owns the
//! [`ViewState`]. Input handlers mutate it through the methods below and then
//! ask for a fresh [`View`]; nothing here talks to the network.

use chrono::{DateTime, Utc};

use crate::error::ViewError;
use crate::user::{User, UserId};
use crate::view::{SortKey, View, ViewState, compute_view};

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
    view_state: ViewState,

    /// Whether a list fetch is in flight.
    is_fetching: bool,

    /// Message from the last failed fetch.
    error: Option<String>,

    /// Set on each successful fetch. Taken as a parameter for testability.
    last_fetch: Option<DateTime<Utc>>,
}

impl UserDirectory {
    /// Empty directory starting from `view_state`.
    pub fn new(view_state: ViewState) -> Self {
        Self {
            view_state,
            ..Self::default()
        }
    }

    /// Page size taken from configuration.
    pub fn with_items_per_page(items_per_page: usize) -> Result<Self, ViewError> {
        Ok(Self::new(ViewState::new(items_per_page)?))
    }

    /// The mirrored collection, in server order with local creations first.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Current search, sort and page.
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Size of the whole collection, ignoring the search.
    pub fn total_users(&self) -> usize {
        self.users.len()
    }

    /// Whether a list fetch is in flight.
    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// Message from the last failed fetch, cleared by the next attempt.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// When the collection was last replaced from the server.
    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    /// Look up a held user by id.
    pub fn find(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| &user.id == id)
    }

    /// Project the current collection through the current view state.
    pub fn view(&self) -> View<'_> {
        compute_view(&self.users, &self.view_state)
    }

    /// Mark a fetch as started and clear the previous error.
    pub fn set_fetching(&mut self) {
        self.is_fetching = true;
        self.error = None;
    }

    /// Record a failed fetch; the held users are kept.
    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
        self.is_fetching = false;
    }

    /// Mirror a freshly fetched list.
    pub fn replace_users(&mut self, users: Vec<User>, now: DateTime<Utc>) {
        self.users = users;
        self.is_fetching = false;
        self.error = None;
        self.last_fetch = Some(now);
    }

    /// New search terms always start over at the first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view_state.set_search_term(term);
        self.view_state.set_current_page(1);
    }

    /// Change the order; the current page is kept.
    pub fn set_sort(&mut self, key: SortKey) {
        self.view_state.set_sort_key(key);
    }

    /// Change the page size and go back to the first page.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), ViewError> {
        self.view_state.set_items_per_page(items_per_page)?;
        self.view_state.set_current_page(1);
        Ok(())
    }

    /// Jump to `page`; 0 means the first page.
    pub fn go_to_page(&mut self, page: usize) {
        self.view_state.set_current_page(page);
    }

    /// Step back one page if there is one. Returns whether the page changed.
    pub fn previous_page(&mut self) -> bool {
        let pagination = self.view().pagination;
        if !pagination.has_prev {
            return false;
        }
        self.go_to_page(pagination.current_page - 1);
        true
    }

    /// Step forward one page if there is one. Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        let pagination = self.view().pagination;
        if !pagination.has_next {
            return false;
        }
        self.go_to_page(pagination.current_page + 1);
        true
    }

    /// Newly created users go to the front.
    pub fn apply_created(&mut self, user: User) {
        self.users.insert(0, user);
    }

    /// Replace the user with the same id. Returns `false` if it is not held.
    pub fn apply_updated(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|existing| existing.id == user.id) {
            Some(existing) => {
                *existing = user;
                true
            }
            None => {
                log::warn!("Updated user {} is not in the local directory", user.id);
                false
            }
        }
    }

    /// Drop the user with `id`. Returns whether a user was removed.
    pub fn apply_deleted(&mut self, id: &UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|user| &user.id != id);
        before != self.users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(count: i64) -> Vec<User> {
        (1..=count)
            .map(|i| User::new(i, format!("User {i:02}"), format!("user{i}@example.com")))
            .collect()
    }

    fn directory(count: i64, per_page: usize) -> UserDirectory {
        let mut dir = UserDirectory::with_items_per_page(per_page).unwrap();
        dir.replace_users(roster(count), Utc::now());
        dir
    }

    #[test]
    fn test_replace_users_clears_fetch_state() {
        let mut dir = UserDirectory::default();
        dir.set_fetching();
        assert!(dir.is_fetching());

        let now = Utc::now();
        dir.replace_users(roster(2), now);

        assert!(!dir.is_fetching());
        assert!(dir.error().is_none());
        assert_eq!(dir.last_fetch(), Some(now));
        assert_eq!(dir.total_users(), 2);
    }

    #[test]
    fn test_set_error_stops_fetching() {
        let mut dir = UserDirectory::default();
        dir.set_fetching();
        dir.set_error("boom".to_owned());

        assert!(!dir.is_fetching());
        assert_eq!(dir.error(), Some("boom"));
    }

    #[test]
    fn test_search_resets_page() {
        let mut dir = directory(20, 5);
        dir.go_to_page(3);
        dir.set_search("user 1");

        assert_eq!(dir.view_state().current_page(), 1);
        assert_eq!(dir.view().pagination.total_matching, 10);
    }

    #[test]
    fn test_sort_keeps_page() {
        let mut dir = directory(20, 5);
        dir.go_to_page(2);
        dir.set_sort(SortKey::NameDesc);

        assert_eq!(dir.view_state().current_page(), 2);
        assert_eq!(dir.view().items[0].name, "User 15");
    }

    #[test]
    fn test_next_and_previous_stop_at_edges() {
        let mut dir = directory(7, 3);

        assert!(!dir.previous_page());
        assert!(dir.next_page());
        assert!(dir.next_page());
        assert!(!dir.next_page());
        assert_eq!(dir.view_state().current_page(), 3);

        assert!(dir.previous_page());
        assert_eq!(dir.view_state().current_page(), 2);
    }

    #[test]
    fn test_previous_from_out_of_range_page() {
        let mut dir = directory(4, 2);
        dir.go_to_page(9);

        assert!(!dir.next_page());
        assert!(dir.previous_page());
        assert_eq!(dir.view_state().current_page(), 8);
    }

    #[test]
    fn test_created_user_is_prepended() {
        let mut dir = directory(2, 6);
        dir.apply_created(User::new(99, "Newcomer", "new@x.com"));

        assert_eq!(dir.users()[0].id, UserId::Number(99));
        assert_eq!(dir.total_users(), 3);
    }

    #[test]
    fn test_updated_user_replaced_in_place() {
        let mut dir = directory(3, 6);
        let replaced = dir.apply_updated(User::new(2, "Renamed", "renamed@x.com"));

        assert!(replaced);
        assert_eq!(dir.users()[1].name, "Renamed");
        assert_eq!(dir.total_users(), 3);
    }

    #[test]
    fn test_updating_unknown_user_changes_nothing() {
        let mut dir = directory(3, 6);
        let before = dir.users().to_vec();

        assert!(!dir.apply_updated(User::new(42, "Ghost", "ghost@x.com")));
        assert_eq!(dir.users(), before.as_slice());
    }

    #[test]
    fn test_deleted_user_removed() {
        let mut dir = directory(3, 6);

        assert!(dir.apply_deleted(&UserId::Number(2)));
        assert!(dir.find(&UserId::Number(2)).is_none());
        assert!(!dir.apply_deleted(&UserId::Number(2)));
        assert_eq!(dir.total_users(), 2);
    }

    #[test]
    fn test_items_per_page_change_resets_page() {
        let mut dir = directory(10, 2);
        dir.go_to_page(4);

        assert!(dir.set_items_per_page(0).is_err());
        assert_eq!(dir.view_state().current_page(), 4);

        dir.set_items_per_page(5).unwrap();
        assert_eq!(dir.view_state().current_page(), 1);
        assert_eq!(dir.view().pagination.total_pages, 2);
    }
}
