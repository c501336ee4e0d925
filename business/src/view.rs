//! List view engine.
//!
//! `compute_view` projects the full user collection through the current
//! [`ViewState`]: filter by search term, stable sort by [`SortKey`], then cut
//! out the requested page. It keeps no state between calls; the shell calls it
//! again after every input change.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::RangeInclusive;
use std::str::FromStr;

use icu_collator::{Collator, CollatorOptions};

use crate::error::ViewError;
use crate::user::User;

pub const DEFAULT_ITEMS_PER_PAGE: usize = 6;

/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;

/// Sort order selectable from the UI.
///
/// `created` sorts newest first and `created-desc` oldest first; the key
/// strings match what the web UI sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    NameDesc,
    Email,
    EmailDesc,
    Created,
    CreatedDesc,
    /// Any key we don't recognise. Leaves the filtered order untouched.
    Unsorted,
}

impl SortKey {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::NameDesc,
        Self::Email,
        Self::EmailDesc,
        Self::Created,
        Self::CreatedDesc,
    ];

    /// Key string as sent by the web UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NameDesc => "name-desc",
            Self::Email => "email",
            Self::EmailDesc => "email-desc",
            Self::Created => "created",
            Self::CreatedDesc => "created-desc",
            Self::Unsorted => "none",
        }
    }

    /// Human readable label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name (A-Z)",
            Self::NameDesc => "Name (Z-A)",
            Self::Email => "Email (A-Z)",
            Self::EmailDesc => "Email (Z-A)",
            Self::Created => "Newest first",
            Self::CreatedDesc => "Oldest first",
            Self::Unsorted => "Unsorted",
        }
    }

    fn compare(self, collation: &Collation, a: &User, b: &User) -> Ordering {
        match self {
            Self::Name => collation.compare(&a.name, &b.name),
            Self::NameDesc => collation.compare(&b.name, &a.name),
            Self::Email => collation.compare(&a.email, &b.email),
            Self::EmailDesc => collation.compare(&b.email, &a.email),
            // `None < Some`, so records without a timestamp end up last here
            // and first in `CreatedDesc`.
            Self::Created => b.created_at.cmp(&a.created_at),
            Self::CreatedDesc => a.created_at.cmp(&b.created_at),
            Self::Unsorted => Ordering::Equal,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .unwrap_or_else(|| {
                log::debug!("Unknown sort key {s:?}, leaving order untouched");
                Self::Unsorted
            });
        Ok(key)
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root-locale (CLDR) collation for name and email ordering.
///
/// Accents and case are secondary and tertiary differences, so `Émile` sorts
/// with the other `E` names and `amy` lands just before `Amy`.
struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    fn new() -> Self {
        let collator = match Collator::try_new(&Default::default(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                log::warn!("Collation data unavailable, sorting by code point: {err}");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

/// Parameters that decide which users are shown and in which order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_term: String,
    sort_key: SortKey,
    current_page: usize,
    items_per_page: NonZeroUsize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            sort_key: SortKey::default(),
            current_page: 1,
            items_per_page: NonZeroUsize::MIN.saturating_add(DEFAULT_ITEMS_PER_PAGE - 1),
        }
    }
}

impl ViewState {
    /// A first-page, unfiltered state with the given page size.
    pub fn new(items_per_page: usize) -> Result<Self, ViewError> {
        let mut state = Self::default();
        state.set_items_per_page(items_per_page)?;
        Ok(state)
    }

    /// Builder form of [`Self::set_search_term`].
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Builder form of [`Self::set_sort_key`].
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    /// Builder form of [`Self::set_current_page`].
    pub fn with_page(mut self, page: usize) -> Self {
        self.set_current_page(page);
        self
    }

    /// Raw search input; matched case-insensitively.
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Active sort order.
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Requested page, 1-based. May be past the last page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Page size, never zero.
    pub fn items_per_page(&self) -> usize {
        self.items_per_page.get()
    }

    /// Replace the search term; the page is left alone.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Replace the sort order.
    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Pages are 1-based; 0 is read as the first page.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Fails on 0 and keeps the previous page size.
    pub fn set_items_per_page(&mut self, items_per_page: usize) -> Result<(), ViewError> {
        self.items_per_page =
            NonZeroUsize::new(items_per_page).ok_or(ViewError::InvalidItemsPerPage(items_per_page))?;
        Ok(())
    }
}

/// Navigation data for the page currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    /// Users left after filtering, before paging.
    pub total_matching: usize,
    /// 1-based index of the first shown user, 0 when nothing is shown.
    pub start_index: usize,
    /// 1-based index of the last shown user, 0 when nothing is shown.
    pub end_index: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Page numbers to offer as direct links.
    pub page_numbers: Vec<usize>,
}

impl PaginationInfo {
    /// "Showing 1-6 of 14 users".
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {} users",
            self.start_index, self.end_index, self.total_matching
        )
    }
}

/// The render-ready projection of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    pub items: Vec<&'a User>,
    pub pagination: PaginationInfo,
}

impl View<'_> {
    /// Nothing matched the search, on any page.
    pub fn is_empty(&self) -> bool {
        self.pagination.total_matching == 0
    }
}

/// Filter, sort and paginate `users` according to `state`.
pub fn compute_view<'a>(users: &'a [User], state: &ViewState) -> View<'a> {
    let needle = state.search_term.to_lowercase();
    let mut matching: Vec<&User> = users.iter().filter(|user| user.matches(&needle)).collect();

    if state.sort_key != SortKey::Unsorted {
        let collation = Collation::new();
        matching.sort_by(|a, b| state.sort_key.compare(&collation, a, b));
    }

    let per_page = state.items_per_page.get();
    let current_page = state.current_page.max(1);
    let total_matching = matching.len();
    let total_pages = total_matching.div_ceil(per_page);
    let offset = (current_page - 1).saturating_mul(per_page);

    let items: Vec<&User> = matching.into_iter().skip(offset).take(per_page).collect();

    let (start_index, end_index) = if items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + items.len())
    };

    View {
        items,
        pagination: PaginationInfo {
            total_matching,
            start_index,
            end_index,
            total_pages,
            current_page,
            has_prev: current_page > 1,
            has_next: current_page < total_pages,
            page_numbers: page_window(current_page, total_pages).collect(),
        },
    }
}

/// Up to [`PAGE_WINDOW`] page numbers around `current`, kept full width
/// near either end when there are enough pages.
pub fn page_window(current: usize, total_pages: usize) -> RangeInclusive<usize> {
    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = start.saturating_add(PAGE_WINDOW - 1).min(total_pages);

    // end - start + 1 < PAGE_WINDOW, written to stay in unsigned range.
    if end + 1 < start.saturating_add(PAGE_WINDOW) {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }

    start..=end
}
