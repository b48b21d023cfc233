/// Filtering and sorting of enriched photos
///
/// `Criteria` is an immutable value: every user event (typing in the
/// search box, picking an uploader or album, clicking a column header)
/// produces a new `Criteria`, which is passed to `query` by reference.

use std::cell::RefCell;
use std::cmp::Ordering;

use feruca::Collator;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::data::EnrichedPhoto;
use super::sort::{SortDirection, SortField, SortState};

/// Label of the "no filter" choice in the uploader and album selectors
pub const ALL: &str = "All";

/// Exact-name filter for the uploader or the album
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum NameFilter {
    #[default]
    All,
    Exact(String),
}

impl NameFilter {
    /// Uploader selector: only the exact label "All" disables the filter
    pub fn for_user(label: &str) -> Self {
        if label == ALL {
            NameFilter::All
        } else {
            NameFilter::Exact(label.to_string())
        }
    }

    /// Album selector: "All" or an empty selection disables the filter
    pub fn for_album(label: &str) -> Self {
        if label.is_empty() || label == ALL {
            NameFilter::All
        } else {
            NameFilter::Exact(label.to_string())
        }
    }

    /// Label to show as the active selection
    pub fn label(&self) -> &str {
        match self {
            NameFilter::All => ALL,
            NameFilter::Exact(name) => name,
        }
    }

    /// Case-insensitive equality against `value`
    fn accepts(&self, value: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Exact(name) => value.to_lowercase() == name.to_lowercase(),
        }
    }
}

/// Combined filter and sort parameters for one query
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub search_text: String,
    pub user_filter: NameFilter,
    pub album_filter: NameFilter,
    pub sort: SortState,
}

impl Criteria {
    pub fn with_search(self, text: impl Into<String>) -> Self {
        Self { search_text: text.into(), ..self }
    }

    /// Clear only the search box; selectors and sort stay
    pub fn cleared_search(self) -> Self {
        Self { search_text: String::new(), ..self }
    }

    pub fn with_user(self, label: &str) -> Self {
        Self { user_filter: NameFilter::for_user(label), ..self }
    }

    pub fn with_album(self, label: &str) -> Self {
        Self { album_filter: NameFilter::for_album(label), ..self }
    }

    pub fn with_sort(self, sort: SortState) -> Self {
        Self { sort, ..self }
    }

    /// Apply one header click on `field` to the sort toggle
    pub fn clicked(self, field: SortField) -> Self {
        let sort = self.sort.click(field);
        Self { sort, ..self }
    }

    /// True when no filter would drop any photo
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.is_empty()
            && self.user_filter == NameFilter::All
            && self.album_filter == NameFilter::All
    }

    /// Filter predicate: search text, uploader and album, all ANDed
    pub fn matches(&self, photo: &EnrichedPhoto) -> bool {
        let search_ok = self.search_text.is_empty()
            || photo
                .title
                .to_lowercase()
                .contains(&self.search_text.to_lowercase());

        search_ok
            && self.user_filter.accepts(photo.user_name())
            && self.album_filter.accepts(photo.album_title())
    }
}

/// Ascending comparator for one column
pub fn compare(a: &EnrichedPhoto, b: &EnrichedPhoto, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => locale_compare(&a.title, &b.title),
        SortField::AlbumTitle => locale_compare(a.album_title(), b.album_title()),
        SortField::UserName => locale_compare(a.user_name(), b.user_name()),
    }
}

thread_local! {
    /// CLDR root-locale collator, reused across comparisons
    static COLLATOR: RefCell<Collator> = RefCell::new(Collator::default());
}

/// Locale-aware string order (Unicode Collation Algorithm, CLDR root).
/// Accented letters sort with their base letter and lowercase precedes
/// uppercase; strings that collate equal fall back to code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| collator.borrow_mut().collate(a, b))
}

/// Filter then (optionally) stable-sort the photos.
///
/// Returns a new sequence borrowing from `photos`; the input is never
/// reordered. An empty result means nothing matched.
pub fn query<'a>(photos: &'a [EnrichedPhoto], criteria: &Criteria) -> Vec<&'a EnrichedPhoto> {
    let mut visible: Vec<&EnrichedPhoto> = if criteria.is_unfiltered() {
        photos.iter().collect()
    } else {
        photos.iter().filter(|photo| criteria.matches(photo)).collect()
    };

    if let SortState::Sorted { field, direction } = criteria.sort {
        // sort_by is stable: equal keys keep their filtered order
        visible.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    debug!(
        "query search={:?} user={} album={} sort={:?}: {} of {} photos",
        criteria.search_text,
        criteria.user_filter.label(),
        criteria.album_filter.label(),
        criteria.sort,
        visible.len(),
        photos.len()
    );

    visible
}
