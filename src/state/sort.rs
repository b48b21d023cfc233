/// Column sorting state
///
/// Each sortable column header cycles through a three-state toggle:
/// unsorted → ascending → descending → unsorted. Clicking a different
/// column always starts that column at ascending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sortable column of the photo table
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Id,
    Title,
    AlbumTitle,
    UserName,
}

impl SortField {
    /// All columns, in display order
    pub const ALL: [SortField; 4] = [
        SortField::Id,
        SortField::Title,
        SortField::AlbumTitle,
        SortField::UserName,
    ];

    /// Column header text
    pub fn header(self) -> &'static str {
        match self {
            SortField::Id => "ID",
            SortField::Title => "Photo name",
            SortField::AlbumTitle => "Album name",
            SortField::UserName => "User name",
        }
    }

    /// Short lowercase key (used on the command line)
    pub fn key(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::AlbumTitle => "album",
            SortField::UserName => "user",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortField {
    type Err = String;

    /// Accepts the short key or the lowercased header ("photo name")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SortField::ALL
            .into_iter()
            .find(|field| field.key() == wanted || field.header().to_lowercase() == wanted)
            .ok_or_else(|| format!("unknown column: {}", s))
    }
}

/// Direction of an active column sort
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Current sort of the table: nothing, or one column in one direction
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortState {
    #[default]
    Unsorted,
    Sorted {
        field: SortField,
        direction: SortDirection,
    },
}

impl SortState {
    /// Build a state from a separately stored field and direction.
    /// Sorting only applies when both are present.
    pub fn from_parts(field: Option<SortField>, direction: Option<SortDirection>) -> Self {
        match (field, direction) {
            (Some(field), Some(direction)) => SortState::Sorted { field, direction },
            _ => SortState::Unsorted,
        }
    }

    /// State after the user clicks the header of `clicked`
    pub fn click(self, clicked: SortField) -> Self {
        match self {
            SortState::Sorted { field, direction } if field == clicked => match direction {
                SortDirection::Ascending => SortState::Sorted {
                    field,
                    direction: SortDirection::Descending,
                },
                SortDirection::Descending => SortState::Unsorted,
            },
            _ => SortState::Sorted {
                field: clicked,
                direction: SortDirection::Ascending,
            },
        }
    }

    pub fn field(&self) -> Option<SortField> {
        match self {
            SortState::Unsorted => None,
            SortState::Sorted { field, .. } => Some(*field),
        }
    }

    /// Icon state for one column header
    pub fn indicator(&self, column: SortField) -> SortIndicator {
        match self {
            SortState::Sorted { field, direction } if *field == column => match direction {
                SortDirection::Ascending => SortIndicator::Ascending,
                SortDirection::Descending => SortIndicator::Descending,
            },
            _ => SortIndicator::Unsorted,
        }
    }
}

/// What a column header shows next to its title
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortIndicator {
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    /// Font Awesome icon class for the header
    pub fn icon_class(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "fa-sort",
            SortIndicator::Ascending => "fa-sort-up",
            SortIndicator::Descending => "fa-sort-down",
        }
    }

    /// Plain-text marker for terminal output
    pub fn arrow(self) -> &'static str {
        match self {
            SortIndicator::Unsorted => "↕",
            SortIndicator::Ascending => "↑",
            SortIndicator::Descending => "↓",
        }
    }
}
