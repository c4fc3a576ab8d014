//! Order history filtering and sorting.
//!
//! Orders come from the backend with ISO-8601 timestamps. Filtering is a
//! case-insensitive substring match over the id, status, area and
//! location. Sorting is stable; orders whose timestamp does not parse
//! always sort last, whichever direction is active.
//!
//! # Example
//!
//! ```
//! use checkout_validator::orders::{filter_and_sort, OrderSummary, SortKey, SortState};
//!
//! let orders = vec![
//!     OrderSummary::new(1, "2026-10-01T12:00:00Z", "2026-10-01T12:15:00Z").with_status("completed"),
//!     OrderSummary::new(2, "2026-10-02T12:00:00Z", "2026-10-02T12:15:00Z").with_status("pending"),
//! ];
//!
//! let newest_first = filter_and_sort(&orders, "", SortState::default());
//! assert_eq!(newest_first[0].id, 2);
//!
//! let by_status = SortState::default().select(SortKey::Status);
//! assert_eq!(filter_and_sort(&orders, " PEND ", by_status).len(), 1);
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use std::borrow::Borrow;
use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One row of the order history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OrderSummary {
    /// Order id.
    pub id: u64,
    /// When the order was placed, as sent by the backend.
    pub ordertime: String,
    /// When the order is ready for pickup.
    pub pickuptime: String,
    /// Venue area, e.g. `Main Lobby`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub area: Option<String>,
    /// Pickup location within the area.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: Option<String>,
    /// Order status, e.g. `pending`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub status: Option<String>,
}

impl OrderSummary {
    /// Creates an order with no area, location or status.
    pub fn new(id: u64, ordertime: impl Into<String>, pickuptime: impl Into<String>) -> Self {
        Self {
            id,
            ordertime: ordertime.into(),
            pickuptime: pickuptime.into(),
            area: None,
            location: None,
            status: None,
        }
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the area and location.
    pub fn with_place(mut self, area: impl Into<String>, location: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self.location = Some(location.into());
        self
    }

    /// Returns true if the lowercase `needle` occurs in the id, status, area
    /// or location. Missing fields count as empty.
    pub fn matches(&self, needle: &str) -> bool {
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .unwrap_or("")
                .to_lowercase()
                .contains(needle)
        };

        self.id.to_string().contains(needle)
            || contains(&self.status)
            || contains(&self.area)
            || contains(&self.location)
    }

    /// Parsed order time, or `None` if the backend value is unparsable.
    pub fn ordered_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.ordertime)
    }

    /// Parsed pickup time, or `None` if the backend value is unparsable.
    pub fn pickup_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.pickuptime)
    }

    fn status_text(&self) -> &str {
        self.status.as_deref().unwrap_or("")
    }
}

/// Column the history is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortKey {
    /// Order placement time.
    #[default]
    OrderTime,
    /// Pickup time.
    PickupTime,
    /// Status text.
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortDirection {
    /// Smallest first.
    Asc,
    /// Largest first.
    #[default]
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[inline]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Active sort column and direction. Defaults to newest order first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SortState {
    /// Sort column.
    pub key: SortKey,
    /// Sort direction.
    pub direction: SortDirection,
}

impl SortState {
    /// Creates a sort state.
    pub const fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Applies a click on a column header.
    ///
    /// Clicking the active column flips the direction; clicking another
    /// column sorts by it, descending.
    pub const fn select(self, key: SortKey) -> Self {
        if self.key as u8 == key as u8 {
            Self::new(key, self.direction.toggled())
        } else {
            Self::new(key, SortDirection::Desc)
        }
    }
}

/// Parses a backend timestamp.
///
/// Accepts RFC 3339 (`2026-10-01T12:00:00Z`, with offset or fraction) and
/// zone-less `2026-10-01T12:00:00` / `2026-10-01 12:00:00`, read as UTC.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Returns the orders matching `query`, in their original order.
///
/// The query is trimmed and lowercased; a blank query matches everything.
pub fn filter_orders<'a>(orders: &'a [OrderSummary], query: &str) -> Vec<&'a OrderSummary> {
    let needle = query.trim().to_lowercase();
    orders
        .iter()
        .filter(|order| needle.is_empty() || order.matches(&needle))
        .collect()
}

/// Sorts orders in place. Equal keys keep their relative order.
pub fn sort_orders<O: Borrow<OrderSummary>>(orders: &mut [O], sort: SortState) {
    orders.sort_by(|a, b| compare(a.borrow(), b.borrow(), sort));
}

/// Filters then sorts, as the history table displays it.
pub fn filter_and_sort<'a>(
    orders: &'a [OrderSummary],
    query: &str,
    sort: SortState,
) -> Vec<&'a OrderSummary> {
    let mut result = filter_orders(orders, query);
    sort_orders(&mut result, sort);
    result
}

fn compare(a: &OrderSummary, b: &OrderSummary, sort: SortState) -> Ordering {
    match sort.key {
        SortKey::OrderTime => compare_times(a.ordered_at(), b.ordered_at(), sort.direction),
        SortKey::PickupTime => compare_times(a.pickup_at(), b.pickup_at(), sort.direction),
        SortKey::Status => sort.direction.apply(a.status_text().cmp(b.status_text())),
    }
}

// Unparsable times go last in both directions.
fn compare_times(
    a: Option<DateTime<Utc>>,
    b: Option<DateTime<Utc>>,
    direction: SortDirection,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
