//! Card expiry validation.
//!
//! An expiry is a month (1-12) and a year. A card stays valid through the
//! whole of its expiry month, so an expiry equal to the current month is
//! accepted and anything strictly earlier is rejected. There is no upper
//! bound on how far in the future the year may be.
//!
//! # Reference time
//!
//! Every check compares against a [`YearMonth`]. The `*_at` functions take
//! it explicitly; the others read the local wall clock through
//! [`YearMonth::now`].
//!
//! # Two-digit years
//!
//! A year value in `0..=99` is a two-digit year and is placed in the
//! century of the reference time: with a reference of 2026, `30` means 2030
//! and `05` means 2005. Any other value is taken as a full year. The same
//! rule applies to numbers and to numeric strings.
//!
//! # Example
//!
//! ```
//! use checkout_validator::expiry::{is_valid_expiry_at, validate_expiry_at, YearMonth};
//!
//! let now = YearMonth::new(2026, 10).unwrap();
//!
//! assert!(is_valid_expiry_at(10, 2026, now));
//! assert!(is_valid_expiry_at("12", "30", now));
//! assert!(!is_valid_expiry_at(9, 2026, now));
//! assert!(!is_valid_expiry_at(13, 2030, now));
//!
//! let expiry = validate_expiry_at("03", "29", now).unwrap();
//! assert_eq!(expiry.year(), 2029);
//! assert_eq!(expiry.format_short(), "03/29");
//! ```

use chrono::Datelike;
use std::fmt;

/// A calendar year and month, used as the reference "now" for expiry checks.
///
/// Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl YearMonth {
    /// Creates a reference month.
    ///
    /// Returns `None` if the month is not 1-12.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the current year and month from the local clock.
    pub fn now() -> Self {
        Self::from_date(&chrono::Local::now())
    }

    /// Takes the year and month of any chrono date or datetime.
    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// Returns the year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the first year of this year's century, e.g. 2000 for 2026.
    ///
    /// Returns `None` when that year is not representable.
    #[inline]
    pub const fn century_base(&self) -> Option<i32> {
        self.year.checked_sub(self.year.rem_euclid(100))
    }

    fn months(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A parsed expiry date with a four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    year: i32,
    month: u8,
}

impl ExpiryDate {
    /// Creates a new expiry date from a full year.
    ///
    /// Returns `None` if the month is invalid (not 1-12).
    pub fn new(month: u8, year: i32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the full year.
    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if the card expired before `now`.
    ///
    /// A card expires at the end of its expiry month.
    pub fn is_expired_at(&self, now: YearMonth) -> bool {
        self.as_year_month() < now
    }

    /// Returns true if the card has expired according to the local clock.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(YearMonth::now())
    }

    /// Returns the number of months from `now` until the expiry month.
    ///
    /// Returns 0 when expired or expiring this month.
    pub fn months_until_expiry_at(&self, now: YearMonth) -> u32 {
        let diff = self.as_year_month().months() - now.months();
        u32::try_from(diff.max(0)).unwrap_or(u32::MAX)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year.rem_euclid(100))
    }

    /// Formats as MM/YYYY.
    pub fn format_long(&self) -> String {
        format!("{:02}/{:04}", self.month, self.year)
    }

    fn as_year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year,
            month: self.month,
        }
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_short())
    }
}

/// Errors that can occur during expiry date parsing/validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpiryError {
    /// The month or year field is empty.
    Empty,
    /// The month or year is not an integer.
    InvalidFormat,
    /// Month is out of range (must be 1-12).
    InvalidMonth(i64),
    /// The expiry month is before the reference month.
    Expired {
        /// The expiry month.
        month: u8,
        /// The expiry year.
        year: i32,
    },
}

impl fmt::Display for ExpiryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "expiry date is empty"),
            Self::InvalidFormat => {
                write!(f, "invalid expiry format (expected numeric month and year)")
            }
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
            Self::Expired { month, year } => write!(f, "card expired ({:02}/{})", month, year),
        }
    }
}

impl std::error::Error for ExpiryError {}

/// A month or year value as entered: a number or a numeric string.
///
/// Strings are trimmed and parsed as base-10 integers; anything else
/// (empty, fractional, non-numeric) is rejected.
pub trait ExpiryField {
    /// Returns the integer value of the field.
    fn to_number(&self) -> Result<i64, ExpiryError>;
}

impl ExpiryField for str {
    fn to_number(&self) -> Result<i64, ExpiryError> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Err(ExpiryError::Empty);
        }
        trimmed.parse().map_err(|_| ExpiryError::InvalidFormat)
    }
}

impl ExpiryField for String {
    fn to_number(&self) -> Result<i64, ExpiryError> {
        self.as_str().to_number()
    }
}

impl<T: ExpiryField + ?Sized> ExpiryField for &T {
    fn to_number(&self) -> Result<i64, ExpiryError> {
        (**self).to_number()
    }
}

macro_rules! impl_expiry_field_for_int {
    ($($t:ty),*) => {
        $(
            impl ExpiryField for $t {
                fn to_number(&self) -> Result<i64, ExpiryError> {
                    i64::try_from(*self).map_err(|_| ExpiryError::InvalidFormat)
                }
            }
        )*
    };
}

impl_expiry_field_for_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Expands a year value to a full year relative to `now`.
///
/// Values 0-99 are two-digit years in the reference century. Negative
/// values and values that do not fit a year are rejected.
///
/// ```
/// use checkout_validator::expiry::{normalize_year, YearMonth};
///
/// let now = YearMonth::new(2026, 10).unwrap();
/// assert_eq!(normalize_year(30, now), Some(2030));
/// assert_eq!(normalize_year(2030, now), Some(2030));
/// assert_eq!(normalize_year(-1, now), None);
/// ```
pub fn normalize_year(year: i64, now: YearMonth) -> Option<i32> {
    match year {
        0..=99 => now.century_base()?.checked_add(year as i32),
        y if y < 0 => None,
        y => i32::try_from(y).ok(),
    }
}

/// Parses a month and year into an [`ExpiryDate`] without checking whether
/// it has passed. `now` only decides the century of two-digit years.
pub fn parse_month_year<M, Y>(month: M, year: Y, now: YearMonth) -> Result<ExpiryDate, ExpiryError>
where
    M: ExpiryField,
    Y: ExpiryField,
{
    let month = month.to_number()?;
    let year = year.to_number()?;

    let month = u8::try_from(month)
        .ok()
        .filter(|m| (1..=12).contains(m))
        .ok_or(ExpiryError::InvalidMonth(month))?;
    let year = normalize_year(year, now).ok_or(ExpiryError::InvalidFormat)?;

    Ok(ExpiryDate { year, month })
}

/// Validates a month and year against the reference month `now`.
pub fn validate_expiry_at<M, Y>(month: M, year: Y, now: YearMonth) -> Result<ExpiryDate, ExpiryError>
where
    M: ExpiryField,
    Y: ExpiryField,
{
    let expiry = parse_month_year(month, year, now)?;

    if expiry.is_expired_at(now) {
        return Err(ExpiryError::Expired {
            month: expiry.month,
            year: expiry.year,
        });
    }

    Ok(expiry)
}

/// Validates a month and year against the local clock.
pub fn validate_expiry<M, Y>(month: M, year: Y) -> Result<ExpiryDate, ExpiryError>
where
    M: ExpiryField,
    Y: ExpiryField,
{
    validate_expiry_at(month, year, YearMonth::now())
}

/// Checks a month and year against the reference month `now`.
///
/// Never panics; anything unparsable is simply invalid.
#[inline]
pub fn is_valid_expiry_at<M, Y>(month: M, year: Y, now: YearMonth) -> bool
where
    M: ExpiryField,
    Y: ExpiryField,
{
    validate_expiry_at(month, year, now).is_ok()
}

/// Checks a month and year against the local clock.
///
/// # Example
///
/// ```
/// use checkout_validator::expiry::is_valid_expiry;
///
/// assert!(!is_valid_expiry(13, 2099));
/// assert!(!is_valid_expiry(1, 2000));
/// assert!(is_valid_expiry("12", "9999"));
/// ```
#[inline]
pub fn is_valid_expiry<M, Y>(month: M, year: Y) -> bool
where
    M: ExpiryField,
    Y: ExpiryField,
{
    validate_expiry(month, year).is_ok()
}

/// Parses a combined expiry string without checking whether it has passed.
///
/// Accepts `MM/YY`, `MM/YYYY`, `MM-YY`, `MM-YYYY`, `MMYY` and `MMYYYY`.
///
/// ```
/// use checkout_validator::expiry::{parse_expiry, YearMonth};
///
/// let now = YearMonth::new(2026, 10).unwrap();
/// let expiry = parse_expiry("12/30", now).unwrap();
/// assert_eq!((expiry.month(), expiry.year()), (12, 2030));
/// ```
pub fn parse_expiry(input: &str, now: YearMonth) -> Result<ExpiryDate, ExpiryError> {
    let input = input.trim();

    if input.is_empty() {
        return Err(ExpiryError::Empty);
    }

    if let Some((month, year)) = input.split_once('/').or_else(|| input.split_once('-')) {
        return parse_month_year(month, year, now);
    }

    if !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ExpiryError::InvalidFormat);
    }

    match input.len() {
        4 | 6 => parse_month_year(&input[..2], &input[2..], now),
        _ => Err(ExpiryError::InvalidFormat),
    }
}
