//! Pagination and sort descriptors shared by every list endpoint.
//!
//! A [`Pageable`] describes the requested window (size, offset, sort) and a
//! [`Page`] carries the result. Both are pure values; repositories turn a
//! [`Sort`] into an `ORDER BY` clause with [`Sort::order_by`], which only
//! accepts properties from the repository's own allow-list.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when a request does not specify one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest bounded page a caller may request. `0` still means unbounded.
pub const MAX_PAGE_SIZE: i64 = 1000;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Sort direction with optional NULL placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
    AscNullsFirst,
    DescNullsFirst,
    AscNullsLast,
    DescNullsLast,
}

impl Direction {
    /// SQL spelling used in `ORDER BY`.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::AscNullsFirst => "ASC NULLS FIRST",
            Self::DescNullsFirst => "DESC NULLS FIRST",
            Self::AscNullsLast => "ASC NULLS LAST",
            Self::DescNullsLast => "DESC NULLS LAST",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    /// Case-insensitive; runs of whitespace between words are collapsed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_ascii_uppercase();

        match normalized.as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            "ASC NULLS FIRST" => Ok(Self::AscNullsFirst),
            "DESC NULLS FIRST" => Ok(Self::DescNullsFirst),
            "ASC NULLS LAST" => Ok(Self::AscNullsLast),
            "DESC NULLS LAST" => Ok(Self::DescNullsLast),
            _ => Err(CoreError::Validation(format!(
                "Unknown sort direction '{}'",
                s.trim()
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

/// A single `(property, direction)` sort instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn new(property: impl Into<String>, direction: Direction) -> Self {
        Self {
            property: property.into(),
            direction,
        }
    }

    pub fn asc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Asc)
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self::new(property, Direction::Desc)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.property, self.direction)
    }
}

/// Ordered list of sort instructions. The first entry is the primary key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    orders: Vec<SortOrder>,
}

impl Sort {
    pub fn new(orders: Vec<SortOrder>) -> Self {
        Self { orders }
    }

    /// Start a sort on a single property.
    pub fn by(property: impl Into<String>, direction: Direction) -> Self {
        Self::new(vec![SortOrder::new(property, direction)])
    }

    /// Append a lower-precedence sort instruction.
    pub fn then(mut self, property: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(SortOrder::new(property, direction));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Parse a comma-separated list of `"<property>[ <direction>]"` entries,
    /// e.g. `"title DESC, id"`. The direction defaults to `ASC`; empty
    /// entries are ignored.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut orders = Vec::new();

        for entry in raw.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (property, direction) = match entry.split_once(char::is_whitespace) {
                Some((property, rest)) => (property, rest.parse::<Direction>()?),
                None => (entry, Direction::Asc),
            };

            if !is_identifier(property) {
                return Err(CoreError::Validation(format!(
                    "Invalid sort property '{property}'"
                )));
            }

            orders.push(SortOrder::new(property, direction));
        }

        Ok(Self::new(orders))
    }

    /// Render each entry as `"<property> <DIRECTION>"`, in list order.
    pub fn to_order_strings(&self) -> Vec<String> {
        self.orders.iter().map(ToString::to_string).collect()
    }

    /// Build the body of an `ORDER BY` clause.
    ///
    /// Returns `None` for an empty sort (the store's natural order). Every
    /// property must appear in `allowed`; anything else is rejected since
    /// properties are interpolated into SQL.
    pub fn order_by(&self, allowed: &[&str]) -> Result<Option<String>, CoreError> {
        if self.orders.is_empty() {
            return Ok(None);
        }

        if let Some(unknown) = self
            .orders
            .iter()
            .find(|o| !allowed.contains(&o.property.as_str()))
        {
            return Err(CoreError::Validation(format!(
                "Cannot sort by '{}'; allowed properties: {}",
                unknown.property,
                allowed.join(", ")
            )));
        }

        Ok(Some(self.to_order_strings().join(", ")))
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Pageable
// ---------------------------------------------------------------------------

/// A request for a bounded, sorted window of rows.
///
/// `size == 0` means "no limit", not "zero rows".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pageable {
    pub size: i64,
    pub offset: i64,
    pub sort: Sort,
}

impl Pageable {
    /// Negative `size` or `offset` values are clamped to zero and `size` is
    /// capped at [`MAX_PAGE_SIZE`].
    pub fn new(size: i64, offset: i64, sort: Sort) -> Self {
        Self {
            size: size.clamp(0, MAX_PAGE_SIZE),
            offset: offset.max(0),
            sort,
        }
    }

    /// All rows, natural order.
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// The `LIMIT` to apply, or `None` when the page is unbounded.
    pub fn limit(&self) -> Option<i64> {
        (self.size > 0).then_some(self.size)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One window of results plus totals for the full matching set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_pages: i64,
    pub total_elements: i64,
    pub elements: Vec<T>,
}

impl<T> Page<T> {
    /// Build a page; `total_elements` is the count of all matching rows,
    /// not the length of `elements`.
    pub fn new(elements: Vec<T>, total_elements: i64, size: i64) -> Self {
        Self {
            total_pages: total_pages(total_elements, size),
            total_elements,
            elements,
        }
    }

    pub fn empty() -> Self {
        Self {
            total_pages: 0,
            total_elements: 0,
            elements: Vec::new(),
        }
    }

    /// Convert the elements while keeping the totals.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_pages: self.total_pages,
            total_elements: self.total_elements,
            elements: self.elements.into_iter().map(f).collect(),
        }
    }
}

/// `ceil(total_elements / size)` when both are non-zero, otherwise `0`.
pub fn total_pages(total_elements: i64, size: i64) -> i64 {
    if total_elements <= 0 || size <= 0 {
        return 0;
    }
    (total_elements - 1) / size + 1
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[&str] = &["id", "title", "created_at"];

    #[test]
    fn direction_parses_all_six_spellings() {
        let cases = [
            ("asc", Direction::Asc),
            ("DESC", Direction::Desc),
            ("asc nulls first", Direction::AscNullsFirst),
            ("Desc Nulls First", Direction::DescNullsFirst),
            ("ASC  NULLS   LAST", Direction::AscNullsLast),
            ("desc nulls last", Direction::DescNullsLast),
        ];
        for (raw, expected) in cases {
            assert_eq!(raw.parse::<Direction>().unwrap(), expected, "{raw}");
        }
    }

    #[test]
    fn direction_rejects_garbage() {
        assert!("sideways".parse::<Direction>().is_err());
        assert!("ASC; DROP TABLE items".parse::<Direction>().is_err());
    }

    #[test]
    fn direction_round_trips_through_display() {
        let d = Direction::DescNullsLast;
        assert_eq!(d.to_string().parse::<Direction>().unwrap(), d);
    }

    #[test]
    fn order_strings_follow_list_order() {
        let sort = Sort::by("title", Direction::Desc).then("id", Direction::Asc);
        assert_eq!(sort.to_order_strings(), vec!["title DESC", "id ASC"]);
    }

    #[test]
    fn order_by_joins_entries() {
        let sort = Sort::by("title", Direction::Desc).then("id", Direction::AscNullsLast);
        assert_eq!(
            sort.order_by(ALLOWED).unwrap().as_deref(),
            Some("title DESC, id ASC NULLS LAST")
        );
    }

    #[test]
    fn empty_sort_emits_no_order_by() {
        assert_eq!(Sort::default().order_by(ALLOWED).unwrap(), None);
    }

    #[test]
    fn order_by_rejects_unknown_property() {
        let sort = Sort::by("password", Direction::Asc);
        let err = sort.order_by(ALLOWED).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn parse_defaults_direction_to_asc() {
        let sort = Sort::parse("title DESC, id").unwrap();
        assert_eq!(
            sort.orders(),
            &[SortOrder::desc("title"), SortOrder::asc("id")]
        );
    }

    #[test]
    fn parse_accepts_nulls_placement() {
        let sort = Sort::parse("price desc nulls last").unwrap();
        assert_eq!(sort.orders()[0].direction, Direction::DescNullsLast);
    }

    #[test]
    fn parse_skips_empty_entries() {
        let sort = Sort::parse(" , title ,, ").unwrap();
        assert_eq!(sort.orders(), &[SortOrder::asc("title")]);
        assert!(Sort::parse("").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_non_identifier_property() {
        assert!(Sort::parse("title;drop DESC").is_err());
        assert!(Sort::parse("(select 1)").is_err());
    }

    #[test]
    fn pageable_clamps_negative_values() {
        let p = Pageable::new(-5, -1, Sort::default());
        assert_eq!(p.size, 0);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn zero_size_means_no_limit() {
        assert_eq!(Pageable::unpaged().limit(), None);
        assert_eq!(Pageable::new(3, 0, Sort::default()).limit(), Some(3));
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(10, 3), 4);
        assert_eq!(total_pages(9, 3), 3);
        assert_eq!(total_pages(1, 100), 1);
    }

    #[test]
    fn pageable_caps_size_but_keeps_zero_unbounded() {
        assert_eq!(Pageable::new(i64::MAX, 0, Sort::default()).size, MAX_PAGE_SIZE);
        assert_eq!(Pageable::new(MAX_PAGE_SIZE, 0, Sort::default()).size, MAX_PAGE_SIZE);
        assert_eq!(Pageable::new(0, 0, Sort::default()).limit(), None);
    }

    #[test]
    fn total_pages_does_not_overflow_on_extreme_values() {
        assert_eq!(total_pages(2, i64::MAX), 1);
        assert_eq!(total_pages(i64::MAX, 1), i64::MAX);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);

        let page = Page::new(vec![1, 2], 2, i64::MAX);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn total_pages_is_zero_without_rows_or_size() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(25, 0), 0);
    }

    #[test]
    fn page_totals_use_total_count_not_slice_length() {
        // Last page of 5 rows with size 2 holds a single element.
        let page = Page::new(vec!["e"], 5, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }

    #[test]
    fn page_map_keeps_totals() {
        let page = Page::new(vec![1, 2], 7, 2).map(|n| n * 10);
        assert_eq!(page.elements, vec![10, 20]);
        assert_eq!(page.total_elements, 7);
        assert_eq!(page.total_pages, 4);
    }

    #[test]
    fn page_serializes_with_snake_case_totals() {
        let json = serde_json::to_value(Page::new(vec!["a"], 1, 10)).unwrap();
        assert_eq!(json["total_pages"], 1);
        assert_eq!(json["total_elements"], 1);
        assert_eq!(json["elements"][0], "a");
    }
}
