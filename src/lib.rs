//! Calendrical engine for an era-segmented Gregorian calendar: the year
//! axis is partitioned into named, contiguous eras (a proleptic catch-all
//! followed by sovereign-defined eras, the last open-ended), each with its
//! own year numbering.
//!
//! Beyond date/instant conversion, the engine computes the *actual*
//! minimum and maximum a calendar field can take at a specific date: a
//! value shaped by where that date sits relative to era boundaries, not
//! just by generic Gregorian rules. An era starting in July leaves its
//! first year only six months; an era ending January 7 caps that year's
//! day-of-year at 7; the open era's maximum year is a numeric ceiling, not
//! a calendar fact.
//!
//! All components are immutable after construction, so queries are
//! reentrant and safe to run concurrently without coordination.

mod bounds;
mod consts;
mod convert;
mod era;
mod guard;
mod prelude;
mod types;
mod week;

pub use bounds::{CalendarField, FieldRange};
pub use consts::*;
pub use convert::{AbsoluteInstant, ZoneOffset};
pub use era::{ConfigError, Era, EraSpec, EraTable};
pub use guard::{OverflowGuard, RepresentableRange};
pub use types::{DayOfMonth, EraYear, Month, Weekday, days_in_month, days_in_year, is_leap_year};
pub use week::WeekCalculator;

use crate::bounds::BoundsResolver;
use crate::convert::{
    MAX_CARRY_YEAR, epoch_days_from_gregorian, epoch_days_lenient, gregorian_from_epoch_days,
};
use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Error type for date queries. Recoverable: reported to the caller with
/// no partial result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateError {
    /// Era-relative years are counted from 1.
    #[error("Invalid era year: {0} (must be at least 1)")]
    InvalidEraYear(i64),

    /// Month outside 1..=12.
    #[error("Invalid month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Day outside the month, e.g. day 30 of February.
    #[error("Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i64, month: u8, day: u8 },

    /// Day of week outside 1..=7.
    #[error("Invalid day of week: {0} (must be 1-7)")]
    InvalidDayOfWeek(u8),

    /// Lookup by a name no era in the table carries.
    #[error("Unknown era: {0}")]
    UnknownEra(String),

    /// The instant (milliseconds) lies outside the representable range.
    #[error("Instant {0} is outside the representable range")]
    Overflow(i64),
}

/// A date resolved against an era table: era, era-relative year, month and
/// day. A value object: field changes go through the engine's `with_*`
/// methods, which renormalize by round-tripping through `AbsoluteInstant`.
///
/// Day-of-year, day-of-week and week fields are derived on demand by
/// [`EraCalendar`], never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
#[display(
    fmt = "{} {}-{:02}-{:02}",
    "era.name()",
    "year.get()",
    "month.get()",
    "day.get()"
)]
pub struct ResolvedDate {
    era: Era,
    year: EraYear,
    month: Month,
    day: DayOfMonth,
}

impl ResolvedDate {
    /// Returns the era this date falls in
    pub const fn era(&self) -> &Era {
        &self.era
    }

    /// Returns the era-relative year
    pub const fn year(&self) -> EraYear {
        self.year
    }

    /// Returns the month
    pub const fn month(&self) -> Month {
        self.month
    }

    /// Returns the day of month
    pub const fn day(&self) -> DayOfMonth {
        self.day
    }

    /// Absolute Gregorian year this date maps to
    pub const fn absolute_year(&self) -> i64 {
        self.era.absolute_year(self.year.get())
    }

    /// Epoch day of this date
    pub(crate) const fn epoch_day(&self) -> i64 {
        epoch_days_from_gregorian(self.absolute_year(), self.month.get(), self.day.get())
    }
}

impl PartialOrd for ResolvedDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ResolvedDate {
    fn cmp(&self, other: &Self) -> Ordering {
        // date order is instant order: two dates from one table compare
        // exactly as their midnight instants do
        self.epoch_day().cmp(&other.epoch_day())
    }
}

/// Engine configuration, accepted once at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarConfig {
    /// Ordered era list, proleptic first, open era last
    pub eras: Vec<EraSpec>,
    /// First day of week for week numbering (locale-derived)
    pub first_day_of_week: Weekday,
    /// Minimum days a leading partial week needs to count as week 1
    pub minimal_days_in_first_week: u8,
    /// Representable floor/ceiling instants
    pub range: RepresentableRange,
}

impl CalendarConfig {
    /// The imperial era table this engine was modeled after, with
    /// Sunday-first weeks and a 1-day first-week threshold.
    pub fn japanese() -> Self {
        Self {
            eras: era::japanese_era_specs(),
            first_day_of_week: Weekday::SUNDAY,
            minimal_days_in_first_week: 1,
            range: RepresentableRange::default(),
        }
    }
}

/// The era-aware calendar engine.
///
/// Immutable after construction: every query is a deterministic function
/// of its inputs and the era table, so an `EraCalendar` can be shared
/// freely across threads.
#[derive(Debug)]
pub struct EraCalendar {
    table: EraTable,
    guard: OverflowGuard,
    weeks: WeekCalculator,
}

impl EraCalendar {
    /// Builds an engine, validating the era table and week parameters.
    ///
    /// # Errors
    /// Returns `ConfigError` for an empty or misordered era table, a
    /// bounded first era, duplicate names, or an out-of-range
    /// minimal-days threshold.
    pub fn new(config: CalendarConfig) -> Result<Self, ConfigError> {
        let table = EraTable::new(config.eras)?;
        let weeks = WeekCalculator::new(config.first_day_of_week, config.minimal_days_in_first_week)?;
        Ok(Self {
            table,
            guard: OverflowGuard::new(config.range),
            weeks,
        })
    }

    const fn resolver(&self) -> BoundsResolver<'_> {
        BoundsResolver::new(&self.table, &self.guard, &self.weeks)
    }

    /// Resolves an instant to a date. The zone offset is added first, so
    /// era transitions are evaluated against the shifted (local) instant,
    /// matching era tables whose starts are local midnights.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` outside the representable range, or
    /// `DateError::InvalidEraYear` if the local date precedes its era's
    /// year origin.
    pub fn resolve(
        &self,
        instant: AbsoluteInstant,
        zone_offset: ZoneOffset,
    ) -> Result<ResolvedDate, DateError> {
        if !self.guard.contains(instant) {
            return Err(DateError::Overflow(instant.get()));
        }
        let local = instant
            .checked_add(zone_offset.millis())
            .ok_or(DateError::Overflow(instant.get()))?;
        let (year, month, day) = gregorian_from_epoch_days(local.epoch_day());
        let era = self.table.era_containing(local).clone();
        let era_year = EraYear::new(era.era_year_of(year))?;
        Ok(ResolvedDate {
            era,
            year: era_year,
            month: Month::new(month)?,
            day: DayOfMonth::new(day, year, month)?,
        })
    }

    /// The instant at local midnight of the given date, shifted back by
    /// the zone offset. Inverse of [`resolve`](Self::resolve) for
    /// midnight instants.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` if the result leaves the
    /// representable range.
    pub fn to_instant(
        &self,
        date: &ResolvedDate,
        zone_offset: ZoneOffset,
    ) -> Result<AbsoluteInstant, DateError> {
        let day = date.epoch_day();
        let local = AbsoluteInstant::from_epoch_day(day).ok_or(DateError::Overflow(day))?;
        let instant = local
            .checked_sub(zone_offset.millis())
            .ok_or(DateError::Overflow(local.get()))?;
        if !self.guard.contains(instant) {
            return Err(DateError::Overflow(instant.get()));
        }
        Ok(instant)
    }

    /// Builds a date from era name and era-relative fields.
    ///
    /// Validation is per field: the Gregorian date must exist, but a year
    /// past the era's end is accepted and simply maps to an instant a
    /// later era claims (lenient, like recomputation after a field set).
    ///
    /// # Errors
    /// Returns `DateError::UnknownEra`, `InvalidEraYear`, `InvalidMonth`
    /// or `InvalidDay` as appropriate, or `Overflow` for years beyond the
    /// addressable window; no partial result.
    pub fn date(
        &self,
        era_name: &str,
        year: i64,
        month: u8,
        day: u8,
    ) -> Result<ResolvedDate, DateError> {
        let era = self.table.era_by_name(era_name)?.clone();
        let year = EraYear::new(year)?;
        let absolute_year = match era.year_origin().checked_add(year.get() - 1) {
            Some(y) if (-MAX_CARRY_YEAR..=MAX_CARRY_YEAR).contains(&y) => y,
            _ => return Err(DateError::Overflow(year.get())),
        };
        let month = Month::new(month)?;
        let day = DayOfMonth::new(day, absolute_year, month.get())?;
        Ok(ResolvedDate {
            era,
            year,
            month,
            day,
        })
    }

    /// Actual and generic bounds of a field at a date, respecting era
    /// truncation. Total for any resolved date; bounds cut off at the
    /// representable ceiling come back clamped and flagged, not as errors.
    pub fn actual_bounds(&self, date: &ResolvedDate, field: CalendarField) -> FieldRange {
        self.resolver().resolve(date, field)
    }

    /// Era lookup by name, for display collaborators.
    ///
    /// # Errors
    /// Returns `DateError::UnknownEra` if absent.
    pub fn era_info(&self, name: &str) -> Result<&Era, DateError> {
        self.table.era_by_name(name)
    }

    /// The era claiming an instant; total over all instants
    pub fn era_at(&self, instant: AbsoluteInstant) -> &Era {
        self.table.era_containing(instant)
    }

    /// All eras in chronological order
    pub fn eras(&self) -> &[Era] {
        self.table.eras()
    }

    /// Day-of-year of a date, numbered from its era-relative year's own
    /// day 1 (the era start when the era begins mid-year)
    pub fn day_of_year(&self, date: &ResolvedDate) -> i64 {
        self.resolver().day_of_year(date)
    }

    /// Day-of-week of a date, Sunday = 1
    pub fn day_of_week(&self, date: &ResolvedDate) -> Weekday {
        Weekday::new(convert::day_of_week(date.epoch_day())).unwrap_or(Weekday::SUNDAY)
    }

    /// Week-of-year of a date within its era-truncated year span
    pub fn week_of_year(&self, date: &ResolvedDate) -> i64 {
        self.resolver().week_of_year(date)
    }

    /// Week-of-month of a date within its era-truncated month span
    pub fn week_of_month(&self, date: &ResolvedDate) -> i64 {
        self.resolver().week_of_month(date)
    }

    /// Largest era-relative year of the open era whose January 1 is
    /// representable; memoized, identical for every caller
    pub fn open_era_max_year(&self) -> i64 {
        self.guard.open_era_max_year(&self.table)
    }

    /// Clamps a candidate era-relative year to the era's actual maximum,
    /// reporting whether clamping occurred
    pub fn clamp_year(&self, era: &Era, candidate: i64) -> (i64, bool) {
        self.guard.clamp_era_relative_year(&self.table, era, candidate)
    }

    /// The latest representable instant
    pub const fn max_representable_instant(&self) -> AbsoluteInstant {
        self.guard.max_representable_instant()
    }

    /// The earliest representable instant
    pub const fn min_representable_instant(&self) -> AbsoluteInstant {
        self.guard.min_representable_instant()
    }

    /// Returns the configured first day of week
    pub const fn first_day_of_week(&self) -> Weekday {
        self.weeks.first_day_of_week()
    }

    /// Returns the configured minimal-days-in-first-week threshold
    pub const fn minimal_days_in_first_week(&self) -> u8 {
        self.weeks.minimal_days_in_first_week()
    }

    /// New date with the era-relative year replaced, renormalized through
    /// `AbsoluteInstant` (a Feb 29 moved to a common year carries into
    /// March 1; a year past the era's end carries into the next era).
    ///
    /// # Errors
    /// Returns `DateError::InvalidEraYear` for years below 1 or
    /// `Overflow` past the representable range.
    pub fn with_year(&self, date: &ResolvedDate, year: i64) -> Result<ResolvedDate, DateError> {
        let year = EraYear::new(year)?;
        let absolute_year = date
            .era()
            .year_origin()
            .checked_add(year.get() - 1)
            .ok_or(DateError::Overflow(year.get()))?;
        self.renormalize(
            absolute_year,
            i64::from(date.month().get()),
            i64::from(date.day().get()),
        )
    }

    /// New date with the month replaced; values outside 1..=12 carry into
    /// adjacent years, and the result renormalizes across era boundaries.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` past the representable range.
    pub fn with_month(&self, date: &ResolvedDate, month: i64) -> Result<ResolvedDate, DateError> {
        self.renormalize(date.absolute_year(), month, i64::from(date.day().get()))
    }

    /// New date with the day-of-month replaced; values outside the month
    /// carry, and the result renormalizes across era boundaries.
    ///
    /// # Errors
    /// Returns `DateError::Overflow` past the representable range.
    pub fn with_day(&self, date: &ResolvedDate, day: i64) -> Result<ResolvedDate, DateError> {
        self.renormalize(date.absolute_year(), i64::from(date.month().get()), day)
    }

    fn renormalize(&self, year: i64, month: i64, day: i64) -> Result<ResolvedDate, DateError> {
        let day = epoch_days_lenient(year, month, day).ok_or(DateError::Overflow(day))?;
        let instant = AbsoluteInstant::from_epoch_day(day).ok_or(DateError::Overflow(day))?;
        self.resolve(instant, ZoneOffset::UTC)
    }
}
