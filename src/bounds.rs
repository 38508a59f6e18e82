use crate::ResolvedDate;
use crate::consts::{DECEMBER, JANUARY, MIN_DAY};
use crate::convert::{epoch_days_from_gregorian, gregorian_from_epoch_days};
use crate::era::EraTable;
use crate::guard::OverflowGuard;
use crate::prelude::*;
use crate::types::days_in_month;
use crate::week::WeekCalculator;
use serde::Serialize;

/// A calendar field whose actual bounds depend on where a date sits
/// relative to era boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CalendarField {
    /// Era-relative year, counted from 1
    #[display(fmt = "YEAR")]
    Year,
    /// Month of the absolute Gregorian year, 1..=12
    #[display(fmt = "MONTH")]
    Month,
    /// Day within the era-relative year, restarting at 1 on a mid-year
    /// era start
    #[display(fmt = "DAY_OF_YEAR")]
    DayOfYear,
    /// Week within the era-relative year's truncated day range
    #[display(fmt = "WEEK_OF_YEAR")]
    WeekOfYear,
    /// Week within the era-truncated month
    #[display(fmt = "WEEK_OF_MONTH")]
    WeekOfMonth,
}

/// Bounds of one field at one resolved date. The generic bounds ignore era
/// truncation; the actual bounds are the tightest valid values given the
/// date's position relative to era boundaries, and are never wider than
/// the generic ones. `clamped` reports that a bound was limited by the
/// representable ceiling rather than by calendar structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRange {
    /// Generic minimum, ignoring era truncation
    pub minimum: i64,
    /// Tightest minimum for the queried date
    pub actual_minimum: i64,
    /// Generic maximum, ignoring era truncation
    pub maximum: i64,
    /// Tightest maximum for the queried date
    pub actual_maximum: i64,
    /// Whether a bound was cut off at the representable ceiling
    pub clamped: bool,
}

/// Inclusive epoch-day interval covered by an era-relative year or month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span {
    pub start: i64,
    pub end: i64,
    pub clamped: bool,
}

impl Span {
    const fn length(&self) -> i64 {
        self.end - self.start + 1
    }
}

/// Computes actual minima and maxima per field, respecting era truncation.
pub(crate) struct BoundsResolver<'a> {
    table: &'a EraTable,
    guard: &'a OverflowGuard,
    weeks: &'a WeekCalculator,
}

impl<'a> BoundsResolver<'a> {
    pub(crate) const fn new(
        table: &'a EraTable,
        guard: &'a OverflowGuard,
        weeks: &'a WeekCalculator,
    ) -> Self {
        Self {
            table,
            guard,
            weeks,
        }
    }

    /// Clamps a generic span to the date's era boundaries and the
    /// representable floor/ceiling. The era start can only cut into the
    /// span holding it (for later spans the start already lies past it),
    /// and the day before the next era's start caps the end: the
    /// transition instant itself belongs to the new era. Days outside the
    /// representable range are unresolvable, so the floor raises the start
    /// and the ceiling lowers the end, both flagged as clamped.
    fn truncate(&self, date: &ResolvedDate, generic: Span) -> Span {
        let era = date.era();
        let mut start = generic.start;
        if let Some(era_start) = era.start() {
            start = start.max(era_start.epoch_day());
        }
        let mut end = generic.end;
        if let Some(next_start) = self.table.next_era_start(era) {
            end = end.min(next_start.epoch_day() - 1);
        }
        let mut clamped = false;
        if start < self.guard.floor_day() {
            start = self.guard.floor_day();
            clamped = true;
        }
        if self.guard.ceiling_day() < end {
            end = self.guard.ceiling_day();
            clamped = true;
        }
        Span {
            start,
            end,
            clamped,
        }
    }

    /// Generic and era-truncated day spans of the date's era-relative year
    pub(crate) fn year_spans(&self, date: &ResolvedDate) -> (Span, Span) {
        let year = date.absolute_year();
        let generic = Span {
            start: epoch_days_from_gregorian(year, JANUARY, MIN_DAY),
            end: epoch_days_from_gregorian(year, DECEMBER, 31),
            clamped: false,
        };
        (generic, self.truncate(date, generic))
    }

    /// Generic and era-truncated day spans of the date's month
    pub(crate) fn month_spans(&self, date: &ResolvedDate) -> (Span, Span) {
        let year = date.absolute_year();
        let month = date.month().get();
        let first = epoch_days_from_gregorian(year, month, MIN_DAY);
        let generic = Span {
            start: first,
            end: first + i64::from(days_in_month(year, month)) - 1,
            clamped: false,
        };
        (generic, self.truncate(date, generic))
    }

    /// Day-of-year of the date, numbered from its era-relative year's own
    /// day 1 (the era start date when the era begins mid-year)
    pub(crate) fn day_of_year(&self, date: &ResolvedDate) -> i64 {
        let (_, span) = self.year_spans(date);
        date.epoch_day() - span.start + 1
    }

    /// Week-of-year of the date within its truncated year span
    pub(crate) fn week_of_year(&self, date: &ResolvedDate) -> i64 {
        let (_, span) = self.year_spans(date);
        self.weeks.week_number(span.start, date.epoch_day())
    }

    /// Week-of-month of the date within its truncated month span
    pub(crate) fn week_of_month(&self, date: &ResolvedDate) -> i64 {
        let (_, span) = self.month_spans(date);
        self.weeks.week_number(span.start, date.epoch_day())
    }

    pub(crate) fn resolve(&self, date: &ResolvedDate, field: CalendarField) -> FieldRange {
        match field {
            CalendarField::Year => self.year_bounds(date),
            CalendarField::Month => self.month_bounds(date),
            CalendarField::DayOfYear => self.day_of_year_bounds(date),
            CalendarField::WeekOfYear => {
                let (generic, actual) = self.year_spans(date);
                self.week_bounds(generic, actual)
            }
            CalendarField::WeekOfMonth => {
                let (generic, actual) = self.month_spans(date);
                self.week_bounds(generic, actual)
            }
        }
    }

    /// YEAR bounds. The actual minimum is always 1. For a bounded era the
    /// actual maximum is the era-relative year holding the last day before
    /// the next era; for the open era it is the guard's memoized ceiling
    /// year, the same value for every queried date inside the era.
    fn year_bounds(&self, date: &ResolvedDate) -> FieldRange {
        let era = date.era();
        let (ceiling_year, _, _) = gregorian_from_epoch_days(self.guard.ceiling_day());
        let generic_max = era.era_year_of(ceiling_year);
        let (actual_max, clamped) = match self.table.next_era_start(era) {
            Some(next) => {
                let (last_year, _, _) = gregorian_from_epoch_days(next.epoch_day() - 1);
                let last = era.era_year_of(last_year);
                if last > generic_max {
                    (generic_max, true)
                } else {
                    (last, false)
                }
            }
            None => (self.guard.open_era_max_year(self.table), true),
        };
        FieldRange {
            minimum: 1,
            actual_minimum: 1,
            maximum: generic_max,
            actual_maximum: actual_max,
            clamped,
        }
    }

    /// MONTH bounds: the months of the first and last days of the
    /// truncated year span. A mid-year era start truncates only the
    /// minimum; an era ending mid-year truncates only the maximum.
    fn month_bounds(&self, date: &ResolvedDate) -> FieldRange {
        let (generic, actual) = self.year_spans(date);
        let (_, generic_min, _) = gregorian_from_epoch_days(generic.start);
        let (_, generic_max, _) = gregorian_from_epoch_days(generic.end);
        let (_, actual_min, _) = gregorian_from_epoch_days(actual.start);
        let (_, actual_max, _) = gregorian_from_epoch_days(actual.end);
        FieldRange {
            minimum: i64::from(generic_min),
            actual_minimum: i64::from(actual_min),
            maximum: i64::from(generic_max),
            actual_maximum: i64::from(actual_max),
            clamped: actual.clamped,
        }
    }

    /// DAY_OF_YEAR bounds: the generic maximum is 365/366 per the leap
    /// rule of the absolute year; the actual maximum is the truncated
    /// span's length, since numbering restarts at the span's first day.
    fn day_of_year_bounds(&self, date: &ResolvedDate) -> FieldRange {
        let (generic, actual) = self.year_spans(date);
        FieldRange {
            minimum: 1,
            actual_minimum: 1,
            maximum: generic.length(),
            actual_maximum: actual.length(),
            clamped: actual.clamped,
        }
    }

    /// Week bounds over a generic and a truncated span: each span numbers
    /// its weeks purely from its own first day, so no week ever rolls
    /// across an era boundary. The generic minimum is the smallest week
    /// number the configuration can produce for any span alignment, so a
    /// truncated span opening with a below-threshold partial week (week 0)
    /// never undercuts it.
    fn week_bounds(&self, generic: Span, actual: Span) -> FieldRange {
        FieldRange {
            minimum: self.weeks.min_week_number(),
            actual_minimum: self.weeks.week_number(actual.start, actual.start),
            maximum: self.weeks.week_number(generic.start, generic.end),
            actual_maximum: self.weeks.week_number(actual.start, actual.end),
            clamped: actual.clamped,
        }
    }
}
