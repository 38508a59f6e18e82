use crate::consts::DAYS_PER_WEEK;
use crate::convert::{floor_div, weekday_on_or_before};
use crate::era::ConfigError;
use crate::types::Weekday;

/// Derives week-of-year and week-of-month numbers, parameterized by the
/// configured first day of week and the minimal-days-in-first-week
/// threshold (both locale-derived, treated as opaque inputs here).
///
/// A week belongs to a span if it contains at least `minimal_days_in_first_week`
/// days of that span; a shorter leading partial week is week 0. All
/// computations are pure functions of the era-truncated span, so
/// cross-era week rollover never occurs: each era-relative year numbers
/// its weeks purely from its own truncated day range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekCalculator {
    first_day_of_week: Weekday,
    minimal_days_in_first_week: u8,
}

impl WeekCalculator {
    /// Creates a calculator, validating the minimal-days threshold.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidMinimalDays` if the threshold is
    /// outside 1..=7.
    pub fn new(
        first_day_of_week: Weekday,
        minimal_days_in_first_week: u8,
    ) -> Result<Self, ConfigError> {
        if !(1..=7).contains(&minimal_days_in_first_week) {
            return Err(ConfigError::InvalidMinimalDays(minimal_days_in_first_week));
        }
        Ok(Self {
            first_day_of_week,
            minimal_days_in_first_week,
        })
    }

    /// Returns the configured first day of week
    pub const fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    /// Returns the configured minimal-days-in-first-week threshold
    pub const fn minimal_days_in_first_week(&self) -> u8 {
        self.minimal_days_in_first_week
    }

    /// Smallest week number this configuration can produce. Week 0 exists
    /// only when a leading partial week can miss the minimal-days
    /// threshold, which a 1-day threshold never allows.
    pub(crate) const fn min_week_number(&self) -> i64 {
        if self.minimal_days_in_first_week == 1 {
            1
        } else {
            0
        }
    }

    /// Week number of `day` within a span beginning on `span_start`
    /// (both epoch days, `span_start <= day`).
    ///
    /// The first `first_day_of_week` on or after the span start opens the
    /// first full week. If the leading partial week has at least the
    /// minimal number of days it counts as week 1; otherwise its days are
    /// week 0 and the first full week is week 1.
    pub(crate) fn week_number(&self, span_start: i64, day: i64) -> i64 {
        let first_full_week_start =
            weekday_on_or_before(span_start + DAYS_PER_WEEK - 1, self.first_day_of_week.get());
        let leading_days = first_full_week_start - span_start;
        let week_one_start = if leading_days >= i64::from(self.minimal_days_in_first_week) {
            first_full_week_start - DAYS_PER_WEEK
        } else {
            first_full_week_start
        };
        floor_div(day - week_one_start, DAYS_PER_WEEK) + 1
    }
}
