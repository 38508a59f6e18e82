use crate::consts::{MIN_DAY, ONE_DAY};
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// A signed count of elapsed milliseconds since 1970-01-01T00:00:00.
/// The canonical conversion currency between eras: every date resolves to
/// an `AbsoluteInstant` and every instant resolves to exactly one date.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct AbsoluteInstant(i64);

impl AbsoluteInstant {
    /// Returns the raw millisecond value
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// The instant at midnight of the given epoch day.
    /// Returns `None` on millisecond overflow.
    pub const fn from_epoch_day(day: i64) -> Option<Self> {
        match day.checked_mul(ONE_DAY) {
            Some(millis) => Some(Self(millis)),
            None => None,
        }
    }

    /// The epoch day this instant falls on (floor of the day boundary,
    /// so pre-epoch instants round toward earlier days).
    #[inline]
    pub const fn epoch_day(self) -> i64 {
        floor_div(self.0, ONE_DAY)
    }

    /// Midnight of the given proleptic Gregorian date.
    /// Saturates at the numeric limits for astronomically distant years.
    pub const fn from_ymd(year: i64, month: u8, day: u8) -> Self {
        Self(epoch_days_from_gregorian(year, month, day).saturating_mul(ONE_DAY))
    }

    /// Checked millisecond addition
    pub const fn checked_add(self, millis: i64) -> Option<Self> {
        match self.0.checked_add(millis) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Checked millisecond subtraction
    pub const fn checked_sub(self, millis: i64) -> Option<Self> {
        match self.0.checked_sub(millis) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }
}

/// A resolved UTC offset in milliseconds, supplied by an external time-zone
/// collaborator. Applied before (resolve) or after (`to_instant`) the
/// internal UTC-based computation; never computed here.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct ZoneOffset(i64);

impl ZoneOffset {
    /// The zero offset
    pub const UTC: Self = Self(0);

    /// Offset of a whole number of hours east of UTC
    pub const fn from_hours(hours: i64) -> Self {
        Self(hours * crate::consts::ONE_HOUR)
    }

    /// Returns the offset in milliseconds
    #[inline]
    pub const fn millis(self) -> i64 {
        self.0
    }
}

/// Floored integer division (quotient rounds toward negative infinity)
pub(crate) const fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        q - 1
    } else {
        q
    }
}

/// Floored remainder, always in `0..b` for positive `b`
pub(crate) const fn floor_mod(a: i64, b: i64) -> i64 {
    a - floor_div(a, b) * b
}

/// Epoch-day number of a proleptic Gregorian date (1970-01-01 is day 0).
/// Days-from-civil arithmetic over 400-year cycles; valid for the full
/// signed range of years this engine can address.
pub(crate) const fn epoch_days_from_gregorian(year: i64, month: u8, day: u8) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = floor_div(y, 400);
    let yoe = y - era * 400; // 0..=399
    let mp = (month as i64 + 9) % 12; // March-based month, 0..=11
    let doy = (153 * mp + 2) / 5 + day as i64 - 1; // 0..=365
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy; // 0..=146096
    era * 146097 + doe - 719468
}

/// Inverse of `epoch_days_from_gregorian`: (year, month, day) of an epoch day.
pub(crate) const fn gregorian_from_epoch_days(day: i64) -> (i64, u8, u8) {
    let z = day + 719468;
    let era = floor_div(z, 146097);
    let doe = z - era * 146097; // 0..=146096
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365; // 0..=399
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100); // 0..=365
    let mp = (5 * doy + 2) / 153; // 0..=11
    let d = (doy - (153 * mp + 2) / 5 + 1) as u8; // 1..=31
    let m = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8; // 1..=12
    (if m <= 2 { y + 1 } else { y }, m, d)
}

/// Largest year magnitude the epoch-day arithmetic accepts after month
/// carry. Well past the point where the millisecond representation
/// overflows, so nothing representable is rejected.
pub(crate) const MAX_CARRY_YEAR: i64 = 300_000_000;

/// Lenient date composition: month and day may lie outside their generic
/// ranges and carry into adjacent months/years (day 32 of January is
/// February 1). Returns `None` when the carried values overflow the
/// epoch-day arithmetic. Used by field renormalization.
pub(crate) const fn epoch_days_lenient(year: i64, month: i64, day: i64) -> Option<i64> {
    let months = match month.checked_sub(1) {
        Some(m) => m,
        None => return None,
    };
    let year = match year.checked_add(floor_div(months, 12)) {
        Some(y) => y,
        None => return None,
    };
    if year < -MAX_CARRY_YEAR || year > MAX_CARRY_YEAR {
        return None;
    }
    let month = (floor_mod(months, 12) + 1) as u8;
    let first = epoch_days_from_gregorian(year, month, MIN_DAY);
    // the day-of-era arithmetic is linear in the day value, so day overflow
    // and underflow carry across month boundaries on their own
    match first.checked_add(day) {
        Some(total) => total.checked_sub(1),
        None => None,
    }
}

/// Day of week of an epoch day, Sunday = 1 .. Saturday = 7
/// (epoch day 0, 1970-01-01, is a Thursday).
pub(crate) const fn day_of_week(day: i64) -> u8 {
    (floor_mod(day + 4, 7) + 1) as u8
}

/// Latest epoch day on or before `day` that falls on the given day of week
pub(crate) const fn weekday_on_or_before(day: i64, dow: u8) -> i64 {
    day - floor_mod(day_of_week(day) as i64 - dow as i64, 7)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SATURDAY, SUNDAY, THURSDAY, WEDNESDAY};
    use crate::types::days_in_month;

    #[test]
    fn test_floor_div_and_mod() {
        assert_eq!(floor_div(7, 2), 3);
        assert_eq!(floor_div(-7, 2), -4);
        assert_eq!(floor_div(-8, 2), -4);
        assert_eq!(floor_mod(7, 7), 0);
        assert_eq!(floor_mod(-1, 7), 6);
        assert_eq!(floor_mod(-7, 7), 0);
    }

    #[test]
    fn test_known_epoch_days() {
        struct TestCase {
            year: i64,
            month: u8,
            day: u8,
            epoch_day: i64,
            description: &'static str,
        }

        let cases = [
            TestCase {
                year: 1970,
                month: 1,
                day: 1,
                epoch_day: 0,
                description: "epoch",
            },
            TestCase {
                year: 1969,
                month: 12,
                day: 31,
                epoch_day: -1,
                description: "day before epoch",
            },
            TestCase {
                year: 2000,
                month: 3,
                day: 1,
                epoch_day: 11017,
                description: "day after a 400-cycle leap day",
            },
            TestCase {
                year: 1868,
                month: 1,
                day: 1,
                epoch_day: -37255,
                description: "Meiji start",
            },
            TestCase {
                year: 2019,
                month: 5,
                day: 1,
                epoch_day: 18017,
                description: "Reiwa start",
            },
        ];

        for case in &cases {
            assert_eq!(
                epoch_days_from_gregorian(case.year, case.month, case.day),
                case.epoch_day,
                "forward: {}",
                case.description
            );
            assert_eq!(
                gregorian_from_epoch_days(case.epoch_day),
                (case.year, case.month, case.day),
                "inverse: {}",
                case.description
            );
        }
    }

    #[test]
    fn test_round_trip_sample_years() {
        let years = [
            -400, -100, -4, -1, 0, 1, 4, 100, 400, 1600, 1868, 1900, 1912, 1926, 1970, 1989, 2000,
            2019, 2024, 9999,
        ];
        for &year in &years {
            for month in 1..=12u8 {
                for day in 1..=days_in_month(year, month) {
                    let ed = epoch_days_from_gregorian(year, month, day);
                    assert_eq!(
                        gregorian_from_epoch_days(ed),
                        (year, month, day),
                        "round trip failed for {year}-{month:02}-{day:02}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_monotonic_over_consecutive_days() {
        // ordering of dates agrees with ordering of day numbers across
        // month, year, century, and leap boundaries
        let start = epoch_days_from_gregorian(1899, 12, 20);
        let mut prev = gregorian_from_epoch_days(start - 1);
        for d in start..start + 400 {
            let cur = gregorian_from_epoch_days(d);
            assert!(prev < cur, "dates out of order at epoch day {d}");
            prev = cur;
        }
    }

    #[test]
    fn test_lenient_day_carry() {
        // day 32 of January is February 1
        assert_eq!(
            epoch_days_lenient(2023, 1, 32),
            Some(epoch_days_from_gregorian(2023, 2, 1))
        );
        // day 0 of March is the last day of February
        assert_eq!(
            epoch_days_lenient(2024, 3, 0),
            Some(epoch_days_from_gregorian(2024, 2, 29))
        );
        // day 366 of a common year rolls into the next year
        assert_eq!(
            epoch_days_lenient(2023, 1, 366),
            Some(epoch_days_from_gregorian(2024, 1, 1))
        );
    }

    #[test]
    fn test_lenient_month_carry() {
        // month 13 is January of the following year
        assert_eq!(
            epoch_days_lenient(2023, 13, 1),
            Some(epoch_days_from_gregorian(2024, 1, 1))
        );
        // month 0 is December of the preceding year
        assert_eq!(
            epoch_days_lenient(2023, 0, 15),
            Some(epoch_days_from_gregorian(2022, 12, 15))
        );
    }

    #[test]
    fn test_lenient_extreme_values_do_not_overflow() {
        assert_eq!(epoch_days_lenient(2023, i64::MAX, 1), None);
        assert_eq!(epoch_days_lenient(2023, i64::MIN, 1), None);
        assert_eq!(epoch_days_lenient(2023, 1, i64::MAX), None);
        assert_eq!(epoch_days_lenient(i64::MAX, 1, 1), None);
        assert_eq!(epoch_days_lenient(i64::MIN, 1, 1), None);
    }

    #[test]
    fn test_day_of_week() {
        // 1970-01-01 was a Thursday
        assert_eq!(day_of_week(0), THURSDAY);
        // 1989-01-08 (Heisei start) was a Sunday
        assert_eq!(
            day_of_week(epoch_days_from_gregorian(1989, 1, 8)),
            SUNDAY
        );
        // 2019-05-01 (Reiwa start) was a Wednesday
        assert_eq!(
            day_of_week(epoch_days_from_gregorian(2019, 5, 1)),
            WEDNESDAY
        );
        // pre-epoch: 1969-12-27 was a Saturday
        assert_eq!(day_of_week(-5), SATURDAY);
    }

    #[test]
    fn test_weekday_on_or_before() {
        let thursday = 0; // 1970-01-01
        assert_eq!(weekday_on_or_before(thursday, THURSDAY), thursday);
        assert_eq!(weekday_on_or_before(thursday, SUNDAY), thursday - 4);
        assert_eq!(weekday_on_or_before(thursday, SATURDAY), thursday - 5);
        // result is always within the preceding week
        for d in -10..10 {
            for dow in 1..=7u8 {
                let r = weekday_on_or_before(d, dow);
                assert!(r <= d && d - r < 7);
                assert_eq!(day_of_week(r), dow);
            }
        }
    }

    #[test]
    fn test_instant_day_conversion() {
        let midnight = AbsoluteInstant::from_epoch_day(100).unwrap();
        assert_eq!(midnight.get(), 100 * ONE_DAY);
        assert_eq!(midnight.epoch_day(), 100);
        // any instant within the day maps to the same day
        assert_eq!(midnight.checked_add(ONE_DAY - 1).unwrap().epoch_day(), 100);
        // pre-epoch instants floor toward earlier days
        assert_eq!(AbsoluteInstant::from(-1i64).epoch_day(), -1);
    }

    #[test]
    fn test_from_ymd() {
        assert_eq!(AbsoluteInstant::from_ymd(1970, 1, 1).get(), 0);
        assert_eq!(
            AbsoluteInstant::from_ymd(2019, 5, 1).epoch_day(),
            epoch_days_from_gregorian(2019, 5, 1)
        );
    }

    #[test]
    fn test_zone_offset() {
        assert_eq!(ZoneOffset::UTC.millis(), 0);
        assert_eq!(ZoneOffset::from_hours(9).millis(), 9 * 60 * 60 * 1000);
        assert_eq!(ZoneOffset::from_hours(-5).millis(), -5 * 60 * 60 * 1000);
    }
}
