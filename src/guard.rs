use crate::consts::{JANUARY, MAX_YEAR, MIN_DAY, MIN_YEAR};
use crate::convert::{AbsoluteInstant, gregorian_from_epoch_days};
use crate::era::{ConfigError, Era, EraTable};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// The engine-wide floor/ceiling instants beyond which no date may be
/// resolved. Defaults span absolute years 1 through 9999.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeSpec", into = "RangeSpec")]
pub struct RepresentableRange {
    floor: AbsoluteInstant,
    ceiling: AbsoluteInstant,
}

/// Serde shadow for `RepresentableRange` so deserialized ranges pass the
/// same validation as constructed ones.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RangeSpec {
    floor: AbsoluteInstant,
    ceiling: AbsoluteInstant,
}

impl TryFrom<RangeSpec> for RepresentableRange {
    type Error = ConfigError;

    fn try_from(spec: RangeSpec) -> Result<Self, Self::Error> {
        Self::new(spec.floor, spec.ceiling)
    }
}

impl From<RepresentableRange> for RangeSpec {
    fn from(range: RepresentableRange) -> Self {
        Self {
            floor: range.floor,
            ceiling: range.ceiling,
        }
    }
}

impl RepresentableRange {
    /// Creates a range, validating that the floor precedes the ceiling.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidRepresentableRange` if `floor >= ceiling`.
    pub fn new(floor: AbsoluteInstant, ceiling: AbsoluteInstant) -> Result<Self, ConfigError> {
        if floor >= ceiling {
            return Err(ConfigError::InvalidRepresentableRange {
                floor: floor.get(),
                ceiling: ceiling.get(),
            });
        }
        Ok(Self { floor, ceiling })
    }

    /// Returns the earliest representable instant
    pub const fn floor(&self) -> AbsoluteInstant {
        self.floor
    }

    /// Returns the latest representable instant
    pub const fn ceiling(&self) -> AbsoluteInstant {
        self.ceiling
    }

    /// Whether the instant lies within the range (inclusive on both ends)
    pub const fn contains(&self, instant: AbsoluteInstant) -> bool {
        self.floor.get() <= instant.get() && instant.get() <= self.ceiling.get()
    }
}

impl Default for RepresentableRange {
    fn default() -> Self {
        Self {
            floor: AbsoluteInstant::from_ymd(MIN_YEAR, JANUARY, MIN_DAY),
            // last millisecond of the final representable day
            ceiling: AbsoluteInstant::from_ymd(MAX_YEAR + 1, JANUARY, MIN_DAY)
                .checked_sub(1)
                .unwrap_or_else(|| AbsoluteInstant::from(i64::MAX)),
        }
    }
}

/// Clamps results at the representable instant range and owns the
/// write-once memo of the open era's maximum era-relative year.
/// Recomputing the memo concurrently always yields the same value, so the
/// `OnceLock` initialization race is benign.
#[derive(Debug)]
pub struct OverflowGuard {
    range: RepresentableRange,
    open_era_max_year: OnceLock<i64>,
}

impl OverflowGuard {
    pub const fn new(range: RepresentableRange) -> Self {
        Self {
            range,
            open_era_max_year: OnceLock::new(),
        }
    }

    /// The engine-wide ceiling instant
    pub const fn max_representable_instant(&self) -> AbsoluteInstant {
        self.range.ceiling()
    }

    /// The engine-wide floor instant
    pub const fn min_representable_instant(&self) -> AbsoluteInstant {
        self.range.floor()
    }

    /// Whether the instant can be resolved at all
    pub const fn contains(&self, instant: AbsoluteInstant) -> bool {
        self.range.contains(instant)
    }

    /// Epoch day of the last representable instant
    pub(crate) const fn ceiling_day(&self) -> i64 {
        self.range.ceiling().epoch_day()
    }

    /// Epoch day of the first representable instant
    pub(crate) const fn floor_day(&self) -> i64 {
        self.range.floor().epoch_day()
    }

    /// The largest era-relative year of the open era whose January 1 is
    /// still representable: the era-relative year the ceiling itself falls
    /// in. A global numeric limit, not a calendar fact, so it is the same
    /// for every queried date within the open era.
    pub fn open_era_max_year(&self, table: &EraTable) -> i64 {
        *self.open_era_max_year.get_or_init(|| {
            let (year, _, _) = gregorian_from_epoch_days(self.ceiling_day());
            table.open_era().era_year_of(year)
        })
    }

    /// Clamps a candidate era-relative year to the era's actual maximum,
    /// reporting whether clamping occurred. Near the ceiling this returns
    /// the clamped value plus the flag rather than an error.
    pub fn clamp_era_relative_year(
        &self,
        table: &EraTable,
        era: &Era,
        candidate: i64,
    ) -> (i64, bool) {
        let max = match table.next_era_start(era) {
            Some(next) => {
                let (last_year, _, _) = gregorian_from_epoch_days(next.epoch_day() - 1);
                era.era_year_of(last_year)
            }
            None => self.open_era_max_year(table),
        };
        if candidate > max {
            (max, true)
        } else {
            (candidate, false)
        }
    }
}
