use crate::DateError;
use crate::convert::AbsoluteInstant;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// Error type for engine construction.
/// Every variant is fatal: a violated table invariant prevents the engine
/// from being built, so queries never observe a malformed table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The era list is empty.
    #[error("Era table is empty")]
    EmptyEraTable,

    /// The first era must be the proleptic catch-all with an unbounded past.
    #[error("First era '{0}' must have an unbounded past start")]
    BoundedFirstEra(String),

    /// Every era after the first needs a start instant.
    #[error("Era '{0}' after the first must have a start instant")]
    MissingEraStart(String),

    /// Eras must be strictly ordered by start instant, no overlaps.
    #[error("Era '{later}' does not start strictly after era '{earlier}'")]
    UnorderedEras { earlier: String, later: String },

    /// Era names must be unique for lookup by name.
    #[error("Duplicate era name: {0}")]
    DuplicateEraName(String),

    /// Minimal days in the first week is a 1..=7 threshold.
    #[error("Minimal days in first week must be 1-7, got {0}")]
    InvalidMinimalDays(u8),

    /// The representable floor must precede the ceiling.
    #[error("Representable floor {floor} must precede ceiling {ceiling}")]
    InvalidRepresentableRange { floor: i64, ceiling: i64 },
}

/// A named, chronologically bounded segment of the year axis with its own
/// year-numbering origin. Era-relative year `y` maps to absolute Gregorian
/// year `year_origin + y - 1`; the last era in a table is open-ended.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize)]
#[display(fmt = "{}", name)]
pub struct Era {
    name: String,
    index: usize,
    start: Option<AbsoluteInstant>,
    year_origin: i64,
}

impl Era {
    /// Returns the era name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ordinal position of this era in its table
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the first instant of this era, or `None` for the unbounded
    /// past of the proleptic first era
    pub const fn start(&self) -> Option<AbsoluteInstant> {
        self.start
    }

    /// Returns the absolute Gregorian year of era-relative year 1
    pub const fn year_origin(&self) -> i64 {
        self.year_origin
    }

    /// Absolute Gregorian year of the given era-relative year
    pub const fn absolute_year(&self, era_year: i64) -> i64 {
        self.year_origin + era_year - 1
    }

    /// Era-relative year of the given absolute Gregorian year
    pub const fn era_year_of(&self, absolute_year: i64) -> i64 {
        absolute_year - self.year_origin + 1
    }
}

/// Construction record for one era, accepted as external configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraSpec {
    /// Era name, unique within a table
    pub name: String,
    /// First instant of the era; `None` only for the proleptic first era
    pub start: Option<AbsoluteInstant>,
    /// Absolute Gregorian year of era-relative year 1
    pub year_origin: i64,
}

impl EraSpec {
    /// An era starting at the given instant
    pub fn new(name: impl Into<String>, start: AbsoluteInstant, year_origin: i64) -> Self {
        Self {
            name: name.into(),
            start: Some(start),
            year_origin,
        }
    }

    /// The proleptic catch-all era with an unbounded past
    pub fn proleptic(name: impl Into<String>, year_origin: i64) -> Self {
        Self {
            name: name.into(),
            start: None,
            year_origin,
        }
    }
}

/// Static, ordered list of eras. Immutable after construction; the last
/// entry is always the open era.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraTable {
    eras: Vec<Era>,
}

impl EraTable {
    /// Builds a table from ordered era specs, validating the partition
    /// invariants up front so queries never fail.
    ///
    /// # Errors
    /// Returns `ConfigError` if the list is empty, the first era is
    /// bounded, a later era lacks a start, starts are not strictly
    /// increasing, or a name repeats.
    pub fn new(specs: Vec<EraSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyEraTable);
        }

        let mut eras = Vec::with_capacity(specs.len());
        for (index, spec) in specs.into_iter().enumerate() {
            match (index, spec.start) {
                (0, Some(_)) => return Err(ConfigError::BoundedFirstEra(spec.name)),
                (0, None) => {}
                (_, None) => return Err(ConfigError::MissingEraStart(spec.name)),
                (_, Some(start)) => {
                    // the first era's unbounded start orders before anything
                    let earlier: &Era = &eras[index - 1];
                    if let Some(prev) = earlier.start {
                        if start <= prev {
                            return Err(ConfigError::UnorderedEras {
                                earlier: earlier.name.clone(),
                                later: spec.name,
                            });
                        }
                    }
                }
            }
            if eras.iter().any(|e: &Era| e.name == spec.name) {
                return Err(ConfigError::DuplicateEraName(spec.name));
            }
            eras.push(Era {
                name: spec.name,
                index,
                start: spec.start,
                year_origin: spec.year_origin,
            });
        }

        Ok(Self { eras })
    }

    /// The era claiming the given instant. Total: the proleptic first era
    /// catches the unbounded past, the open last era everything after its
    /// start. A transition instant belongs entirely to the NEW era; the
    /// old era's last instant is the transition minus one millisecond.
    pub fn era_containing(&self, instant: AbsoluteInstant) -> &Era {
        self.eras
            .iter()
            .rev()
            .find(|era| match era.start {
                Some(start) => start <= instant,
                None => true,
            })
            .unwrap_or(&self.eras[0])
    }

    /// Looks an era up by name.
    ///
    /// # Errors
    /// Returns `DateError::UnknownEra` if no era has the given name.
    pub fn era_by_name(&self, name: &str) -> Result<&Era, DateError> {
        self.eras
            .iter()
            .find(|era| era.name == name)
            .ok_or_else(|| DateError::UnknownEra(name.to_owned()))
    }

    /// First instant of the era following the given one, or `None` for the
    /// open era
    pub fn next_era_start(&self, era: &Era) -> Option<AbsoluteInstant> {
        self.eras.get(era.index + 1).and_then(|next| next.start)
    }

    /// The open (last) era
    pub fn open_era(&self) -> &Era {
        &self.eras[self.eras.len() - 1]
    }

    /// All eras in chronological order
    pub fn eras(&self) -> &[Era] {
        &self.eras
    }
}

/// The imperial era table the engine was modeled after: a proleptic
/// catch-all before Meiji, then the five sovereign eras, Reiwa open-ended.
/// Transition instants are local midnights.
pub(crate) fn japanese_era_specs() -> Vec<EraSpec> {
    vec![
        EraSpec::proleptic("BeforeMeiji", 1),
        EraSpec::new("Meiji", AbsoluteInstant::from_ymd(1868, 1, 1), 1868),
        EraSpec::new("Taisho", AbsoluteInstant::from_ymd(1912, 7, 30), 1912),
        EraSpec::new("Showa", AbsoluteInstant::from_ymd(1926, 12, 25), 1926),
        EraSpec::new("Heisei", AbsoluteInstant::from_ymd(1989, 1, 8), 1989),
        EraSpec::new("Reiwa", AbsoluteInstant::from_ymd(2019, 5, 1), 2019),
    ]
}
