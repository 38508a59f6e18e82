/// Default maximum absolute year for the representable ceiling (inclusive)
pub const MAX_YEAR: i64 = 9999;

/// Default minimum absolute year for the representable floor (inclusive)
pub const MIN_YEAR: i64 = 1;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;
/// Month number for July
pub const JULY: u8 = 7;
/// Month number for December
pub const DECEMBER: u8 = 12;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Days in a common year
pub const DAYS_IN_COMMON_YEAR: u16 = 365;
/// Days in a leap year
pub const DAYS_IN_LEAP_YEAR: u16 = 366;

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i64 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i64 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i64 = 400;

/// One second in milliseconds
pub const ONE_SECOND: i64 = 1000;
/// One minute in milliseconds
pub const ONE_MINUTE: i64 = 60 * ONE_SECOND;
/// One hour in milliseconds
pub const ONE_HOUR: i64 = 60 * ONE_MINUTE;
/// One day in milliseconds
pub const ONE_DAY: i64 = 24 * ONE_HOUR;

/// Day-of-week number for Sunday
pub const SUNDAY: u8 = 1;
/// Day-of-week number for Monday
pub const MONDAY: u8 = 2;
/// Day-of-week number for Tuesday
pub const TUESDAY: u8 = 3;
/// Day-of-week number for Wednesday
pub const WEDNESDAY: u8 = 4;
/// Day-of-week number for Thursday
pub const THURSDAY: u8 = 5;
/// Day-of-week number for Friday
pub const FRIDAY: u8 = 6;
/// Day-of-week number for Saturday
pub const SATURDAY: u8 = 7;

/// Days in a week
pub const DAYS_PER_WEEK: i64 = 7;
