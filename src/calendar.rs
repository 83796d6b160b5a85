//! Proleptic-Gregorian calendar primitives.
//!
//! Pure, total functions on `(year, month, day)` triples and their day-count
//! equivalents. Everything here is side-effect free and operates on 64-bit
//! integers internally so the supported year range (`Year::MIN..=Year::MAX`)
//! never overflows intermediate arithmetic.

use std::num::NonZeroU16;

use crate::error::{Error, Result};

/// ISO weekday numbering: Monday = 1 .. Sunday = 7.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Weekday {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl Weekday {
    pub(crate) const fn from_iso_unchecked(n: u8) -> Self {
        debug_assert!(n >= 1 && n <= 7);
        // Safety: Weekday is repr(u8), caller guarantees range
        unsafe { std::mem::transmute(n) }
    }

    /// Construct from the 0 = "exact day, no weekday constraint" .. 7 = Sunday
    /// convention used by `ZoneRule::on_day_of_week`.
    pub const fn from_rule_field(n: u8) -> Option<Self> {
        if n >= 1 && n <= 7 {
            Some(Self::from_iso_unchecked(n))
        } else {
            None
        }
    }

    pub const fn iso(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February = 2,
    March = 3,
    April = 4,
    May = 5,
    June = 6,
    July = 7,
    August = 8,
    September = 9,
    October = 10,
    November = 11,
    December = 12,
}

impl Month {
    pub const MIN: Month = Month::January;
    pub const MAX: Month = Month::December;

    pub const fn new(n: u8) -> Option<Self> {
        if n >= 1 && n <= 12 {
            Some(Self::new_unchecked(n))
        } else {
            None
        }
    }

    pub const fn new_unchecked(n: u8) -> Self {
        debug_assert!(n >= 1 && n <= 12);
        // Safety: Month is repr(u8)
        unsafe { std::mem::transmute(n) }
    }

    pub const fn get(self) -> u8 {
        self as u8
    }
}

const MAX_MONTH_DAYS: [[u8; 13]; 2] = [
    // non-leap year
    [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
    // leap year
    [0, 31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31],
];
const DAYS_BEFORE_MONTH: [[u16; 13]; 2] = [
    // non-leap years
    [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334],
    // leap years
    [0, 0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335],
];

/// A calendar year in `1..=9999`, the supported horizon of this engine.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Year(NonZeroU16);

impl Year {
    pub const MIN: Year = Year(NonZeroU16::new(1).unwrap());
    pub const MAX: Year = Year(NonZeroU16::new(9999).unwrap());

    pub const fn new(year: u16) -> Option<Self> {
        if year <= Year::MAX.get() {
            match NonZeroU16::new(year) {
                Some(year) => Some(Self(year)),
                None => None,
            }
        } else {
            None
        }
    }

    pub const fn new_unchecked(year: u16) -> Self {
        debug_assert!(year >= Year::MIN.get() && year <= Year::MAX.get());
        Self(unsafe { NonZeroU16::new_unchecked(year) })
    }

    pub fn from_i32(y: i32) -> Option<Self> {
        (y >= Year::MIN.get() as i32 && y <= Year::MAX.get() as i32)
            .then(|| Self::new_unchecked(y as u16))
    }

    pub const fn get(self) -> u16 {
        self.0.get()
    }

    pub const fn is_leap(self) -> bool {
        (self.get() % 4 == 0 && self.get() % 100 != 0) || self.get() % 400 == 0
    }

    /// Number of unix days (since 1970-01-01) at which this year's Jan 1 falls.
    pub fn unix_days_at_jan1(self) -> UnixDays {
        let y = (self.get() - 1) as i32;
        UnixDays::new_unchecked(y * 365 + y / 4 - y / 100 + y / 400 - 719_162)
    }

    pub const fn days_in_month(self, month: Month) -> u8 {
        MAX_MONTH_DAYS[self.is_leap() as usize][month as usize]
    }

    pub const fn days_before_month(self, month: Month) -> u16 {
        DAYS_BEFORE_MONTH[self.is_leap() as usize][month as usize]
    }

    /// Saturating `self + delta`, clamped to `[MIN, MAX]`. Used by the era
    /// selector / rule expander to probe `year - 1` / `year + 1` / `year + 2`
    /// near the edges of the supported horizon without overflowing.
    pub fn saturating_add(self, delta: i32) -> Self {
        let y = (self.get() as i32 + delta).clamp(Year::MIN.get() as i32, Year::MAX.get() as i32);
        Self::new_unchecked(y as u16)
    }
}

/// Number of days since 1970-01-01 (may be negative).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnixDays(i32);

impl UnixDays {
    pub const MIN: UnixDays = UnixDays(-719_162);
    pub const MAX: UnixDays = UnixDays(2_932_896);

    pub const fn new_unchecked(days: i32) -> Self {
        debug_assert!(days >= Self::MIN.0 && days <= Self::MAX.0);
        Self(days)
    }

    pub const fn get(self) -> i32 {
        self.0
    }

    /// Decompose into a proleptic-Gregorian `(Year, Month, day)` triple.
    ///
    /// The Neri-Schneider algorithm, from
    /// <https://github.com/cassioneri/eaf/blob/684d3cc32d14eee371d0abe4f683d6d6a49ed5c1/algorithms/neri_schneider.hpp>
    /// (MIT licensed).
    pub fn date(self) -> (Year, Month, u8) {
        const S: u32 = 82;
        const K: u32 = 719468 + 146097 * S;
        const L: u32 = 400 * S;
        let n = (self.0 as u32).wrapping_add(K);

        let n_1 = 4 * n + 3;
        let c = n_1 / 146097;
        let n_c = n_1 % 146097 / 4;

        let n_2 = 4 * n_c + 3;
        let p_2 = 2939745u64 * n_2 as u64;
        let z = (p_2 / 4294967296) as u32;
        let n_y = (p_2 % 4294967296) as u32 / 2939745 / 4;
        let y = 100 * c + z;

        let n_3 = 2141 * n_y + 197913;
        let m = n_3 / 65536;
        let d = n_3 % 65536 / 2141;

        let j = n_y >= 306;
        let y_g = y.wrapping_sub(L).wrapping_add(j as u32);
        let m_g = if j { m - 12 } else { m };
        let d_g = d + 1;
        (
            Year::new_unchecked(y_g as u16),
            Month::new_unchecked(m_g as u8),
            d_g as u8,
        )
    }

    pub fn day_of_week(self) -> Weekday {
        Weekday::from_iso_unchecked(((self.get() + 3).rem_euclid(7) + 1) as u8)
    }

    pub fn seconds_at(self, time_of_day_secs: i64) -> i64 {
        self.0 as i64 * 86_400 + time_of_day_secs
    }
}

/// The calendar year containing instant `seconds` (epoch seconds, or "naive"
/// local seconds, both share the same day/month/year arithmetic here).
/// Clamped into `Year::MIN..=Year::MAX` at the extremes of the supported
/// horizon, so a registry lookup near ±∞ sentinels still has a year to key
/// its transition cache on.
pub fn year_of_seconds(seconds: i64) -> Year {
    let days = seconds.div_euclid(86_400);
    let clamped = days.clamp(UnixDays::MIN.get() as i64, UnixDays::MAX.get() as i64) as i32;
    UnixDays::new_unchecked(clamped).date().0
}

/// `days_from_epoch(y, m, d)`: convert a calendar date to a unix day-count.
/// Fails with `InvalidCivilTime` if `d` is out of range for `(y, m)`.
pub fn days_from_epoch(year: Year, month: Month, day: u8) -> Result<UnixDays> {
    if day == 0 || day > year.days_in_month(month) {
        return Err(Error::InvalidCivilTime);
    }
    let days = year.unix_days_at_jan1().get() as i32
        + year.days_before_month(month) as i32
        + (day as i32 - 1);
    Ok(UnixDays::new_unchecked(days))
}

/// Inverse of `days_from_epoch`.
pub fn date_from_days(days: UnixDays) -> (Year, Month, u8) {
    days.date()
}

pub fn day_of_week(year: Year, month: Month, day: u8) -> Result<Weekday> {
    Ok(days_from_epoch(year, month, day)?.day_of_week())
}

/// Validate an hour/minute/second-of-day triple, returning the count of
/// seconds since local midnight.
pub fn seconds_of_day(hour: u8, minute: u8, second: u8) -> Result<i64> {
    if hour > 23 || minute > 59 || second > 59 {
        return Err(Error::InvalidCivilTime);
    }
    Ok(hour as i64 * 3600 + minute as i64 * 60 + second as i64)
}

/// Implements the rule day-selector described by a `ZoneRule`'s
/// `on_day_of_week` / `on_day_of_month` pair:
///
/// - `on_day_of_week == 0`: the literal day of month `on_day_of_month`.
/// - `on_day_of_month > 0`: the first `on_day_of_week` on or after that day.
/// - `on_day_of_month < 0`: the last `on_day_of_week` on or before `|on_day_of_month|`.
/// - `on_day_of_month == 0`: the last `on_day_of_week` of the month.
///
/// Fails with `InvalidRuleDay` if the search would fall outside the month.
pub fn resolve_day_of_month(
    year: Year,
    month: Month,
    on_day_of_week: u8,
    on_day_of_month: i16,
) -> Result<u8> {
    let days_in_month = year.days_in_month(month);

    if on_day_of_week == 0 {
        let day = on_day_of_month;
        if day < 1 || day as u16 > days_in_month as u16 {
            return Err(Error::InvalidRuleDay);
        }
        return Ok(day as u8);
    }

    let target = Weekday::from_rule_field(on_day_of_week).ok_or(Error::InvalidRuleDay)?;

    if on_day_of_month == 0 {
        // Last `target` weekday of the month: walk back from the last day.
        for day in (1..=days_in_month).rev() {
            if day_of_week(year, month, day)? == target {
                return Ok(day);
            }
        }
        return Err(Error::InvalidRuleDay);
    }

    if on_day_of_month > 0 {
        let start = on_day_of_month as u16;
        if start > days_in_month as u16 {
            return Err(Error::InvalidRuleDay);
        }
        for day in (start as u8)..=days_in_month {
            if day_of_week(year, month, day)? == target {
                return Ok(day);
            }
        }
        return Err(Error::InvalidRuleDay);
    }

    // on_day_of_month < 0: last `target` on or before |on_day_of_month|
    let bound = (-on_day_of_month) as u16;
    if bound > days_in_month as u16 || bound == 0 {
        return Err(Error::InvalidRuleDay);
    }
    for day in (1..=(bound as u8)).rev() {
        if day_of_week(year, month, day)? == target {
            return Ok(day);
        }
    }
    Err(Error::InvalidRuleDay)
}
