//! Date and time layouts shared by classification and conversion.
//!
//! A string is temporal only if it matches one of these layouts *and* the
//! fields form a real calendar date or clock time. Classification and
//! conversion both go through the functions below, so anything classified
//! as DATE, TIME or DATETIME always converts.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// =============================================================================
// DATE LAYOUTS
// =============================================================================

/// How the three captured fields of a date layout map onto y/m/d.
#[derive(Debug, Clone, Copy)]
enum FieldOrder {
    YearMonthDay,
    MonthDayYear,
    DayMonthYear,
}

impl FieldOrder {
    fn resolve(self, [a, b, c]: [u32; 3]) -> Option<NaiveDate> {
        let (year, month, day) = match self {
            FieldOrder::YearMonthDay => (a, b, c),
            FieldOrder::MonthDayYear => (c, a, b),
            FieldOrder::DayMonthYear => (c, b, a),
        };
        if year == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    }
}

struct DateLayout {
    pattern: Regex,
    /// Tried in order; the first calendar-valid reading wins.
    orders: &'static [FieldOrder],
}

const YMD: &[FieldOrder] = &[FieldOrder::YearMonthDay];
const MDY_THEN_DMY: &[FieldOrder] = &[FieldOrder::MonthDayYear, FieldOrder::DayMonthYear];
const MDY: &[FieldOrder] = &[FieldOrder::MonthDayYear];

static DATE_LAYOUTS: Lazy<Vec<DateLayout>> = Lazy::new(|| {
    let layout = |pattern: &str, orders| DateLayout {
        pattern: Regex::new(pattern).unwrap(),
        orders,
    };
    vec![
        layout(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$", YMD),    // ISO
        layout(r"^([0-9]{4})/([0-9]{2})/([0-9]{2})$", YMD),
        layout(r"^([0-9]{4})\.([0-9]{2})\.([0-9]{2})$", YMD),
        layout(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$", MDY_THEN_DMY), // US, then European
        layout(r"^([0-9]{2})-([0-9]{2})-([0-9]{4})$", MDY_THEN_DMY),
        layout(r"^([0-9]{2})\.([0-9]{2})\.([0-9]{4})$", MDY_THEN_DMY),
        layout(r"^([0-9]{4})([0-9]{2})([0-9]{2})$", YMD),      // compact
        layout(r"^([0-9]{2})([0-9]{2})([0-9]{4})$", MDY),
    ]
});

// =============================================================================
// TIME LAYOUTS
// =============================================================================

static CLOCK_24H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2})(?:\.([0-9]{1,9}))?)?$").unwrap()
});

static CLOCK_12H: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{2})(?::([0-9]{2}))? ?([AaPp][Mm])$").unwrap()
});

static CLOCK_COMPACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})$").unwrap());

fn field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

/// Absent optional fields read as zero; present ones must parse.
fn optional_field(caps: &Captures<'_>, index: usize) -> Option<u32> {
    match caps.get(index) {
        Some(m) => m.as_str().parse().ok(),
        None => Some(0),
    }
}

/// Right-pad a fractional-second string to nanoseconds.
fn fraction_nanos(digits: &str) -> Option<u32> {
    format!("{digits:0<9}").parse().ok()
}

/// Parse a calendar date in any supported layout.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_LAYOUTS.iter().find_map(|layout| {
        let caps = layout.pattern.captures(value)?;
        let fields = [field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?];
        layout.orders.iter().find_map(|order| order.resolve(fields))
    })
}

/// Parse a time of day in any supported layout.
pub fn parse_time(value: &str) -> Option<NaiveTime> {
    if let Some(caps) = CLOCK_24H.captures(value) {
        let nanos = match caps.get(4) {
            Some(m) => fraction_nanos(m.as_str())?,
            None => 0,
        };
        return NaiveTime::from_hms_nano_opt(
            field(&caps, 1)?,
            field(&caps, 2)?,
            optional_field(&caps, 3)?,
            nanos,
        );
    }

    if let Some(caps) = CLOCK_12H.captures(value) {
        let hour = field(&caps, 1)?;
        if !(1..=12).contains(&hour) {
            return None;
        }
        let pm = caps.get(4)?.as_str().eq_ignore_ascii_case("pm");
        let hour = hour % 12 + if pm { 12 } else { 0 };
        return NaiveTime::from_hms_opt(hour, field(&caps, 2)?, optional_field(&caps, 3)?);
    }

    let caps = CLOCK_COMPACT.captures(value)?;
    NaiveTime::from_hms_opt(field(&caps, 1)?, field(&caps, 2)?, field(&caps, 3)?)
}

/// Parse a date segment and a time segment joined by `T` or one space.
///
/// Date layouts never contain either separator, so the first one found is
/// the boundary.
pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    let boundary = value.find(['T', ' '])?;
    let date = parse_date(&value[..boundary])?;
    let time = parse_time(&value[boundary + 1..])?;
    Some(NaiveDateTime::new(date, time))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_date_layouts() {
        assert_eq!(parse_date("2023-01-01"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse_date("2023/01/02"), Some(ymd(2023, 1, 2)));
        assert_eq!(parse_date("2023.01.03"), Some(ymd(2023, 1, 3)));
        assert_eq!(parse_date("01/04/2023"), Some(ymd(2023, 1, 4)));
        assert_eq!(parse_date("01-05-2023"), Some(ymd(2023, 1, 5)));
        assert_eq!(parse_date("01.06.2023"), Some(ymd(2023, 1, 6)));
        assert_eq!(parse_date("20230107"), Some(ymd(2023, 1, 7)));
        assert_eq!(parse_date("01082023"), Some(ymd(2023, 1, 8)));
    }

    #[test]
    fn test_month_first_then_day_first() {
        // Both readings valid: month-first wins
        assert_eq!(parse_date("03/04/2023"), Some(ymd(2023, 3, 4)));
        // Only the day-first reading is valid
        assert_eq!(parse_date("25/12/2023"), Some(ymd(2023, 12, 25)));
        // Neither reading is valid
        assert_eq!(parse_date("13/13/2023"), None);
    }

    #[test]
    fn test_calendar_validation() {
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("2024-02-29"), Some(ymd(2024, 2, 29)));
        assert_eq!(parse_date("2023-13-01"), None);
        assert_eq!(parse_date("2023-04-31"), None);
        assert_eq!(parse_date("0000-01-01"), None);
        assert_eq!(parse_date("2023-1-1"), None);
    }

    #[test]
    fn test_time_layouts() {
        assert_eq!(parse_time("14:30:00"), Some(hms(14, 30, 0)));
        assert_eq!(parse_time("14:30"), Some(hms(14, 30, 0)));
        assert_eq!(parse_time("9:05"), Some(hms(9, 5, 0)));
        assert_eq!(parse_time("143000"), Some(hms(14, 30, 0)));
        assert_eq!(
            parse_time("14:30:00.25"),
            NaiveTime::from_hms_milli_opt(14, 30, 0, 250)
        );
    }

    #[test]
    fn test_meridiem() {
        assert_eq!(parse_time("2:30 PM"), Some(hms(14, 30, 0)));
        assert_eq!(parse_time("2:30 pm"), Some(hms(14, 30, 0)));
        assert_eq!(parse_time("12:00 AM"), Some(hms(0, 0, 0)));
        assert_eq!(parse_time("12:15 PM"), Some(hms(12, 15, 0)));
        assert_eq!(parse_time("11:59:59 PM"), Some(hms(23, 59, 59)));
        assert_eq!(parse_time("0:30 AM"), None);
        assert_eq!(parse_time("13:00 PM"), None);
    }

    #[test]
    fn test_time_ranges() {
        assert_eq!(parse_time("25:00:00"), None);
        assert_eq!(parse_time("23:60"), None);
        assert_eq!(parse_time("23:59:60"), None);
        assert_eq!(parse_time("246000"), None);
    }

    #[test]
    fn test_datetime() {
        let expected = NaiveDateTime::new(ymd(2023, 1, 1), hms(12, 0, 0));
        assert_eq!(parse_datetime("2023-01-01T12:00:00"), Some(expected));
        assert_eq!(parse_datetime("2023-01-01 12:00:00"), Some(expected));
        assert_eq!(parse_datetime("2023/01/01 12:00:00"), Some(expected));
        assert_eq!(parse_datetime("01/01/2023 12:00:00"), Some(expected));
        assert_eq!(parse_datetime("20230101T120000"), Some(expected));
        assert_eq!(
            parse_datetime("2023-01-01 2:30 PM"),
            Some(NaiveDateTime::new(ymd(2023, 1, 1), hms(14, 30, 0)))
        );
    }

    #[test]
    fn test_datetime_rejects() {
        assert_eq!(parse_datetime("2023-01-01"), None);
        assert_eq!(parse_datetime("12:00:00"), None);
        assert_eq!(parse_datetime("2023-02-30T12:00:00"), None);
        assert_eq!(parse_datetime("2023-01-01T25:00:00"), None);
        assert_eq!(parse_datetime("2023-01-01  12:00:00"), None);
        assert_eq!(parse_datetime("2023-01-01T12:00:00Z"), None);
    }
}
