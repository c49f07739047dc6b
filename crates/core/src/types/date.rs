//! Display formatting for bill dates.

use chrono::{Datelike, NaiveDate};

/// French month abbreviations, truncated to three characters.
const MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// Format a bill date the way the bills list shows it.
///
/// Day without padding, abbreviated French month with a trailing dot, and
/// the two-digit year.
///
/// ```
/// use billed_core::format_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2004, 4, 4).unwrap();
/// assert_eq!(format_date(date), "4 Avr. 04");
/// ```
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS
        .get(date.month0() as usize)
        .copied()
        .unwrap_or_default();
    format!(
        "{} {}. {:02}",
        date.day(),
        month,
        date.year().rem_euclid(100)
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_format_date_fixture_dates() {
        assert_eq!(format_date(date(2001, 1, 1)), "1 Jan. 01");
        assert_eq!(format_date(date(2002, 2, 2)), "2 Fév. 02");
        assert_eq!(format_date(date(2003, 3, 3)), "3 Mar. 03");
    }

    #[test]
    fn test_format_date_two_digit_day_and_year() {
        assert_eq!(format_date(date(2022, 8, 15)), "15 Aoû. 22");
        assert_eq!(format_date(date(1999, 12, 31)), "31 Déc. 99");
    }

    #[test]
    fn test_june_and_july_share_prefix() {
        assert_eq!(format_date(date(2020, 6, 1)), "1 Jui. 20");
        assert_eq!(format_date(date(2020, 7, 1)), "1 Jui. 20");
    }
}
