//! Date normalization for raw period tokens.

use chrono::NaiveDate;

use crate::error::{DataError, Result};
use crate::frequency::Frequency;

/// Converts a raw date token into a calendar date using the frequency's rule:
/// daily `YYYYMMDD` tokens parse as-is, monthly `YYYYMM` tokens shift to the
/// last calendar day of the month and annual `YYYY` tokens map to December 31.
///
/// Surrounding whitespace is stripped first (annual tokens are space-padded
/// for column alignment in the raw files). Anything that is not exactly the
/// expected digit pattern afterwards is a hard [`DataError::DateParse`].
pub fn normalize_date(token: &str, frequency: Frequency) -> Result<NaiveDate> {
    let digits = token.trim();
    if digits.len() != frequency.token_len() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(parse_error(token, frequency));
    }

    let date = match frequency {
        Frequency::Daily => {
            let year: i32 = digits[0..4].parse().map_err(|_| parse_error(token, frequency))?;
            let month: u32 = digits[4..6].parse().map_err(|_| parse_error(token, frequency))?;
            let day: u32 = digits[6..8].parse().map_err(|_| parse_error(token, frequency))?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        Frequency::Monthly => {
            let year: i32 = digits[0..4].parse().map_err(|_| parse_error(token, frequency))?;
            let month: u32 = digits[4..6].parse().map_err(|_| parse_error(token, frequency))?;
            last_day_of_month(year, month)
        }
        Frequency::Annual => {
            let year: i32 = digits.parse().map_err(|_| parse_error(token, frequency))?;
            NaiveDate::from_ymd_opt(year, 12, 31)
        }
    };

    date.ok_or_else(|| parse_error(token, frequency))
}

/// Last calendar day of the given month: first day of the following month,
/// stepped back one day.
fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

fn parse_error(token: &str, frequency: Frequency) -> DataError {
    DataError::DateParse {
        token: token.to_string(),
        frequency,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_daily_parses_exact_date() {
        assert_eq!(
            normalize_date("19260701", Frequency::Daily).unwrap(),
            ymd(1926, 7, 1)
        );
    }

    #[rstest]
    #[case("192701", 1927, 1, 31)]
    #[case("202301", 2023, 1, 31)]
    #[case("200002", 2000, 2, 29)]
    #[case("190002", 1900, 2, 28)]
    #[case("192612", 1926, 12, 31)]
    fn test_monthly_shifts_to_end_of_month(
        #[case] token: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        assert_eq!(
            normalize_date(token, Frequency::Monthly).unwrap(),
            ymd(year, month, day)
        );
    }

    #[test]
    fn test_annual_maps_to_december_31() {
        assert_eq!(
            normalize_date("1927", Frequency::Annual).unwrap(),
            ymd(1927, 12, 31)
        );
    }

    #[test]
    fn test_annual_tolerates_padding() {
        assert_eq!(
            normalize_date("  1927", Frequency::Annual).unwrap(),
            ymd(1927, 12, 31)
        );
        assert_eq!(
            normalize_date(" 1927 ", Frequency::Annual).unwrap(),
            ymd(1927, 12, 31)
        );
    }

    #[rstest]
    #[case("192613", Frequency::Monthly)]
    #[case("192600", Frequency::Monthly)]
    #[case("19260732", Frequency::Daily)]
    #[case("19261301", Frequency::Daily)]
    #[case("1927", Frequency::Monthly)]
    #[case("192701", Frequency::Annual)]
    #[case("19x7", Frequency::Annual)]
    #[case("", Frequency::Annual)]
    #[case("Copyright", Frequency::Monthly)]
    fn test_bad_tokens_are_date_parse_errors(#[case] token: &str, #[case] frequency: Frequency) {
        let err = normalize_date(token, frequency).unwrap_err();
        assert!(matches!(err, DataError::DateParse { .. }));
    }
}
