// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Day of month without padding, abbreviated month, two-digit year
const SHORT_DATE_PATTERN: &str = "%-d %b %y";

/// Formats ISO-8601 publish dates as short localized dates such as `12 mar 21`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateFormatter {
    pub locale: Locale,
}

impl DateFormatter {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Parse and format a publish date in one step
    pub fn format(&self, published_at: &str) -> Result<String, chrono::ParseError> {
        let date = parse_published_at(published_at)?;
        Ok(self.format_datetime(&date))
    }

    /// Format an already parsed wall-clock time
    pub fn format_datetime(&self, date: &NaiveDateTime) -> String {
        Utc.from_utc_datetime(date)
            .format_localized(SHORT_DATE_PATTERN, self.locale)
            .to_string()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(Locale::pt_BR)
    }
}

/// ISO-8601 shapes with a numeric offset (`+03:00` or `+0300`)
const OFFSET_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M%z",
    "%Y%m%dT%H%M%S%z",
];

/// ISO-8601 shapes without an offset, extended and basic
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y%m%dT%H%M%S",
    "%Y%m%dT%H%M",
];

/// Parse an ISO-8601 timestamp into the wall-clock time it spells out.
///
/// Offsets are kept as written, so `2021-03-12T23:30:00-03:00` stays on
/// the 12th regardless of the host time zone.
pub fn parse_published_at(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.naive_local());
    }

    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Ok(dt.naive_local());
        }
    }

    // `Z` is a zero offset, so the wall-clock time is the text before it
    let naive = value.strip_suffix(['Z', 'z']).unwrap_or(value);

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(naive, "%Y%m%d"))
        .map(|d| d.and_time(NaiveTime::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english() -> DateFormatter {
        DateFormatter::new(Locale::en_US)
    }

    #[test]
    fn formats_short_date() {
        assert_eq!(english().format("2021-03-12 10:00:00").unwrap(), "12 Mar 21");
    }

    #[test]
    fn day_has_no_leading_zero() {
        assert_eq!(english().format("2021-01-05T08:00:00").unwrap(), "5 Jan 21");
    }

    #[test]
    fn default_locale_is_brazilian_portuguese() {
        let formatter = DateFormatter::default();
        assert_eq!(formatter.format("2021-02-05 19:00:00").unwrap(), "5 fev 21");
        assert_eq!(formatter.format("2021-05-05 19:00:00").unwrap(), "5 mai 21");
        assert_eq!(formatter.format("2021-12-05 19:00:00").unwrap(), "5 dez 21");
    }

    #[test]
    fn accepts_date_only_and_fractional_seconds() {
        assert_eq!(english().format("2020-12-31").unwrap(), "31 Dec 20");
        assert_eq!(
            english().format("2020-12-31T23:59:59.250").unwrap(),
            "31 Dec 20"
        );
    }

    #[test]
    fn keeps_the_date_written_with_an_offset() {
        assert_eq!(
            english().format("2021-03-12T23:30:00-03:00").unwrap(),
            "12 Mar 21"
        );
        assert_eq!(
            english().format("2021-03-12T00:30:00+09:00").unwrap(),
            "12 Mar 21"
        );
    }

    #[test]
    fn accepts_minute_precision() {
        assert_eq!(english().format("2021-03-12T10:00").unwrap(), "12 Mar 21");
        assert_eq!(english().format("2021-03-12 10:00").unwrap(), "12 Mar 21");
    }

    #[test]
    fn accepts_utc_designator() {
        assert_eq!(english().format("2021-03-12T10:00Z").unwrap(), "12 Mar 21");
        assert_eq!(english().format("2021-03-12T10:00:00Z").unwrap(), "12 Mar 21");
        assert_eq!(english().format("2021-03-12 10:00:00Z").unwrap(), "12 Mar 21");
    }

    #[test]
    fn accepts_offsets_without_colon() {
        assert_eq!(
            english().format("2021-03-12T10:00:00+0300").unwrap(),
            "12 Mar 21"
        );
        assert_eq!(
            english().format("2021-03-12T23:30-0300").unwrap(),
            "12 Mar 21"
        );
        assert_eq!(
            english().format("2021-03-12 00:30:00+0900").unwrap(),
            "12 Mar 21"
        );
    }

    #[test]
    fn accepts_basic_format() {
        assert_eq!(english().format("20210312T100000Z").unwrap(), "12 Mar 21");
        assert_eq!(english().format("20210312T1000").unwrap(), "12 Mar 21");
        assert_eq!(english().format("20210312").unwrap(), "12 Mar 21");
    }

    #[test]
    fn minute_precision_parses_to_wall_clock_time() {
        let parsed = parse_published_at("2021-03-12T10:00").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2021, 3, 12)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(english().format("yesterday").is_err());
        assert!(english().format("2021-13-40").is_err());
        assert!(english().format("").is_err());
    }

    #[test]
    fn formatting_is_deterministic() {
        let formatter = DateFormatter::default();
        let first = formatter.format("2021-01-22 19:00:00").unwrap();
        let second = formatter.format("2021-01-22 19:00:00").unwrap();
        assert_eq!(first, second);
    }
}
