//! RDAP response parsing and date conversion.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::types::{DateField, DateValue, RegistrationRecord};

#[derive(Debug, Deserialize)]
struct RdapDomain {
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    action: String,
    #[serde(rename = "eventDate")]
    date: Option<String>,
}

/// Converts an RDAP domain object into a `RegistrationRecord`.
///
/// A well-formed response without registration/expiration events still yields
/// a record, with the corresponding fields `Missing`.
///
/// # Errors
///
/// Returns an error if the body is not a JSON RDAP domain object.
pub(crate) fn record_from_rdap(body: &str) -> Result<RegistrationRecord> {
    let domain: RdapDomain =
        serde_json::from_str(body).context("Malformed RDAP domain response")?;
    Ok(RegistrationRecord {
        creation_date: collect_event(&domain.events, "registration"),
        expiration_date: collect_event(&domain.events, "expiration"),
    })
}

fn collect_event(events: &[RdapEvent], action: &str) -> DateField {
    let values = events
        .iter()
        .filter(|event| event.action.eq_ignore_ascii_case(action))
        .filter_map(|event| event.date.as_deref())
        .map(|text| match parse_date_string(text) {
            Some(dt) => DateValue::Timestamp(dt),
            None => DateValue::Raw(text.to_string()),
        })
        .collect();
    DateField::from_values(values)
}

/// Attempts to parse a registry date string in the formats registries use.
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
    ];

    for format in &formats {
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(dt: Option<DateTime<Utc>>) -> Option<String> {
        dt.map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    #[test]
    fn test_parse_date_string_rfc3339() {
        assert_eq!(
            ymd(parse_date_string("1995-08-14T04:00:00Z")),
            Some("1995-08-14".into())
        );
        assert_eq!(
            ymd(parse_date_string("2024-01-15T10:30:45.123+02:00")),
            Some("2024-01-15".into())
        );
    }

    #[test]
    fn test_parse_date_string_other_formats() {
        assert_eq!(
            ymd(parse_date_string("2024-01-15 10:30:45")),
            Some("2024-01-15".into())
        );
        assert_eq!(ymd(parse_date_string("2024-01-15")), Some("2024-01-15".into()));
        assert_eq!(ymd(parse_date_string("15-Jan-2024")), Some("2024-01-15".into()));
        assert_eq!(ymd(parse_date_string("15/01/2024")), Some("2024-01-15".into()));
    }

    #[test]
    fn test_parse_date_string_invalid() {
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string(""), None);
    }

    #[test]
    fn test_record_from_rdap() {
        let body = r#"{
            "objectClassName": "domain",
            "ldhName": "EXAMPLE.COM",
            "events": [
                {"eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z"},
                {"eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z"},
                {"eventAction": "last changed", "eventDate": "2024-08-14T07:01:34Z"}
            ]
        }"#;
        let record = record_from_rdap(body).expect("valid RDAP");
        assert_eq!(ymd(record.creation_date.resolve()), Some("1995-08-14".into()));
        assert_eq!(ymd(record.expiration_date.resolve()), Some("2030-08-13".into()));
    }

    #[test]
    fn test_record_from_rdap_keeps_unparsable_text() {
        let body = r#"{"events": [{"eventAction": "registration", "eventDate": "sometime in 1999"}]}"#;
        let record = record_from_rdap(body).expect("valid RDAP");
        assert_eq!(
            record.creation_date,
            DateField::Single(DateValue::Raw("sometime in 1999".into()))
        );
        assert_eq!(record.expiration_date, DateField::Missing);
    }

    #[test]
    fn test_record_from_rdap_without_events() {
        let record = record_from_rdap(r#"{"objectClassName": "domain"}"#).expect("valid RDAP");
        assert_eq!(record, RegistrationRecord::default());
    }

    #[test]
    fn test_record_from_rdap_rejects_garbage() {
        assert!(record_from_rdap("<html>rate limited</html>").is_err());
    }
}
