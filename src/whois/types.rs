//! Registration data structures.

use chrono::{DateTime, NaiveDate, Utc};

/// A single registry date as delivered by the registration service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    /// Already-typed timestamp
    Timestamp(DateTime<Utc>),
    /// Registry text that could not be typed at lookup time
    Raw(String),
}

impl DateValue {
    /// Resolves the value to a timestamp.
    ///
    /// Raw text is read from its first space-separated token as `%Y-%m-%d`;
    /// anything else is unparsable and yields `None`.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        match self {
            DateValue::Timestamp(dt) => Some(*dt),
            DateValue::Raw(text) => {
                let token = text.split(' ').next().unwrap_or_default();
                NaiveDate::parse_from_str(token, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .map(|naive| naive.and_utc())
            }
        }
    }
}

/// A registry date field, which may be absent or carry several candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DateField {
    /// Registry did not report the date
    #[default]
    Missing,
    /// Exactly one value
    Single(DateValue),
    /// Several candidate values; the first one wins.
    Candidates(Vec<DateValue>),
}

impl DateField {
    /// The value the extractors use: the single value or the first candidate.
    pub fn first(&self) -> Option<&DateValue> {
        match self {
            DateField::Missing => None,
            DateField::Single(value) => Some(value),
            DateField::Candidates(values) => values.first(),
        }
    }

    /// `first()` resolved to a timestamp, or `None` if missing or unparsable.
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        self.first().and_then(DateValue::resolve)
    }

    pub(crate) fn from_values(mut values: Vec<DateValue>) -> Self {
        match values.len() {
            0 => DateField::Missing,
            1 => DateField::Single(values.remove(0)),
            _ => DateField::Candidates(values),
        }
    }
}

/// Registration data for one host.
///
/// Produced fresh for every URL; never cached across lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationRecord {
    /// Domain creation date
    pub creation_date: DateField,
    /// Domain expiration date
    pub expiration_date: DateField,
}
