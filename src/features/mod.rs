//! Feature schema and per-signal extractors.
//!
//! The schema is the fixed, ordered list of columns the downstream classifier
//! was trained on. Reordering or resizing it invalidates every trained model,
//! so it is versioned by `SCHEMA_VERSION` and every assembled row is checked
//! against it by `FeatureRow::finish`.

pub mod content;
pub mod lexical;
pub mod registration;

use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::error_handling::SchemaError;

/// Version of the column layout below. Bump on any change to `Feature`.
pub const SCHEMA_VERSION: u32 = 1;

/// Number of numeric model features (all columns except `Domain` and `Label`).
pub const MODEL_FEATURE_COUNT: usize = 16;

/// Columns of the dataset, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Feature {
    /// Normalized host, kept for auditability (not a model input)
    #[strum(serialize = "Domain")]
    Domain,
    /// 1 if the host is an IPv4 literal
    #[strum(serialize = "Have_IP")]
    HaveIp,
    /// 1 if the URL contains `@`
    #[strum(serialize = "Have_At")]
    HaveAt,
    /// 1 if the URL is long
    #[strum(serialize = "URL_Length")]
    UrlLength,
    /// Count of non-empty path segments
    #[strum(serialize = "URL_Depth")]
    UrlDepth,
    /// 1 if `//` appears past the scheme
    #[strum(serialize = "Redirection")]
    Redirection,
    /// 1 if `https` is part of the host name
    #[strum(serialize = "https_Domain")]
    HttpsDomain,
    /// 1 if the host is a known URL shortener
    #[strum(serialize = "TinyURL")]
    TinyUrl,
    /// 1 if the host contains `-`
    #[strum(serialize = "Prefix/Suffix")]
    PrefixSuffix,
    /// 1 if no registration record was found
    #[strum(serialize = "DNS_Record")]
    DnsRecord,
    /// 1 if unranked or ranked beyond the popularity cutoff
    #[strum(serialize = "Web_Traffic")]
    WebTraffic,
    /// 1 if registered for less than the minimum span
    #[strum(serialize = "Domain_Age")]
    DomainAge,
    /// 1 if expiry is far off or unknown
    #[strum(serialize = "Domain_End")]
    DomainEnd,
    /// 1 if the page has borderless iframes or could not be fetched
    #[strum(serialize = "iFrame")]
    IFrame,
    /// 1 if the page rewrites the status bar on mouse over
    #[strum(serialize = "Mouse_Over")]
    MouseOver,
    /// 1 if the page does not block the context menu
    #[strum(serialize = "Right_Click")]
    RightClick,
    /// 1 if the fetch followed more than two redirects
    #[strum(serialize = "Web_Forwards")]
    WebForwards,
    /// Ground truth (0 legitimate, 1 phishing)
    #[strum(serialize = "Label")]
    Label,
}

impl Feature {
    /// Column name as written in the dataset header.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// The 16 model inputs, in the order the classifier consumes them.
pub const MODEL_FEATURES: [Feature; MODEL_FEATURE_COUNT] = [
    Feature::HaveIp,
    Feature::HaveAt,
    Feature::UrlLength,
    Feature::UrlDepth,
    Feature::Redirection,
    Feature::HttpsDomain,
    Feature::TinyUrl,
    Feature::PrefixSuffix,
    Feature::DnsRecord,
    Feature::WebTraffic,
    Feature::DomainAge,
    Feature::DomainEnd,
    Feature::IFrame,
    Feature::MouseOver,
    Feature::RightClick,
    Feature::WebForwards,
];

/// Full dataset header: `Domain`, the model features, `Label`.
pub fn schema_header() -> Vec<&'static str> {
    Feature::iter().map(Feature::name).collect()
}

/// Ground-truth class of a URL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Label {
    /// Label 0
    Legitimate,
    /// Label 1
    Phishing,
}

impl Label {
    /// Numeric value written to the `Label` column.
    pub fn value(self) -> u8 {
        match self {
            Label::Legitimate => 0,
            Label::Phishing => 1,
        }
    }

    /// Inverse of `value()`.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Legitimate),
            1 => Some(Label::Phishing),
            _ => None,
        }
    }

    /// Name used for per-source output files and log lines.
    pub fn source_name(self) -> &'static str {
        match self {
            Label::Legitimate => "legitimate",
            Label::Phishing => "phishing",
        }
    }
}

/// One assembled, schema-checked dataset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    domain: String,
    values: [u32; MODEL_FEATURE_COUNT],
    label: Label,
}

impl FeatureVector {
    /// Builds a row from model feature values given in schema order.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Cardinality` if `values` does not hold exactly
    /// `MODEL_FEATURE_COUNT` entries.
    pub fn from_values(
        domain: impl Into<String>,
        values: &[u32],
        label: Label,
    ) -> Result<Self, SchemaError> {
        let values: [u32; MODEL_FEATURE_COUNT] =
            values.try_into().map_err(|_| SchemaError::Cardinality {
                expected: MODEL_FEATURE_COUNT,
                actual: values.len(),
            })?;
        Ok(Self {
            domain: domain.into(),
            values,
            label,
        })
    }

    /// Normalized host the row was extracted from.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Ground-truth class.
    pub fn label(&self) -> Label {
        self.label
    }

    /// Model feature values in schema order.
    pub fn values(&self) -> &[u32; MODEL_FEATURE_COUNT] {
        &self.values
    }

    /// Value of one model feature; `None` for `Domain` and `Label`.
    pub fn get(&self, feature: Feature) -> Option<u32> {
        MODEL_FEATURES
            .iter()
            .position(|&f| f == feature)
            .map(|i| self.values[i])
    }

    /// The row as text cells, in `schema_header()` order.
    pub fn to_record(&self) -> Vec<String> {
        let mut record = Vec::with_capacity(MODEL_FEATURE_COUNT + 2);
        record.push(self.domain.clone());
        record.extend(self.values.iter().map(u32::to_string));
        record.push(self.label.value().to_string());
        record
    }
}

/// Collects named feature values and checks them against the schema.
///
/// The assembler pushes every signal together with the column it believes it
/// is filling; `finish` rejects the row if the sequence drifted from
/// `MODEL_FEATURES` in either length or order.
#[derive(Debug, Default)]
pub struct FeatureRow {
    slots: Vec<(Feature, u32)>,
}

impl FeatureRow {
    /// Empty row with room for every model feature.
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(MODEL_FEATURE_COUNT),
        }
    }

    /// Appends `value` as the next column, claimed to be `feature`.
    pub fn push(&mut self, feature: Feature, value: u32) -> &mut Self {
        self.slots.push((feature, value));
        self
    }

    /// Validates the collected values and produces the row.
    ///
    /// # Errors
    ///
    /// `SchemaError::Cardinality` on a wrong count, `SchemaError::Order` on the
    /// first feature found at the wrong position.
    pub fn finish(self, domain: impl Into<String>, label: Label) -> Result<FeatureVector, SchemaError> {
        if self.slots.len() != MODEL_FEATURE_COUNT {
            return Err(SchemaError::Cardinality {
                expected: MODEL_FEATURE_COUNT,
                actual: self.slots.len(),
            });
        }
        for (position, ((found, _), expected)) in
            self.slots.iter().zip(MODEL_FEATURES.iter()).enumerate()
        {
            if found != expected {
                return Err(SchemaError::Order {
                    position,
                    expected: expected.name().to_string(),
                    found: found.name().to_string(),
                });
            }
        }
        let values: Vec<u32> = self.slots.into_iter().map(|(_, v)| v).collect();
        FeatureVector::from_values(domain, &values, label)
    }
}

/// Converts a condition into a 0/1 signal.
pub(crate) fn flag(condition: bool) -> u32 {
    u32::from(condition)
}
