//! Registration features: domain age and remaining lifetime.
//!
//! Both are only computed when a registration record exists; the assembler
//! forces them to 1 when the lookup failed.

use chrono::{DateTime, Utc};

use crate::config::FeaturePolicy;
use crate::whois::RegistrationRecord;

use super::flag;

/// `Domain_Age`: 1 if the registration span (expiration − creation) is under
/// the policy minimum, else 0.
///
/// Missing or unparsable dates give 1.
pub fn domain_age(record: &RegistrationRecord, policy: &FeaturePolicy) -> u32 {
    let (Some(created), Some(expires)) = (
        record.creation_date.resolve(),
        record.expiration_date.resolve(),
    ) else {
        return 1;
    };
    let span_days = (expires - created).num_days();
    flag(span_days < policy.min_registration_days())
}

/// `Domain_End`: 0 if the domain expires within the policy minimum from `now`,
/// else 1.
///
/// Missing or unparsable expiration gives 1, even though 1 is the "safe"
/// value here. That asymmetry with `domain_age` is what the model was
/// trained on.
pub fn domain_end(record: &RegistrationRecord, now: DateTime<Utc>, policy: &FeaturePolicy) -> u32 {
    let Some(expires) = record.expiration_date.resolve() else {
        return 1;
    };
    let remaining_days = (expires - now).num_days();
    flag(remaining_days >= policy.min_registration_days())
}
