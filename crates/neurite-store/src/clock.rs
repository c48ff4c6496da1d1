use chrono::{SecondsFormat, Utc};
use neurite_canonical::Timestamp;

pub(crate) fn now_utc() -> Timestamp {
    Timestamp::new(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
}
