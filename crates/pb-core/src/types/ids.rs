use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use utoipa::ToSchema;

/// Width of a rendered identifier. `i64::MAX` nanoseconds has 19 digits, so
/// every non-negative timestamp fits and byte order matches numeric order.
pub const ID_WIDTH: usize = 19;

/// Storage key of a postback: nanoseconds since the Unix epoch as a
/// zero-padded decimal string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct PostbackId(String);

impl PostbackId {
    pub fn from_nanos(nanos: i64) -> Self {
        Self(format!("{:0width$}", nanos.max(0), width = ID_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PostbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Keys written by older deployments are not re-validated.
impl From<String> for PostbackId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PostbackId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Hands out strictly increasing identifiers within one process.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self) -> PostbackId {
        let now = Utc::now().timestamp_nanos_opt().unwrap_or(i64::MAX);
        self.next_at(now)
    }

    /// Returns `now`, or one past the last issued value if the clock has
    /// not advanced since.
    pub fn next_at(&self, now: i64) -> PostbackId {
        let advance = |last: i64| now.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(advance(last)))
        {
            Ok(value) | Err(value) => value,
        };
        PostbackId::from_nanos(advance(previous))
    }
}
