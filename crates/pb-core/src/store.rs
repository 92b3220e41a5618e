use crate::error::PostbackError;
use crate::types::Postback;

/// Durable postback log keyed by identifier.
pub trait PostbackRepository {
    /// Writes `postback` under its identifier, replacing any record with the
    /// same key. Durable once this returns `Ok`.
    fn insert(&self, postback: &Postback) -> Result<(), PostbackError>;

    /// Returns up to `limit` records, greatest identifier first. Records that
    /// fail to decode are skipped. A non-positive `limit` yields nothing.
    fn list_recent(&self, limit: i64) -> Result<Vec<Postback>, PostbackError>;

    /// Removes the record with this exact identifier, if any.
    fn delete(&self, id: &str) -> Result<(), PostbackError>;
}
