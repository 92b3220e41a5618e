use crate::error::PostbackError;
use crate::store::PostbackRepository;
use crate::types::{CaptureRequest, IdGenerator, Postback};

pub const DEFAULT_LIMIT: i64 = 10;

/// Entry point used by request handlers. Build one per process and share it,
/// so identifiers stay monotonic across concurrent captures.
pub struct Postbacks<S: PostbackRepository> {
    store: S,
    ids: IdGenerator,
}

impl<S: PostbackRepository> Postbacks<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            ids: IdGenerator::new(),
        }
    }

    pub fn capture(&self, request: CaptureRequest) -> Result<Postback, PostbackError> {
        let postback = request.into_postback(self.ids.next_id());
        self.store.insert(&postback)?;
        tracing::info!(id = %postback.id, method = %postback.method, "captured postback");
        Ok(postback)
    }

    pub fn recent(&self, limit: i64) -> Result<Vec<Postback>, PostbackError> {
        self.store.list_recent(limit)
    }

    pub fn delete(&self, id: &str) -> Result<(), PostbackError> {
        self.store.delete(id)?;
        tracing::info!(id, "deleted postback");
        Ok(())
    }
}

/// Interprets a caller-supplied limit. Missing, unparsable and non-positive
/// values fall back to [`DEFAULT_LIMIT`].
pub fn resolve_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{first_values, PostbackId};
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<String, Postback>>,
        fail_writes: bool,
    }

    impl PostbackRepository for MemoryStore {
        fn insert(&self, postback: &Postback) -> Result<(), PostbackError> {
            if self.fail_writes {
                return Err(PostbackError::persistence("disk full"));
            }
            self.records
                .lock()
                .unwrap()
                .insert(postback.id.to_string(), postback.clone());
            Ok(())
        }

        fn list_recent(&self, limit: i64) -> Result<Vec<Postback>, PostbackError> {
            let take = usize::try_from(limit).unwrap_or(0);
            Ok(self
                .records
                .lock()
                .unwrap()
                .values()
                .rev()
                .take(take)
                .cloned()
                .collect())
        }

        fn delete(&self, id: &str) -> Result<(), PostbackError> {
            self.records.lock().unwrap().remove(id);
            Ok(())
        }
    }

    fn request(body: &str) -> CaptureRequest {
        CaptureRequest {
            method: "POST".to_string(),
            url: "/cb?click=7".to_string(),
            args: first_values([("click", "7")]),
            body: body.to_string(),
        }
    }

    #[test]
    fn capture_assigns_increasing_ids_and_lists_newest_first() {
        let postbacks = Postbacks::new(MemoryStore::default());
        let first = postbacks.capture(request("a")).unwrap();
        let second = postbacks.capture(request("b")).unwrap();
        assert!(second.id > first.id);

        let recent = postbacks.recent(10).unwrap();
        let bodies: Vec<_> = recent.iter().map(|p| p.body.as_str()).collect();
        assert_eq!(bodies, vec!["b", "a"]);
        assert_eq!(recent[0].args["click"], "7");
    }

    #[test]
    fn capture_surfaces_persistence_errors() {
        let postbacks = Postbacks::new(MemoryStore {
            fail_writes: true,
            ..MemoryStore::default()
        });
        let err = postbacks.capture(request("a")).unwrap_err();
        assert!(matches!(err, PostbackError::Persistence { .. }));
    }

    #[test]
    fn delete_removes_only_the_named_record() {
        let postbacks = Postbacks::new(MemoryStore::default());
        let kept = postbacks.capture(request("keep")).unwrap();
        let dropped = postbacks.capture(request("drop")).unwrap();
        postbacks.delete(dropped.id.as_str()).unwrap();
        postbacks.delete(PostbackId::from("missing").as_str()).unwrap();
        assert_eq!(postbacks.recent(10).unwrap(), vec![kept]);
    }

    #[test]
    fn resolve_limit_falls_back_to_default() {
        assert_eq!(resolve_limit(None), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("")), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("abc")), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("0")), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("-3")), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("2.5")), DEFAULT_LIMIT);
        assert_eq!(resolve_limit(Some("25")), 25);
    }
}
