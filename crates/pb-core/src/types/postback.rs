use crate::types::ids::PostbackId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// A captured HTTP request.
///
/// Field order and the omission of empty `args`/`body` define the stored
/// encoding; records written by earlier deployments must keep decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Postback {
    pub method: String,
    pub url: String,
    pub id: PostbackId,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub args: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureRequest {
    pub method: String,
    pub url: String,
    pub args: BTreeMap<String, String>,
    pub body: String,
}

impl CaptureRequest {
    pub fn into_postback(self, id: PostbackId) -> Postback {
        Postback {
            method: self.method,
            url: self.url,
            id,
            args: self.args,
            body: self.body,
        }
    }
}

/// Collapses repeated query keys to their first value.
pub fn first_values<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut args = BTreeMap::new();
    for (key, value) in pairs {
        args.entry(key.into()).or_insert_with(|| value.into());
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Postback {
        Postback {
            method: "POST".to_string(),
            url: "/hook?a=1".to_string(),
            id: PostbackId::from("1000"),
            args: first_values([("a", "1")]),
            body: "payload".to_string(),
        }
    }

    #[test]
    fn serializes_in_stored_field_order() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"{"method":"POST","url":"/hook?a=1","id":"1000","args":{"a":"1"},"body":"payload"}"#
        );
    }

    #[test]
    fn empty_args_and_body_are_omitted_and_restored_as_empty() {
        let postback = Postback {
            args: BTreeMap::new(),
            body: String::new(),
            ..sample()
        };
        let json = serde_json::to_string(&postback).unwrap();
        assert_eq!(json, r#"{"method":"POST","url":"/hook?a=1","id":"1000"}"#);
        let decoded: Postback = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, postback);
        assert!(decoded.args.is_empty());
        assert!(decoded.body.is_empty());
    }

    #[test]
    fn decodes_records_with_unicode_and_many_args() {
        let postback = Postback {
            method: String::new(),
            url: "/ü?x=%20&y=2".to_string(),
            args: first_values([("x", " "), ("y", "2"), ("z", "ß\"\\")]),
            body: "{\"nested\": [1, 2]}\n".to_string(),
            ..sample()
        };
        let json = serde_json::to_vec(&postback).unwrap();
        let decoded: Postback = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, postback);
    }

    #[test]
    fn first_values_keeps_earliest_value_per_key() {
        let args = first_values([("a", "1"), ("b", "2"), ("a", "3")]);
        assert_eq!(args.len(), 2);
        assert_eq!(args["a"], "1");
        assert_eq!(args["b"], "2");
    }

    #[test]
    fn into_postback_carries_every_field() {
        let request = CaptureRequest {
            method: "PUT".to_string(),
            url: "/x".to_string(),
            args: first_values([("k", "v")]),
            body: "b".to_string(),
        };
        let postback = request.clone().into_postback(PostbackId::from_nanos(1));
        assert_eq!(postback.method, request.method);
        assert_eq!(postback.url, request.url);
        assert_eq!(postback.args, request.args);
        assert_eq!(postback.body, request.body);
        assert_eq!(postback.id.as_str(), "0000000000000000001");
    }
}
