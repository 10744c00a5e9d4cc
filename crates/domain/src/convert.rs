//! Case conversion over payloads.
//!
//! [`normalize`] rewrites wire keys (`snake_case`) into application keys
//! (`camelCase`); [`denormalize`] goes the other way. Both walk arrays and
//! objects recursively, always build fresh containers and hand protected
//! values back by reference.
//!
//! When two keys of one object rewrite to the same key, the free functions
//! keep the value processed last. A [`CaseConverter`] with
//! [`CollisionPolicy::Reject`] reports the collision instead.

use std::convert::Infallible;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::casing::KeyCase;
use crate::error::{DomainError, DomainResult};
use crate::payload::{Mapping, Payload};

/// What to do when two keys rewrite to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the value processed last.
    #[default]
    LastWins,
    /// Fail with `DomainError::KeyCollision`.
    Reject,
}

/// Converts `snake_case` keys to `camelCase`, recursively.
///
/// Never fails: anything that is not an array or object comes back as is.
#[must_use]
pub fn normalize(value: &Payload) -> Payload {
    rewrite_total(value, KeyCase::Camel)
}

/// Converts `camelCase` keys to `snake_case`, recursively.
#[must_use]
pub fn denormalize(value: &Payload) -> Payload {
    rewrite_total(value, KeyCase::Snake)
}

/// A case converter with an explicit collision policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseConverter {
    policy: CollisionPolicy,
}

impl CaseConverter {
    /// Creates a converter with the given policy.
    #[must_use]
    pub const fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// Shorthand for a converter that rejects collisions.
    #[must_use]
    pub const fn strict() -> Self {
        Self::new(CollisionPolicy::Reject)
    }

    /// The configured policy.
    #[must_use]
    pub const fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Converts keys to `camelCase`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::KeyCollision` if the policy is `Reject` and two
    /// keys of one object map to the same key.
    pub fn normalize(&self, value: &Payload) -> DomainResult<Payload> {
        self.convert(value, KeyCase::Camel)
    }

    /// Converts keys to `snake_case`.
    ///
    /// # Errors
    ///
    /// Same as [`CaseConverter::normalize`].
    pub fn denormalize(&self, value: &Payload) -> DomainResult<Payload> {
        self.convert(value, KeyCase::Snake)
    }

    fn convert(&self, value: &Payload, case: KeyCase) -> DomainResult<Payload> {
        match self.policy {
            CollisionPolicy::LastWins => Ok(rewrite_total(value, case)),
            CollisionPolicy::Reject => rewrite(value, case, &|key: &str, original: &str| {
                Err(DomainError::KeyCollision {
                    key: key.to_string(),
                    original: original.to_string(),
                })
            }),
        }
    }
}

fn rewrite_total(value: &Payload, case: KeyCase) -> Payload {
    let result = rewrite::<Infallible>(value, case, &|key: &str, original: &str| {
        tracing::debug!(key, original, "key collision, keeping last value");
        Ok(())
    });
    match result {
        Ok(payload) => payload,
        Err(never) => match never {},
    }
}

fn rewrite<E>(
    value: &Payload,
    case: KeyCase,
    on_collision: &impl Fn(&str, &str) -> Result<(), E>,
) -> Result<Payload, E> {
    match value {
        Payload::Protected(inner) => Ok(Payload::Protected(Arc::clone(inner))),
        Payload::Array(items) => items
            .iter()
            .map(|item| rewrite(item, case, on_collision))
            .collect::<Result<Vec<_>, E>>()
            .map(Payload::Array),
        Payload::Object(entries) => {
            let mut out = Mapping::with_capacity(entries.len());
            for (key, item) in entries {
                let renamed = case.apply(key);
                let item = rewrite(item, case, on_collision)?;
                if out.contains_key(&renamed) {
                    on_collision(&renamed, key)?;
                }
                out.insert(renamed, item);
            }
            Ok(Payload::Object(out))
        }
        primitive => Ok(primitive.clone()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::payload::{Blob, FileHandle, FormPayload};
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Payload {
        Payload::from(value)
    }

    #[test]
    fn test_normalize_nested_object() {
        let input = payload(json!({
            "cover_media_id": "m1",
            "author": { "display_name": "Jo" }
        }));
        let expected = payload(json!({
            "coverMediaId": "m1",
            "author": { "displayName": "Jo" }
        }));
        assert_eq!(normalize(&input), expected);
    }

    #[test]
    fn test_normalize_array_of_records() {
        let input = payload(json!([{ "post_id": "1" }, { "post_id": "2" }]));
        let expected = payload(json!([{ "postId": "1" }, { "postId": "2" }]));
        assert_eq!(normalize(&input), expected);
    }

    #[test]
    fn test_denormalize_simple() {
        let input = payload(json!({ "coverMediaId": "m1" }));
        assert_eq!(
            denormalize(&input),
            payload(json!({ "cover_media_id": "m1" }))
        );
    }

    #[test]
    fn test_round_trip_restores_snake_keys() {
        let input = payload(json!({
            "post_id": 3,
            "seo_meta": { "og_image_url": "x", "keywords": ["a_b", "c"] },
            "related_posts": [{ "post_id": 4, "is_pinned": true }],
            "deleted_at": null
        }));
        assert_eq!(denormalize(&normalize(&input)), input);
    }

    #[test]
    fn test_already_camel_is_unchanged() {
        let input = payload(json!({ "postId": 1, "author": { "displayName": "Jo" } }));
        assert_eq!(normalize(&input), input);
    }

    #[test]
    fn test_normalize_twice_equals_once() {
        let input = payload(json!({ "a__b": 1, "level_2_cache": { "x_y": 2 } }));
        let once = normalize(&input);
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_array_order_and_length_preserved() {
        let input = payload(json!([3, "two", { "one_key": 1 }, null, [true]]));
        let output = normalize(&input);
        let items = output.as_array().unwrap();
        assert_eq!(items.len(), 5);
        assert_eq!(items[0], payload(json!(3)));
        assert_eq!(items[1], payload(json!("two")));
        assert_eq!(items[2], payload(json!({ "oneKey": 1 })));
        assert!(items[3].is_null());
        assert_eq!(items[4], payload(json!([true])));
    }

    #[test]
    fn test_values_are_not_rewritten() {
        let input = payload(json!({ "slug_value": "snake_case_slug" }));
        assert_eq!(
            normalize(&input),
            payload(json!({ "slugValue": "snake_case_slug" }))
        );
    }

    #[test]
    fn test_primitives_pass_through() {
        for value in [json!(null), json!(1.5), json!("a_b"), json!(false)] {
            let input = payload(value);
            assert_eq!(normalize(&input), input);
            assert_eq!(denormalize(&input), input);
        }
    }

    #[test]
    fn test_protected_blob_passes_by_identity() {
        let blob = Payload::blob(Blob::new("image/png", vec![0x89, 0x50]));
        let original = Arc::clone(blob.protected().unwrap());
        let input = Payload::object([(
            "media_file",
            Payload::object([("raw_data", blob)]),
        )]);

        let output = normalize(&input);
        let nested = output.get("mediaFile").and_then(|m| m.get("rawData")).unwrap();
        assert!(Arc::ptr_eq(nested.protected().unwrap(), &original));
    }

    #[test]
    fn test_every_protected_kind_passes_through() {
        let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let values = vec![
            Payload::blob(Blob::new("application/octet-stream", vec![1])),
            Payload::file(FileHandle::new("cover.png", vec![2])),
            Payload::timestamp(at),
            Payload::form(FormPayload::new().text("alt_text", "x")),
        ];
        let input = Payload::Array(values.clone());
        let output = denormalize(&input);
        for (before, after) in values.iter().zip(output.as_array().unwrap()) {
            assert!(Arc::ptr_eq(
                before.protected().unwrap(),
                after.protected().unwrap()
            ));
        }
    }

    #[test]
    fn test_collision_keeps_single_key() {
        let input = Payload::object([
            ("a_b", Payload::from(1_i64)),
            ("aB", Payload::from(2_i64)),
        ]);
        let output = normalize(&input);
        let map = output.as_object().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("aB"), Some(&Payload::from(2_i64)));
    }

    #[test]
    fn test_strict_converter_rejects_collision() {
        let input = Payload::object([
            ("a_b", Payload::from(1_i64)),
            ("aB", Payload::from(2_i64)),
        ]);
        let err = CaseConverter::strict().normalize(&input).unwrap_err();
        assert_eq!(
            err,
            DomainError::KeyCollision {
                key: "aB".to_string(),
                original: "aB".to_string(),
            }
        );
    }

    #[test]
    fn test_strict_converter_rejects_nested_collision() {
        let input = payload(json!([{ "outer": { "postId": 1, "post_id": 2 } }]));
        assert!(CaseConverter::strict().denormalize(&input).is_err());
        assert!(CaseConverter::strict().normalize(&input).is_err());
    }

    #[test]
    fn test_strict_converter_without_collision_matches_free_fn() {
        let input = payload(json!({ "cover_media_id": "m1", "tags": [{ "tag_id": 1 }] }));
        assert_eq!(
            CaseConverter::strict().normalize(&input).unwrap(),
            normalize(&input)
        );
    }

    #[test]
    fn test_default_converter_uses_last_wins() {
        let converter = CaseConverter::default();
        assert_eq!(converter.policy(), CollisionPolicy::LastWins);
        let input = Payload::object([
            ("aB", Payload::from(1_i64)),
            ("a_b", Payload::from(2_i64)),
        ]);
        let output = converter.normalize(&input).unwrap();
        assert_eq!(output.get("aB"), Some(&Payload::from(2_i64)));
    }

    #[test]
    fn test_output_is_a_fresh_container() {
        let input = payload(json!({ "items": [1, 2] }));
        let mut output = normalize(&input);
        if let Payload::Object(map) = &mut output {
            map.insert("extra".to_string(), Payload::Null);
        }
        assert_eq!(input.as_object().map(Mapping::len), Some(1));
    }
}
