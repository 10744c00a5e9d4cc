//! Key casing rules.
//!
//! The backend speaks `snake_case`, application code speaks `camelCase`.
//! Only letters participate in case boundaries: digits never start a new
//! word, so `oauth2Token` and `oauth2_token` map onto each other while
//! `item_2` is left alone in both directions.

use serde::{Deserialize, Serialize};

/// Target naming convention for object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// `camelCase`, used by application code.
    Camel,
    /// `snake_case`, used on the wire.
    Snake,
}

impl KeyCase {
    /// Rewrites a key into this convention.
    #[must_use]
    pub fn apply(self, key: &str) -> String {
        match self {
            Self::Camel => to_camel_case(key),
            Self::Snake => to_snake_case(key),
        }
    }
}

/// Converts a `snake_case` key to `camelCase`.
///
/// Every underscore followed by a lowercase letter is dropped and the letter
/// uppercased. Underscores followed by anything else are kept verbatim.
///
/// ```
/// use quill_domain::casing::to_camel_case;
///
/// assert_eq!(to_camel_case("cover_media_id"), "coverMediaId");
/// assert_eq!(to_camel_case("_id"), "Id");
/// ```
#[must_use]
pub fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_'
            && let Some(&next) = chars.peek()
            && next.is_lowercase()
        {
            chars.next();
            out.extend(next.to_uppercase());
            continue;
        }
        out.push(c);
    }

    out
}

/// Converts a `camelCase` key to `snake_case`.
///
/// An underscore goes before every uppercase letter that is not the first
/// character, and the whole key is lowercased.
///
/// ```
/// use quill_domain::casing::to_snake_case;
///
/// assert_eq!(to_snake_case("coverMediaId"), "cover_media_id");
/// ```
#[must_use]
pub fn to_snake_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);

    for (index, c) in key.char_indices() {
        if c.is_uppercase() {
            if index > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_camel_case_basic() {
        assert_eq!(to_camel_case("cover_media_id"), "coverMediaId");
        assert_eq!(to_camel_case("display_name"), "displayName");
        assert_eq!(to_camel_case("title"), "title");
    }

    #[test]
    fn test_camel_case_leaves_camel_keys_alone() {
        assert_eq!(to_camel_case("coverMediaId"), "coverMediaId");
        assert_eq!(to_camel_case("postId"), "postId");
    }

    #[test]
    fn test_camel_case_consumes_leading_underscores() {
        assert_eq!(to_camel_case("_id"), "Id");
        assert_eq!(to_camel_case("__type_name"), "_TypeName");
        assert_eq!(to_camel_case("_private_key"), "PrivateKey");
    }

    #[test]
    fn test_camel_case_digits_are_not_boundaries() {
        assert_eq!(to_camel_case("oauth2_token"), "oauth2Token");
        assert_eq!(to_camel_case("item_2"), "item_2");
        assert_eq!(to_camel_case("level_2_cache"), "level_2Cache");
    }

    #[test]
    fn test_camel_case_double_underscore() {
        assert_eq!(to_camel_case("a__b"), "a_B");
        assert_eq!(to_camel_case("trailing_"), "trailing_");
    }

    #[test]
    fn test_camel_case_is_idempotent() {
        for key in ["cover_media_id", "a__b", "level_2_cache", "_id", "oauth2_token"] {
            let once = to_camel_case(key);
            assert_eq!(to_camel_case(&once), once, "key {key}");
        }
    }

    #[test]
    fn test_snake_case_basic() {
        assert_eq!(to_snake_case("coverMediaId"), "cover_media_id");
        assert_eq!(to_snake_case("postId"), "post_id");
        assert_eq!(to_snake_case("title"), "title");
    }

    #[test]
    fn test_snake_case_first_letter_uppercase() {
        assert_eq!(to_snake_case("Title"), "title");
        assert_eq!(to_snake_case("URL"), "u_r_l");
    }

    #[test]
    fn test_snake_case_digits() {
        assert_eq!(to_snake_case("oauth2Token"), "oauth2_token");
        assert_eq!(to_snake_case("item2"), "item2");
    }

    #[test]
    fn test_round_trip_through_both_rules() {
        for key in ["cover_media_id", "a__b", "oauth2_token", "published_at"] {
            assert_eq!(to_snake_case(&to_camel_case(key)), key);
        }
    }

    #[test]
    fn test_keys_that_do_not_round_trip() {
        // A single leading underscore is consumed and not restored.
        assert_eq!(to_snake_case(&to_camel_case("_id")), "id");
        assert_eq!(to_snake_case(&to_camel_case("_private_key")), "private_key");
        assert_eq!(to_snake_case(&to_camel_case("URL")), "u_r_l");
    }

    #[test]
    fn test_key_case_apply() {
        assert_eq!(KeyCase::Camel.apply("post_id"), "postId");
        assert_eq!(KeyCase::Snake.apply("postId"), "post_id");
    }
}
