//! Backend resources.
//!
//! Each `*Record` type is the `snake_case` shape the backend returns; its
//! mirror (`Post`, `Tag`, ...) is what application code works with after the
//! response passed through the case interceptor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::mirror::{CaseMirror, wire_record};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    /// Not visible to readers.
    #[default]
    Draft,
    /// Visible to readers.
    Published,
    /// Hidden but kept.
    Archived,
}

impl CaseMirror for PostStatus {
    type Mirror = Self;
}

/// State of a Git content sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Waiting for a worker.
    Queued,
    /// Pulling and importing content.
    Running,
    /// Finished without errors.
    Succeeded,
    /// Finished with an error.
    Failed,
}

impl SyncState {
    /// Returns true once the run can no longer change.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

impl CaseMirror for SyncState {
    type Mirror = Self;
}

wire_record! {
    /// Author of a post.
    pub struct AuthorRecord => Author {
        /// Identifier.
        pub id: String,
        /// Name shown on articles.
        pub display_name: String,
        /// Avatar image.
        #[serde(default)]
        pub avatar_url: Option<String>,
    }
}

wire_record! {
    /// A tag.
    pub struct TagRecord => Tag {
        /// Identifier.
        pub id: String,
        /// Display name.
        pub name: String,
        /// URL slug.
        pub slug: String,
        /// Number of posts carrying the tag.
        #[serde(default)]
        pub post_count: u64,
    }
}

wire_record! {
    /// Payload for creating a tag.
    pub struct NewTagRecord => NewTag {
        /// Display name.
        pub name: String,
        /// URL slug, derived from the name by the backend when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub slug: Option<String>,
    }
}

wire_record! {
    /// A category. Categories nest through `parent_id`.
    pub struct CategoryRecord => Category {
        /// Identifier.
        pub id: String,
        /// Display name.
        pub name: String,
        /// URL slug.
        pub slug: String,
        /// Parent category.
        #[serde(default)]
        pub parent_id: Option<String>,
    }
}

wire_record! {
    /// An uploaded media file.
    pub struct MediaFileRecord => MediaFile {
        /// Identifier.
        pub id: String,
        /// Original file name.
        pub file_name: String,
        /// Media type.
        pub content_type: String,
        /// Size on disk.
        pub size_bytes: u64,
        /// Public URL.
        pub public_url: String,
        /// Upload time.
        pub created_at: DateTime<Utc>,
    }
}

wire_record! {
    /// A blog post.
    pub struct PostRecord => Post {
        /// Identifier.
        pub id: String,
        /// Title.
        pub title: String,
        /// URL slug.
        pub slug: String,
        /// Publication state.
        pub status: PostStatus,
        /// Short summary.
        #[serde(default)]
        pub excerpt: Option<String>,
        /// Rendered HTML body.
        #[serde(default)]
        pub content_html: Option<String>,
        /// Media file used as cover image.
        #[serde(default)]
        pub cover_media_id: Option<String>,
        /// Author.
        pub author: AuthorRecord,
        /// Tags.
        #[serde(default)]
        pub tags: Vec<TagRecord>,
        /// Category.
        #[serde(default)]
        pub category: Option<CategoryRecord>,
        /// Publication time.
        #[serde(default)]
        pub published_at: Option<DateTime<Utc>>,
        /// Last modification time.
        pub updated_at: DateTime<Utc>,
    }
}

wire_record! {
    /// One page of posts.
    pub struct PostPageRecord => PostPage {
        /// Posts on this page.
        pub items: Vec<PostRecord>,
        /// Number of posts across all pages.
        pub total_count: u64,
        /// One-based page number.
        pub page: u32,
        /// Page size.
        pub page_size: u32,
    }
}

wire_record! {
    /// A Git content sync run.
    pub struct SyncRunRecord => SyncRun {
        /// Identifier.
        pub id: String,
        /// Current state.
        pub status: SyncState,
        /// Start time.
        pub started_at: DateTime<Utc>,
        /// End time, once finished.
        #[serde(default)]
        pub finished_at: Option<DateTime<Utc>>,
        /// Commit the content was imported from.
        #[serde(default)]
        pub commit_sha: Option<String>,
        /// Number of files created, updated or deleted.
        #[serde(default)]
        pub files_changed: u32,
        /// Failure reason.
        #[serde(default)]
        pub error_message: Option<String>,
    }
}

/// Filters for listing posts.
///
/// This is an application-side object: it is written in `camelCase` and must
/// be denormalized before it becomes query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostQuery {
    /// One-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// Only posts with this tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_slug: Option<String>,
    /// Only posts in this state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostStatus>,
    /// Full-text search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::casing::to_camel_case;
    use crate::convert::normalize;
    use crate::mirror::normalize_record;
    use crate::payload::Payload;
    use pretty_assertions::assert_eq;
    use serde::de::DeserializeOwned;
    use serde_json::json;

    fn backend_post() -> serde_json::Value {
        json!({
            "id": "p1",
            "title": "Hello",
            "slug": "hello",
            "status": "published",
            "excerpt": null,
            "content_html": "<p>Hi</p>",
            "cover_media_id": "m1",
            "author": { "id": "u1", "display_name": "Jo", "avatar_url": null },
            "tags": [{ "id": "t1", "name": "Rust", "slug": "rust", "post_count": 3 }],
            "category": { "id": "c1", "name": "Dev", "slug": "dev", "parent_id": null },
            "published_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:00:00Z"
        })
    }

    #[test]
    fn test_normalized_backend_post_reads_as_post() {
        let normalized = normalize(&Payload::from(backend_post()));
        let post: Post = normalized.deserialize_into().unwrap();

        assert_eq!(post.cover_media_id.as_deref(), Some("m1"));
        assert_eq!(post.author.display_name, "Jo");
        assert_eq!(post.tags[0].post_count, 3);
        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.content_html.as_deref(), Some("<p>Hi</p>"));
    }

    #[test]
    fn test_typed_and_runtime_normalization_agree() {
        let record: PostRecord = serde_json::from_value(backend_post()).unwrap();
        let typed = normalize_record(&record).unwrap();
        let runtime: Post = normalize(&Payload::from(backend_post()))
            .deserialize_into()
            .unwrap();
        assert_eq!(typed, runtime);
    }

    #[test]
    fn test_enum_values_stay_snake_case() {
        let run = SyncRun {
            id: "s1".to_string(),
            status: SyncState::Succeeded,
            started_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            finished_at: None,
            commit_sha: Some("abc123".to_string()),
            files_changed: 4,
            error_message: None,
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert_eq!(json["filesChanged"], 4);
        assert!(SyncState::Failed.is_finished());
        assert!(!SyncState::Running.is_finished());
    }

    #[test]
    fn test_post_query_skips_unset_filters() {
        let query = PostQuery {
            page_size: Some(20),
            tag_slug: Some("rust".to_string()),
            ..PostQuery::default()
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, json!({ "pageSize": 20, "tagSlug": "rust" }));
    }

    #[test]
    fn test_new_tag_omits_missing_slug() {
        let tag = NewTag {
            name: "Rust".to_string(),
            slug: None,
        };
        assert_eq!(serde_json::to_value(&tag).unwrap(), json!({ "name": "Rust" }));
    }

    /// Collects `parent/child` key paths of every object in `value`.
    fn key_paths(value: &serde_json::Value, prefix: &str, rename: fn(&str) -> String, out: &mut Vec<String>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, child) in map {
                    let path = format!("{prefix}/{}", rename(key));
                    key_paths(child, &path, rename, out);
                    out.push(path);
                }
            }
            serde_json::Value::Array(items) => {
                for item in items {
                    key_paths(item, prefix, rename, out);
                }
            }
            _ => {}
        }
    }

    /// Checks that the generated mirror names every field exactly as the
    /// runtime casing rule names the wire key.
    fn assert_mirror_matches_runtime_rule<T>(sample: serde_json::Value)
    where
        T: CaseMirror + Serialize + DeserializeOwned,
        T::Mirror: Serialize + DeserializeOwned,
    {
        let name = std::any::type_name::<T>();
        let record: T = serde_json::from_value(sample).expect(name);
        let wire = serde_json::to_value(&record).unwrap();
        let mirror = serde_json::to_value(normalize_record(&record).expect(name)).unwrap();

        let mut expected = Vec::new();
        key_paths(&wire, "", to_camel_case, &mut expected);
        let mut actual = Vec::new();
        key_paths(&mirror, "", |key| key.to_owned(), &mut actual);
        expected.sort();
        expected.dedup();
        actual.sort();
        actual.dedup();

        assert_eq!(actual, expected, "{name}");
    }

    #[test]
    fn test_every_mirror_matches_runtime_rule() {
        let author = json!({"id": "u1", "display_name": "Jo", "avatar_url": "http://cdn.test/jo.png"});
        let tag = json!({"id": "t1", "name": "Rust", "slug": "rust", "post_count": 3});
        let category = json!({"id": "c2", "name": "Rust", "slug": "rust", "parent_id": "c1"});
        let post = json!({
            "id": "p1",
            "title": "Hello",
            "slug": "hello",
            "status": "published",
            "excerpt": "Hi",
            "content_html": "<p>Hi</p>",
            "cover_media_id": "m1",
            "author": author,
            "tags": [tag],
            "category": category,
            "published_at": "2024-05-01T12:00:00Z",
            "updated_at": "2024-05-02T08:00:00Z"
        });

        assert_mirror_matches_runtime_rule::<AuthorRecord>(author.clone());
        assert_mirror_matches_runtime_rule::<TagRecord>(tag.clone());
        assert_mirror_matches_runtime_rule::<NewTagRecord>(json!({"name": "Rust", "slug": "rust-lang"}));
        assert_mirror_matches_runtime_rule::<CategoryRecord>(category.clone());
        assert_mirror_matches_runtime_rule::<MediaFileRecord>(json!({
            "id": "m1",
            "file_name": "cover.png",
            "content_type": "image/png",
            "size_bytes": 3,
            "public_url": "http://cdn.test/cover.png",
            "created_at": "2024-05-01T10:00:00Z"
        }));
        assert_mirror_matches_runtime_rule::<PostRecord>(post.clone());
        assert_mirror_matches_runtime_rule::<PostPageRecord>(json!({
            "items": [post],
            "total_count": 1,
            "page": 1,
            "page_size": 20
        }));
        assert_mirror_matches_runtime_rule::<SyncRunRecord>(json!({
            "id": "s1",
            "status": "failed",
            "started_at": "2024-05-01T10:00:00Z",
            "finished_at": "2024-05-01T10:01:00Z",
            "commit_sha": "abc123",
            "files_changed": 4,
            "error_message": "merge conflict"
        }));
    }
}
