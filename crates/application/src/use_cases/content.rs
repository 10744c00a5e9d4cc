//! Content backend use cases.

use quill_domain::{
    ApiRequest, Category, FileHandle, FormPayload, MediaFile, NewTag, Payload, Post, PostPage,
    PostQuery, SyncRun, Tag, denormalize, query_pairs,
};

use crate::client::ApiClient;
use crate::error::ApplicationResult;
use crate::ports::HttpTransport;

/// Typed calls against the content backend.
///
/// Inputs and outputs are the `camelCase` mirrors; the client's interceptors
/// translate to and from the backend's `snake_case`.
pub struct ContentService<T> {
    client: ApiClient<T>,
}

impl<T: HttpTransport> ContentService<T> {
    /// Creates a new `ContentService` over `client`.
    #[must_use]
    pub const fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// The underlying client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient<T> {
        &self.client
    }

    /// Lists posts matching `query`.
    ///
    /// Query parameters are sent in the backend's key style.
    ///
    /// # Errors
    /// Returns an error if the request fails or the page does not decode.
    pub async fn list_posts(&self, query: &PostQuery) -> ApplicationResult<PostPage> {
        let params = query_pairs(&denormalize(&Payload::from_serializable(query)?));
        self.client.get_json("posts", &params).await
    }

    /// Fetches one post.
    ///
    /// # Errors
    /// Returns `ApplicationError::Status` with 404 for an unknown id.
    pub async fn get_post(&self, id: &str) -> ApplicationResult<Post> {
        self.client.get_json(&format!("posts/{id}"), &[]).await
    }

    /// Lists all tags.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn list_tags(&self) -> ApplicationResult<Vec<Tag>> {
        self.client.get_json("tags", &[]).await
    }

    /// Creates a tag.
    ///
    /// # Errors
    /// Returns an error if the backend rejects the tag.
    pub async fn create_tag(&self, tag: &NewTag) -> ApplicationResult<Tag> {
        self.client.post_json("tags", tag).await
    }

    /// Lists all categories.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn list_categories(&self) -> ApplicationResult<Vec<Category>> {
        self.client.get_json("categories", &[]).await
    }

    /// Uploads a media file as the `file` field of a multipart form.
    ///
    /// # Errors
    /// Returns an error if the upload is rejected.
    pub async fn upload_media(&self, file: FileHandle) -> ApplicationResult<MediaFile> {
        let form = FormPayload::new().file("file", file);
        self.client
            .send_json(ApiRequest::post("media").with_multipart(form))
            .await
    }

    /// Starts a Git content sync.
    ///
    /// # Errors
    /// Returns an error if the backend refuses to start a run.
    pub async fn trigger_sync(&self) -> ApplicationResult<SyncRun> {
        self.client.send_json(ApiRequest::post("sync")).await
    }

    /// Latest sync run.
    ///
    /// # Errors
    /// Returns an error if the request fails.
    pub async fn sync_status(&self) -> ApplicationResult<SyncRun> {
        self.client.get_json("sync/status", &[]).await
    }
}
