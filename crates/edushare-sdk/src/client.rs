//! EduShare client implementation.

use crate::error::SdkError;
use crate::session::{self, Session};
use crate::types::{
    DownloadLink, DownloadRecord, FriendshipRecord, NewUser, ProfileUpdate, RatingRecord,
    ResourceRecord, ResourceUpdate, ResourceUpload, UserProfile,
};
use edushare_domain::{FriendshipId, ResourceId, UserId};
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Search and filter parameters for resource listing.
#[derive(Debug, Default, Clone)]
pub struct ResourceQuery {
    /// Free-text search over title/description/subject/grade/type.
    pub search: Option<String>,
    /// Exact subject filter.
    pub subject: Option<String>,
    /// Exact grade-level filter.
    pub grade_level: Option<String>,
    /// Exact resource-type filter.
    pub resource_type: Option<String>,
}

impl ResourceQuery {
    fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(q) = self.search.as_deref() {
            params.push(("search", q));
        }
        if let Some(s) = self.subject.as_deref() {
            params.push(("subject", s));
        }
        if let Some(g) = self.grade_level.as_deref() {
            params.push(("grade_level", g));
        }
        if let Some(t) = self.resource_type.as_deref() {
            params.push(("resource_type", t));
        }
        params
    }
}

/// Async client for the EduShare backend.
///
/// Holds the base URL and an optional [`Session`]; authenticated endpoints
/// fail with [`SdkError::NotAuthenticated`] until a session is attached.
pub struct EduShareClient {
    base_url: String,
    http: reqwest::Client,
    session: Option<Session>,
}

impl EduShareClient {
    /// Create a client with no session attached.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            session: None,
        }
    }

    /// Create a client with an existing session (e.g. loaded from disk).
    pub fn with_session(base_url: &str, session: Session) -> Self {
        let mut client = Self::new(base_url);
        client.session = Some(session);
        client
    }

    /// The attached session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Drop the attached session.
    pub fn clear_session(&mut self) {
        self.session = None;
    }

    /// Authenticate and attach the resulting session.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, SdkError> {
        let session = session::login(&self.http, &self.base_url, username, password).await?;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Register a new account. Does not log in.
    pub async fn register(&self, new_user: &NewUser) -> Result<UserProfile, SdkError> {
        let response = self
            .http
            .post(self.url("/api/users/"))
            .json(new_user)
            .send()
            .await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> Result<RequestBuilder, SdkError> {
        let session = self.session.as_ref().ok_or(SdkError::NotAuthenticated)?;
        Ok(builder.header("Authorization", format!("Token {}", session.token)))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, SdkError> {
        debug!(path, "GET");
        let response = self.authed(self.http.get(self.url(path)))?.send().await?;
        decode(response).await
    }

    // --- friendships ---

    /// List every friendship record involving the current user.
    pub async fn list_friendships(&self) -> Result<Vec<FriendshipRecord>, SdkError> {
        self.get_json("/api/friendships/").await
    }

    /// Send a connection request to `addressee`.
    pub async fn send_friend_request(
        &self,
        addressee: UserId,
    ) -> Result<FriendshipRecord, SdkError> {
        debug!(%addressee, "sending friend request");
        let body = serde_json::json!({ "addressee": addressee.value() });
        let response = self
            .authed(self.http.post(self.url("/api/friendships/")))?
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// Accept an incoming request.
    pub async fn accept_friend_request(
        &self,
        id: FriendshipId,
    ) -> Result<FriendshipRecord, SdkError> {
        debug!(%id, "accepting friend request");
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/friendships/{}/accept/", id))),
            )?
            .send()
            .await?;
        decode(response).await
    }

    /// Reject an incoming request.
    pub async fn reject_friend_request(&self, id: FriendshipId) -> Result<(), SdkError> {
        debug!(%id, "rejecting friend request");
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/friendships/{}/reject/", id))),
            )?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Delete a friendship record (cancel a sent request, or unfriend).
    pub async fn delete_friendship(&self, id: FriendshipId) -> Result<(), SdkError> {
        debug!(%id, "deleting friendship");
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/api/friendships/{}/", id))),
            )?
            .send()
            .await?;
        expect_success(response).await
    }

    // --- users ---

    /// Fetch a user profile.
    pub async fn get_user(&self, id: UserId) -> Result<UserProfile, SdkError> {
        self.get_json(&format!("/api/users/{}/", id)).await
    }

    /// List users, optionally filtered by a search term
    /// (username / email / institution).
    pub async fn search_users(&self, query: Option<&str>) -> Result<Vec<UserProfile>, SdkError> {
        let mut builder = self.authed(self.http.get(self.url("/api/users/")))?;
        if let Some(q) = query {
            builder = builder.query(&[("search", q)]);
        }
        decode(builder.send().await?).await
    }

    /// Update the current user's profile fields.
    pub async fn update_profile(
        &self,
        id: UserId,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, SdkError> {
        let response = self
            .authed(self.http.patch(self.url(&format!("/api/users/{}/", id))))?
            .json(update)
            .send()
            .await?;
        decode(response).await
    }

    /// Resources uploaded by a user.
    pub async fn user_resources(&self, id: UserId) -> Result<Vec<ResourceRecord>, SdkError> {
        self.get_json(&format!("/api/users/{}/resources/", id)).await
    }

    /// Download history of a user (self only).
    pub async fn user_downloads(&self, id: UserId) -> Result<Vec<DownloadRecord>, SdkError> {
        self.get_json(&format!("/api/users/{}/downloads/", id)).await
    }

    /// Ratings given by a user.
    pub async fn user_ratings(&self, id: UserId) -> Result<Vec<RatingRecord>, SdkError> {
        self.get_json(&format!("/api/users/{}/ratings/", id)).await
    }

    /// Resources saved by a user (self only).
    pub async fn user_saved_resources(&self, id: UserId) -> Result<Vec<ResourceRecord>, SdkError> {
        self.get_json(&format!("/api/users/{}/saved_resources/", id))
            .await
    }

    /// Accepted friends of a user.
    pub async fn user_friends(&self, id: UserId) -> Result<Vec<UserProfile>, SdkError> {
        self.get_json(&format!("/api/users/{}/friends/", id)).await
    }

    // --- resources ---

    /// Browse resources with optional search and filters.
    pub async fn list_resources(
        &self,
        query: &ResourceQuery,
    ) -> Result<Vec<ResourceRecord>, SdkError> {
        let builder = self
            .authed(self.http.get(self.url("/api/resources/")))?
            .query(&query.params());
        decode(builder.send().await?).await
    }

    /// Fetch one resource.
    pub async fn get_resource(&self, id: ResourceId) -> Result<ResourceRecord, SdkError> {
        self.get_json(&format!("/api/resources/{}/", id)).await
    }

    /// Upload a new resource (multipart, file inline).
    pub async fn upload_resource(
        &self,
        upload: ResourceUpload,
    ) -> Result<ResourceRecord, SdkError> {
        debug!(title = %upload.title, "uploading resource");
        let form = Form::new()
            .text("title", upload.title)
            .text("description", upload.description)
            .text("resource_type", upload.resource_type)
            .text("subject", upload.subject)
            .text("grade_level", upload.grade_level)
            .part("file", Part::bytes(upload.file_bytes).file_name(upload.file_name));

        let response = self
            .authed(self.http.post(self.url("/api/resources/")))?
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    /// Update resource metadata.
    pub async fn update_resource(
        &self,
        id: ResourceId,
        update: &ResourceUpdate,
    ) -> Result<ResourceRecord, SdkError> {
        let response = self
            .authed(
                self.http
                    .patch(self.url(&format!("/api/resources/{}/", id))),
            )?
            .json(update)
            .send()
            .await?;
        decode(response).await
    }

    /// Delete a resource.
    pub async fn delete_resource(&self, id: ResourceId) -> Result<(), SdkError> {
        let response = self
            .authed(
                self.http
                    .delete(self.url(&format!("/api/resources/{}/", id))),
            )?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Record a download and get the direct file URL.
    pub async fn download_resource(&self, id: ResourceId) -> Result<DownloadLink, SdkError> {
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/resources/{}/download/", id))),
            )?
            .send()
            .await?;
        decode(response).await
    }

    /// Bookmark a resource.
    pub async fn save_resource(&self, id: ResourceId) -> Result<(), SdkError> {
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/resources/{}/save/", id))),
            )?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Remove a bookmark.
    pub async fn unsave_resource(&self, id: ResourceId) -> Result<(), SdkError> {
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/resources/{}/unsave/", id))),
            )?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Rate a resource (1-5 stars, optional comment). Re-rating updates the
    /// existing rating.
    pub async fn rate_resource(
        &self,
        id: ResourceId,
        rating: u8,
        comment: Option<&str>,
    ) -> Result<RatingRecord, SdkError> {
        let body = serde_json::json!({
            "rating": rating,
            "comment": comment.unwrap_or(""),
        });
        let response = self
            .authed(
                self.http
                    .post(self.url(&format!("/api/resources/{}/rate/", id))),
            )?
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    /// Ratings received by a resource.
    pub async fn resource_ratings(&self, id: ResourceId) -> Result<Vec<RatingRecord>, SdkError> {
        self.get_json(&format!("/api/resources/{}/ratings/", id))
            .await
    }

    // --- downloads ---

    /// Delete one download-history entry.
    pub async fn delete_download(&self, id: i64) -> Result<(), SdkError> {
        let response = self
            .authed(self.http.delete(self.url(&format!("/api/downloads/{}/", id))))?
            .send()
            .await?;
        expect_success(response).await
    }

    /// Clear the whole download history.
    pub async fn clear_download_history(&self) -> Result<(), SdkError> {
        let response = self
            .authed(self.http.delete(self.url("/api/downloads/clear/")))?
            .send()
            .await?;
        expect_success(response).await
    }
}

/// Build an [`SdkError::Api`] from a non-2xx response, pulling the
/// backend's `detail`/`error` field out of the body when present.
pub(crate) async fn api_error(response: Response) -> SdkError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| {
            v.get("detail")
                .or_else(|| v.get("error"))
                .and_then(|d| d.as_str().map(String::from))
        })
        .unwrap_or(body);
    SdkError::Api { status, detail }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SdkError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json().await?)
}

async fn expect_success(response: Response) -> Result<(), SdkError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let client = EduShareClient::new("http://localhost:8000/");
        assert_eq!(client.url("/api/users/"), "http://localhost:8000/api/users/");
    }

    #[test]
    fn test_resource_query_params() {
        let query = ResourceQuery {
            search: Some("fractions".to_string()),
            subject: Some("Math".to_string()),
            ..Default::default()
        };
        assert_eq!(
            query.params(),
            vec![("search", "fractions"), ("subject", "Math")]
        );
        assert!(ResourceQuery::default().params().is_empty());
    }

    #[test]
    fn test_session_attachment() {
        let session = Session {
            user_id: 1,
            username: "alice".to_string(),
            token: "tok".to_string(),
        };
        let mut client = EduShareClient::with_session("http://localhost:8000", session);
        assert_eq!(client.session().map(|s| s.user_id), Some(1));

        client.clear_session();
        assert!(client.session().is_none());
    }
}
