//! Wire DTOs for the backend REST surface, plus conversion into domain
//! types where one exists.

use edushare_domain::{Friendship, FriendshipId, FriendshipStatus, UserId};
use serde::{Deserialize, Serialize};

/// A friendship record as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct FriendshipRecord {
    /// Record id.
    pub id: i64,
    /// Id of the requesting user.
    pub requester: i64,
    /// Username of the requesting user.
    #[serde(default)]
    pub requester_username: Option<String>,
    /// Id of the addressed user.
    pub addressee: i64,
    /// Username of the addressed user.
    #[serde(default)]
    pub addressee_username: Option<String>,
    /// Lifecycle status (`pending` or `accepted`).
    pub status: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

impl FriendshipRecord {
    /// Convert into the domain record.
    ///
    /// Returns `None` when the status is not one the client lifecycle
    /// produces; callers drop the record and log the anomaly.
    pub fn to_domain(&self) -> Option<Friendship> {
        let status = FriendshipStatus::parse(&self.status)?;
        Some(Friendship::new(
            FriendshipId::new(self.id),
            UserId::new(self.requester),
            UserId::new(self.addressee),
            status,
        ))
    }
}

/// A user profile as returned by `GET /api/users/{id}/`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// User id.
    pub id: i64,
    /// Username.
    pub username: String,
    /// Institution, possibly empty.
    #[serde(default)]
    pub institution: String,
    /// Bio, possibly empty.
    #[serde(default)]
    pub bio: String,
    /// Whether the profile is private (visible to friends only).
    #[serde(default)]
    pub is_private: bool,
    /// Number of resources the user uploaded.
    #[serde(default)]
    pub total_uploads: i64,
    /// Average rating across the user's resources.
    #[serde(default)]
    pub average_rating: f64,
    /// Number of accepted friendships.
    #[serde(default)]
    pub friend_count: i64,
    /// Account creation timestamp.
    #[serde(default)]
    pub date_joined: Option<String>,
}

impl UserProfile {
    /// The typed user id.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.id)
    }
}

/// Registration payload for `POST /api/users/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Password.
    pub password: String,
    /// Institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Whether the profile starts private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// Partial profile update for `PATCH /api/users/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    /// New institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// New bio.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// New privacy flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
}

/// A resource as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceRecord {
    /// Resource id.
    pub id: i64,
    /// Uploader's username.
    #[serde(default)]
    pub user: String,
    /// Uploader's id.
    #[serde(default)]
    pub user_id: i64,
    /// Title.
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Stored file URL.
    #[serde(default)]
    pub file: Option<String>,
    /// Resource type (lesson_plan, worksheet, video, ...).
    #[serde(default)]
    pub resource_type: String,
    /// Subject area.
    #[serde(default)]
    pub subject: String,
    /// Grade level.
    #[serde(default)]
    pub grade_level: String,
    /// Times downloaded.
    #[serde(default)]
    pub download_count: i64,
    /// Average rating (0 when unrated).
    #[serde(default)]
    pub average_rating: f64,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Fields for a new resource upload (multipart, with the file inline).
#[derive(Debug, Clone)]
pub struct ResourceUpload {
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Resource type.
    pub resource_type: String,
    /// Subject area.
    pub subject: String,
    /// Grade level.
    pub grade_level: String,
    /// File name as uploaded.
    pub file_name: String,
    /// File contents.
    pub file_bytes: Vec<u8>,
}

/// Partial resource update for `PATCH /api/resources/{id}/`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResourceUpdate {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New resource type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    /// New subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// New grade level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade_level: Option<String>,
}

/// A rating as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRecord {
    /// Rating id.
    pub id: i64,
    /// Rater's username.
    #[serde(default)]
    pub user: String,
    /// Rater's id.
    #[serde(default)]
    pub user_id: i64,
    /// Rated resource id.
    pub resource: i64,
    /// Rated resource title.
    #[serde(default)]
    pub resource_title: String,
    /// Star value, 1 through 5.
    pub rating: u8,
    /// Optional review text.
    #[serde(default)]
    pub comment: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// A download-history entry as serialized by the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadRecord {
    /// Download id.
    pub id: i64,
    /// Downloaded resource id.
    pub resource: i64,
    /// Downloaded resource title.
    #[serde(default)]
    pub resource_title: String,
    /// Resource subject.
    #[serde(default)]
    pub subject: String,
    /// Resource grade level.
    #[serde(default)]
    pub grade_level: String,
    /// Resource type.
    #[serde(default)]
    pub resource_type: String,
    /// Uploader's username.
    #[serde(default)]
    pub author: String,
    /// Download timestamp.
    #[serde(default)]
    pub downloaded_at: Option<String>,
}

/// Response of `POST /api/resources/{id}/download/`.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadLink {
    /// Direct URL to fetch the file from.
    pub download_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_friendship_record_parsing_and_conversion() {
        let json = r#"{
            "id": 10,
            "requester": 1,
            "requester_username": "alice",
            "addressee": 2,
            "addressee_username": "bob",
            "status": "pending",
            "created_at": "2024-03-01T10:00:00Z"
        }"#;

        let record: FriendshipRecord = serde_json::from_str(json).unwrap();
        let friendship = record.to_domain().unwrap();
        assert_eq!(friendship.id, FriendshipId::new(10));
        assert_eq!(friendship.requester, UserId::new(1));
        assert_eq!(friendship.addressee, UserId::new(2));
        assert_eq!(friendship.status, FriendshipStatus::Pending);
    }

    #[test]
    fn test_unknown_status_drops_record() {
        let json = r#"{"id": 10, "requester": 1, "addressee": 2, "status": "rejected"}"#;
        let record: FriendshipRecord = serde_json::from_str(json).unwrap();
        assert!(record.to_domain().is_none());
    }

    #[test]
    fn test_user_profile_parsing() {
        let json = r#"{
            "id": 5,
            "username": "carol",
            "institution": "Springfield High",
            "bio": "",
            "is_private": true,
            "total_uploads": 12,
            "average_rating": 4.25,
            "friend_count": 3,
            "date_joined": "2023-09-01T08:00:00Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user_id(), UserId::new(5));
        assert_eq!(profile.institution, "Springfield High");
        assert!(profile.is_private);
        assert_eq!(profile.friend_count, 3);
    }

    #[test]
    fn test_user_profile_tolerates_missing_optional_fields() {
        let json = r#"{"id": 5, "username": "carol"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.average_rating, 0.0);
        assert!(!profile.is_private);
    }

    #[test]
    fn test_resource_record_parsing() {
        let json = r#"{
            "id": 3,
            "user": "alice",
            "user_id": 1,
            "title": "Fractions worksheet",
            "description": "Intro to fractions",
            "file": "https://files.example.com/resources/fractions.pdf",
            "resource_type": "worksheet",
            "subject": "Math",
            "grade_level": "5",
            "download_count": 42,
            "average_rating": 4.5,
            "created_at": "2024-01-15T12:00:00Z"
        }"#;

        let resource: ResourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(resource.title, "Fractions worksheet");
        assert_eq!(resource.download_count, 42);
        // Django returns integer zero for unrated resources; both forms decode.
        let unrated: ResourceRecord =
            serde_json::from_str(r#"{"id": 4, "title": "t", "average_rating": 0}"#).unwrap();
        assert_eq!(unrated.average_rating, 0.0);
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            bio: Some("hello".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"bio":"hello"}"#);
    }

    #[test]
    fn test_download_link_parsing() {
        let json = r#"{"download_url": "https://files.example.com/raw/upload/x.pdf"}"#;
        let link: DownloadLink = serde_json::from_str(json).unwrap();
        assert!(link.download_url.ends_with("x.pdf"));
    }
}
