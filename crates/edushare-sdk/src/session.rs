//! Session management for the EduShare backend.
//!
//! The session is an explicit object: established once via login (or loaded
//! from disk by a caller), handed to the client at construction, invalidated
//! on logout. Nothing reads ambient storage on the fly.

use crate::error::SdkError;
use edushare_domain::UserId;
use serde::{Deserialize, Serialize};

/// An authenticated session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Id of the authenticated user.
    pub user_id: i64,

    /// Username of the authenticated user.
    pub username: String,

    /// Bearer token, sent as `Authorization: Token <token>`.
    pub token: String,
}

impl Session {
    /// The viewer id for relationship resolution.
    pub fn viewer(&self) -> UserId {
        UserId::new(self.user_id)
    }
}

/// Login request body.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// The `user` object inside a login response.
#[derive(Debug, Deserialize)]
struct LoginUser {
    id: i64,
    username: String,
}

/// Login response from the backend.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
    user: LoginUser,
}

/// Authenticate against `POST /api/auth/login/`.
pub(crate) async fn login(
    http: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<Session, SdkError> {
    let url = format!("{}/api/auth/login/", base_url);

    let response = http
        .post(&url)
        .json(&LoginRequest { username, password })
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(crate::client::api_error(response).await);
    }

    let login: LoginResponse = response.json().await?;

    Ok(Session {
        user_id: login.user.id,
        username: login.user.username,
        token: login.token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_response_parsing() {
        let json = r#"{
            "token": "9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b",
            "user": {
                "id": 1,
                "username": "alice",
                "email": "alice@example.edu",
                "is_private": false
            }
        }"#;

        let response: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.user.id, 1);
        assert_eq!(response.user.username, "alice");
        assert!(!response.token.is_empty());
    }

    #[test]
    fn test_session_viewer() {
        let session = Session {
            user_id: 7,
            username: "alice".to_string(),
            token: "tok".to_string(),
        };
        assert_eq!(session.viewer(), UserId::new(7));
    }

    #[test]
    fn test_session_roundtrips_through_json() {
        let session = Session {
            user_id: 3,
            username: "bob".to_string(),
            token: "abc123".to_string(),
        };
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_id, 3);
        assert_eq!(back.username, "bob");
        assert_eq!(back.token, "abc123");
    }
}
