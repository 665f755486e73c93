use serde::{Deserialize, Serialize};

/// Identity the session collaborator reports for the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
    pub email: Option<String>,
}

impl SessionUser {
    /// Administrator convention: the reserved `admin` account name.
    pub fn is_admin(&self) -> bool {
        self.username.eq_ignore_ascii_case("ADMIN")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `GET /api/auth/session` — `user` is absent when nobody is signed in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}

/// `GET /api/auth/csrf` — per-session token required on incident calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrfResponse {
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_detection_is_case_insensitive() {
        let user = SessionUser {
            username: "Admin".into(),
            email: None,
        };
        assert!(user.is_admin());

        let user = SessionUser {
            username: "alice".into(),
            email: Some("alice@example.com".into()),
        };
        assert!(!user.is_admin());
    }

    #[test]
    fn csrf_response_uses_camel_case() {
        let resp: CsrfResponse = serde_json::from_str(r#"{"csrfToken": "tok-1"}"#).unwrap();
        assert_eq!(resp.csrf_token, "tok-1");
    }
}
