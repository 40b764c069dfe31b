use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
    /// Present when the provider rotates refresh tokens.
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

impl UserInfo {
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_response_without_rotation() {
        let r: RefreshResponse = serde_json::from_str(r#"{"access_token": "a"}"#).unwrap();
        assert_eq!(r.access_token, "a");
        assert!(r.refresh_token.is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut u = UserInfo {
            id: "1".into(),
            username: "caja1".into(),
            full_name: Some("  ".into()),
            email: None,
            is_admin: false,
        };
        assert_eq!(u.display_name(), "caja1");
        u.full_name = Some("Ana Pérez".into());
        assert_eq!(u.display_name(), "Ana Pérez");
    }
}
