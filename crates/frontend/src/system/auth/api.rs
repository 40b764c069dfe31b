use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};

use crate::shared::api_utils::{ApiClient, ApiError};

/// Login with username and password
pub async fn login(
    base: &str,
    username: String,
    password: String,
) -> Result<LoginResponse, ApiError> {
    let request = LoginRequest { username, password };
    ApiClient::new(base, None)
        .post("/api/auth/login", &request)
        .await
}

/// Exchange the refresh token for a new access token
pub async fn refresh_token(base: &str, refresh_token: String) -> Result<RefreshResponse, ApiError> {
    let request = RefreshRequest { refresh_token };
    ApiClient::new(base, None)
        .post("/api/auth/refresh", &request)
        .await
}

/// Logout (revoke refresh token)
pub async fn logout(base: &str, refresh_token: String) -> Result<(), ApiError> {
    let request = RefreshRequest { refresh_token };
    ApiClient::new(base, None)
        .post_unit("/api/auth/logout", &request)
        .await
}

/// Get current user info
pub async fn get_current_user(base: &str, access_token: &str) -> Result<UserInfo, ApiError> {
    ApiClient::new(base, Some(access_token.to_string()))
        .get("/api/auth/me")
        .await
}
