use serde::{Deserialize, Serialize};

/// Credentials entered by the user
///
/// Either a username or an email can be given; the API only accepts
/// usernames, see [`LoginPayload::resolve_username`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginPayload {
    /// Username sent to the API
    ///
    /// Uses the explicit username, else the local part of the email, else "".
    pub fn resolve_username(&self) -> String {
        if let Some(username) = self.username.as_deref().filter(|u| !u.is_empty()) {
            return username.to_string();
        }

        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .unwrap_or_default()
            .to_string()
    }

    /// Request body for `POST /auth/login`
    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            username: self.resolve_username(),
            password: self.password.clone(),
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponseDto {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub access_token: String,
    pub refresh_token: Option<String>,
}

/// Response of `GET /user/me`
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDto {
    pub id: u64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub image: Option<String>,
}

/// Authenticated user
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub name: String,
    pub token: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub image: Option<String>,
    pub refresh_token: Option<String>,
}

fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}").trim().to_string()
}

/// Transform a login response into a user carrying the access token
pub fn transform_auth_response(dto: AuthResponseDto) -> User {
    User {
        id: dto.id,
        name: full_name(&dto.first_name, &dto.last_name),
        email: dto.email,
        token: dto.access_token,
        username: Some(dto.username),
        first_name: Some(dto.first_name),
        last_name: Some(dto.last_name),
        gender: dto.gender,
        image: dto.image,
        refresh_token: dto.refresh_token,
    }
}

/// Transform a profile response, attaching the token it was fetched with
pub fn transform_user_profile(dto: UserProfileDto, token: &str) -> User {
    User {
        id: dto.id,
        name: full_name(&dto.first_name, &dto.last_name),
        email: dto.email,
        token: token.to_string(),
        username: Some(dto.username),
        first_name: Some(dto.first_name),
        last_name: Some(dto.last_name),
        gender: dto.gender,
        image: dto.image,
        refresh_token: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_username_prefers_username() {
        let payload = LoginPayload {
            username: Some("emilys".to_string()),
            email: Some("someone@example.com".to_string()),
            password: "pw".to_string(),
        };
        assert_eq!(payload.resolve_username(), "emilys");
    }

    #[test]
    fn test_resolve_username_from_email() {
        let payload = LoginPayload {
            username: None,
            email: Some("emilys@x.dummyjson.com".to_string()),
            password: "pw".to_string(),
        };
        assert_eq!(payload.resolve_username(), "emilys");
    }

    #[test]
    fn test_resolve_username_empty_username_falls_through() {
        let payload = LoginPayload {
            username: Some(String::new()),
            email: Some("michaelw@x.dummyjson.com".to_string()),
            password: "pw".to_string(),
        };
        assert_eq!(payload.resolve_username(), "michaelw");
    }

    #[test]
    fn test_resolve_username_nothing_given() {
        let payload = LoginPayload::default();
        assert_eq!(payload.resolve_username(), "");
    }

    #[test]
    fn test_transform_auth_response() {
        let json = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128",
            "accessToken": "access-123",
            "refreshToken": "refresh-456"
        }"#;
        let dto: AuthResponseDto = serde_json::from_str(json).unwrap();
        let user = transform_auth_response(dto);

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Emily Johnson");
        assert_eq!(user.token, "access-123");
        assert_eq!(user.refresh_token.as_deref(), Some("refresh-456"));
        assert_eq!(user.username.as_deref(), Some("emilys"));
    }

    #[test]
    fn test_transform_user_profile_keeps_token() {
        let json = r#"{
            "id": 1,
            "username": "emilys",
            "email": "emily.johnson@x.dummyjson.com",
            "firstName": "Emily",
            "lastName": "Johnson",
            "maidenName": "Smith",
            "age": 28,
            "gender": "female",
            "image": "https://dummyjson.com/icon/emilys/128"
        }"#;
        let dto: UserProfileDto = serde_json::from_str(json).unwrap();
        let user = transform_user_profile(dto, "access-123");

        assert_eq!(user.token, "access-123");
        assert_eq!(user.gender.as_deref(), Some("female"));
        assert_eq!(user.refresh_token, None);
    }
}
