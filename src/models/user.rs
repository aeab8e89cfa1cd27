use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

lazy_static! {
    // Digits with optional leading +, spaces, dashes and parentheses.
    static ref PHONE_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9][0-9 \-()]{5,18}$").unwrap();
}

/// A user record as stored and as returned by the API.
///
/// The password hash lives only in the `users` table and in
/// [`AuthRow`](crate::store::users::AuthRow); it is never part of this
/// struct, so no response can serialize it.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub is_admin: bool,
    pub date_joined: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Input payload for `PUT /user/`.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = "PHONE_REGEX", message = "invalid phone number"))]
    pub phone: Option<String>,
    #[validate(length(min = 6))]
    pub password: String,
    /// Admin accounts are created through the same endpoint with this flag.
    #[serde(default)]
    pub is_admin: bool,
}

/// The abbreviated user shape embedded in the task-listing envelope.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct UserSummary {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn base_input() -> UserInput {
        UserInput {
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone: Some("+1 555-0100".to_string()),
            password: "password123".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_user_input_validation() {
        assert!(base_input().validate().is_ok());

        let mut input = base_input();
        input.email = "invalid-email".to_string();
        assert!(input.validate().is_err());

        let mut input = base_input();
        input.password = "short".to_string();
        assert!(input.validate().is_err());

        let mut input = base_input();
        input.name = "".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_phone_is_optional_but_checked_when_present() {
        let mut input = base_input();
        input.phone = None;
        assert!(input.validate().is_ok());

        let mut input = base_input();
        input.phone = Some("not a phone".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_is_admin_defaults_to_false() {
        let input: UserInput = serde_json::from_value(serde_json::json!({
            "name": "Plain User",
            "email": "plain@example.com",
            "phone": "5550100",
            "password": "password123"
        }))
        .unwrap();
        assert!(!input.is_admin);
    }

    #[test]
    fn test_user_never_serializes_a_password() {
        let user = User {
            id: 1,
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            phone: None,
            is_admin: false,
            date_joined: Utc::now(),
            updated_date: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("password"));
    }
}
