pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use extractors::{AdminIdentity, Identity};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{
    generate_access_token, generate_refresh_token, verify_access_token, verify_refresh_token,
    Claims,
};

/// Payload for `POST /api/token/`: the credential check that starts a session.
#[derive(Debug, Deserialize, Validate)]
pub struct TokenRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Payload for `POST /api/token/refresh/`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response for `POST /api/token/`: the signed credential pair.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    /// Longer-lived token, exchangeable for a new access token.
    pub refresh: String,
    /// Short-lived token carried as `Authorization: Bearer` on API requests.
    pub access: String,
}

/// Response for `POST /api/token/refresh/`.
#[derive(Debug, Serialize, Deserialize)]
pub struct AccessToken {
    pub access: String,
}


#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_token_request_validation() {
        let valid = TokenRequest {
            email: "test@example.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid_email = TokenRequest {
            email: "testexample.com".to_string(),
            password: "password123".to_string(),
        };
        assert!(invalid_email.validate().is_err());

        let empty_password = TokenRequest {
            email: "test@example.com".to_string(),
            password: "".to_string(),
        };
        assert!(empty_password.validate().is_err());
    }
}
