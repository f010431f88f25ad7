use serde::{Deserialize, Serialize};

use super::UserId;

/// A registered account
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl User {
    pub fn new(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_round_trips_through_json() {
        let json = r#"{"id":3,"email":"kim@example.com","name":"Kim"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user, User::new(3, "kim@example.com", "Kim"));
    }
}
