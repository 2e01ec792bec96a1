use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user. The password is kept exactly as supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(username: String, email: String, password: String) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            username,
            email,
            password,
            created_at: Utc::now(),
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_gets_fresh_id_and_no_update_marker() {
        let a = User::new("alice".into(), "alice@example.com".into(), "secret".into());
        let b = User::new("alice".into(), "alice@example.com".into(), "secret".into());

        assert_ne!(a.user_id, b.user_id);
        assert!(a.updated_at.is_none());
        assert_eq!(a.password, "secret");
    }

    #[test]
    fn password_is_never_serialized() {
        let user = User::new("bob".into(), "bob@example.com".into(), "hunter2".into());
        let json = serde_json::to_value(&user).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "bob");
    }
}
