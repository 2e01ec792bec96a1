use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::data::user_repository::UserRepository;
use crate::domain::{error::DomainError, parse_id, user::User};
use crate::presentation::dto::{CreateUserRequest, UpdateUserRequest};

/// User lifecycle rules on top of a [`UserRepository`].
///
/// Lookups, updates and deletes of an unknown user are not errors: a lookup
/// yields `None`, update and delete complete without touching the store.
/// The update and delete paths are two separate store calls and are not
/// atomic with respect to each other.
pub struct UserService<R: UserRepository + 'static> {
    repo: Arc<R>,
}

impl<R: UserRepository + 'static> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn create_user(&self, input: CreateUserRequest) -> Result<Uuid, DomainError> {
        // TODO: hash with argon2 before storing, existing rows hold plaintext
        let user = User::new(input.username, input.email, input.password);
        let saved = self.repo.save(user).await?;
        Ok(saved.user_id)
    }

    pub async fn get_user_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        let user_id = parse_id(id)?;
        self.repo.find_by_id(user_id).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        self.repo.find_all().await
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user_by_id(
        &self,
        id: &str,
        patch: UpdateUserRequest,
    ) -> Result<(), DomainError> {
        let user_id = parse_id(id)?;

        let Some(mut user) = self.repo.find_by_id(user_id).await? else {
            debug!(%user_id, "update skipped, user does not exist");
            return Ok(());
        };

        if let Some(username) = patch.username {
            user.username = username;
        }
        if let Some(password) = patch.password {
            user.password = password;
        }

        self.repo.save(user).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let user_id = parse_id(id)?;

        if self.repo.exists_by_id(user_id).await? {
            self.repo.delete_by_id(user_id).await?;
        } else {
            debug!(%user_id, "delete skipped, user does not exist");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::data::user_repository::MockUserRepository;

    fn stored_user() -> User {
        User {
            user_id: Uuid::new_v4(),
            username: "username".to_string(),
            email: "email@email.com".to_string(),
            password: "password".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn create_input() -> CreateUserRequest {
        CreateUserRequest {
            username: "username".to_string(),
            email: "email@email.com".to_string(),
            password: "123".to_string(),
        }
    }

    fn service(repo: MockUserRepository) -> UserService<MockUserRepository> {
        UserService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn create_user_saves_input_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .withf(|user| {
                user.username == "username"
                    && user.email == "email@email.com"
                    && user.password == "123"
                    && user.updated_at.is_none()
            })
            .once()
            .returning(Ok);

        let id = service(repo).create_user(create_input()).await.unwrap();

        assert!(!id.is_nil());
    }

    #[tokio::test]
    async fn create_user_returns_saved_id() {
        let mut repo = MockUserRepository::new();
        let captured = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&captured);
        repo.expect_save().once().returning(move |user| {
            *sink.lock().unwrap() = Some(user.user_id);
            Ok(user)
        });

        let id = service(repo).create_user(create_input()).await.unwrap();

        assert_eq!(Some(id), *captured.lock().unwrap());
    }

    #[tokio::test]
    async fn create_user_mints_distinct_ids() {
        let mut repo = MockUserRepository::new();
        repo.expect_save().times(2).returning(Ok);
        let service = service(repo);

        let first = service.create_user(create_input()).await.unwrap();
        let second = service.create_user(create_input()).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn create_user_propagates_store_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_save()
            .once()
            .returning(|_| Err(DomainError::Internal("connection reset".into())));

        let err = service(repo).create_user(create_input()).await.unwrap_err();

        assert!(matches!(err, DomainError::Internal(msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn get_user_by_id_returns_present_user() {
        let user = stored_user();
        let id = user.user_id;
        let found = user.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .once()
            .returning(move |_| Ok(Some(found.clone())));

        let output = service(repo).get_user_by_id(&id.to_string()).await.unwrap();

        assert_eq!(output, Some(user));
    }

    #[tokio::test]
    async fn get_user_by_id_returns_none_when_absent() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .once()
            .returning(|_| Ok(None));

        let output = service(repo).get_user_by_id(&id.to_string()).await.unwrap();

        assert!(output.is_none());
    }

    #[tokio::test]
    async fn get_user_by_id_rejects_malformed_id_without_store_access() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();

        let err = service(repo).get_user_by_id("42").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[tokio::test]
    async fn list_users_returns_everything_from_store() {
        let users = vec![stored_user(), stored_user()];
        let expected = users.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_all()
            .once()
            .returning(move || Ok(users.clone()));

        let output = service(repo).list_users().await.unwrap();

        assert_eq!(output, expected);
    }

    #[tokio::test]
    async fn list_users_on_empty_store_is_empty() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().once().returning(|| Ok(Vec::new()));

        assert!(service(repo).list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_user_overwrites_username_and_password_only() {
        let user = stored_user();
        let id = user.user_id;
        let original = user.clone();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .once()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_save()
            .withf(move |saved| {
                saved.username == "newUsername"
                    && saved.password == "newPassword"
                    && saved.user_id == original.user_id
                    && saved.email == original.email
                    && saved.created_at == original.created_at
            })
            .once()
            .returning(Ok);

        let patch = UpdateUserRequest {
            username: Some("newUsername".into()),
            password: Some("newPassword".into()),
        };
        service(repo)
            .update_user_by_id(&id.to_string(), patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_user_keeps_fields_missing_from_patch() {
        let user = stored_user();
        let id = user.user_id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_save()
            .withf(|saved| saved.username == "renamed" && saved.password == "password")
            .once()
            .returning(Ok);

        let patch = UpdateUserRequest {
            username: Some("renamed".into()),
            password: None,
        };
        service(repo)
            .update_user_by_id(&id.to_string(), patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_user_is_noop_when_absent() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .with(eq(id))
            .once()
            .returning(|_| Ok(None));
        repo.expect_save().never();

        let patch = UpdateUserRequest {
            username: Some("newUsername".into()),
            password: Some("newPassword".into()),
        };
        service(repo)
            .update_user_by_id(&id.to_string(), patch)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn update_user_propagates_lookup_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(DomainError::Internal("timeout".into())));
        repo.expect_save().never();

        let err = service(repo)
            .update_user_by_id(&Uuid::new_v4().to_string(), UpdateUserRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::Internal(_)));
    }

    #[tokio::test]
    async fn delete_removes_existing_user() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id()
            .with(eq(id))
            .once()
            .returning(|_| Ok(true));
        repo.expect_delete_by_id()
            .with(eq(id))
            .once()
            .returning(|_| Ok(()));

        service(repo).delete_by_id(&id.to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn delete_is_noop_when_absent() {
        let id = Uuid::new_v4();
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id()
            .with(eq(id))
            .once()
            .returning(|_| Ok(false));
        repo.expect_delete_by_id().never();

        service(repo).delete_by_id(&id.to_string()).await.unwrap();
    }

    #[tokio::test]
    async fn update_user_rejects_malformed_id_without_store_access() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().never();
        repo.expect_save().never();

        let err = service(repo)
            .update_user_by_id("zzz", UpdateUserRequest::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidId(raw) if raw == "zzz"));
    }

    #[tokio::test]
    async fn delete_rejects_malformed_id_without_store_access() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id().never();
        repo.expect_delete_by_id().never();

        let err = service(repo).delete_by_id("nope").await.unwrap_err();

        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    /// Store double backed by a map, for sequences of operations.
    #[derive(Default)]
    struct MapStore {
        users: Mutex<HashMap<Uuid, User>>,
        deletes: Mutex<usize>,
    }

    #[async_trait::async_trait]
    impl UserRepository for MapStore {
        async fn save(&self, user: User) -> Result<User, DomainError> {
            self.users.lock().unwrap().insert(user.user_id, user.clone());
            Ok(user)
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
            Ok(self.users.lock().unwrap().get(&id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<User>, DomainError> {
            Ok(self.users.lock().unwrap().values().cloned().collect())
        }

        async fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
            Ok(self.users.lock().unwrap().contains_key(&id))
        }

        async fn delete_by_id(&self, id: Uuid) -> Result<(), DomainError> {
            *self.deletes.lock().unwrap() += 1;
            self.users.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn lifecycle_create_get_list_delete_twice() {
        let store = Arc::new(MapStore::default());
        let service = UserService::new(Arc::clone(&store));

        let mut ids = Vec::new();
        for i in 0..3 {
            let id = service
                .create_user(CreateUserRequest {
                    username: format!("user{i}"),
                    email: format!("user{i}@example.com"),
                    password: "pw".into(),
                })
                .await
                .unwrap();
            ids.push(id);
        }

        let fetched = service
            .get_user_by_id(&ids[1].to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.user_id, ids[1]);
        assert_eq!(fetched.username, "user1");
        assert_eq!(service.list_users().await.unwrap().len(), 3);

        let target = ids[0].to_string();
        service.delete_by_id(&target).await.unwrap();
        service.delete_by_id(&target).await.unwrap();

        assert_eq!(*store.deletes.lock().unwrap(), 1);
        assert!(service.get_user_by_id(&target).await.unwrap().is_none());
        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }
}
