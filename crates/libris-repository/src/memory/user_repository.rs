//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use libris_core::{LibrisError, LibrisResult, PageRequest, User, UserId};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
struct Store {
    rows: BTreeMap<UserId, User>,
    last_id: i64,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.rows
            .values()
            .any(|u| Some(u.id) != except && u.email.eq_ignore_ascii_case(email))
    }
}

fn duplicate_email(email: &str) -> LibrisError {
    LibrisError::conflict(format!("Email already registered: {}", email))
}

/// User repository keeping rows in process memory.
///
/// Enforces the same unique e-mail constraint as the SQL schema.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.read().rows.len()
    }

    /// Returns true when no user is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> LibrisResult<Option<User>> {
        Ok(self.store.read().rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> LibrisResult<Option<User>> {
        Ok(self
            .store
            .read()
            .rows
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_all_with_pagination(&self, page: PageRequest) -> LibrisResult<Vec<User>> {
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(self
            .store
            .read()
            .rows
            .values()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn save(&self, user: &User) -> LibrisResult<User> {
        let mut store = self.store.write();
        if store.email_taken(&user.email, None) {
            return Err(duplicate_email(&user.email));
        }
        store.last_id += 1;
        let saved = user.clone().with_id(UserId::new(store.last_id));
        store.rows.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, user: &User) -> LibrisResult<User> {
        let mut store = self.store.write();
        if store.email_taken(&user.email, Some(user.id)) {
            return Err(duplicate_email(&user.email));
        }
        match store.rows.get_mut(&user.id) {
            Some(row) => {
                *row = user.clone();
                Ok(user.clone())
            }
            None => Err(LibrisError::not_found("User", user.id)),
        }
    }

    async fn delete(&self, id: UserId) -> LibrisResult<bool> {
        Ok(self.store.write().rows.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::Role;

    #[tokio::test]
    async fn test_save_and_find_by_email() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(&User::new("ada@example.com", "hash")).await.unwrap();
        assert_eq!(saved.id, UserId::new(1));

        let found = repo.find_by_email("ADA@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, saved.id);
        assert_eq!(found.roles(), &[Role::User]);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.save(&User::new("ada@example.com", "hash")).await.unwrap();
        let err = repo.save(&User::new("Ada@Example.com", "hash")).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_conflicts() {
        let repo = InMemoryUserRepository::new();
        repo.save(&User::new("ada@example.com", "hash")).await.unwrap();
        let mut grace = repo.save(&User::new("grace@example.com", "hash")).await.unwrap();

        grace.email = "ada@example.com".to_string();
        assert!(matches!(repo.update(&grace).await, Err(LibrisError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_email() {
        let repo = InMemoryUserRepository::new();
        let mut ada = repo.save(&User::new("ada@example.com", "hash")).await.unwrap();
        ada.password = "new-hash".to_string();
        let updated = repo.update(&ada).await.unwrap();
        assert_eq!(updated.password, "new-hash");
    }

    #[tokio::test]
    async fn test_pagination_and_delete() {
        let repo = InMemoryUserRepository::new();
        for i in 0..5 {
            repo.save(&User::new(format!("u{i}@example.com"), "hash")).await.unwrap();
        }
        let page = repo
            .find_all_with_pagination(PageRequest::new(2, 2))
            .await
            .unwrap();
        assert_eq!(
            page.iter().map(|u| u.email.as_str()).collect::<Vec<_>>(),
            vec!["u2@example.com", "u3@example.com"]
        );

        assert!(repo.delete(UserId::new(3)).await.unwrap());
        assert!(repo.find_by_id(UserId::new(3)).await.unwrap().is_none());
    }
}
