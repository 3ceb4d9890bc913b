use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::RepositoryError;
use crate::domain::auth::ports::UserRepository;
use crate::domain::auth::value_objects::{Email, Password, UserId};

#[derive(Default)]
struct Store {
  users: HashMap<UserId, User>,
  ids_by_email: HashMap<Email, UserId>,
}

/// Process-local user repository for tests and single-node development.
///
/// The uniqueness check and the insert happen under one write lock, so
/// concurrent registrations for one email see exactly one winner.
#[derive(Default)]
pub struct InMemoryUserRepository {
  store: RwLock<Store>,
}

impl InMemoryUserRepository {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of stored users
  pub async fn len(&self) -> usize {
    self.store.read().await.users.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.len().await == 0
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
    let mut store = self.store.write().await;

    if store.ids_by_email.contains_key(user.email()) {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()));
    }
    if store.users.contains_key(user.id()) {
      return Err(RepositoryError::DuplicateKey("users_pkey".to_string()));
    }

    store.ids_by_email.insert(user.email().clone(), *user.id());
    store.users.insert(*user.id(), user.clone());
    Ok(())
  }

  async fn find_by_email(&self, email: &Email) -> Result<User, RepositoryError> {
    let store = self.store.read().await;

    store
      .ids_by_email
      .get(email)
      .and_then(|id| store.users.get(id))
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
    self
      .store
      .read()
      .await
      .users
      .get(id)
      .cloned()
      .ok_or(RepositoryError::NotFound)
  }

  async fn update_password(
    &self,
    id: &UserId,
    password: &Password,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let mut store = self.store.write().await;

    // Missing ids are a silent no-op, matching an UPDATE that touches zero rows
    if let Some(user) = store.users.get_mut(id) {
      *user = User::from_db(
        *user.id(),
        user.email().clone(),
        password.clone(),
        user.name().to_string(),
        user.phone_number().map(str::to_string),
        user.created_at(),
        updated_at,
      );
    }
    Ok(())
  }

  async fn update_profile(
    &self,
    id: &UserId,
    name: &str,
    phone_number: Option<&str>,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let mut store = self.store.write().await;

    if let Some(user) = store.users.get_mut(id) {
      *user = User::from_db(
        *user.id(),
        user.email().clone(),
        user.password().clone(),
        name.to_string(),
        phone_number.map(str::to_string),
        user.created_at(),
        updated_at,
      );
    }
    Ok(())
  }
}
