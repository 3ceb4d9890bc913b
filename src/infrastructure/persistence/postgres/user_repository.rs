use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::RepositoryError,
  ports::UserRepository,
  value_objects::{Email, Password, UserId},
};

/// PostgreSQL implementation of the UserRepository trait
///
/// Every call is bounded by `query_timeout`. Email uniqueness is enforced by the
/// `users_email_key` unique index, so a lost insert race surfaces as
/// `RepositoryError::DuplicateKey`.
pub struct PostgresUserRepository {
  pool: PgPool,
  query_timeout: Duration,
}

impl PostgresUserRepository {
  pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self::with_timeout(pool, Self::DEFAULT_QUERY_TIMEOUT)
  }

  pub fn with_timeout(pool: PgPool, query_timeout: Duration) -> Self {
    Self {
      pool,
      query_timeout,
    }
  }

  async fn bounded<T, F>(&self, query: F) -> Result<T, RepositoryError>
  where
    F: Future<Output = Result<T, sqlx::Error>>,
  {
    match tokio::time::timeout(self.query_timeout, query).await {
      Ok(result) => result.map_err(RepositoryError::from),
      Err(_) => {
        tracing::warn!("User query exceeded {:?}", self.query_timeout);
        Err(RepositoryError::Timeout(self.query_timeout))
      }
    }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  email: String,
  password_hash: String,
  name: String,
  phone_number: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
  type Error = RepositoryError;

  fn try_from(row: UserRow) -> Result<Self, Self::Error> {
    let email = Email::new(&row.email).map_err(|e| {
      RepositoryError::CorruptData(format!("user {} has invalid email: {}", row.id, e))
    })?;

    Ok(User::from_db(
      UserId::from_uuid(row.id),
      email,
      Password::from_hash(row.password_hash),
      row.name,
      row.phone_number,
      row.created_at,
      row.updated_at,
    ))
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create_user(&self, user: &User) -> Result<(), RepositoryError> {
    let query = sqlx::query(
      r#"
            INSERT INTO users (
                id,
                email,
                password_hash,
                name,
                phone_number,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
    )
    .bind(user.id().into_inner())
    .bind(user.email().as_str())
    .bind(user.password().hash())
    .bind(user.name())
    .bind(user.phone_number())
    .bind(user.created_at())
    .bind(user.updated_at())
    .execute(&self.pool);

    self.bounded(query).await?;
    Ok(())
  }

  async fn find_by_email(&self, email: &Email) -> Result<User, RepositoryError> {
    let query = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                phone_number,
                created_at,
                updated_at
            FROM users
            WHERE email = $1
            "#,
    )
    .bind(email.as_str())
    .fetch_optional(&self.pool);

    match self.bounded(query).await? {
      Some(row) => row.try_into(),
      None => Err(RepositoryError::NotFound),
    }
  }

  async fn find_by_id(&self, id: &UserId) -> Result<User, RepositoryError> {
    let query = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                phone_number,
                created_at,
                updated_at
            FROM users
            WHERE id = $1
            "#,
    )
    .bind(id.into_inner())
    .fetch_optional(&self.pool);

    match self.bounded(query).await? {
      Some(row) => row.try_into(),
      None => Err(RepositoryError::NotFound),
    }
  }

  async fn update_password(
    &self,
    id: &UserId,
    password: &Password,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let query = sqlx::query(
      r#"
            UPDATE users
            SET
                password_hash = $2,
                updated_at = $3
            WHERE id = $1
            "#,
    )
    .bind(id.into_inner())
    .bind(password.hash())
    .bind(updated_at)
    .execute(&self.pool);

    self.bounded(query).await?;
    Ok(())
  }

  async fn update_profile(
    &self,
    id: &UserId,
    name: &str,
    phone_number: Option<&str>,
    updated_at: DateTime<Utc>,
  ) -> Result<(), RepositoryError> {
    let query = sqlx::query(
      r#"
            UPDATE users
            SET
                name = $2,
                phone_number = $3,
                updated_at = $4
            WHERE id = $1
            "#,
    )
    .bind(id.into_inner())
    .bind(name)
    .bind(phone_number)
    .bind(updated_at)
    .execute(&self.pool);

    self.bounded(query).await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::security::Argon2PasswordHasher;
  use sqlx::postgres::PgPoolOptions;
  use std::sync::Arc;
  use testcontainers::ImageExt;
  use testcontainers_modules::postgres::Postgres;
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  async fn setup_test_db() -> (PgPool, ContainerAsync<Postgres>) {
    // Start a PostgreSQL container
    let container = Postgres::default()
      .with_tag("16-alpine")
      .start()
      .await
      .expect("Failed to start postgres container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(5432)
      .await
      .expect("Failed to get port");
    let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

    let pool = PgPoolOptions::new()
      .max_connections(10)
      .connect(&database_url)
      .await
      .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .expect("Failed to run migrations");

    (pool, container)
  }

  fn user(email: &str, name: &str) -> User {
    let hasher = Argon2PasswordHasher::for_tests();
    User::new(
      Email::new(email).unwrap(),
      Password::new("password123", &hasher).unwrap(),
      name,
      Some("+1 555 0100".to_string()),
    )
    .unwrap()
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_create_and_find_user() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);
    let user = user("test@example.com", "Test User");

    repo.create_user(&user).await.unwrap();

    let by_email = repo.find_by_email(user.email()).await.unwrap();
    assert_eq!(by_email.id(), user.id());
    assert_eq!(by_email.name(), "Test User");
    assert_eq!(by_email.phone_number(), Some("+1 555 0100"));
    assert_eq!(by_email.password().hash(), user.password().hash());

    let by_id = repo.find_by_id(user.id()).await.unwrap();
    assert_eq!(by_id.email(), user.email());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_long_profile_fields_are_stored() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);
    let hasher = Argon2PasswordHasher::for_tests();
    let long_email = format!("{}@example.com", "a".repeat(300));
    let mut user = User::new(
      Email::new(&long_email).unwrap(),
      Password::new("password123", &hasher).unwrap(),
      "N".repeat(400),
      Some("1".repeat(40)),
    )
    .unwrap();

    repo.create_user(&user).await.unwrap();
    user
      .update_profile("M".repeat(500), Some("2".repeat(64)))
      .unwrap();
    repo
      .update_profile(user.id(), user.name(), user.phone_number(), user.updated_at())
      .await
      .unwrap();

    let stored = repo.find_by_email(user.email()).await.unwrap();
    assert_eq!(stored.email().as_str(), long_email);
    assert_eq!(stored.name(), "M".repeat(500));
    assert_eq!(stored.phone_number(), Some("2".repeat(64).as_str()));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_missing_user_is_not_found() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    let by_id = repo.find_by_id(&UserId::new()).await;
    let by_email = repo
      .find_by_email(&Email::new("nobody@example.com").unwrap())
      .await;

    assert!(matches!(by_id, Err(RepositoryError::NotFound)));
    assert!(matches!(by_email, Err(RepositoryError::NotFound)));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_duplicate_email() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);

    repo
      .create_user(&user("duplicate@example.com", "User One"))
      .await
      .unwrap();
    let result = repo
      .create_user(&user("duplicate@example.com", "User Two"))
      .await;

    assert!(matches!(result, Err(RepositoryError::DuplicateKey(_))));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_concurrent_duplicate_inserts_have_one_winner() {
    let (pool, _container) = setup_test_db().await;
    let repo = Arc::new(PostgresUserRepository::new(pool));

    let handles: Vec<_> = (0..8)
      .map(|i| {
        let repo = repo.clone();
        let candidate = user("race@example.com", &format!("Racer {}", i));
        tokio::spawn(async move { repo.create_user(&candidate).await })
      })
      .collect();

    let mut successes = 0;
    for handle in handles {
      match handle.await.unwrap() {
        Ok(()) => successes += 1,
        Err(e) => assert!(matches!(e, RepositoryError::DuplicateKey(_))),
      }
    }

    assert_eq!(successes, 1);
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_update_password_and_profile() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool);
    let hasher = Argon2PasswordHasher::for_tests();
    let original = user("update@example.com", "Update User");
    repo.create_user(&original).await.unwrap();

    let later = original.created_at() + chrono::Duration::seconds(5);
    let new_password = Password::new("new-password-456", &hasher).unwrap();
    repo
      .update_password(original.id(), &new_password, later)
      .await
      .unwrap();
    repo
      .update_profile(original.id(), "Updated Name", None, later)
      .await
      .unwrap();

    let stored = repo.find_by_id(original.id()).await.unwrap();
    assert!(stored.verify_password("new-password-456", &hasher).is_ok());
    assert_eq!(stored.name(), "Updated Name");
    assert_eq!(stored.phone_number(), None);
    assert!(stored.updated_at() > stored.created_at());
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_corrupt_email_is_reported() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::new(pool.clone());
    let id = Uuid::new_v4();

    sqlx::query(
      "INSERT INTO users (id, email, password_hash, name, created_at, updated_at)
       VALUES ($1, 'not-an-email', 'hash', 'Broken', NOW(), NOW())",
    )
    .bind(id)
    .execute(&pool)
    .await
    .unwrap();

    let result = repo.find_by_id(&UserId::from_uuid(id)).await;

    assert!(matches!(result, Err(RepositoryError::CorruptData(_))));
  }

  #[tokio::test]
  #[ignore = "requires Docker"]
  async fn test_query_timeout() {
    let (pool, _container) = setup_test_db().await;
    let repo = PostgresUserRepository::with_timeout(pool, Duration::from_millis(50));

    let result = repo
      .bounded(sqlx::query("SELECT pg_sleep(1)").execute(&repo.pool))
      .await;

    assert!(matches!(result, Err(RepositoryError::Timeout(_))));
  }
}
