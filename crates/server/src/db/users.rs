//! User repository for database operations.

use sqlx::SqlitePool;

use nexus_core::{Identity, Role, UserId, Username};

use super::RepositoryError;

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for user queries that exclude the password hash.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    role: String,
}

impl TryFrom<UserRow> for Identity {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::parse(&row.username).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid username in database: {e}"))
        })?;
        let role = row
            .role
            .parse::<Role>()
            .map_err(|e| RepositoryError::DataCorruption(format!("invalid role in database: {e}")))?;

        Ok(Self {
            id: UserId::new(row.id),
            username,
            role,
        })
    }
}

/// Internal row type for credential lookups during login.
#[derive(Debug, sqlx::FromRow)]
struct CredentialRow {
    id: i64,
    username: String,
    password_hash: String,
    role: String,
}

impl TryFrom<CredentialRow> for StoredCredential {
    type Error = RepositoryError;

    fn try_from(row: CredentialRow) -> Result<Self, Self::Error> {
        let identity = UserRow {
            id: row.id,
            username: row.username,
            role: row.role,
        }
        .try_into()?;

        Ok(Self {
            identity,
            password_hash: row.password_hash,
        })
    }
}

/// A user's identity together with their stored password hash.
///
/// Only the auth service should see this; the hash never leaves the service
/// layer.
#[derive(Debug)]
pub struct StoredCredential {
    pub identity: Identity,
    pub password_hash: String,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        role: Role,
    ) -> Result<Identity, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash, role)
            VALUES (?, ?, ?)
            RETURNING id, username, role
            "#,
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("username already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Look up a user's identity and password hash by username.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_credential(
        &self,
        username: &str,
    ) -> Result<Option<StoredCredential>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id, username, password_hash, role
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get a user by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<Identity>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    #[tokio::test]
    async fn test_create_returns_identity() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let username = Username::parse("alice").unwrap();
        let identity = repo.create(&username, "$2b$10$hash", Role::Merchant).await.unwrap();

        assert_eq!(identity.id, UserId::new(1));
        assert_eq!(identity.username, username);
        assert_eq!(identity.role, Role::Merchant);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_conflict() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let username = Username::parse("alice").unwrap();
        repo.create(&username, "hash-one", Role::Merchant).await.unwrap();

        // Same username with a different role and password still conflicts.
        let err = repo
            .create(&username, "hash-two", Role::Customer)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_credential_round_trips_hash() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let username = Username::parse("bob").unwrap();
        let identity = repo.create(&username, "stored-hash", Role::Customer).await.unwrap();

        let credential = repo.get_credential("bob").await.unwrap().unwrap();
        assert_eq!(credential.identity, identity);
        assert_eq!(credential.password_hash, "stored-hash");

        assert!(repo.get_credential("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let pool = memory_pool().await;
        let repo = UserRepository::new(&pool);

        let username = Username::parse("carol").unwrap();
        let identity = repo.create(&username, "hash", Role::Merchant).await.unwrap();

        let found = repo.get_by_id(identity.id).await.unwrap().unwrap();
        assert_eq!(found, identity);

        assert!(repo.get_by_id(UserId::new(999)).await.unwrap().is_none());
    }
}
