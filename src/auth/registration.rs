//! Registration flow for TutorHub.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogRepository;
use crate::db::{NewUser, User, UserRepository};
use crate::TutorHubError;

use super::password::{self, PasswordError};

/// Registration errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// The email is already registered.
    #[error("an account with this email already exists")]
    DuplicateUser,

    /// The submitted major does not exist in the catalog.
    #[error("unknown major")]
    UnknownMajor,

    /// The password failed validation.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// A field failed validation.
    #[error("{0}")]
    Invalid(String),

    /// Storage-level failure.
    #[error(transparent)]
    Storage(#[from] TutorHubError),
}

/// Input for a registration attempt.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub major_short_name: String,
}

fn require_non_empty(value: &str, field: &str) -> Result<(), RegistrationError> {
    if value.trim().is_empty() {
        return Err(RegistrationError::Invalid(format!("{field} is required")));
    }
    Ok(())
}

/// Register a new user.
///
/// Duplicates are checked up front for a friendly error, but the real
/// guarantee is the UNIQUE constraint on the email column; a race between
/// two concurrent registrations loses at the insert and is mapped back to
/// [`RegistrationError::DuplicateUser`].
pub async fn register(pool: &SqlitePool, request: RegistrationRequest) -> Result<User, RegistrationError> {
    require_non_empty(&request.email, "email")?;
    require_non_empty(&request.first_name, "first name")?;
    require_non_empty(&request.last_name, "last name")?;

    let users = UserRepository::new(pool);
    if users.email_exists(&request.email).await? {
        return Err(RegistrationError::DuplicateUser);
    }

    let major_id = CatalogRepository::new(pool)
        .major_id_by_short_name(&request.major_short_name)
        .await?
        .ok_or(RegistrationError::UnknownMajor)?;

    let creds = password::hash_for_registration(&request.password)?;

    let new_user = NewUser {
        email: request.email,
        password_hash: creds.hash,
        password_salt: creds.salt,
        first_name: request.first_name,
        last_name: request.last_name,
        major_id,
    };

    let user = match users.create(&new_user).await {
        Ok(user) => user,
        Err(TutorHubError::Database(msg)) if msg.contains("UNIQUE") => {
            return Err(RegistrationError::DuplicateUser);
        }
        Err(e) => return Err(e.into()),
    };

    info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO majors (short_name, long_name) VALUES ('CSC', 'Computer Science')")
            .execute(db.pool())
            .await
            .unwrap();
        db
    }

    fn sample_request() -> RegistrationRequest {
        RegistrationRequest {
            email: "new@example.edu".to_string(),
            password: "a-fine-password".to_string(),
            first_name: "New".to_string(),
            last_name: "Student".to_string(),
            major_short_name: "CSC".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let db = setup_db().await;

        let user = register(db.pool(), sample_request()).await.unwrap();
        assert_eq!(user.email, "new@example.edu");
        assert_eq!(user.major_id, 1);
        // Credentials were derived, not stored raw.
        assert_ne!(user.password_hash, "a-fine-password");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = setup_db().await;

        register(db.pool(), sample_request()).await.unwrap();
        let err = register(db.pool(), sample_request()).await.unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateUser));
    }

    #[tokio::test]
    async fn test_unknown_major_rejected() {
        let db = setup_db().await;

        let mut request = sample_request();
        request.major_short_name = "NOPE".to_string();

        let err = register(db.pool(), request).await.unwrap_err();
        assert!(matches!(err, RegistrationError::UnknownMajor));
    }

    #[tokio::test]
    async fn test_short_password_rejected() {
        let db = setup_db().await;

        let mut request = sample_request();
        request.password = "short".to_string();

        let err = register(db.pool(), request).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Password(_)));
    }

    #[tokio::test]
    async fn test_empty_name_rejected() {
        let db = setup_db().await;

        let mut request = sample_request();
        request.first_name = "  ".to_string();

        let err = register(db.pool(), request).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Invalid(_)));
    }
}
