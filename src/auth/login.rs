//! Login flow for TutorHub.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::db::{User, UserRepository};

use super::password;
use super::session::{SessionError, SessionStore};

/// Attempt to authenticate a user and bind them to a session.
///
/// Lookup is by exact email match. Every failure path collapses to
/// [`SessionError::InvalidCredentials`] so a caller cannot distinguish an
/// unknown email from a wrong password.
pub async fn attempt_login(
    pool: &SqlitePool,
    sessions: &SessionStore,
    token: &str,
    email: &str,
    entered_password: &str,
) -> Result<User, SessionError> {
    let repo = UserRepository::new(pool);

    let user = match repo.get_by_email(email).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Login failed: unknown email");
            return Err(SessionError::InvalidCredentials);
        }
        Err(e) => {
            debug!("Login failed: storage error: {}", e);
            return Err(SessionError::InvalidCredentials);
        }
    };

    if !password::verify(&user.password_hash, &user.password_salt, entered_password) {
        debug!("Login failed: password mismatch for user {}", user.id);
        return Err(SessionError::InvalidCredentials);
    }

    sessions.login(token, user.id, &user.first_name).await?;
    info!("User {} logged in", user.id);

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_for_registration;
    use crate::db::{Database, NewUser};

    async fn setup() -> (Database, SessionStore, String) {
        let db = Database::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO majors (short_name, long_name) VALUES ('CS', 'Computer Science')")
            .execute(db.pool())
            .await
            .unwrap();

        let creds = hash_for_registration("hunter2-hunter2").unwrap();
        UserRepository::new(db.pool())
            .create(&NewUser {
                email: "ada@example.edu".to_string(),
                password_hash: creds.hash,
                password_salt: creds.salt,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                major_id: 1,
            })
            .await
            .unwrap();

        let sessions = SessionStore::default();
        let token = sessions.create().await;
        (db, sessions, token)
    }

    #[tokio::test]
    async fn test_successful_login() {
        let (db, sessions, token) = setup().await;

        let user = attempt_login(
            db.pool(),
            &sessions,
            &token,
            "ada@example.edu",
            "hunter2-hunter2",
        )
        .await
        .unwrap();
        assert_eq!(user.first_name, "Ada");

        let viewer = sessions.viewer(&token).await.unwrap();
        assert!(viewer.login_validated);
        assert_eq!(viewer.user_id, Some(user.id));
    }

    #[tokio::test]
    async fn test_wrong_password_is_generic() {
        let (db, sessions, token) = setup().await;

        let err = attempt_login(db.pool(), &sessions, &token, "ada@example.edu", "wrong-pass")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid credentials");
    }

    #[tokio::test]
    async fn test_unknown_email_is_generic() {
        let (db, sessions, token) = setup().await;

        let err = attempt_login(
            db.pool(),
            &sessions,
            &token,
            "nobody@example.edu",
            "hunter2-hunter2",
        )
        .await
        .unwrap_err();

        // Identical message to the wrong-password case.
        assert_eq!(err.to_string(), "invalid credentials");
        assert!(!sessions.viewer(&token).await.unwrap().login_validated);
    }

    #[tokio::test]
    async fn test_email_match_is_exact() {
        let (db, sessions, token) = setup().await;

        let result = attempt_login(
            db.pool(),
            &sessions,
            &token,
            "ADA@EXAMPLE.EDU",
            "hunter2-hunter2",
        )
        .await;
        assert!(matches!(result, Err(SessionError::InvalidCredentials)));
    }
}
