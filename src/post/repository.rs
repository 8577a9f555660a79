//! Storage layer for tutor posts.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::{Result, TutorHubError};

/// A tutor post joined with its author and course for detail pages.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct TutorPostDetail {
    pub post_id: i64,
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub course_number: String,
    pub course_title: String,
    pub major_short_name: String,
    pub details: String,
    pub image: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
}

/// Data for inserting a new tutor post.
#[derive(Debug, Clone)]
pub struct NewTutorPost {
    pub user_id: i64,
    pub course_id: i64,
    pub details: String,
    pub image: Option<Vec<u8>>,
    pub thumbnail: Option<Vec<u8>>,
}

const DETAIL_SELECT: &str = "\
SELECT p.id AS post_id,
       p.user_id,
       u.first_name,
       u.last_name,
       c.number AS course_number,
       c.title AS course_title,
       m.short_name AS major_short_name,
       p.details,
       p.image,
       p.created_at
FROM tutor_posts p
JOIN users u ON u.id = p.user_id
JOIN courses c ON c.id = p.course_id
JOIN majors m ON m.id = c.major_id";

/// Repository for tutor post writes and detail reads.
pub struct PostRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> PostRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new post. Posts start unapproved and invisible.
    pub async fn create(&self, post: &NewTutorPost) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO tutor_posts (user_id, course_id, details, image, thumbnail, admin_approved)
             VALUES (?, ?, ?, ?, ?, 0)",
        )
        .bind(post.user_id)
        .bind(post.course_id)
        .bind(&post.details)
        .bind(&post.image)
        .bind(&post.thumbnail)
        .execute(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(result.last_insert_rowid())
    }

    /// Fetch an approved post by id. Unapproved posts read as missing.
    pub async fn get_approved_by_id(&self, post_id: i64) -> Result<Option<TutorPostDetail>> {
        let sql = format!("{DETAIL_SELECT} WHERE p.id = ? AND p.admin_approved = 1");
        let row = sqlx::query_as::<_, TutorPostDetail>(&sql)
            .bind(post_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(row)
    }

    /// Flip the approval flag on a post.
    pub async fn set_approved(&self, post_id: i64, approved: bool) -> Result<()> {
        sqlx::query("UPDATE tutor_posts SET admin_approved = ? WHERE id = ?")
            .bind(approved)
            .bind(post_id)
            .execute(self.pool)
            .await
            .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    async fn setup_db() -> Database {
        let db = Database::open_in_memory().await.unwrap();
        for sql in [
            "INSERT INTO majors (short_name, long_name) VALUES ('CSC', 'Computer Science')",
            "INSERT INTO courses (major_id, number, title) VALUES (1, '415', 'Operating Systems')",
            "INSERT INTO users (email, password_hash, password_salt, first_name, last_name, major_id)
             VALUES ('a@x.com', 'h', 's', 'Ada', 'Lovelace', 1)",
        ] {
            sqlx::query(sql).execute(db.pool()).await.unwrap();
        }
        db
    }

    fn sample_post() -> NewTutorPost {
        NewTutorPost {
            user_id: 1,
            course_id: 1,
            details: "I can help with schedulers".to_string(),
            image: None,
            thumbnail: None,
        }
    }

    #[tokio::test]
    async fn test_new_post_starts_unapproved() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let id = repo.create(&sample_post()).await.unwrap();
        assert!(repo.get_approved_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_approved_post_visible() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());

        let id = repo.create(&sample_post()).await.unwrap();
        repo.set_approved(id, true).await.unwrap();

        let detail = repo.get_approved_by_id(id).await.unwrap().unwrap();
        assert_eq!(detail.first_name, "Ada");
        assert_eq!(detail.course_number, "415");
        assert_eq!(detail.major_short_name, "CSC");
    }

    #[tokio::test]
    async fn test_missing_post_is_none() {
        let db = setup_db().await;
        let repo = PostRepository::new(db.pool());
        assert!(repo.get_approved_by_id(999).await.unwrap().is_none());
    }
}
