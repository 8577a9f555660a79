//! Storage queries for the tutor post listing.

use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::{Result, TutorHubError};

use super::FilterBranch;

/// One joined row from the listing query, before post-processing.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ListingRow {
    pub post_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub course_number: String,
    pub course_title: String,
    pub major_short_name: String,
    pub details: String,
    pub thumbnail: Option<Vec<u8>>,
    pub created_at: NaiveDateTime,
}

const LISTING_SELECT: &str = "\
SELECT p.id AS post_id,
       u.first_name,
       u.last_name,
       c.number AS course_number,
       c.title AS course_title,
       m.short_name AS major_short_name,
       p.details,
       p.thumbnail,
       p.created_at
FROM tutor_posts p
JOIN users u ON u.id = p.user_id
JOIN courses c ON c.id = p.course_id
JOIN majors m ON m.id = c.major_id";

// Free-text term matching: author names, course title and number, major
// short name, and the four major-number concatenations tutors are usually
// searched by ("CSC 415", "CSC415", "Computer Science 415", ...).
const TERM_PREDICATES: &str = "\
(u.first_name LIKE ?1
 OR u.last_name LIKE ?1
 OR c.title LIKE ?1
 OR c.number LIKE ?1
 OR m.short_name LIKE ?1
 OR (m.short_name || ' ' || c.number) LIKE ?1
 OR (m.short_name || c.number) LIKE ?1
 OR (m.long_name || ' ' || c.number) LIKE ?1
 OR (m.long_name || c.number) LIKE ?1)";

const ORDER: &str = "ORDER BY p.created_at DESC, p.id DESC";

/// Repository for listing queries over approved tutor posts.
pub struct ListingRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ListingRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Fetch approved posts for the given filter branch, newest first.
    ///
    /// Every branch is a fixed, fully parameterized statement; user input
    /// only ever travels through bind values.
    pub async fn fetch(&self, branch: &FilterBranch) -> Result<Vec<ListingRow>> {
        let rows = match branch {
            FilterBranch::Unfiltered => {
                let sql = format!("{LISTING_SELECT} WHERE p.admin_approved = 1 {ORDER}");
                sqlx::query_as::<_, ListingRow>(&sql)
                    .fetch_all(self.pool)
                    .await
            }
            FilterBranch::TermOnly { term } => {
                let sql = format!(
                    "{LISTING_SELECT} WHERE p.admin_approved = 1 AND {TERM_PREDICATES} {ORDER}"
                );
                sqlx::query_as::<_, ListingRow>(&sql)
                    .bind(like_pattern(term))
                    .fetch_all(self.pool)
                    .await
            }
            FilterBranch::CategoryOnly { category } => {
                let sql = format!(
                    "{LISTING_SELECT} WHERE p.admin_approved = 1 AND m.short_name = ?1 {ORDER}"
                );
                sqlx::query_as::<_, ListingRow>(&sql)
                    .bind(category)
                    .fetch_all(self.pool)
                    .await
            }
            FilterBranch::TermAndCategory { term, category } => {
                let sql = format!(
                    "{LISTING_SELECT} WHERE p.admin_approved = 1 AND m.short_name = ?2 \
                     AND {TERM_PREDICATES} {ORDER}"
                );
                sqlx::query_as::<_, ListingRow>(&sql)
                    .bind(like_pattern(term))
                    .bind(category)
                    .fetch_all(self.pool)
                    .await
            }
        };

        rows.map_err(|e| TutorHubError::Database(e.to_string()))
    }
}

fn like_pattern(term: &str) -> String {
    format!("%{term}%")
}
