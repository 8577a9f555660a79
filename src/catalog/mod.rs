//! Major and course catalog for TutorHub.
//!
//! Majors double as the search categories; courses feed the tutor-post
//! creation form.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::{Result, TutorHubError};

/// A major (also a search category).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Major {
    pub id: i64,
    pub short_name: String,
    pub long_name: String,
}

/// A course within a major.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Course {
    pub id: i64,
    pub major_id: i64,
    pub number: String,
    pub title: String,
}

/// A course option for the tutor-post form, labeled "MAJOR NUMBER TITLE".
#[derive(Debug, Clone, Serialize)]
pub struct CourseOption {
    pub course_id: i64,
    pub label: String,
}

/// Major lists for the registration form: short and long names in
/// matching order.
#[derive(Debug, Clone, Serialize, Default)]
pub struct MajorLists {
    pub short_names: Vec<String>,
    pub long_names: Vec<String>,
}

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CatalogRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// All majors, ordered by short name.
    pub async fn list_majors(&self) -> Result<Vec<Major>> {
        let majors = sqlx::query_as::<_, Major>(
            "SELECT id, short_name, long_name FROM majors ORDER BY short_name",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(majors)
    }

    /// Major names split into the two parallel lists the registration
    /// form renders.
    pub async fn major_lists(&self) -> Result<MajorLists> {
        let majors = self.list_majors().await?;
        let mut lists = MajorLists::default();
        for major in majors {
            lists.short_names.push(major.short_name);
            lists.long_names.push(major.long_name);
        }
        Ok(lists)
    }

    /// Resolve a major id from its short name (exact match).
    pub async fn major_id_by_short_name(&self, short_name: &str) -> Result<Option<i64>> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM majors WHERE short_name = ?")
            .bind(short_name)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(row.map(|(id,)| id))
    }

    /// Resolve a course id within a major by course number.
    pub async fn course_id(&self, major_id: i64, number: &str) -> Result<Option<i64>> {
        let row: Option<(i64,)> =
            sqlx::query_as("SELECT id FROM courses WHERE major_id = ? AND number = ?")
                .bind(major_id)
                .bind(number)
                .fetch_optional(self.pool)
                .await
                .map_err(|e| TutorHubError::Database(e.to_string()))?;
        Ok(row.map(|(id,)| id))
    }

    /// All courses as form options, labeled "MAJOR NUMBER TITLE" in upper
    /// case, grouped by major then ordered by course number.
    pub async fn course_options(&self) -> Result<Vec<CourseOption>> {
        let rows: Vec<(i64, String, String, String)> = sqlx::query_as(
            "SELECT c.id, m.short_name, c.number, c.title
             FROM courses c
             JOIN majors m ON m.id = c.major_id
             ORDER BY m.short_name, c.number",
        )
        .fetch_all(self.pool)
        .await
        .map_err(|e| TutorHubError::Database(e.to_string()))?;

        Ok(rows
            .into_iter()
            .map(|(course_id, short_name, number, title)| CourseOption {
                course_id,
                label: format!("{short_name} {number} {title}").to_uppercase(),
            })
            .collect())
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
            "INSERT INTO majors (short_name, long_name) VALUES ('MATH', 'Mathematics')",
            "INSERT INTO courses (major_id, number, title) VALUES (1, '415', 'Data Structures')",
            "INSERT INTO courses (major_id, number, title) VALUES (1, '648', 'Software Engineering')",
            "INSERT INTO courses (major_id, number, title) VALUES (2, '226', 'Calculus I')",
        ] {
            sqlx::query(sql).execute(db.pool()).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_list_majors_ordered() {
        let db = setup_db().await;
        let majors = CatalogRepository::new(db.pool()).list_majors().await.unwrap();

        assert_eq!(majors.len(), 2);
        assert_eq!(majors[0].short_name, "CSC");
        assert_eq!(majors[1].short_name, "MATH");
    }

    #[tokio::test]
    async fn test_major_lists_parallel() {
        let db = setup_db().await;
        let lists = CatalogRepository::new(db.pool()).major_lists().await.unwrap();

        assert_eq!(lists.short_names, vec!["CSC", "MATH"]);
        assert_eq!(lists.long_names, vec!["Computer Science", "Mathematics"]);
    }

    #[tokio::test]
    async fn test_major_id_lookup() {
        let db = setup_db().await;
        let repo = CatalogRepository::new(db.pool());

        assert_eq!(repo.major_id_by_short_name("CSC").await.unwrap(), Some(1));
        assert_eq!(repo.major_id_by_short_name("csc").await.unwrap(), None);
        assert_eq!(repo.major_id_by_short_name("BIO").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_course_id_scoped_to_major() {
        let db = setup_db().await;
        let repo = CatalogRepository::new(db.pool());

        assert_eq!(repo.course_id(1, "415").await.unwrap(), Some(1));
        // Course 415 belongs to CSC, not MATH.
        assert_eq!(repo.course_id(2, "415").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_course_options_labeled_uppercase() {
        let db = setup_db().await;
        let options = CatalogRepository::new(db.pool())
            .course_options()
            .await
            .unwrap();

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "CSC 415 DATA STRUCTURES");
        assert_eq!(options[2].label, "MATH 226 CALCULUS I");
    }
}
