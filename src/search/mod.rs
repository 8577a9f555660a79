//! Tutor post search for TutorHub.
//!
//! The listing takes an optional free-text term and an optional category
//! (major short name), falls back to the full listing when a filter finds
//! nothing, and paginates in memory at five posts per page.

mod repository;

pub use repository::{ListingRepository, ListingRow};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::warn;

use crate::catalog::{CatalogRepository, MajorLists};
use crate::Result;

/// Posts per page.
pub const PAGE_SIZE: usize = 5;

/// Detail text is cut to this many characters in listing previews.
pub const PREVIEW_LENGTH: usize = 100;

/// Timestamp rendering used across listings and the dashboard.
pub const TIMESTAMP_FORMAT: &str = "%a, %b %d %Y %H:%M %p";

/// The four mutually exclusive filter shapes a search request can take.
///
/// Blank-after-trim inputs count as absent, so every (term, category) pair
/// maps to exactly one branch.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterBranch {
    Unfiltered,
    TermOnly { term: String },
    CategoryOnly { category: String },
    TermAndCategory { term: String, category: String },
}

impl FilterBranch {
    /// Classify raw query inputs into a branch.
    pub fn classify(term: &str, category: &str) -> Self {
        let term = term.trim();
        let category = category.trim();
        match (term.is_empty(), category.is_empty()) {
            (true, true) => Self::Unfiltered,
            (false, true) => Self::TermOnly {
                term: term.to_string(),
            },
            (true, false) => Self::CategoryOnly {
                category: category.to_string(),
            },
            (false, false) => Self::TermAndCategory {
                term: term.to_string(),
                category: category.to_string(),
            },
        }
    }

    /// True when any filter is active (fallback applies only then).
    pub fn is_filtered(&self) -> bool {
        !matches!(self, Self::Unfiltered)
    }
}

/// One rendered listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub post_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub course_number: String,
    pub course_title: String,
    pub major_short_name: String,
    pub details: String,
    /// True when `details` was cut to the preview length.
    pub previewed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: String,
}

impl From<ListingRow> for SearchResult {
    fn from(row: ListingRow) -> Self {
        let (details, previewed) = preview(&row.details);
        Self {
            post_id: row.post_id,
            first_name: row.first_name,
            last_name: row.last_name,
            course_number: row.course_number,
            course_title: row.course_title,
            major_short_name: row.major_short_name,
            details,
            previewed,
            thumbnail: row.thumbnail.map(|bytes| STANDARD.encode(bytes)),
            created_at: row.created_at.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// One page of search results plus pagination bookkeeping.
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    pub results: Vec<SearchResult>,
    pub page: usize,
    pub total_pages: usize,
    pub total_results: usize,
    /// 1-indexed position of the first result on this page (0 when empty).
    pub lower_bound: usize,
    /// 1-indexed position of the last result on this page.
    pub upper_bound: usize,
    /// Set when a filtered search found nothing and the full listing was
    /// substituted.
    pub no_results_found: bool,
}

/// Run a search end to end: classify, query, fall back, paginate.
pub async fn run_search(
    pool: &SqlitePool,
    term: &str,
    category: &str,
    page: usize,
) -> Result<SearchPage> {
    let branch = FilterBranch::classify(term, category);
    let repo = ListingRepository::new(pool);

    let mut rows = repo.fetch(&branch).await?;
    let mut no_results_found = false;

    if rows.is_empty() && branch.is_filtered() {
        no_results_found = true;
        rows = repo.fetch(&FilterBranch::Unfiltered).await?;
    }

    Ok(paginate(rows, page, no_results_found))
}

/// Slice rows into the requested page.
///
/// Bounds are clamped so a page past the end yields an empty slice rather
/// than an error or a panic.
pub fn paginate(rows: Vec<ListingRow>, page: usize, no_results_found: bool) -> SearchPage {
    let page = page.max(1);
    let total = rows.len();
    let total_pages = total.div_ceil(PAGE_SIZE);

    let start = ((page - 1) * PAGE_SIZE).min(total);
    let end = (start + PAGE_SIZE).min(total);

    let results: Vec<SearchResult> = rows
        .into_iter()
        .skip(start)
        .take(end - start)
        .map(SearchResult::from)
        .collect();

    SearchPage {
        page,
        total_pages,
        total_results: total,
        lower_bound: if results.is_empty() { 0 } else { start + 1 },
        upper_bound: end,
        no_results_found,
        results,
    }
}

/// Categories for the search dropdown.
///
/// A storage failure here degrades to empty lists with a warning; the
/// listing page still renders.
pub async fn list_categories(pool: &SqlitePool) -> MajorLists {
    match CatalogRepository::new(pool).major_lists().await {
        Ok(lists) => lists,
        Err(e) => {
            warn!("Failed to load search categories: {}", e);
            MajorLists::default()
        }
    }
}

fn preview(details: &str) -> (String, bool) {
    let mut chars = details.chars();
    let cut: String = chars.by_ref().take(PREVIEW_LENGTH).collect();
    if chars.next().is_some() {
        (cut, true)
    } else {
        (details.to_string(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn row(post_id: i64, details: &str) -> ListingRow {
        ListingRow {
            post_id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            course_number: "415".to_string(),
            course_title: "Operating Systems".to_string(),
            major_short_name: "CSC".to_string(),
            details: details.to_string(),
            thumbnail: None,
            created_at: NaiveDateTime::parse_from_str("2024-05-01 14:30:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        }
    }

    #[test]
    fn test_classify_branches() {
        assert_eq!(FilterBranch::classify("", ""), FilterBranch::Unfiltered);
        assert_eq!(FilterBranch::classify("  ", " "), FilterBranch::Unfiltered);
        assert_eq!(
            FilterBranch::classify("calculus", ""),
            FilterBranch::TermOnly {
                term: "calculus".to_string()
            }
        );
        assert_eq!(
            FilterBranch::classify("", "CSC"),
            FilterBranch::CategoryOnly {
                category: "CSC".to_string()
            }
        );
        assert_eq!(
            FilterBranch::classify(" 415 ", "CSC"),
            FilterBranch::TermAndCategory {
                term: "415".to_string(),
                category: "CSC".to_string()
            }
        );
    }

    #[test]
    fn test_paginate_page_two_of_seven() {
        let rows: Vec<ListingRow> = (1..=7).map(|i| row(i, "details")).collect();

        let page = paginate(rows, 2, false);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.lower_bound, 6);
        assert_eq!(page.upper_bound, 7);
        assert_eq!(page.results[0].post_id, 6);
        assert_eq!(page.results[1].post_id, 7);
    }

    #[test]
    fn test_paginate_out_of_range_page_is_empty() {
        let rows: Vec<ListingRow> = (1..=7).map(|i| row(i, "details")).collect();

        let page = paginate(rows, 9, false);
        assert!(page.results.is_empty());
        assert_eq!(page.lower_bound, 0);
        assert_eq!(page.upper_bound, 7);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_paginate_empty_listing() {
        let page = paginate(Vec::new(), 1, false);
        assert!(page.results.is_empty());
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.lower_bound, 0);
        assert_eq!(page.upper_bound, 0);
    }

    #[test]
    fn test_paginate_page_zero_treated_as_one() {
        let rows: Vec<ListingRow> = (1..=3).map(|i| row(i, "details")).collect();
        let page = paginate(rows, 0, false);
        assert_eq!(page.page, 1);
        assert_eq!(page.results.len(), 3);
        assert_eq!(page.lower_bound, 1);
    }

    #[test]
    fn test_preview_truncation() {
        let long = "x".repeat(150);
        let result = SearchResult::from(row(1, &long));
        assert_eq!(result.details.chars().count(), 100);
        assert!(result.previewed);

        let short = SearchResult::from(row(2, "short details"));
        assert_eq!(short.details, "short details");
        assert!(!short.previewed);
    }

    #[test]
    fn test_preview_is_char_safe() {
        let details = "é".repeat(120);
        let result = SearchResult::from(row(1, &details));
        assert_eq!(result.details.chars().count(), 100);
        assert!(result.previewed);
    }

    #[test]
    fn test_timestamp_format() {
        let result = SearchResult::from(row(1, "details"));
        assert_eq!(result.created_at, "Wed, May 01 2024 14:30 PM");
    }

    #[test]
    fn test_thumbnail_base64() {
        let mut r = row(1, "details");
        r.thumbnail = Some(vec![1, 2, 3]);
        let result = SearchResult::from(r);
        assert_eq!(result.thumbnail.as_deref(), Some("AQID"));

        let result = SearchResult::from(row(2, "details"));
        assert!(result.thumbnail.is_none());
    }

    #[tokio::test]
    async fn test_run_search_fallback_flag() {
        let db = crate::db::Database::open_in_memory().await.unwrap();
        for sql in [
            "INSERT INTO majors (short_name, long_name) VALUES ('CSC', 'Computer Science')",
            "INSERT INTO courses (major_id, number, title) VALUES (1, '415', 'Operating Systems')",
            "INSERT INTO users (email, password_hash, password_salt, first_name, last_name, major_id)
             VALUES ('a@x.com', 'h', 's', 'Ada', 'Lovelace', 1)",
            "INSERT INTO tutor_posts (user_id, course_id, details, admin_approved)
             VALUES (1, 1, 'OS tutoring', 1)",
        ] {
            sqlx::query(sql).execute(db.pool()).await.unwrap();
        }

        let page = run_search(db.pool(), "zzz-no-match", "", 1).await.unwrap();
        assert!(page.no_results_found);
        assert_eq!(page.results.len(), 1);

        let page = run_search(db.pool(), "Ada", "", 1).await.unwrap();
        assert!(!page.no_results_found);
        assert_eq!(page.results.len(), 1);
    }

    #[tokio::test]
    async fn test_list_categories() {
        let db = crate::db::Database::open_in_memory().await.unwrap();
        sqlx::query("INSERT INTO majors (short_name, long_name) VALUES ('CSC', 'Computer Science')")
            .execute(db.pool())
            .await
            .unwrap();

        let lists = list_categories(db.pool()).await;
        assert_eq!(lists.short_names, vec!["CSC"]);
        assert_eq!(lists.long_names, vec!["Computer Science"]);
    }
}
