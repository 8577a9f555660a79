//! Database schema and migrations for TutorHub.
//!
//! This module contains all database migrations that will be applied
//! sequentially when the database is first opened or upgraded.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: users table
    r#"
-- Users table for authentication and profile data.
-- The UNIQUE constraint on email is load-bearing: duplicate registration
-- safety under concurrent requests depends on it, not on the
-- check-then-insert in the application layer.
CREATE TABLE users (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    email          TEXT NOT NULL UNIQUE,
    password_hash  TEXT NOT NULL,           -- PBKDF2-HMAC-SHA256, hex
    password_salt  TEXT NOT NULL,           -- 128 random bytes, base64
    first_name     TEXT NOT NULL,
    last_name      TEXT NOT NULL,
    major_id       INTEGER NOT NULL REFERENCES majors(id),
    created_at     TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_users_email ON users(email);
"#,
    // v2: major / course catalog
    r#"
-- Majors are the search categories; short_name is the stable filter key.
CREATE TABLE majors (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    short_name  TEXT NOT NULL UNIQUE,
    long_name   TEXT NOT NULL
);

CREATE TABLE courses (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    major_id    INTEGER NOT NULL REFERENCES majors(id),
    number      TEXT NOT NULL,
    title       TEXT NOT NULL
);

CREATE INDEX idx_courses_major_id ON courses(major_id);
"#,
    // v3: tutor posts
    r#"
-- Tutor posts; only rows with admin_approved = 1 are publicly visible.
CREATE TABLE tutor_posts (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id         INTEGER NOT NULL REFERENCES users(id),
    course_id       INTEGER NOT NULL REFERENCES courses(id),
    details         TEXT NOT NULL,
    image           BLOB,
    thumbnail       BLOB,
    admin_approved  INTEGER NOT NULL DEFAULT 0,
    created_at      TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_tutor_posts_user_id ON tutor_posts(user_id);
CREATE INDEX idx_tutor_posts_course_id ON tutor_posts(course_id);
CREATE INDEX idx_tutor_posts_created_at ON tutor_posts(created_at);
CREATE INDEX idx_tutor_posts_admin_approved ON tutor_posts(admin_approved);
"#,
    // v4: messages
    r#"
-- Directed messages between users, toggled read/unread from the dashboard.
CREATE TABLE messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    from_user   INTEGER NOT NULL REFERENCES users(id),
    to_user     INTEGER NOT NULL REFERENCES users(id),
    body        TEXT NOT NULL,
    is_read     INTEGER NOT NULL DEFAULT 0,
    sent_at     TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX idx_messages_to_user ON messages(to_user);
CREATE INDEX idx_messages_sent_at ON messages(sent_at);
"#,
];
