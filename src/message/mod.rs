//! Messaging between users for TutorHub.

mod repository;

pub use repository::{parse_id_list, InboxMessage, MessageRepository};
