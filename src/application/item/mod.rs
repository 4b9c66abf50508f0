mod comment_service;
mod item_summary;

pub use comment_service::add_comment;
pub use item_summary::{compute_item_summary, get_item_summary, list_owner_items};
