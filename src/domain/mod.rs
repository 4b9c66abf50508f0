pub mod booking;
pub mod commands;
pub mod comment;
pub mod errors;
pub mod item;
pub mod state;
pub mod summary;
pub mod value_objects;

pub use booking::{Booking, BookingStatus};
pub use comment::Comment;
pub use errors::*;
pub use item::{Item, User};
pub use state::{BookingPredicate, BookingQuery, BookingRole, BookingState};
pub use summary::{BookingBrief, CommentView, ItemSummary, NextBookingSelection};
pub use value_objects::*;
