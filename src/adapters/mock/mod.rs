pub mod booking_repository;
pub mod clock;
pub mod comment_repository;
pub mod item_catalog;
pub mod seed;
pub mod user_directory;

pub use booking_repository::BookingRepository;
pub use clock::FixedClock;
pub use comment_repository::CommentRepository;
pub use item_catalog::ItemCatalog;
pub use seed::{seed_demo_data, DemoData};
pub use user_directory::UserDirectory;
