pub mod analytics;
pub mod payments;
pub mod reviews;
pub mod root;
pub mod sessions;
pub mod spaces;
pub mod users;
