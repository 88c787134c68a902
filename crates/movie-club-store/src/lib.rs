pub mod db;
pub mod error;
pub mod reviews;
pub mod users;
pub mod watched;

pub use db::Database;
pub use error::StoreError;
pub use reviews::{ReviewStore, ReviewSubscription, ALL_MOVIES, RECENT_REVIEWS_LIMIT};
pub use users::UserStore;
pub use watched::WatchedStore;
