pub mod lite;
pub mod movie;
pub mod review;
pub mod user;
pub mod video;
pub mod watched;

pub use lite::{LiteMovie, LiteMovieResponse};
pub use movie::{Genre, Movie, MovieDetails, MovieResponse};
pub use review::Review;
pub use user::User;
pub use video::{Video, VideoResponse};
pub use watched::WatchedEntry;
