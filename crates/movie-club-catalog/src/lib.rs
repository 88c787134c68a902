pub mod client;
pub mod error;
pub mod images;
pub mod traits;

pub use client::{TmdbClient, TmdbSettings};
pub use error::CatalogError;
pub use images::image_url;
pub use traits::MovieCatalog;
