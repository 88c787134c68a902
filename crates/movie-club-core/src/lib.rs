pub mod aggregate;
pub mod enrich;
pub mod feed;
pub mod pages;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregate::{aggregate_movies, front_page_candidates, search_local, LOCAL_SEARCH_LIMIT};
pub use enrich::{fill_missing_movie_info, fill_missing_movie_info_batch};
pub use feed::ReviewFeed;
pub use pages::{FetchToken, PageCache, Section, SectionPager, SectionPhase};
pub use session::Session;
