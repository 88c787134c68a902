use std::collections::HashSet;

use movie_club_catalog::MovieCatalog;
use movie_club_models::{Movie, MovieResponse};
use tracing::warn;

use crate::pages::{PageCache, Section, SectionPager};

/// Result cap for search-as-you-type over the local candidate set. The
/// server-side search is the escape hatch for anything beyond this.
pub const LOCAL_SEARCH_LIMIT: usize = 6;

/// Union all cached pages plus any single non-paginated fetch into one
/// candidate set, deduplicated by movie id. First occurrence wins: a movie
/// appearing in several sections (or on overlapping pages) contributes
/// exactly one entry.
pub fn aggregate_movies<'a>(
    pages: impl IntoIterator<Item = &'a MovieResponse>,
    extra: impl IntoIterator<Item = &'a Movie>,
) -> Vec<Movie> {
    let mut seen = HashSet::new();
    let mut aggregated = Vec::new();

    let candidates = pages
        .into_iter()
        .flat_map(|response| response.results.iter())
        .chain(extra);

    for movie in candidates {
        if seen.insert(movie.id) {
            aggregated.push(movie.clone());
        }
    }
    aggregated
}

/// Load the first page of every front-page section through its fetch
/// machine, reusing pages the cache already holds, and aggregate everything
/// into one deduplicated candidate set for the local search. A failing
/// section is skipped; the others still contribute.
pub async fn front_page_candidates(
    catalog: &dyn MovieCatalog,
    cache: &mut PageCache,
) -> Vec<Movie> {
    for section in Section::ALL {
        if cache.get(section, 1).is_some() {
            continue;
        }

        let mut pager = SectionPager::new(section);
        let token = pager.begin_fetch();
        let result = match section {
            Section::Popular => catalog.popular(1).await,
            Section::TopRated => catalog.top_rated(1).await,
            Section::Upcoming => catalog.upcoming(1).await,
        };
        match result {
            Ok(response) => {
                if pager.commit(token, Ok(response.clone())) {
                    cache.insert(section, 1, response);
                }
            }
            Err(e) => {
                warn!("Could not load {} candidates: {}", section.name(), e);
                pager.commit(token, Err(e.to_string()));
            }
        }
    }

    aggregate_movies(cache.pages(), [])
}

/// Case-insensitive substring match on title or overview, capped. An empty
/// or whitespace query yields no results rather than the whole candidate
/// set.
pub fn search_local<'a>(candidates: &'a [Movie], query: &str, cap: usize) -> Vec<&'a Movie> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|movie| {
            movie.title.to_lowercase().contains(&query)
                || movie.overview.to_lowercase().contains(&query)
        })
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_movie, FakeCatalog};

    fn response(ids: &[(u64, &str)]) -> MovieResponse {
        MovieResponse {
            page: 1,
            results: ids.iter().map(|(id, t)| fake_movie(*id, t)).collect(),
            total_pages: 1,
            total_results: ids.len() as u32,
        }
    }

    #[test]
    fn test_aggregate_dedupes_by_id_first_wins() {
        let popular = response(&[(1, "Dune"), (2, "Alien")]);
        let top_rated = response(&[(2, "Alien (otra página)"), (3, "Heat")]);

        let aggregated = aggregate_movies([&popular, &top_rated], []);
        assert_eq!(aggregated.len(), 3);
        let dup = aggregated.iter().find(|m| m.id == 2).unwrap();
        // First occurrence wins
        assert_eq!(dup.title, "Alien");
    }

    #[test]
    fn test_aggregate_includes_extra_fetch() {
        let popular = response(&[(1, "Dune")]);
        let hero = fake_movie(9, "Destacada");
        let duplicate_hero = fake_movie(1, "Dune otra vez");

        let aggregated = aggregate_movies([&popular], [&hero, &duplicate_hero]);
        assert_eq!(aggregated.len(), 2);
        assert!(aggregated.iter().any(|m| m.id == 9));
    }

    #[test]
    fn test_search_local_matches_title_and_overview() {
        let mut with_overview = fake_movie(3, "Otra cosa");
        with_overview.overview = "Un clásico del DESIERTO de Arrakis".to_string();
        let candidates = vec![fake_movie(1, "Dune"), fake_movie(2, "Alien"), with_overview];

        let by_title = search_local(&candidates, "dune", LOCAL_SEARCH_LIMIT);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, 1);

        let by_overview = search_local(&candidates, "desierto", LOCAL_SEARCH_LIMIT);
        assert_eq!(by_overview.len(), 1);
        assert_eq!(by_overview[0].id, 3);
    }

    #[test]
    fn test_search_local_empty_query_and_cap() {
        let candidates: Vec<Movie> = (1..=10).map(|id| fake_movie(id, "Dune")).collect();

        assert!(search_local(&candidates, "   ", LOCAL_SEARCH_LIMIT).is_empty());
        assert_eq!(search_local(&candidates, "dune", LOCAL_SEARCH_LIMIT).len(), 6);
    }

    #[tokio::test]
    async fn test_front_page_candidates_aggregate_and_reuse_cache() {
        let catalog = FakeCatalog::new()
            .with_listing(
                Section::Popular,
                vec![fake_movie(1, "Dune"), fake_movie(2, "Alien")],
            )
            .with_listing(
                Section::TopRated,
                vec![fake_movie(2, "Alien"), fake_movie(3, "Heat")],
            );

        let mut cache = PageCache::new();
        let candidates = front_page_candidates(&catalog, &mut cache).await;
        assert_eq!(candidates.len(), 3);
        assert_eq!(catalog.listing_calls(), 3);

        // Fresh cached pages satisfy the next call without refetching
        let again = front_page_candidates(&catalog, &mut cache).await;
        assert_eq!(again.len(), 3);
        assert_eq!(catalog.listing_calls(), 3);
    }

    #[tokio::test]
    async fn test_front_page_candidates_skip_failing_section() {
        let catalog = FakeCatalog::new()
            .with_listing(Section::Popular, vec![fake_movie(1, "Dune")])
            .with_broken_listing(Section::TopRated)
            .with_listing(Section::Upcoming, vec![fake_movie(4, "Arrival")]);

        let mut cache = PageCache::new();
        let candidates = front_page_candidates(&catalog, &mut cache).await;
        assert_eq!(candidates.len(), 2);

        // The local search runs over whatever did load
        let hits = search_local(&candidates, "arrival", LOCAL_SEARCH_LIMIT);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 4);
    }

    #[tokio::test]
    async fn test_server_search_escape_hatch() {
        let catalog = FakeCatalog::new()
            .with_search_results(vec![fake_movie(1, "Dune"), fake_movie(2, "Dune: Part Two")]);

        let response = catalog.search("dune", 1).await.unwrap();
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.page, 1);
    }
}
