use std::collections::HashMap;
use std::time::{Duration, Instant};

use movie_club_models::MovieResponse;
use tracing::debug;

/// Paginated front-page sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Popular,
    TopRated,
    Upcoming,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Popular, Section::TopRated, Section::Upcoming];

    pub fn name(&self) -> &'static str {
        match self {
            Section::Popular => "popular",
            Section::TopRated => "top_rated",
            Section::Upcoming => "upcoming",
        }
    }
}

const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

struct CachedPage {
    response: MovieResponse,
    fetched_at: Instant,
}

/// Keyed request cache: one entry per (section, page). A hit older than the
/// stale-time does not satisfy `get`, but its data still participates in
/// aggregation until overwritten.
pub struct PageCache {
    entries: HashMap<(Section, u32), CachedPage>,
    stale_after: Duration,
}

impl PageCache {
    pub fn new() -> Self {
        Self::with_stale_after(DEFAULT_STALE_AFTER)
    }

    pub fn with_stale_after(stale_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
        }
    }

    pub fn get(&self, section: Section, page: u32) -> Option<&MovieResponse> {
        let entry = self.entries.get(&(section, page))?;
        if entry.fetched_at.elapsed() >= self.stale_after {
            debug!("Stale cache entry: {} page {}", section.name(), page);
            return None;
        }
        Some(&entry.response)
    }

    pub fn insert(&mut self, section: Section, page: u32, response: MovieResponse) {
        self.entries.insert(
            (section, page),
            CachedPage {
                response,
                fetched_at: Instant::now(),
            },
        );
    }

    /// Every cached page, fresh or stale, for aggregation.
    pub fn pages(&self) -> impl Iterator<Item = &MovieResponse> {
        self.entries.values().map(|e| &e.response)
    }

    pub fn invalidate(&mut self, section: Section) {
        self.entries.retain(|(s, _), _| *s != section);
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Ticket for one in-flight fetch. Only the latest ticket per section may
/// commit its result; superseded responses are discarded instead of
/// overwriting fresher state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken {
    section: Section,
    seq: u64,
}

/// Fetch lifecycle of one section.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionPhase {
    Idle,
    Loading,
    Success(MovieResponse),
    Error(String),
}

/// Per-section pagination state: current 1-based page plus the
/// idle → loading → success|error machine, re-entering loading on every
/// page change. Cyclic for the life of the view.
pub struct SectionPager {
    section: Section,
    page: u32,
    phase: SectionPhase,
    latest_seq: u64,
}

impl SectionPager {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            page: 1,
            phase: SectionPhase::Idle,
            latest_seq: 0,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn phase(&self) -> &SectionPhase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, SectionPhase::Loading)
    }

    pub fn total_pages(&self) -> Option<u32> {
        match &self.phase {
            SectionPhase::Success(response) => Some(response.total_pages),
            _ => None,
        }
    }

    /// Enter loading for a fetch of the current page.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.latest_seq += 1;
        self.phase = SectionPhase::Loading;
        FetchToken {
            section: self.section,
            seq: self.latest_seq,
        }
    }

    /// Change page and begin the corresponding fetch. Pages are 1-based;
    /// zero is clamped to one.
    pub fn set_page(&mut self, page: u32) -> FetchToken {
        self.page = page.max(1);
        self.begin_fetch()
    }

    /// Commit a fetch outcome. Responses from superseded tokens are
    /// discarded and the method reports whether the commit took effect.
    pub fn commit(
        &mut self,
        token: FetchToken,
        result: Result<MovieResponse, String>,
    ) -> bool {
        if token.section != self.section || token.seq != self.latest_seq {
            debug!(
                "Discarding stale response for {} (token {} < {})",
                self.section.name(),
                token.seq,
                self.latest_seq
            );
            return false;
        }

        self.phase = match result {
            Ok(response) => SectionPhase::Success(response),
            Err(message) => SectionPhase::Error(message),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_movie;

    fn response(page: u32, ids: &[u64]) -> MovieResponse {
        MovieResponse {
            page,
            results: ids.iter().map(|id| fake_movie(*id, "Movie")).collect(),
            total_pages: 10,
            total_results: 200,
        }
    }

    #[test]
    fn test_cache_hit_and_miss() {
        let mut cache = PageCache::new();
        assert!(cache.get(Section::Popular, 1).is_none());

        cache.insert(Section::Popular, 1, response(1, &[1, 2]));
        assert_eq!(cache.get(Section::Popular, 1).unwrap().results.len(), 2);
        // Same page of another section is a distinct key
        assert!(cache.get(Section::TopRated, 1).is_none());
    }

    #[test]
    fn test_cache_stale_entries_do_not_hit() {
        let mut cache = PageCache::with_stale_after(Duration::ZERO);
        cache.insert(Section::Popular, 1, response(1, &[1]));
        assert!(cache.get(Section::Popular, 1).is_none());
        // Stale pages still feed aggregation
        assert_eq!(cache.pages().count(), 1);
    }

    #[test]
    fn test_invalidate_clears_one_section() {
        let mut cache = PageCache::new();
        cache.insert(Section::Popular, 1, response(1, &[1]));
        cache.insert(Section::Popular, 2, response(2, &[2]));
        cache.insert(Section::Upcoming, 1, response(1, &[3]));

        cache.invalidate(Section::Popular);
        assert!(cache.get(Section::Popular, 1).is_none());
        assert!(cache.get(Section::Upcoming, 1).is_some());
    }

    #[test]
    fn test_pager_phase_cycle() {
        let mut pager = SectionPager::new(Section::Popular);
        assert_eq!(*pager.phase(), SectionPhase::Idle);

        let token = pager.begin_fetch();
        assert!(pager.is_loading());

        assert!(pager.commit(token, Ok(response(1, &[1]))));
        assert_eq!(pager.total_pages(), Some(10));

        // Page change re-enters loading
        let token = pager.set_page(2);
        assert!(pager.is_loading());
        assert!(pager.commit(token, Err("Error TMDB: 500".to_string())));
        assert!(matches!(pager.phase(), SectionPhase::Error(_)));
    }

    #[test]
    fn test_stale_response_cannot_overwrite_newer_state() {
        let mut pager = SectionPager::new(Section::Popular);
        let first = pager.begin_fetch();
        let second = pager.set_page(2);

        // The newer request resolves first
        assert!(pager.commit(second, Ok(response(2, &[20]))));

        // The superseded response arrives late and must be discarded
        assert!(!pager.commit(first, Ok(response(1, &[10]))));
        match pager.phase() {
            SectionPhase::Success(r) => assert_eq!(r.page, 2),
            other => panic!("unexpected phase: {:?}", other),
        }
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut pager = SectionPager::new(Section::TopRated);
        pager.set_page(0);
        assert_eq!(pager.page(), 1);
    }
}
