use movie_club_models::{MovieDetails, User};

/// Application state shared by the view layer: the signed-in identity, the
/// currently selected movie and the search-modal flag. An explicit
/// container passed by reference to whatever needs it; nothing here is a
/// process-wide singleton and nothing does I/O.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<User>,
    selected_movie: Option<MovieDetails>,
    search_open: bool,
    loading: bool,
    error: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
        self.loading = false;
    }

    pub fn logout(&mut self) {
        self.user = None;
        self.error = None;
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Whether the signed-in user may edit/delete the given review author's
    /// content. This gating is the only ownership boundary in the system.
    pub fn owns_review(&self, author_id: &str) -> bool {
        self.user.as_ref().map(|u| u.uid == author_id).unwrap_or(false)
    }

    pub fn selected_movie(&self) -> Option<&MovieDetails> {
        self.selected_movie.as_ref()
    }

    pub fn select_movie(&mut self, movie: MovieDetails) {
        self.selected_movie = Some(movie);
    }

    pub fn clear_selected_movie(&mut self) {
        self.selected_movie = None;
    }

    pub fn search_open(&self) -> bool {
        self.search_open
    }

    pub fn set_search_open(&mut self, open: bool) {
        self.search_open = open;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
        self.loading = false;
    }
}
