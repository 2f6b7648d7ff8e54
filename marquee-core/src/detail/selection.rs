use marquee_model::MovieId;

/// The movie currently opened for detail, if any.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected(MovieId),
}

impl Selection {
    pub fn id(&self) -> Option<&MovieId> {
        match self {
            Selection::Unselected => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_selected(&self, id: &MovieId) -> bool {
        self.id() == Some(id)
    }
}

/// Two-state selection machine. Every method reports whether the selection
/// actually changed, so callers only re-resolve detail on a real transition.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Selection,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`. Selecting the already-selected id is a no-op.
    pub fn select(&mut self, id: MovieId) -> bool {
        if self.current.is_selected(&id) {
            return false;
        }
        self.current = Selection::Selected(id);
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.current == Selection::Unselected {
            return false;
        }
        self.current = Selection::Unselected;
        true
    }

    /// Select `id`, or close it when it is already open.
    pub fn toggle(&mut self, id: MovieId) -> bool {
        if self.current.is_selected(&id) {
            self.clear()
        } else {
            self.select(id)
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn selected_id(&self) -> Option<&MovieId> {
        self.current.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> MovieId {
        MovieId::new(raw).unwrap()
    }

    #[test]
    fn starts_unselected() {
        let state = SelectionState::new();
        assert_eq!(state.current(), &Selection::Unselected);
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn select_then_reselect_is_a_no_op() {
        let mut state = SelectionState::new();
        assert!(state.select(id("tt0133093")));
        assert!(!state.select(id("tt0133093")));
        assert_eq!(state.selected_id(), Some(&id("tt0133093")));
    }

    #[test]
    fn selecting_another_id_transitions() {
        let mut state = SelectionState::new();
        state.select(id("tt0133093"));
        assert!(state.select(id("tt0078748")));
        assert_eq!(state.current(), &Selection::Selected(id("tt0078748")));
    }

    #[test]
    fn clear_reports_whether_anything_changed() {
        let mut state = SelectionState::new();
        assert!(!state.clear());
        state.select(id("tt0133093"));
        assert!(state.clear());
        assert_eq!(state.current(), &Selection::Unselected);
    }

    #[test]
    fn toggle_closes_the_open_movie() {
        let mut state = SelectionState::new();
        assert!(state.toggle(id("tt0133093")));
        assert!(state.toggle(id("tt0133093")));
        assert_eq!(state.current(), &Selection::Unselected);

        state.toggle(id("tt0133093"));
        assert!(state.toggle(id("tt0078748")));
        assert_eq!(state.selected_id(), Some(&id("tt0078748")));
    }
}
