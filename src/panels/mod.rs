//! The three independently loadable dashboard panels.
//!
//! Each panel owns a [`PanelState`] and a request generation. `begin`/`open`
//! moves the panel to Loading and hands out a generation; `complete` applies a
//! fetch result only when its generation is still the latest one, so a slow
//! response can never overwrite a newer request.

mod articles;
mod discussion;
mod tone_modal;

pub use articles::{
    ArticleEvent, ArticleListPanel, ArticleRow, ARTICLES_EMPTY_MESSAGE, ARTICLES_FAILED_MESSAGE,
};
pub use discussion::{DiscussionFeedPanel, PostView, BODY_PREVIEW_CHARS, NO_POSTS_MESSAGE};
pub use tone_modal::{ModalState, ToneModalPanel, NO_TONE_DATA_MESSAGE, TONE_ERROR_MESSAGE};

/// Load state shared by the list panels.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> PanelState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            PanelState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PanelState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Advance a request counter and return the new value.
fn next_generation(generation: &mut u64) -> u64 {
    *generation = generation.wrapping_add(1);
    *generation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_state_accessors() {
        let loaded: PanelState<Vec<u8>> = PanelState::Loaded(vec![1]);
        assert_eq!(loaded.loaded(), Some(&vec![1]));
        assert!(loaded.error().is_none());

        let failed: PanelState<Vec<u8>> = PanelState::Error("boom".into());
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());

        assert!(PanelState::<()>::Loading.is_loading());
        assert_eq!(PanelState::<()>::default(), PanelState::Idle);
    }

    #[test]
    fn test_next_generation_increments() {
        let mut g = 0;
        assert_eq!(next_generation(&mut g), 1);
        assert_eq!(next_generation(&mut g), 2);
        let mut wrap = u64::MAX;
        assert_eq!(next_generation(&mut wrap), 0);
    }
}
