use super::effects::Effect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArchiveVisibility {
    #[default]
    Hidden,
    Visible,
}

impl ArchiveVisibility {
    pub fn from_non_empty(non_empty: bool) -> Self {
        if non_empty {
            Self::Visible
        } else {
            Self::Hidden
        }
    }

    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Archive entry state derived from chat list membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArchiveState {
    visibility: ArchiveVisibility,
    title: Option<String>,
    open: bool,
}

/// Inputs read from collaborators when a membership event is evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipInputs {
    pub archive_non_empty: bool,
    pub title: Option<String>,
    /// Main pane scroll offset at the moment of the event.
    pub main_scroll_top: u32,
    /// Amount to nudge the main pane by when the archive entry appears.
    pub panel_height: u32,
}

impl ArchiveState {
    pub fn visibility(&self) -> ArchiveVisibility {
        self.visibility
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Seeds visibility from the startup snapshot. Emits nothing.
    pub fn on_cache_loaded(&self, has_archive: bool, title: Option<String>) -> Self {
        Self {
            visibility: ArchiveVisibility::from_non_empty(has_archive),
            title,
            open: self.open,
        }
    }

    pub fn on_membership_changed(&self, inputs: MembershipInputs) -> (Self, Vec<Effect>) {
        let next = ArchiveVisibility::from_non_empty(inputs.archive_non_empty);
        let mut effects = Vec::new();

        match (self.visibility, next) {
            (ArchiveVisibility::Hidden, ArchiveVisibility::Visible) => {
                if inputs.main_scroll_top > 0 {
                    effects.push(Effect::ScrollMainBy(inputs.panel_height));
                }
            }
            (ArchiveVisibility::Visible, ArchiveVisibility::Hidden) => {
                effects.push(Effect::CloseArchive);
            }
            _ => {}
        }

        let state = Self {
            visibility: next,
            title: inputs.title,
            open: self.open,
        };

        (state, effects)
    }

    /// Ordering changes never alter visibility, only the title.
    pub fn on_ordering_changed(&self, title: Option<String>) -> Self {
        Self {
            title,
            ..self.clone()
        }
    }

    pub fn on_open_changed(&self, open: bool) -> (Self, Vec<Effect>) {
        let effects = if self.open == open {
            Vec::new()
        } else {
            vec![Effect::SetArchiveOpen(open)]
        };

        (Self { open, ..self.clone() }, effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(archive_non_empty: bool, main_scroll_top: u32) -> MembershipInputs {
        MembershipInputs {
            archive_non_empty,
            title: archive_non_empty.then(|| "Old news".to_owned()),
            main_scroll_top,
            panel_height: 68,
        }
    }

    fn visible() -> ArchiveState {
        ArchiveState::default().on_cache_loaded(true, Some("Old news".to_owned()))
    }

    #[test]
    fn default_state_is_hidden_without_title() {
        let state = ArchiveState::default();

        assert_eq!(state.visibility(), ArchiveVisibility::Hidden);
        assert_eq!(state.title(), None);
        assert!(!state.is_open());
    }

    #[test]
    fn visible_to_hidden_emits_single_close_notification() {
        let (state, effects) = visible().on_membership_changed(inputs(false, 120));

        assert_eq!(state.visibility(), ArchiveVisibility::Hidden);
        assert_eq!(state.title(), None);
        assert_eq!(effects, vec![Effect::CloseArchive]);
    }

    #[test]
    fn same_state_transitions_emit_nothing_but_refresh_title() {
        let (state, effects) = visible().on_membership_changed(MembershipInputs {
            title: Some("Old news, Memes".to_owned()),
            ..inputs(true, 0)
        });
        assert!(effects.is_empty());
        assert_eq!(state.title(), Some("Old news, Memes"));

        let (state, effects) = ArchiveState::default().on_membership_changed(inputs(false, 40));
        assert!(effects.is_empty());
        assert_eq!(state.visibility(), ArchiveVisibility::Hidden);
    }

    #[test]
    fn hidden_to_visible_nudges_scrolled_main_pane() {
        let (state, effects) = ArchiveState::default().on_membership_changed(inputs(true, 15));

        assert!(state.visibility().is_visible());
        assert_eq!(effects, vec![Effect::ScrollMainBy(68)]);
    }

    #[test]
    fn hidden_to_visible_at_top_does_not_scroll() {
        let (_, effects) = ArchiveState::default().on_membership_changed(inputs(true, 0));

        assert!(effects.is_empty());
    }

    #[test]
    fn ordering_change_keeps_visibility() {
        let state = visible().on_ordering_changed(Some("(2) Old news".to_owned()));

        assert!(state.visibility().is_visible());
        assert_eq!(state.title(), Some("(2) Old news"));
    }

    #[test]
    fn open_change_is_reported_once() {
        let (open, effects) = ArchiveState::default().on_open_changed(true);
        assert_eq!(effects, vec![Effect::SetArchiveOpen(true)]);

        let (still_open, effects) = open.on_open_changed(true);
        assert!(effects.is_empty());
        assert!(still_open.is_open());
    }
}
