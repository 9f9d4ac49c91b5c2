use super::{
    chat::{ChatId, MessageId},
    effects::Effect,
};

/// Lifecycle of the inline search overlay.
///
/// Target and text live inside `Open`, so a closed session can never carry them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchSession {
    #[default]
    Closed,
    Open {
        /// Chat to search within, `None` for a global search.
        target: Option<ChatId>,
        text: Option<String>,
        /// Query pushed into the header input by the last external request.
        pending_query: Option<String>,
    },
}

impl SearchSession {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn target(&self) -> Option<ChatId> {
        match self {
            Self::Open { target, .. } => *target,
            Self::Closed => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Open { text, .. } => text.as_deref(),
            Self::Closed => None,
        }
    }

    /// External request to search `query` within `chat_id`.
    ///
    /// Repeating the request for the session already showing it is a no-op.
    pub fn request(&self, chat_id: Option<ChatId>, query: &str) -> (Self, Vec<Effect>) {
        if let Self::Open {
            target,
            text,
            pending_query,
        } = self
        {
            let same_query =
                pending_query.as_deref() == Some(query) || text.as_deref() == Some(query);
            if *target == chat_id && same_query {
                return (self.clone(), Vec::new());
            }
        }

        let next = Self::Open {
            target: chat_id,
            text: None,
            pending_query: Some(query.to_owned()),
        };

        (next, vec![Effect::ApplySearchQuery(query.to_owned())])
    }

    pub fn change_text(&self, new_text: String) -> Self {
        match self {
            Self::Open { target, .. } => Self::Open {
                target: *target,
                text: Some(new_text),
                pending_query: None,
            },
            Self::Closed => Self::Closed,
        }
    }

    /// Header toggle: both directions start from a clean session.
    pub fn toggle(&self, open: bool) -> Self {
        if open {
            Self::Open {
                target: None,
                text: None,
                pending_query: None,
            }
        } else {
            Self::Closed
        }
    }

    /// Navigation always happens; the overlay only survives with `keep_open`.
    pub fn select_result(
        &self,
        chat_id: ChatId,
        message_id: Option<MessageId>,
        keep_open: bool,
    ) -> (Self, Vec<Effect>) {
        let next = if keep_open {
            self.clone()
        } else {
            Self::Closed
        };

        (next, vec![Effect::OpenChat { chat_id, message_id }])
    }

    pub fn close(&self) -> Self {
        Self::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_opens_session_with_empty_text_and_defers_query() {
        let (session, effects) = SearchSession::Closed.request(Some(9), "hello");

        assert!(session.is_open());
        assert_eq!(session.target(), Some(9));
        assert_eq!(session.text(), None);
        assert_eq!(effects, vec![Effect::ApplySearchQuery("hello".to_owned())]);
    }

    #[test]
    fn repeated_request_is_idempotent() {
        let (session, _) = SearchSession::Closed.request(Some(5), "abc");

        let (again, effects) = session.request(Some(5), "abc");

        assert_eq!(again, session);
        assert!(effects.is_empty());
    }

    #[test]
    fn request_matching_typed_text_is_idempotent() {
        let (session, _) = SearchSession::Closed.request(Some(5), "abc");
        let session = session.change_text("abc".to_owned());

        let (again, effects) = session.request(Some(5), "abc");

        assert_eq!(again.text(), Some("abc"));
        assert!(effects.is_empty());
    }

    #[test]
    fn request_with_other_target_restarts_session() {
        let (session, _) = SearchSession::Closed.request(Some(5), "abc");
        let session = session.change_text("abcd".to_owned());

        let (restarted, effects) = session.request(Some(6), "abc");

        assert_eq!(restarted.target(), Some(6));
        assert_eq!(restarted.text(), None);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn change_text_clears_pending_query() {
        let (session, _) = SearchSession::Closed.request(None, "abc");

        let session = session.change_text("xyz".to_owned());

        assert_eq!(
            session,
            SearchSession::Open {
                target: None,
                text: Some("xyz".to_owned()),
                pending_query: None,
            }
        );
    }

    #[test]
    fn change_text_while_closed_keeps_session_closed() {
        let session = SearchSession::Closed.change_text("abc".to_owned());

        assert_eq!(session, SearchSession::Closed);
        assert_eq!(session.text(), None);
    }

    #[test]
    fn select_without_keep_open_navigates_and_closes() {
        let (session, _) = SearchSession::Closed.request(Some(3), "report");

        let (session, effects) = session.select_result(7, Some(42), false);

        assert_eq!(session, SearchSession::Closed);
        assert_eq!(
            effects,
            vec![Effect::OpenChat {
                chat_id: 7,
                message_id: Some(42),
            }]
        );
    }

    #[test]
    fn select_with_keep_open_preserves_target_and_text() {
        let (session, _) = SearchSession::Closed.request(Some(3), "report");
        let session = session.change_text("report q3".to_owned());

        let (kept, effects) = session.select_result(7, None, true);

        assert_eq!(kept, session);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn toggle_always_starts_clean() {
        let (session, _) = SearchSession::Closed.request(Some(3), "report");

        let reopened = session.toggle(true);

        assert!(reopened.is_open());
        assert_eq!(reopened.target(), None);
        assert_eq!(session.toggle(false), SearchSession::Closed);
    }
}
