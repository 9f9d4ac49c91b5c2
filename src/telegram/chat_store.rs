use std::{
    collections::HashMap,
    sync::{mpsc, Arc, Mutex},
};

use serde::Deserialize;

use crate::{
    domain::{
        chat::{archive_title, sort_for_display, ChatId, ChatList, ChatSummary},
        events::{ChatUpdate, OrderingCause},
    },
    usecases::contracts::ChatListSource,
};

const CHAT_STORE_UNKNOWN_CHAT: &str = "CHAT_STORE_UNKNOWN_CHAT";

/// Raw change applied to the store; each one is published as a [`ChatUpdate`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreUpdate {
    UpsertChat {
        chat_id: ChatId,
        title: String,
        #[serde(default)]
        list: Option<ChatList>,
        #[serde(default)]
        order: i64,
        #[serde(default)]
        unread_count: u32,
    },
    MoveChat {
        chat_id: ChatId,
        list: Option<ChatList>,
    },
    SetOrder {
        chat_id: ChatId,
        order: i64,
    },
    SetPinned {
        chat_id: ChatId,
        is_pinned: bool,
    },
    SetSponsored {
        chat_id: ChatId,
        is_sponsored: bool,
    },
    SetDraft {
        chat_id: ChatId,
        draft: Option<String>,
    },
    NewMessage {
        chat_id: ChatId,
        preview: String,
        #[serde(default)]
        order: Option<i64>,
        #[serde(default)]
        unread: bool,
    },
}

/// In-process chat store and update bus.
///
/// Subscribers receive every published update in order; dropping a receiver
/// unsubscribes it on the next publish.
#[derive(Clone, Debug, Default)]
pub struct ChatStore {
    inner: Arc<Mutex<ChatStoreState>>,
}

#[derive(Debug, Default)]
struct ChatStoreState {
    chats: HashMap<ChatId, ChatSummary>,
    subscribers: Vec<mpsc::Sender<ChatUpdate>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> mpsc::Receiver<ChatUpdate> {
        let (tx, rx) = mpsc::channel();
        if let Ok(mut state) = self.inner.lock() {
            state.subscribers.push(tx);
        }
        rx
    }

    pub fn chat(&self, chat_id: ChatId) -> Option<ChatSummary> {
        self.inner
            .lock()
            .ok()
            .and_then(|state| state.chats.get(&chat_id).cloned())
    }

    pub fn apply(&self, update: StoreUpdate) {
        let Ok(mut state) = self.inner.lock() else {
            return;
        };

        if let Some(published) = state.mutate(update) {
            state.broadcast(published);
        }
    }

    /// Publishes a client-side update that carries no store mutation.
    pub fn publish(&self, update: ChatUpdate) {
        if let Ok(mut state) = self.inner.lock() {
            state.broadcast(update);
        }
    }

    fn sorted_members(&self, list: ChatList) -> Vec<ChatSummary> {
        let Ok(state) = self.inner.lock() else {
            return Vec::new();
        };

        let mut members = state
            .chats
            .values()
            .filter(|chat| chat.list == Some(list))
            .collect::<Vec<_>>();
        sort_for_display(&mut members);
        members.into_iter().cloned().collect()
    }
}

impl ChatStoreState {
    fn mutate(&mut self, update: StoreUpdate) -> Option<ChatUpdate> {
        if let StoreUpdate::UpsertChat {
            chat_id,
            title,
            list,
            order,
            unread_count,
        } = update
        {
            let chat = self
                .chats
                .entry(chat_id)
                .or_insert_with(|| ChatSummary::new(chat_id, title.clone()));
            let list_changed = chat.list != list;
            chat.title = title;
            chat.list = list;
            chat.order = order;
            chat.unread_count = unread_count;

            return Some(if list_changed {
                ChatUpdate::ChatListChanged { chat_id }
            } else {
                order_changed(chat_id, OrderingCause::ExplicitOrder)
            });
        }

        let chat_id = update_chat_id(&update);
        let Some(chat) = self.chats.get_mut(&chat_id) else {
            tracing::debug!(
                code = CHAT_STORE_UNKNOWN_CHAT,
                chat_id,
                "update for unknown chat ignored"
            );
            return None;
        };

        match update {
            StoreUpdate::UpsertChat { .. } => None,
            StoreUpdate::MoveChat { list, .. } => {
                if chat.list == list {
                    return None;
                }
                chat.list = list;
                Some(ChatUpdate::ChatListChanged { chat_id })
            }
            StoreUpdate::SetOrder { order, .. } => {
                chat.order = order;
                Some(order_changed(chat_id, OrderingCause::ExplicitOrder))
            }
            StoreUpdate::SetPinned { is_pinned, .. } => {
                chat.is_pinned = is_pinned;
                Some(order_changed(chat_id, OrderingCause::Pin))
            }
            StoreUpdate::SetSponsored { is_sponsored, .. } => {
                chat.is_sponsored = is_sponsored;
                Some(order_changed(chat_id, OrderingCause::Sponsorship))
            }
            StoreUpdate::SetDraft { draft, .. } => {
                chat.draft = draft;
                Some(order_changed(chat_id, OrderingCause::Draft))
            }
            StoreUpdate::NewMessage {
                preview,
                order,
                unread,
                ..
            } => {
                chat.last_message_preview = Some(preview);
                if let Some(order) = order {
                    chat.order = order;
                }
                if unread {
                    chat.unread_count = chat.unread_count.saturating_add(1);
                }
                Some(order_changed(chat_id, OrderingCause::LastMessage))
            }
        }
    }

    fn broadcast(&mut self, update: ChatUpdate) {
        self.subscribers
            .retain(|subscriber| subscriber.send(update.clone()).is_ok());
    }
}

impl ChatListSource for ChatStore {
    fn is_in_list(&self, list: ChatList, chat_id: ChatId) -> bool {
        self.chat(chat_id).is_some_and(|chat| chat.list == Some(list))
    }

    fn list_members(&self, list: ChatList) -> Vec<ChatId> {
        self.sorted_members(list)
            .iter()
            .map(|chat| chat.chat_id)
            .collect()
    }

    fn archive_title(&self) -> Option<String> {
        let archived = self.sorted_members(ChatList::Archive);
        archive_title(&archived.iter().collect::<Vec<_>>())
    }
}

fn order_changed(chat_id: ChatId, cause: OrderingCause) -> ChatUpdate {
    ChatUpdate::OrderChanged { chat_id, cause }
}

fn update_chat_id(update: &StoreUpdate) -> ChatId {
    match update {
        StoreUpdate::UpsertChat { chat_id, .. }
        | StoreUpdate::MoveChat { chat_id, .. }
        | StoreUpdate::SetOrder { chat_id, .. }
        | StoreUpdate::SetPinned { chat_id, .. }
        | StoreUpdate::SetSponsored { chat_id, .. }
        | StoreUpdate::SetDraft { chat_id, .. }
        | StoreUpdate::NewMessage { chat_id, .. } => *chat_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(chat_id: ChatId, title: &str, list: ChatList, order: i64) -> StoreUpdate {
        StoreUpdate::UpsertChat {
            chat_id,
            title: title.to_owned(),
            list: Some(list),
            order,
            unread_count: 0,
        }
    }

    #[test]
    fn new_chat_in_a_list_publishes_membership_change() {
        let store = ChatStore::new();
        let rx = store.subscribe();

        store.apply(upsert(1, "General", ChatList::Main, 10));

        assert_eq!(
            rx.try_recv().expect("update should be published"),
            ChatUpdate::ChatListChanged { chat_id: 1 }
        );
    }

    #[test]
    fn moving_chat_to_archive_updates_membership() {
        let store = ChatStore::new();
        store.apply(upsert(1, "General", ChatList::Main, 10));
        let rx = store.subscribe();

        store.apply(StoreUpdate::MoveChat {
            chat_id: 1,
            list: Some(ChatList::Archive),
        });

        assert_eq!(
            rx.try_recv().expect("update should be published"),
            ChatUpdate::ChatListChanged { chat_id: 1 }
        );
        assert!(store.is_in_list(ChatList::Archive, 1));
        assert!(store.list_members(ChatList::Main).is_empty());
    }

    #[test]
    fn moving_chat_to_same_list_publishes_nothing() {
        let store = ChatStore::new();
        store.apply(upsert(1, "General", ChatList::Main, 10));
        let rx = store.subscribe();

        store.apply(StoreUpdate::MoveChat {
            chat_id: 1,
            list: Some(ChatList::Main),
        });

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn ordering_updates_carry_their_cause() {
        let store = ChatStore::new();
        store.apply(upsert(1, "General", ChatList::Main, 10));
        let rx = store.subscribe();

        store.apply(StoreUpdate::SetPinned {
            chat_id: 1,
            is_pinned: true,
        });
        store.apply(StoreUpdate::SetDraft {
            chat_id: 1,
            draft: Some("wip".to_owned()),
        });
        store.apply(StoreUpdate::NewMessage {
            chat_id: 1,
            preview: "hi".to_owned(),
            order: Some(20),
            unread: true,
        });

        let causes = rx
            .try_iter()
            .map(|update| match update {
                ChatUpdate::OrderChanged { cause, .. } => cause,
                other => panic!("unexpected update {other:?}"),
            })
            .collect::<Vec<_>>();
        assert_eq!(
            causes,
            vec![
                OrderingCause::Pin,
                OrderingCause::Draft,
                OrderingCause::LastMessage
            ]
        );
        let chat = store.chat(1).expect("chat should exist");
        assert_eq!(chat.order, 20);
        assert_eq!(chat.unread_count, 1);
    }

    #[test]
    fn updates_for_unknown_chats_are_dropped() {
        let store = ChatStore::new();
        let rx = store.subscribe();

        store.apply(StoreUpdate::SetOrder {
            chat_id: 404,
            order: 1,
        });

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn members_are_sorted_for_display_and_titled() {
        let store = ChatStore::new();
        store.apply(upsert(101, "Old news", ChatList::Archive, 5));
        store.apply(upsert(102, "Memes", ChatList::Archive, 9));
        store.apply(upsert(1, "General", ChatList::Main, 1));

        assert_eq!(store.list_members(ChatList::Archive), vec![102, 101]);
        assert_eq!(store.archive_title().as_deref(), Some("Memes, Old news"));
    }

    #[test]
    fn dropped_subscriber_is_pruned() {
        let store = ChatStore::new();
        let rx = store.subscribe();
        drop(rx);

        store.publish(ChatUpdate::OpenArchiveRequested);

        let state = store.inner.lock().expect("store lock");
        assert!(state.subscribers.is_empty());
    }

    #[test]
    fn deserializes_tagged_updates() {
        let update: StoreUpdate =
            serde_json::from_str(r#"{"type":"move_chat","chat_id":5,"list":"archive"}"#)
                .expect("update should parse");

        assert_eq!(
            update,
            StoreUpdate::MoveChat {
                chat_id: 5,
                list: Some(ChatList::Archive),
            }
        );
    }
}
