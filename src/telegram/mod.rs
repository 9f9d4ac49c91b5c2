//! Telegram integration layer: the chat store bus and the host bridge.

pub mod chat_store;
pub mod host;

/// Returns the telegram module name for smoke checks.
pub fn module_name() -> &'static str {
    "telegram"
}
