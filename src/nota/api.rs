//! # API facade
//!
//! Thin dispatch layer over the command modules, generic over the
//! backend so the whole surface is testable against
//! [`InMemoryBackend`](crate::client::memory::InMemoryBackend).
//! No I/O happens here: rendering goes into caller buffers, side effects
//! come back as [`CmdResult`] messages.

use crate::client::NotionBackend;
use crate::commands;
use crate::error::Result;
use crate::model::PageId;

pub struct NotaApi<C: NotionBackend> {
    client: C,
}

impl<C: NotionBackend> NotaApi<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Render a page into `out`. Partial output survives an error.
    pub fn show_page(&self, id: &PageId, out: &mut String) -> Result<()> {
        commands::page::run(&self.client, id, out)
    }

    pub fn stack_entries(&self, stack: &PageId) -> Result<Vec<commands::stack::StackEntry>> {
        commands::stack::entries(&self.client, stack)
    }

    pub fn stack_add(&mut self, stack: &PageId, text: &str) -> Result<commands::CmdResult> {
        commands::stack::add(&mut self.client, stack, text)
    }

    pub fn stack_mark(
        &mut self,
        stack: &PageId,
        query: &str,
        done: bool,
    ) -> Result<commands::CmdResult> {
        commands::stack::mark(&mut self.client, stack, query, done)
    }

    pub fn stack_remove(&mut self, stack: &PageId, query: &str) -> Result<commands::CmdResult> {
        commands::stack::remove(&mut self.client, stack, query)
    }

    pub fn stack_modify(
        &mut self,
        stack: &PageId,
        query: &str,
        text: &str,
    ) -> Result<commands::CmdResult> {
        commands::stack::modify(&mut self.client, stack, query, text)
    }
}

pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemoryBackend;
    use crate::model::{Block, BlockId, BlockKind, Page, TextPayload};

    #[test]
    fn facade_dispatches_to_stack_commands() {
        let mut backend = InMemoryBackend::new();
        let page: Page = serde_json::from_str(
            r#"{"id": "s", "properties": {"title": {"title": [{"plain_text": "Stack"}]}}}"#,
        )
        .unwrap();
        backend.insert_page(page);
        backend.insert_children(
            BlockId::new("s"),
            vec![Block {
                id: BlockId::new("cont"),
                has_children: true,
                kind: BlockKind::Toggle {
                    toggle: TextPayload::default(),
                },
            }],
        );

        let stack = PageId::new("s");
        let mut api = NotaApi::new(backend);
        api.stack_add(&stack, "task").unwrap();
        let entries = api.stack_entries(&stack).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "task");
    }
}
