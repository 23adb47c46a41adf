//! In-memory backend for tests. No persistence, no network.

use std::cell::Cell;
use std::collections::HashMap;

use super::NotionBackend;
use crate::error::{NotaError, Result};
use crate::model::{Block, BlockId, BlockKind, Page, PageId, RichText, ToDoPayload};

#[derive(Default)]
pub struct InMemoryBackend {
    pages: HashMap<PageId, Page>,
    children: HashMap<BlockId, Vec<Block>>,
    fetches: Cell<usize>,
    next_id: Cell<usize>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_page(&mut self, page: Page) {
        self.pages.insert(page.id.clone(), page);
    }

    pub fn insert_children(&mut self, parent: BlockId, blocks: Vec<Block>) {
        self.children.insert(parent, blocks);
    }

    /// Number of child-list fetches issued so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.get()
    }

    fn todo_mut(&mut self, id: &BlockId) -> Result<&mut ToDoPayload> {
        for blocks in self.children.values_mut() {
            for block in blocks.iter_mut() {
                if block.id == *id {
                    return match &mut block.kind {
                        BlockKind::ToDo { to_do } => Ok(to_do),
                        other => Err(NotaError::Format(format!(
                            "block {} is a {}, not a to-do",
                            id,
                            other.name()
                        ))),
                    };
                }
            }
        }
        Err(NotaError::NotFound(format!("block {id}")))
    }
}

impl NotionBackend for InMemoryBackend {
    fn page(&self, id: &PageId) -> Result<Page> {
        self.pages
            .get(id)
            .cloned()
            .ok_or_else(|| NotaError::NotFound(format!("page {id}")))
    }

    fn block_children(&self, id: &BlockId) -> Result<Vec<Block>> {
        self.fetches.set(self.fetches.get() + 1);
        Ok(self.children.get(id).cloned().unwrap_or_default())
    }

    fn append_todo(&mut self, parent: &BlockId, text: &str) -> Result<()> {
        let n = self.next_id.get();
        self.next_id.set(n + 1);
        let block = Block {
            id: BlockId::new(format!("mem-{n}")),
            has_children: false,
            kind: BlockKind::ToDo {
                to_do: ToDoPayload {
                    rich_text: vec![RichText::text(text)],
                    checked: false,
                },
            },
        };
        self.children.entry(parent.clone()).or_default().push(block);
        Ok(())
    }

    fn set_todo_checked(&mut self, id: &BlockId, checked: bool) -> Result<()> {
        self.todo_mut(id)?.checked = checked;
        Ok(())
    }

    fn set_todo_text(&mut self, id: &BlockId, text: &str) -> Result<()> {
        self.todo_mut(id)?.rich_text = vec![RichText::text(text)];
        Ok(())
    }

    fn delete_block(&mut self, id: &BlockId) -> Result<()> {
        for blocks in self.children.values_mut() {
            if let Some(pos) = blocks.iter().position(|b| b.id == *id) {
                blocks.remove(pos);
                return Ok(());
            }
        }
        Err(NotaError::NotFound(format!("block {id}")))
    }
}
