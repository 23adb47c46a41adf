//! # Remote API layer
//!
//! Access to the content-management API is abstracted behind the
//! [`NotionBackend`] trait so that:
//! - the renderer and commands can be tested against
//!   [`memory::InMemoryBackend`] without any network,
//! - the HTTP transport ([`http::HttpBackend`]) stays the only module that
//!   knows about URLs, auth headers and pagination.
//!
//! Reads return blocks in document order; pagination of a block's child
//! list is resolved inside the backend, callers always see the full list.

use crate::error::Result;
use crate::model::{Block, BlockId, Page, PageId};

pub mod http;
pub mod memory;

/// Capability the renderer and the stack commands consume.
pub trait NotionBackend {
    /// Fetch page metadata (title, icon).
    fn page(&self, id: &PageId) -> Result<Page>;

    /// Fetch the ordered list of direct children of a block.
    fn block_children(&self, id: &BlockId) -> Result<Vec<Block>>;

    /// Append an unchecked to-do with the given text to a block.
    fn append_todo(&mut self, parent: &BlockId, text: &str) -> Result<()>;

    /// Check or uncheck an existing to-do block.
    fn set_todo_checked(&mut self, id: &BlockId, checked: bool) -> Result<()>;

    /// Replace the text of an existing to-do block.
    fn set_todo_text(&mut self, id: &BlockId, text: &str) -> Result<()>;

    /// Delete (archive) a block.
    fn delete_block(&mut self, id: &BlockId) -> Result<()>;
}
