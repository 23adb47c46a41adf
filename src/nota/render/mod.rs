//! # Block tree renderer
//!
//! Turns a tree of typed blocks into printable text. The walk is
//! depth-first and synchronous: container blocks (toggle, column,
//! column list, synced block) trigger exactly one child fetch through the
//! [`NotionBackend`] capability, and children render in document order.
//!
//! All per-render state lives in [`RenderContext`], created once per
//! top-level call: the indentation level and the numbered-list counter.
//! The counter is bumped by the dispatcher for each consecutive
//! numbered-list sibling and reset by any other sibling, so nested lists
//! number independently of their parents.
//!
//! Output accumulates in a caller-supplied buffer. When a branch fails
//! mid-render (fetch error, unknown block type) the buffer keeps
//! everything produced for earlier siblings, and the caller decides
//! whether to flush it alongside the error.

mod text;

pub use text::{decorate, indent, render_rich_text, INDENT_WIDTH};

use crate::client::NotionBackend;
use crate::error::{NotaError, Result};
use crate::model::{Block, BlockKind, ImagePayload, PageId};

/// Marker prepended to the page title line.
const TITLE_MARKER: &str = "▓ ";

/// Per-render mutable state threaded through the recursion.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    level: usize,
    numbered: u32,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at_level(level: usize) -> Self {
        Self { level, numbered: 0 }
    }

    /// Context for a container's child list: deeper by `delta` levels,
    /// numbering restarted.
    fn child(&self, delta: usize) -> Self {
        Self::at_level(self.level + delta)
    }
}

pub struct Renderer<'a, C: NotionBackend> {
    client: &'a C,
    open_toggles: bool,
}

impl<'a, C: NotionBackend> Renderer<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            open_toggles: true,
        }
    }

    /// Render toggles collapsed: marker only, children never fetched.
    pub fn with_closed_toggles(mut self) -> Self {
        self.open_toggles = false;
        self
    }

    /// Render a page title plus its first-level children into `out`.
    ///
    /// `out` keeps whatever was produced before an error, so the caller
    /// can flush partial output and still report the failure.
    pub fn render_page(&self, id: &PageId, out: &mut String) -> Result<()> {
        let page = self.client.page(id)?;
        let runs = page
            .title_runs()
            .ok_or_else(|| NotaError::Format(format!("page {id} has no title")))?;

        let mut first = runs[0].clone();
        if let Some(emoji) = page.emoji() {
            first.plain_text = format!("{emoji}  {}", first.plain_text);
        }
        out.push_str(&render_rich_text(
            std::slice::from_ref(&first),
            TITLE_MARKER,
            0,
            Some(colored::Color::Cyan),
        ));
        out.push('\n');

        let children = self.client.block_children(&id.as_block())?;
        self.render_blocks(&children, &mut RenderContext::new(), out)
    }

    /// Render a sibling sequence in document order, appending to `out`.
    pub fn render_blocks(
        &self,
        blocks: &[Block],
        ctx: &mut RenderContext,
        out: &mut String,
    ) -> Result<()> {
        for block in blocks {
            let rendered = self.render_block(block, ctx)?;
            out.push_str(&rendered);
        }
        Ok(())
    }

    /// Render one block, recursing into container types.
    pub fn render_block(&self, block: &Block, ctx: &mut RenderContext) -> Result<String> {
        // Numbering is decided here so the counter survives across the
        // sibling loop: consecutive numbered items count up, anything
        // else restarts the sequence.
        if matches!(block.kind, BlockKind::NumberedListItem { .. }) {
            ctx.numbered += 1;
        } else {
            ctx.numbered = 0;
        }
        let level = ctx.level;

        match &block.kind {
            BlockKind::Heading1 { heading_1 } => {
                Ok(render_rich_text(&heading_1.rich_text, "# ", level, None))
            }
            BlockKind::Heading2 { heading_2 } => {
                Ok(render_rich_text(&heading_2.rich_text, "## ", level, None))
            }
            BlockKind::Heading3 { heading_3 } => {
                Ok(render_rich_text(&heading_3.rich_text, "### ", level, None))
            }
            BlockKind::Paragraph { paragraph } => {
                Ok(render_rich_text(&paragraph.rich_text, "", level, None))
            }
            BlockKind::ToDo { to_do } => {
                let marker = if to_do.checked { "[✓] " } else { "[ ] " };
                Ok(render_rich_text(&to_do.rich_text, marker, level, None))
            }
            BlockKind::BulletedListItem { bulleted_list_item } => Ok(render_rich_text(
                &bulleted_list_item.rich_text,
                "* ",
                level,
                None,
            )),
            BlockKind::NumberedListItem { numbered_list_item } => Ok(render_rich_text(
                &numbered_list_item.rich_text,
                &format!("{}. ", ctx.numbered),
                level,
                None,
            )),
            BlockKind::Toggle { toggle } => {
                let marker = if self.open_toggles { "▼ " } else { "▶ " };
                let mut rendered = render_rich_text(&toggle.rich_text, marker, level, None);
                if self.open_toggles && block.has_children {
                    rendered.push_str(&self.render_children(block, ctx.child(1))?);
                }
                Ok(rendered)
            }
            BlockKind::Equation { equation } => {
                Ok(text::line(&format!("$$ {} $$", equation.expression), level))
            }
            BlockKind::Code { code } => {
                let mut rendered = text::line(&format!("```{}", code.language), level);
                rendered.push_str(&render_rich_text(&code.rich_text, "", level, None));
                rendered.push_str(&text::line("```", level));
                Ok(rendered)
            }
            BlockKind::Divider => Ok(text::line("---", level)),
            BlockKind::Column => {
                if block.has_children {
                    self.render_children(block, ctx.child(1))
                } else {
                    Ok("\n".to_owned())
                }
            }
            BlockKind::ColumnList => {
                if block.has_children {
                    self.render_children(block, ctx.child(0))
                } else {
                    Ok("\n".to_owned())
                }
            }
            BlockKind::Image { image } => {
                let url = match image {
                    ImagePayload::External { external } => &external.url,
                    ImagePayload::File { file } => &file.url,
                    ImagePayload::Unsupported => {
                        return Err(NotaError::Format(format!(
                            "image block {} has no usable URL",
                            block.id
                        )))
                    }
                };
                Ok(text::line(&format!("![]({url})"), level))
            }
            BlockKind::ChildPage { child_page } => {
                Ok(text::line(&format!("░ {}", child_page.title), level))
            }
            // Synced blocks are transparent: their children render in
            // place at the same level, no marker of their own.
            BlockKind::SyncedBlock => self.render_children(block, ctx.child(0)),
            BlockKind::Unsupported => Err(NotaError::UnknownBlockType(format!(
                "block {}",
                block.id
            ))),
        }
    }

    fn render_children(&self, block: &Block, mut ctx: RenderContext) -> Result<String> {
        let children = self.client.block_children(&block.id)?;
        let mut out = String::new();
        self.render_blocks(&children, &mut ctx, &mut out)?;
        Ok(out)
    }
}
