//! The task stack: a page whose first child block holds a flat list of
//! to-do entries. Entries are addressed by a case-insensitive substring
//! of their text; an exact match wins over the first substring match.

use crate::client::NotionBackend;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotaError, Result};
use crate::model::{Block, BlockId, BlockKind, PageId};

#[derive(Debug, Clone)]
pub struct StackEntry {
    pub id: BlockId,
    pub text: String,
    pub checked: bool,
}

/// The block that owns the stack entries: the stack page's first child.
fn container<C: NotionBackend>(client: &C, stack: &PageId) -> Result<Block> {
    let mut children = client.block_children(&stack.as_block())?;
    if children.is_empty() {
        return Err(NotaError::NotFound(format!(
            "stack page {stack} has no entry list"
        )));
    }
    Ok(children.remove(0))
}

/// All to-do entries on the stack, in document order.
pub fn entries<C: NotionBackend>(client: &C, stack: &PageId) -> Result<Vec<StackEntry>> {
    let container = container(client, stack)?;
    let blocks = client.block_children(&container.id)?;
    Ok(blocks
        .into_iter()
        .filter_map(|block| match &block.kind {
            BlockKind::ToDo { to_do } => Some(StackEntry {
                text: block.plain_text(),
                checked: to_do.checked,
                id: block.id,
            }),
            _ => None,
        })
        .collect())
}

fn find_entry(entries: Vec<StackEntry>, query: &str) -> Result<StackEntry> {
    let needle = query.to_lowercase();
    let mut substring_match = None;
    for entry in entries {
        let haystack = entry.text.to_lowercase();
        if haystack == needle {
            return Ok(entry);
        }
        if substring_match.is_none() && haystack.contains(&needle) {
            substring_match = Some(entry);
        }
    }
    substring_match.ok_or_else(|| NotaError::NotFound(format!("no stack entry matching \"{query}\"")))
}

pub fn add<C: NotionBackend>(client: &mut C, stack: &PageId, text: &str) -> Result<CmdResult> {
    if text.trim().is_empty() {
        return Err(NotaError::Format("empty stack entry".into()));
    }
    let container = container(client, stack)?;
    client.append_todo(&container.id, text)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("added \"{text}\""))))
}

pub fn mark<C: NotionBackend>(
    client: &mut C,
    stack: &PageId,
    query: &str,
    done: bool,
) -> Result<CmdResult> {
    let entry = find_entry(entries(client, stack)?, query)?;
    client.set_todo_checked(&entry.id, done)?;
    let marker = if done { "[✓]" } else { "[ ]" };
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("{marker} {}", entry.text))))
}

pub fn remove<C: NotionBackend>(client: &mut C, stack: &PageId, query: &str) -> Result<CmdResult> {
    let entry = find_entry(entries(client, stack)?, query)?;
    client.delete_block(&entry.id)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("removed \"{}\"", entry.text))))
}

pub fn modify<C: NotionBackend>(
    client: &mut C,
    stack: &PageId,
    query: &str,
    text: &str,
) -> Result<CmdResult> {
    if text.trim().is_empty() {
        return Err(NotaError::Format("empty stack entry".into()));
    }
    let entry = find_entry(entries(client, stack)?, query)?;
    client.set_todo_text(&entry.id, text)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "\"{}\" -> \"{text}\"",
        entry.text
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemoryBackend;
    use crate::model::{Page, TextPayload};

    fn stack_page() -> PageId {
        PageId::new("stack")
    }

    fn backend_with_entries(texts: &[&str]) -> InMemoryBackend {
        let mut backend = InMemoryBackend::new();
        let page: Page = serde_json::from_str(
            r#"{"id": "stack", "properties": {"title": {"title": [{"plain_text": "Stack"}]}}}"#,
        )
        .unwrap();
        backend.insert_page(page);
        backend.insert_children(
            BlockId::new("stack"),
            vec![Block {
                id: BlockId::new("cont"),
                has_children: true,
                kind: BlockKind::Toggle {
                    toggle: TextPayload::default(),
                },
            }],
        );
        let cont = BlockId::new("cont");
        for text in texts {
            backend.append_todo(&cont, text).unwrap();
        }
        backend
    }

    #[test]
    fn add_appends_an_unchecked_entry() {
        let mut backend = backend_with_entries(&["first"]);
        add(&mut backend, &stack_page(), "second").unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].text, "second");
        assert!(!list[1].checked);
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut backend = backend_with_entries(&[]);
        assert!(matches!(
            add(&mut backend, &stack_page(), "   "),
            Err(NotaError::Format(_))
        ));
    }

    #[test]
    fn mark_matches_case_insensitive_substring() {
        let mut backend = backend_with_entries(&["Write the report", "Water plants"]);
        mark(&mut backend, &stack_page(), "report", true).unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert!(list[0].checked);
        assert!(!list[1].checked);
    }

    #[test]
    fn exact_match_beats_substring_match() {
        let mut backend = backend_with_entries(&["tea time", "tea"]);
        mark(&mut backend, &stack_page(), "TEA", true).unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert!(!list[0].checked);
        assert!(list[1].checked);
    }

    #[test]
    fn unmark_clears_checked() {
        let mut backend = backend_with_entries(&["done thing"]);
        mark(&mut backend, &stack_page(), "done", true).unwrap();
        mark(&mut backend, &stack_page(), "done", false).unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert!(!list[0].checked);
    }

    #[test]
    fn remove_deletes_the_entry() {
        let mut backend = backend_with_entries(&["keep", "drop"]);
        remove(&mut backend, &stack_page(), "drop").unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].text, "keep");
    }

    #[test]
    fn modify_replaces_text() {
        let mut backend = backend_with_entries(&["old text"]);
        modify(&mut backend, &stack_page(), "old", "new text").unwrap();
        let list = entries(&backend, &stack_page()).unwrap();
        assert_eq!(list[0].text, "new text");
    }

    #[test]
    fn no_match_is_not_found() {
        let mut backend = backend_with_entries(&["something"]);
        assert!(matches!(
            mark(&mut backend, &stack_page(), "absent", true),
            Err(NotaError::NotFound(_))
        ));
    }

    #[test]
    fn empty_stack_page_is_not_found() {
        let mut backend = InMemoryBackend::new();
        let page: Page = serde_json::from_str(r#"{"id": "stack", "properties": {}}"#).unwrap();
        backend.insert_page(page);
        assert!(matches!(
            entries(&backend, &stack_page()),
            Err(NotaError::NotFound(_))
        ));
    }
}
