//! HTTP implementation of the backend, speaking the Notion REST API.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use ureq::Agent;

use super::NotionBackend;
use crate::error::{NotaError, Result};
use crate::model::{Block, BlockId, Page, PageId};

const API_BASE: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";

/// HTTP timeout in seconds, applied to every request.
const DEFAULT_TIMEOUT: u64 = 30;

/// Children are paged; the maximum page size keeps round trips down.
const PAGE_SIZE: u32 = 100;

pub struct HttpBackend {
    agent: Agent,
    base_url: String,
    token: String,
}

impl HttpBackend {
    pub fn new(token: impl Into<String>) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: API_BASE.to_owned(),
            token: token.into(),
        }
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .agent
            .get(url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .call()?;
        read_json(response)
    }

    fn patch_json(&self, url: &str, body: serde_json::Value) -> Result<()> {
        let response = self
            .agent
            .patch(url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .send_json(body)?;
        check_status(response)
    }
}

/// One page of a block's child listing.
#[derive(Debug, Deserialize)]
struct ChildrenPage {
    #[serde(default)]
    results: Vec<Block>,
    #[serde(default)]
    has_more: bool,
    #[serde(default)]
    next_cursor: Option<String>,
}

fn read_json<T: serde::de::DeserializeOwned>(
    response: ureq::http::Response<ureq::Body>,
) -> Result<T> {
    let status = response.status().as_u16();
    let mut body = response.into_body();
    if status >= 400 {
        let text = body
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        if status == 404 {
            return Err(NotaError::NotFound(text));
        }
        return Err(NotaError::Api { status, body: text });
    }
    Ok(body.read_json()?)
}

fn check_status(response: ureq::http::Response<ureq::Body>) -> Result<()> {
    let status = response.status().as_u16();
    if status >= 400 {
        let text = response
            .into_body()
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        if status == 404 {
            return Err(NotaError::NotFound(text));
        }
        return Err(NotaError::Api { status, body: text });
    }
    Ok(())
}

/// The write shape of a plain text run.
fn text_run(content: &str) -> serde_json::Value {
    json!({"type": "text", "text": {"content": content}})
}

impl NotionBackend for HttpBackend {
    fn page(&self, id: &PageId) -> Result<Page> {
        self.get_json(&format!("{}/pages/{}", self.base_url, id))
    }

    fn block_children(&self, id: &BlockId) -> Result<Vec<Block>> {
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut url = format!(
                "{}/blocks/{}/children?page_size={}",
                self.base_url, id, PAGE_SIZE
            );
            if let Some(c) = &cursor {
                url.push_str("&start_cursor=");
                url.push_str(c);
            }
            let page: ChildrenPage = self.get_json(&url)?;
            blocks.extend(page.results);
            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => return Ok(blocks),
            }
        }
    }

    fn append_todo(&mut self, parent: &BlockId, text: &str) -> Result<()> {
        let url = format!("{}/blocks/{}/children", self.base_url, parent);
        self.patch_json(
            &url,
            json!({
                "children": [{
                    "object": "block",
                    "type": "to_do",
                    "to_do": {"rich_text": [text_run(text)], "checked": false}
                }]
            }),
        )
    }

    fn set_todo_checked(&mut self, id: &BlockId, checked: bool) -> Result<()> {
        let url = format!("{}/blocks/{}", self.base_url, id);
        self.patch_json(&url, json!({"to_do": {"checked": checked}}))
    }

    fn set_todo_text(&mut self, id: &BlockId, text: &str) -> Result<()> {
        let url = format!("{}/blocks/{}", self.base_url, id);
        self.patch_json(&url, json!({"to_do": {"rich_text": [text_run(text)]}}))
    }

    fn delete_block(&mut self, id: &BlockId) -> Result<()> {
        let url = format!("{}/blocks/{}", self.base_url, id);
        let response = self
            .agent
            .delete(&url)
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", NOTION_VERSION)
            .call()?;
        check_status(response)
    }
}
