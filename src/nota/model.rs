use serde::Deserialize;
use std::fmt;

/// Identifier of a block in the remote document tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Identifier of a page. A page is also addressable as a block when
/// listing its direct children.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_block(&self) -> BlockId {
        BlockId::new(self.0.clone())
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One node of the remote document's content tree.
///
/// The payload lives inside [`BlockKind`], so a block can never be read
/// through the wrong type's payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: BlockId,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// Closed set of block types, tagged by the API's `type` field.
///
/// Types the API may grow that we do not handle land in `Unsupported`
/// instead of failing deserialization of the whole child list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Heading1 { heading_1: TextPayload },
    Heading2 { heading_2: TextPayload },
    Heading3 { heading_3: TextPayload },
    Paragraph { paragraph: TextPayload },
    ToDo { to_do: ToDoPayload },
    BulletedListItem { bulleted_list_item: TextPayload },
    NumberedListItem { numbered_list_item: TextPayload },
    Toggle { toggle: TextPayload },
    Equation { equation: EquationPayload },
    Code { code: CodePayload },
    Divider,
    Column,
    ColumnList,
    Image { image: ImagePayload },
    ChildPage { child_page: ChildPagePayload },
    SyncedBlock,
    #[serde(other)]
    Unsupported,
}

impl BlockKind {
    /// The API-side type tag, for error messages.
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Heading1 { .. } => "heading_1",
            BlockKind::Heading2 { .. } => "heading_2",
            BlockKind::Heading3 { .. } => "heading_3",
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Code { .. } => "code",
            BlockKind::Divider => "divider",
            BlockKind::Column => "column",
            BlockKind::ColumnList => "column_list",
            BlockKind::Image { .. } => "image",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::SyncedBlock => "synced_block",
            BlockKind::Unsupported => "unsupported",
        }
    }
}

impl Block {
    /// Inline text runs of the block, for kinds that carry any.
    pub fn rich_text(&self) -> Option<&[RichText]> {
        match &self.kind {
            BlockKind::Heading1 { heading_1: p }
            | BlockKind::Heading2 { heading_2: p }
            | BlockKind::Heading3 { heading_3: p }
            | BlockKind::Paragraph { paragraph: p }
            | BlockKind::BulletedListItem {
                bulleted_list_item: p,
            }
            | BlockKind::NumberedListItem {
                numbered_list_item: p,
            }
            | BlockKind::Toggle { toggle: p } => Some(&p.rich_text),
            BlockKind::ToDo { to_do } => Some(&to_do.rich_text),
            BlockKind::Code { code } => Some(&code.rich_text),
            _ => None,
        }
    }

    /// Undecorated text content, runs concatenated.
    pub fn plain_text(&self) -> String {
        self.rich_text()
            .map(|runs| runs.iter().map(|rt| rt.plain_text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToDoPayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EquationPayload {
    pub expression: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodePayload {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

/// Where an image block's bytes live. External images carry the original
/// URL, hosted files a signed temporary one.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ImagePayload {
    External { external: FileRef },
    File { file: FileRef },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileRef {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChildPagePayload {
    pub title: String,
}

/// One styled fragment of inline text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(rename = "type", default)]
    pub kind: RichTextKind,
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub annotations: Annotations,
}

impl RichText {
    /// A plain, unannotated text run.
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            plain_text: content.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextKind {
    #[default]
    Text,
    Equation,
    Mention,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Annotations {
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub strikethrough: bool,
    #[serde(default)]
    pub underline: bool,
    #[serde(default)]
    pub code: bool,
    #[serde(default)]
    pub color: Color,
}

/// Text color names the API uses. Background variants and anything we
/// cannot map to a terminal color fall through to `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    #[serde(other)]
    Other,
}

/// The document root: a title (with optional emoji icon) plus one child
/// block list fetched separately.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: PageId,
    #[serde(default)]
    pub icon: Option<Icon>,
    #[serde(default)]
    pub properties: PageProperties,
}

impl Page {
    /// Title runs, when the page has a non-empty title property.
    pub fn title_runs(&self) -> Option<&[RichText]> {
        self.properties
            .title
            .as_ref()
            .map(|t| t.title.as_slice())
            .filter(|runs| !runs.is_empty())
    }

    /// The emoji icon, when the page has one.
    pub fn emoji(&self) -> Option<&str> {
        match &self.icon {
            Some(Icon::Emoji { emoji }) => Some(emoji.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageProperties {
    #[serde(default)]
    pub title: Option<TitleProperty>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TitleProperty {
    #[serde(default)]
    pub title: Vec<RichText>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Icon {
    Emoji { emoji: String },
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_do_block_deserializes_with_payload() {
        let json = r#"{
            "id": "b1",
            "type": "to_do",
            "has_children": false,
            "created_time": "2023-01-01T00:00:00.000Z",
            "to_do": {
                "rich_text": [{
                    "type": "text",
                    "plain_text": "buy milk",
                    "annotations": {
                        "bold": true, "italic": false, "strikethrough": false,
                        "underline": false, "code": false, "color": "default"
                    }
                }],
                "checked": true
            }
        }"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(!block.has_children);
        match &block.kind {
            BlockKind::ToDo { to_do } => {
                assert!(to_do.checked);
                assert_eq!(to_do.rich_text[0].plain_text, "buy milk");
                assert!(to_do.rich_text[0].annotations.bold);
            }
            other => panic!("wrong kind: {}", other.name()),
        }
    }

    #[test]
    fn unrecognized_type_becomes_unsupported() {
        let json = r#"{"id": "b2", "type": "breadcrumb", "has_children": false, "breadcrumb": {}}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(matches!(block.kind, BlockKind::Unsupported));
    }

    #[test]
    fn image_source_kinds() {
        let external = r#"{"id": "b3", "type": "image",
            "image": {"type": "external", "external": {"url": "https://x/y.png"}}}"#;
        let block: Block = serde_json::from_str(external).unwrap();
        match &block.kind {
            BlockKind::Image {
                image: ImagePayload::External { external },
            } => assert_eq!(external.url, "https://x/y.png"),
            _ => panic!("expected external image"),
        }

        let hosted = r#"{"id": "b4", "type": "image",
            "image": {"type": "file", "file": {"url": "https://files/z.png", "expiry_time": "t"}}}"#;
        let block: Block = serde_json::from_str(hosted).unwrap();
        assert!(matches!(
            block.kind,
            BlockKind::Image {
                image: ImagePayload::File { .. }
            }
        ));
    }

    #[test]
    fn unknown_color_falls_back_to_other() {
        let json = r#"{"bold": false, "italic": false, "strikethrough": false,
            "underline": false, "code": false, "color": "red_background"}"#;
        let a: Annotations = serde_json::from_str(json).unwrap();
        assert_eq!(a.color, Color::Other);
    }

    #[test]
    fn page_title_and_emoji() {
        let json = r#"{
            "id": "p1",
            "icon": {"type": "emoji", "emoji": "🚀"},
            "properties": {
                "title": {"type": "title", "title": [{"type": "text", "plain_text": "Launch"}]}
            }
        }"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert_eq!(page.emoji(), Some("🚀"));
        assert_eq!(page.title_runs().unwrap()[0].plain_text, "Launch");
    }

    #[test]
    fn page_without_title_property() {
        let json = r#"{"id": "p2", "properties": {}}"#;
        let page: Page = serde_json::from_str(json).unwrap();
        assert!(page.title_runs().is_none());
    }
}
