use crate::client::NotionBackend;
use crate::error::Result;
use crate::model::PageId;
use crate::render::Renderer;

/// Render a whole page into `out`.
///
/// `out` keeps partial output on error so the caller can flush what was
/// produced before reporting the failure.
pub fn run<C: NotionBackend>(client: &C, id: &PageId, out: &mut String) -> Result<()> {
    Renderer::new(client).render_page(id, out)
}
