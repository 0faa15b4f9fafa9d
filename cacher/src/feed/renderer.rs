//! Feed renderer
//!
//! Bakes the ranked posts into the front-end's HTML template so the page can
//! be served without calling the feed on first load.

use std::path::Path;

use serde::Serialize;

use crate::domain::entities::Post;
use crate::domain::ports::PageRenderer;
use crate::error::RenderError;

/// Empty cache declaration the template ships with
pub const CACHE_PLACEHOLDER: &str = "const cache = { posts: [] };";

/// Prefix turning a relative permalink into an absolute URL
const PERMALINK_BASE: &str = "https://www.reddit.com";

/// Post shape the front-end decodes
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CachedPost<'a> {
    id: &'a str,
    upvotes: i64,
    created_utc: f64,
    domain: &'a str,
    url: &'a str,
    title: String,
    permalink: String,
}

impl<'a> From<&'a Post> for CachedPost<'a> {
    fn from(post: &'a Post) -> Self {
        CachedPost {
            id: &post.id,
            upvotes: post.ups,
            created_utc: post.created_utc,
            domain: &post.domain,
            url: &post.url,
            title: unescape_title(&post.title),
            permalink: format!("{}{}", PERMALINK_BASE, post.permalink),
        }
    }
}

/// Renders posts into an HTML template held in memory
#[derive(Debug, Clone)]
pub struct TemplateRenderer {
    template: String,
}

impl TemplateRenderer {
    /// Use `template` as-is. It must contain `CACHE_PLACEHOLDER`.
    pub fn new(template: String) -> Result<Self, RenderError> {
        if !template.contains(CACHE_PLACEHOLDER) {
            return Err(RenderError::MissingPlaceholder);
        }
        Ok(Self { template })
    }

    /// Load the template once from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let template = std::fs::read_to_string(path).map_err(|source| RenderError::Template {
            path: path.display().to_string(),
            source,
        })?;
        Self::new(template)
    }

    /// Render the page as a string
    pub fn render_page(&self, posts: &[Post]) -> Result<String, RenderError> {
        let cached: Vec<CachedPost<'_>> = posts.iter().map(CachedPost::from).collect();
        let data = serde_json::to_string(&cached)?;

        Ok(self
            .template
            .replace(CACHE_PLACEHOLDER, &format!("const cache={{posts:{}}};", data)))
    }
}

impl PageRenderer for TemplateRenderer {
    fn render(&self, posts: &[Post]) -> Result<Vec<u8>, RenderError> {
        Ok(self.render_page(posts)?.into_bytes())
    }
}

/// Decode the HTML entities the feed leaves in titles
fn unescape_title(title: &str) -> String {
    html_escape::decode_html_entities(title).into_owned()
}
