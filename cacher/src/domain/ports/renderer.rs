//! Page renderer port trait

use crate::domain::entities::Post;
use crate::error::RenderError;

/// Turns a ranked post list into storable bytes.
///
/// Implementations must be deterministic for identical input.
pub trait PageRenderer: Send + Sync {
    fn render(&self, posts: &[Post]) -> Result<Vec<u8>, RenderError>;
}
