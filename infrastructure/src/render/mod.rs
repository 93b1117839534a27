//! Markup rendering adapters for the [`MarkupRenderer`] port.

mod markdown;

pub use markdown::{MarkdownRenderer, PlainRenderer};

use revchat_application::MarkupRenderer;
use revchat_domain::OutputFormat;
use std::sync::Arc;

/// Pick the renderer for a configured output format.
pub fn renderer_for(format: OutputFormat) -> Arc<dyn MarkupRenderer> {
    match format {
        OutputFormat::Html => Arc::new(MarkdownRenderer),
        OutputFormat::Plain => Arc::new(PlainRenderer),
    }
}
