// Page layout for PDF output: font metrics, WinAnsi encoding, and the flow
// engine that wraps styled paragraphs onto pages.
// Layout is CPU-bound; async callers run it inside tokio::task::spawn_blocking.

pub mod encoding;
pub mod flow;
pub mod font_metrics;

// Re-export the public API consumed by the renderer.
pub use flow::{
    default_page_config, layout, Align, Flowable, Frame, LaidOutPage, PageConfig, Paragraph, Rgb,
};
pub use font_metrics::{FontFace, FontFamily, StandardFont};
