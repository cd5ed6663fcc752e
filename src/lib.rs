//! Convert rich-text HTML into Steam's BBCode-like bracket markup.
//!
//! The conversion is a single depth-first pass over the tree html5ever
//! builds: a fixed dictionary maps known element names to bracket-tag
//! templates, unknown elements are dropped while their converted children
//! pass through, and text nodes are emitted verbatim.

pub mod convert;
pub mod dom;
pub mod template;

pub use convert::{ConvertError, Options};

/// Parse `html` leniently and convert the whole document to bracket
/// markup. The wrapper elements the parser synthesizes (`html`, `head`,
/// `body`) have no templates, so a fragment and the equivalent full
/// document convert identically.
pub fn html_to_steam(html: &str, opts: &Options) -> Result<String, ConvertError> {
    let dom = dom::parse(html);
    convert::convert(&dom.document, opts)
}
