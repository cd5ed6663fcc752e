//! Boundary to the external HTML tree builder (html5ever + rcdom).

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Parse an HTML blob into an rcdom tree. html5ever recovers from
/// unbalanced/malformed markup on a best-effort basis and never fails,
/// which is exactly the leniency rich-text-editor exports need.
pub fn parse(input: &str) -> RcDom {
    parse_document(RcDom::default(), Default::default()).one(input)
}

/// Element tag name, lowercased. `None` for non-element nodes.
pub fn tag_lower(node: &Handle) -> Option<String> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.to_string().to_ascii_lowercase()),
        _ => None,
    }
}

/// Look up an attribute by name on an element node. Absence is `None`,
/// never an empty string, so presence checks stay meaningful.
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.to_string().eq_ignore_ascii_case(name))
            .map(|a| a.value.to_string()),
        _ => None,
    }
}
