//! The tag mapper: depth-first conversion of an rcdom tree into bracket
//! markup, driven by the dictionary in `template`.

use markup5ever_rcdom::{Handle, NodeData};
use thiserror::Error;

use crate::dom;
use crate::template::{template_for, Template};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("<{tag}> is missing required attribute `{attr}`")]
    MissingAttribute { tag: String, attr: String },
    #[error("document nesting exceeds the maximum depth of {limit}")]
    DepthExceeded { limit: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Maximum element nesting accepted before conversion is aborted.
    pub max_depth: usize,
    /// Fail the conversion on `<img>` without `src` instead of dropping
    /// the tag.
    pub strict_images: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 256,
            strict_images: false,
        }
    }
}

/// One node mid-conversion. `children` is snapshotted up front so the
/// walk never re-borrows the rcdom RefCells, and `inner` accumulates the
/// already-converted children in document order.
struct Frame {
    node: Handle,
    children: Vec<Handle>,
    next: usize,
    inner: String,
}

impl Frame {
    fn new(node: &Handle) -> Self {
        let suppress = dom::tag_lower(node)
            .and_then(|tag| template_for(&tag))
            .map_or(false, Template::suppresses_children);
        let children = if suppress {
            Vec::new()
        } else {
            node.children.borrow().clone()
        };
        Frame {
            node: node.clone(),
            children,
            next: 0,
            inner: String::new(),
        }
    }
}

/// Convert the tree under `root` (the rcdom document node, or any
/// subtree) into bracket markup.
///
/// Iterative rather than recursive: the input nesting depth is
/// attacker-controlled, so the walk carries its own stack and fails with
/// `DepthExceeded` instead of overflowing the call stack.
pub fn convert(root: &Handle, opts: &Options) -> Result<String, ConvertError> {
    let mut stack: Vec<Frame> = vec![Frame::new(root)];

    loop {
        let next_child = match stack.last_mut() {
            Some(top) if top.next < top.children.len() => {
                let child = top.children[top.next].clone();
                top.next += 1;
                Some(child)
            }
            Some(_) => None,
            None => break,
        };

        if let Some(child) = next_child {
            if stack.len() >= opts.max_depth {
                return Err(ConvertError::DepthExceeded {
                    limit: opts.max_depth,
                });
            }
            stack.push(Frame::new(&child));
            continue;
        }

        // Top frame has consumed all children; render it and fold the
        // result into its parent's accumulator.
        if let Some(done) = stack.pop() {
            let rendered = render(&done.node, done.inner, opts)?;
            match stack.last_mut() {
                Some(parent) => parent.inner.push_str(&rendered),
                None => return Ok(rendered),
            }
        }
    }

    Ok(String::new())
}

fn render(node: &Handle, inner: String, opts: &Options) -> Result<String, ConvertError> {
    match &node.data {
        // Text passes through untouched: no escaping, no whitespace
        // normalization.
        NodeData::Text { contents } => Ok(contents.borrow().to_string()),
        NodeData::Element { .. } => {
            let tag = dom::tag_lower(node).unwrap_or_default();
            render_element(node, &tag, inner, opts)
        }
        // Document and fragment roots concatenate their children;
        // comments, doctypes and processing instructions have no output.
        _ => Ok(inner),
    }
}

fn render_element(
    node: &Handle,
    tag: &str,
    inner: String,
    opts: &Options,
) -> Result<String, ConvertError> {
    let Some(template) = template_for(tag) else {
        // Fallback: drop the tag, keep the converted children.
        return Ok(inner);
    };

    match template {
        Template::Wrap { prefix, suffix } => Ok(format!("{prefix}{inner}{suffix}")),
        Template::Prefix { prefix } => Ok(format!("{prefix}{inner}")),
        Template::Literal { text } => Ok(text.to_string()),
        Template::Link => match dom::attr(node, "href") {
            // Attribute values go in literally; brackets in a URL are a
            // known limitation of the output dialect.
            Some(href) => Ok(format!("[url={href}]{inner}[/url]")),
            None => Ok(inner),
        },
        Template::Image => match dom::attr(node, "src") {
            Some(src) => Ok(format!("[img]{src}[/img]")),
            None if opts.strict_images => Err(ConvertError::MissingAttribute {
                tag: tag.to_string(),
                attr: "src".to_string(),
            }),
            // Lenient default: a broken image drops out, the rest of the
            // document still converts.
            None => Ok(String::new()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conv(html: &str) -> String {
        let dom = dom::parse(html);
        convert(&dom.document, &Options::default()).unwrap()
    }

    #[test]
    fn text_passes_through_unchanged() {
        assert_eq!(conv("hello"), "hello");
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert_eq!(conv(""), "");
    }

    #[test]
    fn sibling_order_is_preserved() {
        assert_eq!(conv("<b>a</b><i>c</i>"), "[b]a[/b][i]c[/i]");
    }

    #[test]
    fn nesting_is_preserved() {
        assert_eq!(conv("<b><i>x</i></b>"), "[b][i]x[/i][/b]");
    }

    #[test]
    fn synonym_tags_map_to_the_same_output() {
        assert_eq!(conv("<strong>x</strong>"), "[b]x[/b]");
        assert_eq!(conv("<em>x</em>"), "[i]x[/i]");
        assert_eq!(conv("<strike>x</strike>"), "[strike]x[/strike]");
    }

    #[test]
    fn underline_and_strikethrough() {
        assert_eq!(conv("<u>x</u>"), "[u]x[/u]");
        assert_eq!(conv("<s>x</s>"), "[strike]x[/strike]");
    }

    #[test]
    fn unknown_tags_are_transparent() {
        assert_eq!(conv("<span>X</span>"), "X");
        assert_eq!(conv("<div><p>X</p></div>"), "X");
    }

    #[test]
    fn full_document_wrappers_are_transparent() {
        assert_eq!(
            conv("<html><body><b>x</b></body></html>"),
            conv("<b>x</b>")
        );
    }

    #[test]
    fn anchor_with_href_becomes_url() {
        assert_eq!(
            conv(r#"<a href="http://e.com">text</a>"#),
            "[url=http://e.com]text[/url]"
        );
    }

    #[test]
    fn anchor_without_href_is_transparent() {
        assert_eq!(conv("<a>text</a>"), "text");
    }

    #[test]
    fn headings() {
        assert_eq!(conv("<h1>t</h1>"), "[h1]t[/h1]");
        assert_eq!(conv("<h2>t</h2>"), "[h2]t[/h2]");
        assert_eq!(conv("<h3>t</h3>"), "[h3]t[/h3]");
    }

    #[test]
    fn unordered_list_structure() {
        assert_eq!(conv("<ul><li>A</li><li>B</li></ul>"), "[list][*]A[*]B[/list]");
    }

    #[test]
    fn ordered_list_structure() {
        assert_eq!(conv("<ol><li>A</li><li>B</li></ol>"), "[olist][*]A[*]B[/olist]");
    }

    #[test]
    fn table_survives_synthesized_tbody() {
        // html5ever inserts <tbody> during tree construction; it has no
        // template and must stay transparent.
        assert_eq!(
            conv("<table><tr><th>h</th><td>d</td></tr></table>"),
            "[table][tr][th]h[/th][td]d[/td][/tr][/table]"
        );
    }

    #[test]
    fn code_and_blockquote() {
        assert_eq!(conv("<code>x</code>"), "[code]x[/code]");
        assert_eq!(conv("<blockquote>x</blockquote>"), "[quote]x[/quote]");
    }

    #[test]
    fn horizontal_rule_is_a_fixed_literal() {
        assert_eq!(conv("<hr>"), "[hr][/hr]");
    }

    #[test]
    fn line_break_becomes_newline() {
        assert_eq!(conv("a<br>b"), "a\nb");
    }

    #[test]
    fn image_with_src() {
        assert_eq!(conv(r#"<img src="x.png">"#), "[img]x.png[/img]");
    }

    #[test]
    fn image_without_src_is_dropped_by_default() {
        assert_eq!(conv("a<img>b"), "ab");
    }

    #[test]
    fn image_without_src_fails_in_strict_mode() {
        let dom = dom::parse("a<img>b");
        let opts = Options {
            strict_images: true,
            ..Options::default()
        };
        assert_eq!(
            convert(&dom.document, &opts),
            Err(ConvertError::MissingAttribute {
                tag: "img".to_string(),
                attr: "src".to_string(),
            })
        );
    }

    #[test]
    fn comments_produce_no_output() {
        assert_eq!(conv("a<!-- hidden -->b"), "ab");
    }

    #[test]
    fn deep_nesting_hits_the_depth_guard() {
        let mut html = String::new();
        for _ in 0..64 {
            html.push_str("<div>");
        }
        html.push('x');
        let dom = dom::parse(&html);
        let opts = Options {
            max_depth: 16,
            ..Options::default()
        };
        assert_eq!(
            convert(&dom.document, &opts),
            Err(ConvertError::DepthExceeded { limit: 16 })
        );
    }

    #[test]
    fn shallow_input_is_fine_under_the_default_depth() {
        assert_eq!(conv("<ul><li><b><i>x</i></b></li></ul>"), "[list][*][b][i]x[/i][/b][/list]");
    }

    #[test]
    fn unbalanced_markup_still_converts() {
        // html5ever closes the dangling tags during recovery.
        assert_eq!(conv("<b>bold <i>both"), "[b]bold [i]both[/i][/b]");
    }

    #[test]
    fn brackets_in_text_are_not_escaped() {
        assert_eq!(conv("a [b] c"), "a [b] c");
    }
}
