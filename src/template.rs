//! The tag -> bracket-template dictionary, as pure data.

/// How one HTML element renders into bracket markup. `inner` below means
/// the already-converted, concatenated children in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `prefix` + inner + `suffix`.
    Wrap {
        prefix: &'static str,
        suffix: &'static str,
    },
    /// `prefix` + inner, no closing tag (list items).
    Prefix { prefix: &'static str },
    /// A fixed literal; children are never converted.
    Literal { text: &'static str },
    /// `[url=HREF]inner[/url]` from the `href` attribute; an anchor
    /// without `href` falls through to the generic fallback.
    Link,
    /// `[img]SRC[/img]` from the `src` attribute; children are never
    /// converted.
    Image,
}

impl Template {
    /// Tags whose output is independent of their subtree.
    pub fn suppresses_children(self) -> bool {
        matches!(self, Template::Literal { .. } | Template::Image)
    }
}

/// Template for a (lowercased) tag name. `None` means the tag is
/// structurally transparent: it is dropped and its converted children
/// pass through.
pub fn template_for(tag: &str) -> Option<Template> {
    let t = match tag {
        "b" | "strong" => Template::Wrap { prefix: "[b]", suffix: "[/b]" },
        "i" | "em" => Template::Wrap { prefix: "[i]", suffix: "[/i]" },
        "u" => Template::Wrap { prefix: "[u]", suffix: "[/u]" },
        "s" | "strike" => Template::Wrap { prefix: "[strike]", suffix: "[/strike]" },
        "a" => Template::Link,
        "h1" => Template::Wrap { prefix: "[h1]", suffix: "[/h1]" },
        "h2" => Template::Wrap { prefix: "[h2]", suffix: "[/h2]" },
        "h3" => Template::Wrap { prefix: "[h3]", suffix: "[/h3]" },
        "ul" => Template::Wrap { prefix: "[list]", suffix: "[/list]" },
        "ol" => Template::Wrap { prefix: "[olist]", suffix: "[/olist]" },
        "li" => Template::Prefix { prefix: "[*]" },
        "table" => Template::Wrap { prefix: "[table]", suffix: "[/table]" },
        "tr" => Template::Wrap { prefix: "[tr]", suffix: "[/tr]" },
        "th" => Template::Wrap { prefix: "[th]", suffix: "[/th]" },
        "td" => Template::Wrap { prefix: "[td]", suffix: "[/td]" },
        "hr" => Template::Literal { text: "[hr][/hr]" },
        "code" => Template::Wrap { prefix: "[code]", suffix: "[/code]" },
        "blockquote" => Template::Wrap { prefix: "[quote]", suffix: "[/quote]" },
        "img" => Template::Image,
        "br" => Template::Literal { text: "\n" },
        _ => return None,
    };
    Some(t)
}
