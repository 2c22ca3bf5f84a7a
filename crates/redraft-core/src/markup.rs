//! Structured document content: an HTML-like node tree.
//!
//! `Markup` is the single representation for document content, whether the
//! wire form carried tags or was plain text. It always exposes a plain-text
//! projection (the concatenated text leaves in document order) and a
//! structural splice primitive, so callers never sniff content or walk a
//! browser DOM.
//!
//! The parser is lenient the way an editor surface is: unmatched closing
//! tags are dropped, open elements are closed at end of input, and anything
//! that does not look like a tag is text.

use std::fmt;
use std::ops::Range;

use smol_str::SmolStr;

/// Tags that never carry children and serialize without a closing tag.
const VOID_TAGS: &[&str] = &["br", "hr", "img"];

fn is_void(tag: &str) -> bool {
    VOID_TAGS.iter().any(|v| tag.eq_ignore_ascii_case(v))
}

/// A node in the markup tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// A text leaf. The parser never produces empty text leaves, so an
    /// empty leaf can only be the result of a splice and is pruned.
    Text(String),
}

/// An element with a tag name, its raw attribute text, and children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: SmolStr,
    /// Attribute text exactly as it appeared in the opening tag (may be
    /// empty). Kept opaque: the engine never interprets attributes.
    pub attrs: String,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<SmolStr>) -> Self {
        Self {
            tag: tag.into(),
            attrs: String::new(),
            children: Vec::new(),
        }
    }
}

/// Structured document content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Markup {
    roots: Vec<Node>,
}

impl Markup {
    /// Parse wire-format content. Plain text without tags parses to a
    /// single text leaf; malformed markup is repaired rather than rejected,
    /// matching what a rich-text surface would hand us.
    pub fn from_html(input: &str) -> Self {
        Parser::new(input).run()
    }

    pub fn roots(&self) -> &[Node] {
        &self.roots
    }

    /// Serialize back to wire format. Text is entity-escaped; attribute
    /// text is emitted verbatim.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.roots {
            write_node(node, &mut out);
        }
        out
    }

    /// The plain-text projection: concatenated text leaves in document
    /// order (pre-order traversal). This is the coordinate space used by
    /// `locate` and `splice`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.roots, &mut out);
        out
    }

    /// Length of the plain-text projection in chars.
    pub fn len_chars(&self) -> usize {
        fn walk(nodes: &[Node]) -> usize {
            nodes
                .iter()
                .map(|node| match node {
                    Node::Text(text) => text.chars().count(),
                    Node::Element(el) => walk(&el.children),
                })
                .sum()
        }
        walk(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Replace `char_range` of the plain-text projection with
    /// `replacement`.
    ///
    /// The replacement lands in the first affected text leaf, so it
    /// inherits that leaf's surrounding structure; the covered portion of
    /// later leaves is removed. Leaves emptied by the splice are pruned,
    /// along with elements this leaves childless. Elements that were
    /// already empty before the splice are untouched.
    pub fn splice(&mut self, char_range: Range<usize>, replacement: &str) {
        debug_assert!(char_range.start <= char_range.end);
        let mut leaves: Vec<&mut String> = Vec::new();
        collect_leaves(&mut self.roots, &mut leaves);

        let mut offset = 0usize;
        let mut inserted = false;
        for leaf in leaves {
            let leaf_start = offset;
            let leaf_end = offset + leaf.chars().count();
            offset = leaf_end;
            if leaf_end <= char_range.start || leaf_start >= char_range.end {
                continue;
            }
            let local_start = char_range.start.saturating_sub(leaf_start);
            let local_end = char_range.end.min(leaf_end) - leaf_start;
            let byte_start = char_to_byte(leaf, local_start);
            let byte_end = char_to_byte(leaf, local_end);
            if inserted {
                leaf.replace_range(byte_start..byte_end, "");
            } else {
                leaf.replace_range(byte_start..byte_end, replacement);
                inserted = true;
            }
            if leaf_end >= char_range.end {
                break;
            }
        }
        prune_emptied(&mut self.roots);
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl From<&str> for Markup {
    fn from(s: &str) -> Self {
        Self::from_html(s)
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

fn collect_leaves<'a>(nodes: &'a mut [Node], out: &mut Vec<&'a mut String>) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push(text),
            Node::Element(el) => collect_leaves(&mut el.children, out),
        }
    }
}

/// Remove text leaves emptied by a splice, and elements that lost all of
/// their children as a result. Elements that had no children to begin
/// with are kept: the splice never touched them.
fn prune_emptied(nodes: &mut Vec<Node>) {
    nodes.retain_mut(|node| match node {
        Node::Text(text) => !text.is_empty(),
        Node::Element(el) => {
            if is_void(&el.tag) || el.children.is_empty() {
                return true;
            }
            prune_emptied(&mut el.children);
            !el.children.is_empty()
        }
    });
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => escape_text(text, out),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            if !el.attrs.is_empty() {
                out.push(' ');
                out.push_str(&el.attrs);
            }
            out.push('>');
            for child in &el.children {
                write_node(child, out);
            }
            if !is_void(&el.tag) {
                out.push_str("</");
                out.push_str(&el.tag);
                out.push('>');
            }
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    /// Open elements; children accumulate in each frame until it closes.
    stack: Vec<Element>,
    roots: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn run(mut self) -> Markup {
        while self.pos < self.input.len() {
            let rest = &self.input[self.pos..];
            match rest.find('<') {
                Some(0) => self.consume_tag(),
                Some(text_len) => {
                    self.push_text(&rest[..text_len]);
                    self.pos += text_len;
                }
                None => {
                    self.push_text(rest);
                    self.pos = self.input.len();
                }
            }
        }
        // Close anything still open at end of input.
        while let Some(el) = self.stack.pop() {
            self.append(Node::Element(el));
        }
        Markup { roots: self.roots }
    }

    fn consume_tag(&mut self) {
        let rest = &self.input[self.pos..];
        if let Some(comment) = rest.strip_prefix("<!--") {
            let skip = match comment.find("-->") {
                Some(end) => 4 + end + 3,
                None => rest.len(),
            };
            self.pos += skip;
            return;
        }
        if rest.starts_with("<!") {
            self.pos += rest.find('>').map(|end| end + 1).unwrap_or(rest.len());
            return;
        }
        let Some(close) = rest.find('>') else {
            // No closing angle bracket anywhere: the '<' is literal text.
            self.push_text(rest);
            self.pos = self.input.len();
            return;
        };
        let inner = &rest[1..close];
        if let Some(name) = inner.strip_prefix('/') {
            self.close_element(name.trim());
            self.pos += close + 1;
            return;
        }
        let (inner, self_closing) = match inner.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (inner, false),
        };
        let name_len = inner
            .find(|c: char| c.is_ascii_whitespace())
            .unwrap_or(inner.len());
        let (name, attrs) = inner.split_at(name_len);
        if name.is_empty() || !name.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
            // Not a tag ("<3", "< ", ...): keep the '<' as text.
            self.push_text("<");
            self.pos += 1;
            return;
        }
        let element = Element {
            tag: SmolStr::new(name.to_ascii_lowercase()),
            attrs: attrs.trim().to_owned(),
            children: Vec::new(),
        };
        if self_closing || is_void(&element.tag) {
            self.append(Node::Element(element));
        } else {
            self.stack.push(element);
        }
        self.pos += close + 1;
    }

    fn close_element(&mut self, name: &str) {
        let matches_at = self
            .stack
            .iter()
            .rposition(|el| el.tag.eq_ignore_ascii_case(name));
        // Unmatched closing tag: drop it.
        let Some(index) = matches_at else { return };
        // Implicitly close anything opened after the matching element.
        while self.stack.len() > index {
            if let Some(el) = self.stack.pop() {
                self.append(Node::Element(el));
            }
        }
    }

    fn append(&mut self, node: Node) {
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        siblings.push(node);
    }

    fn push_text(&mut self, raw: &str) {
        if raw.is_empty() {
            return;
        }
        let decoded = decode_entities(raw);
        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };
        if let Some(Node::Text(prev)) = siblings.last_mut() {
            prev.push_str(&decoded);
        } else {
            siblings.push(Node::Text(decoded));
        }
    }
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let Some(semi) = rest[..rest.len().min(10)].find(';') else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let entity = &rest[1..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => entity
                .strip_prefix('#')
                .and_then(|num| match num.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => num.parse().ok(),
                })
                .and_then(char::from_u32),
        };
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
