//! Lenient HTML document model: parse, mutate, serialize.
//!
//! DESIGN
//! ======
//! Generated project code is untrusted and frequently sloppy, so the parser
//! never fails: unknown or malformed constructs degrade to text nodes,
//! stray close tags are ignored, and unclosed elements are closed at end of
//! input. The serializer is deterministic — serializing the same tree twice
//! yields byte-identical output, which is what makes strip-before-export
//! idempotent.
//!
//! Entities are passed through untouched in both directions. Text written
//! back into the tree through [`Element::set_text`] is escaped on the way in.

use bridge::ElementLocator;

/// Elements that never have children or a close tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose content is raw text up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

// =============================================================================
// TREE
// =============================================================================

/// One attribute on an element. `value` is `None` for bare attributes
/// like `data-ai-selected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// An element node: lowercase tag, attributes in source order, children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
}

/// A node in the parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `<!...>` declaration, stored without the angle brackets or `!`.
    Doctype(String),
    /// `<!-- ... -->` comment, stored without the delimiters.
    Comment(String),
    /// Raw text, entities untouched.
    Text(String),
    Element(Element),
}

/// A parsed HTML document: an ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

// =============================================================================
// PARSER
// =============================================================================

/// Parse HTML text into a document. Never fails; see the module docs for
/// how malformed input degrades.
#[must_use]
pub fn parse(input: &str) -> Document {
    let mut parser = Parser { bytes: input.as_bytes(), input, pos: 0 };
    let nodes = parser.parse_nodes(&mut Vec::new());
    Document { nodes }
}

struct Parser<'a> {
    bytes: &'a [u8],
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    /// Parse sibling nodes, appending implicit closes to `open_tags` when a
    /// close tag for an outer element is seen.
    fn parse_nodes(&mut self, open_tags: &mut Vec<String>) -> Vec<Node> {
        let mut nodes = Vec::new();

        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] == b'<' {
                if let Some(tag) = self.peek_close_tag() {
                    if open_tags.iter().any(|t| *t == tag) {
                        // Close of this or an ancestor element: stop here and
                        // let the matching caller consume it.
                        break;
                    }
                    // Stray close tag with no open counterpart: drop it.
                    self.consume_close_tag();
                    continue;
                }
                if let Some(node) = self.parse_markup(open_tags) {
                    nodes.push(node);
                    continue;
                }
                // `<` that does not start valid markup: fall through as text.
            }
            nodes.push(Node::Text(self.consume_text()));
        }

        nodes
    }

    /// Parse one `<...>` construct. Returns `None` when the `<` at the
    /// current position does not begin valid markup.
    fn parse_markup(&mut self, open_tags: &mut Vec<String>) -> Option<Node> {
        if self.starts_with("<!--") {
            return Some(self.consume_comment());
        }
        if self.starts_with("<!") {
            return Some(self.consume_doctype());
        }

        let after_lt = self.pos + 1;
        if after_lt >= self.bytes.len() || !self.bytes[after_lt].is_ascii_alphabetic() {
            return None;
        }

        self.pos = after_lt;
        let tag = self.consume_tag_name();
        let (attrs, self_closed) = self.consume_attrs();

        if self_closed || is_void(&tag) {
            return Some(Node::Element(Element { tag, attrs, children: Vec::new() }));
        }

        if is_raw_text(&tag) {
            let text = self.consume_raw_text(&tag);
            let children = if text.is_empty() { Vec::new() } else { vec![Node::Text(text)] };
            return Some(Node::Element(Element { tag, attrs, children }));
        }

        open_tags.push(tag.clone());
        let children = self.parse_nodes(open_tags);
        open_tags.pop();

        // Consume our own close tag if it is the one we stopped on.
        if self.peek_close_tag().is_some_and(|t| t == tag) {
            self.consume_close_tag();
        }

        Some(Node::Element(Element { tag, attrs, children }))
    }

    fn starts_with(&self, prefix: &str) -> bool {
        self.input[self.pos..]
            .as_bytes()
            .starts_with(prefix.as_bytes())
    }

    /// If the current position is a close tag, return its lowercase name
    /// without consuming anything.
    fn peek_close_tag(&self) -> Option<String> {
        let rest = self.bytes.get(self.pos..)?;
        if rest.len() < 3 || rest[0] != b'<' || rest[1] != b'/' {
            return None;
        }
        let mut end = 2;
        while end < rest.len() && (rest[end].is_ascii_alphanumeric() || rest[end] == b'-') {
            end += 1;
        }
        if end == 2 {
            return None;
        }
        Some(self.input[self.pos + 2..self.pos + end].to_ascii_lowercase())
    }

    /// Consume a close tag through its `>` (or to end of input).
    fn consume_close_tag(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'>' {
            self.pos += 1;
        }
        if self.pos < self.bytes.len() {
            self.pos += 1;
        }
    }

    fn consume_comment(&mut self) -> Node {
        self.pos += 4;
        let start = self.pos;
        let end = self.input[start..]
            .find("-->")
            .map_or(self.bytes.len(), |i| start + i);
        let text = self.input[start..end].to_owned();
        self.pos = (end + 3).min(self.bytes.len());
        Node::Comment(text)
    }

    fn consume_doctype(&mut self) -> Node {
        self.pos += 2;
        let start = self.pos;
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'>' {
            self.pos += 1;
        }
        let text = self.input[start..self.pos].to_owned();
        if self.pos < self.bytes.len() {
            self.pos += 1;
        }
        Node::Doctype(text)
    }

    fn consume_tag_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_alphanumeric() || self.bytes[self.pos] == b'-')
        {
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    /// Consume attributes through the closing `>`. Returns the attributes and
    /// whether the tag was self-closed with `/>`.
    fn consume_attrs(&mut self) -> (Vec<Attr>, bool) {
        let mut attrs = Vec::new();
        let mut self_closed = false;

        loop {
            self.skip_whitespace();
            let Some(&byte) = self.bytes.get(self.pos) else {
                break;
            };
            if byte == b'>' {
                self.pos += 1;
                break;
            }
            if byte == b'/' {
                self.pos += 1;
                if self.bytes.get(self.pos) == Some(&b'>') {
                    self.pos += 1;
                    self_closed = true;
                    break;
                }
                continue;
            }

            let name = self.consume_attr_name();
            if name.is_empty() {
                // Junk byte inside the tag: skip it rather than spinning.
                self.pos += 1;
                continue;
            }

            self.skip_whitespace();
            if self.bytes.get(self.pos) == Some(&b'=') {
                self.pos += 1;
                self.skip_whitespace();
                let value = self.consume_attr_value();
                attrs.push(Attr { name, value: Some(value) });
            } else {
                attrs.push(Attr { name, value: None });
            }
        }

        (attrs, self_closed)
    }

    fn consume_attr_name(&mut self) -> String {
        let start = self.pos;
        while self.pos < self.bytes.len() {
            let b = self.bytes[self.pos];
            if b.is_ascii_whitespace() || b == b'=' || b == b'>' || b == b'/' {
                break;
            }
            self.pos += 1;
        }
        self.input[start..self.pos].to_ascii_lowercase()
    }

    fn consume_attr_value(&mut self) -> String {
        match self.bytes.get(self.pos) {
            Some(&quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let start = self.pos;
                while self.pos < self.bytes.len() && self.bytes[self.pos] != quote {
                    self.pos += 1;
                }
                let value = self.input[start..self.pos].to_owned();
                if self.pos < self.bytes.len() {
                    self.pos += 1;
                }
                value
            }
            _ => {
                let start = self.pos;
                while self.pos < self.bytes.len()
                    && !self.bytes[self.pos].is_ascii_whitespace()
                    && self.bytes[self.pos] != b'>'
                {
                    self.pos += 1;
                }
                self.input[start..self.pos].to_owned()
            }
        }
    }

    /// Consume raw-text content (script/style) up to the matching close tag.
    fn consume_raw_text(&mut self, tag: &str) -> String {
        let close = format!("</{tag}");
        let rest = &self.input[self.pos..];
        let lower = rest.to_ascii_lowercase();
        let end = lower.find(&close).unwrap_or(rest.len());
        let text = rest[..end].to_owned();
        self.pos += end;
        if self.peek_close_tag().is_some() {
            self.consume_close_tag();
        }
        text
    }

    fn consume_text(&mut self) -> String {
        let start = self.pos;
        // The byte at `start` may itself be `<` (rejected markup); always
        // take at least one byte so the parser advances.
        self.pos += 1;
        while self.pos < self.bytes.len() && self.bytes[self.pos] != b'<' {
            self.pos += 1;
        }
        self.input[start..self.pos].to_owned()
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

/// Escape text for inclusion in element content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

// =============================================================================
// SERIALIZATION
// =============================================================================

impl Document {
    /// Serialize the tree back to HTML text. Deterministic: the same tree
    /// always produces the same bytes.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            serialize_node(node, &mut out);
        }
        out
    }
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Doctype(text) => {
            out.push_str("<!");
            out.push_str(text);
            out.push('>');
        }
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for attr in &el.attrs {
                out.push(' ');
                out.push_str(&attr.name);
                if let Some(value) = &attr.value {
                    out.push_str("=\"");
                    out.push_str(&value.replace('"', "&quot;"));
                    out.push('"');
                }
            }
            out.push('>');
            if is_void(&el.tag) {
                return;
            }
            for child in &el.children {
                serialize_node(child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

// =============================================================================
// QUERIES & MUTATION
// =============================================================================

impl Document {
    /// The document element — the first top-level element node, typically
    /// `<html>`.
    #[must_use]
    pub fn document_element(&self) -> Option<&Element> {
        self.nodes.iter().find_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    fn document_element_mut(&mut self) -> Option<&mut Element> {
        self.nodes.iter_mut().find_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Resolve a locator to an element, if it still refers to one.
    #[must_use]
    pub fn resolve(&self, locator: &ElementLocator) -> Option<&Element> {
        match locator {
            ElementLocator::Id(id) => find_by_id(&self.nodes, id),
            ElementLocator::Path(steps) => {
                let mut current = self.document_element()?;
                for &step in steps {
                    current = element_children(&current.children).nth(step)?;
                }
                Some(current)
            }
        }
    }

    /// Mutable form of [`Document::resolve`].
    pub fn resolve_mut(&mut self, locator: &ElementLocator) -> Option<&mut Element> {
        match locator {
            ElementLocator::Id(id) => find_by_id_mut(&mut self.nodes, id),
            ElementLocator::Path(steps) => descend_mut(self.document_element_mut()?, steps),
        }
    }

    /// Remove every element whose `id` equals `id`, at any depth.
    pub fn remove_elements_by_id(&mut self, id: &str) {
        remove_by_id(&mut self.nodes, id);
    }

    /// Visit every element in the tree, depth-first, with a mutable borrow.
    pub fn for_each_element_mut(&mut self, visit: &mut impl FnMut(&mut Element)) {
        visit_elements_mut(&mut self.nodes, visit);
    }
}

fn element_children(children: &[Node]) -> impl Iterator<Item = &Element> {
    children.iter().filter_map(|n| match n {
        Node::Element(el) => Some(el),
        _ => None,
    })
}

fn element_children_mut(children: &mut [Node]) -> impl Iterator<Item = &mut Element> {
    children.iter_mut().filter_map(|n| match n {
        Node::Element(el) => Some(el),
        _ => None,
    })
}

fn descend_mut<'a>(el: &'a mut Element, steps: &[usize]) -> Option<&'a mut Element> {
    match steps.split_first() {
        None => Some(el),
        Some((&step, rest)) => {
            let child = element_children_mut(&mut el.children).nth(step)?;
            descend_mut(child, rest)
        }
    }
}

fn find_by_id<'a>(nodes: &'a [Node], id: &str) -> Option<&'a Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.attr("id") == Some(id) {
                return Some(el);
            }
            if let Some(found) = find_by_id(&el.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn find_by_id_mut<'a>(nodes: &'a mut [Node], id: &str) -> Option<&'a mut Element> {
    for node in nodes {
        if let Node::Element(el) = node {
            if el.attr("id") == Some(id) {
                return Some(el);
            }
            if let Some(found) = find_by_id_mut(&mut el.children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn remove_by_id(nodes: &mut Vec<Node>, id: &str) {
    nodes.retain(|node| match node {
        Node::Element(el) => el.attr("id") != Some(id),
        _ => true,
    });
    for node in nodes {
        if let Node::Element(el) = node {
            remove_by_id(&mut el.children, id);
        }
    }
}

fn visit_elements_mut(nodes: &mut [Node], visit: &mut impl FnMut(&mut Element)) {
    for node in nodes {
        if let Node::Element(el) = node {
            visit(el);
            visit_elements_mut(&mut el.children, visit);
        }
    }
}

impl Element {
    /// Attribute value by (case-insensitive) name. Bare attributes yield `""`.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    /// Set an attribute, replacing any existing value. Stored names are
    /// lowercase, so a mixed-case name updates rather than duplicates.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        if let Some(attr) = self.attrs.iter_mut().find(|a| a.name.eq_ignore_ascii_case(name)) {
            attr.value = Some(value.to_owned());
        } else {
            self.attrs
                .push(Attr { name: name.to_ascii_lowercase(), value: Some(value.to_owned()) });
        }
    }

    /// Set a bare (valueless) attribute if not already present.
    pub fn set_bare_attr(&mut self, name: &str) {
        if !self.attrs.iter().any(|a| a.name.eq_ignore_ascii_case(name)) {
            self.attrs.push(Attr { name: name.to_ascii_lowercase(), value: None });
        }
    }

    /// Remove an attribute entirely.
    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
    }

    /// Whether the `class` attribute contains `class_name`.
    #[must_use]
    pub fn has_class(&self, class_name: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class_name))
    }

    /// Add a class to the `class` attribute if absent.
    pub fn add_class(&mut self, class_name: &str) {
        if self.has_class(class_name) {
            return;
        }
        let classes = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class_name}"),
            _ => class_name.to_owned(),
        };
        self.set_attr("class", &classes);
    }

    /// Remove a class; drops the `class` attribute when it becomes empty.
    pub fn remove_class(&mut self, class_name: &str) {
        let Some(existing) = self.attr("class") else {
            return;
        };
        let remaining = existing
            .split_ascii_whitespace()
            .filter(|c| *c != class_name)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", &remaining);
        }
    }

    /// Inline style declarations as `(property, value)` pairs in source order.
    #[must_use]
    pub fn style_props(&self) -> Vec<(String, String)> {
        self.attr("style")
            .map(parse_style)
            .unwrap_or_default()
    }

    /// Set one inline style property, preserving the others.
    pub fn set_style_prop(&mut self, property: &str, value: &str) {
        let mut props = self.style_props();
        if let Some(entry) = props.iter_mut().find(|(p, _)| p == property) {
            entry.1 = value.to_owned();
        } else {
            props.push((property.to_owned(), value.to_owned()));
        }
        self.set_attr("style", &format_style(&props));
    }

    /// Remove one inline style property; drops the `style` attribute when it
    /// becomes empty.
    pub fn remove_style_prop(&mut self, property: &str) {
        let mut props = self.style_props();
        props.retain(|(p, _)| p != property);
        if props.is_empty() {
            self.remove_attr("style");
        } else {
            self.set_attr("style", &format_style(&props));
        }
    }

    /// Concatenated descendant text content.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Replace all children with a single text node. The text is escaped.
    pub fn set_text(&mut self, text: &str) {
        self.children = vec![Node::Text(escape_text(text))];
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
            _ => {}
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some((property.to_owned(), value.to_owned()))
        })
        .collect()
}

fn format_style(props: &[(String, String)]) -> String {
    props
        .iter()
        .map(|(p, v)| format!("{p}: {v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "html_test.rs"]
mod tests;
