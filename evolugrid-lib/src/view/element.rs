use super::Action;

/// Element kinds the grid produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// `div`
    Div,
    /// `span`
    Span,
    /// `table`
    Table,
    /// Table row.
    Tr,
    /// Header cell.
    Th,
    /// Body cell.
    Td,
    /// Link, used for sort triggers.
    A,
    /// Icon.
    I,
}

impl Tag {
    /// HTML tag name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Table => "table",
            Self::Tr => "tr",
            Self::Th => "th",
            Self::Td => "td",
            Self::A => "a",
            Self::I => "i",
        }
    }
}

/// A child of an element.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Plain text, escaped on output.
    Text(String),
    /// Trusted markup, inserted verbatim.
    Html(String),
}

/// An element of the grid's container tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Element kind.
    pub tag: Tag,
    /// `id` attribute.
    pub id: Option<String>,
    /// CSS classes, without duplicates.
    pub classes: Vec<String>,
    /// Rendered with `display:none`.
    pub hidden: bool,
    /// Set on triggers.
    pub action: Option<Action>,
    /// Child nodes, in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            classes: Vec::new(),
            hidden: false,
            action: None,
            children: Vec::new(),
        }
    }

    /// Creates an empty `div`.
    pub fn div() -> Self {
        Self::new(Tag::Div)
    }

    /// Sets the id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds classes; `classes` may hold several, space separated.
    pub fn with_class(mut self, classes: &str) -> Self {
        self.add_class(classes);
        self
    }

    /// Adds classes in place; see [`Element::with_class`].
    pub fn add_class(&mut self, classes: &str) {
        for class in classes.split_whitespace() {
            if !self.has_class(class) {
                self.classes.push(class.to_string());
            }
        }
    }

    /// Whether the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Marks the element hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Makes the element a trigger for `action`.
    pub fn on_activate(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Appends a child element.
    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    /// Appends plain text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Appends trusted markup.
    pub fn html(mut self, html: impl Into<String>) -> Self {
        self.children.push(Node::Html(html.into()));
        self
    }

    /// Appends a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    /// Removes all children.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Direct element children.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// Depth-first search, including `self`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.elements().find_map(|child| child.find(predicate))
    }

    /// Depth-first search, including `self`.
    pub fn find_mut(&mut self, predicate: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|node| match node {
            Node::Element(child) => child.find_mut(predicate),
            _ => None,
        })
    }

    /// Every descendant (and `self`) matching the predicate, in document order.
    pub fn find_all(&self, predicate: &dyn Fn(&Element) -> bool) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect(predicate, &mut found);
        found
    }

    fn collect<'a>(&'a self, predicate: &dyn Fn(&Element) -> bool, found: &mut Vec<&'a Element>) {
        if predicate(self) {
            found.push(self);
        }
        for child in self.elements() {
            child.collect(predicate, found);
        }
    }

    /// First element carrying `class`, including `self`.
    pub fn find_by_class(&self, class: &str) -> Option<&Element> {
        self.find(&|e| e.has_class(class))
    }

    /// First element with `tag`, including `self`.
    pub fn find_by_tag(&self, tag: Tag) -> Option<&Element> {
        self.find(&|e| e.tag == tag)
    }

    /// Triggers in document order.
    pub fn actions(&self) -> Vec<&Action> {
        self.find_all(&|e| e.action.is_some())
            .into_iter()
            .filter_map(|e| e.action.as_ref())
            .collect()
    }

    /// Concatenated text and markup of the subtree, without tags.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Element(element) => out.push_str(&element.text_content()),
                Node::Text(text) | Node::Html(text) => out.push_str(text),
            }
        }
        out
    }
}
