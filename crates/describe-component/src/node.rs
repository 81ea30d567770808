//! Render output tree.
//!
//! A component renders to a [`Node`]. Element nodes carry attributes, inline
//! style and children. Component nodes stand for a nested component that has
//! not been expanded yet; full and static renders expand them, shallow
//! renders leave them in place.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::component::{component_name, Component};
use crate::props::Props;

/// A node in a rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// An element such as `<div>`
    Element(Element),
    /// A text node
    Text(String),
    /// An unexpanded nested component
    Component(ComponentNode),
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create a nested component node.
    #[must_use]
    pub fn component<C: Component>(component: C, props: Props) -> Self {
        Self::Component(ComponentNode::new(Rc::new(component), props))
    }

    /// Create a nested component node from a shared component.
    #[must_use]
    pub fn shared_component(component: Rc<dyn Component>, props: Props) -> Self {
        Self::Component(ComponentNode::new(component, props))
    }

    /// Borrow as an element.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Borrow as a component placeholder.
    #[must_use]
    pub const fn as_component(&self) -> Option<&ComponentNode> {
        match self {
            Self::Component(c) => Some(c),
            _ => None,
        }
    }

    /// Child nodes. A component placeholder's children are its `children` prop.
    #[must_use]
    pub fn child_nodes(&self) -> Cow<'_, [Node]> {
        match self {
            Self::Element(el) => Cow::Borrowed(el.children.as_slice()),
            Self::Component(c) => Cow::Owned(c.props.children()),
            Self::Text(_) => Cow::Borrowed(&[][..]),
        }
    }

    /// Concatenated text of this node and its descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            _ => self.child_nodes().iter().map(Self::text_content).collect(),
        }
    }
}

impl From<Element> for Node {
    fn from(value: Element) -> Self {
        Self::Element(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// An element with attributes, inline style and children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    /// Set an inline style property.
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.style.push((property, value)),
        }
        self
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Explicit attributes in insertion order (style excluded).
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Inline style properties in insertion order.
    pub fn style_properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.style.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    /// Serialized inline style (`color:red;`), `None` when there is none.
    #[must_use]
    pub fn style_attribute(&self) -> Option<String> {
        if self.style.is_empty() {
            return None;
        }
        Some(
            self.style
                .iter()
                .map(|(p, v)| format!("{p}:{v};"))
                .collect(),
        )
    }

    /// Look up one inline style property.
    #[must_use]
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an attribute. `style` resolves to the serialized inline style.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<Cow<'_, str>> {
        if name == "style" {
            return self.style_attribute().map(Cow::Owned);
        }
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| Cow::Borrowed(v.as_str()))
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == "id")
            .map(|(_, v)| v.as_str())
    }

    /// Whitespace-separated entries of the `class` attribute.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(n, _)| n == "class")
            .flat_map(|(_, v)| v.split_whitespace())
    }

    /// Child nodes.
    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn replace_children(&mut self, children: Vec<Node>) {
        self.children = children;
    }
}

/// A nested component that has not been expanded.
#[derive(Clone)]
pub struct ComponentNode {
    component: Rc<dyn Component>,
    props: Props,
}

impl ComponentNode {
    /// Create a placeholder for `component` rendered with `props`.
    #[must_use]
    pub fn new(component: Rc<dyn Component>, props: Props) -> Self {
        Self { component, props }
    }

    /// The component.
    #[must_use]
    pub fn component(&self) -> &Rc<dyn Component> {
        &self.component
    }

    /// The props it will be rendered with.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Display name of the component.
    #[must_use]
    pub fn name(&self) -> String {
        component_name(self.component.as_ref())
    }
}

impl PartialEq for ComponentNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.component, &other.component) && self.props == other.props
    }
}

impl fmt::Debug for ComponentNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("name", &self.name())
            .field("props", &self.props)
            .finish()
    }
}
