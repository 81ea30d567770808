//! Selectors for querying rendered trees.
//!
//! Supports the subset of CSS that component tests lean on: tag names, `*`,
//! `#id`, `.class`, `[attr]`, `[attr=value]` (value quoted or bare) and the
//! descendant combinator. Nested components left in a shallow tree match by
//! their component name, and their scalar props act as attributes.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::node::{ComponentNode, Element, Node};
use crate::result::{DescribeError, DescribeResult};

const SIMPLE_SELECTOR: &str = r#"^(?:(?P<tag>\*|[A-Za-z][A-Za-z0-9_-]*)|#(?P<id>[A-Za-z0-9_-]+)|\.(?P<class>[A-Za-z0-9_-]+)|\[\s*(?P<attr>[A-Za-z_][A-Za-z0-9_:.-]*)\s*(?:=\s*(?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)'|(?P<bare>[^\]\s"']+))\s*)?\])"#;

static SIMPLE: OnceLock<Regex> = OnceLock::new();

fn simple_selector_regex() -> DescribeResult<&'static Regex> {
    if let Some(re) = SIMPLE.get() {
        return Ok(re);
    }
    let re = Regex::new(SIMPLE_SELECTOR).map_err(|e| DescribeError::Selector {
        selector: SIMPLE_SELECTOR.to_string(),
        message: e.to_string(),
    })?;
    Ok(SIMPLE.get_or_init(|| re))
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttributeMatch {
    name: String,
    value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<AttributeMatch>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attributes.is_empty()
    }

    fn matches(&self, node: &Node) -> bool {
        match node {
            Node::Element(el) => self.matches_element(el),
            Node::Component(c) => self.matches_component(c),
            Node::Text(_) => false,
        }
    }

    fn matches_element(&self, el: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && !tag.eq_ignore_ascii_case(el.tag()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.id() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| el.classes().any(|have| have == c)) {
            return false;
        }
        self.attributes.iter().all(|attr| match el.get_attr(&attr.name) {
            None => false,
            Some(actual) => attr.value.as_deref().map_or(true, |want| actual == want),
        })
    }

    fn matches_component(&self, node: &ComponentNode) -> bool {
        if let Some(tag) = &self.tag {
            if tag != "*" && *tag != node.name() {
                return false;
            }
        }
        let prop = |name: &str| node.props().get(name).and_then(|v| v.to_attribute_value());
        if let Some(id) = &self.id {
            if prop("id").as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class = prop("class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|c| class.split_whitespace().any(|have| have == c))
            {
                return false;
            }
        }
        self.attributes.iter().all(|attr| match prop(&attr.name) {
            None => false,
            Some(actual) => attr.value.as_deref().map_or(true, |want| actual == want),
        })
    }
}

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    compounds: Vec<Compound>,
}

impl Selector {
    /// Parse a selector string.
    pub fn parse(source: &str) -> DescribeResult<Self> {
        let re = simple_selector_regex()?;
        let error = |message: String| DescribeError::Selector {
            selector: source.to_string(),
            message,
        };

        let mut compounds = Vec::new();
        let mut current = Compound::default();
        let mut rest = source.trim();
        let mut pos = source.len() - source.trim_start().len();

        if rest.is_empty() {
            return Err(error("selector is empty".to_string()));
        }

        while !rest.is_empty() {
            let trimmed = rest.trim_start();
            if trimmed.len() != rest.len() {
                pos += rest.len() - trimmed.len();
                rest = trimmed;
                if !current.is_empty() {
                    compounds.push(std::mem::take(&mut current));
                }
                continue;
            }

            let Some(caps) = re.captures(rest) else {
                let found = rest.chars().next().unwrap_or_default();
                return Err(error(format!("unexpected `{found}` at offset {pos}")));
            };

            if let Some(tag) = caps.name("tag") {
                if !current.is_empty() {
                    return Err(error(format!(
                        "tag `{}` must start a compound selector (offset {pos})",
                        tag.as_str()
                    )));
                }
                current.tag = Some(tag.as_str().to_string());
            } else if let Some(id) = caps.name("id") {
                current.id = Some(id.as_str().to_string());
            } else if let Some(class) = caps.name("class") {
                current.classes.push(class.as_str().to_string());
            } else if let Some(attr) = caps.name("attr") {
                let value = caps
                    .name("dq")
                    .or_else(|| caps.name("sq"))
                    .or_else(|| caps.name("bare"))
                    .map(|m| m.as_str().to_string());
                current.attributes.push(AttributeMatch {
                    name: attr.as_str().to_string(),
                    value,
                });
            }

            let consumed = caps.get(0).map_or(0, |m| m.end());
            pos += consumed;
            rest = &rest[consumed..];
        }

        if !current.is_empty() {
            compounds.push(current);
        }

        Ok(Self {
            source: source.trim().to_string(),
            compounds,
        })
    }

    /// The selector text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check whether the last node of `path` matches.
    ///
    /// `path` runs from the search root down to the candidate node; earlier
    /// entries are the candidate's ancestors.
    #[must_use]
    pub fn matches_path(&self, path: &[&Node]) -> bool {
        let Some((candidate, ancestors)) = path.split_last() else {
            return false;
        };
        let Some((last, outer)) = self.compounds.split_last() else {
            return false;
        };
        if !last.matches(candidate) {
            return false;
        }

        let mut remaining = outer.iter().rev();
        let mut pending = remaining.next();
        for ancestor in ancestors.iter().rev() {
            let Some(compound) = pending else {
                break;
            };
            if compound.matches(ancestor) {
                pending = remaining.next();
            }
        }
        pending.is_none()
    }

    /// Collect every node under (and including) `root` that matches.
    #[must_use]
    pub fn select_all(&self, root: &Node) -> Vec<Node> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.collect(root, &mut path, &mut out);
        out
    }

    /// Collect matches among the descendants of `root`, excluding `root`.
    #[must_use]
    pub fn select_descendants(&self, root: &Node) -> Vec<Node> {
        let mut out = Vec::new();
        let mut path = vec![root];
        self.collect_children(root, &mut path, &mut out);
        out
    }

    fn collect<'a>(&self, node: &'a Node, path: &mut Vec<&'a Node>, out: &mut Vec<Node>) {
        path.push(node);
        if self.matches_path(path) {
            out.push(node.clone());
        }
        self.collect_children(node, path, out);
        let _ = path.pop();
    }

    fn collect_children<'a>(&self, node: &'a Node, path: &mut Vec<&'a Node>, out: &mut Vec<Node>) {
        match node.child_nodes() {
            Cow::Borrowed(children) => {
                for child in children {
                    self.collect(child, path, out);
                }
            }
            // Placeholder children are built on demand and cannot borrow
            // from the tree, so they get their own copy of the path.
            Cow::Owned(children) => {
                let mut local: Vec<&Node> = path.clone();
                for child in &children {
                    self.collect(child, &mut local, out);
                }
            }
        }
    }
}

impl FromStr for Selector {
    type Err = DescribeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::component::FnComponent;
    use crate::props::Props;

    fn tree() -> Node {
        Node::from(
            Element::new("div")
                .attr("data-component-name", "ColorableDiv")
                .style("color", "red")
                .child(
                    Element::new("ul")
                        .attr("class", "list compact")
                        .child(Element::new("li").attr("id", "first").child("one"))
                        .child(Element::new("li").child("two")),
                )
                .child(Element::new("span").attr("id", "some-child")),
        )
    }

    fn count(selector: &str) -> usize {
        Selector::parse(selector).unwrap().select_all(&tree()).len()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_compound() {
            let sel = Selector::parse("span#some-child.a[data-x='1']").unwrap();
            assert_eq!(sel.compounds.len(), 1);
            let c = &sel.compounds[0];
            assert_eq!(c.tag.as_deref(), Some("span"));
            assert_eq!(c.id.as_deref(), Some("some-child"));
            assert_eq!(c.classes, vec!["a".to_string()]);
            assert_eq!(c.attributes[0].value.as_deref(), Some("1"));
        }

        #[test]
        fn test_parse_descendant() {
            let sel = Selector::parse("  div   ul li ").unwrap();
            assert_eq!(sel.compounds.len(), 3);
            assert_eq!(sel.as_str(), "div   ul li");
        }

        #[test]
        fn test_parse_quoted_value_with_space() {
            let sel = Selector::parse(r#"[title="a b"]"#).unwrap();
            assert_eq!(sel.compounds.len(), 1);
            assert_eq!(sel.compounds[0].attributes[0].value.as_deref(), Some("a b"));
        }

        #[test]
        fn test_parse_errors() {
            assert!(Selector::parse("").is_err());
            assert!(Selector::parse("   ").is_err());
            assert!(Selector::parse("div > span").is_err());
            assert!(Selector::parse("[unclosed").is_err());
            assert!(Selector::parse(".a div").is_ok());
            assert!(Selector::parse("#a div").is_ok());
            assert!(Selector::parse("#adiv").is_ok());
            let err = Selector::parse("a,b").unwrap_err();
            assert!(err.to_string().contains("unexpected `,`"));
        }

        #[test]
        fn test_from_str() {
            let sel: Selector = "li".parse().unwrap();
            assert_eq!(sel.to_string(), "li");
        }
    }

    mod match_tests {
        use super::*;

        #[test]
        fn test_tag_includes_root() {
            assert_eq!(count("div"), 1);
            assert_eq!(count("li"), 2);
            assert_eq!(count("*"), 5);
        }

        #[test]
        fn test_attribute_value() {
            assert_eq!(count(r#"[data-component-name="ColorableDiv"]"#), 1);
            assert_eq!(count("[data-component-name=Other]"), 0);
            assert_eq!(count("[data-component-name]"), 1);
        }

        #[test]
        fn test_style_attribute() {
            assert_eq!(count(r#"[style="color:red;"]"#), 1);
        }

        #[test]
        fn test_id_and_class() {
            assert_eq!(count("#first"), 1);
            assert_eq!(count("span#some-child"), 1);
            assert_eq!(count("div#some-child"), 0);
            assert_eq!(count(".compact"), 1);
            assert_eq!(count("ul.list.compact"), 1);
            assert_eq!(count(".missing"), 0);
        }

        #[test]
        fn test_descendant() {
            assert_eq!(count("div li"), 2);
            assert_eq!(count("ul #first"), 1);
            assert_eq!(count("span li"), 0);
            assert_eq!(count("div ul li"), 2);
        }

        #[test]
        fn test_select_descendants_excludes_root() {
            let sel = Selector::parse("div").unwrap();
            assert!(sel.select_descendants(&tree()).is_empty());
            let sel = Selector::parse("li").unwrap();
            assert_eq!(sel.select_descendants(&tree()).len(), 2);
        }

        #[test]
        fn test_component_placeholder_matches_by_name() {
            let avatar = FnComponent::new(|_| None).named("Avatar");
            let root = Node::from(Element::new("div").child(Node::component(
                avatar,
                Props::new()
                    .with("size", 32)
                    .with("children", Element::new("img").attr("id", "pic")),
            )));
            let find = |s: &str| Selector::parse(s).unwrap().select_all(&root).len();
            assert_eq!(find("Avatar"), 1);
            assert_eq!(find("Avatar[size=32]"), 1);
            assert_eq!(find("Avatar[size=16]"), 0);
            assert_eq!(find("Avatar #pic"), 1);
            assert_eq!(find("avatar"), 0);
        }
    }
}
