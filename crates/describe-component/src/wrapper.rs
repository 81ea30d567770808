//! Handles returned by the [`VirtualDom`](crate::engine::VirtualDom) engine.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::component::{component_name, Component};
use crate::engine::{did_mount_all, expand, will_unmount_all, Instance, Teardown};
use crate::markup;
use crate::node::Node;
use crate::props::Props;
use crate::result::{DescribeError, DescribeResult};
use crate::selector::Selector;

/// Nodes matched by a selector.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSet {
    nodes: Vec<Node>,
}

impl NodeSet {
    /// Wrap a list of nodes.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First match.
    #[must_use]
    pub fn first(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Match at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Iterate matches.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Search the descendants of every match.
    pub fn find(&self, selector: &str) -> DescribeResult<Self> {
        let selector = Selector::parse(selector)?;
        Ok(Self::new(
            self.nodes
                .iter()
                .flat_map(|n| selector.select_descendants(n))
                .collect(),
        ))
    }

    /// Attribute of the first match. For nested component placeholders the
    /// scalar prop of that name is returned.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<String> {
        match self.first()? {
            Node::Element(el) => el.get_attr(name).map(|v| v.into_owned()),
            Node::Component(c) => c.props().get(name).and_then(|v| v.to_attribute_value()),
            Node::Text(_) => None,
        }
    }

    /// Inline style property of the first element.
    #[must_use]
    pub fn style(&self, property: &str) -> Option<String> {
        self.first()?
            .as_element()?
            .style_value(property)
            .map(str::to_string)
    }

    /// Text content of every match, concatenated.
    #[must_use]
    pub fn text(&self) -> String {
        self.nodes.iter().map(Node::text_content).collect()
    }

    /// Markup of every match, concatenated.
    #[must_use]
    pub fn html(&self) -> String {
        markup::to_markup_all(&self.nodes)
    }
}

impl<'a> IntoIterator for &'a NodeSet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}

fn find_in(tree: Option<&Node>, selector: &str) -> DescribeResult<NodeSet> {
    let selector = Selector::parse(selector)?;
    Ok(NodeSet::new(
        tree.map(|root| selector.select_all(root)).unwrap_or_default(),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    Full { max_depth: usize },
    Shallow,
}

struct LiveState {
    props: Props,
    tree: Option<Node>,
    instances: Vec<Instance>,
    mounted: bool,
}

/// Shared state of a live (mounted or shallow) render.
struct LiveRender {
    component: Rc<dyn Component>,
    context: Props,
    depth: Depth,
    state: RefCell<LiveState>,
}

impl LiveRender {
    fn mount(
        component: Rc<dyn Component>,
        props: Props,
        context: Props,
        depth: Depth,
    ) -> DescribeResult<Self> {
        let (tree, instances) = Self::render(&component, &props, &context, depth)?;
        debug!(
            component = %component_name(component.as_ref()),
            ?depth,
            props = %props.to_json(),
            "mounting"
        );
        did_mount_all(&instances);
        Ok(Self {
            component,
            context,
            depth,
            state: RefCell::new(LiveState {
                props,
                tree,
                instances,
                mounted: true,
            }),
        })
    }

    fn render(
        component: &Rc<dyn Component>,
        props: &Props,
        context: &Props,
        depth: Depth,
    ) -> DescribeResult<(Option<Node>, Vec<Instance>)> {
        match depth {
            Depth::Full { max_depth } => {
                let expansion = expand(component, props, context, max_depth)?;
                Ok((expansion.tree, expansion.instances))
            }
            Depth::Shallow => Ok((
                component.render_with_context(props, context),
                vec![(Rc::clone(component), props.clone())],
            )),
        }
    }

    fn name(&self) -> String {
        component_name(self.component.as_ref())
    }

    fn set_props(&self, partial: Props) -> DescribeResult<()> {
        let mut props = {
            let state = self.state.borrow();
            if !state.mounted {
                return Err(DescribeError::render(format!(
                    "cannot set props on {} after it was unmounted",
                    self.name()
                )));
            }
            state.props.clone()
        };
        props.merge(partial);
        // Render outside the borrow: components may read the wrapper.
        let (tree, instances) = Self::render(&self.component, &props, &self.context, self.depth)?;
        let mut state = self.state.borrow_mut();
        state.props = props;
        state.tree = tree;
        state.instances = instances;
        Ok(())
    }

    fn unmount(&self) {
        let instances = {
            let mut state = self.state.borrow_mut();
            if !state.mounted {
                return;
            }
            state.mounted = false;
            state.tree = None;
            std::mem::take(&mut state.instances)
        };
        debug!(component = %self.name(), depth = ?self.depth, "unmounting");
        will_unmount_all(&instances);
    }

    fn is_mounted(&self) -> bool {
        self.state.borrow().mounted
    }

    fn props(&self) -> Props {
        self.state.borrow().props.clone()
    }

    fn root(&self) -> Option<Node> {
        self.state.borrow().tree.clone()
    }

    fn find(&self, selector: &str) -> DescribeResult<NodeSet> {
        find_in(self.state.borrow().tree.as_ref(), selector)
    }

    fn html(&self) -> String {
        self.state
            .borrow()
            .tree
            .as_ref()
            .map(markup::to_markup)
            .unwrap_or_default()
    }
}

impl fmt::Debug for LiveRender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LiveRender")
            .field("component", &self.name())
            .field("depth", &self.depth)
            .field("props", &state.props)
            .field("mounted", &state.mounted)
            .finish()
    }
}

macro_rules! live_wrapper_methods {
    () => {
        /// Merge `partial` into the wrapper's props and re-render in place.
        ///
        /// This is how an already-rendered component receives new props.
        ///
        /// # Errors
        ///
        /// Fails if the wrapper was unmounted or the re-render fails.
        pub fn set_props(&self, partial: impl Into<Props>) -> DescribeResult<()> {
            self.inner.set_props(partial.into())
        }

        /// Props the component is currently rendered with.
        #[must_use]
        pub fn props(&self) -> Props {
            self.inner.props()
        }

        /// Render context the wrapper was created with; kept across `set_props`.
        #[must_use]
        pub fn context(&self) -> &Props {
            &self.inner.context
        }

        /// Unmount, running `component_will_unmount`. Repeated calls do nothing.
        pub fn unmount(&self) {
            self.inner.unmount();
        }

        /// Whether the wrapper is still mounted.
        #[must_use]
        pub fn is_mounted(&self) -> bool {
            self.inner.is_mounted()
        }

        /// Root of the rendered tree; `None` once unmounted or if nothing rendered.
        #[must_use]
        pub fn root(&self) -> Option<Node> {
            self.inner.root()
        }

        /// Find nodes in the rendered tree, root included.
        pub fn find(&self, selector: &str) -> DescribeResult<NodeSet> {
            self.inner.find(selector)
        }

        /// Markup of the rendered tree.
        #[must_use]
        pub fn html(&self) -> String {
            self.inner.html()
        }

        /// Display name of the rendered component.
        #[must_use]
        pub fn name(&self) -> String {
            self.inner.name()
        }
    };
}

/// Handle to a full render.
#[derive(Debug)]
pub struct MountedWrapper {
    inner: LiveRender,
}

impl MountedWrapper {
    /// Fully render and mount `component`.
    pub fn mount(
        component: Rc<dyn Component>,
        props: Props,
        context: Props,
        max_depth: usize,
    ) -> DescribeResult<Self> {
        Ok(Self {
            inner: LiveRender::mount(component, props, context, Depth::Full { max_depth })?,
        })
    }

    live_wrapper_methods!();
}

impl Teardown for MountedWrapper {
    fn teardown(&self) -> DescribeResult<()> {
        self.unmount();
        Ok(())
    }
}

/// Handle to a one-level render.
#[derive(Debug)]
pub struct ShallowWrapper {
    inner: LiveRender,
}

impl ShallowWrapper {
    /// Render `component` one level deep.
    pub fn mount(component: Rc<dyn Component>, props: Props, context: Props) -> DescribeResult<Self> {
        Ok(Self {
            inner: LiveRender::mount(component, props, context, Depth::Shallow)?,
        })
    }

    live_wrapper_methods!();
}

impl Teardown for ShallowWrapper {
    fn teardown(&self) -> DescribeResult<()> {
        self.unmount();
        Ok(())
    }
}

/// Handle to static markup.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticWrapper {
    tree: Option<Node>,
    markup: String,
}

impl StaticWrapper {
    /// Wrap an expanded tree.
    #[must_use]
    pub fn new(tree: Option<Node>) -> Self {
        let markup = tree.as_ref().map(markup::to_markup).unwrap_or_default();
        Self { tree, markup }
    }

    /// Serialized markup.
    #[must_use]
    pub fn html(&self) -> &str {
        &self.markup
    }

    /// Root of the rendered tree.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    /// Find nodes in the markup tree, root included.
    pub fn find(&self, selector: &str) -> DescribeResult<NodeSet> {
        find_in(self.tree.as_ref(), selector)
    }

    /// Text content of the whole tree.
    #[must_use]
    pub fn text(&self) -> String {
        self.tree.as_ref().map(Node::text_content).unwrap_or_default()
    }
}

impl Teardown for StaticWrapper {
    fn teardown(&self) -> DescribeResult<()> {
        Ok(())
    }
}
