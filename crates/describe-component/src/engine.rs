//! Rendering engines.
//!
//! The suite factory never renders anything itself. It asks a
//! [`RenderEngine`] for one of three handles and tears them down through
//! [`Teardown`] after each test. [`VirtualDom`] is the in-crate engine: it
//! expands components into a [`Node`] tree in memory.

use std::rc::Rc;

use tracing::trace;

use crate::component::{component_name, Component};
use crate::node::Node;
use crate::props::Props;
use crate::result::{DescribeError, DescribeResult};
use crate::wrapper::{MountedWrapper, ShallowWrapper, StaticWrapper};

/// Maximum nesting of components expanded by [`VirtualDom`].
pub const MAX_RENDER_DEPTH: usize = 64;

/// Release a rendered handle after a test.
pub trait Teardown {
    /// Unmount or otherwise release the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine fails to release the handle.
    fn teardown(&self) -> DescribeResult<()>;
}

/// Extra inputs for a render beyond the component's own props.
///
/// ```
/// use describe_component::RenderOptions;
///
/// let options = RenderOptions::new().with_context([("theme", "dark")]);
/// assert_eq!(options.context().get_str("theme"), Some("dark"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    context: Props,
}

impl RenderOptions {
    /// Options with an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the context handed to every component in the rendered tree.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<Props>) -> Self {
        self.context = context.into();
        self
    }

    /// Context handed to components.
    #[must_use]
    pub const fn context(&self) -> &Props {
        &self.context
    }
}

/// Capability that turns a component and props into queryable handles.
pub trait RenderEngine {
    /// Handle produced by a full render.
    type Mounted: Teardown;
    /// Handle produced by a one-level render.
    type Shallow: Teardown;
    /// Handle produced by a static markup render.
    type Static: Teardown;

    /// Render the whole subtree and run mount lifecycle hooks.
    fn full_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<Self::Mounted>;

    /// Render one level; nested components are not expanded.
    fn shallow_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<Self::Shallow>;

    /// Render to static markup.
    fn static_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<Self::Static>;
}

/// In-memory rendering engine.
#[derive(Debug, Clone, Copy)]
pub struct VirtualDom {
    max_depth: usize,
}

impl Default for VirtualDom {
    fn default() -> Self {
        Self {
            max_depth: MAX_RENDER_DEPTH,
        }
    }
}

impl VirtualDom {
    /// Create an engine with the default depth limit.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the component nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Current nesting limit.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl RenderEngine for VirtualDom {
    type Mounted = MountedWrapper;
    type Shallow = ShallowWrapper;
    type Static = StaticWrapper;

    fn full_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<MountedWrapper> {
        MountedWrapper::mount(
            Rc::clone(component),
            props.clone(),
            options.context().clone(),
            self.max_depth,
        )
    }

    fn shallow_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<ShallowWrapper> {
        ShallowWrapper::mount(Rc::clone(component), props.clone(), options.context().clone())
    }

    fn static_render(
        &self,
        component: &Rc<dyn Component>,
        props: &Props,
        options: &RenderOptions,
    ) -> DescribeResult<StaticWrapper> {
        let expansion = expand(component, props, options.context(), self.max_depth)?;
        Ok(StaticWrapper::new(expansion.tree))
    }
}

/// A component instance created while expanding a tree.
pub(crate) type Instance = (Rc<dyn Component>, Props);

/// Result of fully expanding a component.
pub(crate) struct Expansion {
    pub(crate) tree: Option<Node>,
    /// Instances in post-order: children before their parents.
    pub(crate) instances: Vec<Instance>,
}

/// Render `component` and every nested component below it. Every component
/// in the tree sees the same `context`.
pub(crate) fn expand(
    component: &Rc<dyn Component>,
    props: &Props,
    context: &Props,
    max_depth: usize,
) -> DescribeResult<Expansion> {
    let mut instances = Vec::new();
    let root = Node::shared_component(Rc::clone(component), props.clone());
    let tree = expand_node(&root, context, 0, max_depth, &mut instances)?;
    Ok(Expansion { tree, instances })
}

fn expand_node(
    node: &Node,
    context: &Props,
    depth: usize,
    max_depth: usize,
    instances: &mut Vec<Instance>,
) -> DescribeResult<Option<Node>> {
    match node {
        Node::Text(_) => Ok(Some(node.clone())),
        Node::Element(el) => {
            let mut children = Vec::with_capacity(el.child_nodes().len());
            for child in el.child_nodes() {
                if let Some(expanded) = expand_node(child, context, depth, max_depth, instances)? {
                    children.push(expanded);
                }
            }
            let mut el = el.clone();
            el.replace_children(children);
            Ok(Some(Node::Element(el)))
        }
        Node::Component(c) => {
            if depth >= max_depth {
                return Err(DescribeError::render(format!(
                    "component nesting exceeded {max_depth} levels while rendering {}",
                    c.name()
                )));
            }
            trace!(component = %c.name(), depth, "expanding component");
            let output = c.component().render_with_context(c.props(), context);
            let expanded = match output {
                Some(out) => expand_node(&out, context, depth + 1, max_depth, instances)?,
                None => None,
            };
            instances.push((Rc::clone(c.component()), c.props().clone()));
            Ok(expanded)
        }
    }
}

/// Run `component_did_mount` for every instance, children first.
pub(crate) fn did_mount_all(instances: &[Instance]) {
    for (component, props) in instances {
        component.component_did_mount(props);
    }
}

/// Run `component_will_unmount` for every instance, parents first.
pub(crate) fn will_unmount_all(instances: &[Instance]) {
    for (component, props) in instances.iter().rev() {
        trace!(component = %component_name(component.as_ref()), "unmounting component");
        component.component_will_unmount(props);
    }
}
