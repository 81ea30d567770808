//! Components under test.

use std::fmt;

use crate::node::Node;
use crate::props::Props;

/// Name used when a component has neither a display name nor a type name.
pub const ANONYMOUS_COMPONENT: &str = "Anonymous Component";

/// A renderable UI component.
///
/// Implement `render` to map props to an output tree. Nested components are
/// expressed with [`Node::component`] and expanded by the rendering engine.
///
/// # Example
///
/// ```
/// use describe_component::{Component, Element, Node, Props};
///
/// struct Badge;
///
/// impl Component for Badge {
///     fn render(&self, props: &Props) -> Option<Node> {
///         let label = props.get_str("label").unwrap_or("new");
///         Some(Element::new("span").attr("class", "badge").child(label).into())
///     }
/// }
///
/// assert_eq!(Badge.structural_name().as_deref(), Some("Badge"));
/// ```
pub trait Component: 'static {
    /// Render with the given props. `None` renders nothing.
    fn render(&self, props: &Props) -> Option<Node>;

    /// Render with the props and the render context shared by the whole
    /// tree. Components that ignore context only implement `render`.
    fn render_with_context(&self, props: &Props, context: &Props) -> Option<Node> {
        let _ = context;
        self.render(props)
    }

    /// Explicit display name, preferred over the structural name.
    fn display_name(&self) -> Option<&str> {
        None
    }

    /// Name derived from the implementing type; `None` for closures.
    fn structural_name(&self) -> Option<String> {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Called after the component and its descendants are mounted.
    fn component_did_mount(&self, _props: &Props) {}

    /// Called before the component is unmounted.
    fn component_will_unmount(&self, _props: &Props) {}
}

fn short_type_name(full: &str) -> Option<String> {
    let without_generics = full.split('<').next().unwrap_or(full);
    let last = without_generics.rsplit("::").next().unwrap_or(without_generics);
    if last.is_empty() || last.starts_with('{') {
        None
    } else {
        Some(last.to_string())
    }
}

/// Name shown in suite titles and error messages.
///
/// Explicit display name, else structural name, else `"Anonymous Component"`.
#[must_use]
pub fn component_name(component: &dyn Component) -> String {
    if let Some(name) = component.display_name().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    component
        .structural_name()
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ANONYMOUS_COMPONENT.to_string())
}

type RenderFn = Box<dyn Fn(&Props, &Props) -> Option<Node>>;

/// A component backed by a render closure.
pub struct FnComponent {
    name: Option<String>,
    display_name: Option<String>,
    render: RenderFn,
}

impl FnComponent {
    /// Wrap a render closure. The component is anonymous until named.
    #[must_use]
    pub fn new<F>(render: F) -> Self
    where
        F: Fn(&Props) -> Option<Node> + 'static,
    {
        Self::with_context(move |props, _| render(props))
    }

    /// Wrap a render closure that also reads the render context.
    #[must_use]
    pub fn with_context<F>(render: F) -> Self
    where
        F: Fn(&Props, &Props) -> Option<Node> + 'static,
    {
        Self {
            name: None,
            display_name: None,
            render: Box::new(render),
        }
    }

    /// Set the structural name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set an explicit display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl Component for FnComponent {
    fn render(&self, props: &Props) -> Option<Node> {
        (self.render)(props, &Props::new())
    }

    fn render_with_context(&self, props: &Props, context: &Props) -> Option<Node> {
        (self.render)(props, context)
    }

    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn structural_name(&self) -> Option<String> {
        self.name.clone()
    }
}

impl fmt::Debug for FnComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnComponent")
            .field("name", &self.name)
            .field("display_name", &self.display_name)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::node::Element;
    use std::marker::PhantomData;

    struct Panel;

    impl Component for Panel {
        fn render(&self, _props: &Props) -> Option<Node> {
            Some(Element::new("section").into())
        }
    }

    struct Labelled;

    impl Component for Labelled {
        fn render(&self, _props: &Props) -> Option<Node> {
            None
        }

        fn display_name(&self) -> Option<&str> {
            Some("Fancy(Labelled)")
        }
    }

    struct Generic<T>(PhantomData<T>);

    impl<T: 'static> Component for Generic<T> {
        fn render(&self, _props: &Props) -> Option<Node> {
            None
        }
    }

    #[test]
    fn test_structural_name_from_type() {
        assert_eq!(component_name(&Panel), "Panel");
    }

    #[test]
    fn test_display_name_wins() {
        assert_eq!(component_name(&Labelled), "Fancy(Labelled)");
    }

    #[test]
    fn test_generic_args_are_stripped() {
        let c = Generic::<Vec<String>>(PhantomData);
        assert_eq!(component_name(&c), "Generic");
    }

    #[test]
    fn test_anonymous_fn_component() {
        let c = FnComponent::new(|_| None);
        assert_eq!(component_name(&c), ANONYMOUS_COMPONENT);
    }

    #[test]
    fn test_named_fn_component() {
        let c = FnComponent::new(|_| None).named("ColorableDiv");
        assert_eq!(component_name(&c), "ColorableDiv");

        let c = c.with_display_name("Colorable");
        assert_eq!(component_name(&c), "Colorable");
    }

    #[test]
    fn test_empty_display_name_falls_through() {
        let c = FnComponent::new(|_| None).named("Real").with_display_name("");
        assert_eq!(component_name(&c), "Real");
    }

    #[test]
    fn test_short_type_name() {
        assert_eq!(short_type_name("a::b::Widget").as_deref(), Some("Widget"));
        assert_eq!(short_type_name("a::b::Widget<a::C>").as_deref(), Some("Widget"));
        assert!(short_type_name("a::b::{{closure}}").is_none());
        assert!(short_type_name("").is_none());
    }

    #[test]
    fn test_fn_component_renders() {
        let c = FnComponent::new(|props| props.get_str("tag").map(|t| Element::new(t).into()));
        let out = c.render(&Props::new().with("tag", "em"));
        assert_eq!(out.unwrap().as_element().unwrap().tag(), "em");
        assert!(c.render(&Props::new()).is_none());
    }

    #[test]
    fn test_context_defaults_to_render() {
        let context = Props::new().with("text", "ignored");
        assert!(Panel.render_with_context(&Props::new(), &context).is_some());

        let c = FnComponent::with_context(|_, context| {
            context.get_str("text").map(|t| Element::new("i").child(t).into())
        });
        assert!(c.render(&Props::new()).is_none());
        let out = c.render_with_context(&Props::new(), &context).unwrap();
        assert_eq!(out.text_content(), "ignored");
    }
}
