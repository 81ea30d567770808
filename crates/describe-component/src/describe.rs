//! The suite factory.
//!
//! [`make_describe_component`] binds a host test framework ([`Adapter`]) and
//! a rendering engine ([`RenderEngine`]). The resulting
//! [`DescribeComponent`] registers one suite per component and hands the
//! suite body a set of [`ComponentHelpers`]:
//!
//! ```text
//! describe_component(Component, |helpers| { ...register tests... })
//!        │
//!        └─► adapter.describe(name)
//!               ├─ before_each: reset the render session
//!               ├─ after_each:  tear down every wrapper created by the test
//!               └─ callback(helpers)
//! ```
//!
//! The helpers share one [`RenderSession`] per suite. Render accessors are
//! memoized per test, and any of them freezes the props until the next test.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::component::{component_name, Component};
use crate::engine::{RenderEngine, RenderOptions};
use crate::guard::{ModeSet, RenderMode};
use crate::props::Props;
use crate::result::DescribeResult;
use crate::session::RenderSession;

/// A `before_each`/`after_each` hook or test body.
pub type Hook = Box<dyn FnMut() -> DescribeResult<()>>;

/// The four capabilities a host test framework must provide.
pub trait Adapter {
    /// Register a named suite. Hosts may run `body` immediately or defer it,
    /// but must run it exactly once.
    fn describe(&self, name: &str, body: Box<dyn FnOnce() + '_>);

    /// Register a hook that runs before each test of the current suite.
    fn before_each(&self, hook: Hook);

    /// Register a hook that runs after each test of the current suite,
    /// whatever the test's outcome.
    fn after_each(&self, hook: Hook);

    /// How test authors spell `before_each` in this host, for messages.
    fn before_each_name(&self) -> &str;
}

impl<A: Adapter + ?Sized> Adapter for &A {
    fn describe(&self, name: &str, body: Box<dyn FnOnce() + '_>) {
        (**self).describe(name, body);
    }

    fn before_each(&self, hook: Hook) {
        (**self).before_each(hook);
    }

    fn after_each(&self, hook: Hook) {
        (**self).after_each(hook);
    }

    fn before_each_name(&self) -> &str {
        (**self).before_each_name()
    }
}

impl<A: Adapter + ?Sized> Adapter for Rc<A> {
    fn describe(&self, name: &str, body: Box<dyn FnOnce() + '_>) {
        (**self).describe(name, body);
    }

    fn before_each(&self, hook: Hook) {
        (**self).before_each(hook);
    }

    fn after_each(&self, hook: Hook) {
        (**self).after_each(hook);
    }

    fn before_each_name(&self) -> &str {
        (**self).before_each_name()
    }
}

/// Bind a host adapter and a rendering engine into a suite factory.
#[must_use]
pub fn make_describe_component<A, E>(adapter: A, engine: E) -> DescribeComponent<A, E>
where
    A: Adapter,
    E: RenderEngine + 'static,
{
    DescribeComponent::new(adapter, engine)
}

/// Suite factory returned by [`make_describe_component`].
pub struct DescribeComponent<A, E> {
    adapter: A,
    engine: Rc<E>,
}

impl<A, E> DescribeComponent<A, E>
where
    A: Adapter,
    E: RenderEngine + 'static,
{
    /// Create a factory.
    #[must_use]
    pub fn new(adapter: A, engine: E) -> Self {
        Self {
            adapter,
            engine: Rc::new(engine),
        }
    }

    /// The host adapter.
    #[must_use]
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Register a suite for `component`; `callback` receives the helpers.
    pub fn describe_component<C, F>(&self, component: C, callback: F)
    where
        C: Component,
        F: FnOnce(ComponentHelpers<E>),
    {
        self.describe_shared(Rc::new(component), callback);
    }

    /// Like [`describe_component`](Self::describe_component) for a shared component.
    pub fn describe_shared<F>(&self, component: Rc<dyn Component>, callback: F)
    where
        F: FnOnce(ComponentHelpers<E>),
    {
        let name = component_name(component.as_ref());
        let helpers = ComponentHelpers {
            suite: Rc::new(Suite {
                name: name.clone(),
                component,
                engine: Rc::clone(&self.engine),
                before_each_name: self.adapter.before_each_name().to_string(),
                session: RefCell::new(RenderSession::new()),
            }),
        };

        let adapter = &self.adapter;
        adapter.describe(
            &name,
            Box::new(move || {
                let before = helpers.clone();
                adapter.before_each(Box::new(move || {
                    before.reset();
                    Ok(())
                }));
                let after = helpers.clone();
                adapter.after_each(Box::new(move || after.release()));
                callback(helpers);
            }),
        );
    }
}

impl<A, E> fmt::Debug for DescribeComponent<A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescribeComponent").finish_non_exhaustive()
    }
}

struct Suite<E: RenderEngine> {
    name: String,
    component: Rc<dyn Component>,
    engine: Rc<E>,
    before_each_name: String,
    session: RefCell<RenderSession<E>>,
}

/// Render and prop helpers yielded to a component suite.
///
/// Clones share the suite's render session, so each test closure can own
/// its own copy.
pub struct ComponentHelpers<E: RenderEngine> {
    suite: Rc<Suite<E>>,
}

impl<E: RenderEngine> Clone for ComponentHelpers<E> {
    fn clone(&self) -> Self {
        Self {
            suite: Rc::clone(&self.suite),
        }
    }
}

impl<E: RenderEngine> ComponentHelpers<E> {
    /// Fully render the component. Memoized for the rest of the test.
    pub fn mount_wrapper(&self) -> DescribeResult<Rc<E::Mounted>> {
        self.mount_wrapper_with(&RenderOptions::default())
    }

    /// Like [`mount_wrapper`](Self::mount_wrapper), handing `options` to the
    /// engine. Options only take effect on the call that actually renders;
    /// a memoized wrapper is returned as is.
    pub fn mount_wrapper_with(&self, options: &RenderOptions) -> DescribeResult<Rc<E::Mounted>> {
        self.memoized(RenderMode::Mount, RenderSession::mounted_slot, |engine, c, p| {
            engine.full_render(c, p, options)
        })
    }

    /// Render the component one level deep. Memoized for the rest of the test.
    pub fn shallow_wrapper(&self) -> DescribeResult<Rc<E::Shallow>> {
        self.shallow_wrapper_with(&RenderOptions::default())
    }

    /// Like [`shallow_wrapper`](Self::shallow_wrapper) with render options.
    pub fn shallow_wrapper_with(&self, options: &RenderOptions) -> DescribeResult<Rc<E::Shallow>> {
        self.memoized(RenderMode::Shallow, RenderSession::shallow_slot, |engine, c, p| {
            engine.shallow_render(c, p, options)
        })
    }

    /// Render the component to static markup. Memoized for the rest of the test.
    pub fn render_wrapper(&self) -> DescribeResult<Rc<E::Static>> {
        self.render_wrapper_with(&RenderOptions::default())
    }

    /// Like [`render_wrapper`](Self::render_wrapper) with render options.
    pub fn render_wrapper_with(&self, options: &RenderOptions) -> DescribeResult<Rc<E::Static>> {
        self.memoized(RenderMode::Static, RenderSession::rendered_slot, |engine, c, p| {
            engine.static_render(c, p, options)
        })
    }

    /// Shallow-merge `partial` into the props used by the next render.
    ///
    /// # Errors
    ///
    /// Fails with [`DescribeError::PropsAlreadyRendered`](crate::DescribeError::PropsAlreadyRendered)
    /// once any render accessor has been called in the current test.
    pub fn set_props(&self, partial: impl Into<Props>) -> DescribeResult<()> {
        let mut session = self.suite.session.borrow_mut();
        session.ensure_mutable(&self.suite.name, "set_props", &self.suite.before_each_name)?;
        session.merge_props(partial.into());
        Ok(())
    }

    /// Snapshot of the props the component will be (or was) rendered with.
    #[must_use]
    pub fn props(&self) -> Props {
        self.suite.session.borrow().props().clone()
    }

    /// Remove every prop.
    ///
    /// # Errors
    ///
    /// Same condition as [`set_props`](Self::set_props).
    pub fn clear_props(&self) -> DescribeResult<()> {
        let mut session = self.suite.session.borrow_mut();
        session.ensure_mutable(&self.suite.name, "clear_props", &self.suite.before_each_name)?;
        session.clear_props();
        Ok(())
    }

    /// Display name the suite was registered under.
    #[must_use]
    pub fn component_name(&self) -> &str {
        &self.suite.name
    }

    /// Modes that have rendered in the current test.
    #[must_use]
    pub fn rendered_modes(&self) -> ModeSet {
        self.suite.session.borrow().rendered_modes()
    }

    fn memoized<H>(
        &self,
        mode: RenderMode,
        slot: fn(&mut RenderSession<E>) -> &mut Option<Rc<H>>,
        render: impl FnOnce(&E, &Rc<dyn Component>, &Props) -> DescribeResult<H>,
    ) -> DescribeResult<Rc<H>> {
        let props = {
            let mut session = self.suite.session.borrow_mut();
            if let Some(existing) = slot(&mut session) {
                return Ok(Rc::clone(existing));
            }
            session.props().clone()
        };

        // The engine runs user components, which may call back into the helpers.
        debug!(component = %self.suite.name, %mode, "rendering");
        let handle = Rc::new(render(&*self.suite.engine, &self.suite.component, &props)?);

        let mut session = self.suite.session.borrow_mut();
        *slot(&mut session) = Some(Rc::clone(&handle));
        Ok(handle)
    }

    fn reset(&self) {
        self.suite.session.borrow_mut().reset();
    }

    fn release(&self) -> DescribeResult<()> {
        // Teardown may re-enter the helpers; no borrow is held while it runs.
        let mut session = std::mem::take(&mut *self.suite.session.borrow_mut());
        session.release()
    }
}

impl<E: RenderEngine> fmt::Debug for ComponentHelpers<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentHelpers")
            .field("component", &self.suite.name)
            .field("session", &*self.suite.session.borrow())
            .finish()
    }
}
