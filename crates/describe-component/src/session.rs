//! Per-test render state.
//!
//! A [`RenderSession`] holds the props that the next render will use and the
//! wrapper produced by each render mode. It is reset before every test and
//! released after it, so nothing leaks from one test into the next.

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::engine::{RenderEngine, Teardown};
use crate::guard::{already_rendered_message, ModeSet, RenderMode};
use crate::props::Props;
use crate::result::{DescribeError, DescribeResult};

/// Props plus memoized wrappers for one test.
pub struct RenderSession<E: RenderEngine> {
    props: Props,
    mounted: Option<Rc<E::Mounted>>,
    shallow: Option<Rc<E::Shallow>>,
    rendered: Option<Rc<E::Static>>,
}

impl<E: RenderEngine> Default for RenderSession<E> {
    fn default() -> Self {
        Self {
            props: Props::new(),
            mounted: None,
            shallow: None,
            rendered: None,
        }
    }
}

impl<E: RenderEngine> RenderSession<E> {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear props and forget every wrapper without tearing anything down.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Props the next render will use.
    #[must_use]
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Modes whose wrapper has been created in this test.
    #[must_use]
    pub fn rendered_modes(&self) -> ModeSet {
        let mut modes = ModeSet::EMPTY;
        if self.mounted.is_some() {
            modes.insert(RenderMode::Mount);
        }
        if self.shallow.is_some() {
            modes.insert(RenderMode::Shallow);
        }
        if self.rendered.is_some() {
            modes.insert(RenderMode::Static);
        }
        modes
    }

    /// Slot for the full-render wrapper.
    pub fn mounted_slot(&mut self) -> &mut Option<Rc<E::Mounted>> {
        &mut self.mounted
    }

    /// Slot for the shallow-render wrapper.
    pub fn shallow_slot(&mut self) -> &mut Option<Rc<E::Shallow>> {
        &mut self.shallow
    }

    /// Slot for the static-render wrapper.
    pub fn rendered_slot(&mut self) -> &mut Option<Rc<E::Static>> {
        &mut self.rendered
    }

    /// Fail if any guarded mode has already rendered.
    ///
    /// # Errors
    ///
    /// Returns [`DescribeError::PropsAlreadyRendered`] naming the component,
    /// the implicated modes and `operation`.
    pub fn ensure_mutable(
        &self,
        component_name: &str,
        operation: &str,
        before_each_name: &str,
    ) -> DescribeResult<()> {
        let modes = self.rendered_modes();
        match already_rendered_message(component_name, modes, operation, before_each_name) {
            None => Ok(()),
            Some(message) => {
                debug!(component = component_name, operation, ?modes, "rejected prop mutation");
                Err(DescribeError::PropsAlreadyRendered { modes, message })
            }
        }
    }

    /// Shallow-merge `partial` into the props.
    pub fn merge_props(&mut self, partial: Props) {
        self.props.merge(partial);
    }

    /// Drop every prop.
    pub fn clear_props(&mut self) {
        self.props.clear();
    }

    /// Tear down every wrapper created in this test and empty the slots.
    ///
    /// All wrappers are released even if one fails; the first failure is
    /// returned.
    pub fn release(&mut self) -> DescribeResult<()> {
        let mut first_error: Option<DescribeError> = None;
        let mut record = |mode: RenderMode, result: DescribeResult<()>| {
            if let Err(e) = result {
                warn!(mode = %mode, error = %e, "teardown failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            } else {
                debug!(mode = %mode, "released wrapper");
            }
        };

        if let Some(wrapper) = self.mounted.take() {
            record(RenderMode::Mount, wrapper.teardown());
        }
        if let Some(wrapper) = self.shallow.take() {
            record(RenderMode::Shallow, wrapper.teardown());
        }
        if let Some(wrapper) = self.rendered.take() {
            record(RenderMode::Static, wrapper.teardown());
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl<E: RenderEngine> fmt::Debug for RenderSession<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSession")
            .field("props", &self.props)
            .field("rendered_modes", &self.rendered_modes())
            .finish()
    }
}
