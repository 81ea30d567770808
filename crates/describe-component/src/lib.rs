//! describe-component: suite scaffolding for UI component tests
//!
//! Register one suite per component and get memoized render helpers plus a
//! guard that stops props from changing after the component has rendered.
//! The crate is agnostic of both the host test framework ([`Adapter`]) and
//! the rendering engine ([`RenderEngine`]); it ships one of each for
//! self-contained use ([`Spec`]/[`FlatSpec`] and [`VirtualDom`]).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌──────────────┐
//! │ Adapter      │◄──│ DescribeComponent    │──►│ RenderEngine │
//! │ (Spec, ...)  │   │  per-suite session   │   │ (VirtualDom) │
//! └──────────────┘   │  ComponentHelpers    │   └──────────────┘
//!                    └──────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use describe_component::prelude::*;
//!
//! let colorable_div = FnComponent::new(|props| {
//!     let mut div = Element::new("div").attr("data-component-name", "ColorableDiv");
//!     if let Some(color) = props.get_str("color") {
//!         div = div.style("color", color);
//!     }
//!     Some(div.into())
//! })
//! .named("ColorableDiv");
//!
//! let spec = Spec::new("components");
//! let describe = make_describe_component(&spec, VirtualDom::new());
//! describe.describe_component(colorable_div, |helpers| {
//!     let h = helpers.clone();
//!     spec.it("is red", move || {
//!         h.set_props([("color", "red")])?;
//!         assert_eq!(h.mount_wrapper()?.find("div")?.style("color").as_deref(), Some("red"));
//!         Ok(())
//!     });
//! });
//!
//! assert!(spec.run(&RunConfig::default()).all_passed());
//! ```

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod component;
mod config;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod describe;
mod engine;
/// Prop mutation guard messages.
pub mod guard;
#[allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]
mod harness;
mod logging;
/// Markup serialization for rendered trees.
pub mod markup;
mod node;
#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
mod props;
mod result;
mod selector;
mod session;
#[allow(clippy::missing_errors_doc, clippy::must_use_candidate)]
mod wrapper;

pub use component::{component_name, Component, FnComponent, ANONYMOUS_COMPONENT};
pub use config::{RunConfig, FAIL_FAST_ENV, FILTER_ENV};
pub use describe::{make_describe_component, Adapter, ComponentHelpers, DescribeComponent, Hook};
pub use engine::{RenderEngine, RenderOptions, Teardown, VirtualDom, MAX_RENDER_DEPTH};
pub use guard::{already_rendered_message, ModeSet, RenderMode};
pub use harness::{FlatSpec, Spec, SuiteResults, TestResult, TestStatus};
pub use logging::{init_test_logging, LOG_ENV};
pub use node::{ComponentNode, Element, Node};
pub use props::{PropValue, Props};
pub use result::{DescribeError, DescribeResult};
pub use selector::Selector;
pub use session::RenderSession;
pub use wrapper::{MountedWrapper, NodeSet, ShallowWrapper, StaticWrapper};

/// Everything needed to write component suites.
pub mod prelude {
    pub use super::component::*;
    pub use super::config::RunConfig;
    pub use super::describe::*;
    pub use super::engine::{RenderEngine, RenderOptions, Teardown, VirtualDom};
    pub use super::guard::{ModeSet, RenderMode};
    pub use super::harness::*;
    pub use super::logging::init_test_logging;
    pub use super::node::*;
    pub use super::props::*;
    pub use super::result::*;
    pub use super::wrapper::*;
}
