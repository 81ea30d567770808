//! Prop mutation guard.
//!
//! Once a guarded accessor has rendered the component, the props it captured
//! are frozen for the rest of the test. This module maps the set of render
//! modes that already produced a wrapper to the error message shown to the
//! test author. The message builder is a pure function over [`ModeSet`], so
//! every combination can be checked without rendering anything.

use std::fmt;

/// A rendering strategy offered by the component helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Full subtree render with lifecycle hooks (`mount_wrapper`)
    Mount,
    /// One-level render (`shallow_wrapper`)
    Shallow,
    /// Static markup render (`render_wrapper`)
    Static,
}

impl RenderMode {
    /// Every mode, in message order.
    pub const ALL: [Self; 3] = [Self::Mount, Self::Shallow, Self::Static];

    /// Past participle used in "has already been ...".
    #[must_use]
    pub const fn verbed(self) -> &'static str {
        match self {
            Self::Mount => "mounted",
            Self::Shallow => "shallow rendered",
            Self::Static => "rendered",
        }
    }

    /// Gerund used in "before ... the component".
    #[must_use]
    pub const fn verbing(self) -> &'static str {
        match self {
            Self::Mount => "mounting",
            Self::Shallow => "shallow rendering",
            Self::Static => "rendering",
        }
    }

    /// Name of the helper that renders in this mode.
    #[must_use]
    pub const fn accessor(self) -> &'static str {
        match self {
            Self::Mount => "mount_wrapper",
            Self::Shallow => "shallow_wrapper",
            Self::Static => "render_wrapper",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Mount => 0b001,
            Self::Shallow => 0b010,
            Self::Static => 0b100,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.accessor())
    }
}

/// A set of render modes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSet(u8);

impl ModeSet {
    /// No modes.
    pub const EMPTY: Self = Self(0);

    /// All three modes.
    pub const FULL: Self = Self(0b111);

    /// A set holding exactly one mode.
    #[must_use]
    pub const fn only(mode: RenderMode) -> Self {
        Self(mode.bit())
    }

    /// Return this set with `mode` added.
    #[must_use]
    pub const fn with(self, mode: RenderMode) -> Self {
        Self(self.0 | mode.bit())
    }

    /// Add a mode in place.
    pub fn insert(&mut self, mode: RenderMode) {
        self.0 |= mode.bit();
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, mode: RenderMode) -> bool {
        self.0 & mode.bit() != 0
    }

    /// Check whether no mode is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of modes in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in [`RenderMode::ALL`] order.
    pub fn iter(self) -> impl Iterator<Item = RenderMode> {
        RenderMode::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// The seven non-empty combinations.
    pub fn combinations() -> impl Iterator<Item = Self> {
        (1..=Self::FULL.0).map(Self)
    }
}

impl fmt::Debug for ModeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<RenderMode> for ModeSet {
    fn from_iter<I: IntoIterator<Item = RenderMode>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for mode in iter {
            set.insert(mode);
        }
        set
    }
}

/// "an" for names starting with a vowel, "a" otherwise.
#[must_use]
pub fn indefinite_article(name: &str) -> &'static str {
    match name.chars().next().map(|c| c.to_ascii_lowercase()) {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

fn join_alternatives<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let items: Vec<String> = items.into_iter().map(Into::into).collect();
    match items.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// Build the message for mutating props after a guarded render.
///
/// Returns `None` when `modes` is empty, i.e. when mutation is allowed.
#[must_use]
pub fn already_rendered_message(
    component_name: &str,
    modes: ModeSet,
    operation: &str,
    before_each_name: &str,
) -> Option<String> {
    if modes.is_empty() {
        return None;
    }

    let verbed = join_alternatives(modes.iter().map(RenderMode::verbed));
    let verbing = join_alternatives(modes.iter().map(RenderMode::verbing));
    let article = indefinite_article(component_name);

    let mut message = format!(
        "You are trying to change props for {article} {component_name} that has already \
         been {verbed}. `{operation}` is intended to be used before {verbing} the component \
         (for example, in `{before_each_name}` calls)."
    );

    if modes.len() < RenderMode::ALL.len() {
        let accessors = join_alternatives(modes.iter().map(|m| format!("`{}`", m.accessor())));
        message.push_str(&format!(
            " If you want an already-{} component to receive new props, call `set_props` \
             on the wrapper object returned from {accessors}.",
            verbed.replace(' ', "-")
        ));
    }

    Some(message)
}
