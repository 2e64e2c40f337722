use fxhash::FxHashMap;
use std::fmt;

/// Already rendered HTML passed into a component. Emitted without escaping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot(String);

impl Slot {
    #[must_use]
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slot {
    fn from(html: &str) -> Self {
        Self::new(html)
    }
}

impl From<String> for Slot {
    fn from(html: String) -> Self {
        Self(html)
    }
}

/// The default slot plus any named slots of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slots {
    default: Slot,
    named: FxHashMap<String, Slot>,
}

impl Slots {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots with only the default content set.
    #[must_use]
    pub fn content(html: impl Into<Slot>) -> Self {
        Self { default: html.into(), named: FxHashMap::default() }
    }

    #[must_use]
    pub fn with_named(mut self, name: impl Into<String>, html: impl Into<Slot>) -> Self {
        self.set_named(name, html);
        self
    }

    pub fn set_default(&mut self, html: impl Into<Slot>) {
        self.default = html.into();
    }

    pub fn set_named(&mut self, name: impl Into<String>, html: impl Into<Slot>) {
        self.named.insert(name.into(), html.into());
    }

    #[must_use]
    pub const fn default_slot(&self) -> &Slot {
        &self.default
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Option<&Slot> {
        self.named.get(name)
    }

    /// Trims surrounding whitespace of every slot.
    #[must_use]
    pub fn trimmed(self) -> Self {
        let trim = |slot: Slot| {
            let html = slot.as_str().trim();
            if html.len() == slot.as_str().len() { slot } else { Slot::new(html) }
        };
        Self {
            default: trim(self.default),
            named: self.named.into_iter().map(|(name, slot)| (name, trim(slot))).collect(),
        }
    }
}
