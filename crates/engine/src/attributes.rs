//! HTML attribute sets, class lists and inline style maps.

use crate::html;
use std::fmt;

/// Attribute whose caller value is appended to the computed one instead of replacing it.
pub const CLASS: &str = "class";

/// Ordered attribute name → value map.
///
/// Insertion order is the render order. Re-inserting an existing name replaces the value
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSet {
    entries: Vec<(String, String)>,
}

impl AttributeSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts only when `value` is non-empty.
    #[must_use]
    pub fn with_non_empty(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() { self } else { self.with(name, value) }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            },
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let at = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(at).1)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combines helper-computed attributes with the ones written at the call site.
    ///
    /// `class` values are joined (computed first, caller last); for every other name the
    /// caller wins. Computed names keep their order and caller-only names follow.
    #[must_use]
    pub fn merge(computed: &Self, caller: &Self) -> Self {
        let mut merged = Self { entries: Vec::with_capacity(computed.len() + caller.len()) };

        for (name, value) in computed.iter() {
            let value = match (name, caller.get(name)) {
                (CLASS, Some(extra)) => join_classes(value, extra),
                (_, Some(replacement)) => replacement.to_owned(),
                (_, None) => value.to_owned(),
            };
            merged.entries.push((name.to_owned(), value));
        }

        for (name, value) in caller.iter() {
            if !computed.contains(name) {
                merged.entries.push((name.to_owned(), value.to_owned()));
            }
        }

        merged
    }
}

fn join_classes(first: &str, second: &str) -> String {
    match (first.trim(), second.trim()) {
        ("", other) | (other, "") => other.to_owned(),
        (a, b) => format!("{a} {b}"),
    }
}

/// `name="value"` pairs separated by one space, values escaped.
impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name}=\"{}\"", html::escape(value))?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, value) in iter {
            set.insert(name, value);
        }
        set
    }
}

/// BEM-style class list: a block class plus modifiers and extra classes.
///
/// ```
/// use dskit_engine::attributes::ClassList;
///
/// let classes = ClassList::block("ds-button").modifier("primary").when(true, "is-busy");
/// assert_eq!(classes.to_string(), "ds-button ds-button--primary is-busy");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    block: String,
    classes: Vec<String>,
}

impl ClassList {
    #[must_use]
    pub fn block(block: impl Into<String>) -> Self {
        let block = block.into();
        Self { classes: vec![block.clone()], block }
    }

    /// Adds `{block}--{name}`; empty names are ignored.
    #[must_use]
    pub fn modifier(mut self, name: &str) -> Self {
        if !name.is_empty() {
            let class = format!("{}--{name}", self.block);
            self.push(class);
        }
        self
    }

    /// Adds `{block}--{name}` when `cond` holds.
    #[must_use]
    pub fn modifier_if(self, cond: bool, name: &str) -> Self {
        if cond { self.modifier(name) } else { self }
    }

    #[must_use]
    pub fn when(mut self, cond: bool, class: impl Into<String>) -> Self {
        if cond {
            self.push(class);
        }
        self
    }

    pub fn push(&mut self, class: impl Into<String>) {
        let class = class.into();
        if !class.is_empty() && !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classes.join(" "))
    }
}

/// Ordered CSS declarations, rendered as `prop: value; prop: value`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    declarations: Vec<(String, String)>,
}

impl StyleMap {
    #[must_use]
    pub const fn new() -> Self {
        Self { declarations: Vec::new() }
    }

    /// Builder-style [`StyleMap::set`].
    #[must_use]
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(property, value);
        self
    }

    /// Sets a declaration, replacing an earlier one for the same property. Empty values
    /// are ignored.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        if value.is_empty() {
            return;
        }
        match self.declarations.iter_mut().find(|(p, _)| *p == property) {
            Some((_, slot)) => *slot = value,
            None => self.declarations.push((property, value)),
        }
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.iter().find(|(p, _)| p == property).map(|(_, v)| v.as_str())
    }

    /// Appends every declaration of `other`.
    pub fn extend(&mut self, other: &Self) {
        for (property, value) in &other.declarations {
            self.set(property.clone(), value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{property}: {value}")?;
        }
        Ok(())
    }
}
