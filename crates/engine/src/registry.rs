use crate::definition::ComponentDefinition;
use crate::error::EngineError;
use dskit_domain::config::DuplicatePolicy;
use fxhash::FxHashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Frozen tag → definition map.
///
/// Built once through [`RegistryBuilder`]; afterwards it is read-only and shared by
/// cloning.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    components: Arc<FxHashMap<String, ComponentDefinition>>,
}

impl Registry {
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// # Errors
    /// Returns [`EngineError::UnknownComponent`] if `tag` is not registered.
    pub fn resolve(&self, tag: &str) -> Result<&ComponentDefinition, EngineError> {
        self.get(tag)
            .ok_or_else(|| EngineError::UnknownComponent { tag: tag.to_owned(), context: None })
    }

    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&ComponentDefinition> {
        self.components.get(tag)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    /// Registered tags in lexical order.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.components.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    /// Definitions in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentDefinition)> {
        self.tags().into_iter().filter_map(move |tag| self.get(tag).map(|def| (tag, def)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    components: FxHashMap<String, ComponentDefinition>,
    on_duplicate: DuplicatePolicy,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }

    /// Maps `tag` to `definition`.
    ///
    /// Re-registering an identical definition is a no-op. A different definition under a
    /// taken tag replaces the old one (with a warning) or fails, depending on the
    /// duplicate policy.
    ///
    /// # Errors
    /// * [`EngineError::InvalidTagName`] for a malformed tag;
    /// * [`EngineError::DuplicateComponent`] for a conflicting re-registration under
    ///   [`DuplicatePolicy::Reject`].
    pub fn register(
        mut self,
        tag: impl Into<String>,
        definition: ComponentDefinition,
    ) -> Result<Self, EngineError> {
        let tag = tag.into();
        validate_tag(&tag)?;

        if let Some(existing) = self.components.get(&tag) {
            if existing.is_identical(&definition) {
                debug!(tag = %tag, "Component already registered with an identical definition");
                return Ok(self);
            }
            match self.on_duplicate {
                DuplicatePolicy::Reject => {
                    return Err(EngineError::DuplicateComponent { tag, context: None });
                },
                DuplicatePolicy::Overwrite => {
                    warn!(
                        tag = %tag,
                        "Component re-registered with a different definition, replacing"
                    );
                },
            }
        } else {
            debug!(tag = %tag, helpers = definition.helpers_name(), "Registered component");
        }

        self.components.insert(tag, definition);
        Ok(self)
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.components.contains_key(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn build(self) -> Registry {
        debug!(components = self.components.len(), "Registry frozen");
        Registry { components: Arc::new(self.components) }
    }
}

fn validate_tag(tag: &str) -> Result<(), EngineError> {
    let invalid = |message: &'static str| EngineError::InvalidTagName {
        tag: tag.to_owned(),
        message: message.into(),
        context: None,
    };

    let Some(first) = tag.chars().next() else {
        return Err(invalid("tag name is empty"));
    };
    if !first.is_ascii_lowercase() {
        return Err(invalid("must start with a lowercase ASCII letter"));
    }
    if !tag.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        return Err(invalid("only lowercase ASCII letters, digits and '-' are allowed"));
    }
    Ok(())
}
