//! Names with a fixed meaning across the engine, the catalog and the CLI.

/// Directive emitting a client-side state binding (`x-data`).
pub const STATE_DIRECTIVE: &str = "dsState";
/// Directive emitting HTTP-action attributes (`hx-*`).
pub const ACTION_DIRECTIVE: &str = "dsAction";

/// Default client-side namespace of state-binding components.
pub const DEFAULT_STATE_NAMESPACE: &str = "DS.component";
/// Default path prefix of the action route (`POST /api/ds/{action}`).
pub const DEFAULT_ACTION_PREFIX: &str = "/api/ds/";
/// Default selector of the loading indicator toggled during HTTP actions.
pub const DEFAULT_LOADING_INDICATOR: &str = ".ds-loading";
/// Default swap strategy of HTTP-action responses.
pub const DEFAULT_SWAP: &str = "outerHTML";
/// Default HTTP method of the action directive.
pub const DEFAULT_METHOD: &str = "post";

/// Tag prefix recognised by the markup renderer.
pub const DEFAULT_TAG_PREFIX: &str = "ds-";
/// Prefix of named slot tags inside component children (`<slot:footer>`).
pub const SLOT_TAG_PREFIX: &str = "slot:";

/// Template variable holding the merged attribute string.
pub const ATTRIBUTES_VAR: &str = "attributes";
/// Template variable holding the default slot.
pub const SLOT_VAR: &str = "slot";
/// Template namespace of named slots (`slots.footer`).
pub const SLOTS_VAR: &str = "slots";
/// Template namespace of helper-derived values (`helpers.classes`).
pub const HELPERS_VAR: &str = "helpers";

/// Names a component property may not use.
pub const RESERVED_PROPS: &[&str] = &[ATTRIBUTES_VAR, SLOT_VAR, SLOTS_VAR, HELPERS_VAR];
