use dskit_domain::config::{
    DesignSystemConfig, DirectiveConfig, DuplicatePolicy, LoggingConfig, MarkupConfig,
};
use serde_json::json;
use std::str::FromStr;

#[test]
fn config_defaults_are_sane() {
    let directives = DirectiveConfig::default();
    assert_eq!(directives.state_namespace, "DS.component");
    assert_eq!(directives.action_prefix, "/api/ds/");
    assert_eq!(directives.loading_indicator, ".ds-loading");
    assert_eq!(directives.swap, "outerHTML");
    assert_eq!(directives.default_method, "post");

    let markup = MarkupConfig::default();
    assert_eq!(markup.tag_prefix, "ds-");
    assert_eq!(markup.max_depth, 32);
    assert!(markup.trim_slots);

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "warn");
    assert!(logging.path.is_none());

    assert_eq!(DesignSystemConfig::default().registry.on_duplicate, DuplicatePolicy::Overwrite);
}

#[test]
fn config_deserializes_partial_sections() {
    let raw = json!({
        "directives": { "action_prefix": "/actions/", "swap": "innerHTML" },
        "registry": { "on_duplicate": "reject" },
        "markup": { "max_depth": 4 }
    });

    let cfg: DesignSystemConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.directives.action_prefix, "/actions/");
    assert_eq!(cfg.directives.swap, "innerHTML");
    assert_eq!(cfg.directives.state_namespace, "DS.component");
    assert_eq!(cfg.registry.on_duplicate, DuplicatePolicy::Reject);
    assert_eq!(cfg.markup.max_depth, 4);
    assert_eq!(cfg.markup.tag_prefix, "ds-");
}

#[test]
fn config_clones_share_until_mutated() {
    let base = DesignSystemConfig::default();
    let mut tweaked = base.clone();
    tweaked.markup.tag_prefix = "ui-".to_owned();

    assert_eq!(base.markup.tag_prefix, "ds-");
    assert_eq!(tweaked.markup.tag_prefix, "ui-");
}

#[test]
fn duplicate_policy_parses_case_insensitively() {
    assert_eq!(DuplicatePolicy::from_str("REJECT").ok(), Some(DuplicatePolicy::Reject));
    assert_eq!(DuplicatePolicy::Overwrite.to_string(), "overwrite");
    assert!(DuplicatePolicy::from_str("ignore").is_err());
}
