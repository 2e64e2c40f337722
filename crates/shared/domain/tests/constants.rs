use dskit_domain::constants::{ACTION_DIRECTIVE, RESERVED_PROPS, STATE_DIRECTIVE};

#[test]
fn directive_names_match_template_markers() {
    assert_eq!(STATE_DIRECTIVE, "dsState");
    assert_eq!(ACTION_DIRECTIVE, "dsAction");
}

#[test]
fn reserved_props_cover_template_scope() {
    for name in ["attributes", "slot", "slots", "helpers"] {
        assert!(RESERVED_PROPS.contains(&name), "{name} should be reserved");
    }
}
