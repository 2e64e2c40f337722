use dskit_domain::config::{DirectiveConfig, DuplicatePolicy};
use dskit_engine::prelude::*;

fn badge(template: &str) -> ComponentDefinition {
    ComponentDefinition::builder()
        .prop(PropSpec::string("label"))
        .template(template)
        .build(&DirectiveExpander::new())
        .unwrap()
}

#[test]
fn resolve_returns_registered_definition() {
    let registry = Registry::builder()
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .build();

    let definition = registry.resolve("ds-badge").unwrap();
    assert!(definition.schema.contains("label"));
    assert!(registry.contains("ds-badge"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn resolve_unknown_tag_fails() {
    let registry = Registry::builder().build();
    let err = registry.resolve("ds-missing").unwrap_err();
    assert!(matches!(&err, EngineError::UnknownComponent { tag, .. } if tag == "ds-missing"));
    assert_eq!(err.to_string(), "Unknown component 'ds-missing'");
}

#[test]
fn identical_registration_is_a_no_op() {
    let registry = Registry::builder()
        .on_duplicate(DuplicatePolicy::Reject)
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .build();

    assert_eq!(registry.len(), 1);
}

#[test]
fn different_registration_overwrites_by_default() {
    let registry = Registry::builder()
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .register("ds-badge", badge("<i>{{ label }}</i>"))
        .unwrap()
        .build();

    assert_eq!(registry.resolve("ds-badge").unwrap().template.source(), "<i>{{ label }}</i>");
}

#[test]
fn same_source_with_other_directive_settings_is_a_conflict() {
    let form = |expander: &DirectiveExpander| {
        ComponentDefinition::builder()
            .template("<form @dsAction(save)>{{ slot }}</form>")
            .build(expander)
            .unwrap()
    };
    let hooks = DirectiveExpander::from_config(&DirectiveConfig {
        action_prefix: "/hooks/".to_owned(),
        ..DirectiveConfig::default()
    })
    .unwrap();

    let err = Registry::builder()
        .on_duplicate(DuplicatePolicy::Reject)
        .register("ds-form", form(&DirectiveExpander::new()))
        .unwrap()
        .register("ds-form", form(&hooks))
        .unwrap_err();

    assert!(matches!(err, EngineError::DuplicateComponent { tag, .. } if tag == "ds-form"));
}

#[test]
fn different_registration_is_rejected_when_configured() {
    let err = Registry::builder()
        .on_duplicate(DuplicatePolicy::Reject)
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .register("ds-badge", badge("<i>{{ label }}</i>"))
        .unwrap_err();

    assert!(matches!(err, EngineError::DuplicateComponent { tag, .. } if tag == "ds-badge"));
}

#[test]
fn invalid_tags_are_rejected() {
    let err = Registry::builder().register("DS-Badge", badge("x")).unwrap_err();
    assert!(matches!(err, EngineError::InvalidTagName { .. }));
}

#[test]
fn tags_are_sorted() {
    let registry = ["ds-table", "ds-alert", "ds-modal"]
        .into_iter()
        .try_fold(Registry::builder(), |builder, tag| builder.register(tag, badge("x")))
        .unwrap()
        .build();

    assert_eq!(registry.tags(), ["ds-alert", "ds-modal", "ds-table"]);
    let iterated: Vec<&str> = registry.iter().map(|(tag, _)| tag).collect();
    assert_eq!(iterated, registry.tags());
}

#[test]
fn frozen_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync + 'static>() {}
    assert_send_sync::<Registry>();
    assert_send_sync::<Renderer>();
    assert_send_sync::<ComponentDefinition>();

    let registry = Registry::builder()
        .register("ds-badge", badge("<b>{{ label }}</b>"))
        .unwrap()
        .build();
    let renderer = Renderer::new(registry, Default::default());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let renderer = renderer.clone();
            std::thread::spawn(move || {
                let props = PropertyBag::new().with("label", format!("#{i}"));
                renderer
                    .render_component("ds-badge", &props, &AttributeSet::new(), &Slots::new())
                    .unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("<b>#{i}</b>"));
    }
}
