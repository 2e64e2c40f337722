use dskit::DesignSystemConfig;
use dskit::engine::EngineError;
use dskit::kernel::config::ConfigLoader;
use std::io::Write;

#[test]
fn default_boot_renders_the_catalog() {
    let renderer = dskit::boot(&DesignSystemConfig::default()).unwrap();
    assert_eq!(renderer.registry.len(), dskit::catalog::COMPONENTS.len());

    let html = renderer.render_markup("<ds-loading />").unwrap();
    assert!(html.starts_with("<div class=\"ds-loading ds-loading--spinner ds-loading--md\""));
}

#[test]
fn configuration_reaches_directives_and_markup() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(
        br#"
        [directives]
        state_namespace = "Ui"

        [markup]
        trim_slots = false
        "#,
    )
    .unwrap();

    let config: DesignSystemConfig = ConfigLoader::new()
        .file(file.path())
        .env_source(Default::default())
        .load()
        .unwrap();
    let renderer = dskit::boot(&config).unwrap();

    let html = renderer.render_markup("<ds-modal open> Hi </ds-modal>").unwrap();
    assert!(html.contains("x-data=\"Ui.modal({ open: true })\""), "{html}");
    assert!(html.contains("<div class=\"ds-modal__body\"> Hi </div>"), "{html}");
}

#[test]
fn unusable_directive_settings_fail_boot() {
    let mut config = DesignSystemConfig::default();
    config.directives.default_method = "teleport".to_owned();

    let err = dskit::boot(&config).unwrap_err();
    assert!(matches!(err, EngineError::InvalidDefinition { .. }));
}

#[test]
fn custom_tag_prefix_renames_the_catalog() {
    let mut config = DesignSystemConfig::default();
    config.markup.tag_prefix = "ui-".to_owned();
    let renderer = dskit::boot(&config).unwrap();

    assert!(renderer.registry.contains("ui-button"));
    assert!(!renderer.registry.contains("ds-button"));
    assert_eq!(
        renderer.render_markup("<ui-button variant=danger>Delete</ui-button>").unwrap(),
        "<button class=\"ds-button ds-button--danger ds-button--md\" type=\"button\">\
         <span class=\"ds-button__label\">Delete</span></button>"
    );

    // Only tags carrying the configured prefix are components.
    let page = "<ds-button>x</ds-button>";
    assert_eq!(renderer.render_markup(page).unwrap(), page);
}

#[test]
fn unusable_tag_prefixes_fail_boot() {
    for prefix in ["", "UI-", "ui_"] {
        let mut config = DesignSystemConfig::default();
        config.markup.tag_prefix = prefix.to_owned();
        assert!(
            matches!(dskit::boot(&config), Err(EngineError::InvalidTagName { .. })),
            "{prefix:?}"
        );
    }
}
