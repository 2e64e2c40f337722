use dskit_domain::config::{DirectiveConfig, DuplicatePolicy};
use dskit_engine::prelude::*;
use proptest::prelude::*;

fn renderer() -> Renderer {
    let builder =
        dskit_catalog::register(Registry::builder(), &DirectiveExpander::new(), "ds-").unwrap();
    Renderer::new(builder.build(), Default::default())
}

#[test]
fn every_component_is_registered() {
    let renderer = renderer();
    assert_eq!(
        renderer.registry.tags(),
        [
            "ds-alert",
            "ds-button",
            "ds-card",
            "ds-grid",
            "ds-input",
            "ds-link",
            "ds-loading",
            "ds-modal",
            "ds-table",
        ]
    );
    assert!(dskit_catalog::tags("ds-").all(|tag| renderer.registry.contains(&tag)));
    assert_eq!(dskit_catalog::tags("ds-").count(), renderer.registry.len());
}

#[test]
fn registering_the_catalog_twice_is_a_no_op() {
    let expander = DirectiveExpander::new();
    let builder = Registry::builder().on_duplicate(DuplicatePolicy::Reject);
    let builder = dskit_catalog::register(builder, &expander, "ds-").unwrap();
    let builder = dskit_catalog::register(builder, &expander, "ds-").unwrap();
    assert_eq!(builder.len(), dskit_catalog::COMPONENTS.len());
}

#[test]
fn button_defaults() {
    let html = renderer().render(&Invocation::new("ds-button").content("Save")).unwrap();
    assert_eq!(
        html,
        "<button class=\"ds-button ds-button--primary ds-button--md\" type=\"button\">\
         <span class=\"ds-button__label\">Save</span></button>"
    );
}

#[test]
fn button_icon_and_caller_class() {
    let html = renderer()
        .render(
            &Invocation::new("ds-button")
                .attr("icon", "check")
                .attr("icon-position", "right")
                .attr("class", "w-full")
                .content("Go"),
        )
        .unwrap();
    assert_eq!(
        html,
        "<button class=\"ds-button ds-button--primary ds-button--md w-full\" type=\"button\">\
         <span class=\"ds-button__label\">Go</span>\
         <i class=\"ds-icon ds-icon--check\" aria-hidden=\"true\"></i></button>"
    );
}

#[test]
fn input_shows_error_instead_of_hint() {
    let html = renderer()
        .render(
            &Invocation::new("ds-input")
                .attr("label", "Email")
                .attr("id", "email")
                .attr("type", "email")
                .attr("hint", "We never share it")
                .attr("error", "Invalid <email>")
                .flag("required"),
        )
        .unwrap();
    assert_eq!(
        html,
        "<div class=\"ds-input ds-input--md ds-input--invalid\">\
         <label class=\"ds-input__label\" for=\"email\">Email\
         <span class=\"ds-input__required\" aria-hidden=\"true\">*</span></label>\
         <input class=\"ds-input__control\" type=\"email\" id=\"email\" required \
         aria-invalid=\"true\"><p class=\"ds-input__error\" role=\"alert\">Invalid &lt;email&gt;</p>\
         </div>"
    );
}

#[test]
fn modal_binds_client_state() {
    let html = renderer()
        .render(&Invocation::new("ds-modal").attr("title", "Confirm").content("Sure?"))
        .unwrap();
    assert_eq!(
        html,
        "<div class=\"ds-modal ds-modal--md\" id=\"ds-modal\" role=\"dialog\" aria-modal=\"true\" \
         aria-labelledby=\"ds-modal-title\" x-data=\"DS.component.modal({ open: false })\">\
         <div class=\"ds-modal__backdrop\" @click=\"close()\"></div><div class=\"ds-modal__dialog\">\
         <header class=\"ds-modal__header\">\
         <h2 class=\"ds-modal__title\" id=\"ds-modal-title\">Confirm</h2></header>\
         <button type=\"button\" class=\"ds-modal__close\" aria-label=\"Close\" @click=\"close()\">\
         <i class=\"ds-icon ds-icon--x\" aria-hidden=\"true\"></i></button>\
         <div class=\"ds-modal__body\">Sure?</div></div></div>"
    );
}

#[test]
fn open_modal_without_close_button() {
    let html = renderer()
        .render(&Invocation::new("ds-modal").flag("open").attr("closable", "false"))
        .unwrap();
    assert!(html.contains("class=\"ds-modal ds-modal--md ds-modal--open\""), "{html}");
    assert!(html.contains("x-data=\"DS.component.modal({ open: true })\""), "{html}");
    assert!(!html.contains("ds-modal__close"));
    assert!(!html.contains("aria-labelledby"));
}

#[test]
fn dismissible_alert_posts_to_the_action_route() {
    let html = renderer()
        .render(
            &Invocation::new("ds-alert")
                .attr("variant", "warning")
                .attr("title", "Heads up")
                .flag("dismissible")
                .content("Disk almost full"),
        )
        .unwrap();
    assert!(
        html.starts_with(
            "<div class=\"ds-alert ds-alert--warning ds-alert--dismissible\" role=\"alert\">\
             <i class=\"ds-icon ds-icon--alert-triangle\" aria-hidden=\"true\"></i>"
        ),
        "{html}"
    );
    assert!(
        html.contains(
            "hx-post=\"/api/ds/dismiss\" hx-indicator=\".ds-loading\" hx-swap=\"outerHTML\""
        ),
        "{html}"
    );
    assert!(html.contains("<p class=\"ds-alert__title\">Heads up</p>"));
}

#[test]
fn directive_constants_come_from_configuration() {
    let config = DirectiveConfig {
        state_namespace: "App.ui".to_owned(),
        action_prefix: "/actions/".to_owned(),
        ..DirectiveConfig::default()
    };
    let expander = DirectiveExpander::from_config(&config).unwrap();
    let registry = dskit_catalog::register(Registry::builder(), &expander, "ds-").unwrap().build();
    let renderer = Renderer::new(registry, Default::default());

    let modal = renderer.render(&Invocation::new("ds-modal")).unwrap();
    assert!(modal.contains("x-data=\"App.ui.modal({ open: false })\""), "{modal}");

    let alert = renderer.render(&Invocation::new("ds-alert").flag("dismissible")).unwrap();
    assert!(alert.contains("hx-post=\"/actions/dismiss\""), "{alert}");
}

#[test]
fn loading_dots() {
    let html = renderer()
        .render(&Invocation::new("ds-loading").attr("variant", "dots").attr("label", "Saving"))
        .unwrap();
    assert_eq!(
        html,
        "<div class=\"ds-loading ds-loading--dots ds-loading--md\" role=\"status\" \
         aria-live=\"polite\"><span class=\"ds-loading__dots\" aria-hidden=\"true\">\
         <span></span><span></span><span></span></span>\
         <span class=\"ds-loading__label\">Saving</span></div>"
    );
}

#[test]
fn external_link() {
    let html = renderer()
        .render(
            &Invocation::new("ds-link")
                .attr("href", "https://example.com/docs")
                .flag("external")
                .content("Docs"),
        )
        .unwrap();
    assert_eq!(
        html,
        "<a class=\"ds-link ds-link--default ds-link--external\" href=\"https://example.com/docs\" \
         target=\"_blank\" rel=\"noopener noreferrer\">Docs \
         <i class=\"ds-icon ds-icon--external-link\" aria-hidden=\"true\"></i>\
         <span class=\"ds-visually-hidden\"> (opens in a new tab)</span></a>"
    );
}

#[test]
fn page_with_grid_cards_and_table() {
    let page = "<ds-grid columns=\"2\" gap=lg>\n\
                  <ds-card title=\"Users\" variant=outlined>\n\
                    <ds-table striped caption=\"Active\">\
                      <slot:head><tr><th>Name</th></tr></slot:head><tr><td>Ann</td></tr>\
                    </ds-table>\n\
                  </ds-card>\n\
                </ds-grid>";
    let html = renderer().render_markup(page).unwrap();

    assert_eq!(
        html,
        "<div class=\"ds-grid ds-grid--gap-lg\" style=\"grid-template-columns: \
         repeat(var(--ds-grid-columns), minmax(0, 1fr)); --ds-grid-columns: 2\">\
         <article class=\"ds-card ds-card--outlined ds-card--padding-md\">\
         <header class=\"ds-card__header\"><h3 class=\"ds-card__title\">Users</h3></header>\
         <div class=\"ds-card__body\"><div class=\"ds-table__scroll\">\
         <table class=\"ds-table ds-table--striped\">\
         <caption class=\"ds-table__caption\">Active</caption>\
         <thead><tr><th>Name</th></tr></thead><tbody><tr><td>Ann</td></tr></tbody></table></div>\
         </div></article></div>"
    );
}

#[test]
fn invalid_enum_values_are_reported_with_position() {
    let err =
        renderer().render_markup("<p>\n<ds-button variant=huge>x</ds-button></p>").unwrap_err();
    assert!(matches!(
        &err,
        EngineError::InvalidPropertyType { component, property, .. }
            if component == "ds-button" && property == "variant"
    ));
    assert!(err.to_string().contains("<ds-button> at 2:1"), "{err}");
}

proptest! {
    #[test]
    fn grid_columns_are_always_within_bounds(columns in -100i64..100) {
        let props = PropertyBag::new().with("columns", columns);
        let html = renderer()
            .render_component("ds-grid", &props, &AttributeSet::new(), &Slots::new())
            .unwrap();
        let expected = format!("--ds-grid-columns: {}\"", columns.clamp(1, 12));
        prop_assert!(html.contains(&expected), "{}", html);
    }

    #[test]
    fn every_alert_variant_renders(
        variant in proptest::sample::select(dskit_catalog::feedback::ALERT_VARIANTS)
    ) {
        let html =
            renderer().render(&Invocation::new("ds-alert").attr("variant", variant)).unwrap();
        let expected = format!("ds-alert--{variant}");
        prop_assert!(html.contains(&expected));
    }
}
