#[test]
fn dskit_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/dskit_error_pass.rs");
}
