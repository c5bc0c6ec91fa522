//! Integration tests for sprite composition and symbol rendering

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use iconsprite::{AssetDefinition, AttributeMap, Sprite, SpriteConfig, SpriteError};

const ICON_A: &str = r#"<svg width="24" height="12" viewBox="0 0 24 12"><path d="M0 0h24v12H0z"/></svg>"#;

fn fixture_sprite(files: &[(&str, &str)]) -> (TempDir, Sprite) {
    let dir = TempDir::new().expect("temp dir");
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).expect("write fixture");
    }
    let sprite = Sprite::new(SpriteConfig::new().with_svg_directory(dir.path()));
    (dir, sprite)
}

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_height_override_derives_width_from_ratio() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &attrs(&[("height", "6")]));
    assert_eq!(
        markup,
        r##"<svg width="12.00" height="6"><use href="#am-symbol-icon-a"></use></svg>"##
    );
}

#[test]
fn test_width_override_derives_height_from_ratio() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &attrs(&[("width", "6")]));
    assert_eq!(
        markup,
        r##"<svg width="6" height="3.00"><use href="#am-symbol-icon-a"></use></svg>"##
    );
}

#[test]
fn test_derived_dimension_truncates_instead_of_rounding() {
    // 10/3 ratio; height 10 gives width 33.333..., truncated to 33.33.
    let (_dir, mut sprite) = fixture_sprite(&[(
        "wide.svg",
        r#"<svg viewBox="0 0 10 3"><path d="M0 0"/></svg>"#,
    )]);
    sprite.add_asset(AssetDefinition::new("wide", "wide.svg")).unwrap();

    let markup = sprite.render_symbol("wide", &attrs(&[("height", "10")]));
    assert_eq!(
        markup,
        r##"<svg width="33.33" height="10"><use href="#am-symbol-wide"></use></svg>"##
    );
}

#[test]
fn test_both_overrides_pass_through_unchanged() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &attrs(&[("width", "48"), ("height", "48")]));
    assert_eq!(
        markup,
        r##"<svg width="48" height="48"><use href="#am-symbol-icon-a"></use></svg>"##
    );
}

#[test]
fn test_no_overrides_render_intrinsic_dimensions() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &AttributeMap::new());
    assert_eq!(
        markup,
        r##"<svg width="24" height="12"><use href="#am-symbol-icon-a"></use></svg>"##
    );
}

#[test]
fn test_missing_file_leaves_no_trace() {
    let (_dir, mut sprite) = fixture_sprite(&[]);
    sprite.add_asset(AssetDefinition::new("ghost", "ghost.svg")).unwrap();

    assert!(sprite.get_asset("ghost").is_none());
    assert!(!sprite.sheet().contains("am-symbol-ghost"));
    assert_eq!(sprite.render_symbol("ghost", &AttributeMap::new()), "");
}

#[test]
fn test_unknown_handle_renders_empty_string() {
    let (_dir, mut sprite) = fixture_sprite(&[]);
    assert_eq!(sprite.render_symbol("nonexistent", &AttributeMap::new()), "");
    assert_eq!(sprite.render_symbol("", &AttributeMap::new()), "");
}

#[test]
fn test_rendering_is_deterministic() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let first = sprite.render_symbol("icon-a", &AttributeMap::new());
    let second = sprite.render_symbol("icon-a", &AttributeMap::new());
    assert_eq!(first, second);
}

#[test]
fn test_script_children_never_reach_the_sprite() {
    let (_dir, mut sprite) = fixture_sprite(&[(
        "sneaky.svg",
        r#"<svg><script>evil</script><path d="M0 0"/></svg>"#,
    )]);
    sprite.add_asset(AssetDefinition::new("sneaky", "sneaky.svg")).unwrap();

    let sheet = sprite.sheet();
    assert!(sheet.contains(r#"<symbol id="am-symbol-sneaky"><path d="M0 0"></path></symbol>"#));
    assert!(!sheet.contains("script"));
    assert!(!sheet.contains("evil"));
}

#[test]
fn test_symbol_allow_list_tracks_merged_attributes() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &attrs(&[("aria-hidden", "true"), ("height", "6")]));
    assert!(markup.contains(r#"aria-hidden="true""#));

    let allowed = sprite.symbol_allowed();
    assert!(allowed.is_element_allowed("svg"));
    assert!(allowed.is_element_allowed("use"));
    assert!(allowed.is_attr_allowed("svg", "aria-hidden"));
    assert!(allowed.is_attr_allowed("svg", "width"));
    assert!(allowed.is_attr_allowed("svg", "height"));
}

#[test]
fn test_duplicate_handle_is_rejected_with_diagnostic() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let err = sprite
        .add_asset(AssetDefinition::new("icon-a", "icon-a.svg"))
        .unwrap_err();
    assert_eq!(err, SpriteError::DuplicateHandle("icon-a".into()));
    assert_eq!(sprite.sheet().matches("am-symbol-icon-a").count(), 1);
}

#[test]
fn test_global_attributes_have_lowest_priority() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("icon-a.svg"), ICON_A).expect("write fixture");
    let config = SpriteConfig::new()
        .with_svg_directory(dir.path())
        .with_global_attribute("class", "icon")
        .with_global_attribute("width", "999");
    let mut sprite = Sprite::new(config);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    // The asset's intrinsic width out-prioritizes the global default.
    let markup = sprite.render_symbol("icon-a", &AttributeMap::new());
    assert_eq!(
        markup,
        r##"<svg class="icon" width="24" height="12"><use href="#am-symbol-icon-a"></use></svg>"##
    );
}

#[test]
fn test_empty_attribute_values_are_not_serialized() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite
        .add_asset(AssetDefinition::new("icon-a", "icon-a.svg").with_attribute("class", ""))
        .unwrap();

    let markup = sprite.render_symbol("icon-a", &AttributeMap::new());
    assert!(!markup.contains("class"));
}

#[test]
fn test_attribute_values_are_escaped() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let markup = sprite.render_symbol("icon-a", &attrs(&[("data-label", r#"a "b" & c"#)]));
    assert!(markup.contains(r#"data-label="a &quot;b&quot; &amp; c""#));
}

#[test]
fn test_sheet_contains_symbols_in_insertion_order() {
    let (_dir, mut sprite) = fixture_sprite(&[
        ("one.svg", r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#),
        ("two.svg", r#"<svg viewBox="0 0 2 2"><path d="M1 1"/></svg>"#),
    ]);
    sprite.add_asset(AssetDefinition::new("one", "one.svg")).unwrap();
    sprite.add_asset(AssetDefinition::new("two", "two.svg")).unwrap();

    let sheet = sprite.sheet();
    let first = sheet.find("am-symbol-one").expect("first symbol present");
    let second = sheet.find("am-symbol-two").expect("second symbol present");
    assert!(first < second);
    assert_eq!(sprite.handles(), ["one".to_string(), "two".to_string()]);
}

#[test]
fn test_write_symbol_to_stream() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    let mut out = Vec::new();
    sprite
        .write_symbol(&mut out, "icon-a", &attrs(&[("height", "6")]))
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        r##"<svg width="12.00" height="6"><use href="#am-symbol-icon-a"></use></svg>"##
    );

    // Unknown handles write nothing.
    let mut out = Vec::new();
    sprite
        .write_symbol(&mut out, "nonexistent", &AttributeMap::new())
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_nested_text_content_keeps_its_whitespace() {
    let (_dir, mut sprite) = fixture_sprite(&[(
        "badge.svg",
        r#"<svg viewBox="0 0 24 12"><text>fish &amp; chips</text></svg>"#,
    )]);
    sprite.add_asset(AssetDefinition::new("badge", "badge.svg")).unwrap();

    assert!(sprite.sheet().contains("<text>fish &amp; chips</text>"));
}

#[test]
fn test_viewbox_survives_into_symbol_and_sanitization() {
    let (_dir, mut sprite) = fixture_sprite(&[("icon-a.svg", ICON_A)]);
    sprite.add_asset(AssetDefinition::new("icon-a", "icon-a.svg")).unwrap();

    assert!(sprite
        .sheet()
        .contains(r#"<symbol id="am-symbol-icon-a" viewBox="0 0 24 12">"#));
}
