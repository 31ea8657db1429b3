use super::*;

#[test]
fn filter_uses_defaults_when_unset() {
    assert_eq!(filter_string(None, None), "blur(10px) brightness(0.8)");
}

#[test]
fn filter_uses_given_values() {
    assert_eq!(
        filter_string(Some("5"), Some("1.5")),
        "blur(5px) brightness(1.5)"
    );
    assert_eq!(
        filter_string(Some("2.5"), Some("0.25")),
        "blur(2.5px) brightness(0.25)"
    );
}

#[test]
fn extreme_blur_values_format_like_script_numbers() {
    assert_eq!(
        filter_string(Some("1e21"), None),
        "blur(1e+21px) brightness(0.8)"
    );
    assert_eq!(filter_string(Some("-0"), None), "blur(0px) brightness(0.8)");
    assert_eq!(
        filter_string(Some("0.0000001"), None),
        "blur(1e-7px) brightness(0.8)"
    );
    assert_eq!(filter_string(Some("1e400"), None), "blur(10px) brightness(0.8)");
}

#[test]
fn malformed_blur_falls_back_to_default() {
    for raw in ["", "abc", "-4", "NaN", "px"] {
        assert_eq!(resolve_blur(Some(raw)), 10.0, "raw blur {raw:?}");
    }
    assert_eq!(resolve_blur(Some("7px")), 7.0);
    assert_eq!(resolve_blur(Some("0")), 0.0);
}

#[test]
fn brightness_is_passed_through_verbatim() {
    assert_eq!(resolve_brightness(Some("120%")), "120%");
    assert_eq!(resolve_brightness(Some("")), "0.8");
    assert_eq!(resolve_brightness(None), "0.8");
}

#[test]
fn glyph_style_reflects_values_or_defaults() {
    let mut attrs = AttributeStore::new();
    assert_eq!(
        glyph_style_for(&attrs),
        GlyphStyle {
            x: "50%".to_string(),
            y: "50%".to_string(),
            font_size: "100px".to_string(),
            font_weight: "700".to_string(),
            font_family: "sans-serif".to_string(),
        }
    );

    attrs.set_attr(AttrName::TextX, "120");
    attrs.set_attr(AttrName::TextY, "30%");
    attrs.set_attr(AttrName::FontFamily, "Georgia, serif");
    let style = glyph_style_for(&attrs);
    assert_eq!(style.x, "120");
    assert_eq!(style.y, "30%");
    assert_eq!(style.font_family, "Georgia, serif");
    assert_eq!(style.font_size, "100px");
}

#[test]
fn fit_defaults_to_cover() {
    let mut attrs = AttributeStore::new();
    assert_eq!(fit_for(&attrs), "cover");
    attrs.set_attr(AttrName::ObjectFit, "contain");
    assert_eq!(fit_for(&attrs), "contain");
}

#[test]
fn glyph_text_is_trimmed() {
    assert_eq!(glyph_text("\n  HELLO \t"), "HELLO");
    assert_eq!(glyph_text("   "), "");
}

#[test]
fn reservation_uses_padding_percentage() {
    let host = reserved_host_style(300.0 / 400.0);
    assert_eq!(host.height.as_deref(), Some("0"));
    assert_eq!(host.padding_top.as_deref(), Some("75%"));
}
