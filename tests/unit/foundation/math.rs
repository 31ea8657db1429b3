use super::*;

#[test]
fn mul_div255_rounds_to_nearest() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(0, 255), 0);
    assert_eq!(mul_div255_u8(128, 255), 128);
    assert_eq!(mul_div255_u8(255, 128), 128);
}

#[test]
fn premultiply_zeroes_transparent_pixels() {
    let mut px = vec![100u8, 50, 200, 0, 100, 50, 200, 255];
    premultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[0, 0, 0, 0]);
    assert_eq!(&px[4..], &[100, 50, 200, 255]);
}

#[test]
fn leading_number_accepts_units_and_whitespace() {
    assert_eq!(parse_leading_f64("5"), Some(5.0));
    assert_eq!(parse_leading_f64("5px"), Some(5.0));
    assert_eq!(parse_leading_f64("  2.5em"), Some(2.5));
    assert_eq!(parse_leading_f64(".5"), Some(0.5));
    assert_eq!(parse_leading_f64("-3"), Some(-3.0));
    assert_eq!(parse_leading_f64("1e2x"), Some(100.0));
    assert_eq!(parse_leading_f64("1e"), Some(1.0));
}

#[test]
fn css_numbers_match_script_formatting() {
    assert_eq!(format_css_number(5.0), "5");
    assert_eq!(format_css_number(1.5), "1.5");
    assert_eq!(format_css_number(-0.0), "0");
    assert_eq!(format_css_number(100.0 / 3.0), "33.333333333333336");
    assert_eq!(format_css_number(1e20), "100000000000000000000");
    assert_eq!(format_css_number(1e21), "1e+21");
    assert_eq!(format_css_number(2.5e300), "2.5e+300");
    assert_eq!(format_css_number(0.000001), "0.000001");
    assert_eq!(format_css_number(1.5e-7), "1.5e-7");
}

#[test]
fn leading_number_rejects_non_numeric() {
    assert_eq!(parse_leading_f64(""), None);
    assert_eq!(parse_leading_f64("px"), None);
    assert_eq!(parse_leading_f64("."), None);
    assert_eq!(parse_leading_f64("-"), None);
    assert_eq!(parse_leading_f64("abc5"), None);
}
