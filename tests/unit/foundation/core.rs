use super::*;

#[test]
fn canvas_rejects_non_positive_sizes() {
    assert!(Canvas::new(0.0, 10.0).is_err());
    assert!(Canvas::new(10.0, -1.0).is_err());
    assert!(Canvas::new(f64::NAN, 1.0).is_err());
    let c = Canvas::new(620.0, 320.0).unwrap();
    assert_eq!(c.center(), Point::new(310.0, 160.0));
}

#[test]
fn time_arithmetic_saturates() {
    assert_eq!(TimeMs(5).since(TimeMs(10)), 0);
    assert_eq!(TimeMs(10).since(TimeMs(4)), 6);
    assert_eq!(TimeMs(u64::MAX).after(1), TimeMs(u64::MAX));
}

#[test]
fn color_parse_and_css_roundtrip() {
    let c = Color::parse_hex("#d32f2f").unwrap();
    assert_eq!(c, Color::rgb(0xd3, 0x2f, 0x2f));
    assert_eq!(c.to_css(), "#d32f2f");
    assert_eq!(Color::parse_hex("fff").unwrap(), Color::WHITE);
    assert!(Color::parse_hex("#12345").is_err());
    assert_eq!(Color::rgba(0, 0, 0, 0.85).to_css(), "rgba(0,0,0,0.85)");
}

#[test]
fn color_mix_interpolates_channels() {
    let a = Color::rgb(0xd3, 0x2f, 0x2f);
    let b = Color::rgb(0xb7, 0x1c, 0x1c);
    assert_eq!(a.mix(b, 0.0), a);
    assert_eq!(a.mix(b, 1.0), b);
    let mid = a.mix(b, 0.5);
    assert!(mid.r < a.r && mid.r > b.r);
}

#[test]
fn color_deserializes_from_hex_or_array() {
    let c: Color = serde_json::from_str("\"#b71c1c\"").unwrap();
    assert_eq!(c, Color::rgb(0xb7, 0x1c, 0x1c));
    let c: Color = serde_json::from_str("[0, 0, 0, 0.5]").unwrap();
    assert_eq!(c, Color::rgba(0, 0, 0, 0.5));
}
