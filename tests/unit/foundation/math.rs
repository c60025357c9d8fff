use super::*;

#[test]
fn fmt_num_trims_trailing_zeros() {
    assert_eq!(fmt_num(1.0), "1");
    assert_eq!(fmt_num(1.5), "1.5");
    assert_eq!(fmt_num(0.12345), "0.123");
    assert_eq!(fmt_num(-0.0001), "0");
    assert_eq!(fmt_num(f64::NAN), "0");
}

#[test]
fn fmt_grouped_inserts_commas() {
    assert_eq!(fmt_grouped(0.0, 0), "0");
    assert_eq!(fmt_grouped(999.0, 0), "999");
    assert_eq!(fmt_grouped(1000.0, 0), "1,000");
    assert_eq!(fmt_grouped(1234567.0, 0), "1,234,567");
    assert_eq!(fmt_grouped(-12345.0, 0), "-12,345");
    assert_eq!(fmt_grouped(1234.5, 2), "1,234.50");
}

#[test]
fn lerp_hits_endpoints() {
    assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
    assert_eq!(lerp(2.0, 6.0, 0.5), 4.0);
}
