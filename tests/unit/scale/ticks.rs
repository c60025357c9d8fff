use super::*;

#[test]
fn ticks_match_d3_for_common_domains() {
    assert_eq!(ticks(0.0, 14.0, 6), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0]);
    assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    assert_eq!(
        ticks(1990.0, 2025.0, 10),
        vec![1990.0, 1995.0, 2000.0, 2005.0, 2010.0, 2015.0, 2020.0, 2025.0]
    );
}

#[test]
fn ticks_handle_degenerate_inputs() {
    assert_eq!(ticks(3.0, 3.0, 10), vec![3.0]);
    assert!(ticks(0.0, 1.0, 0).is_empty());
    assert!(ticks(f64::NAN, 1.0, 5).is_empty());
}

#[test]
fn reversed_domains_yield_descending_ticks() {
    assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
}

#[test]
fn nice_rounds_outward() {
    assert_eq!(nice(0.0, 13.2, 10), (0.0, 14.0));
    assert_eq!(nice(0.0, 97.3, 10), (0.0, 100.0));
    assert_eq!(nice(1.3, 8.7, 10), (1.0, 9.0));
}

#[test]
fn nice_leaves_empty_spans_alone() {
    assert_eq!(nice(0.0, 0.0, 10), (0.0, 0.0));
}
