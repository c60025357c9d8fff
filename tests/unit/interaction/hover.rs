use super::*;

fn arc(code: &str) -> ShapeKey {
    ShapeKey::Arc(code.to_owned())
}

#[test]
fn enter_and_leave_report_changes() {
    let mut h = HoverTracker::new(200);
    let c = h.update(TimeMs(0), Some(arc("SAU")));
    assert_eq!(c.entered, Some(arc("SAU")));
    assert_eq!(c.left, None);
    assert!(h.update(TimeMs(10), Some(arc("SAU"))).is_empty());

    let c = h.update(TimeMs(20), Some(arc("OMN")));
    assert_eq!(c.left, Some(arc("SAU")));
    assert_eq!(c.entered, Some(arc("OMN")));

    let c = h.leave(TimeMs(30));
    assert_eq!(c.left, Some(arc("OMN")));
    assert_eq!(h.hovered(), None);
}

#[test]
fn emphasis_tweens_over_duration() {
    let mut h = HoverTracker::new(200);
    h.update(TimeMs(1_000), Some(arc("SAU")));
    assert_eq!(h.emphasis(&arc("SAU"), TimeMs(1_000)), 0.0);
    let mid = h.emphasis(&arc("SAU"), TimeMs(1_100));
    assert!((mid - 0.5).abs() < 1e-12);
    assert_eq!(h.emphasis(&arc("SAU"), TimeMs(1_200)), 1.0);
    assert!(h.is_animating(TimeMs(1_150)));
    assert!(!h.is_animating(TimeMs(1_200)));
    assert_eq!(h.emphasis(&arc("OMN"), TimeMs(1_200)), 0.0);
}

#[test]
fn leaving_mid_transition_reverses_from_current_value() {
    let mut h = HoverTracker::new(200);
    h.update(TimeMs(0), Some(arc("SAU")));
    let at_leave = h.emphasis(&arc("SAU"), TimeMs(100));
    h.leave(TimeMs(100));
    assert!((h.emphasis(&arc("SAU"), TimeMs(100)) - at_leave).abs() < 1e-12);
    assert_eq!(h.emphasis(&arc("SAU"), TimeMs(300)), 0.0);
}

#[test]
fn retain_drops_vanished_hover() {
    let mut h = HoverTracker::new(200);
    h.update(TimeMs(0), Some(arc("SAU")));
    assert!(!h.retain(|k| *k == arc("SAU")));
    assert_eq!(h.hovered(), Some(&arc("SAU")));

    assert!(h.retain(|_| false));
    assert_eq!(h.hovered(), None);
    assert_eq!(h.emphasis(&arc("SAU"), TimeMs(500)), 0.0);
}
