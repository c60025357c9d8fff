use kurbo::{ParamCurve, PathEl, QuadBez};

use super::*;
use crate::data::geo::{BoundaryFeature, Geometry};
use crate::data::load::LoadFailure;
use crate::foundation::error::VizError;
use crate::interaction::tooltip::TOOLTIP_LAYER;
use crate::render::flow_map::ARROWS_LAYER;
use crate::scene::ShapeKind;

const HEADER: &str = "Year,Country of Origin ISO,Country of Asylum ISO,Country of Asylum,Refugees,Asylum-seekers,Other people in need of international protection";

fn csv(rows: &[&str]) -> VizResult<Table> {
    let mut text = HEADER.to_owned();
    for r in rows {
        text.push('\n');
        text.push_str(r);
    }
    Table::from_csv_str(&text)
}

fn square(id: &str, lon: f64, lat: f64) -> BoundaryFeature {
    BoundaryFeature {
        id: id.to_owned(),
        name: None,
        geometry: Geometry {
            polygons: vec![vec![vec![
                [lon - 1.0, lat - 1.0],
                [lon + 1.0, lat - 1.0],
                [lon + 1.0, lat + 1.0],
                [lon - 1.0, lat + 1.0],
                [lon - 1.0, lat - 1.0],
            ]]],
        },
    }
}

fn world(codes: &[&str]) -> BoundarySet {
    let all = [("YEM", 48.0, 15.5), ("SAU", 45.0, 24.0), ("OMN", 57.0, 21.0)];
    BoundarySet::new(
        all.iter()
            .filter(|(c, ..)| codes.contains(c))
            .map(|&(c, lon, lat)| square(c, lon, lat))
            .collect(),
    )
}

const ROWS: &[&str] = &[
    "2015,YEM,SAU,Saudi Arabia,1500,500,0",
    "2016,YEM,OMN,Oman,100,,0",
];

fn ready_map(codes: &[&str]) -> FlowMap {
    let mut map = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    map.on_table(csv(ROWS));
    map.on_geometry(Ok(world(codes)));
    map
}

fn arc_count(scene: &Scene) -> usize {
    scene.layer(ARROWS_LAYER).map_or(0, |l| {
        l.shapes
            .iter()
            .filter(|s| matches!(s.key, Some(ShapeKey::Arc(_))))
            .count()
    })
}

fn arc_midpoint(scene: &Scene, code: &str) -> Point {
    let shape = scene.find(&ShapeKey::Arc(code.into())).expect("arc");
    let ShapeKind::Path(path) = &shape.kind else {
        panic!("arc must be a path");
    };
    match path.elements() {
        [PathEl::MoveTo(p0), PathEl::QuadTo(p1, p2)] => QuadBez::new(*p0, *p1, *p2).eval(0.5),
        other => panic!("unexpected arc elements {other:?}"),
    }
}

#[test]
fn waits_for_both_sources() {
    let mut map = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    map.on_geometry(Ok(world(&["YEM", "SAU"])));
    assert!(map.status().is_loading());
    assert_eq!(map.frame(TimeMs(0)).shape_count(), 0);
    assert_eq!(map.toggle_play(TimeMs(0)), PlaybackState::Paused);
    assert_eq!(map.year_total(), None);

    map.on_table(csv(ROWS));
    assert!(map.status().is_ready());
    let view = map.view_state().expect("view");
    assert_eq!(view.year_range, (2015, 2016));
    assert_eq!(view.selected_year, 2015);
    assert!(!view.is_playing);
}

#[test]
fn one_record_draws_one_arc_and_empty_year_keeps_origin() {
    let mut map = ready_map(&["YEM", "SAU", "OMN"]);
    let scene = map.frame(TimeMs(0));
    assert_eq!(arc_count(&scene), 1);
    assert!(scene.find(&ShapeKey::Origin).is_some());
    assert_eq!(scene.defs.len(), 1);

    assert_eq!(map.select_year(2016), Some(2016));
    let scene = map.frame(TimeMs(0));
    assert_eq!(arc_count(&scene), 0);
    assert!(scene.find(&ShapeKey::Origin).is_some());
    assert_eq!(map.year_total(), Some(100.0));
}

#[test]
fn missing_destination_is_skipped_silently() {
    let mut map = ready_map(&["YEM"]);
    let scene = map.frame(TimeMs(0));
    assert_eq!(arc_count(&scene), 0);
    assert!(scene.find(&ShapeKey::Origin).is_some());
    assert_eq!(map.frame_set().len(), 1);
}

#[test]
fn selection_clamps_into_range() {
    let mut map = ready_map(&["YEM", "SAU"]);
    assert_eq!(map.select_year(1999), Some(2015));
    assert_eq!(map.select_year(2099), Some(2016));
}

#[test]
fn playback_steps_and_wraps() {
    let mut map = ready_map(&["YEM", "SAU"]);
    assert_eq!(map.toggle_play(TimeMs(0)), PlaybackState::Playing);
    assert!(map.view_state().expect("view").is_playing);
    assert_eq!(map.next_wakeup(), Some(TimeMs(1_000)));

    assert!(!map.advance(TimeMs(999)));
    assert!(map.advance(TimeMs(1_000)));
    assert_eq!(map.view_state().map(|v| v.selected_year), Some(2016));
    assert!(map.advance(TimeMs(2_000)));
    assert_eq!(map.view_state().map(|v| v.selected_year), Some(2015));
}

#[test]
fn pause_cancels_the_interval() {
    let mut map = ready_map(&["YEM", "SAU"]);
    map.toggle_play(TimeMs(0));
    map.advance(TimeMs(1_000));
    assert_eq!(map.toggle_play(TimeMs(1_500)), PlaybackState::Paused);
    assert_eq!(map.next_wakeup(), None);
    assert!(!map.advance(TimeMs(10_000)));
    assert_eq!(map.view_state().map(|v| v.selected_year), Some(2016));
}

#[test]
fn redraw_is_keyed_by_year() {
    let mut map = ready_map(&["YEM", "SAU"]);
    let a = map.frame(TimeMs(0)).shape_count();
    let b = map.frame(TimeMs(10)).shape_count();
    assert_eq!(a, b);
    assert_eq!(map.stage_stats().dynamic_builds, 1);

    map.select_year(2016);
    map.frame(TimeMs(20));
    map.select_year(2015);
    assert_eq!(map.frame(TimeMs(30)).shape_count(), a);
    assert_eq!(map.stage_stats().dynamic_builds, 3);
    assert_eq!(map.stage_stats().static_builds, 1);
}

#[test]
fn hovering_an_arc_emphasizes_it_and_shows_tooltip() {
    let mut map = ready_map(&["YEM", "SAU"]);
    let scene = map.frame(TimeMs(0));
    let base = scene
        .find(&ShapeKey::Arc("SAU".into()))
        .expect("arc")
        .style
        .stroke_width;
    let mid = arc_midpoint(&scene, "SAU");

    assert_eq!(
        map.pointer_move(TimeMs(0), mid).cloned(),
        Some(ShapeKey::Arc("SAU".into()))
    );
    let hovered = map.frame(TimeMs(200));
    let arc = hovered.find(&ShapeKey::Arc("SAU".into())).expect("arc");
    assert!((arc.style.stroke_width - (base + 2.0)).abs() < 1e-9);
    assert!((arc.style.stroke_opacity - 1.0).abs() < 1e-9);

    let tip = hovered.layer(TOOLTIP_LAYER).expect("tooltip");
    let texts = tip
        .shapes
        .iter()
        .filter_map(|s| match &s.kind {
            ShapeKind::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["Saudi Arabia (2015)", "Migrants: 2,000"]);

    map.pointer_leave(TimeMs(200));
    let left = map.frame(TimeMs(400));
    assert!(left.layer(TOOLTIP_LAYER).is_none());
    let arc = left.find(&ShapeKey::Arc("SAU".into())).expect("arc");
    assert!((arc.style.stroke_width - base).abs() < 1e-9);
}

#[test]
fn hover_is_dropped_when_the_arc_disappears() {
    let mut map = ready_map(&["YEM", "SAU"]);
    let scene = map.frame(TimeMs(0));
    let mid = arc_midpoint(&scene, "SAU");
    map.pointer_move(TimeMs(0), mid);
    assert!(map.hovered().is_some());

    map.select_year(2016);
    let scene = map.frame(TimeMs(50));
    assert!(map.hovered().is_none());
    assert!(scene.layer(TOOLTIP_LAYER).is_none());
}

#[test]
fn geometry_failure_and_timeout() {
    let mut map = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    map.on_table(csv(ROWS));
    map.on_geometry(Err(VizError::fetch("connection reset")));
    assert!(matches!(
        map.status(),
        LoadStatus::Failed(LoadFailure::Fetch {
            source: SourceKind::Geometry,
            ..
        })
    ));
    assert_eq!(map.frame(TimeMs(0)).shape_count(), 0);

    let mut slow = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    slow.on_table(csv(ROWS));
    slow.advance(TimeMs(15_000));
    assert_eq!(
        slow.status(),
        &LoadStatus::Failed(LoadFailure::TimedOut { after_ms: 15_000 })
    );
}

#[test]
fn unmount_while_playing_is_clean() {
    let mut map = ready_map(&["YEM", "SAU"]);
    map.toggle_play(TimeMs(0));
    let mid = arc_midpoint(&map.frame(TimeMs(0)), "SAU");
    assert!(map.pointer_move(TimeMs(0), mid).is_some());
    assert_eq!(map.timers.active_count(), 1);

    map.release();
    assert_eq!(map.timers.active_count(), 0);
    assert_eq!(map.next_wakeup(), None);
    assert_eq!(map.playback_state(), PlaybackState::Paused);
    assert!(!map.view_state().expect("view").is_playing);
    assert!(map.hovered().is_none());

    // Time passing after teardown never steps the year.
    assert!(!map.advance(TimeMs(10_000)));
    assert_eq!(map.view_state().expect("view").selected_year, 2015);
    map.unmount();
}

#[test]
fn pending_sources_report_the_load_deadline() {
    let mut map = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    map.on_table(csv(ROWS));
    assert!(map.status().is_loading());
    assert_eq!(map.next_wakeup(), Some(TimeMs(15_000)));

    let at = map.next_wakeup().expect("deadline");
    map.advance(at);
    assert_eq!(
        map.status(),
        &LoadStatus::Failed(LoadFailure::TimedOut { after_ms: 15_000 })
    );
    assert_eq!(map.next_wakeup(), None);
}

#[test]
fn ready_map_wakes_only_for_playback() {
    let mut map = ready_map(&["YEM", "SAU"]);
    assert_eq!(map.next_wakeup(), None);
    map.toggle_play(TimeMs(200));
    assert_eq!(map.next_wakeup(), Some(TimeMs(1_200)));
}

#[test]
fn row_with_invalid_utf8_does_not_fail_the_load() {
    let mut text = HEADER.as_bytes().to_vec();
    text.extend_from_slice(b"\n2015,YEM,SAU,Saudi Arabia,2000,0,0");
    text.extend_from_slice(b"\n2015,YEM,OMN,O\xffman,900,0,0");
    let mut map = FlowMap::mount(FlowMapConfig::default(), TimeMs(0)).expect("mount");
    map.on_table(Table::from_csv_reader(text.as_slice()));
    map.on_geometry(Ok(world(&["YEM", "SAU", "OMN"])));

    assert!(map.status().is_ready());
    let codes: Vec<_> = map.frame_set().iter().map(|r| r.dest_code.as_str()).collect();
    assert_eq!(codes, ["SAU", "OMN"]);
    assert_eq!(arc_count(&map.frame(TimeMs(0))), 2);
}
