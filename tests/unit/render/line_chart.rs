use super::*;
use crate::data::indicator::TimeSeriesPoint;

fn series(points: &[(i32, f64)]) -> TimeSeries {
    TimeSeries::new(
        points
            .iter()
            .map(|&(year, value)| TimeSeriesPoint { year, value })
            .collect(),
    )
}

fn texts(layer: &Layer) -> Vec<String> {
    layer
        .shapes
        .iter()
        .filter_map(|s| match &s.kind {
            ShapeKind::Text(t) => Some(t.text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn scales_cover_years_and_headroom() {
    let cfg = LineChartConfig::default();
    let s = LineScales::compute(&series(&[(1990, 10.0), (1991, 12.0)]), &cfg);
    assert_eq!(s.x.domain(), [1990.0, 1991.0]);
    assert_eq!(s.x.range(), [50.0, 770.0]);
    assert_eq!(s.y.domain(), [0.0, 14.0]);
    assert_eq!(s.y.range(), [350.0, 40.0]);
    assert_eq!(s.point(1990, 0.0), Point::new(50.0, 350.0));
}

#[test]
fn static_layer_has_dashed_gridlines_except_at_zero() {
    let cfg = LineChartConfig::default();
    let s = LineScales::compute(&series(&[(1990, 10.0), (1991, 12.0)]), &cfg);
    let layer = line_chart_static_layer(&s, &cfg);

    let grid = layer
        .shapes
        .iter()
        .filter(|sh| sh.style.dash.as_deref() == Some(&[4.0, 4.0][..]))
        .collect::<Vec<_>>();
    assert_eq!(grid.len(), 7);
    for g in grid {
        let ShapeKind::Line { from, to } = g.kind else {
            panic!("gridline must be a line");
        };
        assert_ne!(from.y, 350.0);
        assert_eq!((from.x, to.x), (50.0, 770.0));
        assert_eq!(g.style.stroke, Some(Color::rgb(0xe0, 0xe0, 0xe0)));
    }
}

#[test]
fn static_layer_labels_and_titles() {
    let cfg = LineChartConfig::default();
    let s = LineScales::compute(&series(&[(1990, 10.0), (1991, 12.0)]), &cfg);
    let labels = texts(&line_chart_static_layer(&s, &cfg));

    assert!(labels.contains(&"1990".to_owned()));
    assert!(labels.contains(&"1991".to_owned()));
    assert!(!labels.iter().any(|l| l.contains('.')));
    for v in ["0", "2", "14"] {
        assert!(labels.contains(&v.to_owned()), "missing y label {v}");
    }
    assert!(labels.contains(&"Years".to_owned()));
    assert!(labels.contains(&"Billions of USD ($)".to_owned()));
}

#[test]
fn dynamic_layer_keys_line_and_points() {
    let cfg = LineChartConfig::default();
    let data = series(&[(1990, 10.0), (1991, 12.0), (1992, 11.0)]);
    let s = LineScales::compute(&data, &cfg);
    let layer = line_chart_dynamic_layer(&data, &s, &cfg);

    assert_eq!(layer.len(), 4);
    let line = layer.find(&ShapeKey::Line).expect("line");
    assert_eq!(line.style.stroke, Some(cfg.line_color));
    assert_eq!(line.style.stroke_width, 3.0);

    let p = layer.find(&ShapeKey::Point(1991)).expect("point");
    match p.kind {
        ShapeKind::Circle { center, radius } => {
            assert_eq!(center, s.point(1991, 12.0));
            assert_eq!(radius, 4.0);
        }
        _ => panic!("point must be a circle"),
    }
    assert_eq!(p.style.fill, Some(Color::WHITE));
}

#[test]
fn empty_series_renders_axes_only() {
    let cfg = LineChartConfig::default();
    let empty = TimeSeries::default();
    let s = LineScales::compute(&empty, &cfg);
    assert!(line_chart_dynamic_layer(&empty, &s, &cfg).is_empty());
    assert!(!line_chart_static_layer(&s, &cfg).is_empty());
}

#[test]
fn small_steps_keep_decimals() {
    assert_eq!(tick_decimals(&[0.0, 0.5, 1.0]), 1);
    assert_eq!(tick_decimals(&[0.0, 0.05]), 2);
    assert_eq!(tick_decimals(&[0.0, 5.0]), 0);
    assert_eq!(tick_decimals(&[]), 0);
}
