use super::*;

#[test]
fn empty_json_yields_defaults() {
    let cfg = VizConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg.flow_map.origin_code, "YEM");
    assert_eq!(cfg.flow_map.top_n, 30);
    assert_eq!(cfg.flow_map.min_year, 2012);
    assert_eq!(cfg.flow_map.columns.value_columns.len(), 3);
    assert_eq!(cfg.line_chart.draw_in_ms, 2000);
    assert_eq!(cfg.line_chart.canvas.width, 800.0);
    assert_eq!(cfg.line_chart.load_timeout_ms, 15_000);
    assert_eq!(cfg.flow_map.load_timeout_ms, 15_000);
    assert_eq!(cfg.flow_map.translate(), [310.0, 160.0]);
}

#[test]
fn partial_override_keeps_other_defaults() {
    let cfg = VizConfig::from_json_str(
        r##"{ "flow_map": { "origin_code": "SYR", "arc_color": "#0000ff" } }"##,
    )
    .unwrap();
    assert_eq!(cfg.flow_map.origin_code, "SYR");
    assert_eq!(cfg.flow_map.arc_color, Color::rgb(0, 0, 255));
    assert_eq!(cfg.flow_map.play_interval_ms, 1000);

    let cfg =
        VizConfig::from_json_str(r#"{ "line_chart": { "load_timeout_ms": 3000 } }"#).unwrap();
    assert_eq!(cfg.line_chart.load_timeout_ms, 3000);
    assert_eq!(cfg.line_chart.hover_ms, 200);
}

#[test]
fn validation_rejects_bad_values() {
    let mut flow = FlowMapConfig::default();
    flow.top_n = 0;
    assert!(flow.validate().is_err());

    let mut flow = FlowMapConfig::default();
    flow.columns.value_columns.clear();
    assert!(flow.validate().is_err());

    let mut line = LineChartConfig::default();
    line.margins.left = 900.0;
    assert!(line.validate().is_err());

    assert!(VizConfig::from_json_str(r#"{ "line_chart": { "y_ticks": 0 } }"#).is_err());
    assert!(VizConfig::from_json_str(r#"{ "line_chart": { "load_timeout_ms": 0 } }"#).is_err());
}

#[test]
fn unparsable_json_is_a_serde_error() {
    let err = VizConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, VizError::Serde(_)));
}
