use kurbo::{ParamCurveArclen, Size};

use crate::animation::draw_in::DrawIn;
use crate::animation::ease::Ease;
use crate::animation::tween::Tween;
use crate::config::LineChartConfig;
use crate::data::indicator::{TimeSeries, normalize_indicator};
use crate::data::load::{LoadStatus, LoadTracker, SourceKind};
use crate::data::table::Table;
use crate::foundation::core::{Point, TimeMs, Vec2};
use crate::foundation::error::VizResult;
use crate::foundation::math::lerp;
use crate::interaction::hit::hit_test;
use crate::interaction::hover::HoverTracker;
use crate::interaction::tooltip::{
    DeterministicTextMeasurer, TooltipContent, TooltipStyle, box_size, line_chart_content,
    quadrant_origin, tooltip_layer,
};
use crate::render::line_chart::{LineScales, line_chart_dynamic_layer, line_chart_static_layer};
use crate::render::stage::{Stage, StageStats, StaticContent};
use crate::scene::{Scene, ShapeKey, ShapeKind};

const TOOLTIP_GAP: Vec2 = Vec2::new(15.0, 10.0);

#[derive(Debug)]
struct Loaded {
    series: TimeSeries,
    scales: LineScales,
    draw_in: DrawIn,
    line_length: f64,
}

#[derive(Debug)]
struct TooltipState {
    content: TooltipContent,
    origin: Point,
    size: Size,
    opacity: Tween,
}

/// One mounted time-series line chart.
#[derive(Debug)]
pub struct LineChart {
    cfg: LineChartConfig,
    tracker: LoadTracker,
    loaded: Option<Loaded>,
    stage: Stage<()>,
    hover: HoverTracker,
    tooltip: Option<TooltipState>,
    measurer: DeterministicTextMeasurer,
}

impl LineChart {
    /// Validate `cfg` and start waiting for the indicator table.
    #[tracing::instrument(skip(cfg))]
    pub fn mount(cfg: LineChartConfig, now: TimeMs) -> VizResult<Self> {
        cfg.validate()?;
        Ok(Self {
            tracker: LoadTracker::new(&[SourceKind::Table], now, cfg.load_timeout_ms),
            stage: Stage::new(cfg.canvas),
            hover: HoverTracker::new(cfg.hover_ms),
            cfg,
            loaded: None,
            tooltip: None,
            measurer: DeterministicTextMeasurer::default(),
        })
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.cfg
    }

    pub fn status(&self) -> &LoadStatus {
        self.tracker.status()
    }

    /// Deliver the result of fetching the indicator table.
    ///
    /// A table arriving after the chart became ready or failed is ignored.
    pub fn on_table(&mut self, now: TimeMs, table: VizResult<Table>) {
        match table {
            Ok(table) => {
                if !self.tracker.status().is_loading() {
                    tracing::debug!("late indicator table ignored");
                    return;
                }
                let series = normalize_indicator(&table, &self.cfg.columns);
                let scales = LineScales::compute(&series, &self.cfg);
                self.tracker.resolve(SourceKind::Table);
                self.loaded = Some(Loaded {
                    series,
                    scales,
                    draw_in: DrawIn::new(
                        now,
                        self.cfg.draw_in_ms,
                        self.cfg.draw_in_ease,
                        self.cfg.point_fade_ms,
                    ),
                    line_length: 0.0,
                });
            }
            Err(e) => self.tracker.fail(SourceKind::Table, e.to_string()),
        }
    }

    /// Advance the clock; only the load deadline depends on it.
    pub fn advance(&mut self, now: TimeMs) -> &LoadStatus {
        self.tracker.poll(now)
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do: the load
    /// deadline while the table is pending. Animation frames are reported by
    /// [`is_animating`](Self::is_animating) instead.
    pub fn next_wakeup(&self) -> Option<TimeMs> {
        self.tracker.deadline()
    }

    pub fn series(&self) -> Option<&TimeSeries> {
        self.loaded.as_ref().map(|l| &l.series)
    }

    pub fn scales(&self) -> Option<&LineScales> {
        self.loaded.as_ref().map(|l| &l.scales)
    }

    pub fn hovered(&self) -> Option<&ShapeKey> {
        self.hover.hovered()
    }

    pub fn stage_stats(&self) -> StageStats {
        self.stage.stats()
    }

    /// Whether frames at `now` and later still differ.
    pub fn is_animating(&self, now: TimeMs) -> bool {
        let draw_in = self
            .loaded
            .as_ref()
            .is_some_and(|l| now < l.draw_in.ends_at());
        let tooltip = self
            .tooltip
            .as_ref()
            .is_some_and(|t| !t.opacity.is_done(now));
        draw_in || tooltip || self.hover.is_animating(now)
    }

    pub fn pointer_move(&mut self, now: TimeMs, pos: Point) -> Option<&ShapeKey> {
        if !self.sync_layers() {
            return None;
        }
        let hit = self
            .stage
            .dynamic_layer()
            .and_then(|layer| hit_test(layer, pos, 0.0));
        let change = self.hover.update(now, hit);
        if let Some(ShapeKey::Point(year)) = change.entered {
            self.show_tooltip(now, year);
        } else if change.left.is_some() {
            self.hide_tooltip(now);
        }
        self.hover.hovered()
    }

    pub fn pointer_leave(&mut self, now: TimeMs) {
        if !self.hover.leave(now).is_empty() {
            self.hide_tooltip(now);
        }
    }

    fn show_tooltip(&mut self, now: TimeMs, year: i32) {
        let Some(loaded) = &self.loaded else {
            return;
        };
        let Some(point) = loaded.series.points().iter().find(|p| p.year == year) else {
            return;
        };
        let anchor = loaded.scales.point(point.year, point.value);
        let content = line_chart_content(point.year, point.value, &self.cfg);
        let style = TooltipStyle::line_chart();
        let size = box_size(&content, &style, &self.measurer);
        let origin = quadrant_origin(anchor, size, TOOLTIP_GAP, self.cfg.canvas);

        let current = self
            .tooltip
            .as_ref()
            .map_or_else(|| Tween::settled(0.0), |t| t.opacity);
        self.tooltip = Some(TooltipState {
            content,
            origin,
            size,
            opacity: current.retarget(now, 1.0, self.cfg.hover_ms, Ease::InOutCubic),
        });
    }

    fn hide_tooltip(&mut self, now: TimeMs) {
        if let Some(t) = &mut self.tooltip {
            t.opacity = t
                .opacity
                .retarget(now, 0.0, self.cfg.hover_ms, Ease::InOutCubic);
        }
    }

    // Returns `false` while there is nothing to draw.
    fn sync_layers(&mut self) -> bool {
        let Some(loaded) = &mut self.loaded else {
            return false;
        };
        let cfg = &self.cfg;
        self.stage.ensure_static(|| StaticContent {
            layers: vec![line_chart_static_layer(&loaded.scales, cfg)],
            defs: Vec::new(),
        });
        if self.stage.sync_dynamic((), || {
            line_chart_dynamic_layer(&loaded.series, &loaded.scales, cfg)
        }) {
            loaded.line_length = self
                .stage
                .dynamic_layer()
                .and_then(|l| l.find(&ShapeKey::Line))
                .map_or(0.0, |line| match &line.kind {
                    ShapeKind::Path(p) => p.segments().map(|s| s.arclen(0.1)).sum(),
                    _ => 0.0,
                });
        }
        true
    }

    /// The chart as it appears at `now`. Empty until the table has loaded.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame(&mut self, now: TimeMs) -> Scene {
        if !self.sync_layers() {
            return Scene::new(self.cfg.canvas);
        }
        let mut scene = self.stage.compose();
        let Some(loaded) = &self.loaded else {
            return scene;
        };
        let cfg = &self.cfg;

        let progress = loaded.draw_in.sample(now);
        if progress.reveal < 1.0
            && let Some(line) = scene.find_mut(&ShapeKey::Line)
        {
            let len = loaded.line_length;
            line.style.dash = Some(vec![len, len]);
            line.style.dash_offset = progress.dash_offset(len);
        }

        for p in loaded.series.points() {
            let key = ShapeKey::Point(p.year);
            let e = self.hover.emphasis(&key, now);
            let Some(shape) = scene.find_mut(&key) else {
                continue;
            };
            shape.style.opacity = progress.points_opacity;
            if e > 0.0 {
                if let ShapeKind::Circle { radius, .. } = &mut shape.kind {
                    *radius = lerp(cfg.point_radius, cfg.point_radius_hover, e);
                }
                shape.style.stroke_width =
                    lerp(cfg.point_stroke_width, cfg.point_stroke_width_hover, e);
                shape.style.stroke = Some(cfg.line_color.mix(cfg.hover_color, e));
            }
        }

        if let Some(t) = &self.tooltip {
            let opacity = t.opacity.sample(now);
            if opacity > 0.0 {
                scene.layers.push(tooltip_layer(
                    &t.content,
                    t.origin,
                    t.size,
                    &TooltipStyle::line_chart(),
                    opacity,
                ));
            }
        }
        scene
    }

    /// Tear down; retained output and hover state are released with the instance.
    pub fn unmount(mut self) {
        self.stage.clear();
        self.hover.clear();
        tracing::debug!("line chart unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/line_chart.rs"]
mod tests;
