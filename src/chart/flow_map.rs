use crate::animation::playback::{Playback, PlaybackState};
use crate::animation::timer::TimerQueue;
use crate::chart::view_state::ViewState;
use crate::config::FlowMapConfig;
use crate::data::flow::{FlowDataset, FlowRecord, normalize_flows};
use crate::data::geo::BoundarySet;
use crate::data::load::{LoadStatus, LoadTracker, SourceKind};
use crate::data::table::Table;
use crate::foundation::core::{Point, TimeMs, Vec2};
use crate::foundation::error::VizResult;
use crate::foundation::math::lerp;
use crate::interaction::hit::hit_test;
use crate::interaction::hover::HoverTracker;
use crate::interaction::tooltip::{
    DeterministicTextMeasurer, TooltipStyle, box_size, cursor_origin, flow_map_content,
    tooltip_layer,
};
use crate::render::flow_map::{
    FlowScales, FlowStatic, flow_map_dynamic_layer, flow_map_static_layer,
};
use crate::render::stage::{Stage, StageStats, StaticContent};
use crate::scene::{Scene, ShapeKey};

/// Dynamic-layer identity: dataset generation and selected year.
type FrameKey = (u64, i32);

/// One mounted flow map.
///
/// Needs both the flow table and the boundary set before it draws anything. Playback ticks
/// arrive through [`advance`](Self::advance); the interval timer belongs to this instance and
/// is cancelled on pause, unmount and drop.
#[derive(Debug)]
pub struct FlowMap {
    cfg: FlowMapConfig,
    scales: FlowScales,
    tracker: LoadTracker,
    dataset: Option<FlowDataset>,
    boundaries: Option<BoundarySet>,
    view: Option<ViewState>,
    generation: u64,
    playback: Playback,
    timers: TimerQueue,
    stage: Stage<FrameKey>,
    hover: HoverTracker,
    pointer: Option<Point>,
    measurer: DeterministicTextMeasurer,
}

impl FlowMap {
    #[tracing::instrument(skip(cfg), fields(origin = %cfg.origin_code))]
    pub fn mount(cfg: FlowMapConfig, now: TimeMs) -> VizResult<Self> {
        cfg.validate()?;
        Ok(Self {
            scales: FlowScales::from_config(&cfg),
            tracker: LoadTracker::new(
                &[SourceKind::Table, SourceKind::Geometry],
                now,
                cfg.load_timeout_ms,
            ),
            dataset: None,
            boundaries: None,
            view: None,
            generation: 0,
            playback: Playback::new(cfg.play_interval_ms),
            timers: TimerQueue::new(),
            stage: Stage::new(cfg.canvas),
            hover: HoverTracker::new(cfg.hover_ms),
            pointer: None,
            measurer: DeterministicTextMeasurer::default(),
            cfg,
        })
    }

    pub fn config(&self) -> &FlowMapConfig {
        &self.cfg
    }

    pub fn scales(&self) -> &FlowScales {
        &self.scales
    }

    pub fn status(&self) -> &LoadStatus {
        self.tracker.status()
    }

    /// Deliver the result of fetching the flow table. Rows are normalized immediately.
    pub fn on_table(&mut self, table: VizResult<Table>) {
        match table {
            Ok(table) if self.tracker.status().is_loading() => {
                self.dataset = Some(normalize_flows(&table, &self.cfg));
                self.tracker.resolve(SourceKind::Table);
                self.on_resolved();
            }
            Ok(_) => tracing::debug!("late flow table ignored"),
            Err(e) => self.tracker.fail(SourceKind::Table, e.to_string()),
        }
    }

    /// Deliver the result of fetching the boundary set.
    pub fn on_geometry(&mut self, boundaries: VizResult<BoundarySet>) {
        match boundaries {
            Ok(b) if self.tracker.status().is_loading() => {
                self.boundaries = Some(b);
                self.tracker.resolve(SourceKind::Geometry);
                self.on_resolved();
            }
            Ok(_) => tracing::debug!("late boundary set ignored"),
            Err(e) => self.tracker.fail(SourceKind::Geometry, e.to_string()),
        }
    }

    fn on_resolved(&mut self) {
        if !self.tracker.status().is_ready() || self.view.is_some() {
            return;
        }
        let range = self
            .dataset
            .as_ref()
            .and_then(FlowDataset::year_range)
            .unwrap_or((self.cfg.min_year, self.cfg.min_year));
        self.view = Some(ViewState::new(range));
        self.generation += 1;
        tracing::debug!(
            records = self.dataset.as_ref().map_or(0, FlowDataset::len),
            boundaries = self.boundaries.as_ref().map_or(0, BoundarySet::len),
            ?range,
            "flow map ready"
        );
    }

    pub fn view_state(&self) -> Option<&ViewState> {
        self.view.as_ref()
    }

    pub fn dataset(&self) -> Option<&FlowDataset> {
        self.dataset.as_ref()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Start or stop playback. Stays paused until the data is ready.
    pub fn toggle_play(&mut self, now: TimeMs) -> PlaybackState {
        match &mut self.view {
            Some(view) => self.playback.toggle(view, &mut self.timers, now),
            None => PlaybackState::Paused,
        }
    }

    /// Jump to `year` (clamped into the data's range). Playback keeps running if it was.
    pub fn select_year(&mut self, year: i32) -> Option<i32> {
        self.view.as_mut().map(|v| v.select_year(year))
    }

    /// Sum of all flows of the selected year, ignoring the drawing threshold and cut.
    pub fn year_total(&self) -> Option<f64> {
        let year = self.view.as_ref()?.selected_year;
        Some(self.dataset.as_ref()?.year_total(year))
    }

    /// Records drawn for the selected year.
    pub fn frame_set(&self) -> Vec<&FlowRecord> {
        match (&self.dataset, &self.view) {
            (Some(d), Some(v)) => d.frame_set(v.selected_year, self.cfg.min_value, self.cfg.top_n),
            _ => Vec::new(),
        }
    }

    /// Earliest instant at which [`advance`](Self::advance) has work to do: the load
    /// deadline while loading, otherwise the next playback tick.
    pub fn next_wakeup(&self) -> Option<TimeMs> {
        match (self.tracker.deadline(), self.timers.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Process the load deadline and due playback ticks. Returns `true` if the selected year
    /// changed.
    pub fn advance(&mut self, now: TimeMs) -> bool {
        self.tracker.poll(now);
        let mut changed = false;
        for fired in self.timers.advance(now) {
            if let Some(view) = &mut self.view {
                changed |= self.playback.on_timer(fired.id, view);
            }
        }
        if changed {
            self.sync_layers();
        }
        changed
    }

    pub fn hovered(&self) -> Option<&ShapeKey> {
        self.hover.hovered()
    }

    pub fn stage_stats(&self) -> StageStats {
        self.stage.stats()
    }

    pub fn is_animating(&self, now: TimeMs) -> bool {
        self.hover.is_animating(now)
    }

    pub fn pointer_move(&mut self, now: TimeMs, pos: Point) -> Option<&ShapeKey> {
        if !self.sync_layers() {
            return None;
        }
        self.pointer = Some(pos);
        let hit = self
            .stage
            .dynamic_layer()
            .and_then(|layer| hit_test(layer, pos, 0.0));
        self.hover.update(now, hit);
        self.hover.hovered()
    }

    pub fn pointer_leave(&mut self, now: TimeMs) {
        self.pointer = None;
        self.hover.leave(now);
    }

    // Builds static content once and the arc layer whenever the frame key moves.
    // Returns `false` while not ready.
    fn sync_layers(&mut self) -> bool {
        let (Some(dataset), Some(boundaries), Some(view)) =
            (&self.dataset, &self.boundaries, &self.view)
        else {
            return false;
        };
        let (cfg, scales) = (&self.cfg, &self.scales);

        self.stage.ensure_static(|| {
            let FlowStatic { layer, defs } = flow_map_static_layer(boundaries, scales, cfg);
            StaticContent {
                layers: vec![layer],
                defs,
            }
        });

        let year = view.selected_year;
        let rebuilt = self.stage.sync_dynamic((self.generation, year), || {
            let frame = dataset.frame_set(year, cfg.min_value, cfg.top_n);
            flow_map_dynamic_layer(&frame, boundaries, scales, cfg)
        });
        if rebuilt
            && let Some(layer) = self.stage.dynamic_layer()
            && self.hover.retain(|k| layer.find(k).is_some())
        {
            tracing::debug!(year, "hovered arc left the frame");
        }
        true
    }

    /// The map as it appears at `now`. Empty until both sources have loaded.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn frame(&mut self, now: TimeMs) -> Scene {
        if !self.sync_layers() {
            return Scene::new(self.cfg.canvas);
        }
        let mut scene = self.stage.compose();
        let cfg = &self.cfg;

        for shape in scene.layers.iter_mut().flat_map(|l| l.shapes.iter_mut()) {
            let Some(key @ ShapeKey::Arc(_)) = &shape.key else {
                continue;
            };
            let e = self.hover.emphasis(key, now);
            if e > 0.0 {
                shape.style.stroke = Some(cfg.arc_color.mix(cfg.hover_color, e));
                shape.style.stroke_opacity = lerp(cfg.arc_opacity, cfg.hover_opacity, e);
                shape.style.stroke_width += cfg.hover_extra_width * e;
            }
        }

        if let (Some(ShapeKey::Arc(code)), Some(cursor)) = (self.hover.hovered(), self.pointer)
            && let Some(record) = self.frame_set().into_iter().find(|r| &r.dest_code == code)
        {
            let content = flow_map_content(record, cfg);
            let style = TooltipStyle::flow_map();
            let size = box_size(&content, &style, &self.measurer);
            let [ox, oy] = cfg.tooltip_offset;
            let origin = cursor_origin(cursor, Vec2::new(ox, oy), size, cfg.canvas);
            scene
                .layers
                .push(tooltip_layer(&content, origin, size, &style, 1.0));
        }
        scene
    }

    /// Tear down: stop playback and cancel every timer this instance scheduled.
    pub fn unmount(mut self) {
        self.release();
        tracing::debug!("flow map unmounted");
    }

    fn release(&mut self) {
        if let Some(view) = &mut self.view {
            self.playback.pause(view);
        }
        self.timers.clear();
        self.stage.clear();
        self.hover.clear();
        self.pointer = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/flow_map.rs"]
mod tests;
