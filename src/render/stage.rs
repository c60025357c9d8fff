use crate::foundation::core::Canvas;
use crate::scene::{Layer, MarkerDef, Scene};

/// Content that is built once per mount: base layers plus marker definitions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticContent {
    pub layers: Vec<Layer>,
    pub defs: Vec<MarkerDef>,
}

/// How often each builder has run since the stage was created or cleared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageStats {
    pub static_builds: u64,
    pub dynamic_builds: u64,
}

/// Retained output of one chart instance.
///
/// Builders are pure; the stage owns what they produced last. Static content is built the
/// first time it is requested and then kept. The dynamic layer is tagged with the key of the
/// state it was built from and is replaced wholesale (never appended to) when the key changes.
#[derive(Debug)]
pub struct Stage<K> {
    canvas: Canvas,
    static_content: Option<StaticContent>,
    dynamic: Option<(K, Layer)>,
    stats: StageStats,
}

impl<K: Clone + PartialEq + std::fmt::Debug> Stage<K> {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            static_content: None,
            dynamic: None,
            stats: StageStats::default(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn has_static(&self) -> bool {
        self.static_content.is_some()
    }

    /// Build static content unless it already exists.
    pub fn ensure_static(&mut self, build: impl FnOnce() -> StaticContent) {
        if self.static_content.is_none() {
            self.static_content = Some(build());
            self.stats.static_builds += 1;
            tracing::debug!("static content built");
        }
    }

    /// Rebuild the dynamic layer if `key` differs from the one it was built for.
    ///
    /// Returns `true` when the layer was rebuilt.
    pub fn sync_dynamic(&mut self, key: K, build: impl FnOnce() -> Layer) -> bool {
        if self.dynamic.as_ref().is_some_and(|(k, _)| *k == key) {
            return false;
        }
        self.redraw_dynamic(key, build);
        true
    }

    /// Unconditionally discard the dynamic layer and rebuild it.
    pub fn redraw_dynamic(&mut self, key: K, build: impl FnOnce() -> Layer) {
        self.dynamic = None;
        let layer = build();
        tracing::debug!(?key, shapes = layer.len(), "dynamic layer rebuilt");
        self.dynamic = Some((key, layer));
        self.stats.dynamic_builds += 1;
    }

    pub fn dynamic_key(&self) -> Option<&K> {
        self.dynamic.as_ref().map(|(k, _)| k)
    }

    pub fn dynamic_layer(&self) -> Option<&Layer> {
        self.dynamic.as_ref().map(|(_, l)| l)
    }

    /// Static layers first, then the dynamic layer.
    pub fn compose(&self) -> Scene {
        let mut scene = Scene::new(self.canvas);
        if let Some(s) = &self.static_content {
            scene.defs = s.defs.clone();
            scene.layers.extend(s.layers.iter().cloned());
        }
        if let Some((_, layer)) = &self.dynamic {
            scene.layers.push(layer.clone());
        }
        scene
    }

    pub fn stats(&self) -> StageStats {
        self.stats
    }

    /// Drop all retained output.
    pub fn clear(&mut self) {
        self.static_content = None;
        self.dynamic = None;
        self.stats = StageStats::default();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stage.rs"]
mod tests;
