use std::collections::HashMap;

use serde::Deserialize;

use crate::foundation::error::VizResult;

/// A closed ring of `[longitude, latitude]` positions in degrees.
pub type Ring = Vec<[f64; 2]>;

/// Exterior ring followed by zero or more holes.
pub type Polygon = Vec<Ring>;

/// Polygon or multipolygon boundary geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    pub polygons: Vec<Polygon>,
}

impl Geometry {
    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.iter().all(|r| r.is_empty()))
    }
}

/// A named country boundary, keyed by its 3-letter code.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryFeature {
    pub id: String,
    pub name: Option<String>,
    pub geometry: Geometry,
}

/// Boundary features with lookup by code.
///
/// Features are kept in source order; lookup returns the first feature carrying a code.
#[derive(Clone, Debug, Default)]
pub struct BoundarySet {
    features: Vec<BoundaryFeature>,
    by_id: HashMap<String, usize>,
}

impl BoundarySet {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        let mut by_id = HashMap::with_capacity(features.len());
        for (i, f) in features.iter().enumerate() {
            by_id.entry(f.id.clone()).or_insert(i);
        }
        Self { features, by_id }
    }

    /// Parse a GeoJSON `FeatureCollection`.
    ///
    /// Features without an id or with a non-areal geometry are skipped.
    #[tracing::instrument(skip(s), fields(bytes = s.len()))]
    pub fn from_geojson_str(s: &str) -> VizResult<Self> {
        let fc: FeatureCollectionDef = serde_json::from_str(s)?;
        let total = fc.features.len();

        let features = fc
            .features
            .into_iter()
            .filter_map(FeatureDef::into_boundary)
            .collect::<Vec<_>>();

        if features.len() < total {
            tracing::debug!(
                skipped = total - features.len(),
                "boundary features without id or polygon geometry"
            );
        }
        Ok(Self::new(features))
    }

    pub fn get(&self, id: &str) -> Option<&BoundaryFeature> {
        self.by_id.get(id).map(|&i| &self.features[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

#[derive(Deserialize)]
struct FeatureCollectionDef {
    #[serde(default)]
    features: Vec<FeatureDef>,
}

#[derive(Deserialize)]
struct FeatureDef {
    #[serde(default)]
    id: Option<IdDef>,
    #[serde(default)]
    properties: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    geometry: Option<GeometryDef>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdDef {
    Str(String),
    Num(serde_json::Number),
}

#[derive(Deserialize)]
#[serde(tag = "type")]
enum GeometryDef {
    Polygon { coordinates: Vec<Vec<Vec<f64>>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Vec<f64>>>> },
    #[serde(other)]
    Unsupported,
}

impl FeatureDef {
    fn into_boundary(self) -> Option<BoundaryFeature> {
        let props = self.properties.unwrap_or_default();
        let id = match self.id {
            Some(IdDef::Str(s)) => s,
            Some(IdDef::Num(n)) => n.to_string(),
            None => props.get("id").and_then(|v| v.as_str())?.to_owned(),
        };
        let name = props
            .get("name")
            .and_then(|v| v.as_str())
            .map(str::to_owned);

        let polygons = match self.geometry? {
            GeometryDef::Polygon { coordinates } => vec![to_polygon(coordinates)],
            GeometryDef::MultiPolygon { coordinates } => {
                coordinates.into_iter().map(to_polygon).collect()
            }
            GeometryDef::Unsupported => return None,
        };

        Some(BoundaryFeature {
            id,
            name,
            geometry: Geometry { polygons },
        })
    }
}

fn to_polygon(rings: Vec<Vec<Vec<f64>>>) -> Polygon {
    rings
        .into_iter()
        .map(|ring| {
            ring.into_iter()
                .filter_map(|pos| match pos.as_slice() {
                    [lon, lat, ..] if lon.is_finite() && lat.is_finite() => Some([*lon, *lat]),
                    _ => None,
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/data/geo.rs"]
mod tests;
