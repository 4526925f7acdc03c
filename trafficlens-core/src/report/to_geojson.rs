use geo::Point;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoJsonValue};
use serde_json::json;

use super::assessment::{IntersectionAssessment, TrafficAssessment};
use crate::Error;
use crate::model::IntersectionClass;

/// Marker colour and radius by complexity
fn marker_style(class: IntersectionClass) -> (&'static str, u8) {
    match class {
        IntersectionClass::ComplexJunction | IntersectionClass::CrossJunction => ("red", 4),
        IntersectionClass::TJunction => ("orange", 2),
        IntersectionClass::PassThrough | IntersectionClass::DeadEnd => ("blue", 1),
    }
}

impl TrafficAssessment {
    /// Intersection markers as a `GeoJSON` `FeatureCollection`, one point per
    /// intersection. Hot-spots carry their rank. The collection carries a
    /// `summary` member with the level, signal totals and network counts.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let features = self
            .intersections
            .iter()
            .map(|record| self.marker_feature(record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: Some(self.map_summary()),
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn map_summary(&self) -> JsonObject {
        let mut members = JsonObject::new();
        members.insert(
            "summary".to_string(),
            json!({
                "level": self.level.label(),
                "description": self.level.description(),
                "score": self.modulated_score,
                "time": self.time.context.to_string(),
                "period": self.time.period,
                "intersections": self.network.intersections,
                "segments": self.network.segments,
                "named_segments": self.network.named_segments,
                "total_length_km": self.network.total_length_km,
                "signals": self.signals.total_present(),
                "observed_signals": self.signals.observed,
                "hotspots": self.hotspots.len(),
            }),
        );
        members
    }

    fn marker_feature(&self, record: &IntersectionAssessment) -> Result<Feature, Error> {
        let point = Point::new(record.coordinate[0], record.coordinate[1]);
        let geometry = Geometry::new(GeoJsonValue::from(&point));
        let (color, radius) = marker_style(record.class);

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "id": record.id,
                "class": record.class,
                "degree": record.degree,
                "signal": record.signal,
                "max_road_class": record.max_road_class,
                "score": record.score,
                "color": color,
                "radius": radius,
                "hotspot_rank": self.hotspot_rank(record.id),
                "popup": format!("{}: {} connections", record.class, record.degree),
            }
        });

        serde_json::from_value::<Feature>(value).map_err(|e| Error::Serialization(e.to_string()))
    }
}
