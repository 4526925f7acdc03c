use std::io::Write;

use serde::Serialize;

use super::assessment::TrafficAssessment;
use crate::{Error, NodeId, Score};

const HEADER: [&str; 8] = [
    "rank",
    "id",
    "lon",
    "lat",
    "class",
    "signal",
    "max_road_class",
    "score",
];

#[derive(Serialize)]
struct HotspotRow {
    rank: usize,
    id: NodeId,
    lon: f64,
    lat: f64,
    class: &'static str,
    signal: &'static str,
    max_road_class: &'static str,
    score: Score,
}

impl TrafficAssessment {
    /// Writes the ranked hot-spots as CSV with a header row
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `writer` fails
    pub fn write_hotspots_csv<W: Write>(&self, writer: W) -> Result<(), Error> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        csv_writer.write_record(HEADER)?;

        for hotspot in &self.hotspots {
            csv_writer.serialize(HotspotRow {
                rank: hotspot.rank,
                id: hotspot.id,
                lon: hotspot.coordinate[0],
                lat: hotspot.coordinate[1],
                class: hotspot.class.label(),
                signal: hotspot.signal.label(),
                max_road_class: hotspot.max_road_class.map_or("", |road| road.label()),
                score: hotspot.score,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_matches_row_fields() {
        let mut out = Vec::new();
        let mut writer = csv::Writer::from_writer(&mut out);
        writer
            .serialize(HotspotRow {
                rank: 1,
                id: 7,
                lon: -76.5,
                lat: 3.4,
                class: "T-junction",
                signal: "Observed",
                max_road_class: "Primary",
                score: 0.5,
            })
            .unwrap();
        writer.flush().unwrap();
        drop(writer);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().next(), Some(HEADER.join(",").as_str()));
    }
}
