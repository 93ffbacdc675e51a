//! Machine-readable marker output.

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use eatout_transform::{MapMarker, MarkerMap};

/// Flat CSV record; the csv serializer writes `None` as an empty field.
#[derive(Serialize)]
struct MarkerRecord<'a> {
    restaurant_name: &'a str,
    address: &'a str,
    cuisine: &'a str,
    price_brl: Option<f64>,
    aggregate_rating: Option<f64>,
    rating_color: &'a str,
    latitude: f64,
    longitude: f64,
}

impl<'a> From<&'a MapMarker> for MarkerRecord<'a> {
    fn from(marker: &'a MapMarker) -> Self {
        Self {
            restaurant_name: &marker.restaurant_name,
            address: &marker.address,
            cuisine: &marker.cuisine,
            price_brl: marker.price_brl,
            aggregate_rating: marker.aggregate_rating,
            rating_color: &marker.rating_color,
            latitude: marker.latitude,
            longitude: marker.longitude,
        }
    }
}

/// Write markers as CSV with a header row.
pub fn write_markers_csv<W: Write>(map: &MarkerMap, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for marker in &map.markers {
        csv.serialize(MarkerRecord::from(marker))
            .context("write marker record")?;
    }
    csv.flush().context("flush marker csv")?;
    Ok(())
}

/// Write the marker map, center included, as pretty JSON.
pub fn write_markers_json<W: Write>(map: &MarkerMap, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, map).context("serialize markers")?;
    writeln!(writer).context("write markers")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map() -> MarkerMap {
        MarkerMap {
            center: Some((-22.98, -43.2)),
            markers: vec![MapMarker {
                restaurant_name: "Garota de Ipanema".to_string(),
                address: "Rua A, 1".to_string(),
                cuisine: "Brazilian".to_string(),
                price_brl: None,
                aggregate_rating: Some(4.6),
                rating_color: "darkgreen".to_string(),
                latitude: -22.98,
                longitude: -43.2,
            }],
        }
    }

    #[test]
    fn test_csv_quotes_and_blank_prices() {
        let mut out = Vec::new();
        write_markers_csv(&map(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "restaurant_name,address,cuisine,price_brl,aggregate_rating,rating_color,latitude,longitude"
            )
        );
        assert_eq!(
            lines.next(),
            Some("Garota de Ipanema,\"Rua A, 1\",Brazilian,,4.6,darkgreen,-22.98,-43.2")
        );
    }

    #[test]
    fn test_json_carries_center() {
        let mut out = Vec::new();
        write_markers_json(&map(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["center"][0], -22.98);
        assert_eq!(value["markers"][0]["price_brl"], serde_json::Value::Null);
    }
}
