use chrono::DateTime;
use geotrack_core::gps_point::GpsPoint;
use geotrack_core::measurement::RawMeasurement;

pub fn point(latitude: f64, longitude: f64, timestamp_ms: i64) -> GpsPoint {
    GpsPoint {
        unit_id: "unit-1".to_owned(),
        collector_id: "device-1".to_owned(),
        timestamp: DateTime::from_timestamp_millis(timestamp_ms).unwrap(),
        latitude,
        longitude,
        altitude: None,
        speed: 0.0,
        heading: 0.0,
        accuracy: None,
    }
}

#[allow(dead_code)]
pub fn measurement(
    device_id: &str,
    latitude: f64,
    longitude: f64,
    timestamp_ms: i64,
) -> RawMeasurement {
    RawMeasurement {
        unit_id: "unit-1".to_owned(),
        device_id: device_id.to_owned(),
        timestamp_ms,
        latitude: Some(latitude),
        longitude: Some(longitude),
        altitude: None,
        accuracy_in_meters: None,
        heading: None,
        speed: None,
    }
}

#[allow(dead_code)]
pub fn lat_lon_of(points: &[GpsPoint]) -> Vec<(f64, f64)> {
    points
        .iter()
        .map(|point| (point.latitude, point.longitude))
        .collect()
}
