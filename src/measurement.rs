use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::gps_point::GpsPoint;

/// One raw location record as delivered by the measurement store. Only the
/// identity fields and the timestamp are guaranteed; everything else depends
/// on what the collecting device reported.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    pub unit_id: String,
    pub device_id: String,
    /// UTC epoch milliseconds. Also the ordering/uniqueness key.
    pub timestamp_ms: i64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub accuracy_in_meters: Option<f64>,
    #[serde(default)]
    pub heading: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
}

impl RawMeasurement {
    /// Missing latitude/longitude/speed/heading become 0, while altitude and
    /// accuracy stay absent so formatting can tell "not reported" apart from
    /// a real value. A timestamp outside the representable range is a bad
    /// record that must be rejected before it gets here.
    pub fn into_gps_point(self) -> GpsPoint {
        GpsPoint {
            unit_id: self.unit_id,
            collector_id: self.device_id,
            timestamp: DateTime::from_timestamp_millis(self.timestamp_ms).unwrap(),
            latitude: self.latitude.unwrap_or(0.0),
            longitude: self.longitude.unwrap_or(0.0),
            altitude: self.altitude,
            speed: self.speed.unwrap_or(0.0),
            heading: self.heading.unwrap_or(0.0),
            accuracy: self.accuracy_in_meters,
        }
    }
}
