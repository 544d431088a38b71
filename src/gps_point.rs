use chrono::{DateTime, Utc};

/// Accessors for anything that sits at a geographic position. The geometry
/// functions and the point filters only rely on this contract, so they work
/// for any point-like type, not just [`GpsPoint`].
pub trait Locatable {
    fn latitude(&self) -> f64;
    fn longitude(&self) -> f64;
    /// Altitude in meters, when the device reported one.
    fn altitude(&self) -> Option<f64>;
}

/// Accessor for anything carrying a UTC sample time.
pub trait Timestamped {
    fn timestamp(&self) -> DateTime<Utc>;
}

/// A single positional sample for a tracked subject. Values are constructed
/// once from a raw measurement and never mutated; pipeline stages produce
/// new sequences instead.
#[derive(Clone, Debug, PartialEq)]
pub struct GpsPoint {
    pub unit_id: String,
    pub collector_id: String,
    pub timestamp: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    /// Meters per second.
    pub speed: f64,
    /// Degrees.
    pub heading: f64,
    /// Meters. Stays absent all the way to formatting when the device did
    /// not report one.
    pub accuracy: Option<f64>,
}

impl GpsPoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }

    /// `[latitude, longitude, altitude]`, missing altitude as 0.
    pub fn as_3d_vector(&self) -> [f64; 3] {
        [self.latitude, self.longitude, self.altitude.unwrap_or(0.0)]
    }
}

impl Locatable for GpsPoint {
    fn latitude(&self) -> f64 {
        self.latitude
    }

    fn longitude(&self) -> f64 {
        self.longitude
    }

    fn altitude(&self) -> Option<f64> {
        self.altitude
    }
}

impl Timestamped for GpsPoint {
    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
