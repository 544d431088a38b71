use crate::geometry;
use crate::gps_point::GpsPoint;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// The cleaned, ordered track of one tracked subject, plus the aggregate
/// statistics the formatters annotate the output with. `points` is expected
/// to be sorted ascending by timestamp by the time it gets here.
#[derive(Clone, Debug, PartialEq)]
pub struct GpsTrack {
    pub tracked_user: String,
    /// Distinct collector ids, in order of first appearance.
    pub tracking_device_ids: Vec<String>,
    pub points: Vec<GpsPoint>,
}

impl GpsTrack {
    pub fn new(
        tracked_user: String,
        tracking_device_ids: Vec<String>,
        points: Vec<GpsPoint>,
    ) -> Self {
        GpsTrack {
            tracked_user,
            tracking_device_ids,
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn start_point(&self) -> Option<&GpsPoint> {
        self.points.iter().min_by_key(|point| point.timestamp)
    }

    pub fn end_point(&self) -> Option<&GpsPoint> {
        self.points.iter().max_by_key(|point| point.timestamp)
    }

    pub fn start_date_ms(&self) -> Option<i64> {
        self.points.iter().map(GpsPoint::timestamp_ms).min()
    }

    pub fn end_date_ms(&self) -> Option<i64> {
        self.points.iter().map(GpsPoint::timestamp_ms).max()
    }

    /// Start-to-end span rendered in the single largest applicable unit,
    /// flooring to whole units. An empty track has a zero duration.
    pub fn duration_label(&self) -> String {
        let seconds = match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => (end.timestamp - start.timestamp).num_seconds(),
            _ => 0,
        };

        if seconds < SECONDS_PER_MINUTE {
            format!("{seconds} seconds")
        } else if seconds < SECONDS_PER_HOUR {
            format!("{} minutes", seconds / SECONDS_PER_MINUTE)
        } else if seconds < SECONDS_PER_DAY {
            format!("{} hours", seconds / SECONDS_PER_HOUR)
        } else {
            format!("{} days", seconds / SECONDS_PER_DAY)
        }
    }

    pub fn average_speed(&self) -> Option<f64> {
        mean(self.points.iter().map(|point| point.speed))
    }

    pub fn average_heading(&self) -> Option<f64> {
        mean(self.points.iter().map(|point| point.heading))
    }

    /// Mean over the points that actually carry an accuracy; `None` when
    /// none of them do.
    pub fn average_accuracy(&self) -> Option<f64> {
        mean(self.points.iter().filter_map(|point| point.accuracy))
    }

    /// Sum of the great-circle distances between consecutive points, rounded
    /// up to a whole meter. 0 for tracks of fewer than 2 points.
    pub fn travelled_distance_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geometry::haversine_distance_meters(&pair[0], &pair[1]))
            .sum::<f64>()
            .ceil()
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0u32;
    for value in values {
        sum += value;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / f64::from(count))
    }
}

#[cfg(test)]
mod tests {
    use super::GpsTrack;
    use chrono::DateTime;

    use crate::gps_point::GpsPoint;

    fn point(timestamp_ms: i64, speed: f64, accuracy: Option<f64>) -> GpsPoint {
        GpsPoint {
            unit_id: "unit-1".to_owned(),
            collector_id: "device-1".to_owned(),
            timestamp: DateTime::from_timestamp_millis(timestamp_ms).unwrap(),
            latitude: 0.0,
            longitude: 0.0,
            altitude: None,
            speed,
            heading: 0.0,
            accuracy,
        }
    }

    fn track(points: Vec<GpsPoint>) -> GpsTrack {
        GpsTrack::new("user-1".to_owned(), vec!["device-1".to_owned()], points)
    }

    #[test]
    fn duration_buckets() {
        let check = |span_seconds: i64, expected: &str| {
            let track = track(vec![point(0, 0.0, None), point(span_seconds * 1000, 0.0, None)]);
            assert_eq!(track.duration_label(), expected);
        };
        check(0, "0 seconds");
        check(59, "59 seconds");
        check(90, "1 minutes");
        check(3599, "59 minutes");
        check(3600, "1 hours");
        check(86399, "23 hours");
        check(86400, "1 days");
        check(200_000, "2 days");
    }

    #[test]
    fn empty_track_has_zero_duration_and_no_averages() {
        let track = track(vec![]);
        assert_eq!(track.duration_label(), "0 seconds");
        assert_eq!(track.average_speed(), None);
        assert_eq!(track.average_heading(), None);
        assert_eq!(track.average_accuracy(), None);
        assert_eq!(track.start_point(), None);
        assert_eq!(track.travelled_distance_meters(), 0.0);
    }

    #[test]
    fn averages() {
        let track = track(vec![
            point(0, 1.0, Some(4.0)),
            point(1000, 2.0, None),
            point(2000, 6.0, Some(8.0)),
        ]);
        assert_eq!(track.average_speed(), Some(3.0));
        // only the points that reported an accuracy count
        assert_eq!(track.average_accuracy(), Some(6.0));
    }

    #[test]
    fn start_and_end_by_timestamp() {
        let track = track(vec![point(2000, 0.0, None), point(0, 0.0, None), point(1000, 0.0, None)]);
        assert_eq!(track.start_date_ms(), Some(0));
        assert_eq!(track.end_date_ms(), Some(2000));
        assert_eq!(track.start_point().unwrap().timestamp_ms(), 0);
        assert_eq!(track.end_point().unwrap().timestamp_ms(), 2000);
    }
}
