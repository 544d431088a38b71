//! Assembles a [`GpsTrack`] from raw measurements: map each record to a
//! point (independently, so the fan-out can run in parallel), sort the
//! result by timestamp, then run the optional jump filter and path
//! simplifier. Everything downstream sees one deterministic ordering no
//! matter how the parallel mapping interleaved.

use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::export::{ExportError, OutputFormat};
use crate::gps_point::GpsPoint;
use crate::jump_filter;
use crate::measurement::RawMeasurement;
use crate::path_simplifier;
use crate::track::GpsTrack;

/// Caller-supplied processing toggles. Deserializing `{}` yields the same
/// values as [`FilterOptions::default`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    pub path_optimizer_enabled: bool,
    /// Divides the derived simplification tolerance; larger values keep
    /// more points. Must be greater than 0.
    pub optimization_coefficient: u32,
    pub gps_jump_filter_enabled: bool,
    /// Whether GeoJSON output carries one Point feature per track point in
    /// addition to the LineString.
    pub include_waypoints: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            path_optimizer_enabled: true,
            optimization_coefficient: 3,
            gps_jump_filter_enabled: true,
            include_waypoints: false,
        }
    }
}

/// Runs the full pipeline and renders the result in the requested format.
/// `output_format` is a caller token ("GEOJSON"/"GPX", any case); anything
/// else falls back to GeoJSON. Omitted options take the defaults.
pub fn convert(
    user_id: &str,
    measurements: Vec<RawMeasurement>,
    output_format: &str,
    options: Option<FilterOptions>,
) -> Result<String, ExportError> {
    let options = options.unwrap_or_default();
    let track = build_track(user_id, measurements, &options);
    OutputFormat::from_param(output_format).process(&track, &options)
}

pub fn build_track(
    user_id: &str,
    measurements: Vec<RawMeasurement>,
    options: &FilterOptions,
) -> GpsTrack {
    let mut points: Vec<GpsPoint> = measurements
        .into_par_iter()
        .map(RawMeasurement::into_gps_point)
        .collect();
    points.sort_by_key(|point| point.timestamp);

    // derived from the whole recorded set, before any filtering
    let tracking_device_ids: Vec<String> = points
        .iter()
        .map(|point| point.collector_id.clone())
        .unique()
        .collect();
    info!(
        "loaded {} recorded gps locations from {} tracking device(s) {:?} for user '{}'",
        points.len(),
        tracking_device_ids.len(),
        tracking_device_ids,
        user_id
    );

    let points = filter_gps_jumps(points, options.gps_jump_filter_enabled);
    let points = optimize_path(
        points,
        options.path_optimizer_enabled,
        options.optimization_coefficient,
    );
    GpsTrack::new(user_id.to_owned(), tracking_device_ids, points)
}

fn filter_gps_jumps(points: Vec<GpsPoint>, enabled: bool) -> Vec<GpsPoint> {
    if enabled {
        info!("gps jumps filtering enabled");
        jump_filter::filter_jumps(&points)
    } else {
        points
    }
}

fn optimize_path(points: Vec<GpsPoint>, enabled: bool, coefficient: u32) -> Vec<GpsPoint> {
    if enabled {
        info!("path optimization enabled");
        path_simplifier::simplify(&points, coefficient)
    } else {
        points
    }
}

/// Resolves the caller's query window. A missing or zero start means "the
/// last 10 days", counted from UTC midnight; a missing or zero end means
/// now. The window is for the measurement store query and does not affect
/// the pipeline itself.
pub fn resolve_time_range(
    start_ms: Option<i64>,
    end_ms: Option<i64>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = start_ms
        .filter(|&ms| ms != 0)
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(|| {
            let day = (Utc::now() - Duration::days(10)).date_naive();
            day.and_hms_opt(0, 0, 0).unwrap().and_utc()
        });
    let end = end_ms
        .filter(|&ms| ms != 0)
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or_else(Utc::now);
    trace!("resolved query window from '{start}' to '{end}'");
    (start, end)
}
