//! The two output encodings of a [`GpsTrack`]. Both annotate the geometry
//! with the track's aggregate statistics; only GPX requires the track to be
//! non-empty.

use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, SecondsFormat, Utc};
use geo_types::Point;
use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use gpx::{Gpx, GpxVersion, Metadata, Person, Track, TrackSegment, Waypoint};
use serde_json::json;
use strum_macros::{Display, EnumString};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::gps_point::GpsPoint;
use crate::track::GpsTrack;
use crate::track_builder::FilterOptions;

/// Substituted for the average accuracy when no point reported one.
pub const DEFAULT_ACCURACY_METERS: f64 = 10.0;

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("not enough points to process request")]
    InsufficientPoints,
    #[error(transparent)]
    Gpx(#[from] gpx::errors::GpxError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum OutputFormat {
    #[default]
    Geojson,
    Gpx,
}

impl OutputFormat {
    /// Parses a caller-supplied format token. An unrecognized token is not
    /// an error: it falls back to GeoJSON with a diagnostic warning.
    pub fn from_param(token: &str) -> Self {
        OutputFormat::from_str(token).unwrap_or_else(|_| {
            warn!("could not parse location output format '{token}', reverting to default value GEOJSON");
            OutputFormat::default()
        })
    }

    pub fn process(self, track: &GpsTrack, options: &FilterOptions) -> Result<String, ExportError> {
        match self {
            OutputFormat::Geojson => {
                let started = Instant::now();
                info!("start GEOJSON transformation...");
                let geojson = as_geojson_string(track, options.include_waypoints)?;
                info!(
                    "processed {} location points to GEOJSON format in {} ms",
                    track.len(),
                    started.elapsed().as_millis()
                );
                Ok(geojson)
            }
            OutputFormat::Gpx => {
                let started = Instant::now();
                info!("start GPX transformation...");
                let gpx = as_gpx_string(track)?;
                info!(
                    "processed {} location points to GPX format in {} ms",
                    track.len(),
                    started.elapsed().as_millis()
                );
                Ok(gpx)
            }
        }
    }
}

/// A FeatureCollection with one LineString feature carrying the aggregate
/// statistics as properties, plus (optionally) one Point feature per track
/// point. Always succeeds, even for an empty track.
pub fn as_geojson_string(track: &GpsTrack, include_waypoints: bool) -> Result<String, ExportError> {
    let mut features = vec![line_string_feature(track)];
    if include_waypoints {
        features.extend(track.points.iter().map(point_feature));
    }

    let collection = FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    Ok(serde_json::to_string(&collection)?)
}

fn line_string_feature(track: &GpsTrack) -> Feature {
    let coordinates = track
        .points
        .iter()
        .map(|point| vec![point.longitude, point.latitude, point.altitude.unwrap_or(0.0)])
        .collect();

    // an empty track still renders, with an all-zero start/end vector; a
    // lone point is its own start and end
    let default_vector = match track.points.as_slice() {
        [lone] => lone.as_3d_vector(),
        _ => [0.0, 0.0, 0.0],
    };

    let mut properties = JsonObject::new();
    properties.insert(
        "startPoint".to_owned(),
        json!(track
            .start_point()
            .map(GpsPoint::as_3d_vector)
            .unwrap_or(default_vector)),
    );
    properties.insert(
        "endPoint".to_owned(),
        json!(track
            .end_point()
            .map(GpsPoint::as_3d_vector)
            .unwrap_or(default_vector)),
    );
    properties.insert(
        "startDate".to_owned(),
        json!(human_date(track.start_date_ms().unwrap_or(0))),
    );
    properties.insert(
        "endDate".to_owned(),
        json!(human_date(track.end_date_ms().unwrap_or(0))),
    );
    properties.insert("pointCount".to_owned(), json!(track.len()));
    properties.insert("trackedUser".to_owned(), json!(track.tracked_user));
    properties.insert("trackedDevices".to_owned(), json!(track.tracking_device_ids));
    properties.insert(
        "averageSpeed".to_owned(),
        json!(track.average_speed().unwrap_or(0.0)),
    );
    properties.insert(
        "averageHeading".to_owned(),
        json!(track.average_heading().unwrap_or(0.0)),
    );
    properties.insert(
        "averageAccuracyInMeters".to_owned(),
        json!(track.average_accuracy().unwrap_or(DEFAULT_ACCURACY_METERS)),
    );
    properties.insert("duration".to_owned(), json!(track.duration_label()));
    properties.insert(
        "travelledDistanceInMeters".to_owned(),
        json!(track.travelled_distance_meters()),
    );

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(coordinates))),
        id: Some(Id::String(Uuid::new_v4().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn point_feature(point: &GpsPoint) -> Feature {
    let geometry = Geometry::new(Value::Point(vec![
        point.longitude,
        point.latitude,
        point.altitude.unwrap_or(0.0),
    ]));

    let mut properties = JsonObject::new();
    properties.insert("unitId".to_owned(), json!(point.unit_id));
    properties.insert("collectorId".to_owned(), json!(point.collector_id));
    properties.insert(
        "timestamp".to_owned(),
        json!(point.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    properties.insert("speed".to_owned(), json!(point.speed));
    properties.insert("heading".to_owned(), json!(point.heading));
    properties.insert("accuracy".to_owned(), json!(point.accuracy));

    Feature {
        bbox: None,
        geometry: Some(geometry),
        id: Some(Id::String(Uuid::new_v4().to_string())),
        properties: Some(properties),
        foreign_members: None,
    }
}

/// One GPX track with a single segment, the start and end points repeated as
/// top-level waypoints, and a metadata block describing the track. Fails
/// with [`ExportError::InsufficientPoints`] when the track has no points.
pub fn as_gpx_string(track: &GpsTrack) -> Result<String, ExportError> {
    let gpx = to_gpx(track)?;
    let mut buffer = Vec::new();
    gpx::write(&gpx, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn to_gpx(track: &GpsTrack) -> Result<Gpx, ExportError> {
    let start = track.start_point().ok_or(ExportError::InsufficientPoints)?;
    let end = track.end_point().ok_or(ExportError::InsufficientPoints)?;

    let segment = TrackSegment {
        points: track.points.iter().map(gpx_waypoint).collect(),
    };
    let gpx_track = Track {
        name: None,
        comment: None,
        description: None,
        source: None,
        links: vec![],
        type_: None,
        number: None,
        segments: vec![segment],
    };

    let description = format!(
        "\n startDate : {}\n endDate : {}\n trackSize : {}\n trackedDevices : [{}]\n averageSpeed : {}\n averageHeading : {}\n averageAccuracyInMeters : {}\n duration : {}\n travelledDistanceInMeters : {}",
        human_date(track.start_date_ms().unwrap_or(0)),
        human_date(track.end_date_ms().unwrap_or(0)),
        track.len(),
        track.tracking_device_ids.join(", "),
        track.average_speed().unwrap_or(0.0),
        track.average_heading().unwrap_or(0.0),
        track.average_accuracy().unwrap_or(DEFAULT_ACCURACY_METERS),
        track.duration_label(),
        track.travelled_distance_meters(),
    );

    let metadata = Metadata {
        name: Some(format!("GPX traces of {}", track.tracked_user)),
        description: Some(description),
        author: Some(Person {
            name: Some(track.tracked_user.clone()),
            email: None,
            link: None,
        }),
        time: gpx_time(Utc::now()),
        ..Default::default()
    };

    Ok(Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(track.tracked_user.clone()),
        metadata: Some(metadata),
        waypoints: vec![gpx_waypoint(start), gpx_waypoint(end)],
        tracks: vec![gpx_track],
        routes: vec![],
    })
}

fn gpx_waypoint(point: &GpsPoint) -> Waypoint {
    let mut waypoint = Waypoint::new(Point::new(point.longitude, point.latitude));
    waypoint.elevation = point.altitude;
    waypoint.speed = Some(point.speed);
    waypoint.source = Some(point.collector_id.clone());
    waypoint.time = gpx_time(point.timestamp);
    waypoint
}

fn gpx_time(timestamp: DateTime<Utc>) -> Option<gpx::Time> {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp.timestamp_millis()) * 1_000_000)
        .ok()
        .map(gpx::Time::from)
}

fn human_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .format("%a %b %d %H:%M:%S UTC %Y")
        .to_string()
}
