//! Pure geometry over latitude/longitude pairs. Real-world distances use the
//! haversine formula; everything else treats (latitude, longitude) as a
//! pseudo-Euclidean plane and is only meaningful for relative comparisons.

use crate::gps_point::Locatable;

/// Tolerance used by every "same value" test on coordinates, to absorb
/// floating point representation noise.
const DELTA: f64 = 1e-4;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub fn tolerant_eq(d1: f64, d2: f64) -> bool {
    (d1 - d2).abs() < DELTA
}

pub fn tolerant_point_eq<P: Locatable>(p1: &P, p2: &P) -> bool {
    tolerant_eq(p1.latitude(), p2.latitude()) && tolerant_eq(p1.longitude(), p2.longitude())
}

/// Great-circle distance in meters, taking the altitude difference into
/// account when both points carry one.
pub fn haversine_distance_meters<P: Locatable>(p1: &P, p2: &P) -> f64 {
    let lat_distance = (p2.latitude() - p1.latitude()).to_radians();
    let lon_distance = (p2.longitude() - p1.longitude()).to_radians();
    let a = (lat_distance / 2.0).sin().powi(2)
        + p1.latitude().to_radians().cos()
            * p2.latitude().to_radians().cos()
            * (lon_distance / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    let distance = EARTH_RADIUS_KM * c * 1000.0;

    match (p1.altitude(), p2.altitude()) {
        (Some(el1), Some(el2)) => {
            let height = el1 - el2;
            (distance.powi(2) + height.powi(2)).sqrt()
        }
        _ => distance,
    }
}

/// Lat/lng-space distance. Not a real-world distance and cannot reliably be
/// converted into one; only useful to compare spacings against each other.
pub fn planar_distance<P: Locatable>(p1: &P, p2: &P) -> f64 {
    let lat_diff = p1.latitude() - p2.latitude();
    let lon_diff = p1.longitude() - p2.longitude();
    (lat_diff.powi(2) + lon_diff.powi(2)).sqrt()
}

/// Perpendicular lat/lng-space distance from `point` to the infinite line
/// through `line_start` and `line_end`, via twice the triangle area divided
/// by the base length.
///
/// When the two line endpoints coincide (within [`tolerant_eq`] on each
/// axis) the base length is zero and the division is undefined; this returns
/// 0 instead, so a degenerate segment never contributes deviation.
pub fn orthogonal_distance<P: Locatable>(point: &P, line_start: &P, line_end: &P) -> f64 {
    if tolerant_point_eq(line_start, line_end) {
        return 0.0;
    }

    let area = ((line_start.latitude() * line_end.longitude()
        + line_end.latitude() * point.longitude()
        + point.latitude() * line_start.longitude()
        - line_end.latitude() * line_start.longitude()
        - point.latitude() * line_end.longitude()
        - line_start.latitude() * point.longitude())
        * 0.5)
        .abs();

    let bottom = ((line_start.latitude() - line_end.latitude()).powi(2)
        + (line_start.longitude() - line_end.longitude()).powi(2))
    .sqrt();

    (area / bottom) * 2.0
}

/// Whether `point` is "above" the line through the two given points, above
/// meaning more to the North and/or West. The statement is arbitrary and
/// only has value for comparisons.
pub fn is_point_above_line<P: Locatable>(point: &P, first_of_line: &P, second_of_line: &P) -> bool {
    let (left, right) = if first_of_line.longitude() < second_of_line.longitude() {
        (first_of_line, second_of_line)
    } else if first_of_line.longitude() > second_of_line.longitude() {
        (second_of_line, first_of_line)
    } else if first_of_line.latitude() < second_of_line.latitude() {
        (first_of_line, second_of_line)
    } else {
        (second_of_line, first_of_line)
    };

    let slope = (right.latitude() - left.latitude()) / (right.longitude() - left.longitude());
    let lon_dist = point.longitude() - left.longitude();
    let lat_dist = point.latitude() - left.latitude();
    lat_dist > lon_dist * slope
}

/// Whether `point` and `comparison` sit on the same side of the line through
/// the two given points.
pub fn points_on_same_side_of_line<P: Locatable>(
    point: &P,
    comparison: &P,
    first_of_line: &P,
    second_of_line: &P,
) -> bool {
    is_point_above_line(point, first_of_line, second_of_line)
        == is_point_above_line(comparison, first_of_line, second_of_line)
}

pub fn points_on_same_latitude<P: Locatable>(p1: &P, p2: &P) -> bool {
    tolerant_eq(p1.latitude(), p2.latitude())
}

/// Whether the segment between the two locations crosses the horizontal
/// line at `reference_latitude`. True when one endpoint sits exactly on the
/// line, or when the endpoints sit on opposite sides of it.
pub fn ray_casting_test_for_segment<P: Locatable>(
    first: &P,
    second: &P,
    reference_latitude: f64,
) -> bool {
    if tolerant_eq(first.latitude(), reference_latitude)
        || tolerant_eq(second.latitude(), reference_latitude)
    {
        return true;
    }
    if first.latitude() > reference_latitude && second.latitude() < reference_latitude {
        return true;
    }
    first.latitude() < reference_latitude && second.latitude() > reference_latitude
}

/// Longitude at which the segment crosses the horizontal line at
/// `reference_latitude`, or `None` when it does not cross. Only meaningful
/// when [`ray_casting_test_for_segment`] holds for the same arguments.
pub fn find_crossing_longitude<P: Locatable>(
    first: &P,
    second: &P,
    reference_latitude: f64,
) -> Option<f64> {
    if !ray_casting_test_for_segment(first, second, reference_latitude) {
        return None;
    }
    if tolerant_eq(first.latitude(), second.latitude()) {
        return Some(first.longitude());
    }

    let lat_diff = first.latitude() - second.latitude();
    let lon_diff = first.longitude() - second.longitude();
    let lat_offset = first.latitude() - reference_latitude;
    let offset = lat_offset / lat_diff;

    Some(first.longitude() - lon_diff * offset)
}

/// Whether the segment crosses the horizontal semi-line extending East from
/// `point`. When a vertex of the segment sits at the point's latitude, true
/// is only returned when the other vertex is below it.
pub fn uni_directional_ray_casting_test_for_segment<P: Locatable>(
    first: &P,
    second: &P,
    point: &P,
) -> bool {
    // the unlucky case of the 3 points aligned horizontally
    if points_on_same_latitude(first, point) || points_on_same_latitude(second, point) {
        return first.latitude() < point.latitude() || second.latitude() < point.latitude();
    }

    match find_crossing_longitude(first, second, point.latitude()) {
        None => false,
        Some(crossing) => {
            crossing > point.longitude() || tolerant_eq(crossing, point.longitude())
        }
    }
}
