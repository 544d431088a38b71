pub mod test_utils;

use geotrack_core::jump_filter::filter_jumps;
use test_utils::{lat_lon_of, point};

#[test]
fn empty_input_stays_empty() {
    let points: Vec<geotrack_core::gps_point::GpsPoint> = vec![];
    assert_eq!(filter_jumps(&points), points);
}

#[test]
fn three_points_or_fewer_pass_through() {
    // even an obvious out-and-back spike is kept when there are not enough
    // neighbors to judge it
    let points = vec![
        point(0.0, 0.0, 0),
        point(0.0, 10.0, 1000),
        point(0.0, 0.001, 2000),
    ];
    assert_eq!(filter_jumps(&points), points);
}

#[test]
fn small_inputs_are_still_sorted() {
    let points = vec![
        point(0.0, 2.0, 2000),
        point(0.0, 0.0, 0),
        point(0.0, 1.0, 1000),
    ];
    let filtered = filter_jumps(&points);
    assert_eq!(
        lat_lon_of(&filtered),
        vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]
    );
}

#[test]
fn out_and_back_spike_is_dropped() {
    let points = vec![
        point(0.0, 0.0, 0),
        point(0.0, 10.0, 1000), // the spike
        point(0.0, 0.001, 2000),
        point(0.0, -5.0, 3000),
    ];
    let filtered = filter_jumps(&points);
    assert_eq!(
        lat_lon_of(&filtered),
        vec![(0.0, 0.0), (0.0, 0.001), (0.0, -5.0)]
    );
}

#[test]
fn steady_path_is_untouched() {
    let points = vec![
        point(0.0, 0.0, 0),
        point(0.0, 1.0, 1000),
        point(0.0, 2.0, 2000),
        point(0.0, 3.0, 3000),
        point(0.0, 4.0, 4000),
    ];
    assert_eq!(filter_jumps(&points), points);
}

#[test]
fn input_is_sorted_by_timestamp_before_filtering() {
    let points = vec![
        point(0.0, 3.0, 3000),
        point(0.0, 1.0, 1000),
        point(0.0, 0.0, 0),
        point(0.0, 2.0, 2000),
    ];
    let filtered = filter_jumps(&points);
    assert_eq!(
        lat_lon_of(&filtered),
        vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0), (0.0, 3.0)]
    );
}

#[test]
fn first_and_last_are_kept_even_when_they_look_like_jumps() {
    // endpoints are never evaluated against the triangle test
    let points = vec![
        point(0.0, 50.0, 0),
        point(0.0, 1.0, 1000),
        point(0.0, 2.0, 2000),
        point(0.0, 3.0, 3000),
        point(0.0, 60.0, 4000),
    ];
    let filtered = filter_jumps(&points);
    assert_eq!(filtered.first(), Some(&point(0.0, 50.0, 0)));
    assert_eq!(filtered.last(), Some(&point(0.0, 60.0, 4000)));
}
