//! Rejection of GPS jump artifacts: a spurious spike to one direction
//! followed by a return jump near the original heading. For each interior
//! point of the timestamp-sorted sequence we consider the triangle formed
//! with its neighbors and drop the point when it is farther from each
//! neighbor than the neighbors are from each other.

use std::time::Instant;

use crate::geometry;
use crate::gps_point::{Locatable, Timestamped};

/// Sorts `points` ascending by timestamp and drops interior points that look
/// like jumps. The first and last points of the sorted sequence are always
/// retained; inputs of 3 points or fewer are returned (sorted) unchanged.
pub fn filter_jumps<P: Locatable + Timestamped + Clone>(points: &[P]) -> Vec<P> {
    let started = Instant::now();

    let mut sorted: Vec<P> = points.to_vec();
    sorted.sort_by_key(|point| point.timestamp());
    if sorted.len() <= 3 {
        return sorted;
    }

    let mut filtered = Vec::with_capacity(sorted.len());
    // first loc kept unconditionally
    filtered.push(sorted[0].clone());

    for i in 1..(sorted.len() - 1) {
        let precedent = &sorted[i - 1];
        let current = &sorted[i];
        let next = &sorted[i + 1];

        let precedent_to_current = geometry::haversine_distance_meters(precedent, current);
        let current_to_next = geometry::haversine_distance_meters(current, next);
        let precedent_to_next = geometry::haversine_distance_meters(precedent, next);
        if precedent_to_current < precedent_to_next && current_to_next < precedent_to_next {
            filtered.push(current.clone());
        }
    }

    // last loc kept unconditionally
    filtered.push(sorted[sorted.len() - 1].clone());

    warn!(
        "filtered {} locations as gps jumps in {} ms, now {} locations remaining for further process",
        sorted.len() - filtered.len(),
        started.elapsed().as_millis(),
        filtered.len()
    );
    filtered
}
