#[macro_use]
extern crate log;

pub mod export;
pub mod geometry;
pub mod gps_point;
pub mod jump_filter;
pub mod measurement;
pub mod path_simplifier;
pub mod track;
pub mod track_builder;
