//! Domain entities

mod trip;

pub use trip::{Trip, TripDraft};
