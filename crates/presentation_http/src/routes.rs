//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    handlers,
    state::{DistanceState, TripState},
};

/// Router for the distance service
pub fn distance_router(state: DistanceState) -> Router {
    Router::new()
        .route("/", get(handlers::distance::root))
        .route("/distance/by-coords", post(handlers::distance::by_coords))
        .route("/distance/by-cep", post(handlers::distance::by_cep))
        .with_state(state)
}

/// Router for the trip service
pub fn trip_router(state: TripState) -> Router {
    Router::new()
        .route("/", get(handlers::trips::root))
        .route("/ceps/{cep}", get(handlers::cep::resolve))
        .route(
            "/trips",
            post(handlers::trips::create).get(handlers::trips::list),
        )
        .route(
            "/trips/{id}",
            get(handlers::trips::get)
                .put(handlers::trips::update)
                .delete(handlers::trips::delete),
        )
        .route("/trips/{id}/distance", get(handlers::trips::distance))
        .with_state(state)
}
