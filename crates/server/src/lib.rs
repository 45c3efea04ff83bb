pub mod routes;
pub mod startup;
pub mod errors;
pub mod metrics;
pub mod openapi;

pub use routes::AppState;
pub use startup::run_with;
