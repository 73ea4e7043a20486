// Resume analysis flow.
// Implements: upload/form validation, backend round-trips, and the score,
// keyword, feedback and job views the results page renders.
// All backend calls go through backend_client; no direct HTTP here.

pub mod handlers;
pub mod jobs;
pub mod validation;
pub mod views;
