//! Client side of the cardiovascular risk prediction form.
//!
//! [`SubmissionHandler::submit`] takes a submit event and the form's field
//! values, posts them to `/predecir` and writes either the formatted
//! prediction or an error message into the shared [`ResultRegion`].

pub mod config;
pub mod endpoint;
pub mod error;
pub mod form;
pub mod handler;
pub mod models;
pub mod region;
pub mod render;

pub use config::ClientConfig;
pub use endpoint::{HttpEndpoint, PredictionEndpoint};
pub use error::{ConfigError, ErrorKind, FormError, SubmissionError};
pub use form::{FieldValue, FormInput, PATIENT_FIELDS};
pub use handler::{SubmissionHandler, SubmissionOutcome, SubmitEvent};
pub use models::PredictionResponse;
pub use region::{OverlapPolicy, RegionState, ResultRegion};
