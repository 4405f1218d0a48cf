pub mod client;
pub mod envelope;
pub mod request;

pub use client::{ClientConfig, HttpTransport, Transport};
pub use envelope::{Activity, ActivityDetails, ActivityHistory};
pub use request::{DEFAULT_BASE_URL, DEFAULT_MODE_FILTER, activity_history_url};
