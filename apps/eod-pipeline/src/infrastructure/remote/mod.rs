//! Remote file server adapters.

mod anchors;
mod http_source;

pub use anchors::{file_name, listed_file_names};
pub use http_source::HttpRemoteSource;
