//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**
//!   - `remote/`: HTTP directory listing and file download
//!   - `table/`: CSV table emission
//!   - `events/`: Pipeline event logging

pub mod events;
pub mod remote;
pub mod table;

pub use events::TracingEventSink;
pub use remote::HttpRemoteSource;
pub use table::CsvTableEmitter;
