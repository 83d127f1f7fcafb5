//! File discovery value objects.

mod file_type;
mod remote_file;

pub use file_type::{FileType, UnknownFileType};
pub use remote_file::RemoteFile;
