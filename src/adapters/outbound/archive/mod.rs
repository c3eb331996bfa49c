/// Archive adapter - zips license files into a [`crate::ports::outbound::FileStorage`]
mod file_archiver;

pub use file_archiver::{FileArchiver, ARCHIVE_FILE_NAME};
