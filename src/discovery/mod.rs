mod file_finder;

pub use file_finder::{is_nib_file, FileFinder};
