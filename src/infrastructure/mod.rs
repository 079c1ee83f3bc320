pub mod extractor;
pub mod fs_ops;

pub use extractor::{Extractor, SevenZip};
pub use fs_ops::{find_free_name, list_subdirectories, move_all_entries};
