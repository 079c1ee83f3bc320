pub mod metadata_loader;

pub use metadata_loader::load_metadata;
