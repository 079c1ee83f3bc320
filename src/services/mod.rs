pub mod archive_resolver;
pub mod name_parser;
pub mod report_writer;
pub mod workspace_builder;

pub use archive_resolver::ArchiveResolver;
pub use name_parser::{parse_dir_name, NameParser, TrailingText};
pub use report_writer::ReportWriter;
pub use workspace_builder::{Workspace, WorkspaceBuilder};
