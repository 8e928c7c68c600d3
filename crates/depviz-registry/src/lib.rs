mod mock_index;
mod registry_index;
mod source_types;

pub use mock_index::alpine_mock_index;
pub use registry_index::{load_local_repository, parse_line_index, RepositorySource};
pub use source_types::{LocalFileFormat, RepositoryMode};
