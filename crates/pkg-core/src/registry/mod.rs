//! Registry of configured remote repositories.
//!
//! Repositories are read from a line-oriented file (by default
//! `/etc/pkg/repositories`) with one `name=url` pair per line:
//!
//! ```text
//! # official packages
//! main = https://pkg.example.com/main
//! ; mirrors
//! mirror=https://mirror.example.org/pkg
//! ```
//!
//! Blank lines and lines starting with `#` or `;` are ignored. A line
//! holding only whitespace counts as blank, so it is skipped without a
//! warning. Malformed lines are reported and skipped without failing the
//! whole load.

mod parser;
mod registry;

pub use parser::{parse_line, LineError};
pub use registry::{
    LoadReport, RejectedLine, RemoteRepository, RepositoryCursor, RepositoryRegistry,
    DEFAULT_REPOSITORIES_PATH,
};
