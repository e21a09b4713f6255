pub mod config;
pub mod error;
pub mod event;
pub mod fetcher;
pub mod http;
pub mod package;
pub mod registry;
pub mod util;

pub use error::{PkgError, Result};
pub use package::{Package, PackageKind};
pub use config::{Config, ConfigKey, ConfigLoader};
pub use registry::{RemoteRepository, RepositoryCursor, RepositoryRegistry, LoadReport};
pub use fetcher::{Downloader, Fetcher};
pub use event::{EventDispatcher, EventListener, LogListener, PkgEvent};
pub use util::trim_spaces;
