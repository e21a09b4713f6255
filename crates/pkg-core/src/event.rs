//! Events emitted while fetching artifacts.
//!
//! The fetcher reports what it does through an [`EventDispatcher`]. By
//! default events are forwarded to the `log` facade by [`LogListener`];
//! front ends can register their own listeners to render progress.

use std::path::PathBuf;
use std::sync::Arc;

/// Something worth reporting happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PkgEvent {
    /// A filesystem operation failed
    Errno {
        op: &'static str,
        path: PathBuf,
        message: String,
    },
    /// The artifact of a package did not match its checksum
    FailedChecksum { package: String },
    /// A download is about to start
    FetchStarted { package: String, url: String },
    /// The artifact was found in the cache and verified
    AlreadyCached { package: String, path: PathBuf },
    /// The artifact was downloaded and verified
    FetchFinished { package: String, path: PathBuf },
}

/// Receiver of [`PkgEvent`]s.
pub trait EventListener: Send + Sync {
    fn handle(&self, event: &PkgEvent);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogListener;

impl EventListener for LogListener {
    fn handle(&self, event: &PkgEvent) {
        match event {
            PkgEvent::Errno { op, path, message } => {
                log::error!("{}({}): {}", op, path.display(), message)
            }
            PkgEvent::FailedChecksum { package } => {
                log::error!("{} failed checksum from repository", package)
            }
            PkgEvent::FetchStarted { package, url } => {
                log::info!("Fetching {} from {}", package, url)
            }
            PkgEvent::AlreadyCached { package, path } => {
                log::debug!("{} already cached at {}", package, path.display())
            }
            PkgEvent::FetchFinished { package, path } => {
                log::info!("Fetched {} to {}", package, path.display())
            }
        }
    }
}

/// Fans events out to every registered listener, in registration order.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    listeners: Vec<Arc<dyn EventListener>>,
}

impl EventDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher that logs every event.
    pub fn with_logging() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.add_listener(Arc::new(LogListener));
        dispatcher
    }

    pub fn add_listener(&mut self, listener: Arc<dyn EventListener>) {
        self.listeners.push(listener);
    }

    pub fn dispatch(&self, event: PkgEvent) {
        for listener in &self.listeners {
            listener.handle(&event);
        }
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<PkgEvent>>,
    }

    impl EventListener for Recorder {
        fn handle(&self, event: &PkgEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    #[test]
    fn test_dispatch_reaches_all_listeners() {
        let first = Arc::new(Recorder::default());
        let second = Arc::new(Recorder::default());

        let mut dispatcher = EventDispatcher::new();
        dispatcher.add_listener(first.clone());
        dispatcher.add_listener(second.clone());

        dispatcher.dispatch(PkgEvent::FailedChecksum { package: "foo-1.0".to_string() });

        assert_eq!(first.events.lock().unwrap().len(), 1);
        assert_eq!(
            second.events.lock().unwrap()[0],
            PkgEvent::FailedChecksum { package: "foo-1.0".to_string() }
        );
    }

    #[test]
    fn test_dispatch_without_listeners() {
        let dispatcher = EventDispatcher::new();
        dispatcher.dispatch(PkgEvent::FetchStarted {
            package: "foo-1.0".to_string(),
            url: "https://example.com/foo-1.0.txz".to_string(),
        });
    }
}
