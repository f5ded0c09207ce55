//! Adapter over the host capability object.
//!
//! Every host function is independently optional; a missing capability is
//! never fatal. Requests either delegate to the host (the result arrives
//! later through a [`HostCallback`]) or degrade: a warning plus a scheduled
//! fallback payload, or a transient user-facing message.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tracing::{error, warn};

use docview_common::types::FileCategory;

use crate::fallback;
use crate::ipc::HostCallback;
use crate::timers::FallbackTimers;

type ActionFn = Box<dyn Fn() + Send>;
type PathFn = Box<dyn Fn(&str) + Send>;
type CategoryFn = Box<dyn Fn(FileCategory) + Send>;

/// The host capability object: zero or more named functions the controller
/// may call. Construct with [`HostCapabilities::none`] for hostless
/// operation, or chain `with_*` setters for whatever the host implements.
#[derive(Default)]
pub struct HostCapabilities {
    request_files: Option<CategoryFn>,
    open_pdf: Option<PathFn>,
    open_file: Option<PathFn>,
    browse_path: Option<PathFn>,
    browse_folders: Option<ActionFn>,
    start_image_to_pdf: Option<ActionFn>,
    get_initial_data: Option<ActionFn>,
    /// Tool-specific actions keyed by the visible card title.
    actions: HashMap<String, ActionFn>,
}

impl HostCapabilities {
    /// A fully absent host — every request degrades to its fallback.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_request_files(mut self, f: impl Fn(FileCategory) + Send + 'static) -> Self {
        self.request_files = Some(Box::new(f));
        self
    }

    pub fn with_open_pdf(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.open_pdf = Some(Box::new(f));
        self
    }

    pub fn with_open_file(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.open_file = Some(Box::new(f));
        self
    }

    pub fn with_browse_path(mut self, f: impl Fn(&str) + Send + 'static) -> Self {
        self.browse_path = Some(Box::new(f));
        self
    }

    pub fn with_browse_folders(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.browse_folders = Some(Box::new(f));
        self
    }

    pub fn with_start_image_to_pdf(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.start_image_to_pdf = Some(Box::new(f));
        self
    }

    pub fn with_get_initial_data(mut self, f: impl Fn() + Send + 'static) -> Self {
        self.get_initial_data = Some(Box::new(f));
        self
    }

    pub fn with_action(mut self, title: impl Into<String>, f: impl Fn() + Send + 'static) -> Self {
        self.actions.insert(title.into(), Box::new(f));
        self
    }
}

/// How an outbound request resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The host capability was invoked; the result arrives via a callback.
    Delegated,
    /// Capability missing; a fallback payload was scheduled.
    FallbackScheduled { delay: Duration },
    /// Capability missing with no fallback; `message` goes to the user.
    Unavailable { message: String },
    /// Request aborted (missing required identifier); log only.
    Rejected,
}

/// Wraps the capability object plus the fallback timer queue.
pub struct BridgeAdapter {
    caps: HostCapabilities,
    timers: FallbackTimers,
    file_list_delay: Duration,
    initial_data_delay: Duration,
}

impl BridgeAdapter {
    pub fn new(
        caps: HostCapabilities,
        file_list_delay: Duration,
        initial_data_delay: Duration,
    ) -> Self {
        Self {
            caps,
            timers: FallbackTimers::new(),
            file_list_delay,
            initial_data_delay,
        }
    }

    /// Request the file list for a category. Without the capability, a
    /// deterministic placeholder list is scheduled after the simulated scan
    /// delay and arrives through the same callback path as real data.
    pub fn request_file_list(&mut self, category: FileCategory, now: Instant) -> RequestOutcome {
        if let Some(request_files) = &self.caps.request_files {
            request_files(category);
            return RequestOutcome::Delegated;
        }
        warn!(category = %category, "requestFiles capability missing, scheduling dummy data");
        self.timers.schedule(
            now,
            self.file_list_delay,
            HostCallback::FileList {
                files: fallback::dummy_files(category),
                category,
            },
        );
        RequestOutcome::FallbackScheduled {
            delay: self.file_list_delay,
        }
    }

    /// Request that the host open a file. An empty path aborts the request
    /// outright; a `pdf` effective type prefers the dedicated PDF opener.
    pub fn request_open_file(
        &self,
        path: &str,
        name: &str,
        kind: Option<&str>,
    ) -> RequestOutcome {
        if path.is_empty() {
            error!(name, "open request dropped: file path is missing");
            return RequestOutcome::Rejected;
        }
        let effective = match kind.filter(|k| !k.is_empty()) {
            Some(kind) => kind.to_lowercase(),
            None => name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
                .unwrap_or_default(),
        };
        if effective == "pdf" {
            if let Some(open_pdf) = &self.caps.open_pdf {
                open_pdf(path);
                return RequestOutcome::Delegated;
            }
        }
        if let Some(open_file) = &self.caps.open_file {
            open_file(path);
            return RequestOutcome::Delegated;
        }
        warn!(path, kind = %effective, "no capability to open file");
        RequestOutcome::Unavailable {
            message: format!("Native function needed to open this {effective} file."),
        }
    }

    /// Request that the host browse into a storage path.
    pub fn request_browse_path(&self, path: &str, name: &str) -> RequestOutcome {
        if let Some(browse_path) = &self.caps.browse_path {
            browse_path(path);
            return RequestOutcome::Delegated;
        }
        warn!(path, name, "browsePath capability missing");
        RequestOutcome::Unavailable {
            message: "Native function needed to browse storage.".into(),
        }
    }

    /// Request the initial dashboard data. Without the capability, default
    /// counts and storage volumes are scheduled after a short delay.
    pub fn request_initial_data(&mut self, now: Instant) -> RequestOutcome {
        if let Some(get_initial_data) = &self.caps.get_initial_data {
            get_initial_data();
            return RequestOutcome::Delegated;
        }
        warn!("getInitialData capability missing, scheduling dummy data");
        self.timers.schedule(
            now,
            self.initial_data_delay,
            HostCallback::FileCounts(fallback::dummy_counts()),
        );
        self.timers.schedule(
            now,
            self.initial_data_delay,
            HostCallback::StorageInfo(fallback::dummy_storage()),
        );
        RequestOutcome::FallbackScheduled {
            delay: self.initial_data_delay,
        }
    }

    /// Delegate to the folder browser capability.
    pub fn request_browse_folders(&self) -> RequestOutcome {
        if let Some(browse_folders) = &self.caps.browse_folders {
            browse_folders();
            return RequestOutcome::Delegated;
        }
        warn!("browseFolders capability missing");
        RequestOutcome::Unavailable {
            message: "Native function needed to browse folders.".into(),
        }
    }

    /// Dispatch a titled tool/action card to a capability named after it.
    pub fn dispatch_action(&self, title: &str) -> RequestOutcome {
        if title == "Images to PDF" {
            if let Some(start_image_to_pdf) = &self.caps.start_image_to_pdf {
                start_image_to_pdf();
                return RequestOutcome::Delegated;
            }
        }
        if let Some(action) = self.caps.actions.get(title) {
            action();
            return RequestOutcome::Delegated;
        }
        warn!(title, "no capability for card action");
        RequestOutcome::Unavailable {
            message: format!("Native function needed for \"{title}\"."),
        }
    }

    /// Fire every fallback callback whose deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Vec<HostCallback> {
        self.timers.fire_due(now)
    }

    /// The earliest pending fallback deadline, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Number of pending fallback timers.
    pub fn pending_fallbacks(&self) -> usize {
        self.timers.len()
    }
}
