//! Top-level shell: routes every interaction to exactly one outbound
//! request or local UI effect, and every host callback to a render.
//!
//! The shell is single-threaded and event-driven. Synchronous handlers keep
//! it fully deterministic for embedding and tests; [`Shell::run`] wraps them
//! in an event-loop pump for hosts that want a channel interface, with
//! [`ShellHandle`] as the stable binding point the native side invokes.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use docview_common::notifications::{Toast, ToastQueue};
use docview_common::types::{FileCategory, ViewState};

use crate::bridge::{BridgeAdapter, HostCapabilities, RequestOutcome};
use crate::config::UiConfig;
use crate::ipc::{HostCallback, IpcMessage, UiEvent};
use crate::view::{default_removable_predicate, DomUpdate, ViewController};

/// Owns the view controller, the bridge adapter and the toast queue.
pub struct Shell {
    view: ViewController,
    bridge: BridgeAdapter,
    toasts: ToastQueue,
    toast_ttl: Duration,
}

impl Shell {
    /// Build a shell over the given dashboard markup and host capabilities.
    pub fn new(
        dashboard_html: impl Into<String>,
        caps: HostCapabilities,
        config: &UiConfig,
    ) -> Self {
        let mut view = ViewController::new(dashboard_html);
        view.set_removable_predicate(default_removable_predicate(
            config.storage.internal_marker.clone(),
        ));
        Self {
            view,
            bridge: BridgeAdapter::new(caps, config.file_list_delay(), config.initial_data_delay()),
            toasts: ToastQueue::default(),
            toast_ttl: config.toast_ttl(),
        }
    }

    /// Startup: bind the dashboard chrome and request the initial data.
    pub fn init(&mut self, now: Instant) -> Vec<DomUpdate> {
        let mut updates = self.view.bind_initial();
        let outcome = self.bridge.request_initial_data(now);
        updates.extend(self.outcome_updates(outcome, false));
        updates
    }

    /// Route one interaction to its single effect.
    pub fn handle_ui_event(&mut self, event: UiEvent, now: Instant) -> Vec<DomUpdate> {
        match event {
            UiEvent::SettingsClicked => self.view.open_sidebar(),
            UiEvent::CloseClicked | UiEvent::OverlayClicked => self.view.close_sidebar(),
            UiEvent::CardClicked { classes, title } => self.handle_card(&classes, title, now),
            UiEvent::FileRowClicked { path, name, kind } => {
                let outcome = self
                    .bridge
                    .request_open_file(&path, &name, kind.as_deref());
                self.outcome_updates(outcome, false)
            }
            UiEvent::StorageRowClicked { path, name } => {
                if path.is_empty() {
                    warn!(name, "storage path not available for browsing");
                    return Vec::new();
                }
                let outcome = self.bridge.request_browse_path(&path, &name);
                self.outcome_updates(outcome, false)
            }
            UiEvent::BackClicked => match self.view.view_state() {
                ViewState::FileList(_) => self.view.restore_dashboard(),
                ViewState::Dashboard => {
                    debug!("back pressed outside file list, ignoring");
                    Vec::new()
                }
            },
        }
    }

    /// Parse a raw IPC body and route it. Malformed input is logged and
    /// dropped; nothing from the page can halt the controller.
    pub fn handle_ipc(&mut self, raw: &str, now: Instant) -> Vec<DomUpdate> {
        let Some(message) = IpcMessage::from_json(raw) else {
            warn!(body_len = raw.len(), "IPC message rejected: invalid JSON");
            return Vec::new();
        };
        match UiEvent::from_message(&message) {
            Some(event) => self.handle_ui_event(event, now),
            None => Vec::new(),
        }
    }

    /// Route an inbound host callback to its render. Fallback payloads take
    /// this exact path too, so the caller cannot tell which one triggered
    /// the render.
    pub fn handle_host_callback(&mut self, callback: HostCallback) -> Vec<DomUpdate> {
        match callback {
            HostCallback::FileCounts(counts) => self.view.apply_counts(&counts),
            HostCallback::StorageInfo(volumes) => self.view.show_storage(&volumes),
            HostCallback::FileList { files, category } => {
                self.view.show_file_list(&files, category)
            }
        }
    }

    /// Fire due fallback timers through the normal inbound path.
    pub fn poll_fallbacks(&mut self, now: Instant) -> Vec<DomUpdate> {
        let mut updates = Vec::new();
        for callback in self.bridge.poll(now) {
            updates.extend(self.handle_host_callback(callback));
        }
        updates
    }

    /// The earliest pending fallback deadline, if any.
    pub fn next_fallback_deadline(&self) -> Option<Instant> {
        self.bridge.next_deadline()
    }

    pub fn view(&self) -> &ViewController {
        &self.view
    }

    /// Currently visible (non-expired) toast messages.
    pub fn visible_toasts(&mut self) -> Vec<String> {
        self.toasts
            .visible()
            .into_iter()
            .map(|t| t.message.clone())
            .collect()
    }

    fn handle_card(
        &mut self,
        classes: &[String],
        title: Option<String>,
        now: Instant,
    ) -> Vec<DomUpdate> {
        if let Some(category) = classes
            .iter()
            .find_map(|class| FileCategory::from_card_class(class))
        {
            let outcome = self.bridge.request_file_list(category, now);
            return self.outcome_updates(outcome, true);
        }
        if classes.iter().any(|class| class == "place-folder") {
            let outcome = self.bridge.request_browse_folders();
            return self.outcome_updates(outcome, false);
        }
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Unknown Action".to_string());
        debug!(title = %title, "tool card clicked");
        let outcome = self.bridge.dispatch_action(&title);
        self.outcome_updates(outcome, false)
    }

    fn outcome_updates(&mut self, outcome: RequestOutcome, file_list: bool) -> Vec<DomUpdate> {
        match outcome {
            RequestOutcome::Delegated | RequestOutcome::Rejected => Vec::new(),
            RequestOutcome::FallbackScheduled { .. } => {
                if file_list {
                    self.view.show_loading()
                } else {
                    Vec::new()
                }
            }
            RequestOutcome::Unavailable { message } => {
                self.toasts
                    .push(Toast::with_ttl(message.clone(), self.toast_ttl));
                vec![DomUpdate::Toast { message }]
            }
        }
    }

    /// Event-loop pump: handles UI events, host callbacks and fallback
    /// deadlines until both inbound channels close or the output side is
    /// dropped.
    pub async fn run(
        mut self,
        mut ui_rx: UnboundedReceiver<UiEvent>,
        mut host_rx: UnboundedReceiver<HostCallback>,
        out_tx: UnboundedSender<DomUpdate>,
    ) {
        let now = tokio::time::Instant::now().into_std();
        if emit(&out_tx, self.init(now)).is_err() {
            return;
        }
        loop {
            let deadline = self.next_fallback_deadline();
            let updates = tokio::select! {
                event = ui_rx.recv() => match event {
                    Some(event) => {
                        let now = tokio::time::Instant::now().into_std();
                        self.handle_ui_event(event, now)
                    }
                    None => break,
                },
                callback = host_rx.recv() => match callback {
                    Some(callback) => self.handle_host_callback(callback),
                    None => break,
                },
                _ = sleep_until_deadline(deadline) => {
                    let now = tokio::time::Instant::now().into_std();
                    self.poll_fallbacks(now)
                }
            };
            if emit(&out_tx, updates).is_err() {
                break;
            }
        }
    }

    /// Spawn the pump, returning the host-facing handle, the stream of DOM
    /// updates to evaluate in the page, and the task handle.
    pub fn spawn(self) -> (ShellHandle, UnboundedReceiver<DomUpdate>, JoinHandle<()>) {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(self.run(ui_rx, host_rx, out_tx));
        (ShellHandle { ui_tx, host_tx }, out_rx, task)
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => {
            tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await
        }
        None => std::future::pending().await,
    }
}

fn emit(out_tx: &UnboundedSender<DomUpdate>, updates: Vec<DomUpdate>) -> Result<(), ()> {
    for update in updates {
        out_tx.send(update).map_err(|_| ())?;
    }
    Ok(())
}

/// Stable binding point for the native host: the three inbound entry points
/// plus raw UI event injection. Cloneable; sends are fire-and-forget.
#[derive(Clone)]
pub struct ShellHandle {
    ui_tx: UnboundedSender<UiEvent>,
    host_tx: UnboundedSender<HostCallback>,
}

impl ShellHandle {
    pub fn update_file_counts(&self, counts: docview_common::types::FileCounts) {
        self.send_host(HostCallback::FileCounts(counts));
    }

    pub fn update_storage_info(&self, volumes: Vec<docview_common::types::StorageVolume>) {
        self.send_host(HostCallback::StorageInfo(volumes));
    }

    pub fn display_file_list(
        &self,
        files: Vec<docview_common::types::FileEntry>,
        category: FileCategory,
    ) {
        self.send_host(HostCallback::FileList { files, category });
    }

    pub fn ui_event(&self, event: UiEvent) {
        if self.ui_tx.send(event).is_err() {
            warn!("shell is gone, UI event dropped");
        }
    }

    fn send_host(&self, callback: HostCallback) {
        if self.host_tx.send(callback).is_err() {
            warn!("shell is gone, host callback dropped");
        }
    }
}
