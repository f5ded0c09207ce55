//! View controller: owns the visible view state and emits DOM update ops.
//!
//! Two main views exist — the dashboard and the file list. Navigating to a
//! file list replaces the main content wholesale; navigating back restores
//! the markup snapshot captured at construction (an idempotent restore, not
//! a re-fetch: data rendered before leaving the dashboard is baked into the
//! snapshot and stays stale until the next inbound update).

use serde::{Deserialize, Serialize};
use tracing::debug;

use docview_common::types::{
    FileCategory, FileCounts, FileEntry, SidebarState, StorageVolume, ViewState,
};

use crate::bindings::{self, BindingRegistry};
use crate::render;

/// Which click handler a bind instruction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HandlerKind {
    Card,
    FileRow,
    StorageRow,
    Back,
}

/// A single DOM mutation for the page shim to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DomUpdate {
    SetText { id: String, text: String },
    SetHtml { id: String, html: String },
    ReplaceMain { html: String },
    AddClass { id: String, class: String },
    RemoveClass { id: String, class: String },
    Toast { message: String },
    Bind { handler: HandlerKind, keys: Vec<String> },
}

/// Pluggable predicate deciding whether a volume gets the SD-card icon.
pub type RemovablePredicate = Box<dyn Fn(&StorageVolume) -> bool + Send>;

/// Default internal-storage path marker for [`default_removable_predicate`].
pub const DEFAULT_INTERNAL_MARKER: &str = "emulated";

/// Best-effort heuristic: a volume is
/// removable if its name contains "sd", or its path is present but lacks the
/// internal-storage marker.
pub fn default_removable_predicate(internal_marker: impl Into<String>) -> RemovablePredicate {
    let marker = internal_marker.into();
    Box::new(move |volume: &StorageVolume| {
        volume.name.to_lowercase().contains("sd")
            || (!volume.path.is_empty() && !volume.path.contains(&marker))
    })
}

/// Owns the visible view state and turns inbound data into [`DomUpdate`] ops.
pub struct ViewController {
    state: ViewState,
    sidebar: SidebarState,
    dashboard_snapshot: String,
    bindings: BindingRegistry,
    is_removable: RemovablePredicate,
}

impl ViewController {
    /// Capture the dashboard markup snapshot and start on the dashboard.
    pub fn new(dashboard_html: impl Into<String>) -> Self {
        Self {
            state: ViewState::Dashboard,
            sidebar: SidebarState::Closed,
            dashboard_snapshot: dashboard_html.into(),
            bindings: BindingRegistry::new(),
            is_removable: default_removable_predicate(DEFAULT_INTERNAL_MARKER),
        }
    }

    /// Replace the removable-volume predicate.
    pub fn set_removable_predicate(&mut self, predicate: RemovablePredicate) {
        self.is_removable = predicate;
    }

    pub fn view_state(&self) -> ViewState {
        self.state
    }

    pub fn sidebar_state(&self) -> SidebarState {
        self.sidebar
    }

    /// The pristine markup captured at construction.
    pub fn dashboard_snapshot(&self) -> &str {
        &self.dashboard_snapshot
    }

    /// Bind the host-authored dashboard cards and any storage rows already
    /// present in the initial markup. Called once at startup.
    pub fn bind_initial(&mut self) -> Vec<DomUpdate> {
        self.bind_dashboard_chrome()
    }

    /// Update the seven count labels. Fields absent from the host payload
    /// are already zero, so every label is always written.
    pub fn apply_counts(&mut self, counts: &FileCounts) -> Vec<DomUpdate> {
        FileCategory::COUNTABLE
            .iter()
            .map(|category| DomUpdate::SetText {
                id: format!("count-{category}"),
                text: render::count_label(counts.get(*category).unwrap_or(0)),
            })
            .collect()
    }

    /// Re-render the storage container. An empty list renders the explicit
    /// "could not load" message, never a partial list.
    pub fn show_storage(&mut self, volumes: &[StorageVolume]) -> Vec<DomUpdate> {
        if volumes.is_empty() {
            return vec![DomUpdate::SetHtml {
                id: "storage-list-container".into(),
                html: render::no_storage_html().into(),
            }];
        }
        // The container re-render produces fresh rows; previous storage
        // bindings no longer point at live elements.
        self.bindings.invalidate_prefix("storage");
        let html = render::storage_list_html(volumes, &self.is_removable);
        let keys = self
            .bindings
            .filter_unbound((0..volumes.len()).map(bindings::storage_key));
        let mut updates = vec![DomUpdate::SetHtml {
            id: "storage-list-container".into(),
            html,
        }];
        if !keys.is_empty() {
            updates.push(DomUpdate::Bind {
                handler: HandlerKind::StorageRow,
                keys,
            });
        }
        updates
    }

    /// Transition to the file-list view for `category`.
    pub fn show_file_list(
        &mut self,
        files: &[FileEntry],
        category: FileCategory,
    ) -> Vec<DomUpdate> {
        debug!(category = %category, files = files.len(), "showing file list");
        self.state = ViewState::FileList(category);
        self.bindings.begin_generation();

        let mut updates = vec![DomUpdate::ReplaceMain {
            html: render::file_list_html(files, category),
        }];
        let row_keys = self
            .bindings
            .filter_unbound((0..files.len()).map(bindings::file_key));
        if !row_keys.is_empty() {
            updates.push(DomUpdate::Bind {
                handler: HandlerKind::FileRow,
                keys: row_keys,
            });
        }
        let back_keys = self
            .bindings
            .filter_unbound([bindings::BACK_KEY.to_string()]);
        updates.push(DomUpdate::Bind {
            handler: HandlerKind::Back,
            keys: back_keys,
        });
        updates
    }

    /// Replace the main content with the loading placeholder while a
    /// fallback file list is pending.
    pub fn show_loading(&mut self) -> Vec<DomUpdate> {
        self.bindings.begin_generation();
        vec![DomUpdate::ReplaceMain {
            html: render::loading_html().into(),
        }]
    }

    /// Transition back to the dashboard by restoring the snapshot.
    /// Restored elements are fresh clones and treated as never-yet-bound.
    pub fn restore_dashboard(&mut self) -> Vec<DomUpdate> {
        debug!("restoring dashboard view");
        self.state = ViewState::Dashboard;
        self.bindings.begin_generation();

        let mut updates = vec![DomUpdate::ReplaceMain {
            html: self.dashboard_snapshot.clone(),
        }];
        updates.extend(self.bind_dashboard_chrome());
        updates
    }

    /// Open the sidebar (idempotent).
    pub fn open_sidebar(&mut self) -> Vec<DomUpdate> {
        self.sidebar = SidebarState::Open;
        vec![
            DomUpdate::AddClass {
                id: "sidebar".into(),
                class: "active".into(),
            },
            DomUpdate::AddClass {
                id: "overlay".into(),
                class: "active".into(),
            },
        ]
    }

    /// Close the sidebar (idempotent).
    pub fn close_sidebar(&mut self) -> Vec<DomUpdate> {
        self.sidebar = SidebarState::Closed;
        vec![
            DomUpdate::RemoveClass {
                id: "sidebar".into(),
                class: "active".into(),
            },
            DomUpdate::RemoveClass {
                id: "overlay".into(),
                class: "active".into(),
            },
        ]
    }

    fn bind_dashboard_chrome(&mut self) -> Vec<DomUpdate> {
        let mut updates = Vec::new();
        let card_keys = self
            .bindings
            .filter_unbound([bindings::CARDS_KEY.to_string()]);
        if !card_keys.is_empty() {
            updates.push(DomUpdate::Bind {
                handler: HandlerKind::Card,
                keys: card_keys,
            });
        }
        let storage_keys = self
            .bindings
            .filter_unbound([bindings::STORAGE_ROWS_KEY.to_string()]);
        if !storage_keys.is_empty() {
            updates.push(DomUpdate::Bind {
                handler: HandlerKind::StorageRow,
                keys: storage_keys,
            });
        }
        updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHBOARD: &str =
        r#"<section class="cards"><div class="card cat-pdf"></div></section><div id="storage-list-container"></div>"#;

    fn controller() -> ViewController {
        ViewController::new(DASHBOARD)
    }

    fn volume(name: &str, free: f64, total: f64, path: &str) -> StorageVolume {
        StorageVolume {
            name: name.into(),
            free,
            total,
            unit: "GB".into(),
            path: path.into(),
        }
    }

    // -- Counts --

    #[test]
    fn counts_render_all_seven_labels() {
        let mut view = controller();
        let counts: FileCounts = serde_json::from_str(r#"{"all":15,"pdf":3}"#).unwrap();
        let updates = view.apply_counts(&counts);
        assert_eq!(updates.len(), 7);
        assert!(updates.contains(&DomUpdate::SetText {
            id: "count-all".into(),
            text: "15 files".into(),
        }));
        assert!(updates.contains(&DomUpdate::SetText {
            id: "count-pdf".into(),
            text: "3 files".into(),
        }));
        for id in ["count-doc", "count-xls", "count-ppt", "count-txt", "count-archive"] {
            assert!(updates.contains(&DomUpdate::SetText {
                id: id.into(),
                text: "0 files".into(),
            }));
        }
    }

    // -- Storage --

    #[test]
    fn empty_storage_renders_exactly_the_error_message() {
        let mut view = controller();
        let updates = view.show_storage(&[]);
        assert_eq!(
            updates,
            vec![DomUpdate::SetHtml {
                id: "storage-list-container".into(),
                html: render::no_storage_html().into(),
            }]
        );
    }

    #[test]
    fn storage_rows_render_and_bind() {
        let mut view = controller();
        let vols = vec![
            volume("Internal", 10.0, 64.0, "/storage/emulated/0"),
            volume("SD Card", 25.2, 128.0, "/storage/ABCD-1234"),
        ];
        let updates = view.show_storage(&vols);
        assert_eq!(updates.len(), 2);
        match &updates[0] {
            DomUpdate::SetHtml { id, html } => {
                assert_eq!(id, "storage-list-container");
                assert!(html.contains("10.00 GB Free"));
                assert!(html.contains("fa-hdd"));
                assert!(html.contains("fa-sd-card"));
            }
            other => panic!("expected SetHtml, got {other:?}"),
        }
        assert_eq!(
            updates[1],
            DomUpdate::Bind {
                handler: HandlerKind::StorageRow,
                keys: vec!["storage#0".into(), "storage#1".into()],
            }
        );
    }

    #[test]
    fn storage_rerender_rebinds_fresh_rows() {
        let mut view = controller();
        let vols = vec![volume("Internal", 10.0, 64.0, "/storage/emulated/0")];
        view.show_storage(&vols);
        // Same rows again — fresh elements, so the bind instruction repeats.
        let updates = view.show_storage(&vols);
        assert!(updates.iter().any(|u| matches!(
            u,
            DomUpdate::Bind { handler: HandlerKind::StorageRow, keys } if keys == &vec!["storage#0".to_string()]
        )));
    }

    #[test]
    fn removable_predicate_is_pluggable() {
        let mut view = controller();
        view.set_removable_predicate(Box::new(|_| true));
        let updates = view.show_storage(&[volume("Internal", 1.0, 2.0, "/storage/emulated/0")]);
        match &updates[0] {
            DomUpdate::SetHtml { html, .. } => assert!(html.contains("fa-sd-card")),
            other => panic!("expected SetHtml, got {other:?}"),
        }
    }

    #[test]
    fn default_removable_heuristic() {
        let pred = default_removable_predicate(DEFAULT_INTERNAL_MARKER);
        assert!(pred(&volume("SD Card", 1.0, 2.0, "/storage/emulated/0")));
        assert!(pred(&volume("External", 1.0, 2.0, "/storage/ABCD-1234")));
        assert!(!pred(&volume("Internal", 1.0, 2.0, "/storage/emulated/0")));
        // No path, no "sd" in the name: not classified as removable.
        assert!(!pred(&volume("Internal", 1.0, 2.0, "")));
    }

    // -- File list and restore --

    #[test]
    fn file_list_transitions_state_and_binds() {
        let mut view = controller();
        let files = vec![FileEntry {
            name: "Report.pdf".into(),
            path: "/Report.pdf".into(),
            size: Some(100),
            kind: Some("pdf".into()),
        }];
        let updates = view.show_file_list(&files, FileCategory::Pdf);
        assert_eq!(view.view_state(), ViewState::FileList(FileCategory::Pdf));
        assert!(matches!(&updates[0], DomUpdate::ReplaceMain { html } if html.contains("Report.pdf")));
        assert!(updates.iter().any(|u| matches!(
            u,
            DomUpdate::Bind { handler: HandlerKind::FileRow, .. }
        )));
        assert!(updates.iter().any(|u| matches!(
            u,
            DomUpdate::Bind { handler: HandlerKind::Back, .. }
        )));
    }

    #[test]
    fn empty_file_list_still_shows_view_with_back_button() {
        let mut view = controller();
        let updates = view.show_file_list(&[], FileCategory::Creation);
        assert_eq!(
            view.view_state(),
            ViewState::FileList(FileCategory::Creation)
        );
        assert!(matches!(&updates[0], DomUpdate::ReplaceMain { html } if html.contains("No files found.")));
        assert!(!updates
            .iter()
            .any(|u| matches!(u, DomUpdate::Bind { handler: HandlerKind::FileRow, .. })));
        assert!(updates
            .iter()
            .any(|u| matches!(u, DomUpdate::Bind { handler: HandlerKind::Back, .. })));
    }

    #[test]
    fn restore_returns_exact_snapshot() {
        let mut view = controller();
        view.bind_initial();
        view.show_file_list(&[], FileCategory::Pdf);
        let updates = view.restore_dashboard();
        assert_eq!(view.view_state(), ViewState::Dashboard);
        assert_eq!(
            updates[0],
            DomUpdate::ReplaceMain {
                html: DASHBOARD.into(),
            }
        );
        // Fresh clones: cards and storage rows are re-bound.
        assert!(updates
            .iter()
            .any(|u| matches!(u, DomUpdate::Bind { handler: HandlerKind::Card, .. })));
        assert!(updates
            .iter()
            .any(|u| matches!(u, DomUpdate::Bind { handler: HandlerKind::StorageRow, .. })));
    }

    #[test]
    fn round_trip_restores_are_byte_identical() {
        let mut view = controller();
        view.bind_initial();
        view.show_file_list(&[], FileCategory::Pdf);
        let first = view.restore_dashboard();
        view.show_file_list(&[], FileCategory::Doc);
        let second = view.restore_dashboard();
        assert_eq!(first[0], second[0]);
    }

    #[test]
    fn initial_bind_is_not_repeated() {
        let mut view = controller();
        let first = view.bind_initial();
        assert!(!first.is_empty());
        let second = view.bind_initial();
        assert!(second.is_empty());
    }

    // -- Sidebar --

    #[test]
    fn sidebar_toggles_classes_and_state() {
        let mut view = controller();
        assert_eq!(view.sidebar_state(), SidebarState::Closed);

        let updates = view.open_sidebar();
        assert_eq!(view.sidebar_state(), SidebarState::Open);
        assert_eq!(updates.len(), 2);
        assert!(updates.iter().all(|u| matches!(u, DomUpdate::AddClass { class, .. } if class == "active")));

        let updates = view.close_sidebar();
        assert_eq!(view.sidebar_state(), SidebarState::Closed);
        assert!(updates.iter().all(|u| matches!(u, DomUpdate::RemoveClass { class, .. } if class == "active")));
    }

    #[test]
    fn sidebar_is_independent_of_view_state() {
        let mut view = controller();
        view.open_sidebar();
        view.show_file_list(&[], FileCategory::All);
        assert_eq!(view.sidebar_state(), SidebarState::Open);
        view.restore_dashboard();
        assert_eq!(view.sidebar_state(), SidebarState::Open);
    }
}
