//! Deterministic placeholder data for hostless operation.
//!
//! When a capability is absent the adapter routes these through the same
//! inbound path as real host callbacks, so the UI stays exercisable in a
//! plain browser and the render path cannot tell the difference.

use docview_common::types::{FileCategory, FileCounts, FileEntry, StorageVolume};

/// Placeholder dashboard counts.
pub fn dummy_counts() -> FileCounts {
    FileCounts {
        all: 15,
        pdf: 3,
        doc: 2,
        xls: 0,
        ppt: 0,
        txt: 5,
        archive: 1,
    }
}

/// Placeholder storage volumes: one internal, one SD card.
pub fn dummy_storage() -> Vec<StorageVolume> {
    vec![
        StorageVolume {
            name: "Internal (Simulated)".into(),
            free: 10.5,
            total: 64.0,
            unit: "GB".into(),
            path: "dummy:///internal".into(),
        },
        StorageVolume {
            name: "SD Card (Simulated)".into(),
            free: 25.2,
            total: 128.0,
            unit: "GB".into(),
            path: "dummy:///sdcard".into(),
        },
    ]
}

fn entry(name: &str, size: u64, kind: &str) -> FileEntry {
    FileEntry {
        name: name.into(),
        path: format!("dummy:///{name}"),
        size: Some(size),
        kind: Some(kind.into()),
    }
}

/// Placeholder file list for a category. Categories without placeholder
/// content return an empty list, which renders the "no files" state.
pub fn dummy_files(category: FileCategory) -> Vec<FileEntry> {
    match category {
        FileCategory::Pdf => vec![
            entry("Report.pdf", 1_234_567, "pdf"),
            entry("Invoice-2024.pdf", 88_321, "pdf"),
            entry("Manual.pdf", 5_242_880, "pdf"),
        ],
        FileCategory::Doc => vec![
            entry("Notes.docx", 56_789, "docx"),
            entry("Letter.doc", 23_456, "doc"),
        ],
        FileCategory::Txt => vec![
            entry("Readme.txt", 1_024, "txt"),
            entry("todo.txt", 2_048, "txt"),
        ],
        FileCategory::All => vec![
            entry("Report.pdf", 1_234_567, "pdf"),
            entry("Notes.docx", 56_789, "docx"),
            entry("Readme.txt", 1_024, "txt"),
            entry("backup.zip", 10_485_760, "zip"),
        ],
        _ => Vec::new(),
    }
}
