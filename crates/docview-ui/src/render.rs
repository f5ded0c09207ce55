//! HTML generation for the two views.
//!
//! Every value interpolated into markup goes through [`escape_html`] first —
//! names and paths arrive from the host and must not be able to inject
//! markup into the page.

use docview_common::types::{FileCategory, FileEntry, StorageVolume};

use crate::bindings;

/// Radius of the storage progress ring circle.
pub const RING_RADIUS: f64 = 18.0;

/// Circumference of the storage progress ring.
pub fn ring_circumference() -> f64 {
    2.0 * std::f64::consts::PI * RING_RADIUS
}

/// Stroke offset for a given used percentage: full circumference means an
/// empty ring, zero means a full one.
pub fn ring_offset(used_percentage: f64) -> f64 {
    let circumference = ring_circumference();
    circumference - (used_percentage / 100.0) * circumference
}

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Text for a dashboard count label.
pub fn count_label(count: u64) -> String {
    format!("{count} files")
}

/// Font Awesome icon class for a file name or bare type.
pub fn file_icon(name_or_type: &str) -> &'static str {
    if name_or_type.is_empty() {
        return "fas fa-file";
    }
    let extension = name_or_type
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .unwrap_or(name_or_type)
        .to_lowercase();
    match extension.as_str() {
        "pdf" => "fas fa-file-pdf",
        "doc" | "docx" => "fas fa-file-word",
        "xls" | "xlsx" => "fas fa-file-excel",
        "ppt" | "pptx" => "fas fa-file-powerpoint",
        "txt" => "fas fa-file-alt",
        "zip" | "rar" | "7z" => "fas fa-file-archive",
        "jpg" | "jpeg" | "png" | "gif" => "fas fa-file-image",
        "mp3" | "wav" | "ogg" => "fas fa-file-audio",
        "mp4" | "avi" | "mkv" => "fas fa-file-video",
        _ => "fas fa-file",
    }
}

/// Human-readable file size: two decimals with trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".into();
    }
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    let exponent = (((bytes as f64).ln() / 1024_f64.ln()).floor() as usize).min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    let mut formatted = format!("{value:.2}");
    while formatted.ends_with('0') {
        formatted.pop();
    }
    if formatted.ends_with('.') {
        formatted.pop();
    }
    format!("{formatted} {}", UNITS[exponent])
}

/// The loading placeholder shown while a fallback file list is pending.
pub fn loading_html() -> &'static str {
    r#"<div class="loading-indicator">Loading files...</div>"#
}

/// The message shown when the host reports no storage volumes.
pub fn no_storage_html() -> &'static str {
    r#"<p class="error-message">Could not load storage information.</p>"#
}

/// One row per storage volume, each with an icon, a progress ring and the
/// free-space text. `is_removable` picks the SD-card icon over the HDD one.
pub fn storage_list_html(
    volumes: &[StorageVolume],
    is_removable: impl Fn(&StorageVolume) -> bool,
) -> String {
    let circumference = ring_circumference();
    let mut html = String::new();
    for (index, volume) in volumes.iter().enumerate() {
        let offset = ring_offset(volume.used_percentage());
        let icon = if is_removable(volume) {
            "fa-sd-card"
        } else {
            "fa-hdd"
        };
        html.push_str(&format!(
            concat!(
                r#"<div class="storage-item" data-bind="{bind}" data-path="{path}" data-name="{name}">"#,
                r#"<div class="storage-icon-wrapper">"#,
                r#"<i class="fas {icon} storage-icon"></i>"#,
                r#"<svg class="progress-ring" width="40" height="40">"#,
                r##"<circle class="progress-ring__circle-bg" stroke="#555" stroke-width="3" fill="transparent" r="18" cx="20" cy="20"/>"##,
                r##"<circle class="progress-ring__circle" stroke="#4CAF50" stroke-width="3" fill="transparent" r="18" cx="20" cy="20" "##,
                r#"style="stroke-dasharray: {circ:.2} {circ:.2}; stroke-dashoffset: {offset:.2};"/>"#,
                r#"</svg></div>"#,
                r#"<div class="storage-details">"#,
                r#"<p class="storage-name">{name}</p>"#,
                r#"<p class="storage-space">{free:.2} {unit} Free</p>"#,
                r#"</div>"#,
                r#"<i class="fas fa-chevron-right arrow-icon"></i>"#,
                r#"</div>"#,
            ),
            bind = bindings::storage_key(index),
            path = escape_html(&volume.path),
            name = escape_html(&volume.name),
            icon = icon,
            circ = circumference,
            offset = offset,
            free = volume.free,
            unit = escape_html(&volume.unit),
        ));
    }
    html
}

/// The file-list view: back button, category heading, one row per file.
pub fn file_list_html(files: &[FileEntry], category: FileCategory) -> String {
    let mut html = format!(
        concat!(
            r#"<div class="file-list-view">"#,
            r#"<button id="backToMainBtn" class="back-button" data-bind="{bind}">&lt; Back</button>"#,
            r#"<h2>{heading}</h2>"#,
            r#"<ul class="file-list-ul">"#,
        ),
        bind = bindings::BACK_KEY,
        heading = escape_html(&category.as_str().to_uppercase()),
    );
    if files.is_empty() {
        html.push_str(r#"<p class="no-files-message">No files found.</p>"#);
    } else {
        for (index, file) in files.iter().enumerate() {
            html.push_str(&file_row_html(index, file));
        }
    }
    html.push_str("</ul></div>");
    html
}

fn file_row_html(index: usize, file: &FileEntry) -> String {
    let name = if file.name.is_empty() {
        "Unknown"
    } else {
        file.name.as_str()
    };
    let icon = if let Some(kind) = file.kind.as_deref().filter(|k| !k.is_empty()) {
        file_icon(kind)
    } else {
        file_icon(&file.name)
    };
    let size_span = file
        .size
        .map(|bytes| format!(r#"<span class="file-size">{}</span>"#, format_file_size(bytes)))
        .unwrap_or_default();
    format!(
        concat!(
            r#"<li class="file-item" data-bind="{bind}" data-path="{path}" data-name="{name}" data-type="{kind}">"#,
            r#"<i class="{icon} file-icon"></i>"#,
            r#"<span class="file-name">{name}</span>"#,
            "{size}",
            "</li>",
        ),
        bind = bindings::file_key(index),
        path = escape_html(&file.path),
        name = escape_html(name),
        kind = escape_html(file.kind.as_deref().unwrap_or("")),
        icon = icon,
        size = size_span,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(name: &str, free: f64, total: f64, path: &str) -> StorageVolume {
        StorageVolume {
            name: name.into(),
            free,
            total,
            unit: "GB".into(),
            path: path.into(),
        }
    }

    // -- Escaping --

    #[test]
    fn escape_html_neutralizes_markup() {
        assert_eq!(
            escape_html(r#"<img src=x onerror="pwn()">"#),
            "&lt;img src=x onerror=&quot;pwn()&quot;&gt;"
        );
        assert_eq!(escape_html("a & b's"), "a &amp; b&#39;s");
    }

    #[test]
    fn host_names_cannot_inject_markup() {
        let vols = vec![volume("<script>alert(1)</script>", 1.0, 2.0, "/x")];
        let html = storage_list_html(&vols, |_| false);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    // -- Icons --

    #[test]
    fn icon_by_extension() {
        assert_eq!(file_icon("Report.pdf"), "fas fa-file-pdf");
        assert_eq!(file_icon("Notes.docx"), "fas fa-file-word");
        assert_eq!(file_icon("sheet.XLSX"), "fas fa-file-excel");
        assert_eq!(file_icon("deck.ppt"), "fas fa-file-powerpoint");
        assert_eq!(file_icon("readme.txt"), "fas fa-file-alt");
        assert_eq!(file_icon("bundle.7z"), "fas fa-file-archive");
        assert_eq!(file_icon("photo.JPG"), "fas fa-file-image");
        assert_eq!(file_icon("song.mp3"), "fas fa-file-audio");
        assert_eq!(file_icon("clip.mkv"), "fas fa-file-video");
    }

    #[test]
    fn icon_by_bare_type_and_fallbacks() {
        assert_eq!(file_icon("pdf"), "fas fa-file-pdf");
        assert_eq!(file_icon("unknown-ext"), "fas fa-file");
        assert_eq!(file_icon(""), "fas fa-file");
    }

    // -- File sizes --

    #[test]
    fn format_file_size_units() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_234_567), "1.18 MB");
        assert_eq!(format_file_size(5 * 1024 * 1024 * 1024), "5 GB");
    }

    // -- Progress ring --

    #[test]
    fn ring_offset_bounds() {
        let circumference = ring_circumference();
        assert!((ring_offset(0.0) - circumference).abs() < 1e-9);
        assert!(ring_offset(100.0).abs() < 1e-9);
    }

    // -- Storage rows --

    #[test]
    fn storage_row_free_space_text() {
        let vols = vec![volume("Internal", 10.0, 64.0, "/storage/emulated/0")];
        let html = storage_list_html(&vols, |_| false);
        assert!(html.contains("10.00 GB Free"));
        assert!(html.contains("fa-hdd"));
        assert!(html.contains(r#"data-path="/storage/emulated/0""#));
        assert!(html.contains(r#"data-bind="storage#0""#));
        // 10/64 free → ring offset must be non-zero and below the circumference
        assert!(!html.contains("stroke-dashoffset: 0.00;"));
    }

    #[test]
    fn removable_volume_gets_sd_icon() {
        let vols = vec![volume("SD Card", 1.0, 2.0, "/storage/ABCD-1234")];
        let html = storage_list_html(&vols, |_| true);
        assert!(html.contains("fa-sd-card"));
        assert!(!html.contains("fa-hdd"));
    }

    #[test]
    fn empty_volume_list_renders_nothing() {
        assert_eq!(storage_list_html(&[], |_| false), "");
    }

    // -- File list --

    #[test]
    fn file_list_heading_and_rows() {
        let files = vec![FileEntry {
            name: "Report.pdf".into(),
            path: "/docs/Report.pdf".into(),
            size: Some(1_234_567),
            kind: Some("pdf".into()),
        }];
        let html = file_list_html(&files, FileCategory::Pdf);
        assert!(html.contains("<h2>PDF</h2>"));
        assert!(html.contains("&lt; Back"));
        assert!(html.contains(r#"data-path="/docs/Report.pdf""#));
        assert!(html.contains(r#"data-type="pdf""#));
        assert!(html.contains("fas fa-file-pdf"));
        assert!(html.contains("1.18 MB"));
        assert!(!html.contains("no-files-message"));
    }

    #[test]
    fn empty_file_list_renders_no_files_message() {
        let html = file_list_html(&[], FileCategory::Txt);
        assert!(html.contains("No files found."));
        assert!(html.contains("<h2>TXT</h2>"));
        assert!(!html.contains("file-item"));
    }

    #[test]
    fn file_row_without_size_has_no_size_span() {
        let files = vec![FileEntry {
            name: "Readme.txt".into(),
            path: "/Readme.txt".into(),
            size: None,
            kind: None,
        }];
        let html = file_list_html(&files, FileCategory::Txt);
        assert!(!html.contains("file-size"));
        assert!(html.contains("fas fa-file-alt"));
    }

    #[test]
    fn nameless_file_renders_unknown() {
        let files = vec![FileEntry {
            path: "/mystery".into(),
            ..Default::default()
        }];
        let html = file_list_html(&files, FileCategory::All);
        assert!(html.contains(r#"<span class="file-name">Unknown</span>"#));
    }
}
