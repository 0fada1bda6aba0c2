//! Mime type classification: card icons, accept lists and type detection.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Broad category of a file, used to pick its card icon and for the
/// folder-style kind filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileKind {
    Image,
    Video,
    Audio,
    Text,
    Spreadsheet,
    Presentation,
    Generic,
}

impl FileKind {
    /// Classifies a mime type. Rules are checked in order; top-level types
    /// first, then substrings of the subtype.
    pub fn from_mime(mime_type: &str) -> Self {
        let mime = mime_type.to_ascii_lowercase();

        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime.starts_with("audio/") {
            Self::Audio
        } else if mime.starts_with("text/") || mime.contains("pdf") {
            Self::Text
        } else if mime.contains("word") || mime.contains("document") {
            Self::Text
        } else if mime.contains("excel") || mime.contains("spreadsheet") {
            Self::Spreadsheet
        } else if mime.contains("presentation") || mime.contains("powerpoint") {
            Self::Presentation
        } else {
            Self::Generic
        }
    }

    /// Whether a filter on `self` should show records of `other`.
    ///
    /// `Text` doubles as the "Documents" folder and also takes spreadsheets
    /// and presentations.
    pub fn covers(self, other: FileKind) -> bool {
        self == other
            || (self == Self::Text && matches!(other, Self::Spreadsheet | Self::Presentation))
    }

    /// Icon name understood by the frontend's icon set.
    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Text => "file-text",
            Self::Spreadsheet => "file-spreadsheet",
            Self::Presentation => "file-presentation",
            Self::Generic => "file",
        }
    }
}

/// Checks a mime type against one accept pattern (`image/*`, `application/pdf`).
pub fn mime_matches(pattern: &str, mime_type: &str) -> bool {
    let pattern = pattern.trim();
    if pattern == "*/*" {
        return true;
    }
    match pattern.strip_suffix("/*") {
        Some(top_level) => mime_type
            .split_once('/')
            .is_some_and(|(top, _)| top.eq_ignore_ascii_case(top_level)),
        None => pattern.eq_ignore_ascii_case(mime_type),
    }
}

/// Checks a mime type against a whole accept list. An empty list accepts everything.
pub fn is_accepted(accepted_types: &[String], mime_type: &str) -> bool {
    accepted_types.is_empty()
        || accepted_types
            .iter()
            .any(|pattern| mime_matches(pattern, mime_type))
}

/// Determines the mime type of a file.
///
/// The extension is consulted first; for unknown extensions the content is
/// sniffed. Returns an empty string when nothing is known, like a browser
/// reporting an unknown `File.type`.
pub fn detect_mime_type(path: &Path) -> String {
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        return mime.to_string();
    }

    match tree_magic_mini::from_filepath(path) {
        Some(mime) if mime != "application/octet-stream" => {
            tracing::debug!("Sniffed mime type {} for {}", mime, path.display());
            mime.to_string()
        }
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(FileKind::from_mime("image/png"), FileKind::Image);
        assert_eq!(FileKind::from_mime("video/mp4"), FileKind::Video);
        assert_eq!(FileKind::from_mime("audio/mpeg"), FileKind::Audio);
        assert_eq!(FileKind::from_mime("text/plain"), FileKind::Text);
        assert_eq!(FileKind::from_mime("application/pdf"), FileKind::Text);
        assert_eq!(FileKind::from_mime("application/msword"), FileKind::Text);
        assert_eq!(
            FileKind::from_mime(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            ),
            FileKind::Text,
            "'officedocument' hits the document rule first"
        );
        assert_eq!(
            FileKind::from_mime("application/vnd.ms-excel"),
            FileKind::Spreadsheet
        );
        assert_eq!(
            FileKind::from_mime("application/vnd.ms-powerpoint"),
            FileKind::Presentation
        );
        assert_eq!(FileKind::from_mime("application/zip"), FileKind::Generic);
        assert_eq!(FileKind::from_mime(""), FileKind::Generic);
    }

    #[test]
    fn test_icon_names() {
        assert_eq!(FileKind::Image.icon_name(), "image");
        assert_eq!(FileKind::Generic.icon_name(), "file");
    }

    #[test]
    fn test_mime_matches_wildcards_and_exact() {
        assert!(mime_matches("image/*", "image/png"));
        assert!(mime_matches("IMAGE/*", "image/png"));
        assert!(!mime_matches("image/*", "video/mp4"));
        assert!(!mime_matches("image/*", "imagex"));
        assert!(mime_matches("application/pdf", "application/pdf"));
        assert!(!mime_matches("application/pdf", "application/pdfx"));
        assert!(mime_matches("*/*", "anything/at-all"));
    }

    #[test]
    fn test_is_accepted() {
        let accepted = vec!["image/*".to_string(), "application/pdf".to_string()];
        assert!(is_accepted(&accepted, "image/gif"));
        assert!(is_accepted(&accepted, "application/pdf"));
        assert!(!is_accepted(&accepted, "application/zip"));
        assert!(!is_accepted(&accepted, ""));
        assert!(is_accepted(&[], "application/zip"));
    }

    #[test]
    fn test_detect_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("photo.png");
        fs::write(&png, b"not really a png").unwrap();
        assert_eq!(detect_mime_type(&png), "image/png");

        let pdf = dir.path().join("report.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();
        assert_eq!(detect_mime_type(&pdf), "application/pdf");
    }
}
