//! Effective MIME type of template candidate files.
//!
//! Template content is classified by name rather than by sniffing, and a
//! desktop entry may redirect to the real template file through its `URL`
//! key, so the generic per-file MIME detection does not apply here.

use crate::desktop::{DesktopEntry, DESKTOP_SUFFIX};
use crate::mime::{MimeService, MimeType};
use std::path::{Path, PathBuf};
use url::Url;

/// Resolve a desktop entry's `URL` value against the directory holding it.
///
/// `file:` URIs are percent-decoded and absolute paths are taken as they
/// are; anything else is relative to `base`.
pub fn resolve_target(base: &Path, url: &str) -> PathBuf {
    if url.starts_with("file:") {
        if let Ok(path) = Url::parse(url).map_err(drop).and_then(|u| u.to_file_path()) {
            return path;
        }
        tracing::debug!(url, "not a local file URI");
    }

    let target = Path::new(url.strip_prefix("file://").unwrap_or(url));
    if target.is_absolute() {
        target.to_path_buf()
    } else {
        base.join(target)
    }
}

/// Determine the MIME type a candidate file offers a template for.
///
/// Returns `None` when the type cannot be determined or the file vanished;
/// callers skip such candidates.
pub fn classify(
    path: &Path,
    is_desktop_entry: bool,
    service: &dyn MimeService,
) -> Option<MimeType> {
    let mut path = path.to_path_buf();

    if is_desktop_entry {
        if let Ok(entry) = DesktopEntry::load(&path) {
            if let Some(declared) = entry.string("MimeType") {
                if let Some(first) = declared.split(';').map(str::trim).find(|t| !t.is_empty()) {
                    return Some(MimeType::new(first));
                }
            }
            if let Some(url) = entry.string("URL") {
                let base = path.parent().map(Path::to_path_buf).unwrap_or_default();
                path = resolve_target(&base, &url);
            }
        }
    }

    let basename = path.file_name()?.to_string_lossy().into_owned();

    if basename.ends_with(DESKTOP_SUFFIX) {
        if let Ok(entry) = DesktopEntry::load(&path) {
            // only application entries are supported as template content
            if entry.string("Type").as_deref() == Some("Application") {
                return Some(MimeType::desktop_application());
            }
        }
    } else if let Some(guess) = service.guess_from_name(&basename) {
        if guess.certain {
            return Some(guess.mime_type);
        }
    }

    let metadata = std::fs::metadata(&path).ok()?;
    if metadata.is_dir() {
        Some(MimeType::directory())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::{NameGuess, StaticMimeService};
    use std::fs;
    use tempfile::TempDir;

    fn service() -> StaticMimeService {
        StaticMimeService::new()
            .with_extension("py", "text/x-python")
            .with_extension("txt", "text/plain")
    }

    struct Uncertain;

    impl MimeService for Uncertain {
        fn guess_from_name(&self, _basename: &str) -> Option<NameGuess> {
            Some(NameGuess {
                mime_type: MimeType::new("application/octet-stream"),
                certain: false,
            })
        }

        fn default_application(&self, _mime_type: &MimeType) -> Option<crate::mime::Application> {
            None
        }
    }

    #[test]
    fn plain_file_classified_by_name() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("code.py");
        fs::write(&path, "").unwrap();
        assert_eq!(
            classify(&path, false, &service()),
            Some(MimeType::new("text/x-python"))
        );
    }

    #[test]
    fn name_guess_does_not_require_existence() {
        let temp = TempDir::new().unwrap();
        assert_eq!(
            classify(&temp.path().join("ghost.txt"), false, &service()),
            Some(MimeType::new("text/plain"))
        );
    }

    #[test]
    fn desktop_entry_declared_mime_type_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("doc.desktop");
        fs::write(
            &path,
            "[Desktop Entry]\nMimeType=application/x-custom;text/plain;\nURL=code.py\n",
        )
        .unwrap();
        assert_eq!(
            classify(&path, true, &service()),
            Some(MimeType::new("application/x-custom"))
        );
    }

    #[test]
    fn desktop_entry_url_redirects_classification() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("E.desktop");
        fs::write(&path, "[Desktop Entry]\nName=Python Script\nURL=code.py\n").unwrap();
        assert_eq!(
            classify(&path, true, &service()),
            Some(MimeType::new("text/x-python"))
        );
    }

    #[test]
    fn desktop_entry_absolute_url() {
        let temp = TempDir::new().unwrap();
        let elsewhere = temp.path().join("elsewhere");
        fs::create_dir(&elsewhere).unwrap();
        let path = temp.path().join("E.desktop");
        fs::write(
            &path,
            format!("[Desktop Entry]\nURL={}\n", elsewhere.join("notes.txt").display()),
        )
        .unwrap();
        assert_eq!(
            classify(&path, true, &service()),
            Some(MimeType::new("text/plain"))
        );
    }

    #[test]
    fn application_entry_is_desktop_type() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("launcher.desktop");
        fs::write(&path, "[Desktop Entry]\nType=Application\nExec=app\n").unwrap();
        assert_eq!(
            classify(&path, false, &service()),
            Some(MimeType::desktop_application())
        );
    }

    #[test]
    fn link_entry_is_not_supported() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("link.desktop");
        fs::write(&path, "[Desktop Entry]\nType=Link\nURL=http://x\n").unwrap();
        assert_eq!(classify(&path, false, &service()), None);
    }

    #[test]
    fn directory_classified_by_stat() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Project");
        fs::create_dir(&path).unwrap();
        assert_eq!(classify(&path, false, &service()), Some(MimeType::directory()));
    }

    #[test]
    fn vanished_file_is_unclassified() {
        let temp = TempDir::new().unwrap();
        assert_eq!(classify(&temp.path().join("nothing"), false, &service()), None);
    }

    #[test]
    fn regular_file_without_guess_is_unclassified() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("README");
        fs::write(&path, "hi").unwrap();
        assert_eq!(classify(&path, false, &service()), None);
    }

    #[test]
    fn uncertain_guess_falls_back_to_stat() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("data.bin");
        fs::write(&file, "x").unwrap();
        let dir = temp.path().join("folder.bin");
        fs::create_dir(&dir).unwrap();

        assert_eq!(classify(&file, false, &Uncertain), None);
        assert_eq!(classify(&dir, false, &Uncertain), Some(MimeType::directory()));
    }

    #[test]
    fn resolve_target_forms() {
        let base = Path::new("/t");
        assert_eq!(resolve_target(base, "a.txt"), PathBuf::from("/t/a.txt"));
        assert_eq!(resolve_target(base, "/abs/a.txt"), PathBuf::from("/abs/a.txt"));
        assert_eq!(
            resolve_target(base, "file:///abs/a.txt"),
            PathBuf::from("/abs/a.txt")
        );
    }

    #[test]
    fn resolve_target_decodes_file_uris() {
        assert_eq!(
            resolve_target(Path::new("/t"), "file:///home/me/My%20Doc.odt"),
            PathBuf::from("/home/me/My Doc.odt")
        );
    }

    #[test]
    fn redirect_through_encoded_uri_classifies_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("My Script.py");
        fs::write(&target, "").unwrap();
        let url = format!("file://{}", temp.path().join("My%20Script.py").display());
        let entry = temp.path().join("s.desktop");
        fs::write(&entry, format!("[Desktop Entry]\nURL={}\n", url)).unwrap();

        assert_eq!(
            classify(&entry, true, &service()),
            Some(MimeType::new("text/x-python"))
        );
    }
}
