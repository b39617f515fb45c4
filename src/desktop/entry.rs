//! Desktop entry parsing.

use crate::error::{Result, StencilError};
use std::collections::HashMap;
use std::path::Path;

/// The group every desktop entry key is read from.
pub const DESKTOP_GROUP: &str = "Desktop Entry";

/// File name suffix marking a desktop entry.
pub const DESKTOP_SUFFIX: &str = ".desktop";

/// Parsed `[Desktop Entry]` group of a desktop entry file.
///
/// # Supported Format
///
/// - Groups: `[Group Name]`
/// - Keys: `Key=value`, whitespace around `=` ignored
/// - Localized keys: `Name[de]=Vorlage`
/// - Comments: `# comment`
/// - Escapes in values: `\s`, `\n`, `\t`, `\r`, `\\`
///
/// # Example
///
/// ```
/// use stencil::desktop::DesktopEntry;
///
/// let entry = DesktopEntry::parse(r#"
/// [Desktop Entry]
/// Name=Python Script
/// Name[de]=Python-Skript
/// URL=code.py
/// Hidden=false
/// "#).unwrap();
///
/// assert_eq!(entry.string("URL").as_deref(), Some("code.py"));
/// assert_eq!(entry.boolean("Hidden"), Some(false));
/// assert_eq!(
///     entry.locale_string("Name", &["de".to_string()]).as_deref(),
///     Some("Python-Skript")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    keys: HashMap<String, String>,
}

impl DesktopEntry {
    /// Parse desktop entry content.
    ///
    /// Fails when a key appears before any group header, when a group
    /// header is unterminated, or when a line is neither a comment, a group
    /// header nor a `key=value` pair. A file without a `[Desktop Entry]`
    /// group parses successfully and has no keys.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let mut keys = HashMap::new();
        let mut group: Option<&str> = None;

        for (number, raw) in content.lines().enumerate() {
            let line = raw.trim_start();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let name = rest.trim_end().strip_suffix(']').ok_or_else(|| {
                    anyhow::anyhow!("line {} has an unterminated group name", number + 1)
                })?;
                group = Some(name);
                continue;
            }

            let Some(current) = group else {
                anyhow::bail!("key file does not start with a group");
            };

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("line {} is not a key-value pair", number + 1))?;

            if current == DESKTOP_GROUP {
                keys.insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Ok(Self { keys })
    }

    /// Load and parse a desktop entry from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| StencilError::DesktopEntryParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get an unescaped string value.
    pub fn string(&self, key: &str) -> Option<String> {
        self.keys.get(key).map(|v| unescape(v))
    }

    /// Get a localized string, trying each locale variant in order before
    /// falling back to the unlocalized key.
    pub fn locale_string(&self, key: &str, locales: &[String]) -> Option<String> {
        locales
            .iter()
            .find_map(|locale| self.string(&format!("{}[{}]", key, locale)))
            .or_else(|| self.string(key))
    }

    /// Get a boolean value. Values other than `true`/`false`/`1`/`0` yield `None`.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        match self.keys.get(key)?.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        }
    }
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('s') => out.push(' '),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }

    out
}

/// Locale variants for localized keys, most specific first.
///
/// Read from `LC_ALL`, `LC_MESSAGES` and `LANG` (first non-empty wins). A
/// locale such as `de_DE.UTF-8@euro` expands to `de_DE@euro`, `de_DE`,
/// `de@euro`, `de`. The `C` and `POSIX` locales have no variants.
pub fn current_locales() -> Vec<String> {
    let locale = ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty());

    match locale {
        Some(locale) => locale_variants(&locale),
        None => Vec::new(),
    }
}

fn locale_variants(locale: &str) -> Vec<String> {
    if locale == "C" || locale == "POSIX" {
        return Vec::new();
    }

    let (rest, modifier) = match locale.split_once('@') {
        Some((rest, modifier)) => (rest, Some(modifier)),
        None => (locale, None),
    };
    let rest = rest.split('.').next().unwrap_or(rest);
    let (lang, country) = match rest.split_once('_') {
        Some((lang, country)) => (lang, Some(country)),
        None => (rest, None),
    };

    let mut variants = Vec::new();
    if let (Some(country), Some(modifier)) = (country, modifier) {
        variants.push(format!("{}_{}@{}", lang, country, modifier));
    }
    if let Some(country) = country {
        variants.push(format!("{}_{}", lang, country));
    }
    if let Some(modifier) = modifier {
        variants.push(format!("{}@{}", lang, modifier));
    }
    variants.push(lang.to_string());
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parse_reads_desktop_group_only() {
        let entry = DesktopEntry::parse(
            "[Desktop Entry]\nName=Text\n[Desktop Action new]\nName=Other\n",
        )
        .unwrap();
        assert_eq!(entry.string("Name").as_deref(), Some("Text"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let entry =
            DesktopEntry::parse("# header\n\n[Desktop Entry]\n  # indented\nIcon=x-office\n")
                .unwrap();
        assert_eq!(entry.string("Icon").as_deref(), Some("x-office"));
    }

    #[test]
    fn parse_trims_whitespace_around_equals() {
        let entry = DesktopEntry::parse("[Desktop Entry]\nExec = gedit %f\n").unwrap();
        assert_eq!(entry.string("Exec").as_deref(), Some("gedit %f"));
    }

    #[test]
    fn parse_keeps_equals_in_value() {
        let entry = DesktopEntry::parse("[Desktop Entry]\nExec=env A=B app\n").unwrap();
        assert_eq!(entry.string("Exec").as_deref(), Some("env A=B app"));
    }

    #[test]
    fn parse_rejects_key_before_group() {
        assert!(DesktopEntry::parse("Name=Orphan\n[Desktop Entry]\n").is_err());
    }

    #[test]
    fn parse_rejects_unterminated_group() {
        assert!(DesktopEntry::parse("[Desktop Entry\nName=x\n").is_err());
    }

    #[test]
    fn parse_rejects_line_without_equals() {
        assert!(DesktopEntry::parse("[Desktop Entry]\ngarbage\n").is_err());
    }

    #[test]
    fn parse_without_desktop_group_has_no_keys() {
        let entry = DesktopEntry::parse("[Something Else]\nName=x\n").unwrap();
        assert_eq!(entry, DesktopEntry::default());
    }

    #[test]
    fn string_unescapes_values() {
        let entry = DesktopEntry::parse("[Desktop Entry]\nComment=a\\sb\\nc\\\\d\n").unwrap();
        assert_eq!(entry.string("Comment").as_deref(), Some("a b\nc\\d"));
    }

    #[test]
    fn boolean_values() {
        let entry =
            DesktopEntry::parse("[Desktop Entry]\nA=true\nB=0\nC=yes\n").unwrap();
        assert_eq!(entry.boolean("A"), Some(true));
        assert_eq!(entry.boolean("B"), Some(false));
        assert_eq!(entry.boolean("C"), None);
        assert_eq!(entry.boolean("Missing"), None);
    }

    #[test]
    fn locale_string_prefers_most_specific() {
        let entry = DesktopEntry::parse(
            "[Desktop Entry]\nName=Document\nName[de]=Dokument\nName[de_AT]=Dokument (AT)\n",
        )
        .unwrap();
        let locales = locale_variants("de_AT.UTF-8");
        assert_eq!(
            entry.locale_string("Name", &locales).as_deref(),
            Some("Dokument (AT)")
        );
        let locales = locale_variants("de_CH");
        assert_eq!(entry.locale_string("Name", &locales).as_deref(), Some("Dokument"));
        let locales = locale_variants("fr_FR");
        assert_eq!(entry.locale_string("Name", &locales).as_deref(), Some("Document"));
    }

    #[test]
    fn locale_variants_order() {
        assert_eq!(
            locale_variants("sr_RS.UTF-8@latin"),
            vec!["sr_RS@latin", "sr_RS", "sr@latin", "sr"]
        );
        assert_eq!(locale_variants("en"), vec!["en"]);
        assert!(locale_variants("C").is_empty());
    }

    #[test]
    fn load_reports_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.desktop");
        fs::write(&path, "not a key file").unwrap();

        let err = DesktopEntry::load(&path).unwrap_err();
        assert!(matches!(err, StencilError::DesktopEntryParse { .. }));
        assert!(err.to_string().contains("broken.desktop"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = DesktopEntry::load(&temp.path().join("gone.desktop")).unwrap_err();
        assert!(matches!(err, StencilError::Io(_)));
    }
}
