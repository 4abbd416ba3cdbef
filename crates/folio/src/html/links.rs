//! Link targets for local and tag-file documentation.

use std::path::Path;

use indexmap::IndexMap;
use log::debug;

use crate::config::TagFileConfig;

const URL_SCHEMES: &[&str] = &[
    "http:", "https:", "ftp:", "ftps:", "sftp:", "file:", "news:", "irc:", "ircs:",
];

/// Whether `url` carries one of the schemes that make it absolute.
pub fn is_url(url: &str) -> bool {
    let url = url.trim();
    URL_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

/// Prefix a relative `url` with `rel_path`; absolute URLs are left alone.
pub fn correct_url(url: &str, rel_path: &str) -> String {
    if rel_path.is_empty() || is_url(url) {
        url.to_string()
    } else {
        format!("{rel_path}{url}")
    }
}

/// Where the documentation described by each imported tag file lives.
///
/// Tag files are keyed by file name, so a reference recorded as
/// `doc/qt.tag` finds the destination configured for `qt.tag`.
#[derive(Debug, Clone, Default)]
pub struct ExternalLinks {
    destinations: IndexMap<String, String>,
    open_in_window: bool,
}

impl ExternalLinks {
    pub fn new(open_in_window: bool) -> Self {
        Self {
            destinations: IndexMap::new(),
            open_in_window,
        }
    }

    /// Build the destination table from the configured tag files.
    pub fn from_config(tagfiles: &TagFileConfig, open_in_window: bool) -> Self {
        let mut links = Self::new(open_in_window);
        for source in tagfiles.files() {
            links.add_destination(&source.path.to_string_lossy(), &source.destination);
        }
        links
    }

    pub fn add_destination(&mut self, tag_name: &str, destination: &str) {
        let key = tag_key(tag_name);
        debug!(tag_file = key.as_str(), destination; "Registered tag destination");
        self.destinations.insert(key, destination.to_string());
    }

    pub fn destination(&self, tag_name: &str) -> Option<&str> {
        self.destinations
            .get(&tag_key(tag_name))
            .map(String::as_str)
    }

    /// `target="_blank" ` when external links open in their own window.
    pub fn link_target(&self) -> &'static str {
        if self.open_in_window {
            "target=\"_blank\" "
        } else {
            ""
        }
    }

    /// The prefix a link into `reference` needs.
    ///
    /// With `href` set this is the URL prefix (`dest/`); otherwise it is
    /// the `doxygen="tag:dest/" ` marker attribute. A local link
    /// (empty `reference`) is prefixed by `rel_path` alone, and a tag file
    /// without a destination yields nothing.
    pub fn external_ref(&self, rel_path: &str, reference: &str, href: bool) -> String {
        if reference.is_empty() {
            return rel_path.to_string();
        }
        let Some(destination) = self.destination(reference) else {
            return String::new();
        };

        let mut result = String::new();
        if !href {
            result.push_str("doxygen=\"");
            result.push_str(reference);
            result.push(':');
        }
        if !rel_path.is_empty() && destination.starts_with('.') {
            result.push_str(rel_path);
        }
        result.push_str(destination);
        if !destination.is_empty() && !destination.ends_with('/') {
            result.push('/');
        }
        if !href {
            result.push_str("\" ");
        }
        result
    }
}

fn tag_key(tag_name: &str) -> String {
    Path::new(tag_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| tag_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com"));
        assert!(is_url("  ftp://host/file"));
        assert!(!is_url("images/logo.png"));
        assert!(!is_url("mailto:a@b.co"));
    }

    #[test]
    fn test_correct_url() {
        assert_eq!(correct_url("logo.png", "../"), "../logo.png");
        assert_eq!(correct_url("http://x.org/a.png", "../"), "http://x.org/a.png");
        assert_eq!(correct_url("logo.png", ""), "logo.png");
    }

    #[test]
    fn test_external_ref_local() {
        let links = ExternalLinks::default();
        assert_eq!(links.external_ref("../", "", true), "../");
        assert_eq!(links.external_ref("", "", false), "");
    }

    #[test]
    fn test_external_ref_with_destination() {
        let mut links = ExternalLinks::default();
        links.add_destination("doc/qt.tag", "https://doc.qt.io/qt-6");

        assert_eq!(
            links.external_ref("", "qt.tag", true),
            "https://doc.qt.io/qt-6/"
        );
        assert_eq!(
            links.external_ref("", "qt.tag", false),
            "doxygen=\"qt.tag:https://doc.qt.io/qt-6/\" "
        );
    }

    #[test]
    fn test_external_ref_relative_destination() {
        let mut links = ExternalLinks::default();
        links.add_destination("base.tag", "./base/");
        assert_eq!(links.external_ref("../", "base.tag", true), "../../base/");
    }

    #[test]
    fn test_external_ref_unknown_tag_file() {
        let links = ExternalLinks::default();
        assert_eq!(links.external_ref("../", "missing.tag", true), "");
    }

    #[test]
    fn test_link_target() {
        assert_eq!(ExternalLinks::new(true).link_target(), "target=\"_blank\" ");
        assert_eq!(ExternalLinks::new(false).link_target(), "");
    }
}
