//! Configuration types for Folio rendering and tag-file import.
//!
//! All types implement [`serde::Deserialize`] and every section falls back to
//! its defaults when missing, so an empty TOML document is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`HtmlConfig`] - Output directory, link extension and formula rendering.
//! - [`GraphConfig`] - Image format, scratch-file cleanup and external tool paths.
//! - [`TagFileConfig`] - Tag files to import and where their documentation lives.
//!
//! # Example
//!
//! ```
//! # use folio::config::{AppConfig, ImageFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.html().file_extension(), ".html");
//! assert_eq!(config.graphs().image_format(), ImageFormat::Png);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTML output section.
    #[serde(default)]
    html: HtmlConfig,

    /// Graph rendering section.
    #[serde(default)]
    graphs: GraphConfig,

    /// Tag-file import section.
    #[serde(default)]
    tagfiles: TagFileConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(html: HtmlConfig, graphs: GraphConfig, tagfiles: TagFileConfig) -> Self {
        Self {
            html,
            graphs,
            tagfiles,
        }
    }

    /// Returns the HTML configuration.
    pub fn html(&self) -> &HtmlConfig {
        &self.html
    }

    /// Returns the graph rendering configuration.
    pub fn graphs(&self) -> &GraphConfig {
        &self.graphs
    }

    /// Returns the tag-file configuration.
    pub fn tagfiles(&self) -> &TagFileConfig {
        &self.tagfiles
    }
}

/// HTML output settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    output_dir: PathBuf,
    file_extension: String,
    use_mathjax: bool,
    ext_links_in_window: bool,
}

impl HtmlConfig {
    /// Creates a new [`HtmlConfig`].
    ///
    /// # Arguments
    ///
    /// * `output_dir` - Directory that receives rendered images and scratch files.
    /// * `file_extension` - Extension appended to link targets, including the dot.
    pub fn new(output_dir: impl Into<PathBuf>, file_extension: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_extension: file_extension.into(),
            ..Self::default()
        }
    }

    /// Render formulas as TeX for MathJax instead of bitmaps.
    pub fn with_mathjax(mut self, use_mathjax: bool) -> Self {
        self.use_mathjax = use_mathjax;
        self
    }

    /// Open links into tag-file documentation in a new window.
    pub fn with_ext_links_in_window(mut self, in_window: bool) -> Self {
        self.ext_links_in_window = in_window;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_extension(&self) -> &str {
        &self.file_extension
    }

    pub fn use_mathjax(&self) -> bool {
        self.use_mathjax
    }

    pub fn ext_links_in_window(&self) -> bool {
        self.ext_links_in_window
    }
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("html"),
            file_extension: ".html".to_string(),
            use_mathjax: false,
            ext_links_in_window: false,
        }
    }
}

/// Target format of rendered diagrams.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

/// Graph rendering settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    image_format: ImageFormat,
    cleanup: bool,
    dot: PathBuf,
    mscgen: PathBuf,
    dia: PathBuf,
    java: PathBuf,
    plantuml_jar: Option<PathBuf>,
}

impl GraphConfig {
    pub fn with_image_format(mut self, image_format: ImageFormat) -> Self {
        self.image_format = image_format;
        self
    }

    /// Keep or delete the scratch sources of inline diagrams after rendering.
    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    pub fn cleanup(&self) -> bool {
        self.cleanup
    }

    pub fn dot(&self) -> &Path {
        &self.dot
    }

    pub fn mscgen(&self) -> &Path {
        &self.mscgen
    }

    pub fn dia(&self) -> &Path {
        &self.dia
    }

    pub fn java(&self) -> &Path {
        &self.java
    }

    pub fn plantuml_jar(&self) -> Option<&Path> {
        self.plantuml_jar.as_deref()
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            image_format: ImageFormat::Png,
            cleanup: true,
            dot: PathBuf::from("dot"),
            mscgen: PathBuf::from("mscgen"),
            dia: PathBuf::from("dia"),
            java: PathBuf::from("java"),
            plantuml_jar: None,
        }
    }
}

/// One tag file to import.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagFileSource {
    /// Location of the tag file on disk.
    pub path: PathBuf,

    /// URL prefix of the documentation the tag file describes.
    #[serde(default)]
    pub destination: String,
}

/// Tag-file import settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TagFileConfig {
    full_path_names: bool,
    files: Vec<TagFileSource>,
}

impl TagFileConfig {
    pub fn new(files: Vec<TagFileSource>) -> Self {
        Self {
            full_path_names: false,
            files,
        }
    }

    /// Sort file-name buckets by full path instead of base name.
    pub fn with_full_path_names(mut self, full_path_names: bool) -> Self {
        self.full_path_names = full_path_names;
        self
    }

    pub fn full_path_names(&self) -> bool {
        self.full_path_names
    }

    pub fn files(&self) -> &[TagFileSource] {
        &self.files
    }

    /// Destination registered for the tag file named `tag_name`.
    ///
    /// Tag files are matched by file name, so `doc/qt.tag` and `qt.tag`
    /// resolve to the same destination.
    pub fn destination(&self, tag_name: &str) -> Option<&str> {
        let wanted = Path::new(tag_name).file_name()?;
        self.files
            .iter()
            .find(|source| source.path.file_name() == Some(wanted))
            .map(|source| source.destination.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.html().output_dir(), Path::new("html"));
        assert_eq!(config.html().file_extension(), ".html");
        assert!(!config.html().use_mathjax());
        assert!(config.graphs().cleanup());
        assert_eq!(config.graphs().dot(), Path::new("dot"));
        assert!(config.graphs().plantuml_jar().is_none());
        assert!(config.tagfiles().files().is_empty());
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [html]
            use_mathjax = true

            [graphs]
            image_format = "svg"
            cleanup = false

            [[tagfiles.files]]
            path = "doc/qt.tag"
            destination = "https://doc.qt.io/qt-6"
            "#,
        )
        .unwrap();

        assert!(config.html().use_mathjax());
        assert_eq!(config.html().file_extension(), ".html");
        assert_eq!(config.graphs().image_format(), ImageFormat::Svg);
        assert!(!config.graphs().cleanup());
        assert_eq!(
            config.tagfiles().destination("qt.tag"),
            Some("https://doc.qt.io/qt-6")
        );
        assert_eq!(config.tagfiles().destination("boost.tag"), None);
    }

    #[test]
    fn test_invalid_image_format_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[graphs]\nimage_format = \"gif\"\n");
        assert!(result.is_err());
    }
}
