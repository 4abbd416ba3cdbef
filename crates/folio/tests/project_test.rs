//! Integration tests for the Project API

use std::{fs, path::PathBuf};

use folio::{
    FolioError, Project,
    config::{AppConfig, GraphConfig, HtmlConfig, TagFileConfig, TagFileSource},
    html::HtmlRenderer,
};
use folio_tagfile::error::ErrorCode;

const WIDGETS: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<tagfile>
  <compound kind="class">
    <name>Widget</name>
    <filename>classWidget.html</filename>
  </compound>
  <compound kind="namespace">
    <name>ui</name>
    <filename>namespaceui.html</filename>
  </compound>
  <compound kind="file">
    <name>widget.h</name>
    <path>src/ui/</path>
    <filename>widget_8h.html</filename>
    <includes id="base_8h" name="base.h" local="yes" imported="no">base.h</includes>
  </compound>
  <compound kind="page">
    <name>intro</name>
    <title>Introduction</title>
    <filename>intro.html</filename>
  </compound>
</tagfile>"#;

const BASE: &str = r#"<tagfile>
  <compound kind="file">
    <name>base.h</name>
    <path>src/</path>
    <filename>base_8h.html</filename>
  </compound>
</tagfile>"#;

fn config_with_destination(tag: &str, destination: &str) -> AppConfig {
    let tagfiles = TagFileConfig::new(vec![TagFileSource {
        path: PathBuf::from(tag),
        destination: destination.to_string(),
    }]);
    AppConfig::new(HtmlConfig::default(), GraphConfig::default(), tagfiles)
}

#[test]
fn test_import_and_resolve() {
    let mut project = Project::new(AppConfig::default());
    project
        .import_tag_source(WIDGETS, "widgets.tag")
        .expect("Failed to import widgets");
    project
        .import_tag_source(BASE, "base.tag")
        .expect("Failed to import base");
    project.resolve_includes();

    assert_eq!(project.tag_files().len(), 2);
    assert!(project.tag_files()[0].warnings().is_empty());
    assert!(project.root().find_child("Widget").is_some());
    assert_eq!(project.symbols().file_count(), 2);
}

#[test]
fn test_unresolved_include_still_renders_index() {
    let mut project = Project::new(AppConfig::default());
    project
        .import_tag_source(WIDGETS, "widgets.tag")
        .expect("Failed to import widgets");

    project.resolve_includes();

    let warnings = project.tag_files()[0].warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::T200));

    let widget_h = project.symbols().find_file_name("widget.h").unwrap().files()[0];
    assert!(project.symbols().file(widget_h).includes().is_empty());

    let mut renderer = HtmlRenderer::new(&AppConfig::default());
    let html = project.render_index(&mut renderer);
    assert!(html.contains("widget_8h.html"), "{html}");
}

#[test]
fn test_malformed_tag_file_is_isolated() {
    let mut project = Project::new(AppConfig::default());
    project
        .import_tag_source(WIDGETS, "widgets.tag")
        .expect("Failed to import widgets");

    let result = project.import_tag_source("<tagfile><compound></tagfile>", "broken.tag");
    match result {
        Err(FolioError::TagFile { name, src, .. }) => {
            assert_eq!(name, "broken.tag");
            assert!(src.starts_with("<tagfile>"));
        }
        other => panic!("expected a tag-file error, got {:?}", other.err()),
    }

    assert_eq!(project.tag_files().len(), 1);
    assert_eq!(project.root().children().len(), 4);
}

#[test]
fn test_import_tag_file_from_disk() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("base.tag");
    fs::write(&path, BASE).expect("Failed to write tag file");

    let mut project = Project::new(AppConfig::default());
    let tag_file = project.import_tag_file(&path).expect("Failed to import");
    assert_eq!(tag_file.tag_name(), "base.tag");

    let missing = project.import_tag_file(&dir.path().join("missing.tag"));
    assert!(matches!(missing, Err(FolioError::Io(_))));
}

#[test]
fn test_render_index_links_to_destination() {
    let config = config_with_destination("docs/widgets.tag", "https://docs.example.com/widgets");
    let mut project = Project::new(config.clone());
    project
        .import_tag_source(WIDGETS, "widgets.tag")
        .expect("Failed to import widgets");

    let mut renderer = HtmlRenderer::new(&config);
    let html = project.render_index(&mut renderer);

    assert!(html.starts_with("<h2><a class=\"anchor\" id=\"classes\"></a>\nClasses</h2>\n<ul>\n"));
    assert!(html.contains(
        "<li><a class=\"elRef\" doxygen=\"widgets.tag:https://docs.example.com/widgets/\" \
         href=\"https://docs.example.com/widgets/classWidget.html\">Widget</a></li>\n"
    ));
    assert!(html.contains(">Introduction</a>"));
    assert!(html.contains("id=\"namespaces\""));
    assert!(html.contains("id=\"files\""));
}

#[test]
fn test_render_index_without_destination() {
    let mut project = Project::new(AppConfig::default());
    project
        .import_tag_source(BASE, "base.tag")
        .expect("Failed to import base");

    let mut renderer = HtmlRenderer::new(project.config());
    let html = project.render_index(&mut renderer);

    assert_eq!(
        html,
        "<h2><a class=\"anchor\" id=\"files\"></a>\nFiles</h2>\n<ul>\n\
         <li><a class=\"elRef\" href=\"base_8h.html\">base.h</a></li>\n</ul>\n"
    );
}
