use folio_core::{
    entry::{Entry, GroupPri, MemberType, Section, Trait},
    language::SrcLang,
    symbols::SymbolTable,
};
use folio_tagfile::{
    TagFile,
    error::ErrorCode,
    parse,
};

const WIDGETS: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<tagfile>
  <compound kind="class">
    <name>Widget</name>
    <filename>classWidget.html</filename>
    <templarg>T</templarg>
    <base protection="public">Object</base>
    <member kind="function">
      <type>void</type>
      <name>run</name>
      <anchorfile>classWidget.html</anchorfile>
      <anchor>a1b2c3</anchor>
      <arglist>(int count, const char *label) const</arglist>
    </member>
    <member kind="signal">
      <type>void</type>
      <name>clicked</name>
      <anchorfile>classWidget.html</anchorfile>
      <anchor>a4d5e6</anchor>
      <arglist>()</arglist>
    </member>
    <member kind="typedef">
      <type>int</type>
      <name>Handle</name>
      <anchorfile>classWidget.html</anchorfile>
      <anchor>a7f8a9</anchor>
      <arglist></arglist>
    </member>
  </compound>
  <compound kind="file">
    <name>widget.h</name>
    <path>src/ui/</path>
    <filename>widget_8h.html</filename>
    <includes id="base_8h" name="base.h" local="yes" imported="no">base.h</includes>
    <member kind="define">
      <type></type>
      <name>WIDGET_VERSION</name>
      <anchorfile>widget_8h.html</anchorfile>
      <anchor>a0</anchor>
      <arglist></arglist>
    </member>
    <member kind="enumeration">
      <type></type>
      <name>Mode</name>
      <anchorfile>widget_8h.html</anchorfile>
      <anchor>a1</anchor>
      <arglist></arglist>
      <enumvalue file="widget_8h.html" anchor="a2">Fast</enumvalue>
      <enumvalue file="widget_8h.html" anchor="a3">Slow</enumvalue>
    </member>
  </compound>
  <compound kind="file">
    <name>base.h</name>
    <path>src/</path>
    <filename>base_8h.html</filename>
  </compound>
  <compound kind="group">
    <name>ui</name>
    <title>User Interface</title>
    <filename>group__ui.html</filename>
    <member kind="function">
      <type>void</type>
      <name>init_ui</name>
      <anchorfile>group__ui.html</anchorfile>
      <anchor>b1</anchor>
      <arglist>(void)</arglist>
    </member>
  </compound>
  <compound kind="page">
    <name>index</name>
    <title>Widgets</title>
    <filename>index</filename>
    <docanchor file="index" title="Getting started">getting_started</docanchor>
  </compound>
  <compound kind="page">
    <name>changes</name>
    <title>Change Log</title>
    <filename>changes.html</filename>
  </compound>
</tagfile>
"#;

fn merge(tag_file: &mut TagFile) -> (Entry, SymbolTable) {
    let mut root = Entry::root();
    let mut symbols = SymbolTable::new();
    tag_file.build_lists(&mut root, &mut symbols);
    (root, symbols)
}

#[test]
fn test_merge_order_and_sections() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (root, _) = merge(&mut tag_file);

    let sections: Vec<_> = root.children().iter().map(|e| e.section).collect();
    assert_eq!(
        sections,
        [
            Section::Class,
            Section::Header,
            Section::Header,
            Section::GroupDoc,
            Section::MainPageDoc,
            Section::PageDoc,
        ]
    );
}

#[test]
fn test_class_entry() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (root, _) = merge(&mut tag_file);

    let widget = root.find_child("Widget").unwrap();
    assert!(widget.traits.is_empty());
    assert_eq!(widget.lang, SrcLang::Unknown);

    let tag_info = widget.tag_info.as_ref().unwrap();
    assert_eq!(tag_info.tag_name, "widgets.tag");
    assert_eq!(tag_info.file_name, "classWidget.html");

    assert_eq!(widget.extends.len(), 1);
    assert_eq!(widget.extends[0].name, "Object");

    assert_eq!(widget.template_arg_lists.len(), 1);
    let targs = widget.template_arg_lists[0].args();
    assert_eq!(targs.len(), 1);
    assert_eq!(targs[0].ty, "class");
    assert_eq!(targs[0].name, "T");
}

#[test]
fn test_member_entries() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (root, _) = merge(&mut tag_file);
    let widget = root.find_child("Widget").unwrap();

    let run = widget.find_child("run").unwrap();
    assert_eq!(run.section, Section::Function);
    assert_eq!(run.member_type, MemberType::Method);
    assert_eq!(run.ty, "void");
    assert_eq!(run.args, "(int count, const char *label) const");
    let arg_list = run.arg_list.as_ref().unwrap();
    assert_eq!(arg_list.len(), 2);
    assert!(arg_list.is_const());
    let tag_info = run.tag_info.as_ref().unwrap();
    assert_eq!(tag_info.file_name, "classWidget.html");
    assert_eq!(tag_info.anchor, "a1b2c3");

    let clicked = widget.find_child("clicked").unwrap();
    assert_eq!(clicked.section, Section::Function);
    assert_eq!(clicked.member_type, MemberType::Signal);

    let handle = widget.find_child("Handle").unwrap();
    assert_eq!(handle.section, Section::Variable);
    assert_eq!(handle.ty, "typedef int");
    assert!(handle.arg_list.is_none());
}

#[test]
fn test_file_members_and_enum_values() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (root, _) = merge(&mut tag_file);

    let file = root.find_child("widget.h").unwrap();
    assert_eq!(file.file_name, "widgets.tag:src/ui/widget.h");

    let define = file.find_child("WIDGET_VERSION").unwrap();
    assert_eq!(define.section, Section::Define);
    assert_eq!(define.ty, "#define");
    assert_eq!(define.file_name, "widgets.tag:src/ui/widget.h");

    let mode = file.find_child("Mode").unwrap();
    assert_eq!(mode.section, Section::Enum);
    assert!(mode.traits.has(Trait::Strong));
    let values: Vec<_> = mode.children().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(values, ["Fast", "Slow"]);
    assert_eq!(mode.children()[0].ty, "@");
    assert_eq!(mode.children()[0].section, Section::Variable);
    assert_eq!(mode.children()[1].tag_info.as_ref().unwrap().anchor, "a3");
}

#[test]
fn test_group_members_and_pages() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (root, symbols) = merge(&mut tag_file);

    let group = root.find_child("ui").unwrap();
    assert_eq!(group.ty, "User Interface");
    let init = group.find_child("init_ui").unwrap();
    assert_eq!(init.groups.len(), 1);
    assert_eq!(init.groups[0].group_name, "ui");
    assert_eq!(init.groups[0].pri, GroupPri::InGroup);

    let main_page = root.find_child("index").unwrap();
    assert_eq!(main_page.section, Section::MainPageDoc);
    assert_eq!(main_page.args, "Widgets");
    assert_eq!(main_page.anchors.len(), 1);

    let anchor = symbols.anchor("getting_started").unwrap();
    assert_eq!(anchor.title, "Getting started");
    assert_eq!(anchor.tag_name, "widgets.tag");

    let changes = root.find_child("changes").unwrap();
    assert_eq!(changes.section, Section::PageDoc);
}

#[test]
fn test_protocol_name_gets_suffix() {
    let source = concat!(
        r#"<tagfile><compound kind="protocol" objc="yes"><name>Drawable</name>"#,
        r#"<filename>protocolDrawable-p.html</filename></compound></tagfile>"#
    );
    let mut tag_file = parse(source, "app.tag").unwrap();
    let (root, _) = merge(&mut tag_file);

    let protocol = &root.children()[0];
    assert_eq!(protocol.name, "Drawable-p");
    assert!(protocol.traits.has(Trait::Protocol));
    assert_eq!(protocol.lang, SrcLang::ObjC);
}

#[test]
fn test_same_file_name_in_two_tag_files() {
    let first = concat!(
        r#"<tagfile><compound kind="file"><name>foo.h</name><path>a/</path>"#,
        r#"<filename>foo_8h.html</filename></compound></tagfile>"#
    );
    let second = concat!(
        r#"<tagfile><compound kind="file"><name>foo.h</name><path>b/</path>"#,
        r#"<filename>foo_8h.html</filename></compound></tagfile>"#
    );

    let mut root = Entry::root();
    let mut symbols = SymbolTable::new();
    for (source, name) in [(first, "one.tag"), (second, "two.tag")] {
        let mut tag_file = parse(source, name).unwrap();
        tag_file.build_lists(&mut root, &mut symbols);
    }

    assert_eq!(symbols.file_count(), 2);
    let bucket = symbols.find_file_name("foo.h").unwrap();
    assert_eq!(bucket.files().len(), 2);
    assert_eq!(bucket.full_name(), "one.tag:a/foo.h");

    let paths: Vec<_> = bucket
        .files()
        .iter()
        .map(|&id| symbols.file(id).path())
        .collect();
    assert_eq!(paths, ["one.tag:a/", "two.tag:b/"]);
}

#[test]
fn test_include_resolution() {
    let mut tag_file = parse(WIDGETS, "widgets.tag").unwrap();
    let (_, mut symbols) = merge(&mut tag_file);
    tag_file.add_includes(&mut symbols);
    assert!(tag_file.warnings().is_empty());

    let widget_h = symbols.find_file_name("widget.h").unwrap().files()[0];
    let includes = symbols.file(widget_h).includes();
    assert_eq!(includes.len(), 1);
    assert_eq!(includes[0].text, "base.h");
    assert!(includes[0].is_local);

    let target = symbols.file(includes[0].target);
    assert_eq!(target.name(), "base.h");
    assert_eq!(target.output_file_base(), "base_8h");
}

#[test]
fn test_unresolved_include_is_skipped() {
    let source = r#"<tagfile>
  <compound kind="file">
    <name>a.h</name><path>src/</path><filename>a_8h.html</filename>
    <includes id="missing_8h" name="missing.h" local="yes">missing.h</includes>
    <includes id="b_8h" name="b.h" local="yes">b.h</includes>
  </compound>
  <compound kind="file"><name>b.h</name><path>src/</path><filename>b_8h.html</filename></compound>
</tagfile>"#;
    let mut tag_file = parse(source, "a.tag").unwrap();
    let (_, mut symbols) = merge(&mut tag_file);

    tag_file.add_includes(&mut symbols);

    let warnings = tag_file.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::T200));
    assert_eq!(
        warnings[0].message(),
        "`a.h` includes `missing.h`, which no imported tag file declares"
    );
    let span = warnings[0].labels()[0].span();
    assert!(source[span.start()..span.end()].starts_with("<includes id=\"missing_8h\""));

    let a_h = symbols.find_file_name("a.h").unwrap().files()[0];
    let includes = symbols.file(a_h).includes();
    assert_eq!(includes.len(), 1);
    assert_eq!(symbols.file(includes[0].target).name(), "b.h");
}

#[test]
fn test_duplicate_anchor_is_a_warning() {
    let source = r#"<tagfile>
  <compound kind="page"><name>a</name><filename>a.html</filename>
    <docanchor file="a.html">intro</docanchor></compound>
  <compound kind="page"><name>b</name><filename>b.html</filename>
    <docanchor file="b.html">intro</docanchor></compound>
</tagfile>"#;
    let mut tag_file = parse(source, "docs.tag").unwrap();
    assert!(tag_file.warnings().is_empty());
    let (root, symbols) = merge(&mut tag_file);

    assert_eq!(symbols.anchor("intro").unwrap().file_name, "a.html");
    assert_eq!(root.find_child("a").unwrap().anchors.len(), 1);
    assert!(root.find_child("b").unwrap().anchors.is_empty());

    let warnings = tag_file.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::T201));
    assert_eq!(warnings[0].help(), Some("the label is already registered for `a.html`"));

    let labels = warnings[0].labels();
    assert_eq!(labels.len(), 2);
    assert!(labels[0].is_primary());
    assert!(labels[1].is_secondary());
    assert_eq!(labels[1].message(), "first declared here");
    let first = labels[1].span();
    assert!(source[first.start()..first.end()].starts_with("<docanchor file=\"a.html\""));
}

#[test]
fn test_duplicate_anchor_from_another_tag_file() {
    let first = concat!(
        r#"<tagfile><compound kind="page"><name>a</name><filename>a.html</filename>"#,
        r#"<docanchor file="a.html">intro</docanchor></compound></tagfile>"#
    );
    let second = concat!(
        r#"<tagfile><compound kind="page"><name>b</name><filename>b.html</filename>"#,
        r#"<docanchor file="b.html">intro</docanchor></compound></tagfile>"#
    );

    let mut root = Entry::root();
    let mut symbols = SymbolTable::new();
    let mut one = parse(first, "one.tag").unwrap();
    one.build_lists(&mut root, &mut symbols);
    let mut two = parse(second, "two.tag").unwrap();
    two.build_lists(&mut root, &mut symbols);

    assert!(one.warnings().is_empty());
    let warnings = two.warnings();
    assert_eq!(warnings.len(), 1);
    // The first declaration lives in another source, so only the duplicate is labelled.
    assert_eq!(warnings[0].labels().len(), 1);
}
