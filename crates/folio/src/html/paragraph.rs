//! Paragraph context classification.
//!
//! A paragraph is wrapped in `<p>` only where XHTML allows it and where the
//! extra vertical space looks right. These helpers decide, for a [`Composite::Para`]
//! node, whether it is the first and/or last child of its container and which
//! CSS class its opening tag carries.

use folio_core::doc::{
    Composite, DocNode, DocTree, ImageKind, Leaf, NodeId, Style, VerbatimKind,
};

/// CSS class written on a paragraph's opening tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphContext {
    #[default]
    None,
    StartListItem,
    StartDescription,
    EndListItem,
    EndDescription,
    StartTableCell,
    EndTableCell,
}

impl ParagraphContext {
    /// The attribute text following `<p`, with a leading space when present.
    pub fn class_attr(self) -> &'static str {
        match self {
            ParagraphContext::None => "",
            ParagraphContext::StartListItem => " class=\"startli\"",
            ParagraphContext::StartDescription => " class=\"startdd\"",
            ParagraphContext::EndListItem => " class=\"endli\"",
            ParagraphContext::EndDescription => " class=\"enddd\"",
            ParagraphContext::StartTableCell => " class=\"starttd\"",
            ParagraphContext::EndTableCell => " class=\"endtd\"",
        }
    }
}

/// Classification of one paragraph: its context class and whether it is the
/// first and last child of its container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParagraphPosition {
    pub context: ParagraphContext,
    pub is_first: bool,
    pub is_last: bool,
}

impl ParagraphPosition {
    /// Sole paragraph of its container; it never gets its own tags.
    pub fn is_alone(&self) -> bool {
        self.is_first && self.is_last
    }
}

/// Container groups that share a context class pair.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Group {
    ListItem,
    Description,
    TableCell,
}

impl Group {
    fn of(composite: &Composite) -> Option<Self> {
        match composite {
            Composite::HtmlListItem(_) | Composite::SecRefItem(_) => Some(Group::ListItem),
            Composite::HtmlDescData(_) | Composite::XRefItem(_) | Composite::SimpleSect(_) => {
                Some(Group::Description)
            }
            Composite::HtmlCell(_) | Composite::ParamList(_) => Some(Group::TableCell),
            _ => None,
        }
    }

    fn start(self) -> ParagraphContext {
        match self {
            Group::ListItem => ParagraphContext::StartListItem,
            Group::Description => ParagraphContext::StartDescription,
            Group::TableCell => ParagraphContext::StartTableCell,
        }
    }

    fn end(self) -> ParagraphContext {
        match self {
            Group::ListItem => ParagraphContext::EndListItem,
            Group::Description => ParagraphContext::EndDescription,
            Group::TableCell => ParagraphContext::EndTableCell,
        }
    }
}

/// Classify the paragraph `para` by the kind of its parent.
pub fn paragraph_context(tree: &DocTree, para: NodeId) -> ParagraphPosition {
    let Some(parent) = tree.parent(para) else {
        return ParagraphPosition::default();
    };
    let Some(parent_kind) = tree.node(parent).as_composite() else {
        return ParagraphPosition::default();
    };

    let is_first = is_first_child(tree, parent, para);
    let is_last = is_last_child(tree, parent, para);
    let by_position = |start: ParagraphContext, end: ParagraphContext| {
        let mut context = ParagraphContext::None;
        if is_first {
            context = start;
        }
        if is_last {
            context = end;
        }
        ParagraphPosition {
            context,
            is_first,
            is_last,
        }
    };

    match parent_kind {
        Composite::ParBlock => {
            // node -> para -> parblock -> para: the context follows `node`.
            let group = tree
                .parent(parent)
                .and_then(|outer_para| tree.parent(outer_para))
                .and_then(|node| tree.node(node).as_composite())
                .and_then(Group::of);
            match group {
                Some(group) => by_position(group.start(), group.end()),
                None => by_position(ParagraphContext::None, ParagraphContext::None),
            }
        }
        Composite::AutoListItem => ParagraphPosition {
            context: ParagraphContext::StartListItem,
            is_first,
            is_last,
        },
        Composite::SimpleListItem | Composite::ParamList(_) => ParagraphPosition {
            context: ParagraphContext::StartListItem,
            is_first: true,
            is_last: true,
        },
        Composite::SimpleSect(_) => {
            let mut position = by_position(
                ParagraphContext::StartDescription,
                ParagraphContext::EndDescription,
            );
            if is_separated_paragraph(tree, parent, para) {
                position.is_first = true;
                position.is_last = true;
            }
            position
        }
        kind => match Group::of(kind) {
            Some(group) => by_position(group.start(), group.end()),
            None => ParagraphPosition::default(),
        },
    }
}

/// Whether a paragraph inside a simple section is set apart by separators:
/// a first child followed by one, a last child preceded by one, or an
/// interior child with one on each side.
pub fn is_separated_paragraph(tree: &DocTree, sect: NodeId, para: NodeId) -> bool {
    let children = tree.children(sect);
    let Some(i) = children.iter().position(|&c| c == para) else {
        return false;
    };
    let count = children.len();
    let is_sep =
        |index: usize| matches!(tree.node(children[index]), DocNode::Leaf(Leaf::SimpleSectSep));

    if count > 1 && i == 0 {
        is_sep(1)
    } else if count > 1 && i == count - 1 {
        is_sep(i - 1)
    } else if count > 2 && i > 0 && i < count - 1 {
        is_sep(i - 1) && is_sep(i + 1)
    } else {
        false
    }
}

/// Block content that XHTML does not allow inside `<p>`.
pub fn must_be_outside_paragraph(node: &DocNode) -> bool {
    match node {
        DocNode::Composite(composite) => matches!(
            composite,
            Composite::HtmlList(_)
                | Composite::SimpleList
                | Composite::AutoList(_)
                | Composite::SimpleSect(_)
                | Composite::ParamSect(_)
                | Composite::HtmlDescList(_)
                | Composite::XRefItem(_)
                | Composite::HtmlTable(_)
                | Composite::Section(_)
                | Composite::HtmlHeader(_)
                | Composite::Internal
                | Composite::Image(_)
                | Composite::SecRefList
                | Composite::Copy
                | Composite::HtmlBlockQuote(_)
                | Composite::ParBlock
                | Composite::DotFile(_)
                | Composite::MscFile(_)
                | Composite::DiaFile(_)
        ),
        DocNode::Leaf(leaf) => match leaf {
            Leaf::Include(_) | Leaf::HorRuler => true,
            Leaf::Verbatim(verbatim) => {
                verbatim.kind != VerbatimKind::HtmlOnly || verbatim.is_block
            }
            Leaf::StyleChange(change) => {
                matches!(change.style, Style::Preformatted | Style::Div | Style::Center)
            }
            Leaf::Formula(formula) => !formula.is_inline(),
            _ => false,
        },
    }
}

/// Whether a paragraph's parent asks for explicit paragraph tags at all.
pub fn parent_needs_tag(tree: &DocTree, para: NodeId) -> bool {
    let Some(parent) = tree.parent(para) else {
        return false;
    };
    match tree.node(parent) {
        DocNode::Composite(Composite::Root { single_line }) => !single_line,
        DocNode::Composite(
            Composite::Section(_)
            | Composite::Internal
            | Composite::HtmlListItem(_)
            | Composite::HtmlDescData(_)
            | Composite::HtmlCell(_)
            | Composite::SimpleListItem
            | Composite::AutoListItem
            | Composite::SimpleSect(_)
            | Composite::XRefItem(_)
            | Composite::Copy
            | Composite::HtmlBlockQuote(_)
            | Composite::ParBlock,
        ) => true,
        _ => false,
    }
}

/// First child that is not white space.
pub fn first_non_white_space(tree: &DocTree, id: NodeId) -> Option<NodeId> {
    tree.children(id)
        .iter()
        .copied()
        .find(|&c| !tree.node(c).is_white_space())
}

/// Last child that is not white space.
pub fn last_non_white_space(tree: &DocTree, id: NodeId) -> Option<NodeId> {
    tree.children(id)
        .iter()
        .rev()
        .copied()
        .find(|&c| !tree.node(c).is_white_space())
}

/// Whether anything below `id` would produce visible output.
///
/// White space does not count, and neither does anything inside an image
/// targeting another output format.
pub fn has_visible_content(tree: &DocTree, id: NodeId) -> bool {
    tree.children(id).iter().any(|&child| match tree.node(child) {
        DocNode::Leaf(Leaf::WhiteSpace(_)) => false,
        DocNode::Leaf(_) => true,
        DocNode::Composite(Composite::Image(image)) => image.kind == ImageKind::Html,
        DocNode::Composite(_) => true,
    })
}

fn is_first_child(tree: &DocTree, parent: NodeId, child: NodeId) -> bool {
    tree.children(parent).first() == Some(&child)
}

fn is_last_child(tree: &DocTree, parent: NodeId, child: NodeId) -> bool {
    tree.children(parent).last() == Some(&child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::doc::{
        Formula, HtmlCell, Image, SimpleSect, SimpleSectKind, StyleChange, Verbatim,
    };

    fn sect_tree(layout: &[bool]) -> (DocTree, NodeId, Vec<NodeId>) {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let sect = tree.append(
            tree.root(),
            Composite::SimpleSect(SimpleSect {
                kind: SimpleSectKind::Note,
            }),
        );
        let nodes = layout
            .iter()
            .map(|&is_para| {
                if is_para {
                    tree.append(sect, Composite::Para)
                } else {
                    tree.append(sect, Leaf::SimpleSectSep)
                }
            })
            .collect();
        (tree, sect, nodes)
    }

    #[test]
    fn test_class_attr() {
        assert_eq!(ParagraphContext::None.class_attr(), "");
        assert_eq!(
            ParagraphContext::EndTableCell.class_attr(),
            " class=\"endtd\""
        );
    }

    #[test]
    fn test_root_paragraph_has_no_context() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let para = tree.append(tree.root(), Composite::Para);

        assert_eq!(paragraph_context(&tree, para), ParagraphPosition::default());
        assert!(parent_needs_tag(&tree, para));
    }

    #[test]
    fn test_list_item_first_and_last() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let item = tree.append(tree.root(), Composite::HtmlListItem(Vec::new()));
        let first = tree.append(item, Composite::Para);
        let middle = tree.append(item, Composite::Para);
        let last = tree.append(item, Composite::Para);

        let position = paragraph_context(&tree, first);
        assert_eq!(position.context, ParagraphContext::StartListItem);
        assert!(position.is_first && !position.is_last);

        let position = paragraph_context(&tree, middle);
        assert_eq!(position.context, ParagraphContext::None);
        assert!(!position.is_first && !position.is_last);

        assert_eq!(
            paragraph_context(&tree, last).context,
            ParagraphContext::EndListItem
        );
    }

    #[test]
    fn test_single_table_cell_paragraph_is_alone() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let cell = tree.append(
            tree.root(),
            Composite::HtmlCell(HtmlCell {
                is_heading: false,
                attribs: Vec::new(),
            }),
        );
        let para = tree.append(cell, Composite::Para);

        let position = paragraph_context(&tree, para);
        assert!(position.is_alone());
        assert_eq!(position.context, ParagraphContext::EndTableCell);
    }

    #[test]
    fn test_simple_list_item_is_always_alone() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let list = tree.append(tree.root(), Composite::SimpleList);
        let item = tree.append(list, Composite::SimpleListItem);
        let first = tree.append(item, Composite::Para);
        tree.append(item, Composite::Para);

        assert!(paragraph_context(&tree, first).is_alone());
    }

    #[test]
    fn test_par_block_takes_context_from_enclosing_node() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let data = tree.append(tree.root(), Composite::HtmlDescData(Vec::new()));
        let outer = tree.append(data, Composite::Para);
        let block = tree.append(outer, Composite::ParBlock);
        let first = tree.append(block, Composite::Para);
        let last = tree.append(block, Composite::Para);

        assert_eq!(
            paragraph_context(&tree, first).context,
            ParagraphContext::StartDescription
        );
        assert_eq!(
            paragraph_context(&tree, last).context,
            ParagraphContext::EndDescription
        );
    }

    #[test]
    fn test_separated_paragraphs() {
        // para sep para sep para
        let (tree, sect, nodes) = sect_tree(&[true, false, true, false, true]);
        assert!(is_separated_paragraph(&tree, sect, nodes[0]));
        assert!(is_separated_paragraph(&tree, sect, nodes[2]));
        assert!(is_separated_paragraph(&tree, sect, nodes[4]));

        let middle = paragraph_context(&tree, nodes[2]);
        assert!(middle.is_alone());
        assert_eq!(middle.context, ParagraphContext::None);
    }

    #[test]
    fn test_unseparated_paragraphs() {
        let (tree, sect, nodes) = sect_tree(&[true, true, true]);
        assert!(!is_separated_paragraph(&tree, sect, nodes[0]));
        assert!(!is_separated_paragraph(&tree, sect, nodes[1]));

        let first = paragraph_context(&tree, nodes[0]);
        assert_eq!(first.context, ParagraphContext::StartDescription);
        assert!(first.is_first && !first.is_last);
    }

    #[test]
    fn test_interior_paragraph_needs_separators_on_both_sides() {
        let (tree, sect, nodes) = sect_tree(&[true, false, true, true]);
        assert!(!is_separated_paragraph(&tree, sect, nodes[2]));
    }

    #[test]
    fn test_must_be_outside_paragraph() {
        assert!(must_be_outside_paragraph(&Leaf::HorRuler.into()));
        assert!(must_be_outside_paragraph(
            &Composite::HtmlTable(Vec::new()).into()
        ));
        assert!(must_be_outside_paragraph(
            &Leaf::Verbatim(Verbatim::new(VerbatimKind::Code, "x").inline()).into()
        ));
        assert!(!must_be_outside_paragraph(
            &Leaf::Verbatim(Verbatim::new(VerbatimKind::HtmlOnly, "x").inline()).into()
        ));
        assert!(must_be_outside_paragraph(
            &Leaf::StyleChange(StyleChange::new(Style::Center, true)).into()
        ));
        assert!(!must_be_outside_paragraph(
            &Leaf::StyleChange(StyleChange::new(Style::Bold, true)).into()
        ));
        assert!(must_be_outside_paragraph(
            &Leaf::Formula(Formula::new("form_0", "\\[ x \\]")).into()
        ));
        assert!(!must_be_outside_paragraph(
            &Leaf::Formula(Formula::new("form_1", "$x$")).into()
        ));
        assert!(!must_be_outside_paragraph(&Leaf::Word("w".into()).into()));
    }

    #[test]
    fn test_visible_content() {
        let mut tree = DocTree::new(Composite::Root { single_line: false });
        let empty = tree.append(tree.root(), Composite::Para);
        tree.append(empty, Leaf::WhiteSpace("  ".into()));
        let hidden = tree.append(tree.root(), Composite::Para);
        let image = tree.append(
            hidden,
            Composite::Image(Image {
                kind: ImageKind::Latex,
                name: "a.eps".into(),
                url: String::new(),
                rel_path: String::new(),
                attribs: Vec::new(),
            }),
        );
        tree.append(image, Leaf::Word("caption".into()));
        let full = tree.append(tree.root(), Composite::Para);
        tree.append(full, Leaf::Word("text".into()));

        assert!(!has_visible_content(&tree, empty));
        assert!(!has_visible_content(&tree, hidden));
        assert!(has_visible_content(&tree, full));
        assert_eq!(first_non_white_space(&tree, empty), None);
    }
}
