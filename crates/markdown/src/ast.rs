use serde::{Deserialize, Serialize};

/// One node of a card's formatting tree.
///
/// Children are owned, so the tree is built bottom-up and can never contain a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormattingNode {
    PlainRun { text: String },
    Bold { children: Vec<FormattingNode> },
    Italic { children: Vec<FormattingNode> },
    /// One list line. The ordinal counts from 1 within a contiguous block;
    /// `None` is used for items that were not produced by the parser.
    ListItem {
        children: Vec<FormattingNode>,
        ordinal: Option<u32>,
    },
}

impl FormattingNode {
    pub fn plain(text: impl Into<String>) -> Self {
        FormattingNode::PlainRun { text: text.into() }
    }

    pub fn children(&self) -> &[FormattingNode] {
        match self {
            FormattingNode::PlainRun { .. } => &[],
            FormattingNode::Bold { children }
            | FormattingNode::Italic { children }
            | FormattingNode::ListItem { children, .. } => children,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            FormattingNode::PlainRun { text } => out.push_str(text),
            _ => self.children().iter().for_each(|c| c.collect_text(out)),
        }
    }
}

/// The parsed form of a card body: a sequence of top-level nodes.
///
/// Line breaks between ordinary lines are kept as `\n` inside `PlainRun`
/// text; a `ListItem` always occupies its own line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormattingTree {
    nodes: Vec<FormattingNode>,
}

impl FormattingTree {
    pub fn new(nodes: Vec<FormattingNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[FormattingNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The visible text with all markup removed. List items are not separated
    /// by newlines here; use the layout crate to obtain rendered lines.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.nodes.iter().for_each(|n| n.collect_text(&mut out));
        out
    }

    /// Depth-first iterator over every node in the tree.
    pub fn walk(&self) -> impl Iterator<Item = &FormattingNode> {
        let mut stack: Vec<&FormattingNode> = self.nodes.iter().rev().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children().iter().rev());
            Some(node)
        })
    }
}
