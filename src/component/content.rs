use crate::foundation::error::{GlassError, GlassResult};

/// A node of the component's nested (light) content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNode {
    /// Character data.
    Text(String),
    /// An element wrapping further content, e.g. `<b>`.
    Element {
        /// Tag name, informational only.
        tag: String,
        /// Child nodes in document order.
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Text node helper.
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Element helper.
    pub fn element(tag: impl Into<String>, children: Vec<ContentNode>) -> Self {
        Self::Element {
            tag: tag.into(),
            children,
        }
    }

    fn push_text_content(&self, out: &mut String) {
        match self {
            ContentNode::Text(s) => out.push_str(s),
            ContentNode::Element { children, .. } => {
                for c in children {
                    c.push_text_content(out);
                }
            }
        }
    }
}

/// Index path from the content root to a node.
pub type NodePath = Vec<usize>;

/// What a mutation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Children were inserted into and/or removed from the target.
    ChildList {
        /// Number of inserted nodes.
        added: usize,
        /// Number of removed nodes.
        removed: usize,
    },
    /// A text node's data changed.
    CharacterData {
        /// Data before the change.
        old: String,
    },
}

/// One observed mutation. `target` is the parent for child-list changes and the text node itself
/// for character-data changes; the empty path is the content root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationRecord {
    /// Affected node.
    pub target: NodePath,
    /// Mutation payload.
    pub kind: MutationKind,
}

/// Nested content of a component plus the subtree observation queue.
///
/// Records are only queued between [`ContentTree::observe`] and [`ContentTree::disconnect`].
#[derive(Clone, Debug, Default)]
pub struct ContentTree {
    children: Vec<ContentNode>,
    observing: bool,
    records: Vec<MutationRecord>,
}

impl ContentTree {
    /// Empty content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level nodes.
    pub fn children(&self) -> &[ContentNode] {
        &self.children
    }

    /// Concatenation of every descendant text node, untrimmed.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for c in &self.children {
            c.push_text_content(&mut out);
        }
        out
    }

    /// Replace all content with a single text node (or nothing for `""`).
    pub fn set_text_content(&mut self, text: impl Into<String>) {
        let text = text.into();
        let removed = self.children.len();
        self.children.clear();
        let added = if text.is_empty() {
            0
        } else {
            self.children.push(ContentNode::Text(text));
            1
        };
        if added + removed > 0 {
            self.record(Vec::new(), MutationKind::ChildList { added, removed });
        }
    }

    /// Append a node at the top level and return its path.
    pub fn append(&mut self, node: ContentNode) -> NodePath {
        let idx = self.children.len();
        self.children.push(node);
        self.record(
            Vec::new(),
            MutationKind::ChildList {
                added: 1,
                removed: 0,
            },
        );
        vec![idx]
    }

    /// Insert `node` as child `index` of the element at `parent` (empty path = root).
    pub fn insert(&mut self, parent: &[usize], index: usize, node: ContentNode) -> GlassResult<()> {
        let siblings = self.children_at_mut(parent)?;
        if index > siblings.len() {
            return Err(GlassError::validation(format!(
                "insert index {index} out of bounds ({} children)",
                siblings.len()
            )));
        }
        siblings.insert(index, node);
        self.record(
            parent.to_vec(),
            MutationKind::ChildList {
                added: 1,
                removed: 0,
            },
        );
        Ok(())
    }

    /// Remove the node at `path` and return it.
    pub fn remove(&mut self, path: &[usize]) -> GlassResult<ContentNode> {
        let (&idx, parent) = path
            .split_last()
            .ok_or_else(|| GlassError::validation("cannot remove the content root"))?;
        let siblings = self.children_at_mut(parent)?;
        if idx >= siblings.len() {
            return Err(GlassError::validation(format!(
                "remove index {idx} out of bounds ({} children)",
                siblings.len()
            )));
        }
        let node = siblings.remove(idx);
        self.record(
            parent.to_vec(),
            MutationKind::ChildList {
                added: 0,
                removed: 1,
            },
        );
        Ok(node)
    }

    /// Change the data of the text node at `path`.
    pub fn set_character_data(&mut self, path: &[usize], data: impl Into<String>) -> GlassResult<()> {
        let data = data.into();
        let node = self.node_at_mut(path)?;
        let ContentNode::Text(s) = node else {
            return Err(GlassError::validation("character data target is not a text node"));
        };
        if *s == data {
            return Ok(());
        }
        let old = std::mem::replace(s, data);
        self.record(path.to_vec(), MutationKind::CharacterData { old });
        Ok(())
    }

    /// Start queueing mutation records.
    pub fn observe(&mut self) {
        self.observing = true;
    }

    /// Stop queueing and drop anything not yet delivered.
    pub fn disconnect(&mut self) {
        self.observing = false;
        self.records.clear();
    }

    /// Whether an observer is currently subscribed.
    pub fn is_observed(&self) -> bool {
        self.observing
    }

    /// Drain queued records.
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.records)
    }

    fn record(&mut self, target: NodePath, kind: MutationKind) {
        if self.observing {
            self.records.push(MutationRecord { target, kind });
        }
    }

    fn node_at_mut(&mut self, path: &[usize]) -> GlassResult<&mut ContentNode> {
        let (&idx, parent) = path
            .split_last()
            .ok_or_else(|| GlassError::validation("the content root is not a node"))?;
        self.children_at_mut(parent)?
            .get_mut(idx)
            .ok_or_else(|| GlassError::validation(format!("no content node at {path:?}")))
    }

    fn children_at_mut(&mut self, path: &[usize]) -> GlassResult<&mut Vec<ContentNode>> {
        let mut cur = &mut self.children;
        for &idx in path {
            match cur.get_mut(idx) {
                Some(ContentNode::Element { children, .. }) => cur = children,
                Some(ContentNode::Text(_)) => {
                    return Err(GlassError::validation(format!(
                        "content node at {path:?} is a text node"
                    )));
                }
                None => {
                    return Err(GlassError::validation(format!(
                        "no content node at {path:?}"
                    )));
                }
            }
        }
        Ok(cur)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/content.rs"]
mod tests;
