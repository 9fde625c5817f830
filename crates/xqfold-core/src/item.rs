use crate::atomic::Atomic;

///
/// Item
///
/// One member of a sequence: an atomic value or a node.
///

#[derive(Clone, Debug, PartialEq)]
pub enum Item {
    Atomic(Atomic),
    Node(Node),
}

impl Item {
    /// Reduce the item to its typed value.
    /// Nodes carry no type annotation, so their string value is untyped.
    #[must_use]
    pub fn atomize(&self) -> Atomic {
        match self {
            Self::Atomic(atomic) => atomic.clone(),
            Self::Node(node) => Atomic::Untyped(node.string_value().to_string()),
        }
    }
}

impl From<Atomic> for Item {
    fn from(atomic: Atomic) -> Self {
        Self::Atomic(atomic)
    }
}

impl From<Node> for Item {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

///
/// Node
///
/// Unvalidated element with text content.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    name: String,
    text: String,
}

impl Node {
    #[must_use]
    pub fn element(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn string_value(&self) -> &str {
        &self.text
    }
}
