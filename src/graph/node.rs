use super::NodeKey;

/// A directed connection from `start` to `end`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Edge {
    pub start: NodeKey,
    pub end: NodeKey,
}

#[derive(Clone, Debug)]
pub(crate) struct Node<Id> {
    pub id: Id,
    pub edges: Vec<Edge>,
}

impl<Id> Node<Id> {
    pub fn new(id: Id) -> Node<Id> {
        Node {
            id,
            edges: Vec::new(),
        }
    }
}
