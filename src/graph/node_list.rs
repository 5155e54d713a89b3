use super::{Edge, Node, NodeKey};

use std::hash::Hash;

/// Arena of Nodes with a lookup from the external identity to the internal key
#[derive(Clone, Debug)]
pub(crate) struct NodeList<Id> {
    nodes: slab::Slab<Node<Id>>,
    id_map: hashbrown::HashMap<Id, NodeKey>,
}

impl<Id: Copy + Eq + Hash> NodeList<Id> {
    pub fn new() -> Self {
        Self {
            nodes: slab::Slab::new(),
            id_map: hashbrown::HashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: slab::Slab::with_capacity(capacity),
            id_map: hashbrown::HashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.id_map.len()
    }

    /// Inserts a Node for `id`. Returns `false` if there already is one.
    pub fn add_node(&mut self, id: Id) -> bool {
        if self.id_map.contains_key(&id) {
            return false;
        }
        let key = self.nodes.insert(Node::new(id));
        self.id_map.insert(id, key);
        true
    }

    pub fn add_edge(&mut self, start: NodeKey, end: NodeKey) {
        self[start].edges.push(Edge { start, end });
    }

    pub fn key_of(&self, id: Id) -> Option<NodeKey> {
        self.id_map.get(&id).copied()
    }

    pub fn iter(&self) -> slab::Iter<'_, Node<Id>> {
        self.nodes.iter()
    }
}

use std::ops::{Index, IndexMut};
impl<Id> Index<NodeKey> for NodeList<Id> {
    type Output = Node<Id>;
    #[track_caller]
    fn index(&self, index: NodeKey) -> &Node<Id> {
        &self.nodes[index]
    }
}
impl<Id> IndexMut<NodeKey> for NodeList<Id> {
    #[track_caller]
    fn index_mut(&mut self, index: NodeKey) -> &mut Node<Id> {
        &mut self.nodes[index]
    }
}

#[test]
fn duplicate_ids_share_a_node() {
    let mut nodes = NodeList::new();
    assert!(nodes.add_node("north"));
    assert!(nodes.add_node("south"));
    assert!(!nodes.add_node("north"));

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes.iter().count(), 2);

    let north = nodes.key_of("north").unwrap();
    let south = nodes.key_of("south").unwrap();
    nodes.add_edge(north, south);

    assert_eq!(nodes[north].id, "north");
    assert_eq!(nodes[north].edges, vec![Edge { start: north, end: south }]);
    assert!(nodes[south].edges.is_empty());
    assert_eq!(nodes.key_of("east"), None);
}
