mod node_id;
use node_id::*;

mod node;
use node::{Edge, Node};

mod node_list;
use node_list::NodeList;

mod a_star;
use a_star::a_star_search;

use crate::{Cost, Path, PositionProvider};

use std::hash::Hash;

/// A directed Graph of Waypoints that answers shortest-path queries.
///
/// Nodes are identified by any `Id` that can be copied, compared and hashed. The Graph does not
/// know where its Nodes are, every query receives a [`PositionProvider`] for that.
///
/// There are two ways to search:
/// - [`a_star`](Graph::a_star) returns the Path and only needs `&self`, so any number of
///   searches can share the Graph.
/// - [`search`](Graph::search) stores the result inside the Graph and reports success as a
///   `bool`. The stored Path is read with [`path`](Graph::path).
///
/// ## Examples
/// ```
/// use waypoint_routing::{Graph, Point};
/// use hashbrown::HashMap;
///
/// let positions: HashMap<&str, Point> = [("A", (0.0, 0.0)), ("B", (10.0, 0.0)), ("C", (10.0, 10.0))]
///     .into_iter()
///     .collect();
///
/// let mut graph = Graph::new();
/// for id in positions.keys() {
///     graph.add_node(*id);
/// }
/// graph.add_edge("A", "B");
/// graph.add_edge("B", "C");
/// graph.add_edge("A", "Z"); // unknown Nodes are ignored
///
/// assert_eq!(graph.edge_count(), 2);
///
/// let path = graph.a_star("A", "C", &positions).unwrap();
/// assert_eq!(path, vec!["A", "B", "C"]);
/// assert_eq!(path.cost(), 20.0);
/// ```
#[derive(Clone, Debug)]
pub struct Graph<Id> {
    nodes: NodeList<Id>,
    edge_count: usize,
    path: Option<Path<Id>>,
}

impl<Id: Copy + Eq + Hash> Graph<Id> {
    /// Creates an empty Graph
    pub fn new() -> Graph<Id> {
        Graph {
            nodes: NodeList::new(),
            edge_count: 0,
            path: None,
        }
    }

    /// Creates an empty Graph with room for `capacity` Nodes
    pub fn with_capacity(capacity: usize) -> Graph<Id> {
        Graph {
            nodes: NodeList::with_capacity(capacity),
            edge_count: 0,
            path: None,
        }
    }

    /// Adds a Node for `id`.
    ///
    /// Adding the same `id` twice is allowed and does nothing the second time.
    ///
    /// ## Returns
    /// `true` if a new Node was created
    pub fn add_node(&mut self, id: Id) -> bool {
        self.nodes.add_node(id)
    }

    /// Adds a directed Edge from `from` to `to`.
    ///
    /// Both Nodes have to be added with [`add_node`](Graph::add_node) first. If either of them
    /// is unknown, nothing happens.
    ///
    /// ## Returns
    /// `true` if the Edge was added
    pub fn add_edge(&mut self, from: Id, to: Id) -> bool {
        match (self.nodes.key_of(from), self.nodes.key_of(to)) {
            (Some(start), Some(end)) => {
                self.nodes.add_edge(start, end);
                self.edge_count += 1;
                true
            }
            _ => {
                debug_log!("ignoring Edge with an unknown end point");
                false
            }
        }
    }

    /// The number of Nodes in the Graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// The number of Edges in the Graph
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// `true` if a Node for `id` exists
    pub fn contains(&self, id: Id) -> bool {
        self.nodes.key_of(id).is_some()
    }

    /// `true` if there is an Edge from `from` to `to`
    pub fn has_edge(&self, from: Id, to: Id) -> bool {
        match (self.nodes.key_of(from), self.nodes.key_of(to)) {
            (Some(start), Some(end)) => self.nodes[start].edges.iter().any(|edge| edge.end == end),
            _ => false,
        }
    }

    /// Iterates over the Nodes reachable from `id` in a single step.
    ///
    /// The Iterator is empty if `id` is unknown.
    pub fn neighbors(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.nodes
            .key_of(id)
            .into_iter()
            .flat_map(move |key| self.nodes[key].edges.iter())
            .map(move |edge| self.nodes[edge.end].id)
    }

    /// Iterates over the ids of all Nodes
    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.nodes.iter().map(|(_, node)| node.id)
    }

    /// Iterates over all Edges as `(from, to)` pairs
    pub fn edges(&self) -> impl Iterator<Item = (Id, Id)> + '_ {
        self.nodes
            .iter()
            .flat_map(|(_, node)| node.edges.iter())
            .map(move |edge| (self.nodes[edge.start].id, self.nodes[edge.end].id))
    }

    /// Finds the shortest Path from `start` to `goal` using A*.
    ///
    /// The cost of an Edge is the distance between its two Nodes, and the distance to `goal`
    /// serves as the Heuristic. Since the Heuristic never overestimates, the Path is optimal.
    ///
    /// ## Arguments
    /// - `start` - the Node to start from
    /// - `goal` - the Node to reach
    /// - `positions` - where the Nodes are. Nodes without a position are never entered.
    ///
    /// ## Returns
    /// the Path, if one was found. The first Node is always `start` and the last is `goal`.
    /// `None` if either Node is unknown or `goal` cannot be reached from `start`.
    /// If `start == goal`, the Path consists of only that Node.
    pub fn a_star<P>(&self, start: Id, goal: Id, positions: &P) -> Option<Path<Id>>
    where
        P: PositionProvider<Id> + ?Sized,
    {
        let start = self.nodes.key_of(start)?;
        let goal = self.nodes.key_of(goal)?;

        #[cfg(feature = "log")]
        let timer = std::time::Instant::now();

        let path = a_star_search(&self.nodes, start, goal, positions);

        trace_log!(
            "A* from Node key {} to Node key {}: {} in {:?}",
            start,
            goal,
            match &path {
                Some(path) => format!("{} Nodes, Cost {}", path.len(), path.cost()),
                None => String::from("no Path"),
            },
            timer.elapsed()
        );

        path
    }

    /// Finds the shortest Path from `start` to `goal` and stores it in the Graph.
    ///
    /// Behaves like [`a_star`](Graph::a_star), but the result replaces the stored Path,
    /// which is cleared if no Path was found.
    ///
    /// ## Returns
    /// `true` if a Path was found
    pub fn search<P>(&mut self, start: Id, goal: Id, positions: &P) -> bool
    where
        P: PositionProvider<Id> + ?Sized,
    {
        self.path = self.a_star(start, goal, positions);
        self.path.is_some()
    }

    /// The Nodes of the Path found by the last call to [`search`](Graph::search).
    ///
    /// Empty if that search failed or there was none yet.
    pub fn path(&self) -> &[Id] {
        match &self.path {
            Some(path) => path.as_slice(),
            None => &[],
        }
    }

    /// The Path found by the last call to [`search`](Graph::search), with its cost
    pub fn last_path(&self) -> Option<&Path<Id>> {
        self.path.as_ref()
    }

    /// The length of the Path found by the last call to [`search`](Graph::search), if any
    pub fn last_cost(&self) -> Option<Cost> {
        self.path.as_ref().map(Path::cost)
    }

    /// Answers a batch of `(start, goal)` queries.
    ///
    /// The results are in the same order as the queries. With the `parallel` feature, the
    /// queries are spread over the rayon thread pool.
    #[cfg(feature = "parallel")]
    pub fn find_paths<P>(&self, queries: &[(Id, Id)], positions: &P) -> Vec<Option<Path<Id>>>
    where
        Id: Send + Sync,
        P: PositionProvider<Id> + Sync + ?Sized,
    {
        use rayon::prelude::*;

        queries
            .par_iter()
            .map(|&(start, goal)| self.a_star(start, goal, positions))
            .collect()
    }

    /// Answers a batch of `(start, goal)` queries.
    ///
    /// The results are in the same order as the queries. With the `parallel` feature, the
    /// queries are spread over the rayon thread pool.
    #[cfg(not(feature = "parallel"))]
    pub fn find_paths<P>(&self, queries: &[(Id, Id)], positions: &P) -> Vec<Option<Path<Id>>>
    where
        P: PositionProvider<Id> + ?Sized,
    {
        queries
            .iter()
            .map(|&(start, goal)| self.a_star(start, goal, positions))
            .collect()
    }
}

impl<Id: Copy + Eq + Hash> Default for Graph<Id> {
    fn default() -> Graph<Id> {
        Graph::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;

    fn square() -> (Graph<u8>, impl Fn(u8) -> Option<Point>) {
        // 0 -- 1
        // |    |
        // 3 -- 2
        let mut graph = Graph::new();
        for id in 0..4 {
            graph.add_node(id);
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            graph.add_edge(a, b);
            graph.add_edge(b, a);
        }
        let positions = |id: u8| -> Option<Point> {
            [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]
                .get(id as usize)
                .copied()
        };
        (graph, positions)
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.add_node(7));
        assert!(!graph.add_node(7));
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn add_edge_ignores_unknown_nodes() {
        let mut graph = Graph::new();
        graph.add_node(1);
        assert!(!graph.add_edge(1, 2));
        assert!(!graph.add_edge(2, 1));
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.neighbors(1).count(), 0);
    }

    #[test]
    fn neighbors_and_edges() {
        let (graph, _) = square();
        let mut neighbors: Vec<u8> = graph.neighbors(0).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 3]);
        assert_eq!(graph.edges().count(), 8);
        assert!(graph.has_edge(2, 3));
        assert!(!graph.has_edge(0, 2));
        assert_eq!(graph.neighbors(42).count(), 0);
    }

    #[test]
    fn start_equals_goal() {
        let (graph, positions) = square();
        let path = graph.a_star(2, 2, &positions).unwrap();
        assert_eq!(path, vec![2]);
        assert_eq!(path.cost(), 0.0);
    }

    #[test]
    fn unplaced_nodes_are_avoided() {
        let (mut graph, positions) = square();
        graph.add_node(9);
        graph.add_edge(0, 9);
        graph.add_edge(9, 2);

        let path = graph.a_star(0, 2, &positions).unwrap();
        assert_eq!(path.len(), 3);
        assert!(!path.iter().any(|&id| id == 9));
        assert!(graph.a_star(0, 9, &positions).is_none());
    }

    #[test]
    fn search_stores_and_clears_path() {
        let (mut graph, positions) = square();
        assert!(graph.path().is_empty());

        assert!(graph.search(0, 1, &positions));
        assert_eq!(graph.path(), &[0, 1]);
        assert_eq!(graph.last_cost(), Some(4.0));

        assert!(!graph.search(0, 200, &positions));
        assert!(graph.path().is_empty());
        assert!(graph.last_path().is_none());
    }

    #[test]
    fn batch_matches_single_queries() {
        let (graph, positions) = square();
        let queries = [(0, 2), (1, 3), (3, 3), (0, 99)];

        let batch = graph.find_paths(&queries, &positions);
        let single: Vec<_> = queries
            .iter()
            .map(|&(s, g)| graph.a_star(s, g, &positions))
            .collect();

        assert_eq!(batch, single);
        assert!(batch[3].is_none());
    }
}
