use crate::{Cost, Point};

use std::hash::{BuildHasher, Hash};

/// Looks up where a Waypoint is.
///
/// The [`Graph`](crate::Graph) only knows the identities of its Nodes and how they are connected.
/// Everything that needs a distance (Edge costs and the A* Heuristic) asks a `PositionProvider`
/// instead, which keeps the Graph independent of whatever system places the Waypoints.
///
/// Implementations are provided for:
/// - closures `Fn(Id) -> Option<Point>`
/// - [`hashbrown::HashMap<Id, Point>`](hashbrown::HashMap)
/// - [`Network`](crate::Network), which remembers the positions it was built with
///
/// Returning `None` marks the Waypoint as unplaced. A search never enters an unplaced Node and
/// fails if the start or goal is unplaced.
///
/// ## Examples
/// ```
/// use waypoint_routing::{Point, PositionProvider};
///
/// let provider = |id: u32| -> Option<Point> { Some((id as f32, 0.0)) };
/// assert_eq!(provider.position(3), Some((3.0, 0.0)));
/// ```
pub trait PositionProvider<Id> {
	/// Returns the Position of `id`, or `None` if it is unknown to this provider
	fn position(&self, id: Id) -> Option<Point>;
}

impl<Id, F> PositionProvider<Id> for F
where
	F: Fn(Id) -> Option<Point>,
{
	fn position(&self, id: Id) -> Option<Point> {
		self(id)
	}
}

impl<Id, S> PositionProvider<Id> for hashbrown::HashMap<Id, Point, S>
where
	Id: Eq + Hash,
	S: BuildHasher,
{
	fn position(&self, id: Id) -> Option<Point> {
		self.get(&id).copied()
	}
}

/// The straight-line (Euclidean) distance between two Points.
///
/// ```
/// # use waypoint_routing::distance;
/// assert_eq!(distance((0.0, 0.0), (3.0, 4.0)), 5.0);
/// ```
pub fn distance(a: Point, b: Point) -> Cost {
	(b.0 - a.0).hypot(b.1 - a.1)
}

#[test]
fn test_map_provider() {
	let mut map = hashbrown::HashMap::new();
	map.insert("depot", (1.0, 2.0));
	assert_eq!(map.position("depot"), Some((1.0, 2.0)));
	assert_eq!(map.position("harbour"), None);
}

#[test]
fn test_distance_is_symmetric() {
	let a = (-2.0, 7.5);
	let b = (4.0, -0.5);
	assert_eq!(distance(a, b), distance(b, a));
	assert_eq!(distance(a, b), 10.0);
}
