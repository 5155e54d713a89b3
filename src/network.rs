use crate::{distance, Graph, Path, Point, PositionProvider};

use nanorand::{Rng, WyRand};
use std::hash::Hash;

/// Whether a [`Link`] can be travelled in one or both directions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
	/// only from `from` to `to`
	OneWay,
	/// both ways
	TwoWay,
}

/// A road between two Waypoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link<Id> {
	/// The Waypoint the road starts at
	pub from: Id,
	/// The Waypoint the road ends at
	pub to: Id,
	/// Which way the road can be travelled
	pub direction: Direction,
}

/// Collects Waypoints and Links and turns them into a [`Network`].
///
/// Waypoints are added as Nodes before any Link is looked at, so Waypoints and Links can be
/// declared in any order. Links that name an undeclared Waypoint are dropped.
///
/// ## Examples
/// ```
/// use waypoint_routing::{Direction, NetworkBuilder};
///
/// let mut builder = NetworkBuilder::new();
/// builder.add_link(1, 2, Direction::TwoWay); // Waypoints can come later
/// builder.add_waypoint(1, (0.0, 0.0));
/// builder.add_waypoint(2, (0.0, 5.0));
/// builder.add_link(2, 3, Direction::OneWay); // 3 is never declared
///
/// let network = builder.build();
/// assert_eq!(network.len(), 2);
/// assert_eq!(network.graph().edge_count(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct NetworkBuilder<Id> {
	waypoints: Vec<Id>,
	positions: hashbrown::HashMap<Id, Point>,
	links: Vec<Link<Id>>,
}

impl<Id: Copy + Eq + Hash> NetworkBuilder<Id> {
	/// Creates an empty NetworkBuilder
	pub fn new() -> NetworkBuilder<Id> {
		NetworkBuilder {
			waypoints: Vec::new(),
			positions: hashbrown::HashMap::new(),
			links: Vec::new(),
		}
	}

	/// Declares a Waypoint at `pos`.
	///
	/// Declaring the same Waypoint again moves it to the new position.
	pub fn add_waypoint(&mut self, id: Id, pos: Point) -> &mut Self {
		if self.positions.insert(id, pos).is_none() {
			self.waypoints.push(id);
		}
		self
	}

	/// Declares a Link between two Waypoints
	pub fn add_link(&mut self, from: Id, to: Id, direction: Direction) -> &mut Self {
		self.links.push(Link {
			from,
			to,
			direction,
		});
		self
	}

	/// Same as [`add_waypoint`](NetworkBuilder::add_waypoint), for chaining
	pub fn waypoint(mut self, id: Id, pos: Point) -> Self {
		self.add_waypoint(id, pos);
		self
	}

	/// Same as [`add_link`](NetworkBuilder::add_link), for chaining
	pub fn link(mut self, from: Id, to: Id, direction: Direction) -> Self {
		self.add_link(from, to, direction);
		self
	}

	/// Builds the Graph: every Waypoint becomes a Node and every Link one or two Edges
	pub fn build(self) -> Network<Id> {
		let mut graph = Graph::with_capacity(self.waypoints.len());

		for &id in self.waypoints.iter() {
			graph.add_node(id);
		}

		let mut dropped = 0;
		for link in self.links.iter() {
			if !graph.add_edge(link.from, link.to) {
				dropped += 1;
				continue;
			}
			if link.direction == Direction::TwoWay {
				graph.add_edge(link.to, link.from);
			}
		}
		if dropped > 0 {
			debug_log!(
				"dropped {} of {} Links with undeclared Waypoints",
				dropped,
				self.links.len()
			);
		}

		Network {
			graph,
			waypoints: self.waypoints,
			positions: self.positions,
		}
	}
}

impl<Id: Copy + Eq + Hash> Default for NetworkBuilder<Id> {
	fn default() -> NetworkBuilder<Id> {
		NetworkBuilder::new()
	}
}

/// A road Network: the Graph of its Waypoints together with their positions.
///
/// Created by a [`NetworkBuilder`]. The Network is immutable, so it can be shared by every
/// Vehicle that drives on it.
#[derive(Clone, Debug)]
pub struct Network<Id> {
	graph: Graph<Id>,
	waypoints: Vec<Id>,
	positions: hashbrown::HashMap<Id, Point>,
}

impl<Id: Copy + Eq + Hash> Network<Id> {
	/// The Graph of the Network
	pub fn graph(&self) -> &Graph<Id> {
		&self.graph
	}

	/// All Waypoints in the order they were declared
	pub fn waypoints(&self) -> &[Id] {
		&self.waypoints
	}

	/// The number of Waypoints
	pub fn len(&self) -> usize {
		self.waypoints.len()
	}

	/// `true` if the Network has no Waypoints
	pub fn is_empty(&self) -> bool {
		self.waypoints.is_empty()
	}

	/// The position of a Waypoint
	pub fn position(&self, id: Id) -> Option<Point> {
		self.positions.get(&id).copied()
	}

	/// Finds the Waypoint closest to `point`.
	///
	/// On ties, the Waypoint declared first wins. `None` if the Network is empty.
	pub fn closest_waypoint(&self, point: Point) -> Option<Id> {
		let mut closest = None;
		let mut closest_distance = f32::INFINITY;

		for &id in self.waypoints.iter() {
			let dist = match self.positions.get(&id) {
				Some(&pos) => distance(point, pos),
				None => continue,
			};
			if dist < closest_distance {
				closest_distance = dist;
				closest = Some(id);
			}
		}
		closest
	}

	/// Picks a Waypoint uniformly at random. `None` if the Network is empty.
	pub fn random_waypoint(&self, rng: &mut WyRand) -> Option<Id> {
		if self.waypoints.is_empty() {
			return None;
		}
		Some(self.waypoints[rng.generate_range(0..self.waypoints.len())])
	}

	/// Finds the shortest Path between two Waypoints. See [`Graph::a_star`].
	pub fn find_path(&self, start: Id, goal: Id) -> Option<Path<Id>> {
		self.graph.a_star(start, goal, self)
	}
}

impl<Id: Copy + Eq + Hash> PositionProvider<Id> for Network<Id> {
	fn position(&self, id: Id) -> Option<Point> {
		Network::position(self, id)
	}
}
