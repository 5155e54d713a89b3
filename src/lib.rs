#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to route Vehicles over a 2D Network of Waypoints.
//!
//! ## Introduction
//! A road Network is described as a set of Waypoints (any identity that can be copied, compared
//! and hashed) together with Links between them. Each Link is either one-way or two-way. The
//! Network is turned into a directed [`Graph`] which answers shortest-path queries using A*, with
//! the straight-line distance between Waypoints as both the cost of an Edge and the Heuristic.
//!
//! The Graph itself never stores coordinates. Positions are asked for through a
//! [`PositionProvider`], which can be a closure, a Map or the [`Network`] that built the Graph.
//! All scores of a search live in scratch state that is created for that search only, so any
//! number of searches may run on a shared `&Graph` at the same time.
//!
//! On top of the Graph, the [`agent`] Module provides Vehicles that pick random destinations,
//! follow the returned Path Waypoint by Waypoint and adapt their speed to the Vehicles in front
//! of them.
//!
//! ## Examples
//! Building a Network and finding a Path:
//! ```
//! use waypoint_routing::prelude::*;
//!
//! //  A ---- B
//! //         |
//! //         C ---- D
//! let network = NetworkBuilder::new()
//!     .waypoint('A', (0.0, 0.0))
//!     .waypoint('B', (10.0, 0.0))
//!     .waypoint('C', (10.0, 10.0))
//!     .waypoint('D', (20.0, 10.0))
//!     .link('A', 'B', Direction::TwoWay)
//!     .link('B', 'C', Direction::TwoWay)
//!     .link('C', 'D', Direction::OneWay)
//!     .build();
//!
//! let path = network.find_path('A', 'D').unwrap();
//! assert_eq!(path, vec!['A', 'B', 'C', 'D']);
//! assert_eq!(path.cost(), 30.0);
//!
//! // the Link between C and D is one-way
//! assert!(network.find_path('D', 'A').is_none());
//! ```
//!
//! Using the Graph directly, with positions from a closure:
//! ```
//! use waypoint_routing::{Graph, Point};
//!
//! let positions = [(0.0, 0.0), (3.0, 4.0), (6.0, 0.0)];
//!
//! let mut graph = Graph::new();
//! for id in 0..positions.len() {
//!     graph.add_node(id);
//! }
//! graph.add_edge(0, 1);
//! graph.add_edge(1, 2);
//!
//! let get_position = |id: usize| -> Option<Point> { positions.get(id).copied() };
//!
//! assert!(graph.search(0, 2, &get_position));
//! assert_eq!(graph.path(), &[0, 1, 2]);
//!
//! // there is no Edge back to the start
//! assert!(!graph.search(2, 0, &get_position));
//! assert!(graph.path().is_empty());
//! ```
//!
//! ### Simulating Vehicles
//! ```
//! use waypoint_routing::prelude::*;
//! use nanorand::WyRand;
//!
//! let network = NetworkBuilder::new()
//!     .waypoint(0, (0.0, 0.0))
//!     .waypoint(1, (100.0, 0.0))
//!     .link(0, 1, Direction::TwoWay)
//!     .build();
//!
//! let mut registry = VehicleRegistry::new();
//! let car = registry.register(VehicleAgent::new(VehicleKind::Car, (0.0, 0.0)));
//!
//! let mut rng = WyRand::new_seed(7);
//! for _ in 0..100 {
//!     registry.tick(1.0 / 60.0, &network, &mut rng);
//! }
//!
//! assert_ne!(registry[car].state(), AgentState::Idle);
//! ```
//!
//! ## Features
//! - `parallel` (default): answer batches of queries with [`Graph::find_paths`] on the
//!   [rayon](https://docs.rs/rayon) thread pool.
//! - `log` (default): report dropped Links and search timings through the
//!   [log](https://docs.rs/log) facade.

#[cfg(feature = "log")]
macro_rules! debug_log {
	($($arg:tt)+) => {
		log::debug!($($arg)+)
	};
}
#[cfg(not(feature = "log"))]
macro_rules! debug_log {
	($($arg:tt)+) => {};
}

#[cfg(feature = "log")]
macro_rules! trace_log {
	($($arg:tt)+) => {
		log::trace!($($arg)+)
	};
}
#[cfg(not(feature = "log"))]
macro_rules! trace_log {
	($($arg:tt)+) => {};
}

/// A shorthand for Positions in the 2D plane
pub type Point = (f32, f32);

mod position;
pub use self::position::{distance, PositionProvider};

mod path;
pub use self::path::{Cost, Path};

mod graph;
pub use self::graph::Graph;

mod network;
pub use self::network::{Direction, Link, Network, NetworkBuilder};

pub mod agent;

/// The most commonly used Types of this crate
pub mod prelude {
	pub use crate::{
		agent::{AgentConfig, AgentId, AgentState, VehicleAgent, VehicleKind, VehicleRegistry},
		Direction, Graph, Link, Network, NetworkBuilder, Path, Point, PositionProvider,
	};
}
