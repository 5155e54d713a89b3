//! Vehicles that drive around a [`Network`].
//!
//! A [`VehicleAgent`] starts at an arbitrary position, snaps to the closest Waypoint and from then
//! on repeatedly picks a random destination, asks the Network for a Path and drives along it.
//! Vehicles are kept in a [`VehicleRegistry`], which moves all of them once per tick and lets
//! Vehicles that follow each other closely agree on a common speed.

mod config;
pub use self::config::{AgentConfig, VehicleKind};

mod registry;
pub use self::registry::{AgentId, VehicleRegistry};

use crate::{distance, Network, Path, Point, PositionProvider};

use nanorand::WyRand;
use std::hash::Hash;

/// What a [`VehicleAgent`] is currently doing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AgentState {
	/// Not yet placed on the Network
	Idle,
	/// Looking for a reachable destination
	Planning,
	/// Driving along a Path
	Following,
}

/// A single Vehicle driving on a [`Network`].
///
/// ## Lifecycle
/// - **Idle**: on the first step, the Vehicle snaps to the closest Waypoint and starts planning.
/// - **Planning**: a random Waypoint is picked as destination (possibly the current one) and a
///   Path is searched. If there is none, the Vehicle keeps planning.
/// - **Following**: the Vehicle drives towards the next Waypoint of its Path. Once it is within
///   [`arrival_tolerance`](AgentConfig::arrival_tolerance) of it, the Waypoint after that becomes
///   the target. After the last Waypoint, the Vehicle plans again.
///
/// ## Examples
/// ```
/// use waypoint_routing::prelude::*;
/// use nanorand::WyRand;
///
/// let network = NetworkBuilder::new()
///     .waypoint("depot", (0.0, 0.0))
///     .waypoint("market", (0.0, 30.0))
///     .link("depot", "market", Direction::OneWay)
///     .build();
///
/// let mut bus = VehicleAgent::new(VehicleKind::Bus, (0.0, 0.0));
/// let mut rng = WyRand::new_seed(3);
///
/// // the depot itself is a valid destination too, so step until the bus heads for the market
/// while bus.target() != Some("market") {
///     bus.step(0.1, &network, &mut rng);
/// }
/// assert_eq!(bus.state(), AgentState::Following);
/// assert_eq!(bus.current_waypoint(), Some("depot"));
/// assert_eq!(bus.target(), Some("market"));
///
/// bus.step(0.5, &network, &mut rng);
/// assert_eq!(bus.position(), (0.0, 20.0));
/// ```
#[derive(Clone, Debug)]
pub struct VehicleAgent<Id> {
	kind: VehicleKind,
	config: AgentConfig,
	position: Point,
	heading: f32,
	speed: f32,
	base_speed: f32,
	state: AgentState,
	current: Option<Id>,
	path: Option<Path<Id>>,
	path_index: usize,
	speed_check_timer: f32,
}

impl<Id: Copy + Eq + Hash> VehicleAgent<Id> {
	/// Creates a Vehicle of the given kind at `position`, using the default [`AgentConfig`]
	pub fn new(kind: VehicleKind, position: Point) -> VehicleAgent<Id> {
		VehicleAgent::with_config(kind, position, AgentConfig::default())
	}

	/// Creates a Vehicle of the given kind at `position`
	pub fn with_config(kind: VehicleKind, position: Point, config: AgentConfig) -> VehicleAgent<Id> {
		let base_speed = config.clamp_speed(kind.base_speed());
		VehicleAgent {
			kind,
			config,
			position,
			heading: 0.0,
			speed: base_speed,
			base_speed,
			state: AgentState::Idle,
			current: None,
			path: None,
			path_index: 0,
			speed_check_timer: 0.0,
		}
	}

	/// The kind of Vehicle
	pub fn kind(&self) -> VehicleKind {
		self.kind
	}

	/// The options of this Vehicle
	pub fn config(&self) -> &AgentConfig {
		&self.config
	}

	/// Where the Vehicle is
	pub fn position(&self) -> Point {
		self.position
	}

	/// The direction of the last movement, in radians counter-clockwise from the x axis
	pub fn heading(&self) -> f32 {
		self.heading
	}

	/// The current speed
	pub fn speed(&self) -> f32 {
		self.speed
	}

	/// Sets the current speed, clamped to the configured bounds
	pub fn set_speed(&mut self, speed: f32) {
		self.speed = self.config.clamp_speed(speed);
	}

	/// The speed the Vehicle returns to when the road ahead is clear
	pub fn base_speed(&self) -> f32 {
		self.base_speed
	}

	/// Sets the base speed. The current speed is not changed.
	pub fn set_base_speed(&mut self, speed: f32) {
		self.base_speed = speed;
	}

	/// What the Vehicle is currently doing
	pub fn state(&self) -> AgentState {
		self.state
	}

	/// The Waypoint the Vehicle reached last
	pub fn current_waypoint(&self) -> Option<Id> {
		self.current
	}

	/// The Path the Vehicle is following or has followed last
	pub fn path(&self) -> Option<&Path<Id>> {
		self.path.as_ref()
	}

	/// The index of the targeted Waypoint in [`path`](VehicleAgent::path)
	pub fn path_index(&self) -> usize {
		self.path_index
	}

	/// The Waypoint the Vehicle is driving towards
	pub fn target(&self) -> Option<Id> {
		self.remaining_waypoints().first().copied()
	}

	/// The Waypoints of the Path that have not been reached yet, starting with the target
	pub fn remaining_waypoints(&self) -> &[Id] {
		match &self.path {
			Some(path) => path.as_slice().get(self.path_index..).unwrap_or(&[]),
			None => &[],
		}
	}

	/// How far `other` is from this Vehicle when comparing the rest of both Paths.
	///
	/// The remaining Waypoints of both Vehicles are paired up in order and the distances between
	/// the pairs are summed, until one of the Paths runs out. Two Vehicles heading along the same
	/// Waypoints therefore get a distance close to the gap between them.
	///
	/// ## Returns
	/// `None` if there is nothing to compare, because either Vehicle has no Waypoints left
	pub fn distance_along_path<P>(&self, other: &VehicleAgent<Id>, positions: &P) -> Option<f32>
	where
		P: PositionProvider<Id> + ?Sized,
	{
		let mut total = 0.0;
		let mut compared = false;

		for (&mine, &theirs) in self
			.remaining_waypoints()
			.iter()
			.zip(other.remaining_waypoints())
		{
			if let (Some(a), Some(b)) = (positions.position(mine), positions.position(theirs)) {
				total += distance(a, b);
				compared = true;
			}
		}

		if compared {
			Some(total)
		} else {
			None
		}
	}

	/// `true` if `other` is closer to this Vehicle's target than this Vehicle is.
	///
	/// Always `false` while this Vehicle has no target.
	pub fn is_ahead<P>(&self, other: &VehicleAgent<Id>, positions: &P) -> bool
	where
		P: PositionProvider<Id> + ?Sized,
	{
		match self.target().and_then(|target| positions.position(target)) {
			Some(target) => distance(other.position, target) < distance(self.position, target),
			None => false,
		}
	}

	/// Matches the speed of the Vehicle ahead, or returns to the base speed if there is none
	pub fn match_speed(&mut self, lead_speed: Option<f32>) {
		match lead_speed {
			Some(speed) => self.set_speed(speed),
			None => self.set_speed(self.base_speed),
		}
	}

	/// Advances the speed check timer by `dt`.
	///
	/// ## Returns
	/// `true` if a speed check is due, which also restarts the timer
	pub(crate) fn advance_speed_timer(&mut self, dt: f32) -> bool {
		self.speed_check_timer += dt;
		if self.speed_check_timer >= self.config.speed_check_interval {
			self.speed_check_timer = 0.0;
			true
		} else {
			false
		}
	}

	/// Advances the Vehicle by `dt` seconds.
	///
	/// See the [Lifecycle](#lifecycle) for what happens in each state. A step in which the Vehicle
	/// plans does not move it.
	pub fn step(&mut self, dt: f32, network: &Network<Id>, rng: &mut WyRand) {
		match self.state {
			AgentState::Idle => {
				self.current = network.closest_waypoint(self.position);
				if self.current.is_some() {
					self.state = AgentState::Planning;
					self.plan(network, rng);
				}
			}
			AgentState::Planning => {
				self.plan(network, rng);
			}
			AgentState::Following => self.follow(dt, network),
		}
	}

	/// Picks a random destination and searches a Path to it from the current Waypoint.
	///
	/// Tries up to [`plan_attempts`](AgentConfig::plan_attempts) destinations.
	///
	/// ## Returns
	/// `true` if a Path was found. The Vehicle is then following it, targeting its second
	/// Waypoint. Otherwise it stays in [`Planning`](AgentState::Planning).
	pub fn plan(&mut self, network: &Network<Id>, rng: &mut WyRand) -> bool {
		let start = match self.current {
			Some(start) => start,
			None => return false,
		};

		for _ in 0..self.config.plan_attempts.max(1) {
			let goal = match network.random_waypoint(rng) {
				Some(goal) => goal,
				None => return false,
			};
			if let Some(path) = network.find_path(start, goal) {
				self.path = Some(path);
				self.path_index = 1;
				self.state = AgentState::Following;
				return true;
			}
		}

		debug_log!(
			"no reachable destination after {} attempts, retrying next step",
			self.config.plan_attempts.max(1)
		);
		self.state = AgentState::Planning;
		false
	}

	fn follow(&mut self, dt: f32, network: &Network<Id>) {
		// Paths share their Waypoints, this clone only bumps a reference count
		let path = match &self.path {
			Some(path) => path.clone(),
			None => {
				self.state = AgentState::Planning;
				return;
			}
		};

		if self.path_index >= path.len() {
			self.state = AgentState::Planning;
			return;
		}

		let mut target = path[self.path_index];
		let mut target_pos = match network.position(target) {
			Some(pos) => pos,
			None => {
				self.state = AgentState::Planning;
				return;
			}
		};

		if distance(self.position, target_pos) <= self.config.arrival_tolerance {
			self.current = Some(target);
			self.path_index += 1;
			if self.path_index >= path.len() {
				self.state = AgentState::Planning;
				return;
			}
			target = path[self.path_index];
			target_pos = match network.position(target) {
				Some(pos) => pos,
				None => {
					self.state = AgentState::Planning;
					return;
				}
			};
		}

		self.move_towards(target_pos, dt);
	}

	/// Moves at the current speed towards `target`, without overshooting it
	fn move_towards(&mut self, target: Point, dt: f32) {
		let (dx, dy) = (target.0 - self.position.0, target.1 - self.position.1);
		let remaining = dx.hypot(dy);
		if remaining <= f32::EPSILON {
			return;
		}
		self.heading = dy.atan2(dx);

		let step = (self.speed * dt).min(remaining);
		if step >= remaining {
			self.position = target;
		} else {
			self.position.0 += dx / remaining * step;
			self.position.1 += dy / remaining * step;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Direction, NetworkBuilder};

	fn line() -> Network<u32> {
		// 0 --> 1 --> 2, 100 apart
		NetworkBuilder::new()
			.waypoint(0, (0.0, 0.0))
			.waypoint(1, (100.0, 0.0))
			.waypoint(2, (200.0, 0.0))
			.link(0, 1, Direction::OneWay)
			.link(1, 2, Direction::OneWay)
			.build()
	}

	#[test]
	fn idle_snaps_to_closest_waypoint() {
		let network = line();
		let mut rng = WyRand::new_seed(5);
		let mut car = VehicleAgent::new(VehicleKind::Car, (95.0, 4.0));

		assert_eq!(car.state(), AgentState::Idle);
		car.step(0.1, &network, &mut rng);

		assert_eq!(car.current_waypoint(), Some(1));
		assert_ne!(car.state(), AgentState::Idle);
		// planning steps do not move the Vehicle
		assert_eq!(car.position(), (95.0, 4.0));
	}

	#[test]
	fn empty_network_keeps_vehicle_idle() {
		let network = NetworkBuilder::<u32>::new().build();
		let mut rng = WyRand::new_seed(5);
		let mut bike = VehicleAgent::new(VehicleKind::Bike, (0.0, 0.0));
		bike.step(0.1, &network, &mut rng);
		assert_eq!(bike.state(), AgentState::Idle);
	}

	#[test]
	fn dead_end_keeps_planning() {
		let network = line();
		let mut rng = WyRand::new_seed(5);
		let mut car = VehicleAgent::with_config(
			VehicleKind::Car,
			(200.0, 0.0),
			AgentConfig::PERSISTENT,
		);

		// from 2, only 2 itself is reachable
		for _ in 0..20 {
			car.step(0.1, &network, &mut rng);
			if let Some(path) = car.path() {
				assert_eq!(path, &vec![2]);
			}
		}
		assert_eq!(car.current_waypoint(), Some(2));
		assert_eq!(car.position(), (200.0, 0.0));
	}

	#[test]
	fn follows_path_to_the_end() {
		let network = line();
		let mut rng = WyRand::new_seed(1);
		let mut car = VehicleAgent::new(VehicleKind::Car, (0.0, 0.0));
		car.step(0.0, &network, &mut rng);

		while car.path().map_or(true, |path| path.goal() != Some(&2)) {
			car.current = Some(0);
			car.plan(&network, &mut rng);
		}
		assert_eq!(car.state(), AgentState::Following);
		assert_eq!(car.target(), Some(1));
		assert_eq!(car.remaining_waypoints(), &[1, 2]);

		// 200 units at speed 50
		for _ in 0..40 {
			car.step(0.1, &network, &mut rng);
		}
		assert_eq!(car.position(), (200.0, 0.0));
		assert_eq!(car.heading(), 0.0);

		car.step(0.1, &network, &mut rng);
		assert_eq!(car.current_waypoint(), Some(2));
		assert_eq!(car.state(), AgentState::Planning);
	}

	#[test]
	fn zero_tolerance_passes_waypoints() {
		let network = line();
		let mut rng = WyRand::new_seed(1);
		let config = AgentConfig {
			arrival_tolerance: 0.0,
			..Default::default()
		};
		let mut car = VehicleAgent::with_config(VehicleKind::Car, (0.0, 0.0), config);
		car.step(0.0, &network, &mut rng);

		while car.path().map_or(true, |path| path.goal() != Some(&2)) {
			car.current = Some(0);
			car.plan(&network, &mut rng);
		}

		// landing exactly on Waypoint 1 counts as reaching it
		for _ in 0..21 {
			car.step(0.1, &network, &mut rng);
		}
		assert_eq!(car.current_waypoint(), Some(1));
		assert_eq!(car.target(), Some(2));
		assert!(car.position().0 > 100.0);

		for _ in 0..21 {
			car.step(0.1, &network, &mut rng);
		}
		assert_eq!(car.current_waypoint(), Some(2));
		assert_eq!(car.state(), AgentState::Planning);
	}

	#[test]
	fn speed_is_clamped() {
		let mut bus: VehicleAgent<u32> = VehicleAgent::new(VehicleKind::Bus, (0.0, 0.0));
		assert_eq!(bus.speed(), 40.0);
		bus.set_speed(1.0);
		assert_eq!(bus.speed(), 30.0);
		bus.set_speed(9000.0);
		assert_eq!(bus.speed(), 400.0);
		bus.match_speed(None);
		assert_eq!(bus.speed(), 40.0);
		bus.match_speed(Some(35.0));
		assert_eq!(bus.speed(), 35.0);
	}

	#[test]
	fn speed_timer_fires_on_interval() {
		let mut bike: VehicleAgent<u32> = VehicleAgent::new(VehicleKind::Bike, (0.0, 0.0));
		assert!(!bike.advance_speed_timer(0.25));
		assert!(bike.advance_speed_timer(0.25));
		assert!(!bike.advance_speed_timer(0.25));
	}

	#[test]
	fn distance_along_path_pairs_waypoints() {
		let network = line();
		let mut a = VehicleAgent::new(VehicleKind::Car, (0.0, 0.0));
		let mut b = VehicleAgent::new(VehicleKind::Bus, (100.0, 0.0));
		assert_eq!(a.distance_along_path(&b, &network), None);

		a.path = network.find_path(0, 2);
		a.path_index = 1;
		b.path = network.find_path(1, 2);
		b.path_index = 1;

		// a: [1, 2], b: [2] -> only (1, 2) is compared
		assert_eq!(a.distance_along_path(&b, &network), Some(100.0));
		assert_eq!(b.distance_along_path(&a, &network), Some(100.0));

		b.path_index = 2;
		assert_eq!(a.distance_along_path(&b, &network), None);
	}

	#[test]
	fn ahead_means_closer_to_target() {
		let network = line();
		let mut a = VehicleAgent::new(VehicleKind::Car, (10.0, 0.0));
		let b = VehicleAgent::new(VehicleKind::Bus, (60.0, 0.0));
		assert!(!a.is_ahead(&b, &network));

		a.path = network.find_path(0, 1);
		a.path_index = 1;
		assert!(a.is_ahead(&b, &network));
		assert!(!b.is_ahead(&a, &network));
	}
}
