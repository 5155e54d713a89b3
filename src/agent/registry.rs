use super::VehicleAgent;
use crate::{Network, PositionProvider};

use nanorand::WyRand;
use std::hash::Hash;

/// Identifies a Vehicle inside a [`VehicleRegistry`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(usize);

/// All Vehicles of a simulation.
///
/// The registry moves every Vehicle once per [`tick`](VehicleRegistry::tick) and answers
/// proximity queries between them. Vehicles that follow another Vehicle closely take over its
/// speed, see [`VehicleAgent::distance_along_path`].
///
/// ## Examples
/// ```
/// use waypoint_routing::prelude::*;
///
/// let mut registry: VehicleRegistry<u32> = VehicleRegistry::new();
/// let bike = registry.register(VehicleAgent::new(VehicleKind::Bike, (0.0, 0.0)));
/// let car = registry.register(VehicleAgent::new(VehicleKind::Car, (5.0, 0.0)));
///
/// registry.change_speed_for_all(2.0);
/// assert_eq!(registry[bike].speed(), 60.0);
/// assert_eq!(registry[car].base_speed(), 100.0);
///
/// registry.unregister(bike);
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct VehicleRegistry<Id> {
	agents: slab::Slab<VehicleAgent<Id>>,
	paused: bool,
}

impl<Id: Copy + Eq + Hash> VehicleRegistry<Id> {
	/// Creates an empty registry
	pub fn new() -> VehicleRegistry<Id> {
		VehicleRegistry {
			agents: slab::Slab::new(),
			paused: false,
		}
	}

	/// Adds a Vehicle
	pub fn register(&mut self, agent: VehicleAgent<Id>) -> AgentId {
		AgentId(self.agents.insert(agent))
	}

	/// Removes a Vehicle. Returns `None` if `id` was already removed.
	pub fn unregister(&mut self, id: AgentId) -> Option<VehicleAgent<Id>> {
		if self.agents.contains(id.0) {
			Some(self.agents.remove(id.0))
		} else {
			None
		}
	}

	/// The Vehicle with the given id
	pub fn get(&self, id: AgentId) -> Option<&VehicleAgent<Id>> {
		self.agents.get(id.0)
	}

	/// The Vehicle with the given id
	pub fn get_mut(&mut self, id: AgentId) -> Option<&mut VehicleAgent<Id>> {
		self.agents.get_mut(id.0)
	}

	/// Iterates over all Vehicles
	pub fn iter(&self) -> impl Iterator<Item = (AgentId, &VehicleAgent<Id>)> + '_ {
		self.agents.iter().map(|(key, agent)| (AgentId(key), agent))
	}

	/// The number of Vehicles
	pub fn len(&self) -> usize {
		self.agents.len()
	}

	/// `true` if there are no Vehicles
	pub fn is_empty(&self) -> bool {
		self.agents.is_empty()
	}

	/// `true` if [`tick`](VehicleRegistry::tick) is currently ignored
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Pauses or resumes the simulation
	pub fn set_paused(&mut self, paused: bool) {
		self.paused = paused;
	}

	/// Multiplies the speed of every Vehicle by `multiplier`.
	///
	/// The new speed is clamped to the configured bounds and then becomes the base speed as well,
	/// so Vehicles keep it once the road ahead is clear.
	pub fn change_speed_for_all(&mut self, multiplier: f32) {
		for (_, agent) in self.agents.iter_mut() {
			agent.set_speed(agent.speed() * multiplier);
			let speed = agent.speed();
			agent.set_base_speed(speed);
		}
	}

	/// Sets every Vehicle back to its base speed
	pub fn reset_all(&mut self) {
		for (_, agent) in self.agents.iter_mut() {
			let base_speed = agent.base_speed();
			agent.set_speed(base_speed);
		}
	}

	/// Finds the Vehicle ahead of `id` that is closest to it along their Paths and within
	/// [`min_separation`](super::AgentConfig::min_separation) of it.
	///
	/// Only Vehicles that are [ahead](VehicleAgent::is_ahead) count, so two Vehicles never take
	/// over each other's speed at the same time. A Vehicle right behind `id` is never returned,
	/// even if it is closer along the Paths than every Vehicle ahead.
	///
	/// ## Returns
	/// the id of that Vehicle and its distance, or `None` if the road ahead is clear
	pub fn closest_vehicle<P>(&self, id: AgentId, positions: &P) -> Option<(AgentId, f32)>
	where
		P: PositionProvider<Id> + ?Sized,
	{
		let agent = self.agents.get(id.0)?;
		let min_separation = agent.config().min_separation;

		self.iter()
			.filter(|&(other_id, other)| other_id != id && agent.is_ahead(other, positions))
			.filter_map(|(other_id, other)| {
				agent
					.distance_along_path(other, positions)
					.map(|dist| (other_id, dist))
			})
			.filter(|&(_, dist)| dist < min_separation)
			.min_by(|a, b| a.1.total_cmp(&b.1))
	}

	/// Advances the simulation by `dt` seconds.
	///
	/// Vehicles whose speed check is due first negotiate their speed, based on where all
	/// Vehicles were at the start of the tick. Then every Vehicle takes a
	/// [`step`](VehicleAgent::step). Nothing happens while the registry is paused.
	pub fn tick(&mut self, dt: f32, network: &Network<Id>, rng: &mut WyRand) {
		if self.paused {
			return;
		}

		let due: Vec<AgentId> = self
			.agents
			.iter_mut()
			.filter_map(|(key, agent)| agent.advance_speed_timer(dt).then_some(AgentId(key)))
			.collect();

		let lead_speeds: Vec<(AgentId, Option<f32>)> = due
			.into_iter()
			.map(|id| {
				let lead_speed = self
					.closest_vehicle(id, network)
					.map(|(lead, _)| self.agents[lead.0].speed());
				(id, lead_speed)
			})
			.collect();

		for (id, lead_speed) in lead_speeds {
			self.agents[id.0].match_speed(lead_speed);
		}

		for (_, agent) in self.agents.iter_mut() {
			agent.step(dt, network, rng);
		}
	}
}

impl<Id: Copy + Eq + Hash> Default for VehicleRegistry<Id> {
	fn default() -> VehicleRegistry<Id> {
		VehicleRegistry::new()
	}
}

use std::ops::{Index, IndexMut};
impl<Id> Index<AgentId> for VehicleRegistry<Id> {
	type Output = VehicleAgent<Id>;
	#[track_caller]
	fn index(&self, index: AgentId) -> &VehicleAgent<Id> {
		&self.agents[index.0]
	}
}
impl<Id> IndexMut<AgentId> for VehicleRegistry<Id> {
	#[track_caller]
	fn index_mut(&mut self, index: AgentId) -> &mut VehicleAgent<Id> {
		&mut self.agents[index.0]
	}
}
