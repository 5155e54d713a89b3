/// The kind of a Vehicle, which decides its base speed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleKind {
	/// base speed `30`
	Bike,
	/// base speed `40`
	Bus,
	/// base speed `50`
	Car,
}

impl VehicleKind {
	/// The speed a Vehicle of this kind drives at when the road ahead is clear
	pub fn base_speed(self) -> f32 {
		match self {
			VehicleKind::Bike => 30.0,
			VehicleKind::Bus => 40.0,
			VehicleKind::Car => 50.0,
		}
	}
}

/// Options for configuring a [`VehicleAgent`](crate::agent::VehicleAgent)
///
/// Default options:
/// ```
/// # use waypoint_routing::agent::AgentConfig;
/// assert_eq!(
/// 	AgentConfig {
/// 		arrival_tolerance: 1.0,
/// 		min_separation: 100.0,
/// 		speed_check_interval: 0.5,
/// 		min_speed: 30.0,
/// 		max_speed: 400.0,
/// 		plan_attempts: 1,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentConfig {
	/// How close a Vehicle has to get to a Waypoint to count as having reached it (defaults to `1`).
	/// `0` means the Vehicle has to stand exactly on the Waypoint.
	pub arrival_tolerance: f32,
	/// Vehicles closer than this along their Paths match the speed of the one ahead
	/// (defaults to `100`)
	pub min_separation: f32,
	/// Seconds between two speed negotiations (defaults to `0.5`)
	pub speed_check_interval: f32,
	/// Lower bound for the speed (defaults to `30`)
	pub min_speed: f32,
	/// Upper bound for the speed (defaults to `400`)
	pub max_speed: f32,
	/// How many random destinations are tried per tick before giving up until the next tick
	/// (defaults to `1`)
	///
	/// Picking an unreachable destination is normal on Networks with one-way roads or
	/// disconnected parts. A higher value gets Vehicles moving again sooner, at the cost of more
	/// searches per tick.
	pub plan_attempts: usize,
}

impl AgentConfig {
	/// an example AgentConfig for Networks where many destinations are unreachable
	///
	/// Values:
	/// ```
	/// # use waypoint_routing::agent::AgentConfig;
	/// assert_eq!(
	/// 	AgentConfig {
	/// 		arrival_tolerance: 1.0,
	/// 		min_separation: 100.0,
	/// 		speed_check_interval: 0.5,
	/// 		min_speed: 30.0,
	/// 		max_speed: 400.0,
	/// 		plan_attempts: 16,
	/// 	},
	/// 	AgentConfig::PERSISTENT
	/// );
	/// ```
	pub const PERSISTENT: AgentConfig = AgentConfig {
		arrival_tolerance: 1.0,
		min_separation: 100.0,
		speed_check_interval: 0.5,
		min_speed: 30.0,
		max_speed: 400.0,
		plan_attempts: 16,
	};

	/// Clamps `speed` into `[min_speed, max_speed]`
	pub fn clamp_speed(&self, speed: f32) -> f32 {
		speed.max(self.min_speed).min(self.max_speed)
	}
}

impl Default for AgentConfig {
	fn default() -> AgentConfig {
		AgentConfig {
			arrival_tolerance: 1.0,
			min_separation: 100.0,
			speed_check_interval: 0.5,
			min_speed: 30.0,
			max_speed: 400.0,
			plan_attempts: 1,
		}
	}
}

#[test]
fn clamp_speed() {
	let config = AgentConfig::default();
	assert_eq!(config.clamp_speed(10.0), 30.0);
	assert_eq!(config.clamp_speed(55.0), 55.0);
	assert_eq!(config.clamp_speed(1000.0), 400.0);
}

#[test]
fn base_speeds() {
	assert!(VehicleKind::Bike.base_speed() < VehicleKind::Bus.base_speed());
	assert!(VehicleKind::Bus.base_speed() < VehicleKind::Car.base_speed());
}
