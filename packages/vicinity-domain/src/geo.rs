use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_MILES: f64 = 3959.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
	pub latitude: f64,
	pub longitude: f64,
}

/// Great-circle distance in miles between two coordinates.
pub fn haversine_miles(a: Coordinates, b: Coordinates) -> f64 {
	let d_lat = (b.latitude - a.latitude).to_radians();
	let d_lon = (b.longitude - a.longitude).to_radians();
	let lat_a = a.latitude.to_radians();
	let lat_b = b.latitude.to_radians();
	let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

	2.0 * EARTH_RADIUS_MILES * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zero_distance_for_identical_points() {
		let p = Coordinates { latitude: 37.7749, longitude: -122.4194 };

		assert!(haversine_miles(p, p).abs() < 1e-9);
	}

	#[test]
	fn is_symmetric() {
		let sf = Coordinates { latitude: 37.7749, longitude: -122.4194 };
		let oak = Coordinates { latitude: 37.8044, longitude: -122.2712 };

		assert!((haversine_miles(sf, oak) - haversine_miles(oak, sf)).abs() < 1e-9);
	}
}
