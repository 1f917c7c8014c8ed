use vicinity_domain::{
	Coordinates, UNREACHABLE,
	geo::haversine_miles,
	similarity::cosine,
};

fn san_francisco() -> Coordinates {
	Coordinates { latitude: 37.7749, longitude: -122.4194 }
}

#[test]
fn cosine_exact_scenarios() {
	assert!((cosine(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap() - 1.0).abs() < 1e-6);
	assert!(cosine(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap().abs() < 1e-6);
}

#[test]
fn cosine_rejects_dimension_mismatch() {
	assert!(cosine(&[1.0, 2.0], &[1.0, 2.0, 3.0]).is_err());
}

#[test]
fn oakland_is_within_ten_miles_of_san_francisco() {
	let oakland = Coordinates { latitude: 37.8044, longitude: -122.2712 };
	let miles = haversine_miles(san_francisco(), oakland);

	assert!(miles > 5.0 && miles <= 10.0, "unexpected distance: {miles}");
}

#[test]
fn los_angeles_is_outside_ten_miles_of_san_francisco() {
	let los_angeles = Coordinates { latitude: 34.0522, longitude: -118.2437 };
	let miles = haversine_miles(san_francisco(), los_angeles);

	assert!(miles > 300.0, "unexpected distance: {miles}");
}

#[test]
fn sentinel_marks_unreachable() {
	use vicinity_domain::{Candidate, SourceKind};

	let mut candidate = Candidate::new("b-1", SourceKind::EmbeddingMatch, 0.8);

	assert!(!candidate.is_unreachable());

	candidate.distance_miles = Some(UNREACHABLE);

	assert!(candidate.is_unreachable());
}
