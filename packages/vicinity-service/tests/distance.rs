use vicinity_domain::Coordinates;
use vicinity_providers::distance::TravelMetrics;
use vicinity_service::{DistanceDestination, DistanceRequest, ServiceError};
use vicinity_testkit::{FakeDistance, FakeEmbedding, FakeGenerator, FakePlaces, fake_service, providers};

fn service_with_distance(distance: std::sync::Arc<FakeDistance>) -> vicinity_service::VicinityService {
	fake_service(providers(
		FakeEmbedding::with_default(vec![1.0, 0.0, 0.0]),
		FakePlaces::with_hits(Vec::new()),
		distance,
		FakeGenerator::with_listings(Vec::new()),
	))
}

fn request(count: usize) -> DistanceRequest {
	DistanceRequest {
		origin: Coordinates { latitude: 37.7749, longitude: -122.4194 },
		destinations: (0..count)
			.map(|index| DistanceDestination {
				latitude: 37.8,
				longitude: -122.4 + index as f64 * 0.01,
				business_id: format!("b-{index}"),
			})
			.collect(),
	}
}

fn metric(miles: f64, minutes: f64) -> TravelMetrics {
	TravelMetrics {
		miles,
		minutes,
		distance_text: format!("{miles} mi"),
		duration_text: format!("{minutes} mins"),
	}
}

#[tokio::test]
async fn empty_destination_list_is_rejected() {
	let service = service_with_distance(FakeDistance::with_metrics(Vec::new()));
	let err = service.resolve_distances(request(0)).await.expect_err("expected rejection");

	assert!(matches!(err, ServiceError::InvalidRequest { .. }));
}

#[tokio::test]
async fn provider_metrics_pass_through_with_rounding() {
	let service = service_with_distance(FakeDistance::with_metrics(vec![
		Some(metric(2.44, 8.6)),
		Some(metric(5.0, 15.0)),
	]));
	let response = service.resolve_distances(request(2)).await.expect("resolve failed");

	assert!(response.success);
	assert_eq!(response.results.len(), 2);
	assert_eq!(response.results[0].business_id, "b-0");
	assert_eq!(response.results[0].distance, 2.4);
	assert_eq!(response.results[0].duration, 9);
	assert_eq!(response.results[0].distance_text, "2.44 mi");
	assert!(!response.results[0].estimated);
	assert_eq!(response.results[1].distance, 5.0);
	assert!(!response.results[1].estimated);
}

#[tokio::test]
async fn missing_elements_become_flagged_fallbacks() {
	let service =
		service_with_distance(FakeDistance::with_metrics(vec![Some(metric(1.2, 4.0)), None]));
	let response = service.resolve_distances(request(2)).await.expect("resolve failed");

	assert!(!response.results[0].estimated);

	let fallback = &response.results[1];

	assert!(fallback.estimated);
	assert!(fallback.distance >= 1.0 && fallback.distance <= 5.0);
	assert!(fallback.duration >= 5 && fallback.duration <= 15);
	assert!(!fallback.distance_text.is_empty());
	assert!(!fallback.duration_text.is_empty());
}

#[tokio::test]
async fn total_provider_failure_still_answers_every_destination() {
	let service = service_with_distance(FakeDistance::failing());
	let response = service.resolve_distances(request(3)).await.expect("resolve failed");

	assert!(response.success);
	assert_eq!(response.results.len(), 3);
	assert!(response.results.iter().all(|entry| entry.estimated));

	let ids: Vec<&str> = response.results.iter().map(|entry| entry.business_id.as_str()).collect();

	assert_eq!(ids, vec!["b-0", "b-1", "b-2"]);
}
