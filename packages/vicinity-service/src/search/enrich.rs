use tracing::warn;

use vicinity_domain::{Candidate, Coordinates, UNREACHABLE};

use crate::VicinityService;

/// Attaches travel distance and duration via one matrix call for the whole
/// coordinate-bearing set. Best effort: every failure mode leaves sentinel
/// values behind and the pipeline keeps going.
pub(super) async fn enrich(
	service: &VicinityService,
	candidates: &mut [Candidate],
	origin: Coordinates,
) {
	// Everyone starts unreachable; real metrics overwrite below.
	for candidate in candidates.iter_mut() {
		candidate.distance_miles = Some(UNREACHABLE);
		candidate.eta_minutes = Some(UNREACHABLE);
		candidate.distance_fallback = true;
	}

	let coordinated: Vec<(usize, Coordinates)> = candidates
		.iter()
		.enumerate()
		.filter_map(|(index, candidate)| candidate.coordinates.map(|xy| (index, xy)))
		.collect();

	if coordinated.is_empty() {
		return;
	}

	let destinations: Vec<Coordinates> = coordinated.iter().map(|(_, xy)| *xy).collect();
	let metrics = match service
		.providers
		.distance
		.matrix(&service.cfg.providers.distance, origin, &destinations)
		.await
	{
		Ok(metrics) => metrics,
		Err(err) => {
			warn!(error = %err, "Distance enrichment failed; keeping sentinel distances.");

			return;
		},
	};

	for ((index, _), metric) in coordinated.into_iter().zip(metrics) {
		let Some(metric) = metric else {
			warn!(
				identity = %candidates[index].identity,
				"No travel metrics for destination; keeping sentinel."
			);

			continue;
		};

		candidates[index].distance_miles = Some(metric.miles);
		candidates[index].eta_minutes = Some(metric.minutes);
		candidates[index].distance_fallback = false;
	}
}
