use crate::foundation::error::EpicycleResult;
use crate::path::model::{Path, PathBuilder, closed_tour_length};
use crate::tour::greedy::nearest_neighbor;
use crate::tour::two_opt::two_opt;

/// Options for [`build_tour`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TourOpts {
    /// Run the 2-opt crossing-removal pass after the greedy ordering.
    pub two_opt: bool,
    /// Upper bound on 2-opt passes over the tour.
    pub max_passes: u32,
}

impl Default for TourOpts {
    fn default() -> Self {
        Self {
            two_opt: false,
            max_passes: 8,
        }
    }
}

/// Order captured samples into a short closed tour and freeze it for analysis.
///
/// Greedy nearest-neighbour always runs; the 2-opt refinement only when enabled in `opts`.
#[tracing::instrument(skip(samples), fields(samples = samples.len()))]
pub fn build_tour(samples: PathBuilder, opts: &TourOpts) -> EpicycleResult<Path> {
    let plane = samples.plane();
    let mut ordered = nearest_neighbor(samples.into_points());

    if opts.two_opt {
        let before = closed_tour_length(&ordered);
        let reversals = two_opt(&mut ordered, opts.max_passes);
        tracing::debug!(
            reversals,
            before,
            after = closed_tour_length(&ordered),
            "2-opt refinement"
        );
    }

    Path::from_points(plane, ordered)
}

#[cfg(test)]
#[path = "../../tests/unit/tour/builder.rs"]
mod tests;
