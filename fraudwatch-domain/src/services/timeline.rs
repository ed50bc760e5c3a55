// Client-side shaping of the flat case list for table and heatmap views

use chrono::Timelike;

use crate::entities::{DetectionCase, HourlyDistribution};
use crate::utils::millis_to_utc;
use crate::value_objects::ModelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseSort {
    #[default]
    NewestFirst,
    ScoreDesc,
}

#[derive(Debug, Clone, Default)]
pub struct CaseQuery {
    pub model: ModelFilter,
    pub min_score: Option<f64>,
    pub sanctioned_only: bool,
    pub sort: CaseSort,
    pub offset: usize,
    pub limit: Option<usize>,
}

/// Filter, sort and page a case list without touching the backend.
pub fn select_cases(cases: &[DetectionCase], query: &CaseQuery) -> Vec<DetectionCase> {
    let mut selected: Vec<DetectionCase> = cases
        .iter()
        .filter(|case| query.model.matches(case.model))
        .filter(|case| query.min_score.map_or(true, |min| case.score >= min))
        .filter(|case| !query.sanctioned_only || case.is_sanctioned)
        .cloned()
        .collect();

    match query.sort {
        CaseSort::NewestFirst => selected.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms)),
        CaseSort::ScoreDesc => selected.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    selected
        .into_iter()
        .skip(query.offset)
        .take(query.limit.unwrap_or(usize::MAX))
        .collect()
}

/// Detection counts per UTC hour of day, recomputed locally from the case
/// list instead of the backend's endpoint.
pub fn hourly_histogram(cases: &[DetectionCase]) -> HourlyDistribution {
    let mut histogram = HourlyDistribution::new();
    for case in cases {
        let hour = millis_to_utc(case.timestamp_ms).hour() as u8;
        *histogram.entry(hour).or_insert(0) += 1;
    }
    histogram
}
