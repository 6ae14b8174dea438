use chrono::{Datelike, Month};
use serde::Serialize;

use crate::loader::CollisionDataset;
use crate::ranking::{RankedCount, rank_by_frequency};
use crate::record::CollisionRecord;

/// How many streets the "most dangerous streets" ranking keeps.
pub const TOP_STREETS: usize = 5;

/// Reported when no record carries a vehicle type.
pub const UNKNOWN_VEHICLE: &str = "Unknown";

/// The calendar month with the most crashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeakMonth {
    /// 1 = January.
    pub month: u32,
    pub count: usize,
}

impl PeakMonth {
    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }
}

/// Aggregates computed once over a year of collisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionStats {
    pub year: i32,
    pub total_crashes: usize,
    pub total_injured: u64,
    pub total_killed: u64,

    // rankings, descending by count
    pub top_streets: Vec<RankedCount>,
    pub vehicle_type_counts: Vec<RankedCount>,
    pub most_common_vehicle: RankedCount,

    /// Crash counts for January..December, zero-filled.
    pub monthly_accidents: [usize; 12],
    /// `None` when there are no crashes at all.
    pub peak_month: Option<PeakMonth>,
}

impl CollisionStats {
    pub fn from_dataset(dataset: &CollisionDataset) -> Self {
        Self::from_records(dataset.year(), dataset.records())
    }

    pub fn from_records(year: i32, records: &[CollisionRecord]) -> Self {
        // Missing counts contribute nothing; the float sum is truncated.
        let total_injured = records.iter().filter_map(|r| r.persons_injured).sum::<f64>() as u64;
        let total_killed = records.iter().filter_map(|r| r.persons_killed).sum::<f64>() as u64;

        // Every on-street name in row order, then every cross-street name.
        let pooled_streets = records
            .iter()
            .filter_map(|r| r.on_street.as_deref())
            .chain(records.iter().filter_map(|r| r.cross_street.as_deref()));
        let mut top_streets = rank_by_frequency(pooled_streets);
        top_streets.truncate(TOP_STREETS);

        let mut monthly_accidents = [0usize; 12];
        for record in records {
            monthly_accidents[record.crashed_at.month0() as usize] += 1;
        }
        let peak_month = peak_month(&monthly_accidents);

        let vehicle_type_counts =
            rank_by_frequency(records.iter().filter_map(|r| r.vehicle_type.as_deref()));
        let most_common_vehicle = vehicle_type_counts
            .first()
            .cloned()
            .unwrap_or_else(|| RankedCount::new(UNKNOWN_VEHICLE, 0));

        CollisionStats {
            year,
            total_crashes: records.len(),
            total_injured,
            total_killed,
            top_streets,
            vehicle_type_counts,
            most_common_vehicle,
            monthly_accidents,
            peak_month,
        }
    }

    /// `(month name, crashes)` for January..December.
    pub fn monthly_series(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.monthly_accidents
            .iter()
            .enumerate()
            .map(|(idx, &count)| (month_name(idx as u32 + 1), count))
    }
}

/// First month holding the maximum count; `None` if every month is zero.
fn peak_month(monthly: &[usize; 12]) -> Option<PeakMonth> {
    let mut peak: Option<PeakMonth> = None;
    for (idx, &count) in monthly.iter().enumerate() {
        if count > 0 && peak.as_ref().is_none_or(|p| count > p.count) {
            peak = Some(PeakMonth {
                month: idx as u32 + 1,
                count,
            });
        }
    }
    peak
}

/// Full English name of a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map_or("Unknown", |m| m.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::parse_timestamp;

    fn record(date: &str, injured: Option<f64>, killed: Option<f64>) -> CollisionRecord {
        CollisionRecord {
            crashed_at: parse_timestamp(date, "12:00").unwrap(),
            borough: None,
            on_street: None,
            cross_street: None,
            persons_injured: injured,
            persons_killed: killed,
            vehicle_type: None,
        }
    }

    fn with_streets(mut r: CollisionRecord, on: Option<&str>, cross: Option<&str>) -> CollisionRecord {
        r.on_street = on.map(str::to_string);
        r.cross_street = cross.map(str::to_string);
        r
    }

    fn with_vehicle(mut r: CollisionRecord, vehicle: &str) -> CollisionRecord {
        r.vehicle_type = Some(vehicle.to_string());
        r
    }

    fn example_records() -> Vec<CollisionRecord> {
        vec![
            with_streets(record("2024-01-05", Some(1.0), Some(0.0)), Some("Main St"), Some("Elm")),
            with_streets(record("2024-01-05", Some(0.0), Some(1.0)), Some("Main St"), None),
            with_streets(record("2024-02-01", Some(2.0), Some(0.0)), Some("Elm"), None),
        ]
    }

    #[test]
    fn test_example_totals() {
        let stats = CollisionStats::from_records(2024, &example_records());

        assert_eq!(stats.total_crashes, 3);
        assert_eq!(stats.total_injured, 3);
        assert_eq!(stats.total_killed, 1);
        assert_eq!(stats.monthly_accidents, [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(stats.peak_month, Some(PeakMonth { month: 1, count: 2 }));
        assert_eq!(stats.peak_month.as_ref().unwrap().name(), "January");
    }

    #[test]
    fn test_example_streets_pool_both_columns() {
        let stats = CollisionStats::from_records(2024, &example_records());
        assert_eq!(
            stats.top_streets,
            vec![RankedCount::new("Main St", 2), RankedCount::new("Elm", 2)]
        );
    }

    #[test]
    fn test_from_dataset_carries_year() {
        let dataset = CollisionDataset::new(2023, example_records());
        let stats = CollisionStats::from_dataset(&dataset);
        assert_eq!(stats.year, 2023);
        assert_eq!(stats.total_crashes, 3);
    }

    #[test]
    fn test_empty_dataset() {
        let stats = CollisionStats::from_records(2024, &[]);

        assert_eq!(stats.total_crashes, 0);
        assert_eq!(stats.total_injured, 0);
        assert_eq!(stats.total_killed, 0);
        assert!(stats.top_streets.is_empty());
        assert!(stats.vehicle_type_counts.is_empty());
        assert_eq!(stats.monthly_accidents, [0; 12]);
        assert_eq!(stats.peak_month, None);
        assert_eq!(stats.most_common_vehicle, RankedCount::new(UNKNOWN_VEHICLE, 0));
    }

    #[test]
    fn test_missing_counts_sum_to_zero() {
        let records = vec![record("2024-03-01", None, None), record("2024-03-02", None, None)];
        let stats = CollisionStats::from_records(2024, &records);
        assert_eq!(stats.total_injured, 0);
        assert_eq!(stats.total_killed, 0);
    }

    #[test]
    fn test_fractional_sum_truncates() {
        let records = vec![record("2024-03-01", Some(1.5), None), record("2024-03-02", Some(1.4), None)];
        let stats = CollisionStats::from_records(2024, &records);
        assert_eq!(stats.total_injured, 2);
    }

    #[test]
    fn test_peak_month_tie_prefers_earliest() {
        let records = vec![
            record("2024-05-01", None, None),
            record("2024-03-01", None, None),
            record("2024-05-02", None, None),
            record("2024-03-02", None, None),
        ];
        let stats = CollisionStats::from_records(2024, &records);
        assert_eq!(stats.peak_month, Some(PeakMonth { month: 3, count: 2 }));
    }

    #[test]
    fn test_top_streets_keeps_five() {
        let names = ["A", "B", "C", "D", "E", "F", "G"];
        let records: Vec<_> = names
            .iter()
            .enumerate()
            .flat_map(|(i, &name)| {
                // A appears 7 times, B 6 times, ...
                (0..(names.len() - i))
                    .map(move |_| with_streets(record("2024-04-01", None, None), Some(name), None))
            })
            .collect();

        let stats = CollisionStats::from_records(2024, &records);
        let top: Vec<_> = stats.top_streets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(top, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(stats.top_streets[0].count, 7);
    }

    #[test]
    fn test_vehicle_ranking() {
        let records = vec![
            with_vehicle(record("2024-06-01", None, None), "Taxi"),
            with_vehicle(record("2024-06-01", None, None), "Sedan"),
            with_vehicle(record("2024-06-01", None, None), "Sedan"),
            record("2024-06-01", None, None),
        ];
        let stats = CollisionStats::from_records(2024, &records);
        assert_eq!(stats.most_common_vehicle, RankedCount::new("Sedan", 2));
        assert_eq!(
            stats.vehicle_type_counts,
            vec![RankedCount::new("Sedan", 2), RankedCount::new("Taxi", 1)]
        );
    }

    #[test]
    fn test_monthly_series_names_every_month() {
        let stats = CollisionStats::from_records(2024, &example_records());
        let series: Vec<_> = stats.monthly_series().collect();
        assert_eq!(series.len(), 12);
        assert_eq!(series[0], ("January", 2));
        assert_eq!(series[1], ("February", 1));
        assert_eq!(series[11], ("December", 0));
    }

    #[test]
    fn test_month_name_out_of_range() {
        assert_eq!(month_name(0), "Unknown");
        assert_eq!(month_name(13), "Unknown");
        assert_eq!(month_name(12), "December");
    }
}
