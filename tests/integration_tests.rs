use collision_viewer::chart::{ChartDisplay, LineChart};
use collision_viewer::config::{Config, DataSource};
use collision_viewer::fetch::BasicClient;
use collision_viewer::loader::load_dataset;
use collision_viewer::menu::ReportMenu;
use collision_viewer::parser::parse_collisions;
use collision_viewer::ranking::RankedCount;
use collision_viewer::stats::{CollisionStats, PeakMonth};
use std::io::Cursor;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn file_config(name: &str) -> Config {
    Config {
        source: DataSource::File(fixture(name)),
        year: 2024,
        page_size: 50_000,
        log_file_path: None,
    }
}

#[test]
fn test_documented_example_end_to_end() {
    let client = BasicClient::new().expect("Failed to build client");
    let dataset = load_dataset(&client, &file_config("three_crash_example.csv")).expect("Failed to load");
    let stats = CollisionStats::from_dataset(&dataset);

    assert_eq!(stats.total_crashes, 3);
    assert_eq!(stats.total_injured, 3);
    assert_eq!(stats.total_killed, 1);
    assert_eq!(stats.monthly_accidents, [2, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
    assert_eq!(stats.peak_month, Some(PeakMonth { month: 1, count: 2 }));
    assert_eq!(
        stats.top_streets,
        vec![RankedCount::new("Main St", 2), RankedCount::new("Elm", 2)]
    );
    assert_eq!(stats.most_common_vehicle, RankedCount::new("Unknown", 0));
}

#[test]
fn test_sample_year_pipeline() {
    let bytes = include_bytes!("fixtures/collisions_2024_sample.csv");
    let batch = parse_collisions(bytes).expect("Failed to parse fixture");
    assert_eq!(batch.rows_read, 18);
    assert_eq!(batch.unparseable, 1);

    let stats = CollisionStats::from_records(2024, &batch.records);

    assert_eq!(stats.total_crashes, 17);
    assert_eq!(stats.total_injured, 15);
    assert_eq!(stats.total_killed, 1);
    assert_eq!(stats.monthly_accidents.iter().sum::<usize>(), stats.total_crashes);
    assert_eq!(stats.peak_month, Some(PeakMonth { month: 1, count: 3 }));
    assert_eq!(stats.top_streets.len(), 5);
    assert_eq!(stats.top_streets[0], RankedCount::new("BROADWAY", 5));
    assert_eq!(stats.top_streets[1], RankedCount::new("ATLANTIC AVENUE", 3));
    assert_eq!(stats.most_common_vehicle, RankedCount::new("Sedan", 7));
}

/// Counts charts instead of drawing them.
#[derive(Default)]
struct CountingDisplay(usize);

impl ChartDisplay for CountingDisplay {
    fn show(&mut self, chart: &LineChart) -> anyhow::Result<()> {
        assert!(!chart.points.is_empty());
        self.0 += 1;
        Ok(())
    }
}

#[test]
fn test_menu_session_over_loaded_data() {
    let client = BasicClient::new().expect("Failed to build client");
    let dataset =
        load_dataset(&client, &file_config("collisions_2024_sample.csv")).expect("Failed to load");
    let stats = CollisionStats::from_dataset(&dataset);

    let mut menu = ReportMenu::new(&stats, CountingDisplay::default());
    let mut out = Vec::new();
    menu.run(Cursor::new("1\n4\n5\n7\n8\nhelp\n9\n"), &mut out)
        .expect("Menu failed");
    let out = String::from_utf8(out).unwrap();

    assert!(out.contains("Total collisions in 2024: 17"));
    assert!(out.contains("Peak month: January (3 accidents)"));
    assert!(out.contains("1. BROADWAY: 5 accidents"));
    assert!(out.contains("Invalid choice. Please select a number from 1–9."));
    assert!(out.contains("Exiting program. Goodbye!"));
}
