//! Numbered report menu: a synchronous read-evaluate-print loop over
//! precomputed [`CollisionStats`].

use anyhow::{Result, bail};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::chart::{ChartDisplay, LineChart};
use crate::stats::{CollisionStats, TOP_STREETS};

const RULE: &str = "---------------------------------------";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    TotalCollisions,
    TotalInjured,
    TotalKilled,
    PeakMonth,
    TopStreets,
    CommonVehicle,
    MonthlyTrend,
    VehicleRanking,
    Exit,
}

impl FromStr for Choice {
    type Err = anyhow::Error;

    /// Matches the exact text; surrounding whitespace makes a choice invalid.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Choice::TotalCollisions),
            "2" => Ok(Choice::TotalInjured),
            "3" => Ok(Choice::TotalKilled),
            "4" => Ok(Choice::PeakMonth),
            "5" => Ok(Choice::TopStreets),
            "6" => Ok(Choice::CommonVehicle),
            "7" => Ok(Choice::MonthlyTrend),
            "8" => Ok(Choice::VehicleRanking),
            "9" => Ok(Choice::Exit),
            other => bail!("invalid menu choice '{other}'"),
        }
    }
}

/// Whether the loop keeps going after a choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct ReportMenu<'a, D> {
    stats: &'a CollisionStats,
    display: D,
}

impl<'a, D: ChartDisplay> ReportMenu<'a, D> {
    pub fn new(stats: &'a CollisionStats, display: D) -> Self {
        Self { stats, display }
    }

    /// Shows the menu and answers choices until `9` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            self.write_menu(&mut out)?;
            write!(out, "Enter your choice (1–9): ")?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                info!("Input closed, leaving menu");
                writeln!(out)?;
                return Ok(());
            }

            // undecodable bytes become U+FFFD and fail to match like any other text
            let line = String::from_utf8_lossy(&buf);
            match line.trim_end_matches(['\r', '\n']).parse::<Choice>() {
                Ok(choice) => {
                    debug!(?choice, "Menu choice");
                    if self.respond(choice, &mut out)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Rejected menu input");
                    writeln!(out, "Invalid choice. Please select a number from 1–9.")?;
                }
            }
        }
    }

    /// Performs the action for one choice.
    pub fn respond<W: Write>(&mut self, choice: Choice, out: &mut W) -> Result<Flow> {
        let stats = self.stats;
        let year = stats.year;

        match choice {
            Choice::TotalCollisions => {
                writeln!(out, "\nTotal collisions in {year}: {}", stats.total_crashes)?;
            }
            Choice::TotalInjured => {
                writeln!(out, "\nTotal persons injured in {year}: {}", stats.total_injured)?;
            }
            Choice::TotalKilled => {
                writeln!(out, "\nTotal persons killed in {year}: {}", stats.total_killed)?;
            }
            Choice::PeakMonth => match &stats.peak_month {
                Some(peak) => {
                    writeln!(out, "\nPeak month: {} ({} accidents)", peak.name(), peak.count)?
                }
                None => writeln!(out, "\nPeak month: no data available.")?,
            },
            Choice::TopStreets => {
                writeln!(out, "\nTop {TOP_STREETS} most dangerous streets:")?;
                for (rank, street) in stats.top_streets.iter().enumerate() {
                    writeln!(out, "{}. {}: {} accidents", rank + 1, street.name, street.count)?;
                }
            }
            Choice::CommonVehicle => {
                writeln!(out, "\nMost common vehicle type involved in collisions:")?;
                writeln!(
                    out,
                    "{} ({} collisions)",
                    stats.most_common_vehicle.name, stats.most_common_vehicle.count
                )?;
            }
            Choice::MonthlyTrend => {
                writeln!(out, "\nGenerating monthly accident trend plot...")?;
                out.flush()?;
                self.show(&LineChart::monthly_trend(stats), out)?;
            }
            Choice::VehicleRanking => {
                writeln!(out, "\nGenerating vehicle types ranking plot...")?;
                match LineChart::vehicle_ranking(stats) {
                    Some(chart) => {
                        out.flush()?;
                        self.show(&chart, out)?;
                    }
                    None => writeln!(out, "No vehicle type data available.")?,
                }
            }
            Choice::Exit => {
                writeln!(out, "Exiting program. Goodbye!")?;
                return Ok(Flow::Exit);
            }
        }

        Ok(Flow::Continue)
    }

    /// A chart that cannot be shown is reported and the menu carries on.
    fn show<W: Write>(&mut self, chart: &LineChart, out: &mut W) -> Result<()> {
        if let Err(e) = self.display.show(chart) {
            warn!(error = %e, title = %chart.title, "Chart display failed");
            writeln!(out, "Could not display chart: {e:#}")?;
        }
        Ok(())
    }

    fn write_menu<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "\n{RULE}")?;
        writeln!(out, " NYC Collision Data Viewer ({})", self.stats.year)?;
        writeln!(out, "{RULE}")?;
        writeln!(out, "Choose what data you want to view:")?;
        writeln!(out, "1. Total collisions")?;
        writeln!(out, "2. Total persons injured")?;
        writeln!(out, "3. Total persons killed")?;
        writeln!(out, "4. Month with most accidents")?;
        writeln!(out, "5. Top {TOP_STREETS} most dangerous streets")?;
        writeln!(out, "6. Most common vehicle type involved")?;
        writeln!(out, "7. Monthly accident trend (line plot)")?;
        writeln!(out, "8. Vehicle types ranking (line plot)")?;
        writeln!(out, "9. Exit")?;
        writeln!(out, "{RULE}")?;
        Ok(())
    }
}
