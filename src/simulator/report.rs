//! Simulation report generation.

use std::collections::BTreeMap;

use serde::Serialize;

use super::config::SimConfig;
use super::runner::RunStats;

/// Aggregated results from multiple simulation runs.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub encounters_per_run: u32,
    pub starting_level: u32,

    pub total_encounters: u64,
    pub win_rate: f64,
    pub loss_rate: f64,
    pub flee_rate: f64,
    pub stalled: u64,

    pub avg_rounds_per_encounter: f64,
    pub avg_final_level: f64,
    pub avg_total_xp: f64,

    /// Final level -> number of runs.
    pub level_distribution: BTreeMap<u32, u32>,

    // Individual run stats for detailed analysis
    #[serde(skip)]
    pub run_stats: Vec<RunStats>,
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

impl SimReport {
    /// Create a new report from completed run stats.
    pub fn from_runs(runs: Vec<RunStats>, config: &SimConfig) -> Self {
        let num_runs = runs.len() as u32;
        let wins: u64 = runs.iter().map(|r| r.wins as u64).sum();
        let losses: u64 = runs.iter().map(|r| r.losses as u64).sum();
        let flees: u64 = runs.iter().map(|r| r.flees as u64).sum();
        let stalled: u64 = runs.iter().map(|r| r.stalled as u64).sum();
        let finished = wins + losses + flees;
        let total_rounds: u64 = runs.iter().map(|r| r.total_rounds).sum();

        let runs_divisor = num_runs.max(1) as f64;
        let avg_final_level =
            runs.iter().map(|r| r.final_level as f64).sum::<f64>() / runs_divisor;
        let avg_total_xp = runs.iter().map(|r| r.total_xp as f64).sum::<f64>() / runs_divisor;

        let mut level_distribution = BTreeMap::new();
        for run in &runs {
            *level_distribution.entry(run.final_level).or_insert(0) += 1;
        }

        Self {
            num_runs,
            encounters_per_run: config.encounters_per_run,
            starting_level: config.starting_level,
            total_encounters: finished + stalled,
            win_rate: ratio(wins, finished),
            loss_rate: ratio(losses, finished),
            flee_rate: ratio(flees, finished),
            stalled,
            avg_rounds_per_encounter: ratio(total_rounds, finished),
            avg_final_level,
            avg_total_xp,
            level_distribution,
            run_stats: runs,
        }
    }

    /// Generate a text report.
    pub fn to_text(&self) -> String {
        let mut report = String::new();

        report.push_str("═══════════════════════════════════════════════════════════════\n");
        report.push_str("                  ENCOUNTER SIMULATION REPORT\n");
        report.push_str("═══════════════════════════════════════════════════════════════\n\n");

        report.push_str(&format!(
            "Runs: {} x {} encounters, starting at level {}\n\n",
            self.num_runs, self.encounters_per_run, self.starting_level
        ));

        report.push_str("── OUTCOMES ─────────────────────────────────────────────────────\n");
        report.push_str(&format!("  Win Rate:            {:.1}%\n", self.win_rate * 100.0));
        report.push_str(&format!("  Loss Rate:           {:.1}%\n", self.loss_rate * 100.0));
        report.push_str(&format!("  Flee Rate:           {:.1}%\n", self.flee_rate * 100.0));
        report.push_str(&format!(
            "  Avg Rounds/Fight:    {:.1}\n",
            self.avg_rounds_per_encounter
        ));
        if self.stalled > 0 {
            report.push_str(&format!("  Stalled Encounters:  {}\n", self.stalled));
        }
        report.push('\n');

        report.push_str("── PROGRESSION ──────────────────────────────────────────────────\n");
        report.push_str(&format!("  Avg Final Level:     {:.1}\n", self.avg_final_level));
        report.push_str(&format!("  Avg Total XP:        {:.0}\n\n", self.avg_total_xp));

        report.push_str("── FINAL LEVELS ─────────────────────────────────────────────────\n");
        for (level, count) in &self.level_distribution {
            let pct = ratio(*count as u64, self.num_runs as u64) * 100.0;
            let bar: String = "█".repeat((pct / 5.0) as usize);
            report.push_str(&format!("  Level {:3}: {:>5.1}% {}\n", level, pct, bar));
        }
        report.push('\n');

        report.push_str("── BALANCE ASSESSMENT ───────────────────────────────────────────\n");
        let rating = if self.loss_rate < 0.05 {
            "TOO EASY - Players rarely lose"
        } else if self.loss_rate < 0.25 {
            "GOOD - Challenging but fair"
        } else if self.loss_rate < 0.5 {
            "HARD - Frequent losses"
        } else {
            "TOO HARD - Most encounters lost"
        };
        report.push_str(&format!("  Difficulty:      {}\n", rating));
        if self.avg_rounds_per_encounter > 15.0 {
            report.push_str("  ⚠️  Fights drag on - damage too low for HP?\n");
        }
        if self.flee_rate > 0.2 {
            report.push_str("  ⚠️  Many escapes - spawn levels outpacing the player?\n");
        }

        report.push_str("\n═══════════════════════════════════════════════════════════════\n");
        report
    }

    /// Generate a JSON report for further analysis.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}
