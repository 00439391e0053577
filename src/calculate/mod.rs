//! K/D aggregation.
//!
//! Accumulates kill and death totals for one player across a batch of
//! match-stats snapshots and formats the ratio. The ratio is computed
//! over the raw accumulated totals (death-weighted), not as an average
//! of per-match ratios.

use crate::faceit::MatchStats;

/// Accumulated counters for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KdTotals {
    pub kills: f64,
    pub deaths: f64,
    /// Matches in which the player's roster entry was found.
    pub games_counted: u32,
}

impl KdTotals {
    /// `kills / deaths` formatted to exactly two decimals, or `"N/A"`
    /// when no deaths were counted.
    pub fn average_kd(&self) -> String {
        if self.deaths > 0.0 {
            format!("{:.2}", self.kills / self.deaths)
        } else {
            "N/A".to_string()
        }
    }
}

/// Scan a batch of snapshots for `player_id` and accumulate totals.
///
/// Only round 0 of each match is inspected, matching how the upstream
/// reports per-match scoreboards. `None` entries (matches whose stats
/// could not be fetched) and matches where the player does not appear
/// contribute nothing. Unparsable counters count as zero.
pub fn accumulate_kd(snapshots: &[Option<MatchStats>], player_id: &str) -> KdTotals {
    let mut totals = KdTotals::default();

    for stats in snapshots.iter().flatten() {
        let Some(round) = stats.rounds.first() else {
            continue;
        };

        for team in &round.teams {
            if let Some(player) = team.players.iter().find(|p| p.player_id == player_id) {
                totals.kills += parse_counter(&player.player_stats.kills);
                totals.deaths += parse_counter(&player.player_stats.deaths);
                totals.games_counted += 1;
            }
        }
    }

    totals
}

fn parse_counter(raw: &str) -> f64 {
    raw.parse().unwrap_or(0.0)
}
