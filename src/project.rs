//! Projection of normalized match records into the public response shape.

use serde::Serialize;
use tracing::{info, warn};

use crate::format::{adjust_time, format_goal_points, format_odds};
use crate::normalize::MatchRecord;

/// League name used when the upstream group carried none.
const UNKNOWN_LEAGUE: &str = "Unknown League";

/// One entry of the public JSON array. Constructed once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedMatch {
    pub league: String,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub is_home_team_highlighted: bool,
    pub is_away_team_highlighted: bool,
    pub odds: String,
    pub final_goal_points: String,
}

/// Map every normalized record into the output shape. A record whose start
/// time does not parse is dropped with a warning rather than emitted with a
/// garbage time.
pub fn project(matches: &[MatchRecord]) -> Vec<FormattedMatch> {
    if matches.is_empty() {
        info!("no matches to project");
        return Vec::new();
    }

    matches
        .iter()
        .filter_map(|m| {
            let time = match adjust_time(&m.start_time) {
                Ok(t) => t,
                Err(e) => {
                    warn!(match_id = %m.match_id, "{}, dropping match", e);
                    return None;
                }
            };

            // The selector picks a team name; the booleans compare that name
            // against both sides, so identical names highlight both.
            let highlighted = if m.highlight_home {
                &m.home_team
            } else {
                &m.away_team
            };

            Some(FormattedMatch {
                league: m
                    .league
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN_LEAGUE.to_string()),
                time,
                home_team: m.home_team.clone(),
                away_team: m.away_team.clone(),
                is_home_team_highlighted: highlighted == &m.home_team,
                is_away_team_highlighted: highlighted == &m.away_team,
                odds: format_odds(m.odds_base, m.odds_adjust),
                final_goal_points: format_goal_points(&m.goal_base, m.goal_adjust),
            })
        })
        .collect()
}
