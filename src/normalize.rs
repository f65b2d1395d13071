//! Typed decoding and deduplication of raw match rows.
//!
//! The upstream provider ships each match as a positional array where fixed
//! numeric indices carry semantic meaning. That index-to-meaning mapping is
//! an external contract that can change without notice, so every positional
//! access in the crate lives here, in one decode path.

use std::collections::HashSet;

use serde_json::Value;
use tracing::{debug, warn};

// Field-index contract with the upstream provider.
const IDX_MATCH_ID: usize = 3;
const IDX_START_TIME: usize = 8;
const IDX_HOME_TEAM: usize = 16;
const IDX_AWAY_TEAM: usize = 20;
const IDX_HIGHLIGHT: usize = 34;
const IDX_ODDS_BASE: usize = 50;
const IDX_ODDS_ADJUST: usize = 52;
const IDX_GOAL_BASE: usize = 51;
const IDX_GOAL_ADJUST: usize = 55;

/// Position of the league name inside a league-meta array.
const IDX_LEAGUE_NAME: usize = 1;

/// A raw match row decoded into named fields, with its owning league
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    /// Upstream identity, rendered as JSON text so numeric and string ids
    /// dedupe consistently.
    pub match_id: String,
    pub league: Option<String>,
    /// 12-hour clock string, unadjusted.
    pub start_time: String,
    pub home_team: String,
    pub away_team: String,
    /// True when the highlight selector picks the home side.
    pub highlight_home: bool,
    pub odds_base: f64,
    pub odds_adjust: f64,
    pub goal_base: String,
    pub goal_adjust: f64,
}

impl MatchRecord {
    /// Decode one positional row. Returns `None` when a required cell is
    /// missing or has an unusable type; callers drop such rows rather than
    /// failing the batch.
    fn decode(league: Option<&str>, row: &Value) -> Option<Self> {
        let cells = row.as_array()?;
        Some(Self {
            match_id: cells.get(IDX_MATCH_ID)?.to_string(),
            league: league.map(str::to_string),
            start_time: text_at(cells, IDX_START_TIME)?,
            home_team: text_at(cells, IDX_HOME_TEAM)?,
            away_team: text_at(cells, IDX_AWAY_TEAM)?,
            highlight_home: number_at(cells, IDX_HIGHLIGHT) == Some(1.0),
            odds_base: number_at(cells, IDX_ODDS_BASE)?,
            odds_adjust: number_at(cells, IDX_ODDS_ADJUST)?,
            goal_base: text_at(cells, IDX_GOAL_BASE)?,
            goal_adjust: number_at(cells, IDX_GOAL_ADJUST)?,
        })
    }
}

/// Result of one normalization pass. The league registry is scoped to this
/// call; it is never kept across requests.
#[derive(Debug, Default)]
pub struct NormalizeOutcome {
    pub matches: Vec<MatchRecord>,
    pub leagues: HashSet<String>,
}

/// Flatten `[league_meta, match_rows]` groups into a deduplicated list of
/// decoded records. First occurrence of an identity wins; later duplicates
/// are dropped, not merged. Output order is first-occurrence traversal
/// order.
pub fn normalize(groups: &[Value]) -> NormalizeOutcome {
    let mut outcome = NormalizeOutcome::default();
    let mut seen = HashSet::new();

    for group in groups {
        let Some(pair) = group.as_array() else {
            warn!("match group is not an array, skipping");
            continue;
        };

        let league = pair
            .first()
            .and_then(Value::as_array)
            .and_then(|meta| meta.get(IDX_LEAGUE_NAME))
            .and_then(Value::as_str);
        if let Some(name) = league {
            outcome.leagues.insert(name.to_string());
        }

        let Some(rows) = pair.get(1).and_then(Value::as_array) else {
            warn!(league = league.unwrap_or("?"), "match list missing or not an array, skipping group");
            continue;
        };

        for row in rows {
            let Some(record) = MatchRecord::decode(league, row) else {
                warn!(league = league.unwrap_or("?"), "undecodable match row dropped");
                continue;
            };
            if !seen.insert(record.match_id.clone()) {
                debug!(match_id = %record.match_id, "duplicate match dropped");
                continue;
            }
            outcome.matches.push(record);
        }
    }

    outcome
}

/// String-valued cell; numeric cells coerce to their display text the way
/// the upstream feed mixes them.
fn text_at(cells: &[Value], idx: usize) -> Option<String> {
    match cells.get(idx)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Numeric cell; tolerates numbers shipped as strings.
fn number_at(cells: &[Value], idx: usize) -> Option<f64> {
    match cells.get(idx)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Build a well-formed positional row.
    fn row(id: &str, time: &str, home: &str, away: &str, highlight: i64) -> Value {
        let mut cells = vec![Value::Null; 56];
        cells[IDX_MATCH_ID] = json!(id);
        cells[IDX_START_TIME] = json!(time);
        cells[IDX_HOME_TEAM] = json!(home);
        cells[IDX_AWAY_TEAM] = json!(away);
        cells[IDX_HIGHLIGHT] = json!(highlight);
        cells[IDX_ODDS_BASE] = json!(2);
        cells[IDX_ODDS_ADJUST] = json!(50);
        cells[IDX_GOAL_BASE] = json!("1");
        cells[IDX_GOAL_ADJUST] = json!(25);
        Value::Array(cells)
    }

    fn group(league: &str, rows: Vec<Value>) -> Value {
        json!([["L1", league], rows])
    }

    #[test]
    fn attaches_league_and_decodes_fields() {
        let groups = vec![group(
            "Premier",
            vec![row("m1", "2:00PM", "Alpha", "Beta", 1)],
        )];
        let outcome = normalize(&groups);

        assert_eq!(outcome.matches.len(), 1);
        let m = &outcome.matches[0];
        assert_eq!(m.league.as_deref(), Some("Premier"));
        assert_eq!(m.start_time, "2:00PM");
        assert_eq!(m.home_team, "Alpha");
        assert_eq!(m.away_team, "Beta");
        assert!(m.highlight_home);
        assert_eq!(m.odds_base, 2.0);
        assert_eq!(m.odds_adjust, 50.0);
        assert_eq!(m.goal_base, "1");
        assert_eq!(m.goal_adjust, 25.0);
        assert_eq!(outcome.leagues, HashSet::from(["Premier".to_string()]));
    }

    #[test]
    fn first_occurrence_wins_across_leagues() {
        let groups = vec![
            group("Premier", vec![row("m1", "2:00PM", "Alpha", "Beta", 1)]),
            group("Cup", vec![row("m1", "5:00PM", "Gamma", "Delta", 0)]),
        ];
        let outcome = normalize(&groups);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].home_team, "Alpha");
        assert_eq!(outcome.matches[0].league.as_deref(), Some("Premier"));
        assert_eq!(outcome.leagues.len(), 2);
    }

    #[test]
    fn numeric_and_string_identities_do_not_collide() {
        let groups = vec![group(
            "Premier",
            vec![
                {
                    let mut r = row("1", "2:00PM", "Alpha", "Beta", 1);
                    r[IDX_MATCH_ID] = json!(1);
                    r
                },
                row("1", "3:00PM", "Gamma", "Delta", 0),
            ],
        )];
        let outcome = normalize(&groups);
        assert_eq!(outcome.matches.len(), 2);
    }

    #[test]
    fn skips_group_with_non_array_match_list() {
        let groups = vec![
            json!([["L1", "Broken"], "not rows"]),
            group("Premier", vec![row("m1", "2:00PM", "Alpha", "Beta", 1)]),
        ];
        let outcome = normalize(&groups);

        assert_eq!(outcome.matches.len(), 1);
        // The broken group's league name is still observed.
        assert_eq!(outcome.leagues.len(), 2);
    }

    #[test]
    fn drops_undecodable_rows() {
        let groups = vec![group(
            "Premier",
            vec![json!(["too", "short"]), row("m2", "2:00PM", "Alpha", "Beta", 1)],
        )];
        let outcome = normalize(&groups);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].match_id, "\"m2\"");
    }

    #[test]
    fn missing_league_name_is_tolerated() {
        let groups = vec![json!([["only-id"], [row("m1", "2:00PM", "Alpha", "Beta", 0)]])];
        let outcome = normalize(&groups);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].league, None);
        assert!(!outcome.matches[0].highlight_home);
        assert!(outcome.leagues.is_empty());
    }
}
