use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::NormalizeError;

const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";
const DAYS_PER_YEAR: i64 = 365;

/// One ranked top scorer, keyed by (player, club).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorerRecord {
    pub position: u32,
    pub player: String,
    pub club: String,
    pub total_goals: i32,
    pub penalty_goals: i32,
    pub assists: i32,
    pub matches: i32,
    pub mins: i32,
    pub age: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub records: Vec<ScorerRecord>,
    pub skipped: Vec<SkippedRecord>,
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct RawScorerRecord {
    player: RawPlayer,
    #[serde(default)]
    statistics: Vec<RawStatistics>,
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    name: String,
    birth: RawBirth,
}

#[derive(Debug, Deserialize)]
struct RawBirth {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawStatistics {
    team: RawTeam,
    goals: RawGoals,
    penalty: RawPenalty,
    games: RawGames,
}

#[derive(Debug, Deserialize)]
struct RawTeam {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawGoals {
    #[serde(default)]
    total: Value,
    #[serde(default)]
    assists: Value,
}

#[derive(Debug, Deserialize)]
struct RawPenalty {
    #[serde(default)]
    scored: Value,
}

#[derive(Debug, Deserialize)]
struct RawGames {
    #[serde(default)]
    appearences: Value,
    #[serde(default)]
    minutes: Value,
}

/// Flattens the API payload into scorer records, in source order.
///
/// `position` is left at 0; ranking assigns it. A missing or empty `response`
/// list yields no records. Entries that do not have the expected shape are
/// skipped and listed in [`Normalized::skipped`].
pub fn normalize(payload: &Value, now: NaiveDateTime) -> Result<Normalized, NormalizeError> {
    let root = payload.as_object().ok_or(NormalizeError::NotAnObject)?;
    let Some(entries) = root.get("response").and_then(|v| v.as_array()) else {
        return Ok(Normalized::default());
    };

    let mut out = Normalized {
        records: Vec::with_capacity(entries.len()),
        skipped: Vec::new(),
    };
    for (index, entry) in entries.iter().enumerate() {
        match normalize_entry(index, entry, now) {
            Ok(record) => out.records.push(record),
            Err(err) => {
                warn!("skipping top scorer record: {err}");
                out.skipped.push(SkippedRecord {
                    index,
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(out)
}

fn normalize_entry(
    index: usize,
    entry: &Value,
    now: NaiveDateTime,
) -> Result<ScorerRecord, NormalizeError> {
    let raw = RawScorerRecord::deserialize(entry).map_err(|err| NormalizeError::Shape {
        index,
        message: err.to_string(),
    })?;
    // Only the first competition block counts.
    let stats = raw
        .statistics
        .into_iter()
        .next()
        .ok_or(NormalizeError::MissingField {
            index,
            field: "statistics",
        })?;

    let birth = raw.player.birth.date.ok_or(NormalizeError::MissingField {
        index,
        field: "player.birth.date",
    })?;

    Ok(ScorerRecord {
        position: 0,
        player: raw.player.name,
        club: stats.team.name,
        total_goals: required_i32(index, &stats.goals.total, "goals.total")?,
        penalty_goals: required_i32(index, &stats.penalty.scored, "penalty.scored")?,
        assists: assists_or_zero(&stats.goals.assists),
        matches: required_i32(index, &stats.games.appearences, "games.appearences")?,
        mins: required_i32(index, &stats.games.minutes, "games.minutes")?,
        age: age_from_birth_date(&birth, now)
            .ok_or(NormalizeError::BirthDate { index, raw: birth })?,
    })
}

/// Whole years between `birth_date` and `now`, counting 365-day years.
pub fn age_from_birth_date(birth_date: &str, now: NaiveDateTime) -> Option<i32> {
    let born = NaiveDate::parse_from_str(birth_date.trim(), BIRTH_DATE_FORMAT).ok()?;
    let days = (now - born.and_hms_opt(0, 0, 0)?).num_days();
    i32::try_from((days / DAYS_PER_YEAR).max(0)).ok()
}

fn required_i32(index: usize, v: &Value, field: &'static str) -> Result<i32, NormalizeError> {
    if v.is_null() {
        return Err(NormalizeError::MissingField { index, field });
    }
    as_i32_any(v).ok_or(NormalizeError::NotAnInteger { index, field })
}

fn assists_or_zero(v: &Value) -> i32 {
    match v {
        Value::Null | Value::Bool(false) => 0,
        Value::String(s) if s.trim().is_empty() => 0,
        other => as_i32_any(other).unwrap_or(0),
    }
}

fn as_i64_any(v: &Value) -> Option<i64> {
    if let Some(n) = v.as_i64() {
        return Some(n);
    }
    v.as_str()?.trim().parse::<i64>().ok()
}

fn as_i32_any(v: &Value) -> Option<i32> {
    let n = as_i64_any(v)?;
    i32::try_from(n).ok()
}
