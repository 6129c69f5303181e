//! Race weekend sessions and randomized session results.
//!
//! A weekend is a fixed ordered list of sessions; each completed session
//! produces a [`SessionResult`] drawn from the team's performance tier.

use crate::reference::PerformanceTier;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// The session slots a race weekend can contain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionKind {
    Fp1,
    Fp2,
    Fp3,
    SprintShootout,
    SprintRace,
    Qualifying,
    Race,
}

impl SessionKind {
    /// Whether results for this session use the qualifying gap table.
    pub fn is_qualifying_class(&self) -> bool {
        matches!(self, SessionKind::Qualifying | SessionKind::SprintShootout)
    }

    /// Uppercased hashtag form, e.g. `#FP1`.
    pub fn hashtag(&self) -> String {
        format!("#{}", self.to_string().to_uppercase())
    }
}

/// Weekend format variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WeekendKind {
    StandardWeekend,
    SprintWeekend,
}

impl Default for WeekendKind {
    fn default() -> Self {
        WeekendKind::StandardWeekend
    }
}

/// One scheduled slot in a weekend template.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeekendSession {
    pub kind: SessionKind,
    pub duration_min: u32,
    pub day: &'static str,
}

const STANDARD_WEEKEND: [WeekendSession; 5] = [
    WeekendSession { kind: SessionKind::Fp1, duration_min: 90, day: "Friday" },
    WeekendSession { kind: SessionKind::Fp2, duration_min: 90, day: "Friday" },
    WeekendSession { kind: SessionKind::Fp3, duration_min: 60, day: "Saturday" },
    WeekendSession { kind: SessionKind::Qualifying, duration_min: 60, day: "Saturday" },
    WeekendSession { kind: SessionKind::Race, duration_min: 120, day: "Sunday" },
];

const SPRINT_WEEKEND: [WeekendSession; 5] = [
    WeekendSession { kind: SessionKind::Fp1, duration_min: 90, day: "Friday" },
    WeekendSession { kind: SessionKind::SprintShootout, duration_min: 45, day: "Friday" },
    WeekendSession { kind: SessionKind::SprintRace, duration_min: 100, day: "Saturday" },
    WeekendSession { kind: SessionKind::Qualifying, duration_min: 60, day: "Saturday" },
    WeekendSession { kind: SessionKind::Race, duration_min: 120, day: "Sunday" },
];

/// The ordered session list for a weekend format.
pub fn weekend_sessions(kind: WeekendKind) -> &'static [WeekendSession] {
    match kind {
        WeekendKind::StandardWeekend => &STANDARD_WEEKEND,
        WeekendKind::SprintWeekend => &SPRINT_WEEKEND,
    }
}

/// Result of one completed session. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    /// Finishing position, 1-20
    pub position: u32,
    /// Gap to the session leader; `None` when leading
    pub gap_to_leader: Option<String>,
    /// Best lap time, `M:SS.mmm`
    pub best_time: String,
    /// Laps completed during the session
    pub laps_completed: u32,
    /// Zero to two incident descriptions
    pub incidents: Vec<String>,
}

impl PerformanceTier {
    /// The closed finishing-position range for this tier.
    ///
    /// Ranges are non-overlapping and together cover 1-20.
    pub fn position_range(&self) -> std::ops::RangeInclusive<u32> {
        match self {
            PerformanceTier::TopTeam => 1..=6,
            PerformanceTier::Midfield => 7..=15,
            PerformanceTier::Backmarker => 16..=20,
        }
    }
}

const QUALIFYING_GAPS: [&str; 9] = [
    "+0.000", "+0.123", "+0.287", "+0.445", "+0.567", "+0.789", "+1.234", "+1.567", "+2.123",
];

const INCIDENT_POOL: [&str; 5] = [
    "lock-up turn 1",
    "flat-spot front left",
    "off-track limits turn 4",
    "yellow flag sector 2",
    "traffic in final sector",
];

/// Generates a randomized session outcome for the given tier.
///
/// Always returns a well-formed result; the position is drawn uniformly
/// from the tier's range, gaps and lap counts follow the session class.
pub fn generate_session_result(
    session: SessionKind,
    tier: PerformanceTier,
    rng: &mut dyn RngCore,
) -> SessionResult {
    let position = rng.gen_range(tier.position_range());

    let (gap_to_leader, best_time, laps_completed) = if session.is_qualifying_class() {
        let gap = (position > 1)
            .then(|| QUALIFYING_GAPS[(position as usize - 1).min(QUALIFYING_GAPS.len() - 1)])
            .map(str::to_string);
        (gap, "1:23.456".to_string(), rng.gen_range(8..=12))
    } else {
        let gap = (position > 1).then(|| format!("+{:.3}", rng.gen_range(0.1..=3.0)));
        let best_time = format!("1:{}.{}", rng.gen_range(22..=26), rng.gen_range(100..=999));
        (gap, best_time, rng.gen_range(15..=35))
    };

    let incident_count = rng.gen_range(0..=2);
    let incidents = INCIDENT_POOL
        .choose_multiple(rng, incident_count)
        .map(|s| s.to_string())
        .collect();

    SessionResult {
        position,
        gap_to_leader,
        best_time,
        laps_completed,
        incidents,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tier_ranges_cover_grid_without_overlap() {
        let mut covered = [false; 20];
        for tier in [
            PerformanceTier::TopTeam,
            PerformanceTier::Midfield,
            PerformanceTier::Backmarker,
        ] {
            for position in tier.position_range() {
                let slot = &mut covered[position as usize - 1];
                assert!(!*slot, "position {position} covered twice");
                *slot = true;
            }
        }
        assert!(covered.iter().all(|c| *c), "tiers must cover 1-20");
    }

    #[test]
    fn test_result_position_stays_in_tier_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for tier in [
            PerformanceTier::TopTeam,
            PerformanceTier::Midfield,
            PerformanceTier::Backmarker,
        ] {
            for session in SessionKind::iter() {
                for _ in 0..25 {
                    let result = generate_session_result(session, tier, &mut rng);
                    assert!(tier.position_range().contains(&result.position));
                    assert!(result.incidents.len() <= 2);
                }
            }
        }
    }

    #[test]
    fn test_qualifying_gap_comes_from_fixed_table() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let result = generate_session_result(
                SessionKind::Qualifying,
                PerformanceTier::Backmarker,
                &mut rng,
            );
            // Backmarker positions exceed the table length, so the gap caps
            // at the last entry.
            assert_eq!(result.gap_to_leader.as_deref(), Some("+2.123"));
            assert_eq!(result.best_time, "1:23.456");
            assert!((8..=12).contains(&result.laps_completed));
        }
    }

    #[test]
    fn test_leader_has_no_gap() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut saw_leader = false;
        for _ in 0..200 {
            let result =
                generate_session_result(SessionKind::Race, PerformanceTier::TopTeam, &mut rng);
            if result.position == 1 {
                saw_leader = true;
                assert!(result.gap_to_leader.is_none());
            } else {
                let gap = result.gap_to_leader.expect("non-leader should have a gap");
                assert!(gap.starts_with('+'));
            }
        }
        assert!(saw_leader, "200 top-team draws should produce a P1");
    }

    #[test]
    fn test_practice_lap_counts() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            let result =
                generate_session_result(SessionKind::Fp2, PerformanceTier::Midfield, &mut rng);
            assert!((15..=35).contains(&result.laps_completed));
        }
    }

    #[test]
    fn test_seeded_generation_is_deterministic() {
        let mut a = StdRng::seed_from_u64(1234);
        let mut b = StdRng::seed_from_u64(1234);
        let ra = generate_session_result(SessionKind::Race, PerformanceTier::Midfield, &mut a);
        let rb = generate_session_result(SessionKind::Race, PerformanceTier::Midfield, &mut b);
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_session_kind_round_trips_through_strings() {
        assert_eq!(SessionKind::Fp1.to_string(), "fp1");
        assert_eq!(SessionKind::SprintShootout.to_string(), "sprint_shootout");
        assert_eq!(SessionKind::from_str("qualifying"), Ok(SessionKind::Qualifying));
        assert!(SessionKind::from_str("warmup").is_err());
        assert_eq!(
            WeekendKind::from_str("sprint_weekend"),
            Ok(WeekendKind::SprintWeekend)
        );
    }

    #[test]
    fn test_weekend_templates() {
        let standard = weekend_sessions(WeekendKind::StandardWeekend);
        assert_eq!(standard.len(), 5);
        assert_eq!(standard[0].kind, SessionKind::Fp1);
        assert_eq!(standard[4].kind, SessionKind::Race);
        assert_eq!(standard[4].day, "Sunday");

        let sprint = weekend_sessions(WeekendKind::SprintWeekend);
        assert_eq!(sprint[1].kind, SessionKind::SprintShootout);
        assert_eq!(sprint[2].kind, SessionKind::SprintRace);
    }

    #[test]
    fn test_session_hashtag() {
        assert_eq!(SessionKind::Fp3.hashtag(), "#FP3");
        assert_eq!(SessionKind::SprintRace.hashtag(), "#SPRINT_RACE");
    }
}
