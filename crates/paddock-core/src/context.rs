//! Driver context domain model.
//!
//! One [`DriverContext`] exists per persona session. It is created once by
//! the engine boundary, mutated in place by every subsequent operation and
//! dropped with the owning session; there is no durable persistence.

use crate::error::{PaddockError, Result};
use crate::reference::{self, DEFAULT_CIRCUIT_KEY};
use crate::session::{SessionKind, SessionResult, WeekendKind};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use uuid::Uuid;

/// High-level phase of the race weekend state machine.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    PreWeekend,
    Practice,
    Qualifying,
    RaceDay,
    PostRace,
    OffSeason,
}

impl Phase {
    /// The phase a session slot maps to while it is running.
    pub fn for_session(session: SessionKind) -> Phase {
        match session {
            SessionKind::Fp1 | SessionKind::Fp2 | SessionKind::Fp3 => Phase::Practice,
            SessionKind::Qualifying | SessionKind::SprintShootout => Phase::Qualifying,
            SessionKind::Race | SessionKind::SprintRace => Phase::RaceDay,
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::PreWeekend
    }
}

/// Five-step mood scale, ordered best to worst.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mood {
    Ecstatic,
    Satisfied,
    Neutral,
    Disappointed,
    Frustrated,
}

impl Mood {
    /// Deterministic mood banding over a finishing position.
    pub fn for_position(position: u32) -> Mood {
        match position {
            0..=3 => Mood::Ecstatic,
            4..=6 => Mood::Satisfied,
            7..=10 => Mood::Neutral,
            11..=15 => Mood::Disappointed,
            _ => Mood::Frustrated,
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

/// Incident log entries kept on the context. Each recorded result adds at
/// most two, oldest entries are dropped beyond this cap.
const MAX_RECENT_INCIDENTS: usize = 10;

/// The mutable state of one persona instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverContext {
    /// Unique context instance identifier (UUID format)
    pub id: String,
    /// Display name of the driver persona
    pub driver_name: String,
    /// Full team display name
    pub team_name: String,
    /// Teammate display name, derived once at creation
    pub teammate_name: String,
    /// Current circuit key into the reference tables
    pub circuit_key: String,
    /// Currently active session, if any
    pub current_session: Option<SessionKind>,
    /// Current weekend phase
    pub phase: Phase,
    /// Weekend format for the next simulated weekend
    pub weekend_kind: WeekendKind,
    /// Derived mood; recomputed whenever a result is recorded
    pub mood: Mood,
    /// Championship position, drawn once at creation and never recomputed
    pub championship_position: u32,
    /// Most recently completed session result
    pub last_result: Option<SessionResult>,
    /// Bounded log of recent incident descriptions
    pub recent_incidents: Vec<String>,
}

/// Partial update applied to a [`DriverContext`].
///
/// Every field is optional; absent fields leave the context untouched.
/// This is the typed rendition of the original's "unknown fields are
/// ignored" contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub circuit_key: Option<String>,
    pub current_session: Option<SessionKind>,
    pub phase: Option<Phase>,
    pub mood: Option<Mood>,
    pub weekend_kind: Option<WeekendKind>,
}

impl DriverContext {
    /// Creates a context for a driver and a team key.
    ///
    /// Fails with [`PaddockError::InvalidKey`] when the team key is not in
    /// the reference tables. The teammate is resolved from the grid when
    /// the driver is a listed one, otherwise the team's first listed driver
    /// stands in. Championship position is drawn uniformly from 1-20.
    pub fn new(driver_name: &str, team_key: &str, rng: &mut dyn RngCore) -> Result<Self> {
        let team = reference::team(team_key)
            .ok_or_else(|| PaddockError::invalid_key("team", team_key))?;

        let teammate_name = reference::teammate_of(driver_name)
            .or_else(|| team.drivers.first().copied())
            .unwrap_or("Teammate")
            .to_string();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            driver_name: driver_name.to_string(),
            team_name: team.name.to_string(),
            teammate_name,
            circuit_key: DEFAULT_CIRCUIT_KEY.to_string(),
            current_session: None,
            phase: Phase::default(),
            weekend_kind: WeekendKind::default(),
            mood: Mood::default(),
            championship_position: rng.gen_range(1..=20),
            last_result: None,
            recent_incidents: Vec::new(),
        })
    }

    /// Records a completed session result.
    ///
    /// Mood is recomputed from the position bands unconditionally, so a
    /// manual mood override never survives the next recorded result. Up to
    /// the last two of the result's incidents are appended to the incident
    /// log.
    pub fn record_result(&mut self, result: SessionResult) {
        self.mood = Mood::for_position(result.position);

        let skip = result.incidents.len().saturating_sub(2);
        for incident in result.incidents.iter().skip(skip) {
            self.recent_incidents.push(incident.clone());
        }
        if self.recent_incidents.len() > MAX_RECENT_INCIDENTS {
            let overflow = self.recent_incidents.len() - MAX_RECENT_INCIDENTS;
            self.recent_incidents.drain(..overflow);
        }

        self.last_result = Some(result);
    }

    /// Applies a partial update.
    ///
    /// Setting the circuit to a known key also refreshes the incident log
    /// from that circuit's challenge data; unknown circuit keys leave the
    /// circuit unchanged. Always returns `true` once the update has been
    /// applied.
    pub fn apply_update(&mut self, update: ContextUpdate) -> bool {
        if let Some(circuit_key) = update.circuit_key {
            if reference::circuit(&circuit_key).is_some() {
                let challenges = reference::circuit_challenges(&circuit_key);
                self.recent_incidents = challenges
                    .into_iter()
                    .take(2)
                    .map(str::to_string)
                    .collect();
                self.circuit_key = circuit_key;
            } else {
                tracing::debug!(key = %circuit_key, "ignoring unknown circuit key in context update");
            }
        }
        if let Some(session) = update.current_session {
            self.current_session = Some(session);
        }
        if let Some(phase) = update.phase {
            self.phase = phase;
        }
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
        if let Some(weekend_kind) = update.weekend_kind {
            self.weekend_kind = weekend_kind;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::PerformanceTier;
    use crate::session::generate_session_result;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn context() -> DriverContext {
        let mut rng = StdRng::seed_from_u64(5);
        DriverContext::new("Lewis Hamilton", "ferrari", &mut rng).unwrap()
    }

    #[test]
    fn test_new_context_derives_identity() {
        let ctx = context();
        assert_eq!(ctx.team_name, "Scuderia Ferrari");
        assert_eq!(ctx.teammate_name, "Charles Leclerc");
        assert_eq!(ctx.circuit_key, "silverstone");
        assert_eq!(ctx.phase, Phase::PreWeekend);
        assert_eq!(ctx.mood, Mood::Neutral);
        assert!((1..=20).contains(&ctx.championship_position));
        assert!(!ctx.id.is_empty());
    }

    #[test]
    fn test_unlisted_driver_gets_first_team_driver_as_teammate() {
        let mut rng = StdRng::seed_from_u64(5);
        let ctx = DriverContext::new("Alex Driver", "mclaren", &mut rng).unwrap();
        assert_eq!(ctx.teammate_name, "Lando Norris");
    }

    #[test]
    fn test_unknown_team_key_is_rejected() {
        let mut rng = StdRng::seed_from_u64(5);
        let err = DriverContext::new("Alex Driver", "brawn_gp", &mut rng).unwrap_err();
        assert!(err.is_invalid_key());
    }

    #[test]
    fn test_mood_banding() {
        assert_eq!(Mood::for_position(1), Mood::Ecstatic);
        assert_eq!(Mood::for_position(3), Mood::Ecstatic);
        assert_eq!(Mood::for_position(4), Mood::Satisfied);
        assert_eq!(Mood::for_position(6), Mood::Satisfied);
        assert_eq!(Mood::for_position(10), Mood::Neutral);
        assert_eq!(Mood::for_position(15), Mood::Disappointed);
        assert_eq!(Mood::for_position(16), Mood::Frustrated);
        assert_eq!(Mood::for_position(20), Mood::Frustrated);
    }

    #[test]
    fn test_record_result_recomputes_mood() {
        let mut ctx = context();
        ctx.mood = Mood::Ecstatic; // manual override

        let result = SessionResult {
            position: 18,
            gap_to_leader: Some("+2.123".into()),
            best_time: "1:23.456".into(),
            laps_completed: 10,
            incidents: vec!["lock-up turn 1".into()],
        };
        ctx.record_result(result);

        // Override did not survive: mood is derived, not sticky.
        assert_eq!(ctx.mood, Mood::Frustrated);
        assert_eq!(ctx.recent_incidents, vec!["lock-up turn 1".to_string()]);
        assert_eq!(ctx.last_result.as_ref().unwrap().position, 18);
    }

    #[test]
    fn test_mood_matches_banding_after_any_recorded_result() {
        let mut ctx = context();
        let mut rng = StdRng::seed_from_u64(11);
        for tier in [
            PerformanceTier::TopTeam,
            PerformanceTier::Midfield,
            PerformanceTier::Backmarker,
        ] {
            for _ in 0..20 {
                let result = generate_session_result(SessionKind::Race, tier, &mut rng);
                let position = result.position;
                ctx.record_result(result);
                assert_eq!(ctx.mood, Mood::for_position(position));
            }
        }
    }

    #[test]
    fn test_incident_log_is_bounded() {
        let mut ctx = context();
        for i in 0..20 {
            ctx.record_result(SessionResult {
                position: 10,
                gap_to_leader: Some("+1.000".into()),
                best_time: "1:24.000".into(),
                laps_completed: 20,
                incidents: vec![format!("incident {i}a"), format!("incident {i}b")],
            });
        }
        assert_eq!(ctx.recent_incidents.len(), MAX_RECENT_INCIDENTS);
        // Most recent entries survive.
        assert_eq!(ctx.recent_incidents.last().unwrap(), "incident 19b");
    }

    #[test]
    fn test_update_known_circuit_refreshes_incidents() {
        let mut ctx = context();
        let applied = ctx.apply_update(ContextUpdate {
            circuit_key: Some("monaco".into()),
            ..Default::default()
        });
        assert!(applied);
        assert_eq!(ctx.circuit_key, "monaco");
        assert!(!ctx.recent_incidents.is_empty());
        assert!(ctx.recent_incidents.len() <= 2);
    }

    #[test]
    fn test_update_unknown_circuit_is_ignored() {
        let mut ctx = context();
        let applied = ctx.apply_update(ContextUpdate {
            circuit_key: Some("nordschleife".into()),
            mood: Some(Mood::Ecstatic),
            ..Default::default()
        });
        assert!(applied);
        assert_eq!(ctx.circuit_key, "silverstone");
        // Other fields in the same update still apply.
        assert_eq!(ctx.mood, Mood::Ecstatic);
    }

    #[test]
    fn test_phase_mapping_for_sessions() {
        assert_eq!(Phase::for_session(SessionKind::Fp1), Phase::Practice);
        assert_eq!(Phase::for_session(SessionKind::Fp3), Phase::Practice);
        assert_eq!(Phase::for_session(SessionKind::SprintShootout), Phase::Qualifying);
        assert_eq!(Phase::for_session(SessionKind::Qualifying), Phase::Qualifying);
        assert_eq!(Phase::for_session(SessionKind::SprintRace), Phase::RaceDay);
        assert_eq!(Phase::for_session(SessionKind::Race), Phase::RaceDay);
    }
}
