//! Race weekend simulator.
//!
//! Drives the context through the fixed session list of a weekend,
//! generating one result and one message per session. No step can abort
//! the loop; every session is guaranteed to produce both.

use crate::agent::DriverAgent;
use paddock_core::context::{ContextUpdate, Phase};
use paddock_core::reference;
use paddock_core::session::{
    generate_session_result, weekend_sessions, SessionKind, SessionResult, WeekendKind,
};
use paddock_core::MessageKind;
use serde::Serialize;

/// One simulated session of a weekend trace.
#[derive(Debug, Clone, Serialize)]
pub struct SessionTraceEntry {
    pub session: SessionKind,
    pub day: String,
    pub result: SessionResult,
    pub message: String,
}

/// Full record of one simulated weekend.
#[derive(Debug, Clone, Serialize)]
pub struct WeekendTrace {
    /// Circuit display name the weekend ran on
    pub circuit: String,
    pub weekend_kind: WeekendKind,
    pub sessions: Vec<SessionTraceEntry>,
    pub final_status: String,
}

impl DriverAgent {
    /// Simulates a complete race weekend.
    ///
    /// An unknown `circuit_key` falls back to the context's current
    /// circuit. Each session advances the phase, records a generated
    /// result (recomputing mood and incidents) and posts one message.
    pub fn run_weekend(
        &mut self,
        circuit_key: Option<&str>,
        weekend_kind: WeekendKind,
    ) -> WeekendTrace {
        if let Some(key) = circuit_key {
            self.update_context(ContextUpdate {
                circuit_key: Some(key.to_string()),
                weekend_kind: Some(weekend_kind),
                ..Default::default()
            });
        } else {
            self.update_context(ContextUpdate {
                weekend_kind: Some(weekend_kind),
                ..Default::default()
            });
        }

        let circuit_name = reference::circuit(&self.context().circuit_key)
            .map(|c| c.name.to_string())
            .unwrap_or_else(|| self.context().circuit_key.clone());
        tracing::info!(circuit = %circuit_name, kind = %weekend_kind, "starting weekend simulation");

        let mut sessions = Vec::new();
        for slot in weekend_sessions(weekend_kind) {
            let context = self.context_mut();
            context.current_session = Some(slot.kind);
            context.phase = Phase::for_session(slot.kind);

            let tier = reference::performance_tier(&self.context().team_name);
            let result = generate_session_result(slot.kind, tier, self.rng_mut());
            self.context_mut().record_result(result.clone());

            let message = self.speak(MessageKind::Post, None);

            sessions.push(SessionTraceEntry {
                session: slot.kind,
                day: slot.day.to_string(),
                result,
                message,
            });
        }

        self.context_mut().phase = Phase::PostRace;

        // The race is always the last slot of both weekend formats.
        let race_position = sessions
            .last()
            .map(|entry| entry.result.position)
            .unwrap_or(20);
        let final_status = final_status_for_position(race_position);
        tracing::info!(position = race_position, "weekend simulation finished");

        WeekendTrace {
            circuit: circuit_name,
            weekend_kind,
            sessions,
            final_status,
        }
    }
}

fn final_status_for_position(position: u32) -> String {
    if position <= 3 {
        format!("Fantastic weekend! P{position} finish! 🏆")
    } else if position <= 10 {
        format!("Solid points finish in P{position}. Good team effort!")
    } else {
        format!("Tough weekend, P{position}. We'll bounce back stronger!")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paddock_core::context::Mood;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn agent(team_key: &str) -> DriverAgent {
        DriverAgent::configure_with_rng(
            "Lewis Hamilton",
            team_key,
            Box::new(StdRng::seed_from_u64(2024)),
        )
        .unwrap()
        .without_text_model()
    }

    #[test]
    fn test_standard_weekend_runs_five_sessions_in_order() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("silverstone"), WeekendKind::StandardWeekend);

        assert_eq!(trace.circuit, "Silverstone Circuit");
        let order: Vec<SessionKind> = trace.sessions.iter().map(|s| s.session).collect();
        assert_eq!(
            order,
            vec![
                SessionKind::Fp1,
                SessionKind::Fp2,
                SessionKind::Fp3,
                SessionKind::Qualifying,
                SessionKind::Race,
            ]
        );

        for entry in &trace.sessions {
            assert!((1..=20).contains(&entry.result.position));
            assert!(!entry.message.is_empty());
        }
    }

    #[test]
    fn test_sprint_weekend_session_list() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("austria"), WeekendKind::SprintWeekend);

        let order: Vec<SessionKind> = trace.sessions.iter().map(|s| s.session).collect();
        assert_eq!(
            order,
            vec![
                SessionKind::Fp1,
                SessionKind::SprintShootout,
                SessionKind::SprintRace,
                SessionKind::Qualifying,
                SessionKind::Race,
            ]
        );
        assert_eq!(agent.context().weekend_kind, WeekendKind::SprintWeekend);
    }

    #[test]
    fn test_top_team_positions_stay_in_tier_range() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("silverstone"), WeekendKind::StandardWeekend);
        for entry in &trace.sessions {
            assert!((1..=6).contains(&entry.result.position));
        }
    }

    #[test]
    fn test_final_status_matches_race_band() {
        let mut agent = agent("haas");
        let trace = agent.run_weekend(None, WeekendKind::StandardWeekend);

        let race_position = trace.sessions.last().unwrap().result.position;
        let expected = if race_position <= 3 {
            format!("Fantastic weekend! P{race_position} finish! 🏆")
        } else if race_position <= 10 {
            format!("Solid points finish in P{race_position}. Good team effort!")
        } else {
            format!("Tough weekend, P{race_position}. We'll bounce back stronger!")
        };
        assert_eq!(trace.final_status, expected);
    }

    #[test]
    fn test_weekend_leaves_post_race_state() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("monaco"), WeekendKind::StandardWeekend);

        assert_eq!(agent.context().phase, Phase::PostRace);
        let last = trace.sessions.last().unwrap();
        assert_eq!(
            agent.context().mood,
            Mood::for_position(last.result.position)
        );
        assert_eq!(
            agent.context().last_result.as_ref().unwrap(),
            &last.result
        );
    }

    #[test]
    fn test_unknown_circuit_falls_back_to_current() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("nordschleife"), WeekendKind::StandardWeekend);

        assert_eq!(agent.context().circuit_key, "silverstone");
        assert_eq!(trace.circuit, "Silverstone Circuit");
        assert_eq!(trace.sessions.len(), 5);
    }

    #[test]
    fn test_each_session_posts_one_message() {
        let mut agent = agent("ferrari");
        let trace = agent.run_weekend(Some("spa"), WeekendKind::StandardWeekend);

        assert_eq!(agent.conversation_log(100).len(), trace.sessions.len());
    }
}
