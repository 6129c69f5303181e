//! DriverAgent - the engine facade one front end drives per persona.
//!
//! A `DriverAgent` owns exactly one [`DriverContext`] plus the optional
//! generation capabilities. There is no engine-internal registry; callers
//! own the instance and must not share it across in-flight operations.

use crate::generator::{TextGenerator, TextModel};
use crate::sentiment::{LexiconSentiment, Sentiment, SentimentAnalyzer};
use chrono::{DateTime, Utc};
use paddock_core::context::{ContextUpdate, DriverContext, Mood, Phase};
use paddock_core::error::{PaddockError, Result};
use paddock_core::reference::{self, Circuit, DEFAULT_CIRCUIT_KEY, TEAMS};
use paddock_core::session::{SessionKind, SessionResult, WeekendKind};
use paddock_core::{Action, ActionKind, MessageKind};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;
use strum_macros::Display;

/// Soft cap on message length; hashtags are only appended below it.
const SOFT_LENGTH_CAP: usize = 250;

/// One recorded text-generation exchange.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationEntry {
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Snapshot of the context at generation time
    pub context: DriverContext,
}

/// Structured, idempotent view of the agent state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextSnapshot {
    pub driver_info: DriverInfo,
    pub current_situation: CurrentSituation,
    pub recent_activity: RecentActivity,
    pub circuit_detail: CircuitDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverInfo {
    pub name: String,
    pub team: String,
    pub teammate: String,
    pub championship_position: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentSituation {
    /// Circuit display form, e.g. `Silverstone Circuit (United Kingdom)`
    pub circuit: String,
    pub session: Option<SessionKind>,
    pub phase: Phase,
    pub mood: Mood,
    pub weekend_kind: WeekendKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub last_result: Option<SessionResult>,
    pub recent_incidents: Vec<String>,
    pub actions_performed: usize,
    pub last_action: Option<ActionKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircuitDetail {
    pub name: String,
    pub country: String,
    pub length_km: f64,
    pub corners: u32,
    pub characteristics: Vec<String>,
    pub difficulty: String,
}

/// Coarse performance trend derived from the latest result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PerformanceTrend {
    Excellent,
    Good,
    Challenging,
    Stable,
}

/// Performance review over the latest result and current circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceAnalysis {
    pub trend: PerformanceTrend,
    pub key_strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Full dump of one agent session for external analysis.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub context: DriverContext,
    pub action_history: Vec<Action>,
    pub conversation_log: Vec<ConversationEntry>,
    pub export_timestamp: DateTime<Utc>,
}

/// The persona simulation engine facade.
pub struct DriverAgent {
    context: DriverContext,
    generator: TextGenerator,
    sentiment: Option<Box<dyn SentimentAnalyzer>>,
    rng: Box<dyn RngCore>,
    action_history: Vec<Action>,
    conversation_log: Vec<ConversationEntry>,
}

impl std::fmt::Debug for DriverAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverAgent")
            .field("context", &self.context)
            .field("action_history", &self.action_history)
            .field("conversation_log", &self.conversation_log)
            .finish_non_exhaustive()
    }
}

impl DriverAgent {
    /// Configures an agent for a driver and a team key.
    ///
    /// Fails with [`PaddockError::InvalidKey`] for unknown team keys. The
    /// remote text model is taken from the environment when configured;
    /// its absence silently selects the template fallback.
    pub fn configure(driver_name: &str, team_key: &str) -> Result<Self> {
        Self::configure_with_rng(driver_name, team_key, Box::new(StdRng::from_entropy()))
    }

    /// Like [`DriverAgent::configure`] with an explicit random source, so
    /// callers and tests can seed deterministic runs.
    pub fn configure_with_rng(
        driver_name: &str,
        team_key: &str,
        mut rng: Box<dyn RngCore>,
    ) -> Result<Self> {
        let context = DriverContext::new(driver_name, team_key, &mut *rng)?;
        Ok(Self {
            context,
            generator: TextGenerator::from_env(),
            sentiment: Some(Box::new(LexiconSentiment::new())),
            rng,
            action_history: Vec::new(),
            conversation_log: Vec::new(),
        })
    }

    /// Replaces the remote text model.
    pub fn with_text_model(mut self, model: Box<dyn TextModel>) -> Self {
        self.generator = TextGenerator::with_model(model);
        self
    }

    /// Removes the remote text model; every message comes from templates.
    pub fn without_text_model(mut self) -> Self {
        self.generator = TextGenerator::without_model();
        self
    }

    /// Replaces the sentiment analyzer.
    pub fn with_sentiment_analyzer(mut self, analyzer: Box<dyn SentimentAnalyzer>) -> Self {
        self.sentiment = Some(analyzer);
        self
    }

    /// Removes the sentiment analyzer; replies default to positive.
    pub fn without_sentiment_analyzer(mut self) -> Self {
        self.sentiment = None;
        self
    }

    /// Read access to the owned context.
    pub fn context(&self) -> &DriverContext {
        &self.context
    }

    pub(crate) fn context_mut(&mut self) -> &mut DriverContext {
        &mut self.context
    }

    pub(crate) fn rng_mut(&mut self) -> &mut dyn RngCore {
        &mut *self.rng
    }

    fn circuit(&self) -> &'static Circuit {
        reference::circuit(&self.context.circuit_key)
            .or_else(|| reference::circuit(DEFAULT_CIRCUIT_KEY))
            // Safe: the default key is a fixed entry of the table
            .expect("default circuit present in reference data")
    }

    // =================
    // SPEAK
    // =================

    /// Generates one message in the persona's voice. Never fails; the
    /// worst outcome is the fixed default message.
    pub fn speak(&mut self, kind: MessageKind, custom_context: Option<&str>) -> String {
        let prompt = self.build_prompt(custom_context);
        let message = self.generator.generate(&prompt, &mut *self.rng);
        let message = self.append_hashtags(message);

        self.conversation_log.push(ConversationEntry {
            kind,
            content: message.clone(),
            timestamp: Utc::now(),
            context: self.context.clone(),
        });

        message
    }

    fn build_prompt(&self, custom_context: Option<&str>) -> String {
        let circuit = self.circuit();
        let session = self
            .context
            .current_session
            .map(|s| s.to_string())
            .unwrap_or_else(|| "between sessions".to_string());
        let incidents = if self.context.recent_incidents.is_empty() {
            "None".to_string()
        } else {
            self.context.recent_incidents.join(", ")
        };

        let mut prompt = format!(
            "You are {driver}, a Formula 1 driver for {team}.\n\
             Current circuit: {circuit_name} ({country})\n\
             Current session: {session}\n\
             Mood: {mood}\n\
             Championship position: P{championship}\n\
             Team mate: {teammate}\n\
             \n\
             Generate ONLY the social media message. Do not include any \
             explanations, metadata, formatting, or additional text. Just \
             return the raw message content that would be posted on social \
             media.\n\
             \n\
             Requirements:\n\
             - Use F1 terminology and racing language\n\
             - Show appropriate emotion for the context\n\
             - Mention relevant racing details\n\
             - Include appropriate hashtags\n\
             - Keep under 280 characters\n\
             - Return ONLY the message, nothing else\n\
             \n\
             Context details:\n\
             - Recent incidents: {incidents}\n\
             - Circuit characteristics: {characteristics}\n",
            driver = self.context.driver_name,
            team = self.context.team_name,
            circuit_name = circuit.name,
            country = circuit.country,
            session = session,
            mood = self.context.mood,
            championship = self.context.championship_position,
            teammate = self.context.teammate_name,
            incidents = incidents,
            characteristics = circuit.characteristics.join(", "),
        );

        if let Some(custom) = custom_context {
            prompt.push_str(&format!("\nSpecific context: {custom}"));
        }
        if let Some(result) = &self.context.last_result {
            prompt.push_str(&format!(
                "\nLast session result: P{}, {}",
                result.position, result.best_time
            ));
        }

        prompt
    }

    fn append_hashtags(&self, mut message: String) -> String {
        let circuit_tag = self.circuit().hashtag();
        if !message.contains(&circuit_tag) && message.chars().count() < SOFT_LENGTH_CAP {
            message.push(' ');
            message.push_str(&circuit_tag);
        }

        if let Some(session) = self.context.current_session {
            let session_tag = session.hashtag();
            if !message.contains(&session_tag) && message.chars().count() < SOFT_LENGTH_CAP {
                message.push(' ');
                message.push_str(&session_tag);
            }
        }

        message
    }

    // =================
    // ACT
    // =================

    /// Posts a status update, synthesizing the content when none is given.
    pub fn post(&mut self, content: Option<&str>) -> Action {
        let content = match content.filter(|c| !c.trim().is_empty()) {
            Some(c) => c.to_string(),
            None => self.speak(MessageKind::StatusUpdate, None),
        };

        let engagement = self.rng.gen_range(100..=10_000u32);
        let action = Action::new(ActionKind::Post, content)
            .with_meta("engagement", engagement)
            .with_meta("platform", "social_media");

        self.action_history.push(action.clone());
        action
    }

    /// Replies to a fan comment. Fails for empty comments without touching
    /// the action history.
    pub fn reply(&mut self, comment: &str) -> Result<Action> {
        if comment.trim().is_empty() {
            return Err(PaddockError::empty_input("comment"));
        }

        let sentiment = self
            .sentiment
            .as_ref()
            .map(|analyzer| analyzer.classify(comment))
            .unwrap_or(Sentiment::Positive);

        let reply_prompt = format!(
            "A fan commented: \"{comment}\"\n\
             The sentiment is {sentiment}.\n\
             Generate a brief, authentic reply that:\n\
             1. Acknowledges the fan\n\
             2. Shows appreciation for support\n\
             3. Stays positive and professional\n\
             4. Uses F1 driver personality\n\
             5. Keeps under 150 characters"
        );
        let content = self.speak(MessageKind::Reply, Some(&reply_prompt));

        let action = Action::new(ActionKind::Reply, content)
            .with_target(comment)
            .with_meta("original_sentiment", sentiment.to_string())
            .with_meta("reply_type", "fan_interaction");

        self.action_history.push(action.clone());
        Ok(action)
    }

    /// Likes a post; the recorded content echoes the first 100 characters.
    pub fn like(&mut self, post_content: &str) -> Result<Action> {
        if post_content.trim().is_empty() {
            return Err(PaddockError::empty_input("post content"));
        }

        let mut echo: String = post_content.chars().take(100).collect();
        if post_content.chars().count() > 100 {
            echo.push_str("...");
        }

        let action = Action::new(ActionKind::Like, format!("Liked post: {echo}"))
            .with_target(post_content)
            .with_meta("interaction_type", "engagement");

        self.action_history.push(action.clone());
        Ok(action)
    }

    /// Mentions a person; the generated content is guaranteed to carry
    /// the name or an `@name` handle.
    pub fn mention(&mut self, person_name: &str, context: Option<&str>) -> Result<Action> {
        if person_name.trim().is_empty() {
            return Err(PaddockError::empty_input("person name"));
        }
        let mention_context = context.unwrap_or("general");

        let mention_prompt = format!(
            "Create a social media post mentioning {person_name}.\n\
             Context: {mention_context}\n\
             Make it authentic, professional, and F1-related.\n\
             Include the mention naturally in the message."
        );
        let mut content = self.speak(MessageKind::Mention, Some(&mention_prompt));

        let handle = format!("@{person_name}");
        if !content.contains(&handle) && !content.contains(person_name) {
            content = format!("{handle} {content}");
        }

        let action = Action::new(ActionKind::Mention, content)
            .with_target(person_name)
            .with_meta("mention_context", mention_context)
            .with_meta("mentioned_person", person_name);

        self.action_history.push(action.clone());
        Ok(action)
    }

    // =================
    // THINK
    // =================

    /// Structured snapshot of the current state. Pure and idempotent.
    pub fn inspect_context(&self) -> ContextSnapshot {
        let circuit = self.circuit();

        ContextSnapshot {
            driver_info: DriverInfo {
                name: self.context.driver_name.clone(),
                team: self.context.team_name.clone(),
                teammate: self.context.teammate_name.clone(),
                championship_position: self.context.championship_position,
            },
            current_situation: CurrentSituation {
                circuit: format!("{} ({})", circuit.name, circuit.country),
                session: self.context.current_session,
                phase: self.context.phase,
                mood: self.context.mood,
                weekend_kind: self.context.weekend_kind,
            },
            recent_activity: RecentActivity {
                last_result: self.context.last_result.clone(),
                recent_incidents: self.context.recent_incidents.clone(),
                actions_performed: self.action_history.len(),
                last_action: self.action_history.last().map(|a| a.kind),
            },
            circuit_detail: CircuitDetail {
                name: circuit.name.to_string(),
                country: circuit.country.to_string(),
                length_km: circuit.length_km,
                corners: circuit.corners,
                characteristics: circuit
                    .characteristics
                    .iter()
                    .map(|c| c.to_string())
                    .collect(),
                difficulty: circuit.difficulty.to_string(),
            },
        }
    }

    /// Applies a partial context update. Unknown circuit keys are ignored;
    /// everything else applies field by field.
    pub fn update_context(&mut self, update: ContextUpdate) -> bool {
        self.context.apply_update(update)
    }

    /// Reviews the latest result against the current circuit.
    pub fn analyze_performance(&self) -> PerformanceAnalysis {
        let mut analysis = PerformanceAnalysis {
            trend: PerformanceTrend::Stable,
            key_strengths: Vec::new(),
            areas_for_improvement: Vec::new(),
            recommendations: Vec::new(),
        };

        if let Some(result) = &self.context.last_result {
            if result.position <= 3 {
                analysis.trend = PerformanceTrend::Excellent;
                analysis.key_strengths.push("strong pace".to_string());
            } else if result.position <= 10 {
                analysis.trend = PerformanceTrend::Good;
                analysis
                    .key_strengths
                    .push("consistent points scoring".to_string());
            } else {
                analysis.trend = PerformanceTrend::Challenging;
                analysis
                    .areas_for_improvement
                    .push("qualifying performance".to_string());
            }
        }

        let circuit = self.circuit();
        if circuit.characteristics.contains(&"technical") {
            analysis
                .recommendations
                .push("Focus on setup optimization".to_string());
        }
        if circuit.characteristics.contains(&"high-speed") {
            analysis
                .recommendations
                .push("Maximize straight-line speed".to_string());
        }
        if circuit.characteristics.contains(&"street-circuit") {
            analysis
                .recommendations
                .push("Practice precision in tight sections".to_string());
        }

        analysis
    }

    // =================
    // UTILITY
    // =================

    /// The most recent `limit` actions, oldest first.
    pub fn action_history(&self, limit: usize) -> &[Action] {
        let len = self.action_history.len();
        &self.action_history[len.saturating_sub(limit)..]
    }

    /// The most recent `limit` conversation entries, oldest first.
    pub fn conversation_log(&self, limit: usize) -> &[ConversationEntry] {
        let len = self.conversation_log.len();
        &self.conversation_log[len.saturating_sub(limit)..]
    }

    /// Resets the context to a fresh pre-weekend state and clears both
    /// histories. Driver and team carry over unless told otherwise.
    pub fn reset(&mut self, keep_driver_info: bool) -> Result<()> {
        let driver_name = if keep_driver_info {
            self.context.driver_name.clone()
        } else {
            "Alex Driver".to_string()
        };
        let team_key = TEAMS
            .iter()
            .find(|(_, team)| team.name == self.context.team_name)
            .map(|(key, _)| *key)
            .unwrap_or("mclaren");

        self.context = DriverContext::new(&driver_name, team_key, &mut *self.rng)?;
        self.action_history.clear();
        self.conversation_log.clear();
        Ok(())
    }

    /// Exports the full session state for external analysis.
    pub fn export_session(&self) -> SessionExport {
        SessionExport {
            context: self.context.clone(),
            action_history: self.action_history.clone(),
            conversation_log: self.conversation_log.clone(),
            export_timestamp: Utc::now(),
        }
    }
}
