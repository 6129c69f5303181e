//! Deterministic template fallback for text generation.
//!
//! When the remote model is unavailable the pipeline classifies the prompt
//! by keyword and draws one template uniformly from the matched pool.

use rand::seq::SliceRandom;
use rand::RngCore;
use strum_macros::{Display, EnumIter};

/// Template pools the classifier can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TemplateCategory {
    Victory,
    Podium,
    Setback,
    Practice,
    Qualifying,
    Generic,
}

const VICTORY_TEMPLATES: [&str; 3] = [
    "YES! What a race! Huge thanks to the team for the amazing car. We pushed hard and it paid off. #Winner #TeamWork",
    "INCREDIBLE! P1! This feeling never gets old. Massive effort from everyone in the garage. #Victory",
    "Perfect race! The car was amazing today and the strategy was spot on. Thank you to all the fans! #P1",
];

const PODIUM_TEMPLATES: [&str; 3] = [
    "On the podium! Great team work and solid execution today. Building momentum for the next one! #Podium",
    "P2/P3 feels amazing! Good points for the team and we're moving in the right direction. #Progress",
    "Solid result today! The car felt good and we maximized our potential. Onwards! #TeamWork",
];

const SETBACK_TEMPLATES: [&str; 3] = [
    "Not the result we wanted today. Gave it my all out there, but things didn't go our way. We'll analyze and come back stronger. #NeverGiveUp",
    "Tough day at the office. These setbacks make us stronger. Time to regroup and focus on the next one. #Resilience",
    "Disappointing result but that's motor racing. The team did everything they could. We'll bounce back! #TeamSpirit",
];

const PRACTICE_TEMPLATES: [&str; 3] = [
    "Getting some good laps in during practice. Feeling comfortable with the car setup. Let's keep pushing! #Practice",
    "Solid running in the session today. Learning the track and finding the limit. Ready for tomorrow! #Freepractice",
    "Good data collection during practice. The car balance is coming together nicely. #Preparation",
];

const QUALIFYING_TEMPLATES: [&str; 3] = [
    "Qualifying done! Every tenth counts out there. Gave it everything in that final sector. #Quali",
    "That's qualifying in the books. Tight margins today but we're in a good position. #GridPosition",
    "Qualifying session complete. The car felt good in Q3. Looking forward to tomorrow's race! #Qualifying",
];

const GENERIC_TEMPLATES: [&str; 3] = [
    "Focus and determination. That's what it takes out there. Ready for the challenge! #F1Life",
    "Another day, another opportunity to push the limits. Grateful for this journey! #Racing",
    "The track is calling. Time to give everything we've got! #NeverSettle",
];

impl TemplateCategory {
    fn pool(&self) -> &'static [&'static str] {
        match self {
            TemplateCategory::Victory => &VICTORY_TEMPLATES,
            TemplateCategory::Podium => &PODIUM_TEMPLATES,
            TemplateCategory::Setback => &SETBACK_TEMPLATES,
            TemplateCategory::Practice => &PRACTICE_TEMPLATES,
            TemplateCategory::Qualifying => &QUALIFYING_TEMPLATES,
            TemplateCategory::Generic => &GENERIC_TEMPLATES,
        }
    }

    /// Whether the given message is one of this category's templates,
    /// ignoring appended hashtags.
    pub fn contains_message(&self, message: &str) -> bool {
        self.pool().iter().any(|t| message.starts_with(t))
    }
}

/// Classifies a generation prompt into a template category by keyword.
pub fn classify(prompt: &str) -> TemplateCategory {
    let prompt = prompt.to_lowercase();

    if prompt.contains("victory") || prompt.contains("win") {
        TemplateCategory::Victory
    } else if prompt.contains("podium") {
        TemplateCategory::Podium
    } else if prompt.contains("difficult") || prompt.contains("bad") {
        TemplateCategory::Setback
    } else if ["fp1", "fp2", "fp3", "practice"]
        .iter()
        .any(|term| prompt.contains(term))
    {
        TemplateCategory::Practice
    } else if prompt.contains("qualifying") {
        TemplateCategory::Qualifying
    } else {
        TemplateCategory::Generic
    }
}

/// Draws one template uniformly from the category's pool.
pub fn pick(category: TemplateCategory, rng: &mut dyn RngCore) -> &'static str {
    category
        .pool()
        .choose(rng)
        .copied()
        .unwrap_or(GENERIC_TEMPLATES[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use strum::IntoEnumIterator;

    #[test]
    fn test_classify_priorities() {
        assert_eq!(classify("what a victory today"), TemplateCategory::Victory);
        assert_eq!(classify("We WIN again"), TemplateCategory::Victory);
        assert_eq!(classify("on the podium in fp2"), TemplateCategory::Podium);
        assert_eq!(classify("a difficult qualifying"), TemplateCategory::Setback);
        assert_eq!(classify("long run pace in FP2"), TemplateCategory::Practice);
        assert_eq!(classify("qualifying went okay"), TemplateCategory::Qualifying);
        assert_eq!(classify("sunday afternoon"), TemplateCategory::Generic);
    }

    #[test]
    fn test_pick_stays_inside_pool() {
        let mut rng = StdRng::seed_from_u64(21);
        for category in TemplateCategory::iter() {
            for _ in 0..20 {
                let template = pick(category, &mut rng);
                assert!(category.contains_message(template));
                assert!(!template.is_empty());
            }
        }
    }
}
