//! The memory extractor: orchestrates the category rules and field extractors for one turn.

use memory_core::{ConversationTurn, ExtractionMetadata, MemoryCategory, MemoryExtraction};
use tracing::{debug, warn};

use crate::config::ExtractorConfig;
use crate::fields::{
    calculate_priority, extract_emotional_state, extract_project_status, extract_tags,
    is_substantial, title_pattern_for, DateMatcher, TitlePattern,
};
use crate::rules::{
    default_rules, is_greeting, suggests_action, CategoryRule, COACH_PLAN_CONTEXT,
    GENERAL_CONTEXT,
};

/// Fixed priority of `general` extractions.
pub const GENERAL_PRIORITY: u8 = 3;
/// Fixed priority of coach-plan extractions.
pub const COACH_PLAN_PRIORITY: u8 = 7;
/// Fixed title of coach-plan extractions.
pub const COACH_PLAN_TITLE: &str = "Plan sugerido por el coach";
const COACH_PLAN_TAGS: [&str; 2] = ["plan_coach", "seguimiento"];

/// Rule-based memory extractor. Build once and share; `extract` takes `&self`.
#[derive(Debug)]
pub struct MemoryExtractor {
    config: ExtractorConfig,
    rules: Vec<CategoryRule>,
    titles: Vec<(MemoryCategory, TitlePattern)>,
    dates: DateMatcher,
}

impl Default for MemoryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryExtractor {
    /// Creates an extractor with the default thresholds.
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    /// Creates an extractor with custom thresholds. An out-of-range `title_max_chars` is
    /// clamped to `1..=MAX_TITLE_CHARS`.
    pub fn with_config(mut config: ExtractorConfig) -> Self {
        let title_chars = config.bounded_title_chars();
        if title_chars != config.title_max_chars {
            warn!(
                requested = config.title_max_chars,
                used = title_chars,
                "MemoryExtractor: title_max_chars out of range, clamped"
            );
            config.title_max_chars = title_chars;
        }

        let titles = MemoryCategory::ALL
            .iter()
            .map(|c| (*c, title_pattern_for(*c, config.title_max_chars)))
            .collect();

        Self {
            config,
            rules: default_rules(),
            titles,
            dates: DateMatcher::new(),
        }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The category rules in evaluation order.
    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    /// First category whose rule matches the lower-cased message. Does not apply the `general`
    /// fallback.
    pub fn detect_category(&self, lowered: &str) -> Option<MemoryCategory> {
        self.first_rule(lowered).map(|rule| rule.category)
    }

    /// Analyzes both sides of the turn. The user-derived extraction, if any, comes first.
    pub fn extract(&self, turn: &ConversationTurn) -> Vec<MemoryExtraction> {
        if let Some(settings) = &turn.settings_context {
            // Accepted for callers; classification does not depend on it yet.
            debug!(
                coaching_focus = ?settings.coaching_focus,
                communication_tone = ?settings.communication_tone,
                "MemoryExtractor: settings context received"
            );
        }

        let extractions: Vec<MemoryExtraction> = self
            .analyze_user_message(turn)
            .into_iter()
            .chain(self.analyze_coach_response(turn))
            .collect();

        debug!(
            extraction_count = extractions.len(),
            "MemoryExtractor: turn analyzed"
        );
        extractions
    }

    /// User-message branch: filters, ordered rules, then the `general` fallback.
    pub fn analyze_user_message(&self, turn: &ConversationTurn) -> Option<MemoryExtraction> {
        let raw = turn.user_message.as_str();
        let lowered = raw.trim().to_lowercase();
        let length = lowered.chars().count();

        if length < self.config.min_message_chars || is_greeting(&lowered) {
            debug!(length, "MemoryExtractor: message too short or greeting, skipped");
            return None;
        }

        if let Some(rule) = self.first_rule(&lowered) {
            let extraction = self.user_extraction(rule.category, rule.context, raw);
            debug!(
                category = %extraction.category,
                priority = extraction.priority,
                "MemoryExtractor: user message classified"
            );
            return Some(extraction);
        }

        if length > self.config.general_min_chars && is_substantial(&lowered, &self.config) {
            let extraction = self.user_extraction(MemoryCategory::General, GENERAL_CONTEXT, raw);
            debug!("MemoryExtractor: substantial message stored as general");
            return Some(extraction);
        }

        debug!(length, "MemoryExtractor: no category matched");
        None
    }

    /// Coach-reply branch: an action-suggestion phrase yields a fixed plan reminder.
    pub fn analyze_coach_response(&self, turn: &ConversationTurn) -> Option<MemoryExtraction> {
        let raw = turn.coach_response.as_deref().unwrap_or("");
        if !suggests_action(&raw.to_lowercase()) {
            return None;
        }

        let mut metadata = ExtractionMetadata::with_context(COACH_PLAN_CONTEXT);
        metadata.reminder_date = self.dates.extract(raw);

        debug!(
            reminder_date = ?metadata.reminder_date,
            "MemoryExtractor: coach reply suggests a plan"
        );

        Some(MemoryExtraction {
            should_store: true,
            category: MemoryCategory::Reminders,
            title: Some(COACH_PLAN_TITLE.to_string()),
            content: raw.to_string(),
            tags: COACH_PLAN_TAGS.iter().map(|t| t.to_string()).collect(),
            priority: COACH_PLAN_PRIORITY,
            metadata,
        })
    }

    fn first_rule(&self, lowered: &str) -> Option<&CategoryRule> {
        self.rules.iter().find(|rule| rule.matches(lowered))
    }

    fn title_for(&self, category: MemoryCategory, message: &str) -> String {
        self.titles
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, pattern)| pattern.extract(message, self.config.title_max_chars))
            .unwrap_or_else(|| {
                crate::fields::truncate_title(message, self.config.title_max_chars)
            })
    }

    /// Assembles the extraction for a user-derived category from the original message text.
    fn user_extraction(
        &self,
        category: MemoryCategory,
        context: &str,
        message: &str,
    ) -> MemoryExtraction {
        let mut metadata = ExtractionMetadata::with_context(context);
        match category {
            MemoryCategory::Goals => metadata.goal_deadline = self.dates.extract(message),
            MemoryCategory::Reminders => metadata.reminder_date = self.dates.extract(message),
            MemoryCategory::Projects => {
                metadata.project_status = Some(extract_project_status(message).to_string())
            }
            MemoryCategory::Feelings => {
                metadata.emotional_state = Some(extract_emotional_state(message).to_string())
            }
            _ => {}
        }

        let priority = match category {
            MemoryCategory::General => GENERAL_PRIORITY,
            _ => calculate_priority(message, category),
        };

        MemoryExtraction {
            should_store: true,
            category,
            title: Some(self.title_for(category, message)),
            content: message.to_string(),
            tags: extract_tags(message, category),
            priority,
            metadata,
        }
    }
}
