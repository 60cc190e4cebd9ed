//! Field extractors: title, tags, priority, date mention, project status, emotional state.
//!
//! Every function here is total: any input string yields a value, and slicing is done on
//! character boundaries so short or multi-byte matches cannot panic. Keyword checks in this
//! module are case-sensitive substring tests against the original message text; the regex-based
//! extractors (titles, dates) are case-insensitive.

use memory_core::MemoryCategory;
use regex::Regex;
use tracing::warn;

use crate::config::ExtractorConfig;

/// Maximum captured length for the feelings title ("Estado: ...").
pub const EMOTION_TITLE_MAX_CHARS: usize = 30;

/// Returns `message` unchanged when it has at most `max_chars` characters, otherwise its first
/// `max_chars` characters followed by `"..."`.
pub fn truncate_title(message: &str, max_chars: usize) -> String {
    if message.chars().count() > max_chars {
        let head: String = message.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        message.to_string()
    }
}

/// What to return when a title lead-in phrase is not found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFallback {
    /// The message itself, truncated.
    Truncate,
    /// A fixed placeholder.
    Fixed(&'static str),
}

/// Lead-in regex used to derive a short title: `(lead-in)\s+(up to N chars)`.
#[derive(Debug)]
pub struct TitlePattern {
    regex: Option<Regex>,
    prefix: &'static str,
    fallback: TitleFallback,
}

impl TitlePattern {
    /// `lead_ins` is a regex alternation (e.g. `"quiero|mi meta es"`).
    pub fn new(
        lead_ins: &str,
        capture_chars: usize,
        prefix: &'static str,
        fallback: TitleFallback,
    ) -> Self {
        let pattern = format!(r"(?i)({})\s+(.{{1,{}}})", lead_ins, capture_chars.max(1));
        let regex = match Regex::new(&pattern) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, lead_ins, "title pattern does not compile, using fallback");
                None
            }
        };
        Self {
            regex,
            prefix,
            fallback,
        }
    }

    /// A pattern that always uses its fallback.
    pub fn without_lead_in(fallback: TitleFallback) -> Self {
        Self {
            regex: None,
            prefix: "",
            fallback,
        }
    }

    /// Captured text after the lead-in, trimmed and cut at the first `.`; otherwise the fallback.
    pub fn extract(&self, message: &str, max_chars: usize) -> String {
        let captured = self
            .regex
            .as_ref()
            .and_then(|re| re.captures(message))
            .and_then(|caps| caps.get(2));

        match captured {
            Some(m) => {
                let text = m.as_str().trim();
                let head = text.split('.').next().unwrap_or(text);
                format!("{}{}", self.prefix, head)
            }
            None => match self.fallback {
                TitleFallback::Truncate => truncate_title(message, max_chars),
                TitleFallback::Fixed(placeholder) => placeholder.to_string(),
            },
        }
    }
}

/// Builds the title pattern for a user-derived category.
pub(crate) fn title_pattern_for(category: MemoryCategory, max_chars: usize) -> TitlePattern {
    match category {
        MemoryCategory::Goals => TitlePattern::new(
            "quiero|mi objetivo es|mi meta es",
            max_chars,
            "",
            TitleFallback::Truncate,
        ),
        MemoryCategory::Reminders => TitlePattern::new(
            "recordar|recuérdame|tengo que|debo",
            max_chars,
            "",
            TitleFallback::Truncate,
        ),
        MemoryCategory::Ideas => TitlePattern::new(
            "idea|se me ocurre|pienso que",
            max_chars,
            "",
            TitleFallback::Fixed("Nueva idea"),
        ),
        MemoryCategory::Projects => TitlePattern::new(
            "proyecto|trabajando en|desarrollando",
            max_chars,
            "",
            TitleFallback::Fixed("Proyecto mencionado"),
        ),
        MemoryCategory::Feelings => TitlePattern::new(
            "me siento|estoy",
            EMOTION_TITLE_MAX_CHARS,
            "Estado: ",
            TitleFallback::Fixed("Estado emocional"),
        ),
        MemoryCategory::General | MemoryCategory::Insights => {
            TitlePattern::without_lead_in(TitleFallback::Truncate)
        }
    }
}

/// Category tag first, then domain tags, then `urgente` when urgency words appear.
pub fn extract_tags(message: &str, category: MemoryCategory) -> Vec<String> {
    let has = |keyword: &str| message.contains(keyword);
    let mut tags = vec![category.as_str().to_string()];

    match category {
        MemoryCategory::Goals => {
            if has("ejercicio") || has("fitness") {
                tags.push("salud".to_string());
            }
            if has("trabajo") || has("carrera") {
                tags.push("profesional".to_string());
            }
            if has("dinero") || has("financiero") {
                tags.push("finanzas".to_string());
            }
        }
        MemoryCategory::Projects => {
            if has("personal") {
                tags.push("personal".to_string());
            }
            if has("trabajo") {
                tags.push("trabajo".to_string());
            }
            if has("startup") || has("negocio") {
                tags.push("emprendimiento".to_string());
            }
        }
        _ => {}
    }

    if has("urgente") || has("importante") {
        tags.push("urgente".to_string());
    }

    tags
}

/// Category base score plus additive urgency adjustments, clamped to 1..=10.
pub fn calculate_priority(message: &str, category: MemoryCategory) -> u8 {
    let has = |keyword: &str| message.contains(keyword);

    let mut priority: i32 = match category {
        MemoryCategory::Goals => 7,
        MemoryCategory::Reminders => 6,
        MemoryCategory::Feelings => 4,
        _ => 5,
    };

    if has("urgente") || has("hoy") {
        priority += 2;
    }
    if has("importante") || has("prioridad") {
        priority += 1;
    }
    if has("mañana") || has("esta semana") {
        priority += 1;
    }

    priority.clamp(1, 10) as u8
}

/// Ordered date-mention patterns; the first one that matches anywhere wins.
#[derive(Debug)]
pub struct DateMatcher {
    patterns: Vec<Regex>,
}

impl Default for DateMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DateMatcher {
    pub fn new() -> Self {
        // "mañana" precedes "pasado mañana", so the latter reports "mañana".
        let raw = [
            r"(?i)mañana",
            r"(?i)pasado mañana",
            r"(?i)la próxima semana",
            r"(?i)el próximo (lunes|martes|miércoles|jueves|viernes|sábado|domingo)",
            r"(?i)en ([0-9]+) días?",
            r"([0-9]{1,2})/([0-9]{1,2})",
            r"(?i)(enero|febrero|marzo|abril|mayo|junio|julio|agosto|septiembre|octubre|noviembre|diciembre)",
        ];
        Self {
            patterns: raw
                .iter()
                .filter_map(|p| match Regex::new(p) {
                    Ok(re) => Some(re),
                    Err(e) => {
                        warn!(error = %e, pattern = p, "date pattern does not compile, skipped");
                        None
                    }
                })
                .collect(),
        }
    }

    /// Matched substring of the first matching pattern, verbatim.
    pub fn extract(&self, message: &str) -> Option<String> {
        self.patterns
            .iter()
            .find_map(|re| re.find(message))
            .map(|m| m.as_str().to_string())
    }
}

/// Maps progress keywords to a status label; `activo` when none match.
pub fn extract_project_status(message: &str) -> &'static str {
    let has = |keyword: &str| message.contains(keyword);

    if has("empezando") || has("iniciando") {
        "iniciado"
    } else if has("progreso") || has("avanzando") {
        "en_progreso"
    } else if has("terminando") || has("finalizando") {
        "finalizando"
    } else if has("terminé") || has("completé") {
        "completado"
    } else {
        "activo"
    }
}

/// Emotion labels and their keywords, in evaluation order.
pub const EMOTIONS: &[(&str, &[&str])] = &[
    ("feliz", &["feliz", "contento", "alegre", "bien", "genial"]),
    ("triste", &["triste", "deprimido", "bajo", "mal"]),
    ("ansioso", &["ansioso", "nervioso", "preocupado", "estresado"]),
    ("motivado", &["motivado", "energético", "entusiasmado", "inspirado"]),
    ("frustrado", &["frustrado", "molesto", "irritado", "enojado"]),
];

/// First emotion label whose keyword list hits; `neutral` otherwise.
pub fn extract_emotional_state(message: &str) -> &'static str {
    EMOTIONS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| message.contains(k)))
        .map(|(label, _)| *label)
        .unwrap_or("neutral")
}

/// Substantiality test for the `general` fallback: at least
/// `config.substantial_min_indicators` of (more than N space-separated words; contains `.` or
/// `,`; contains an ASCII letter).
pub fn is_substantial(lowered: &str, config: &ExtractorConfig) -> bool {
    let indicators = [
        lowered.split(' ').count() > config.substantial_word_count,
        lowered.contains('.') || lowered.contains(','),
        lowered.chars().any(|c| c.is_ascii_alphabetic()),
    ];
    indicators.iter().filter(|hit| **hit).count() >= config.substantial_min_indicators
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_counts_characters() {
        assert_eq!(truncate_title("corto", 50), "corto");
        let fifty = "á".repeat(50);
        assert_eq!(truncate_title(&fifty, 50), fifty);
        let long = "ñ".repeat(60);
        assert_eq!(truncate_title(&long, 50), format!("{}...", "ñ".repeat(50)));
    }

    #[test]
    fn test_goal_title_cuts_at_first_period() {
        let pattern = title_pattern_for(MemoryCategory::Goals, 50);
        assert_eq!(
            pattern.extract("Quiero correr. Y nadar también", 50),
            "correr"
        );
    }

    #[test]
    fn test_title_capture_is_bounded() {
        let pattern = title_pattern_for(MemoryCategory::Goals, 50);
        let message = format!("quiero {}", "x".repeat(80));
        assert_eq!(pattern.extract(&message, 50), "x".repeat(50));
    }

    #[test]
    fn test_title_lead_in_is_case_insensitive_and_unicode() {
        let pattern = title_pattern_for(MemoryCategory::Reminders, 50);
        assert_eq!(
            pattern.extract("RECUÉRDAME llamar a mamá", 50),
            "llamar a mamá"
        );
    }

    #[test]
    fn test_title_fallbacks() {
        let ideas = title_pattern_for(MemoryCategory::Ideas, 50);
        assert_eq!(ideas.extract("qué tal si salimos", 50), "Nueva idea");

        let projects = title_pattern_for(MemoryCategory::Projects, 50);
        assert_eq!(projects.extract("trabajo en un proyecto", 50), "Proyecto mencionado");

        let feelings = title_pattern_for(MemoryCategory::Feelings, 50);
        assert_eq!(feelings.extract("tengo mucha ansiedad", 50), "Estado emocional");

        let general = title_pattern_for(MemoryCategory::General, 50);
        let long = "a".repeat(55);
        assert_eq!(general.extract(&long, 50), format!("{}...", "a".repeat(50)));
    }

    #[test]
    fn test_feelings_title_has_prefix_and_short_capture() {
        let feelings = title_pattern_for(MemoryCategory::Feelings, 50);
        let title = feelings.extract(
            "Hoy me siento muy cansado después de una semana larguísima de trabajo",
            50,
        );
        assert_eq!(title, "Estado: muy cansado después de una sem");
    }

    #[test]
    fn test_extract_tags_goals_and_urgency() {
        let tags = extract_tags(
            "quiero más dinero y hacer ejercicio, es importante",
            MemoryCategory::Goals,
        );
        assert_eq!(tags, vec!["goals", "salud", "finanzas", "urgente"]);
    }

    #[test]
    fn test_extract_tags_projects() {
        let tags = extract_tags(
            "mi startup personal me quita horas de trabajo",
            MemoryCategory::Projects,
        );
        assert_eq!(tags, vec!["projects", "personal", "trabajo", "emprendimiento"]);
    }

    #[test]
    fn test_extract_tags_other_categories_only_get_urgency() {
        assert_eq!(
            extract_tags("me siento mal en el trabajo", MemoryCategory::Feelings),
            vec!["feelings"]
        );
        assert_eq!(
            extract_tags("algo urgente", MemoryCategory::Ideas),
            vec!["ideas", "urgente"]
        );
    }

    #[test]
    fn test_calculate_priority_bases() {
        assert_eq!(calculate_priority("nada", MemoryCategory::Goals), 7);
        assert_eq!(calculate_priority("nada", MemoryCategory::Reminders), 6);
        assert_eq!(calculate_priority("nada", MemoryCategory::Feelings), 4);
        assert_eq!(calculate_priority("nada", MemoryCategory::Ideas), 5);
        assert_eq!(calculate_priority("nada", MemoryCategory::Projects), 5);
    }

    #[test]
    fn test_calculate_priority_adjustments_are_additive_and_clamped() {
        assert_eq!(calculate_priority("hoy", MemoryCategory::Feelings), 6);
        assert_eq!(
            calculate_priority("urgente e importante para mañana", MemoryCategory::Reminders),
            10
        );
        assert_eq!(
            calculate_priority("urgente, prioridad, esta semana", MemoryCategory::Goals),
            10
        );
    }

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(DateMatcher::new().patterns.len(), 7);
        for category in [
            MemoryCategory::Goals,
            MemoryCategory::Reminders,
            MemoryCategory::Ideas,
            MemoryCategory::Projects,
            MemoryCategory::Feelings,
        ] {
            for max_chars in [1, 50, crate::config::MAX_TITLE_CHARS] {
                assert!(
                    title_pattern_for(category, max_chars).regex.is_some(),
                    "{category} at {max_chars}"
                );
            }
        }
    }

    #[test]
    fn test_date_matcher_order_and_patterns() {
        let dates = DateMatcher::new();
        assert_eq!(dates.extract("nos vemos mañana").as_deref(), Some("mañana"));
        assert_eq!(dates.extract("pasado mañana").as_deref(), Some("mañana"));
        assert_eq!(
            dates.extract("La próxima semana empiezo").as_deref(),
            Some("La próxima semana")
        );
        assert_eq!(
            dates.extract("el próximo viernes hay cita").as_deref(),
            Some("el próximo viernes")
        );
        assert_eq!(dates.extract("en 3 días").as_deref(), Some("en 3 días"));
        assert_eq!(dates.extract("en 1 día").as_deref(), Some("en 1 día"));
        assert_eq!(dates.extract("el 15/08 a las 9").as_deref(), Some("15/08"));
        assert_eq!(dates.extract("antes de Diciembre").as_deref(), Some("Diciembre"));
        assert_eq!(dates.extract("sin fecha"), None);
    }

    #[test]
    fn test_project_status() {
        assert_eq!(extract_project_status("estoy empezando"), "iniciado");
        assert_eq!(extract_project_status("va en progreso"), "en_progreso");
        assert_eq!(extract_project_status("estamos finalizando"), "finalizando");
        assert_eq!(extract_project_status("ya terminé"), "completado");
        assert_eq!(extract_project_status("el proyecto"), "activo");
    }

    #[test]
    fn test_emotional_state_order_is_stable() {
        assert_eq!(extract_emotional_state("estoy contento"), "feliz");
        assert_eq!(extract_emotional_state("me siento deprimido"), "triste");
        assert_eq!(extract_emotional_state("muy nervioso"), "ansioso");
        assert_eq!(extract_emotional_state("inspirado hoy"), "motivado");
        assert_eq!(extract_emotional_state("qué molesto"), "frustrado");
        // feliz is checked before frustrado
        assert_eq!(extract_emotional_state("frustrado pero contento"), "feliz");
        assert_eq!(extract_emotional_state("sin señales"), "neutral");
    }

    #[test]
    fn test_is_substantial() {
        let config = ExtractorConfig::default();
        assert!(is_substantial("texto, con coma", &config));
        assert!(is_substantial(
            "uno dos tres cuatro cinco seis siete ocho nueve diez once",
            &config
        ));
        assert!(!is_substantial("1234 5678", &config));
        assert!(!is_substantial("ññññ", &config));
    }
}
