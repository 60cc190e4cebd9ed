//! Keyword tables and the ordered category rules.
//!
//! Category detection is a data structure: [`default_rules`] returns the rules in evaluation
//! order and the first rule whose keyword set hits wins. Keyword checks are plain substring
//! tests against the lower-cased, trimmed message.

use memory_core::MemoryCategory;

/// Whole-message greetings and acknowledgements that never produce a note.
pub const GREETINGS: &[&str] = &[
    "hola",
    "hi",
    "hello",
    "hey",
    "buenas",
    "buenos días",
    "buenas tardes",
    "buenas noches",
    "gracias",
    "thank you",
    "ok",
    "vale",
    "perfecto",
    "genial",
    "sí",
    "si",
    "no",
    "maybe",
    "quizás",
];

/// Phrases in a coach reply that mark a suggested plan or commitment.
pub const COACH_ACTION_PHRASES: &[&str] = &[
    "te sugiero",
    "recomiendo que",
    "podrías",
    "sería bueno que",
    "vamos a",
    "plan:",
    "próximos pasos",
    "te propongo",
];

const GOAL_KEYWORDS: &[&str] = &[
    "quiero",
    "mi objetivo",
    "mi meta",
    "propósito",
    "lograr",
    "conseguir",
    "alcanzar",
    "planear",
    "objetivo de",
    "meta de",
    "aspiro",
    "busco",
    "pretendo",
    "espero lograr",
    "mi plan es",
];

const REMINDER_KEYWORDS: &[&str] = &[
    "recordar",
    "no olvides",
    "recuérdame",
    "tengo que",
    "debo",
    "necesito hacer",
    "mañana",
    "la próxima semana",
    "el lunes",
    "recordatorio",
    "avísame",
    "que no se me olvide",
];

const IDEA_KEYWORDS: &[&str] = &[
    "se me ocurre",
    "tengo una idea",
    "qué tal si",
    "podría",
    "pienso que",
    "se me ocurrió",
    "una idea sería",
    "tal vez podríamos",
    "insight",
    "reflexión",
    "me di cuenta",
];

const PROJECT_KEYWORDS: &[&str] = &[
    "proyecto",
    "trabajando en",
    "desarrollando",
    "construyendo",
    "creando",
    "iniciativa",
    "emprendimiento",
    "startup",
    "negocio",
    "colaboración",
    "equipo",
];

const FEELING_KEYWORDS: &[&str] = &[
    "me siento",
    "estoy",
    "me encuentro",
    "emocionalmente",
    "ansiedad",
    "estrés",
    "feliz",
    "triste",
    "frustrado",
    "motivado",
    "desanimado",
    "preocupado",
    "entusiasmado",
    "nervioso",
    "relajado",
];

/// One entry of the ordered detection table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: MemoryCategory,
    pub keywords: &'static [&'static str],
    /// Value of `metadata.context` for extractions of this category.
    pub context: &'static str,
}

impl CategoryRule {
    /// True if `lowered` contains any keyword of this rule.
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// The detection table in evaluation order.
pub(crate) fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            category: MemoryCategory::Goals,
            keywords: GOAL_KEYWORDS,
            context: "objetivo_mencionado_por_usuario",
        },
        CategoryRule {
            category: MemoryCategory::Reminders,
            keywords: REMINDER_KEYWORDS,
            context: "recordatorio_solicitado",
        },
        CategoryRule {
            category: MemoryCategory::Ideas,
            keywords: IDEA_KEYWORDS,
            context: "idea_compartida",
        },
        CategoryRule {
            category: MemoryCategory::Projects,
            keywords: PROJECT_KEYWORDS,
            context: "proyecto_mencionado",
        },
        CategoryRule {
            category: MemoryCategory::Feelings,
            keywords: FEELING_KEYWORDS,
            context: "estado_emocional",
        },
    ]
}

pub(crate) const GENERAL_CONTEXT: &str = "conversacion_general";
pub(crate) const COACH_PLAN_CONTEXT: &str = "plan_del_coach";

/// True if the whole lower-cased message is a greeting or acknowledgement.
pub(crate) fn is_greeting(lowered: &str) -> bool {
    GREETINGS.iter().any(|g| *g == lowered)
}

/// True if the lower-cased coach reply contains an action-suggestion phrase.
pub(crate) fn suggests_action(lowered: &str) -> bool {
    COACH_ACTION_PHRASES.iter().any(|p| lowered.contains(p))
}
