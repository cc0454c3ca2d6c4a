use serde::{Deserialize, Serialize};

use super::health::ScheduleHealthCounts;
use super::task::Task;

/// Label given to tasks that match no rule, directly or through an ancestor.
pub const FALLBACK_CATEGORY: &str = "Geral";

/// Colour/icon used for names missing from the style table.
pub const DEFAULT_COLOR: &str = "#6B7280";
pub const DEFAULT_ICON: &str = "folder";

/// A named group of tasks sharing a domain label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub color_tag: String,
    pub icon_tag: String,
    /// Unweighted mean of the members' completion percent.
    pub average_progress: f64,
    /// Members sorted by id.
    pub tasks: Vec<Task>,
    pub schedule_health: ScheduleHealthCounts,
    #[serde(default)]
    pub completed_tasks: usize,
    #[serde(default)]
    pub in_progress_tasks: usize,
    #[serde(default)]
    pub pending_tasks: usize,
}

/// Maps a task name to a category label when any keyword is a substring of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub label: String,
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.keywords.iter().any(|k| name.contains(k.as_str()))
    }
}

/// Display metadata for one category label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub label: String,
    pub color: String,
    pub icon: String,
}

impl CategoryStyle {
    fn new(label: &str, color: &str, icon: &str) -> Self {
        Self {
            label: label.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
        }
    }
}

// ── Vocabulary ───────────────────────────────────────────────────────────────

/// Domain vocabulary used to label tasks and decorate categories.
///
/// Rules are evaluated in order and the first match wins. `principal` is the
/// fixed emission order used for fixed-position imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryVocabulary {
    pub rules: Vec<CategoryRule>,
    pub styles: Vec<CategoryStyle>,
    pub principal: Vec<String>,
}

pub const PREPARACAO: &str = "Preparação (Espessador / Moagem / Homogeneização)";

impl Default for CategoryVocabulary {
    fn default() -> Self {
        let rules = vec![
            CategoryRule::new("Logística", &["Logística"]),
            CategoryRule::new("Refratário", &["Refratário"]),
            CategoryRule::new("Elétrica", &["Elétrica"]),
            CategoryRule::new(PREPARACAO, &["Espessador", "Moagem", "Homogeneização"]),
            CategoryRule::new("Mecânica do Forno", &["Mecânica", "Meio do Forno"]),
            CategoryRule::new("Barramentos", &["Barramentos"]),
            CategoryRule::new("Ventiladores", &["Ventilador"]),
            CategoryRule::new("Canteiros", &["Canteiro"]),
            CategoryRule::new("Mobilização", &["Mobilização"]),
            CategoryRule::new("Trilhos", &["Trilho"]),
            CategoryRule::new("Selagens", &["Selagem"]),
            CategoryRule::new("Juntas de Expansão", &["Junta"]),
            CategoryRule::new("Caixas Secas", &["Caixa Seca"]),
            CategoryRule::new("Bogiflex", &["Bogiflex"]),
        ];

        let styles = vec![
            CategoryStyle::new("Logística", "#3B82F6", "truck"),
            CategoryStyle::new("Refratário", "#10B981", "hammer"),
            CategoryStyle::new("Elétrica", "#F59E0B", "zap"),
            CategoryStyle::new(PREPARACAO, "#EF4444", "settings"),
            CategoryStyle::new("Mecânica do Forno", "#8B5CF6", "cog"),
            CategoryStyle::new("Barramentos", "#EC4899", "activity"),
            CategoryStyle::new("Ventiladores", "#A855F7", "wind"),
            CategoryStyle::new("Canteiros", "#DB2777", "home"),
            CategoryStyle::new("Mobilização", "#F97316", "users"),
            CategoryStyle::new("Trilhos", "#14B8A6", "git-commit"),
            CategoryStyle::new("Selagens", "#06B6D4", "shield"),
            CategoryStyle::new("Juntas de Expansão", "#059669", "link"),
            CategoryStyle::new("Caixas Secas", "#7C3AED", "box"),
            CategoryStyle::new("Bogiflex", "#E11D48", "layers"),
            CategoryStyle::new(FALLBACK_CATEGORY, DEFAULT_COLOR, DEFAULT_ICON),
        ];

        let principal = [
            "Logística",
            "Refratário",
            "Elétrica",
            PREPARACAO,
            "Mecânica do Forno",
            "Barramentos",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        Self {
            rules,
            styles,
            principal,
        }
    }
}

impl CategoryVocabulary {
    /// First rule label matching `name`, if any.
    pub fn match_name(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.rules
            .iter()
            .find(|rule| rule.matches(name))
            .map(|rule| rule.label.as_str())
    }

    /// `(color, icon)` for a category name, neutral defaults when unknown.
    pub fn style_of(&self, name: &str) -> (&str, &str) {
        self.styles
            .iter()
            .find(|s| s.label == name)
            .map(|s| (s.color.as_str(), s.icon.as_str()))
            .unwrap_or((DEFAULT_COLOR, DEFAULT_ICON))
    }
}
