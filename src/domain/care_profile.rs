// Care profile domain model
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BabyStage {
    Newborn,
    Infant,
    Toddler,
}

impl BabyStage {
    pub const ALL: [BabyStage; 3] = [BabyStage::Newborn, BabyStage::Infant, BabyStage::Toddler];

    pub fn as_str(&self) -> &'static str {
        match self {
            BabyStage::Newborn => "NEWBORN",
            BabyStage::Infant => "INFANT",
            BabyStage::Toddler => "TODDLER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BabyStage::Newborn => "新生儿（0-2月）",
            BabyStage::Infant => "婴儿（3-12月）",
            BabyStage::Toddler => "幼儿（1-3岁）",
        }
    }
}

impl fmt::Display for BabyStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown baby stage: {0}")]
pub struct UnknownStage(pub String);

impl FromStr for BabyStage {
    type Err = UnknownStage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NEWBORN" => Ok(BabyStage::Newborn),
            "INFANT" => Ok(BabyStage::Infant),
            "TODDLER" => Ok(BabyStage::Toddler),
            _ => Err(UnknownStage(s.to_string())),
        }
    }
}

/// A selectable focus area with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const FOCUS_OPTIONS: [FocusOption; 6] = [
    FocusOption { value: "feeding", label: "科学喂养" },
    FocusOption { value: "sleep", label: "睡眠节律" },
    FocusOption { value: "play", label: "亲子互动" },
    FocusOption { value: "soothing", label: "安抚技巧" },
    FocusOption { value: "language", label: "语言刺激" },
    FocusOption { value: "milestone", label: "成长里程碑" },
];

/// Baby description sent as `CareProfileInput` with both GraphQL operations.
///
/// Every edit produces a new value; the owner swaps the whole profile so a
/// changed profile always means changed query variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareProfile {
    pub name: String,
    pub baby_age_weeks: u32,
    pub baby_stage: BabyStage,
    pub focus_areas: Vec<String>,
}

impl CareProfile {
    pub fn new(name: String, baby_age_weeks: u32, baby_stage: BabyStage, focus_areas: Vec<String>) -> Self {
        Self {
            name,
            baby_age_weeks,
            baby_stage,
            focus_areas,
        }
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn with_age_weeks(&self, baby_age_weeks: u32) -> Self {
        Self {
            baby_age_weeks,
            ..self.clone()
        }
    }

    pub fn with_stage(&self, baby_stage: BabyStage) -> Self {
        Self {
            baby_stage,
            ..self.clone()
        }
    }

    /// Remove `value` if selected, otherwise append it at the tail
    pub fn with_focus_toggled(&self, value: &str) -> Self {
        let focus_areas = if self.has_focus(value) {
            self.focus_areas
                .iter()
                .filter(|item| item.as_str() != value)
                .cloned()
                .collect()
        } else {
            let mut areas = self.focus_areas.clone();
            areas.push(value.to_string());
            areas
        };

        Self {
            focus_areas,
            ..self.clone()
        }
    }

    pub fn has_focus(&self, value: &str) -> bool {
        self.focus_areas.iter().any(|item| item == value)
    }
}

impl Default for CareProfile {
    fn default() -> Self {
        Self::new(
            "豆豆".to_string(),
            20,
            BabyStage::Infant,
            vec!["sleep".to_string(), "play".to_string()],
        )
    }
}
