use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Typography {
    pub heading_font: String,
    pub body_font: String,
    pub base_size_px: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageryGuidelines {
    pub style: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentGuidelines {
    pub headline: String,
    pub tagline: String,
    pub call_to_action: String,
    #[serde(default)]
    pub tone: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationLevel {
    None,
    #[default]
    Subtle,
    Moderate,
    Rich,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSettings {
    pub level: AnimationLevel,
    #[serde(default)]
    pub effects: Vec<String>,
}

/// Palette, typography, imagery, content and animation tailored to one business.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizationBundle {
    pub palette: ColorPalette,
    pub typography: Typography,
    pub imagery: ImageryGuidelines,
    pub content: ContentGuidelines,
    pub animations: AnimationSettings,
}

impl CustomizationBundle {
    /// Static bundle substituted whenever tailored customization is unavailable.
    pub fn default_bundle() -> Self {
        Self {
            palette: ColorPalette {
                primary: "#1F4E79".to_string(),
                secondary: "#2E86C1".to_string(),
                accent: "#F39C12".to_string(),
                background: "#FFFFFF".to_string(),
                text: "#1C1C1C".to_string(),
            },
            typography: Typography {
                heading_font: "Inter".to_string(),
                body_font: "Open Sans".to_string(),
                base_size_px: 16,
            },
            imagery: ImageryGuidelines {
                style: "clean product photography".to_string(),
                subjects: vec!["team".to_string(), "product".to_string()],
            },
            content: ContentGuidelines {
                headline: "Built for what you do best".to_string(),
                tagline: "A modern website that grows with your business".to_string(),
                call_to_action: "Get started".to_string(),
                tone: None,
            },
            animations: AnimationSettings { level: AnimationLevel::Subtle, effects: Vec::new() },
        }
    }
}

impl Default for CustomizationBundle {
    fn default() -> Self {
        Self::default_bundle()
    }
}
