use sitefit_core::CustomizationBundle;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardrailDecision {
    Allow,
    Deny { reason_code: &'static str, detail: String },
    Degrade { reason_code: &'static str, detail: String },
}

/// Limits a generated customization bundle must respect before it reaches a
/// recommendation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleGuardrails {
    pub min_font_px: u8,
    pub max_font_px: u8,
    pub max_headline_chars: usize,
    pub max_tagline_chars: usize,
    pub max_call_to_action_chars: usize,
}

impl Default for BundleGuardrails {
    fn default() -> Self {
        Self {
            min_font_px: 12,
            max_font_px: 24,
            max_headline_chars: 80,
            max_tagline_chars: 140,
            max_call_to_action_chars: 30,
        }
    }
}

pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 3 | 6) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect::<String>().trim_end().to_string()
}

impl BundleGuardrails {
    /// Deny bundles that cannot be repaired; degrade ones that only need clamping.
    pub fn evaluate(&self, bundle: &CustomizationBundle) -> GuardrailDecision {
        let palette = &bundle.palette;
        let colors = [
            ("primary", &palette.primary),
            ("secondary", &palette.secondary),
            ("accent", &palette.accent),
            ("background", &palette.background),
            ("text", &palette.text),
        ];
        if let Some((slot, value)) = colors.iter().find(|(_, value)| !is_hex_color(value)) {
            return GuardrailDecision::Deny {
                reason_code: "invalid_palette_color",
                detail: format!("{slot} colour `{value}` is not a hex colour"),
            };
        }

        if bundle.content.headline.trim().is_empty() {
            return GuardrailDecision::Deny {
                reason_code: "missing_headline",
                detail: "generated content has no headline".to_string(),
            };
        }
        if bundle.content.call_to_action.trim().is_empty() {
            return GuardrailDecision::Deny {
                reason_code: "missing_call_to_action",
                detail: "generated content has no call to action".to_string(),
            };
        }

        let size = bundle.typography.base_size_px;
        if size < self.min_font_px || size > self.max_font_px {
            return GuardrailDecision::Degrade {
                reason_code: "font_size_out_of_range",
                detail: format!(
                    "base font size {size}px outside {}..={}px",
                    self.min_font_px, self.max_font_px
                ),
            };
        }

        let content = &bundle.content;
        if content.headline.chars().count() > self.max_headline_chars
            || content.tagline.chars().count() > self.max_tagline_chars
            || content.call_to_action.chars().count() > self.max_call_to_action_chars
        {
            return GuardrailDecision::Degrade {
                reason_code: "content_too_long",
                detail: "generated copy exceeds length limits".to_string(),
            };
        }

        GuardrailDecision::Allow
    }

    /// Clamp font size and truncate copy to the configured limits.
    pub fn sanitize(&self, mut bundle: CustomizationBundle) -> CustomizationBundle {
        bundle.typography.base_size_px =
            bundle.typography.base_size_px.clamp(self.min_font_px, self.max_font_px);

        let content = &mut bundle.content;
        content.headline = truncate_chars(&content.headline, self.max_headline_chars);
        content.tagline = truncate_chars(&content.tagline, self.max_tagline_chars);
        content.call_to_action =
            truncate_chars(&content.call_to_action, self.max_call_to_action_chars);

        bundle
    }
}

#[cfg(test)]
mod tests {
    use super::{is_hex_color, BundleGuardrails, GuardrailDecision};
    use sitefit_core::CustomizationBundle;

    #[test]
    fn default_bundle_is_allowed() {
        let guardrails = BundleGuardrails::default();
        assert_eq!(
            guardrails.evaluate(&CustomizationBundle::default_bundle()),
            GuardrailDecision::Allow
        );
    }

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#1F4E79"));
        assert!(is_hex_color("#fff"));
        assert!(!is_hex_color("1F4E79"));
        assert!(!is_hex_color("#12345G"));
        assert!(!is_hex_color("navy"));
    }

    #[test]
    fn named_color_is_denied() {
        let mut bundle = CustomizationBundle::default_bundle();
        bundle.palette.accent = "tomato".to_string();

        let reason_code = match BundleGuardrails::default().evaluate(&bundle) {
            GuardrailDecision::Deny { reason_code, detail } => {
                assert!(detail.contains("accent"));
                reason_code
            }
            _ => "",
        };
        assert_eq!(reason_code, "invalid_palette_color");
    }

    #[test]
    fn empty_call_to_action_is_denied() {
        let mut bundle = CustomizationBundle::default_bundle();
        bundle.content.call_to_action = "   ".to_string();

        let decision = BundleGuardrails::default().evaluate(&bundle);
        assert!(matches!(
            decision,
            GuardrailDecision::Deny { reason_code: "missing_call_to_action", .. }
        ));
    }

    #[test]
    fn oversized_font_degrades_and_sanitizes() {
        let guardrails = BundleGuardrails::default();
        let mut bundle = CustomizationBundle::default_bundle();
        bundle.typography.base_size_px = 40;
        bundle.content.call_to_action =
            "Start your free trial today and never look back".to_string();

        assert!(matches!(
            guardrails.evaluate(&bundle),
            GuardrailDecision::Degrade { reason_code: "font_size_out_of_range", .. }
        ));

        let sanitized = guardrails.sanitize(bundle);
        assert_eq!(sanitized.typography.base_size_px, 24);
        assert!(sanitized.content.call_to_action.chars().count() <= 30);
        assert_eq!(guardrails.evaluate(&sanitized), GuardrailDecision::Allow);
    }
}
