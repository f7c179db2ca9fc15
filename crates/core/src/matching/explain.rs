use super::types::{Criterion, CriterionScores};

/// Converts a camel-case criterion key into space-separated lower case.
pub fn humanize_criterion(key: &str) -> String {
    let mut words = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if !words.is_empty() {
                words.push(' ');
            }
            words.push(ch.to_ascii_lowercase());
        } else {
            words.push(ch);
        }
    }
    words
}

/// Justification strings in criterion declaration order.
///
/// Scores in 60..75 are unremarkable and produce no line.
pub fn explain(scores: &CriterionScores) -> Vec<String> {
    Criterion::ALL
        .iter()
        .filter_map(|criterion| {
            let score = scores.get(*criterion);
            let label = humanize_criterion(criterion.key());
            let verdict = match score {
                90..=u8::MAX => "excellent match",
                75..=89 => "good match",
                0..=59 => "limited match",
                _ => return None,
            };
            Some(format!("{verdict} {label} ({score}%)"))
        })
        .collect()
}
