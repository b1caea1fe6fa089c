use serde::{Deserialize, Deserializer};

/// Parse user text as a number the way form fields are read: the longest
/// leading numeric prefix wins ("12g" is 12), anything else is 0. A prefix
/// that overflows or spells out infinity or NaN also reads as 0.
pub fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    let mut ends: Vec<usize> = trimmed.char_indices().map(|(i, _)| i).skip(1).collect();
    ends.push(trimmed.len());

    ends.into_iter()
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Gram amounts: non-numeric, non-finite or negative input becomes 0.
pub fn coerce_grams(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accept either a JSON number or a numeric string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => coerce_number(&s),
    })
}
