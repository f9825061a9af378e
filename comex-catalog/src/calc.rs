//! Derived-field calculators: cubic weight, volume and the truncated
//! short description. All pure, all rounding half-away-from-zero.

/// Round to 3 decimal places, half away from zero.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn any_unusable(comprimento: f64, largura: f64, altura: f64) -> bool {
    [comprimento, largura, altura]
        .iter()
        .any(|v| !v.is_finite() || *v == 0.0)
}

/// Volumetric weight in kg for freight pricing: (l * w * h) / 6000,
/// dimensions in cm. Returns 0 when any dimension is zero or unusable.
pub fn cubic_weight(comprimento: f64, largura: f64, altura: f64) -> f64 {
    if any_unusable(comprimento, largura, altura) {
        return 0.0;
    }
    round3(comprimento * largura * altura / 6000.0)
}

/// Volume in m³ from dimensions in cm. Returns 0 when any dimension is
/// zero or unusable.
pub fn volume(comprimento: f64, largura: f64, altura: f64) -> f64 {
    if any_unusable(comprimento, largura, altura) {
        return 0.0;
    }
    round3(comprimento * largura * altura / 1_000_000.0)
}

/// Short description: the full text when it fits in 100 characters,
/// otherwise the first 97 characters plus `"..."`. Counts characters,
/// not bytes, so accented text truncates cleanly.
pub fn short_description(descricao: &str) -> String {
    if descricao.chars().count() <= 100 {
        return descricao.to_string();
    }
    let mut short: String = descricao.chars().take(97).collect();
    short.push_str("...");
    short
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_weight_of_reference_box() {
        assert_eq!(cubic_weight(100.0, 50.0, 40.0), 33.333);
    }

    #[test]
    fn volume_of_reference_box() {
        assert_eq!(volume(100.0, 50.0, 40.0), 0.2);
    }

    #[test]
    fn zero_dimension_yields_zero() {
        assert_eq!(cubic_weight(0.0, 50.0, 40.0), 0.0);
        assert_eq!(volume(100.0, 0.0, 40.0), 0.0);
    }

    #[test]
    fn nan_dimension_yields_zero() {
        assert_eq!(cubic_weight(f64::NAN, 50.0, 40.0), 0.0);
        assert_eq!(volume(100.0, 50.0, f64::NAN), 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 30 * 25 * 10 / 6000 = 1.25 -> stays exact
        assert_eq!(cubic_weight(30.0, 25.0, 10.0), 1.25);
        // 1 * 1 * 9.003 / 6000 = 0.0015005 -> 0.002
        assert_eq!(cubic_weight(1.0, 1.0, 9.003), 0.002);
    }

    #[test]
    fn short_description_keeps_100_chars() {
        let text: String = "a".repeat(100);
        assert_eq!(short_description(&text), text);
    }

    #[test]
    fn short_description_truncates_101_chars() {
        let text: String = "a".repeat(101);
        let short = short_description(&text);
        assert_eq!(short.chars().count(), 100);
        assert_eq!(short, format!("{}...", "a".repeat(97)));
    }

    #[test]
    fn short_description_truncates_150_chars_to_100() {
        let text: String = "b".repeat(150);
        let short = short_description(&text);
        assert_eq!(short.chars().count(), 100);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn short_description_counts_characters_not_bytes() {
        // 120 two-byte characters; byte-indexed truncation would split
        // one of them in half.
        let text: String = "çã".chars().cycle().take(120).collect();
        let short = short_description(&text);
        assert_eq!(short.chars().count(), 100);
        assert!(short.ends_with("..."));
    }
}
