//! Hex color to CSS HSL conversion for theming.

use std::sync::OnceLock;

use regex::Regex;

use crate::content::ThemeColors;

/// Returned for anything that is not exactly six hex digits.
pub const BLACK_HSL: &str = "0 0% 0%";

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})$").expect("valid regex")
    })
}

/// Convert `#RRGGBB` (hash optional, any case) into `"H S% L%"`, each part rounded
/// to an integer. Malformed input yields [`BLACK_HSL`].
pub fn hex_to_hsl(hex: &str) -> String {
    let Some(caps) = hex_pattern().captures(hex) else {
        return BLACK_HSL.to_string();
    };
    let channel = |i: usize| {
        u8::from_str_radix(&caps[i], 16).map(|v| f64::from(v) / 255.0)
    };
    let (Ok(r), Ok(g), Ok(b)) = (channel(1), channel(2), channel(3)) else {
        return BLACK_HSL.to_string();
    };

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let (mut h, mut s) = (0.0, 0.0);

    if max != min {
        let d = max - min;
        s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;
    }

    format!(
        "{} {}% {}%",
        round_half_up(h * 360.0),
        round_half_up(s * 100.0),
        round_half_up(l * 100.0)
    )
}

/// Rounds .5 toward positive infinity, matching the usual browser rounding.
fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// `:root` custom properties for the six theme colors.
pub fn css_variables(theme: &ThemeColors) -> String {
    let vars = [
        ("--primary-hsl", &theme.primary),
        ("--secondary-hsl", &theme.secondary),
        ("--accent-hsl", &theme.accent),
        ("--bg-start-hsl", &theme.bg_start),
        ("--bg-mid-hsl", &theme.bg_mid),
        ("--bg-end-hsl", &theme.bg_end),
    ];
    let mut css = String::from(":root {\n");
    for (name, hex) in vars {
        css.push_str(&format!("  {name}: {};\n", hex_to_hsl(hex)));
    }
    css.push('}');
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_reference_colors() {
        assert_eq!(hex_to_hsl("#FFFFFF"), "0 0% 100%");
        assert_eq!(hex_to_hsl("#000000"), "0 0% 0%");
        assert_eq!(hex_to_hsl("#FF0000"), "0 100% 50%");
        assert_eq!(hex_to_hsl("#00ff00"), "120 100% 50%");
        assert_eq!(hex_to_hsl("0000FF"), "240 100% 50%");
        assert_eq!(hex_to_hsl("#808080"), "0 0% 50%");
    }

    #[test]
    fn converts_seed_theme_primary() {
        // 0x66,0x4d,0xff: hue 248.4, saturation 100, lightness 65.1
        assert_eq!(hex_to_hsl("#664dff"), "248 100% 65%");
    }

    #[test]
    fn hue_wraps_when_blue_exceeds_green() {
        // Red max with b > g lands in the 300-360 band.
        assert_eq!(hex_to_hsl("#ff00ff"), "300 100% 50%");
    }

    #[test]
    fn malformed_input_is_black() {
        for bad in ["", "#fff", "#12345", "#1234567", "#gg0000", "red", "##000000", " #000000"] {
            assert_eq!(hex_to_hsl(bad), BLACK_HSL, "input {bad:?}");
        }
    }

    #[test]
    fn css_variables_cover_all_six_colors() {
        let css = css_variables(&crate::content::seed_theme());
        assert!(css.starts_with(":root {"));
        assert!(css.contains("--primary-hsl: 248 100% 65%;"));
        for var in ["--secondary-hsl", "--accent-hsl", "--bg-start-hsl", "--bg-mid-hsl", "--bg-end-hsl"] {
            assert!(css.contains(var), "missing {var}");
        }
    }
}
