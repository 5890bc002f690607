//! Theme palette: CSS custom properties derived from [`Theme`].

use crate::css::radius_value;
use pagesmith_model::Theme;

/// Lighten (positive `amount`) or darken a `#rrggbb` / `#rgb` color.
///
/// Each channel is shifted by `amount` and clamped to `0..=255`. Anything
/// that is not a hex color comes back unchanged.
pub fn adjust_color(color: &str, amount: i32) -> String {
    let hex = color.trim_start_matches('#');
    let expanded: String = if hex.len() == 3 {
        hex.chars().flat_map(|c| [c, c]).collect()
    } else {
        hex.to_string()
    };

    if expanded.len() != 6 || !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return color.to_string();
    }
    let Ok(value) = u32::from_str_radix(&expanded, 16) else {
        return color.to_string();
    };

    let shift = |channel: u32| (channel as i32 + amount).clamp(0, 255) as u32;
    let r = shift(value >> 16);
    let g = shift((value >> 8) & 0xff);
    let b = shift(value & 0xff);

    format!("#{:06x}", (r << 16) | (g << 8) | b)
}

/// Custom properties for the site root, in declaration order.
pub fn theme_variables(theme: &Theme) -> Vec<(String, String)> {
    let primary = &theme.colors.primary;
    let accent = &theme.colors.accent;

    let vars = [
        ("--font-primary", theme.font.clone()),
        ("--color-primary-50", adjust_color(primary, 170)),
        ("--color-primary-100", adjust_color(primary, 150)),
        ("--color-primary-500", adjust_color(primary, 20)),
        ("--color-primary-600", primary.clone()),
        ("--color-primary-700", adjust_color(primary, -20)),
        ("--color-primary-800", adjust_color(primary, -40)),
        ("--color-primary-900", adjust_color(primary, -60)),
        ("--color-accent-500", adjust_color(accent, 20)),
        ("--color-accent-600", accent.clone()),
        ("--color-secondary-900", theme.colors.secondary.clone()),
        ("--radius", radius_value(theme.border_radius.as_str()).to_string()),
    ];

    vars.into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}
