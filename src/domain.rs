use url::Url;

use crate::config::DomainOptions;

/// Schemes that denote internal browser pages. These resolve to the scheme
/// name so internal pages cluster together, separate from `"unknown"`.
const INTERNAL_SCHEMES: &[&str] = &[
    "about",
    "chrome",
    "chrome-extension",
    "moz-extension",
    "edge",
    "brave",
    "vivaldi",
    "file",
];

/// Fixed list used by subdomain grouping. Deliberately not a
/// public-suffix-list lookup; see `DomainOptions::group_subdomains`.
const COMMON_TLDS: &[&str] = &["com", "org", "net", "edu", "gov", "io", "co"];

/// Fixed neutral gray for the `"unknown"` domain, bypassing the hash.
pub const UNKNOWN_COLOR: &str = "#9e9e9e";

/// Normalizes a URL into a domain key. Never panics; any input that cannot be
/// resolved maps to `options.fallback`.
pub fn resolve_domain(url: &str, options: &DomainOptions) -> String {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return options.fallback.clone();
    }

    let Ok(parsed) = Url::parse(trimmed) else {
        return options.fallback.clone();
    };

    let scheme = parsed.scheme();
    if INTERNAL_SCHEMES.contains(&scheme) {
        return scheme.to_owned();
    }

    let Some(host) = parsed.host_str() else {
        return options.fallback.clone();
    };

    let mut host = host.trim_end_matches('.').to_ascii_lowercase();
    if options.remove_www
        && let Some(stripped) = host.strip_prefix("www.")
        && !stripped.is_empty()
    {
        host = stripped.to_owned();
    }

    if options.group_subdomains {
        host = collapse_subdomains(&host);
    }

    if host.is_empty() {
        options.fallback.clone()
    } else {
        host
    }
}

fn collapse_subdomains(host: &str) -> String {
    let labels = host.split('.').collect::<Vec<_>>();
    if labels.len() <= 2 {
        return host.to_owned();
    }

    let last = labels[labels.len() - 1];
    if COMMON_TLDS.contains(&last) {
        format!("{}.{last}", labels[labels.len() - 2])
    } else {
        host.to_owned()
    }
}

/// Stable hex color for a domain key. Hashes into HSL space (hue [0,360),
/// saturation [65,85), lightness [45,65)) so adjacent domains land on
/// distinguishable but repeatable colors.
pub fn deterministic_color(domain: &str) -> String {
    if domain == "unknown" {
        return UNKNOWN_COLOR.to_owned();
    }

    let mut hash: i32 = 0;
    for byte in domain.bytes() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(byte as i32);
    }
    let hash = hash.unsigned_abs();

    let hue = (hash % 360) as f32;
    let saturation = (65 + ((hash / 360) % 20)) as f32 / 100.0;
    let lightness = (45 + ((hash / 7200) % 20)) as f32 / 100.0;

    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> (u8, u8, u8) {
    let chroma = (1.0 - ((2.0 * lightness) - 1.0).abs()) * saturation;
    let hue_sector = hue / 60.0;
    let secondary = chroma * (1.0 - ((hue_sector % 2.0) - 1.0).abs());
    let offset = lightness - (chroma / 2.0);

    let (r, g, b) = match hue_sector as u32 {
        0 => (chroma, secondary, 0.0),
        1 => (secondary, chroma, 0.0),
        2 => (0.0, chroma, secondary),
        3 => (0.0, secondary, chroma),
        4 => (secondary, 0.0, chroma),
        _ => (chroma, 0.0, secondary),
    };

    (
        ((r + offset) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((g + offset) * 255.0).round().clamp(0.0, 255.0) as u8,
        ((b + offset) * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_leading_www() {
        let options = DomainOptions::default();
        assert_eq!(
            resolve_domain("https://www.github.com/x", &options),
            "github.com"
        );
    }

    #[test]
    fn unparseable_input_falls_back() {
        let options = DomainOptions::default();
        assert_eq!(resolve_domain("not a url", &options), "unknown");
        assert_eq!(resolve_domain("", &options), "unknown");
        assert_eq!(resolve_domain("   ", &options), "unknown");
    }

    #[test]
    fn internal_schemes_resolve_to_scheme_name() {
        let options = DomainOptions::default();
        assert_eq!(resolve_domain("about:blank", &options), "about");
        assert_eq!(
            resolve_domain("chrome-extension://abcdef/options.html", &options),
            "chrome-extension"
        );
    }

    #[test]
    fn subdomain_grouping_collapses_known_tlds_only() {
        let options = DomainOptions {
            group_subdomains: true,
            ..DomainOptions::default()
        };
        assert_eq!(
            resolve_domain("https://user.github.io/repo", &options),
            "github.io"
        );
        assert_eq!(
            resolve_domain("https://docs.rs.example.internal/", &options),
            "docs.rs.example.internal"
        );
        assert_eq!(resolve_domain("https://github.io", &options), "github.io");
    }

    #[test]
    fn resolution_is_deterministic() {
        let options = DomainOptions::default();
        let first = resolve_domain("https://news.ycombinator.com/item?id=1", &options);
        let second = resolve_domain("https://news.ycombinator.com/item?id=1", &options);
        assert_eq!(first, second);
        assert_eq!(first, "news.ycombinator.com");
    }

    #[test]
    fn unknown_maps_to_fixed_gray() {
        assert_eq!(deterministic_color("unknown"), UNKNOWN_COLOR);
    }

    #[test]
    fn colors_are_stable_and_well_formed() {
        let first = deterministic_color("github.com");
        let second = deterministic_color("github.com");
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert!(first.starts_with('#'));
        assert_ne!(first, deterministic_color("stackoverflow.com"));
    }
}
