//! Fixed allow-list of color themes understood by the preview page.

/// Themes accepted by the render endpoint.
pub const THEMES: &[&str] = &[
    "a11y-dark",
    "atom-dark",
    "cb",
    "darcula",
    "dark",
    "default",
    "dracula",
    "duotone-dark",
    "duotone-light",
    "duotone-sea",
    "duotone-space",
    "ghcolors",
    "hopscotch",
    "material-dark",
    "material-light",
    "material-oceanic",
    "nord",
    "pojoaque",
    "shades-of-purple",
    "synthwave84",
    "vs",
    "vsc-dark-plus",
    "xonokai",
];

/// Whether the given theme is in the allow-list.
pub fn is_supported(theme: &str) -> bool {
    THEMES.contains(&theme)
}
