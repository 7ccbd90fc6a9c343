//! Fixed allow-list of languages the preview page can highlight.
//!
//! The list must stay in sync with the grammars bundled by the preview page;
//! a language accepted here but unknown to the page renders as plain text.

/// Languages accepted by the render endpoint.
pub const LANGUAGES: &[&str] = &[
    "bash",
    "c",
    "cpp",
    "csharp",
    "css",
    "dart",
    "diff",
    "go",
    "graphql",
    "haskell",
    "html",
    "java",
    "javascript",
    "json",
    "jsx",
    "kotlin",
    "lua",
    "markdown",
    "objectivec",
    "perl",
    "php",
    "python",
    "r",
    "ruby",
    "rust",
    "scala",
    "sql",
    "swift",
    "toml",
    "tsx",
    "typescript",
    "yaml",
];

/// Whether the given language is in the allow-list.
pub fn is_supported(language: &str) -> bool {
    LANGUAGES.contains(&language)
}
