/// Persona for a top language that has no entry in [`LANGUAGE_PERSONAS`].
pub const DEFAULT_PERSONA: &str = "👨‍💻 Code Enthusiast";

/// Primary language (as GitHub names it) to persona tag.
pub static LANGUAGE_PERSONAS: &[(&str, &str)] = &[
    ("JavaScript", "🚀 Frontend Wizard"),
    ("TypeScript", "⚡ Type-Safe Architect"),
    ("Python", "🐍 Data Sorcerer"),
    ("Java", "☕ Enterprise Engineer"),
    ("Go", "⚙️ Performance Enthusiast"),
    ("Rust", "🦀 Memory Safety Guardian"),
    ("Ruby", "💎 Rails Craftsperson"),
    ("PHP", "🐘 Web Developer"),
    ("C", "🔧 Systems Programmer"),
    ("C++", "🎮 Performance Optimizer"),
    ("Swift", "🍎 iOS Innovator"),
    ("Kotlin", "🤖 Android Artist"),
];

/// Lookup is exact: GitHub reports canonical casing, and "C" must not
/// match "C++" or "C#".
pub fn language_persona(language: &str) -> &'static str {
    LANGUAGE_PERSONAS
        .iter()
        .find(|(name, _)| *name == language)
        .map(|(_, persona)| *persona)
        .unwrap_or(DEFAULT_PERSONA)
}
