//! Default prompt templates bundled at compile time.

/// Architect - turns the user requirement into a blueprint
pub const ARCHITECT: &str = include_str!("defaults/architect.md");

/// Specialist - builds one file and saves it through the file writer tool
pub const SPECIALIST: &str = include_str!("defaults/specialist.md");

/// All default prompts with their slugs
pub fn all_defaults() -> Vec<(&'static str, &'static str)> {
    vec![("architect", ARCHITECT), ("specialist", SPECIALIST)]
}
