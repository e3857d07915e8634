//! Skill registry rules: per-user cardinality and case-insensitive name
//! uniqueness.

use crate::error::CoreError;

/// Maximum number of skills a single user may own.
pub const MAX_SKILLS_PER_USER: usize = 5;

/// Maximum length of a skill name, in characters. Matches `skills.name`.
pub const MAX_SKILL_NAME_LEN: usize = 100;

/// Trim a submitted skill name and check its length.
pub fn normalize_name(name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Skill name must not be empty".into()));
    }
    if trimmed.chars().count() > MAX_SKILL_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "Skill name must be at most {MAX_SKILL_NAME_LEN} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Reject `name` if any of `existing` matches it ignoring case.
pub fn ensure_unique_name<'a, I>(existing: I, name: &str) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a str>,
{
    let wanted = name.to_lowercase();
    if existing.into_iter().any(|n| n.to_lowercase() == wanted) {
        return Err(CoreError::DuplicateSkillName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validate a new skill against the names the user already owns.
///
/// Returns the trimmed name to store. The limit is checked before the name
/// so a full registry always reports `SkillLimitReached`.
pub fn validate_new_skill(existing: &[&str], name: &str) -> Result<String, CoreError> {
    if existing.len() >= MAX_SKILLS_PER_USER {
        return Err(CoreError::SkillLimitReached {
            limit: MAX_SKILLS_PER_USER,
        });
    }
    let name = normalize_name(name)?;
    ensure_unique_name(existing.iter().copied(), &name)?;
    Ok(name)
}
