//! Prompt wording per document kind

use crate::models::config::DocKind;

/// Opening line that frames the model's role
fn persona(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Readme => "You are a technical documentation expert.",
        DocKind::Pr => "You are a code review expert.",
        DocKind::Changelog => "You are a release notes expert.",
    }
}

fn default_task(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Readme => {
            "Analyze this codebase and generate a comprehensive README section in professional Markdown format."
        }
        DocKind::Pr => {
            "Analyze these code changes and generate a clear Pull Request description."
        }
        DocKind::Changelog => {
            "Analyze these commit messages and generate a changelog entry."
        }
    }
}

fn context_label(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Readme => "Code",
        DocKind::Pr => "Changes",
        DocKind::Changelog => "Commits",
    }
}

fn guidance(kind: DocKind) -> &'static str {
    match kind {
        DocKind::Readme => {
            "Generate:
- Clear project overview and purpose
- Key features and functionality
- Installation instructions
- Usage examples with code snippets
- API documentation if applicable

Keep it concise, professional, and developer-friendly."
        }
        DocKind::Pr => {
            "Include:
- **Summary**: What was changed and why
- **Changes Made**: Bullet points of key modifications
- **Impact**: How this affects the codebase
- **Testing**: What should be tested
- **Breaking Changes**: Any breaking changes (if applicable)

Format in professional Markdown."
        }
        DocKind::Changelog => {
            "Categorize changes as:
- 🚀 **Features**: New functionality
- 🐛 **Bug Fixes**: Fixed issues
- 📚 **Documentation**: Documentation updates
- 🔧 **Maintenance**: Code improvements, refactoring
- ⚠️ **Breaking Changes**: API changes that break compatibility

Format in Markdown with proper versioning and dates."
        }
    }
}

/// Full prompt for `kind` around `context`.
///
/// A custom instruction replaces the task and the guidance list; the context
/// is embedded either way.
pub fn build_prompt(kind: DocKind, context: &str, custom_instruction: Option<&str>) -> String {
    let label = context_label(kind);
    match custom_instruction.map(str::trim).filter(|i| !i.is_empty()) {
        Some(instruction) => format!(
            "{} {}\n\n{}:\n{}\n\nFormat in professional Markdown.",
            persona(kind),
            instruction,
            label,
            context
        ),
        None => format!(
            "{} {}\n\n{}:\n{}\n\n{}",
            persona(kind),
            default_task(kind),
            label,
            context,
            guidance(kind)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts_embed_context() {
        let readme = build_prompt(DocKind::Readme, "function main() {}", None);
        assert!(readme.starts_with("You are a technical documentation expert."));
        assert!(readme.contains("Code:\nfunction main() {}"));
        assert!(readme.contains("Installation instructions"));

        let pr = build_prompt(DocKind::Pr, "Files changed: 2", None);
        assert!(pr.contains("Changes:\nFiles changed: 2"));
        assert!(pr.contains("**Breaking Changes**"));

        let changelog = build_prompt(DocKind::Changelog, "- abc123 fix", None);
        assert!(changelog.contains("Commits:\n- abc123 fix"));
    }

    #[test]
    fn test_custom_instruction_keeps_context() {
        let prompt = build_prompt(
            DocKind::Readme,
            "class Widget {}",
            Some("Generate practical usage examples"),
        );
        assert!(prompt.contains("Generate practical usage examples"));
        assert!(prompt.contains("class Widget {}"));
        assert!(!prompt.contains("Installation instructions"));
    }

    #[test]
    fn test_blank_custom_instruction_is_ignored() {
        assert_eq!(
            build_prompt(DocKind::Pr, "x", Some("   ")),
            build_prompt(DocKind::Pr, "x", None)
        );
    }
}
