//! Prompt templates for relevance analysis and refinement.
//!
//! Both builders are pure: the same inputs always produce the same prompt.
//! The model keeps no state between calls, so every prompt carries the full
//! repository context.

use std::fmt;

/// A finished prompt. Never modified after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevancePrompt(String);

impl RelevancePrompt {
    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelevancePrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const ANALYSIS_INSTRUCTIONS: &str = "\
# File Relevance Analysis

You are an experienced engineer reviewing a repository. Identify every file a \
developer would need to open to understand and implement the user request \
below, and nothing more.

## Rules

1. Every path you return MUST appear in the File Tree below. Never invent, \
guess, or rename paths. Drop any candidate you cannot find in the tree.
2. Start from files that directly implement the requested behavior, then add \
the files they import or that import them when those are needed for the task.
3. Add types, interfaces, configuration, layouts, tests, or docs only when \
they directly shape the requested change.
4. Prefer specific files over broad utilities. Leave out generic helpers \
unless the change depends on them.
5. For UI work, include the root application file, the layouts and pages the \
change is rendered in, and the most semantically fitting existing components.
6. Use paths exactly as the tree shows them, relative to the repository root.

## Output

Answer with a JSON object with a single key `relevant_files` holding an \
array of path strings.";

const REFINEMENT_INSTRUCTIONS: &str = "\
# File Relevance Refinement

You previously selected files for a user request. The user has reviewed that \
selection and left comments. Produce a corrected selection.

## Rules

1. Apply the user comments: add files or folders they say are missing and \
remove the ones they say are wrong. Keep the rest of the previous selection \
unless the comments say otherwise.
2. The original analysis prompt below contains the File Tree and the file \
contents. Every path you return MUST appear in that File Tree.
3. When a comment names a folder, expand it to the files inside it that the \
tree shows.

## Output

Answer with a JSON object with a single key `relevant_files` holding the \
complete corrected array of path strings, not just the changes.";

/// Build the first-round analysis prompt.
pub fn build_initial(request: &str, tree: &str, content: &str) -> RelevancePrompt {
    RelevancePrompt(format!(
        "{ANALYSIS_INSTRUCTIONS}\n\n\
         ## File Tree\n\n```\n{tree}\n```\n\n\
         ## File Contents\n\n```\n{content}\n```\n\n\
         ## User Request\n\n```\n{request}\n```\n"
    ))
}

/// Build a refinement prompt around the original analysis prompt.
pub fn build_refinement(
    original: &RelevancePrompt,
    prior_files: &[String],
    comments: &str,
) -> RelevancePrompt {
    let prior = prior_files.join("\n");
    RelevancePrompt(format!(
        "{REFINEMENT_INSTRUCTIONS}\n\n\
         ## Original Analysis Prompt\n\n````\n{original}\n````\n\n\
         ## Previous Selection\n\n```\n{prior}\n```\n\n\
         ## User Comments\n\n```\n{comments}\n```\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_embeds_inputs_verbatim() {
        let prompt = build_initial(
            "add a sidebar",
            "./\n└── app.vue",
            "<app.vue>\n<div/>\n</app.vue>",
        );
        let text = prompt.as_str();

        assert!(text.contains("add a sidebar"));
        assert!(text.contains("./\n└── app.vue"));
        assert!(text.contains("<app.vue>\n<div/>\n</app.vue>"));
        assert!(text.contains("MUST appear in the File Tree"));
        assert!(text.contains("relevant_files"));
    }

    #[test]
    fn test_initial_is_deterministic() {
        assert_eq!(build_initial("r", "t", "c"), build_initial("r", "t", "c"));
    }

    #[test]
    fn test_refinement_carries_original_prompt() {
        let original = build_initial("fix login", "tree", "content");
        let prior = vec!["src/login.ts".to_string(), "src/api.ts".to_string()];
        let prompt = build_refinement(&original, &prior, "drop the api client");
        let text = prompt.as_str();

        assert!(text.contains(original.as_str()));
        assert!(text.contains("src/login.ts\nsrc/api.ts"));
        assert!(text.contains("drop the api client"));
    }

    #[test]
    fn test_refinement_with_empty_selection() {
        let original = build_initial("r", "t", "c");
        let prompt = build_refinement(&original, &[], "include src/");
        assert!(prompt.as_str().contains("## Previous Selection\n\n```\n\n```"));
    }
}
