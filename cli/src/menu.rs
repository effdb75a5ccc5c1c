//! Interactive prompts for the post-analysis menu.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use repo_slice_core::{ExportFormat, MenuAction, ResponseMode};

/// One entry of the post-analysis menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Content,
    Json,
    AtFile,
    Newline,
    Refine,
    Exit,
}

impl MenuChoice {
    /// Menu order as shown to the user.
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Content,
        MenuChoice::Json,
        MenuChoice::AtFile,
        MenuChoice::Newline,
        MenuChoice::Refine,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::Content => "Copy file contents with request and tree",
            MenuChoice::Json => "Copy as JSON array",
            MenuChoice::AtFile => "Copy as @file references",
            MenuChoice::Newline => "Copy as newline-separated list",
            MenuChoice::Refine => "Refine the list with comments",
            MenuChoice::Exit => "Exit",
        }
    }

    /// Turn the choice into a session action, asking follow-up questions
    /// only for the choices that need them.
    pub fn into_action(
        self,
        ask_mode: impl FnOnce() -> Result<ResponseMode>,
        ask_comments: impl FnOnce() -> Result<String>,
    ) -> Result<MenuAction> {
        Ok(match self {
            MenuChoice::Content => MenuAction::Export(ExportFormat::Content(ask_mode()?)),
            MenuChoice::Json => MenuAction::Export(ExportFormat::Json),
            MenuChoice::AtFile => MenuAction::Export(ExportFormat::AtFile),
            MenuChoice::Newline => MenuAction::Export(ExportFormat::Newline),
            MenuChoice::Refine => MenuAction::Refine {
                comments: ask_comments()?,
            },
            MenuChoice::Exit => MenuAction::Exit,
        })
    }
}

const RESPONSE_MODES: [(ResponseMode, &str); 2] = [
    (ResponseMode::Diff, "Diff (ask for unified diffs)"),
    (ResponseMode::Normal, "Normal (free-form answer)"),
];

/// Ask for the change request the analysis is for.
pub fn prompt_request() -> Result<String> {
    let request: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Describe the change you want to make")
        .interact_text()?;
    Ok(request.trim().to_string())
}

/// Show the menu and build the chosen action.
pub fn choose_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    MenuChoice::ALL[index].into_action(choose_mode, prompt_comments)
}

fn choose_mode() -> Result<ResponseMode> {
    let labels: Vec<&str> = RESPONSE_MODES.iter().map(|(_, label)| *label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Response mode")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(RESPONSE_MODES[index].0)
}

fn prompt_comments() -> Result<String> {
    let comments: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Comments for refining the list")
        .interact_text()?;
    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_mode() -> Result<ResponseMode> {
        panic!("mode should not be asked")
    }

    fn no_comments() -> Result<String> {
        panic!("comments should not be asked")
    }

    #[test]
    fn test_exports_need_no_follow_up() {
        assert_eq!(
            MenuChoice::Json.into_action(no_mode, no_comments).unwrap(),
            MenuAction::Export(ExportFormat::Json)
        );
        assert_eq!(
            MenuChoice::AtFile.into_action(no_mode, no_comments).unwrap(),
            MenuAction::Export(ExportFormat::AtFile)
        );
        assert_eq!(
            MenuChoice::Newline.into_action(no_mode, no_comments).unwrap(),
            MenuAction::Export(ExportFormat::Newline)
        );
        assert_eq!(
            MenuChoice::Exit.into_action(no_mode, no_comments).unwrap(),
            MenuAction::Exit
        );
    }

    #[test]
    fn test_content_asks_for_mode() {
        let action = MenuChoice::Content
            .into_action(|| Ok(ResponseMode::Diff), no_comments)
            .unwrap();
        assert_eq!(
            action,
            MenuAction::Export(ExportFormat::Content(ResponseMode::Diff))
        );
    }

    #[test]
    fn test_refine_asks_for_comments() {
        let action = MenuChoice::Refine
            .into_action(no_mode, || Ok("include the tests".to_string()))
            .unwrap();
        assert_eq!(
            action,
            MenuAction::Refine {
                comments: "include the tests".to_string()
            }
        );
    }

    #[test]
    fn test_prompt_failure_propagates() {
        let result = MenuChoice::Refine.into_action(no_mode, || anyhow::bail!("interrupted"));
        assert!(result.is_err());
    }

    #[test]
    fn test_labels_are_distinct() {
        let mut labels: Vec<&str> = MenuChoice::ALL.iter().map(|c| c.label()).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), MenuChoice::ALL.len());
    }
}
