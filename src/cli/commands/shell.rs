//! Shell integration commands.

use crate::error::TodoError;
use crate::features::shell::{completion_install_instructions, generate_completions, shell_from_str};

/// Execute the completions command.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown shell name.
pub fn completions(shell: &str, install: bool) -> Result<String, TodoError> {
    let shell_type = shell_from_str(shell).ok_or_else(|| {
        TodoError::InvalidInput(format!(
            "Unknown shell: {shell}. Supported: bash, zsh, fish, powershell, elvish"
        ))
    })?;

    if install {
        Ok(completion_install_instructions(shell_type))
    } else {
        generate_completions(shell_type)
    }
}
