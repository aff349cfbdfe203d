//! Shell completions generation.
//!
//! Generates shell completion scripts for bash, zsh, fish, PowerShell and
//! elvish.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::TodoError;

/// Name the completion scripts register for.
pub const BIN_NAME: &str = "todo";

/// Generate shell completions for the specified shell.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn generate_completions(shell: Shell) -> Result<String, TodoError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, BIN_NAME, &mut buf);
    String::from_utf8(buf)
        .map_err(|e| TodoError::InvalidInput(format!("completion script is not UTF-8: {e}")))
}

/// Get shell from string name.
#[must_use]
pub fn shell_from_str(s: &str) -> Option<Shell> {
    match s.to_lowercase().as_str() {
        "bash" => Some(Shell::Bash),
        "zsh" => Some(Shell::Zsh),
        "fish" => Some(Shell::Fish),
        "powershell" | "ps" | "pwsh" => Some(Shell::PowerShell),
        "elvish" => Some(Shell::Elvish),
        _ => None,
    }
}

/// Get installation instructions for shell completions.
#[must_use]
pub fn completion_install_instructions(shell: Shell) -> String {
    match shell {
        Shell::Bash => r"# Add to ~/.bashrc or ~/.bash_profile:
source <(todo completions bash)

# Or save to a file:
todo completions bash > ~/.local/share/bash-completion/completions/todo
"
        .to_string(),

        Shell::Zsh => r"# Add to ~/.zshrc (before compinit):
source <(todo completions zsh)

# Or save to your fpath:
todo completions zsh > ~/.zsh/completions/_todo
"
        .to_string(),

        Shell::Fish => r"# Save to fish completions directory:
todo completions fish > ~/.config/fish/completions/todo.fish
"
        .to_string(),

        Shell::PowerShell => r"# Add to your PowerShell profile ($PROFILE):
todo completions powershell | Out-String | Invoke-Expression
"
        .to_string(),

        Shell::Elvish => r"# Save to elvish completions directory:
todo completions elvish > ~/.elvish/lib/todo.elv

# Then add to ~/.elvish/rc.elv:
use todo
"
        .to_string(),

        _ => "Unknown shell".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_from_str() {
        assert_eq!(shell_from_str("bash"), Some(Shell::Bash));
        assert_eq!(shell_from_str("ZSH"), Some(Shell::Zsh));
        assert_eq!(shell_from_str("fish"), Some(Shell::Fish));
        assert_eq!(shell_from_str("pwsh"), Some(Shell::PowerShell));
        assert_eq!(shell_from_str("unknown"), None);
    }

    #[test]
    fn test_generate_bash_completions() {
        let script = generate_completions(Shell::Bash).unwrap();
        assert!(script.contains("todo"));
        assert!(script.contains("complete"));
    }

    #[test]
    fn test_generate_fish_completions_lists_subcommands() {
        let script = generate_completions(Shell::Fish).unwrap();
        assert!(script.contains("add"));
        assert!(script.contains("completions"));
    }

    #[test]
    fn test_completion_instructions_mention_binary() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
            assert!(completion_install_instructions(shell).contains("todo completions"));
        }
    }
}
