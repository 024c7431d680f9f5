//! # Shell Completion Module
//!
//! Generates completion scripts for the supported shells through clap's
//! completion system.
//!
//! ```bash
//! muse-graph completion bash > ~/.local/share/bash-completion/completions/muse-graph
//! muse-graph completion zsh > ~/.config/zsh/completions/_muse-graph
//! ```

use crate::cli::Shell;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use std::io::Write;

/// Write shell completions for `cmd` to `out`
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(gen, cmd, name, out);
}

/// Convert our Shell enum to clap_complete's Shell enum
#[must_use]
pub fn shell_to_completion_shell(shell: &Shell) -> CompletionShell {
    match shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;
    use clap::CommandFactory;

    #[test]
    fn test_bash_completion_mentions_subcommands() {
        let mut out = Vec::new();
        generate_completions(shell_to_completion_shell(&Shell::Bash), &mut Args::command(), &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("muse-graph"));
        assert!(script.contains("recommend"));
        assert!(script.contains("groups"));
    }

    #[test]
    fn test_every_shell_generates_output() {
        for shell in [Shell::Bash, Shell::Zsh, Shell::Fish, Shell::PowerShell, Shell::Elvish] {
            let mut out = Vec::new();
            generate_completions(shell_to_completion_shell(&shell), &mut Args::command(), &mut out);
            assert!(!out.is_empty(), "{shell:?} produced no completions");
        }
    }
}
