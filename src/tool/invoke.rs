//! Invocation synchrone de l'outil ghmulti.
//!
//! Cette couche ne retient rien et n'interprète pas la sortie: le parsing
//! structuré ou texte appartient aux appelants. Chaque invocation bloque
//! jusqu'à la fin du process, sans timeout.

use std::path::Path;
use std::process::Command;

use crate::discovery::{self, CommandCandidate};
use crate::utils::process::{configure_command_no_window, preferred_error_message};

/// Message affiché quand aucune commande ghmulti n'est utilisable.
pub const TOOL_NOT_FOUND_MESSAGE: &str = "ghmulti CLI was not found. Install it \
    (`pip install --editable .`) or ensure `ghmulti`/`python` is on PATH, then \
    restart the editor.";

/// Sortie capturée d'une invocation, quel que soit le code de retour.
#[derive(Clone, Debug)]
pub struct RunResult {
    /// Sortie standard décodée.
    pub stdout: String,
    /// Sortie d'erreur décodée.
    pub stderr: String,
    /// Code de retour du process (-1 si terminé par signal).
    pub exit_code: i32,
}

/// Échec d'invocation de l'outil ghmulti.
#[derive(Clone, Debug)]
pub enum InvokeError {
    /// Aucune commande utilisable après découverte; terminal jusqu'à
    /// invalidation du cache, à traiter comme un problème d'installation.
    ToolNotFound,
    /// Le process n'a pas pu être lancé.
    Launch(String),
    /// Le process a terminé avec un code non nul alors qu'un succès était requis.
    Failed {
        /// Code de retour observé.
        exit_code: i32,
        /// Sortie standard partielle.
        stdout: String,
        /// Sortie d'erreur partielle.
        stderr: String,
    },
}

impl InvokeError {
    /// Construit le message destiné à l'hôte: stderr, sinon stdout, sinon le
    /// texte brut de l'erreur.
    pub fn user_message(&self) -> String {
        match self {
            Self::ToolNotFound => TOOL_NOT_FOUND_MESSAGE.to_string(),
            Self::Launch(detail) => detail.clone(),
            Self::Failed {
                exit_code,
                stdout,
                stderr,
            } => preferred_error_message(
                stderr,
                stdout,
                &format!("ghmulti exited with status {exit_code}"),
            ),
        }
    }
}

fn build_command(candidate: &CommandCandidate, args: &[&str], cwd: Option<&Path>) -> Command {
    let mut cmd = Command::new(&candidate.executable);
    cmd.args(&candidate.base_args).args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    configure_command_no_window(&mut cmd);
    cmd
}

/// Invoque l'outil et capture la sortie, que le code de retour soit nul ou non.
pub fn run_tool(args: &[&str], cwd: Option<&Path>) -> Result<RunResult, InvokeError> {
    let candidate = discovery::locate_tool_command().ok_or(InvokeError::ToolNotFound)?;
    log::debug!("Running {} {}", candidate.display(), args.join(" "));

    let output = build_command(&candidate, args, cwd).output().map_err(|error| {
        InvokeError::Launch(format!(
            "Unable to execute {}: {}",
            candidate.display(),
            error
        ))
    })?;

    Ok(RunResult {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_code: output.status.code().unwrap_or(-1),
    })
}

/// Invoque l'outil en exigeant un code de retour nul; retourne stdout.
pub fn run_tool_checked(args: &[&str], cwd: Option<&Path>) -> Result<String, InvokeError> {
    let result = run_tool(args, cwd)?;
    if result.exit_code == 0 {
        Ok(result.stdout)
    } else {
        Err(InvokeError::Failed {
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_message_prefers_stderr_then_stdout_then_exit_code() {
        let both = InvokeError::Failed {
            exit_code: 2,
            stdout: "partial".to_string(),
            stderr: "fatal: no account".to_string(),
        };
        assert_eq!(both.user_message(), "fatal: no account");

        let stdout_only = InvokeError::Failed {
            exit_code: 2,
            stdout: "partial\n".to_string(),
            stderr: String::new(),
        };
        assert_eq!(stdout_only.user_message(), "partial");

        let silent = InvokeError::Failed {
            exit_code: 2,
            stdout: String::new(),
            stderr: "  ".to_string(),
        };
        assert_eq!(silent.user_message(), "ghmulti exited with status 2");
    }

    #[test]
    fn tool_not_found_carries_the_installation_hint() {
        assert!(InvokeError::ToolNotFound
            .user_message()
            .contains("ghmulti CLI was not found"));
    }
}
