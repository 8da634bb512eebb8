use std::path::Path;
use std::process::Command;

use crate::utils::process::configure_command_no_window;

/// Clé git locale historique portant le compte lié, remplacée par `.ghmulti`.
pub const LEGACY_GIT_CONFIG_KEY: &str = "ghmulti.linkedaccount";

/// Lit le lien historique dans la configuration git locale du dépôt. Toute
/// défaillance (git absent, clé non définie, dépôt invalide) dégrade en absence.
pub fn legacy_linked_account(workspace_path: &Path) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args(["config", "--local", "--get", LEGACY_GIT_CONFIG_KEY])
        .current_dir(workspace_path);
    configure_command_no_window(&mut cmd);

    let output = cmd.output().ok()?;
    if !output.status.success() {
        return None;
    }
    let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
