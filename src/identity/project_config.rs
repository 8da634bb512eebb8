use std::fs;
use std::path::Path;

/// Nom du fichier sentinelle de lien par dépôt.
pub const PROJECT_CONFIG_FILE: &str = ".ghmulti";

/// Contenu attendu du fichier sentinelle.
#[derive(Debug, serde::Deserialize)]
struct ProjectConfig {
    account: Option<String>,
}

/// Lit le compte lié depuis le fichier sentinelle du dépôt. Fichier absent,
/// JSON invalide ou nom blanc dégradent tous en absence.
pub fn linked_account_from_project_config(workspace_path: &Path) -> Option<String> {
    let raw = fs::read_to_string(workspace_path.join(PROJECT_CONFIG_FILE)).ok()?;
    let parsed: ProjectConfig = serde_json::from_str(&raw).ok()?;
    let account = parsed.account?;
    let trimmed = account.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Vrai si le chemin ressemble à la racine d'un dépôt git.
pub fn is_git_workspace(workspace_path: &Path) -> bool {
    workspace_path.join(".git").exists()
}

/// Vrai si le dépôt porte déjà un fichier sentinelle `.ghmulti`.
pub fn has_project_link(workspace_path: &Path) -> bool {
    workspace_path.join(PROJECT_CONFIG_FILE).exists()
}
