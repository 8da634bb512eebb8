//! Entrées d'orchestration des liens dépôt ↔ compte.

use std::path::Path;

use crate::identity::legacy::legacy_linked_account;
use crate::identity::project_config::{has_project_link, is_git_workspace};
use crate::tool::{self, UnlinkResponse};

/// État de lien d'un dépôt: la base de décision du prompt de lien côté hôte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RepositoryLinkState {
    /// Le chemin n'est pas une racine de dépôt git.
    NotAGitRepository,
    /// Un fichier sentinelle `.ghmulti` est déjà présent.
    Linked,
    /// Seul le lien historique en configuration git existe encore; candidat
    /// à la migration.
    LegacyLink(String),
    /// Dépôt git sans aucun lien.
    Unlinked,
}

/// Classe l'état de lien du dépôt donné.
pub fn repository_link_state(workspace_path: &Path) -> RepositoryLinkState {
    if !is_git_workspace(workspace_path) {
        return RepositoryLinkState::NotAGitRepository;
    }
    if has_project_link(workspace_path) {
        return RepositoryLinkState::Linked;
    }
    match legacy_linked_account(workspace_path) {
        Some(name) => RepositoryLinkState::LegacyLink(name),
        None => RepositoryLinkState::Unlinked,
    }
}

/// Lie le compte donné au dépôt.
pub fn link_account(name: &str, workspace_path: &Path) -> Result<(), String> {
    tool::run_tool_checked(&["link", name], Some(workspace_path))
        .map(|_| ())
        .map_err(|error| error.user_message())
}

/// Délie le dépôt; retourne le compte précédemment lié, s'il y en avait un.
pub fn unlink_account(workspace_path: &Path) -> Result<Option<String>, String> {
    let stdout = tool::run_tool_checked(&["unlink", "--json"], Some(workspace_path))
        .map_err(|error| error.user_message())?;
    let parsed = serde_json::from_str::<UnlinkResponse>(stdout.trim()).ok();
    Ok(parsed
        .and_then(|response| response.previously_linked_account)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty()))
}

/// Résultat d'une migration de lien historique.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrateOutcome {
    /// Le chemin n'est pas un dépôt git.
    NotAGitRepository,
    /// Aucun lien historique à migrer.
    NoLegacyLink,
    /// Lien migré vers `.ghmulti` pour le compte donné.
    Migrated(String),
}

/// Migre le lien historique de la configuration git locale vers `.ghmulti`,
/// en passant par l'outil pour que le lien soit posé proprement.
pub fn migrate_legacy_link(workspace_path: &Path) -> Result<MigrateOutcome, String> {
    if !is_git_workspace(workspace_path) {
        return Ok(MigrateOutcome::NotAGitRepository);
    }
    let Some(name) = legacy_linked_account(workspace_path) else {
        return Ok(MigrateOutcome::NoLegacyLink);
    };
    match tool::run_tool_checked(&["link", &name], Some(workspace_path)) {
        Ok(_) => Ok(MigrateOutcome::Migrated(name)),
        Err(error) => Err(format!(
            "Could not migrate legacy link '{}'. Ensure the account exists, then link again. {}",
            name,
            error.user_message()
        )),
    }
}
