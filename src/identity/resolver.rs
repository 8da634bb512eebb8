//! Résolution du compte actif par précédence fixe.
//!
//! Le JSON de `status` fait autorité: il est plus riche et distingue le lien
//! historique. Le fallback texte n'existe que pour les versions de l'outil
//! antérieures à la sortie structurée et perd cette distinction; c'est une
//! dégradation assumée. Aucune erreur ne sort de ce module: tout échec
//! interne dégrade en absence.

use lazy_static::lazy_static;
use regex::Regex;

use crate::tool::{self, StatusSnapshot};

use super::project_config::linked_account_from_project_config;
use super::types::{AccountIdentity, WorkspaceContext};

lazy_static! {
    /// Ancre texte du lien dépôt.
    static ref LINKED_PATTERN: Regex =
        Regex::new(r"Repository linked to:\s*'([^']+)'").unwrap();
    /// Ancre texte du compte actif effectif.
    static ref EFFECTIVE_PATTERN: Regex =
        Regex::new(r"Effective active account(?: for this repository)?:\s*'([^']+)'").unwrap();
    /// Ancre texte du compte actif global.
    static ref GLOBAL_PATTERN: Regex =
        Regex::new(r"Global active account:\s*'([^']+)'").unwrap();
}

/// Résout le compte actif pour le contexte donné. Exactement une source gagne
/// par requête, ou aucune; la fonction ne lève jamais.
pub fn resolve_active_account(workspace: &WorkspaceContext) -> Option<AccountIdentity> {
    let cwd = workspace.path.as_deref();

    let snapshot = tool::run_tool_checked(&["status", "--json", "--skip-token-check"], cwd)
        .ok()
        .and_then(|stdout| serde_json::from_str::<StatusSnapshot>(stdout.trim()).ok());

    match snapshot {
        Some(snapshot) => resolve_from_snapshot(&snapshot, workspace),
        None => {
            // Compatibilité avec les versions de l'outil sans sortie JSON.
            let stdout = tool::run_tool_checked(&["status"], cwd).ok()?;
            resolve_from_text(&stdout)
        }
    }
}

/// Applique la précédence fixe sur un instantané structuré, premier niveau
/// gagnant: lié > lien historique git > effectif > global > sentinelle projet.
/// Un nom blanc vaut absence et laisse la main au niveau suivant.
fn resolve_from_snapshot(
    snapshot: &StatusSnapshot,
    workspace: &WorkspaceContext,
) -> Option<AccountIdentity> {
    snapshot
        .linked_account
        .as_deref()
        .and_then(AccountIdentity::linked)
        .or_else(|| {
            snapshot
                .linked_account_from_git_config
                .as_deref()
                .and_then(AccountIdentity::legacy_linked)
        })
        .or_else(|| {
            snapshot
                .effective_active_name()
                .and_then(AccountIdentity::active)
        })
        .or_else(|| {
            snapshot
                .global_active_name()
                .and_then(AccountIdentity::active)
        })
        .or_else(|| {
            workspace
                .path
                .as_deref()
                .and_then(linked_account_from_project_config)
                .and_then(|name| AccountIdentity::linked(&name))
        })
}

/// Applique les trois ancres texte avec la même précédence que le JSON.
fn resolve_from_text(output: &str) -> Option<AccountIdentity> {
    capture(&LINKED_PATTERN, output)
        .and_then(|name| AccountIdentity::linked(&name))
        .or_else(|| capture(&EFFECTIVE_PATTERN, output).and_then(|name| AccountIdentity::active(&name)))
        .or_else(|| capture(&GLOBAL_PATTERN, output).and_then(|name| AccountIdentity::active(&name)))
}

/// Premier groupe capturé d'une ancre, si elle matche.
fn capture(pattern: &Regex, output: &str) -> Option<String> {
    pattern
        .captures(output)
        .and_then(|captures| captures.get(1))
        .map(|group| group.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::AccountRef;

    fn account(name: &str) -> Option<AccountRef> {
        Some(AccountRef {
            name: Some(name.to_string()),
            username: None,
        })
    }

    #[test]
    fn linked_account_wins_over_everything_else() {
        let snapshot = StatusSnapshot {
            linked_account: Some("work".to_string()),
            linked_account_from_git_config: Some("legacy".to_string()),
            effective_active_account: account("effective"),
            global_active_account: account("global"),
            ..Default::default()
        };
        let identity =
            resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).unwrap();
        assert_eq!(identity.name, "work");
        assert!(identity.is_linked);
        assert!(!identity.is_legacy_linked);
    }

    #[test]
    fn legacy_git_config_link_is_second_tier() {
        let snapshot = StatusSnapshot {
            linked_account_from_git_config: Some("legacy".to_string()),
            effective_active_account: account("effective"),
            ..Default::default()
        };
        let identity =
            resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).unwrap();
        assert_eq!(identity.name, "legacy");
        assert!(identity.is_linked);
        assert!(identity.is_legacy_linked);
    }

    #[test]
    fn effective_account_wins_over_global() {
        let snapshot = StatusSnapshot {
            effective_active_account: account("effective"),
            global_active_account: account("global"),
            ..Default::default()
        };
        let identity =
            resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).unwrap();
        assert_eq!(identity.name, "effective");
        assert!(!identity.is_linked);
    }

    #[test]
    fn blank_linked_name_falls_through_to_the_next_tier() {
        let snapshot = StatusSnapshot {
            linked_account: Some("   ".to_string()),
            global_active_account: account("global"),
            ..Default::default()
        };
        let identity =
            resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).unwrap();
        assert_eq!(identity.name, "global");
    }

    #[test]
    fn project_sentinel_file_is_the_last_tier() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".ghmulti"), r#"{"account": "filed"}"#).unwrap();

        let snapshot = StatusSnapshot::default();
        let scoped = WorkspaceContext::for_path(dir.path());
        let identity = resolve_from_snapshot(&snapshot, &scoped).unwrap();
        assert_eq!(identity.name, "filed");
        assert!(identity.is_linked);

        // Sans contexte dépôt, la sentinelle n'est jamais consultée.
        assert!(resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).is_none());
    }

    #[test]
    fn empty_snapshot_without_workspace_is_absent() {
        let snapshot = StatusSnapshot::default();
        assert!(resolve_from_snapshot(&snapshot, &WorkspaceContext::global()).is_none());
    }

    #[test]
    fn text_fallback_matches_the_linked_anchor_first() {
        let output = "🔎 Checking ghmulti status...\n\
                      Repository linked to: 'work' (via .ghmulti)\n\
                      Global active account: 'personal'\n";
        let identity = resolve_from_text(output).unwrap();
        assert_eq!(identity.name, "work");
        assert!(identity.is_linked);
        assert!(!identity.is_legacy_linked);
    }

    #[test]
    fn text_fallback_reads_effective_then_global() {
        let effective = "Effective active account for this repository: 'team'\n";
        let identity = resolve_from_text(effective).unwrap();
        assert_eq!(identity.name, "team");
        assert!(!identity.is_linked);

        let global = "Global active account: 'personal'\n";
        let identity = resolve_from_text(global).unwrap();
        assert_eq!(identity.name, "personal");
    }

    #[test]
    fn text_without_any_anchor_is_absent() {
        assert!(resolve_from_text("No active account configured.").is_none());
        assert!(resolve_from_text("").is_none());
    }

    #[cfg(unix)]
    mod end_to_end {
        use super::super::*;
        use crate::discovery::set_configured_command;
        use std::fs;
        use std::path::Path;

        /// Installe un faux outil : `list` répond la liste attendue,
        /// `status --json` échoue toujours, et `status` en mode texte
        /// exécute le fragment shell fourni.
        fn install_tool(dir: &Path, name: &str, text_status: &str) -> String {
            use std::os::unix::fs::PermissionsExt;
            let body = format!(
                "#!/bin/sh\n\
                 if [ \"$1\" = \"list\" ]; then echo '{{\"accounts\":[{{\"name\":\"work\"}}]}}'; exit 0; fi\n\
                 if [ \"$1\" = \"status\" ]; then\n\
                   if [ \"$2\" = \"--json\" ]; then exit 2; fi\n\
                   {text_status}\n\
                 fi\n\
                 exit 0\n"
            );
            let path = dir.join(name);
            fs::write(&path, body).unwrap();
            fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().to_string()
        }

        // Les deux scénarios partagent le localisateur global : ils vivent
        // dans un seul test pour rester séquentiels.
        #[test]
        fn resolve_falls_back_to_the_text_status_when_the_json_query_fails() {
            let dir = tempfile::tempdir().unwrap();

            let with_text = install_tool(
                dir.path(),
                "old-tool",
                "echo \"Repository linked to: 'work' (via .ghmulti)\"; exit 0",
            );
            set_configured_command(Some(&with_text));
            let identity = resolve_active_account(&WorkspaceContext::global()).unwrap();
            assert_eq!(identity.name, "work");
            assert!(identity.is_linked);
            assert!(!identity.is_legacy_linked);

            // Quand la requête texte échoue aussi, la résolution conclut à
            // l'absence de compte actif.
            let without_text = install_tool(dir.path(), "mute-tool", "exit 2");
            set_configured_command(Some(&without_text));
            assert!(resolve_active_account(&WorkspaceContext::global()).is_none());

            set_configured_command(None);
        }
    }
}
