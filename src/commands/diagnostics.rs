//! Rapports de statut et de diagnostic destinés au canal de sortie de l'hôte.

use std::path::Path;

use crate::discovery::{self, DiscoveryDebugInfo};
use crate::tool::{self, DoctorResponse, StatusSnapshot};

/// Rapport d'une requête `status` complète.
#[derive(Clone, Debug)]
pub struct StatusReport {
    /// Libellé de l'espace de travail interrogé, absent si global.
    pub workspace: Option<String>,
    /// Instantané structuré si la sortie était du JSON valide.
    pub snapshot: Option<StatusSnapshot>,
    /// Sortie brute (stdout, sinon stderr), pour affichage quand le parsing
    /// a échoué.
    pub raw: String,
}

impl StatusReport {
    /// Rend les lignes du canal de sortie hôte.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec!["=== ghmulti status ===".to_string()];
        match &self.workspace {
            Some(path) => lines.push(format!("Workspace: {path}")),
            None => lines.push("Workspace: global".to_string()),
        }
        match &self.snapshot {
            Some(snapshot) => {
                lines.push(format!(
                    "Linked: {}",
                    snapshot.linked_account.as_deref().unwrap_or("none")
                ));
                lines.push(format!(
                    "Global: {}",
                    snapshot.global_active_name().unwrap_or("none")
                ));
                lines.push(format!(
                    "Effective: {}",
                    snapshot.effective_active_name().unwrap_or("none")
                ));
                if let Some(message) = snapshot
                    .token
                    .as_ref()
                    .and_then(|token| token.message.as_deref())
                {
                    lines.push(format!("Token: {message}"));
                }
                if !snapshot.warnings.is_empty() {
                    lines.push("Warnings:".to_string());
                    for warning in &snapshot.warnings {
                        lines.push(format!("- {warning}"));
                    }
                }
            }
            None => {
                if self.raw.is_empty() {
                    lines.push("No status output was returned.".to_string());
                } else {
                    lines.push(self.raw.clone());
                }
            }
        }
        lines
    }
}

/// Interroge `status --json --skip-token-check`, scoped au dépôt si fourni.
pub fn status_report(workspace_path: Option<&Path>) -> Result<StatusReport, String> {
    let result = tool::run_tool(&["status", "--json", "--skip-token-check"], workspace_path)
        .map_err(|error| error.user_message())?;
    let raw = if result.stdout.trim().is_empty() {
        result.stderr
    } else {
        result.stdout
    };
    let snapshot = serde_json::from_str::<StatusSnapshot>(raw.trim()).ok();
    Ok(StatusReport {
        workspace: workspace_path.map(|path| path.display().to_string()),
        snapshot,
        raw: raw.trim().to_string(),
    })
}

/// Rapport d'un passage `doctor`.
#[derive(Clone, Debug)]
pub struct DoctorReport {
    /// Réponse structurée si la sortie était du JSON valide.
    pub response: Option<DoctorResponse>,
    /// Sortie brute pour affichage quand le parsing a échoué.
    pub raw: String,
    /// Code de retour de l'outil.
    pub exit_code: i32,
}

impl DoctorReport {
    /// Vrai si le diagnostic s'est conclu sans problème détecté.
    pub fn is_ok(&self) -> bool {
        match &self.response {
            Some(response) => response.ok.unwrap_or(false),
            None => self.exit_code == 0,
        }
    }

    /// Rend les lignes du canal de sortie hôte.
    pub fn render_lines(&self) -> Vec<String> {
        let mut lines = vec!["=== ghmulti doctor ===".to_string()];
        match self.response.as_ref().filter(|r| !r.checks.is_empty()) {
            Some(response) => {
                for check in &response.checks {
                    let marker = if check.status.as_deref() == Some("ok") {
                        "OK"
                    } else {
                        "ERROR"
                    };
                    lines.push(format!(
                        "[{}] {}: {}",
                        marker,
                        check.name.as_deref().unwrap_or("unknown"),
                        check.detail.as_deref().unwrap_or("")
                    ));
                }
            }
            None => {
                if self.raw.is_empty() {
                    lines.push("No doctor output was returned.".to_string());
                } else {
                    lines.push(self.raw.clone());
                }
            }
        }
        lines
    }
}

/// Lance `doctor --json` et retourne le rapport, que les contrôles passent
/// ou non; seul un échec d'invocation est une erreur.
pub fn doctor_report() -> Result<DoctorReport, String> {
    let result = tool::run_tool(&["doctor", "--json"], None).map_err(|error| error.user_message())?;
    let raw = if result.stdout.trim().is_empty() {
        result.stderr
    } else {
        result.stdout
    };
    let response = serde_json::from_str::<DoctorResponse>(raw.trim()).ok();
    Ok(DoctorReport {
        response,
        raw: raw.trim().to_string(),
        exit_code: result.exit_code,
    })
}

/// Rejoue une passe de découverte complète, sans toucher au cache, pour
/// exposer les tentatives de résolution dans un rapport hôte.
pub fn diagnose_tool_discovery() -> DiscoveryDebugInfo {
    discovery::debug_tool_discovery()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{AccountRef, DoctorCheck, TokenInfo};

    #[test]
    fn status_lines_cover_all_snapshot_fields() {
        let report = StatusReport {
            workspace: Some("/repo".to_string()),
            snapshot: Some(StatusSnapshot {
                linked_account: Some("work".to_string()),
                global_active_account: Some(AccountRef {
                    name: Some("personal".to_string()),
                    username: None,
                }),
                warnings: vec!["token expires soon".to_string()],
                token: Some(TokenInfo {
                    message: Some("skipped".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            raw: String::new(),
        };
        let lines = report.render_lines();
        assert_eq!(lines[0], "=== ghmulti status ===");
        assert_eq!(lines[1], "Workspace: /repo");
        assert!(lines.contains(&"Linked: work".to_string()));
        assert!(lines.contains(&"Global: personal".to_string()));
        assert!(lines.contains(&"Effective: none".to_string()));
        assert!(lines.contains(&"Token: skipped".to_string()));
        assert!(lines.contains(&"- token expires soon".to_string()));
    }

    #[test]
    fn unparsed_status_falls_back_to_raw_output() {
        let report = StatusReport {
            workspace: None,
            snapshot: None,
            raw: "plain text status".to_string(),
        };
        let lines = report.render_lines();
        assert_eq!(lines[1], "Workspace: global");
        assert_eq!(lines[2], "plain text status");
    }

    #[test]
    fn doctor_markers_follow_check_status() {
        let report = DoctorReport {
            response: Some(DoctorResponse {
                ok: Some(false),
                checks: vec![
                    DoctorCheck {
                        name: Some("git".to_string()),
                        status: Some("ok".to_string()),
                        detail: Some("git version 2.44".to_string()),
                    },
                    DoctorCheck {
                        name: Some("active-account".to_string()),
                        status: Some("error".to_string()),
                        detail: Some("no active account".to_string()),
                    },
                ],
            }),
            raw: String::new(),
            exit_code: 1,
        };
        let lines = report.render_lines();
        assert_eq!(lines[1], "[OK] git: git version 2.44");
        assert_eq!(lines[2], "[ERROR] active-account: no active account");
        assert!(!report.is_ok());
    }

    #[test]
    fn doctor_without_structured_output_uses_the_exit_code() {
        let report = DoctorReport {
            response: None,
            raw: String::new(),
            exit_code: 0,
        };
        assert!(report.is_ok());
        assert_eq!(report.render_lines()[1], "No doctor output was returned.");
    }
}
