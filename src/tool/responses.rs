//! Types sérialisés des réponses JSON de l'outil ghmulti.
//!
//! Tous les champs sont optionnels ou munis de défauts: un outil plus ancien
//! peut en omettre, et l'absence ne doit jamais faire échouer le parsing.

use serde::Deserialize;

/// Référence de compte telle qu'exposée par l'outil.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct AccountRef {
    /// Alias du compte.
    pub name: Option<String>,
    /// Nom d'utilisateur GitHub associé.
    pub username: Option<String>,
}

/// État du token du compte actif, présent quand le contrôle n'a pas été sauté.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TokenInfo {
    /// Vrai si un token est enregistré.
    pub present: Option<bool>,
    /// Vrai si le token a été validé auprès de GitHub.
    pub valid: Option<bool>,
    /// Message lisible sur l'état du token.
    pub message: Option<String>,
}

/// Instantané brut d'une requête `status --json`, consommé tel quel par la
/// résolution de précédence et le rapport de statut.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusSnapshot {
    /// Compte lié au dépôt via le fichier sentinelle `.ghmulti`.
    pub linked_account: Option<String>,
    /// Compte lié via l'ancienne clé git locale `ghmulti.linkedaccount`.
    pub linked_account_from_git_config: Option<String>,
    /// Compte actif global.
    pub global_active_account: Option<AccountRef>,
    /// Compte actif effectif pour le dépôt interrogé.
    pub effective_active_account: Option<AccountRef>,
    /// Avertissements remontés par l'outil.
    #[serde(default)]
    pub warnings: Vec<String>,
    /// État du token, si contrôlé.
    pub token: Option<TokenInfo>,
}

impl StatusSnapshot {
    /// Nom du compte effectif, s'il est renseigné.
    pub fn effective_active_name(&self) -> Option<&str> {
        self.effective_active_account
            .as_ref()
            .and_then(|account| account.name.as_deref())
    }

    /// Nom du compte global, s'il est renseigné.
    pub fn global_active_name(&self) -> Option<&str> {
        self.global_active_account
            .as_ref()
            .and_then(|account| account.name.as_deref())
    }
}

/// Réponse de `list --json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ListResponse {
    /// Comptes connus de l'outil.
    #[serde(default)]
    pub accounts: Vec<AccountRef>,
}

/// Contrôle individuel d'un passage `doctor --json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DoctorCheck {
    /// Nom du contrôle.
    pub name: Option<String>,
    /// Statut (`ok` ou autre).
    pub status: Option<String>,
    /// Détail lisible.
    pub detail: Option<String>,
}

/// Réponse de `doctor --json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DoctorResponse {
    /// Vrai si aucun contrôle n'a échoué.
    pub ok: Option<bool>,
    /// Contrôles individuels, dans l'ordre d'exécution.
    #[serde(default)]
    pub checks: Vec<DoctorCheck>,
}

/// Réponse de `unlink --json`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UnlinkResponse {
    /// Compte qui était lié avant l'opération, s'il y en avait un.
    pub previously_linked_account: Option<String>,
    /// Vrai si le lien a été retiré.
    pub unlinked: Option<bool>,
    /// Vrai si l'identité git locale a aussi été réinitialisée.
    pub reset_local_git: Option<bool>,
}
