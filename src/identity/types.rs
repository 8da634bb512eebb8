use std::path::PathBuf;

/// Compte considéré actif pour un espace de travail à un instant donné.
/// Jamais mis en cache: recalculé à chaque rafraîchissement de l'hôte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountIdentity {
    /// Alias du compte, toujours sous forme trimée non vide.
    pub name: String,
    /// Vrai si le compte est lié au dépôt plutôt qu'actif globalement.
    pub is_linked: bool,
    /// Vrai si le lien provient de l'ancienne clé git locale.
    pub is_legacy_linked: bool,
}

impl AccountIdentity {
    /// Identité liée au dépôt, si le nom est non vide après trim.
    pub(crate) fn linked(name: &str) -> Option<Self> {
        non_empty(name).map(|name| Self {
            name,
            is_linked: true,
            is_legacy_linked: false,
        })
    }

    /// Identité liée via l'ancienne clé git locale.
    pub(crate) fn legacy_linked(name: &str) -> Option<Self> {
        non_empty(name).map(|name| Self {
            name,
            is_linked: true,
            is_legacy_linked: true,
        })
    }

    /// Identité active sans lien dépôt (effective ou globale).
    pub(crate) fn active(name: &str) -> Option<Self> {
        non_empty(name).map(|name| Self {
            name,
            is_linked: false,
            is_legacy_linked: false,
        })
    }
}

/// Forme trimée non vide d'un nom rapporté par une source, sinon absence.
pub(crate) fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Portée d'une requête d'identité. Sans chemin, la résolution est globale et
/// aucune source par dépôt n'est consultée.
#[derive(Clone, Debug, Default)]
pub struct WorkspaceContext {
    /// Racine de l'espace de travail, si la requête est scoped dépôt.
    pub path: Option<PathBuf>,
}

impl WorkspaceContext {
    /// Contexte global, sans dépôt.
    pub fn global() -> Self {
        Self { path: None }
    }

    /// Contexte scoped sur la racine d'un dépôt.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}
