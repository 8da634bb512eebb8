/// Décrit le sondage d'une commande candidate lors d'une passe de découverte.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ProbeAttempt {
    /// Ligne de commande candidate testée.
    pub candidate: String,
    /// Origine de la candidate (`configured` ou `auto`).
    pub source: String,
    /// Résultat du sondage.
    pub outcome: String,
    /// Détail éventuel en cas d'échec.
    pub detail: Option<String>,
}

/// Vue de debug complète d'une passe de découverte, exposée pour diagnostic.
#[derive(Clone, Debug, serde::Serialize)]
pub struct DiscoveryDebugInfo {
    /// Ligne de commande retenue si une candidate a passé les sondages.
    pub resolved_command: Option<String>,
    /// Historique ordonné des tentatives.
    pub attempts: Vec<ProbeAttempt>,
}
