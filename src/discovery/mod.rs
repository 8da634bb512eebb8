/// Diagnostics structurés de découverte.
pub mod diagnostics;
/// Découpage quote-aware des lignes de commande configurées.
pub mod tokenizer;

mod locator;

pub use diagnostics::{DiscoveryDebugInfo, ProbeAttempt};
pub use locator::{CommandCandidate, CommandLocator};

lazy_static::lazy_static! {
    /// Localisateur partagé du process hôte; un seul écrivain logique à la fois.
    static ref SHARED_LOCATOR: CommandLocator = CommandLocator::new();
}

/// Retourne la commande ghmulti utilisable pour ce process, depuis le cache
/// quand la découverte a déjà tourné.
pub fn locate_tool_command() -> Option<CommandCandidate> {
    SHARED_LOCATOR.locate()
}

/// Invalide le cache partagé sans toucher à la configuration.
pub fn invalidate_tool_command() {
    SHARED_LOCATOR.invalidate()
}

/// Pousse la valeur de l'option hôte de chemin de commande et invalide le
/// cache. À brancher sur la notification de changement de configuration.
pub fn set_configured_command(raw: Option<&str>) {
    SHARED_LOCATOR.set_configured_command(raw)
}

/// Rejoue une passe de découverte complète sans modifier le cache partagé.
pub fn debug_tool_discovery() -> DiscoveryDebugInfo {
    SHARED_LOCATOR.locate_debug()
}
