use std::process::Command;
use std::sync::Mutex;

use crate::tool::ListResponse;
use crate::utils::process::configure_command_no_window;

use super::diagnostics::{DiscoveryDebugInfo, ProbeAttempt};
use super::tokenizer::split_command_line;

/// Une façon hypothétique d'invoquer l'outil ghmulti: un exécutable direct, ou
/// un interpréteur suivi de ses arguments de module.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandCandidate {
    /// Exécutable à lancer.
    pub executable: String,
    /// Arguments de base placés avant les arguments d'opération.
    pub base_args: Vec<String>,
}

impl CommandCandidate {
    /// Construit une candidate depuis un exécutable et ses arguments de base.
    pub fn new(executable: impl Into<String>, base_args: &[&str]) -> Self {
        Self {
            executable: executable.into(),
            base_args: base_args.iter().map(|arg| arg.to_string()).collect(),
        }
    }

    /// Rend la candidate sous forme de ligne de commande lisible.
    pub fn display(&self) -> String {
        if self.base_args.is_empty() {
            self.executable.clone()
        } else {
            format!("{} {}", self.executable, self.base_args.join(" "))
        }
    }
}

/// Cache de découverte à trois états. `NotFound` est un résultat négatif mis
/// en cache, distinct de `Unresolved`: tant qu'aucune invalidation explicite
/// n'arrive, aucun nouveau sondage n'est lancé.
#[derive(Clone, Debug, Default)]
enum ResolvedCommand {
    /// La découverte n'a pas tourné depuis la dernière invalidation.
    #[default]
    Unresolved,
    /// Une candidate a passé les deux sondages de validation.
    Found(CommandCandidate),
    /// Aucune candidate utilisable après épuisement de la liste.
    NotFound,
}

struct LocatorState {
    resolved: ResolvedCommand,
    configured: Option<String>,
}

/// Localise et met en cache la commande concrète qui invoque l'outil ghmulti.
///
/// L'état partagé n'a qu'un seul écrivain logique à la fois (les rappels de
/// l'hôte sont sérialisés); le mutex couvre le cas d'un hôte qui ne le serait
/// pas.
pub struct CommandLocator {
    state: Mutex<LocatorState>,
    fallbacks: Vec<CommandCandidate>,
}

/// Formes d'installation courantes sondées après la configuration utilisateur:
/// la commande directe, puis les alias usuels de l'interpréteur en mode module.
fn default_fallbacks() -> Vec<CommandCandidate> {
    vec![
        CommandCandidate::new("ghmulti", &[]),
        CommandCandidate::new("python", &["-m", "ghmulti"]),
        CommandCandidate::new("python3", &["-m", "ghmulti"]),
        CommandCandidate::new("py", &["-m", "ghmulti"]),
    ]
}

impl Default for CommandLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandLocator {
    /// Construit un localisateur avec la chaîne de candidates standard.
    pub fn new() -> Self {
        Self::with_fallbacks(default_fallbacks())
    }

    fn with_fallbacks(fallbacks: Vec<CommandCandidate>) -> Self {
        Self {
            state: Mutex::new(LocatorState {
                resolved: ResolvedCommand::Unresolved,
                configured: None,
            }),
            fallbacks,
        }
    }

    /// Enregistre la commande configurée côté hôte et invalide le cache.
    /// À appeler quand l'option de chemin de commande change.
    pub fn set_configured_command(&self, raw: Option<&str>) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        state.configured = raw
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        state.resolved = ResolvedCommand::Unresolved;
    }

    /// Réinitialise le cache à l'état non résolu sans toucher à la configuration.
    pub fn invalidate(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.resolved = ResolvedCommand::Unresolved;
        }
    }

    /// Retourne la commande utilisable, depuis le cache si la découverte a
    /// déjà tourné. Un résultat négatif est lui aussi mis en cache.
    pub fn locate(&self) -> Option<CommandCandidate> {
        let Ok(mut state) = self.state.lock() else {
            return None;
        };
        match &state.resolved {
            ResolvedCommand::Found(candidate) => return Some(candidate.clone()),
            ResolvedCommand::NotFound => return None,
            ResolvedCommand::Unresolved => {}
        }

        let (found, _) = self.probe_all(state.configured.as_deref());
        state.resolved = match &found {
            Some(candidate) => ResolvedCommand::Found(candidate.clone()),
            None => ResolvedCommand::NotFound,
        };
        found
    }

    /// Rejoue une passe de découverte complète sans modifier le cache, pour
    /// alimenter les rapports de diagnostic.
    pub fn locate_debug(&self) -> DiscoveryDebugInfo {
        let configured = self
            .state
            .lock()
            .ok()
            .and_then(|state| state.configured.clone());
        let (found, attempts) = self.probe_all(configured.as_deref());
        DiscoveryDebugInfo {
            resolved_command: found.map(|candidate| candidate.display()),
            attempts,
        }
    }

    /// Sonde la configuration utilisateur puis la chaîne de fallback, dans
    /// l'ordre; la première candidate validée gagne.
    fn probe_all(
        &self,
        configured: Option<&str>,
    ) -> (Option<CommandCandidate>, Vec<ProbeAttempt>) {
        let mut attempts = Vec::new();

        if let Some(raw) = configured {
            for candidate in configured_command_candidates(raw) {
                if probe_candidate(&candidate, "configured", &mut attempts) {
                    return (Some(candidate), attempts);
                }
            }
            // Configuration inutilisable: avertir puis continuer en auto-détection.
            log::warn!(
                "Configured ghmulti command is not usable: {raw}. Use an executable path \
                 (for example /usr/local/bin/ghmulti) or a command with args (for example \
                 py -m ghmulti). Falling back to auto-detection."
            );
        }

        for candidate in &self.fallbacks {
            if probe_candidate(candidate, "auto", &mut attempts) {
                return (Some(candidate.clone()), attempts);
            }
        }

        (None, attempts)
    }
}

/// Candidates dérivées d'une commande configurée: la chaîne entière comme
/// exécutable sans arguments, puis sa forme tokenisée si elle en diffère.
fn configured_command_candidates(raw: &str) -> Vec<CommandCandidate> {
    let mut candidates = vec![CommandCandidate {
        executable: raw.to_string(),
        base_args: Vec::new(),
    }];

    let tokens = split_command_line(raw);
    if let Some((executable, base_args)) = tokens.split_first() {
        let parsed = CommandCandidate {
            executable: executable.clone(),
            base_args: base_args.to_vec(),
        };
        if parsed != candidates[0] {
            candidates.push(parsed);
        }
    }
    candidates
}

/// Sonde une candidate et enregistre la tentative; vrai si elle est utilisable.
fn probe_candidate(
    candidate: &CommandCandidate,
    source: &str,
    attempts: &mut Vec<ProbeAttempt>,
) -> bool {
    match validate_candidate(candidate) {
        Ok(()) => {
            attempts.push(ProbeAttempt {
                candidate: candidate.display(),
                source: source.to_string(),
                outcome: "ok".to_string(),
                detail: None,
            });
            true
        }
        Err((outcome, detail)) => {
            log::debug!("Probe failed for {}: {}", candidate.display(), outcome);
            attempts.push(ProbeAttempt {
                candidate: candidate.display(),
                source: source.to_string(),
                outcome: outcome.to_string(),
                detail,
            });
            false
        }
    }
}

/// Double sondage de validation d'une candidate. `--help` doit se lancer
/// (code de retour indifférent), puis `list --json` doit produire la réponse
/// structurée attendue. Exiger les deux écarte un programme homonyme qui ne
/// respecte pas le contrat d'arguments de l'outil.
fn validate_candidate(candidate: &CommandCandidate) -> Result<(), (&'static str, Option<String>)> {
    let mut help = Command::new(&candidate.executable);
    help.args(&candidate.base_args).arg("--help");
    configure_command_no_window(&mut help);
    if let Err(error) = help.output() {
        return Err(("help_probe_failed", Some(error.to_string())));
    }

    let mut list = Command::new(&candidate.executable);
    list.args(&candidate.base_args).args(["list", "--json"]);
    configure_command_no_window(&mut list);
    match list.output() {
        Ok(output) => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            if serde_json::from_str::<ListResponse>(stdout.trim()).is_ok() {
                Ok(())
            } else {
                Err((
                    "list_probe_failed",
                    Some("output is not the expected JSON list".to_string()),
                ))
            }
        }
        Err(error) => Err(("list_probe_failed", Some(error.to_string()))),
    }
}
