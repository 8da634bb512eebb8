//! Entrées d'orchestration de gestion des comptes.
//!
//! Couche fine au-dessus de l'invocation: construction des vecteurs
//! d'arguments et conversion des échecs en message prêt pour l'hôte.

use lazy_static::lazy_static;
use regex::Regex;

use crate::tool::{self, ListResponse};

lazy_static! {
    /// Ligne de la sortie `list` texte: nom suivi du username entre parenthèses,
    /// précédé ou non du marqueur de compte actif.
    static ref LIST_LINE_PATTERN: Regex =
        Regex::new(r"^(?:👉\s+)?(.+?)\s+\([^)]+\)\s*$").unwrap();
}

/// Méthode d'authentification retenue pour un nouveau compte.
#[derive(Clone, Debug)]
pub enum AuthMethod {
    /// Personal Access Token GitHub.
    Token(String),
    /// Chemin d'une clé SSH dédiée au compte.
    SshKeyPath(String),
}

/// Paramètres d'ajout d'un compte, déjà collectés et validés côté hôte.
#[derive(Clone, Debug)]
pub struct AddAccountRequest {
    /// Alias du compte (par exemple work, personal).
    pub name: String,
    /// Nom d'utilisateur GitHub.
    pub username: String,
    /// Méthode d'authentification.
    pub auth: AuthMethod,
    /// ID de clé GPG de signature, optionnel.
    pub gpg_key_id: Option<String>,
    /// Activer le compte immédiatement après l'ajout.
    pub set_active: bool,
}

impl AddAccountRequest {
    /// Construit le vecteur d'arguments `add` correspondant.
    fn to_args(&self) -> Vec<String> {
        let mut args = vec![
            "add".to_string(),
            "--name".to_string(),
            self.name.clone(),
            "--username".to_string(),
            self.username.clone(),
        ];
        match &self.auth {
            AuthMethod::Token(token) => {
                args.push("--token".to_string());
                args.push(token.clone());
            }
            AuthMethod::SshKeyPath(path) => {
                args.push("--ssh-key-path".to_string());
                args.push(path.clone());
            }
        }
        if let Some(gpg_key_id) = self.gpg_key_id.as_deref().map(str::trim) {
            if !gpg_key_id.is_empty() {
                args.push("--gpg-key-id".to_string());
                args.push(gpg_key_id.to_string());
            }
        }
        if self.set_active {
            args.push("--set-active".to_string());
        }
        args
    }
}

/// Enregistre un nouveau compte auprès de l'outil.
pub fn add_account(request: &AddAccountRequest) -> Result<(), String> {
    let args = request.to_args();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    tool::run_tool_checked(&args, None)
        .map(|_| ())
        .map_err(|error| error.user_message())
}

/// Bascule le compte actif global.
pub fn switch_account(name: &str) -> Result<(), String> {
    tool::run_tool_checked(&["use", name, "--json"], None)
        .map(|_| ())
        .map_err(|error| error.user_message())
}

/// Liste les comptes connus, en JSON quand l'outil le supporte, sinon via la
/// sortie texte.
pub fn list_accounts() -> Result<Vec<String>, String> {
    if let Ok(stdout) = tool::run_tool_checked(&["list", "--json"], None) {
        if let Ok(parsed) = serde_json::from_str::<ListResponse>(stdout.trim()) {
            let names: Vec<String> = parsed
                .accounts
                .iter()
                .filter_map(|account| account.name.as_deref())
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
            if !names.is_empty() {
                return Ok(names);
            }
        }
    }

    let stdout = tool::run_tool_checked(&["list"], None).map_err(|error| error.user_message())?;
    Ok(parse_list_text(&stdout))
}

/// Extrait les noms de comptes de la sortie texte de `list`.
fn parse_list_text(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| LIST_LINE_PATTERN.captures(line.trim()))
        .filter_map(|captures| captures.get(1))
        .map(|group| group.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_args_with_token_and_activation() {
        let request = AddAccountRequest {
            name: "work".to_string(),
            username: "me-work".to_string(),
            auth: AuthMethod::Token("ghp_xxx".to_string()),
            gpg_key_id: Some(" ABCD1234 ".to_string()),
            set_active: true,
        };
        assert_eq!(
            request.to_args(),
            [
                "add",
                "--name",
                "work",
                "--username",
                "me-work",
                "--token",
                "ghp_xxx",
                "--gpg-key-id",
                "ABCD1234",
                "--set-active"
            ]
        );
    }

    #[test]
    fn add_args_with_ssh_key_and_no_extras() {
        let request = AddAccountRequest {
            name: "perso".to_string(),
            username: "me".to_string(),
            auth: AuthMethod::SshKeyPath("~/.ssh/id_ed25519_perso".to_string()),
            gpg_key_id: Some("   ".to_string()),
            set_active: false,
        };
        assert_eq!(
            request.to_args(),
            [
                "add",
                "--name",
                "perso",
                "--username",
                "me",
                "--ssh-key-path",
                "~/.ssh/id_ed25519_perso"
            ]
        );
    }

    #[test]
    fn text_list_lines_are_parsed_with_and_without_the_active_marker() {
        let output = "👉 work (me-work)\nperso (me)\nnot a list line\n";
        assert_eq!(parse_list_text(output), ["work", "perso"]);
    }
}
