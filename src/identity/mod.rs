/// Lecture du lien historique en configuration git locale.
pub mod legacy;
/// Lecture du fichier sentinelle `.ghmulti` par dépôt.
pub mod project_config;

mod resolver;
mod types;

pub use resolver::resolve_active_account;
pub use types::{AccountIdentity, WorkspaceContext};
