//! Cœur hôte de l'outil d'identité ghmulti.
//!
//! Cette bibliothèque reste volontairement mince côté UI: elle découvre la
//! commande concrète qui invoque l'outil `ghmulti`, l'exécute de façon
//! synchrone et résout le compte actif d'un espace de travail. L'affichage
//! (barre de statut, pickers, canal de sortie) et les prompts restent à la
//! charge de l'hôte.

pub mod commands;
pub mod discovery;
pub mod identity;
pub mod tool;
mod utils;

pub use discovery::{
    invalidate_tool_command, locate_tool_command, set_configured_command, CommandCandidate,
};
pub use identity::{resolve_active_account, AccountIdentity, WorkspaceContext};
