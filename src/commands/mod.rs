/// Gestion des comptes (ajout, bascule, liste).
pub mod accounts;
/// Rapports de statut et de diagnostic.
pub mod diagnostics;
/// Liens dépôt ↔ compte (lien, délien, migration du lien historique).
pub mod links;
