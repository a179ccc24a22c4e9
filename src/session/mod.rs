//! Session interactive
//!
//! Organisation interne :
//! - etat.rs      : état possédé (opérandes, opération, mémoire, historique)
//! - saisie.rs    : vocabulaire du clavier + règles d'accumulation pures
//! - commandes.rs : dépêche (une méthode par action) + instantané + effets
//!
//! Les collaborateurs externes (affichage, minuteur, clavier) ne touchent que
//! commandes.rs ; l'état ne s'échange qu'en lecture via l'instantané.

pub mod commandes;
pub mod etat;
pub mod saisie;

#[cfg(test)]
mod tests_scenarios;


// API publique minimale
pub use commandes::{Calculatrice, Effet, Instantane, Reponse};
pub use etat::{EntreeHistorique, EtatCalc, Reglages, SENTINELLE_ERREUR};
pub use saisie::{Constante, FonctionTouche, Operateur, Touche};
