// src/lib.rs
//
// Calculatrice scientifique interactive — cœur de session
// --------------------------------------------------------
// Bibliothèque sans affichage : le rendu, les animations et la traduction
// des événements clavier appartiennent aux collaborateurs externes. Ils
// n'appellent que la dépêche (session::commandes) et ne reçoivent que des
// instantanés en lecture seule + des demandes d'effet différé.
//
// Organisation :
// - noyau   : canon, jetons, RPN, AST, évaluation, format
// - session : état, saisie, dépêche des commandes
//
// L'évaluation passe par un analyseur dédié (shunting-yard) : précédences,
// associativités et échecs sont explicites et testés, jamais délégués à un
// évaluateur de code généraliste.

pub mod noyau;
pub mod session;

// API publique minimale
pub use noyau::{eval_expression, ErreurEval, ModeAngle};
pub use session::{Calculatrice, Effet, Instantane, Reglages, Reponse, Touche};
