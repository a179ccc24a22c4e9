// src/noyau/erreurs.rs

use thiserror::Error;

/// Échecs du pipeline d'évaluation.
///
/// Tout ce qui sort du noyau passe par ce type : le canon (factorielles),
/// les jetons, l'analyse et l'évaluation numérique. Les refus de saisie
/// (2e point décimal, opérande pleine) ne sont PAS des erreurs : la saisie
/// les ignore en silence, sans changement d'état.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ErreurEval {
    /// Expression mal formée : parenthèse orpheline, opérande manquante,
    /// entrée vide ("rien à calculer").
    #[error("expression mal formée")]
    Syntaxe,

    /// Argument hors domaine : √ d'un négatif, log/ln d'un non-positif,
    /// asin/acos hors [-1,1], factorielle d'un non-entier.
    #[error("argument hors domaine")]
    Domaine,

    /// Division par zéro exact. Jamais rendue comme ±∞.
    #[error("division par zéro")]
    DivisionParZero,

    /// Résultat non fini (NaN ou ±∞) après une analyse pourtant valide.
    #[error("résultat non fini")]
    ResultatInvalide,
}
