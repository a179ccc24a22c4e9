//! Noyau — évaluation (pipeline réel)
//!
//! canon -> jetons -> RPN -> Expr -> valeur f64 -> garde de finitude
//!
//! Remarque : le canon résout les factorielles et l'enveloppe d'angle avant
//! l'analyse ; l'évaluation numérique ne voit donc que la grammaire de base.

use rand::Rng;

use super::canon::{canoniser, ModeAngle};
use super::erreurs::ErreurEval;
use super::jetons::tokenize;
use super::rpn::{from_rpn, to_rpn};

/// API publique : évalue une expression de surface et retourne sa valeur.
///
/// - `brut` : le texte tel qu'accumulé par le clavier (×, ÷, √(, n!, ...)
/// - `mode` : interprétation des angles trigonométriques
/// - `rng`  : source de random(), fournie par la session (graine contrôlable)
///
/// Une valeur rendue est toujours finie : NaN et ±∞ deviennent
/// `ResultatInvalide`, l'entrée vide est `Syntaxe` (rien à calculer).
pub fn eval_expression<R: Rng>(
    brut: &str,
    mode: ModeAngle,
    rng: &mut R,
) -> Result<f64, ErreurEval> {
    let s = brut.trim();
    if s.is_empty() {
        return Err(ErreurEval::Syntaxe);
    }

    // 1) Canon (vocabulaire, factorielles, angles)
    let canonique = canoniser(s, mode)?;

    // 2) Jetons
    let jetons = tokenize(&canonique)?;

    // 3) RPN puis AST
    let rpn = to_rpn(&jetons)?;
    let expr = from_rpn(&rpn)?;

    // 4) Valeur numérique
    let valeur = expr.evaluer(rng)?;

    // 5) Garde de finitude
    if !valeur.is_finite() {
        return Err(ErreurEval::ResultatInvalide);
    }
    Ok(valeur)
}
