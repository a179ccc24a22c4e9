//! Noyau d'évaluation
//!
//! Organisation interne :
//! - erreurs.rs : taxonomie des échecs (syntaxe, domaine, /0, non fini)
//! - canon.rs   : surface -> grammaire canonique (×÷, √, factorielles, angles)
//! - jetons.rs  : tokenisation de la forme canonique
//! - rpn.rs     : shunting-yard + construction Expr
//! - expr.rs    : AST f64 + évaluation numérique (domaines vérifiés)
//! - eval.rs    : pipeline complet
//! - format.rs  : valeur -> texte (affichage et réinjection)

pub mod canon;
pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;


// API publique minimale
pub use canon::ModeAngle;
pub use erreurs::ErreurEval;
pub use eval::eval_expression;
pub use format::format_valeur;
