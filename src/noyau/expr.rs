// src/noyau/expr.rs
//
// AST arithmétique sur f64.
// - Nombre : littéral
// - Pi : symbole π (injecté par l'enveloppe d'angle, ou tapé tel quel)
// - Aleatoire : random(), tiré au moment de l'évaluation
//
// L'évaluation vérifie les domaines AVANT d'appeler la fonction hôte :
// un échec est une valeur d'erreur typée, jamais un NaN rendu à l'appelant.

use rand::Rng;

use super::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Pi,
    Aleatoire,

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Fonction(Fonction, Box<Expr>),
}

/// Fonctions unaires du vocabulaire canonique.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    /// log décimal (base 10)
    Log,
    /// logarithme népérien
    Ln,
    Racine,
    Abs,
}

impl Fonction {
    pub fn depuis_ident(name: &str) -> Option<Fonction> {
        Some(match name {
            "sin" => Fonction::Sin,
            "cos" => Fonction::Cos,
            "tan" => Fonction::Tan,
            "asin" => Fonction::Asin,
            "acos" => Fonction::Acos,
            "atan" => Fonction::Atan,
            "log" => Fonction::Log,
            "ln" => Fonction::Ln,
            "sqrt" => Fonction::Racine,
            "abs" => Fonction::Abs,
            _ => return None,
        })
    }
}

impl Expr {
    /// Évalue l'arbre. Le générateur est fourni par l'appelant :
    /// random() reste déterministe sous graine fixe.
    pub fn evaluer<R: Rng>(&self, rng: &mut R) -> Result<f64, ErreurEval> {
        use Expr::*;

        match self {
            Nombre(v) => Ok(*v),
            Pi => Ok(std::f64::consts::PI),
            Aleatoire => Ok(rng.gen::<f64>()),

            Neg(x) => Ok(-x.evaluer(rng)?),

            Add(a, b) => Ok(a.evaluer(rng)? + b.evaluer(rng)?),
            Sub(a, b) => Ok(a.evaluer(rng)? - b.evaluer(rng)?),
            Mul(a, b) => Ok(a.evaluer(rng)? * b.evaluer(rng)?),

            Div(a, b) => {
                let num = a.evaluer(rng)?;
                let den = b.evaluer(rng)?;
                if den == 0.0 {
                    return Err(ErreurEval::DivisionParZero);
                }
                Ok(num / den)
            }

            // exposant quelconque (2^0.5 est légal)
            Pow(a, b) => {
                let base = a.evaluer(rng)?;
                let exp = b.evaluer(rng)?;
                Ok(base.powf(exp))
            }

            Fonction(f, x) => {
                let v = x.evaluer(rng)?;
                applique_fonction(*f, v)
            }
        }
    }
}

fn applique_fonction(f: Fonction, v: f64) -> Result<f64, ErreurEval> {
    match f {
        Fonction::Sin => Ok(v.sin()),
        Fonction::Cos => Ok(v.cos()),
        Fonction::Tan => Ok(v.tan()),

        Fonction::Asin => {
            if !(-1.0..=1.0).contains(&v) {
                return Err(ErreurEval::Domaine);
            }
            Ok(v.asin())
        }
        Fonction::Acos => {
            if !(-1.0..=1.0).contains(&v) {
                return Err(ErreurEval::Domaine);
            }
            Ok(v.acos())
        }
        Fonction::Atan => Ok(v.atan()),

        Fonction::Log => {
            if v <= 0.0 {
                return Err(ErreurEval::Domaine);
            }
            Ok(v.log10())
        }
        Fonction::Ln => {
            if v <= 0.0 {
                return Err(ErreurEval::Domaine);
            }
            Ok(v.ln())
        }

        Fonction::Racine => {
            if v < 0.0 {
                return Err(ErreurEval::Domaine);
            }
            Ok(v.sqrt())
        }

        Fonction::Abs => Ok(v.abs()),
    }
}
