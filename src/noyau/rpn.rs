// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name) : fonction unaire connue (sin/.../abs), postfixée en RPN ;
//   tout autre mot est une faute de syntaxe (pas de variables ici).
// - Moins unaire : si '-' arrive quand on n'attend PAS une valeur, il devient
//   l'opérateur préfixe Neg (précédence entre mul/div et puissance), ce qui
//   donne 2*-3 = -6 et -2^2 = -(2^2).
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreurs::ErreurEval;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret | Tok::Neg)
}

/// Identificateurs reconnus comme fonctions (unaires).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_ident(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à distinguer le moins unaire du moins binaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::Alea => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if !is_fonction_ident(&name) {
                    return Err(ErreurEval::Syntaxe);
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Tok::Ident(name));
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut ouvrante_vue = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_vue = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_vue {
                    // ')' orpheline
                    return Err(ErreurEval::Syntaxe);
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(name)) = ops.last() {
                    if is_fonction_ident(name.as_str()) {
                        let f = ops.pop().ok_or(ErreurEval::Syntaxe)?;
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                depile_selon_precedence(&tok, &mut out, &mut ops);
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                if prev_was_value {
                    // moins binaire : même traitement que les autres opérateurs
                    depile_selon_precedence(&Tok::Minus, &mut out, &mut ops);
                    ops.push(Tok::Minus);
                } else {
                    // moins unaire : préfixe, en attente de sa valeur,
                    // donc rien à dépiler avant lui
                    ops.push(Tok::Neg);
                }
                prev_was_value = false;
            }

            // jamais émis par tokenize
            Tok::Neg => return Err(ErreurEval::Syntaxe),
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            // parenthèse non fermée
            return Err(ErreurEval::Syntaxe);
        }
        out.push(op);
    }

    Ok(out)
}

/// Dépile tant que :
/// - on n'est pas bloqué par '('
/// - on ne traverse pas une fonction (elle reste collée à son argument)
/// - la précédence/associativité exige de sortir l'opérateur du haut
fn depile_selon_precedence(tok: &Tok, out: &mut Vec<Tok>, ops: &mut Vec<Tok>) {
    while let Some(top) = ops.last() {
        if matches!(top, Tok::LPar) {
            break;
        }
        if let Tok::Ident(name) = top {
            if is_fonction_ident(name.as_str()) {
                break;
            }
        }

        let p_top = precedence(top);
        let p_tok = precedence(tok);

        let doit_pop = if is_right_associative(tok) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };

        if doit_pop {
            let op = ops.pop().unwrap_or(Tok::LPar);
            out.push(op);
        } else {
            break;
        }
    }
}

/// Construit une Expr à partir d'une RPN.
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurEval> {
    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(v) => st.push(Expr::Nombre(v)),
            Tok::Pi => st.push(Expr::Pi),
            Tok::Alea => st.push(Expr::Aleatoire),

            Tok::Neg => {
                let x = st.pop().ok_or(ErreurEval::Syntaxe)?;
                st.push(Expr::Neg(Box::new(x)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or(ErreurEval::Syntaxe)?;
                let a = st.pop().ok_or(ErreurEval::Syntaxe)?;

                let e = match tok {
                    Tok::Plus => Expr::Add(Box::new(a), Box::new(b)),
                    Tok::Minus => Expr::Sub(Box::new(a), Box::new(b)),
                    Tok::Star => Expr::Mul(Box::new(a), Box::new(b)),
                    Tok::Slash => Expr::Div(Box::new(a), Box::new(b)),
                    Tok::Caret => Expr::Pow(Box::new(a), Box::new(b)),
                    _ => return Err(ErreurEval::Syntaxe),
                };

                st.push(e);
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_ident(&name).ok_or(ErreurEval::Syntaxe)?;
                let x = st.pop().ok_or(ErreurEval::Syntaxe)?;
                st.push(Expr::Fonction(f, Box::new(x)));
            }

            Tok::LPar | Tok::RPar => return Err(ErreurEval::Syntaxe),
        }
    }

    if st.len() != 1 {
        return Err(ErreurEval::Syntaxe);
    }
    st.pop().ok_or(ErreurEval::Syntaxe)
}
