// src/noyau/jetons.rs

use super::erreurs::ErreurEval;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,

    /// random() : atome nul-aire, tiré au moment de l'évaluation.
    Alea,

    // Fonctions (sin/cos/.../abs). Tout autre mot est refusé à l'analyse.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    /// Moins unaire. Jamais produit par tokenize : injecté par to_rpn
    /// quand un '-' arrive sans valeur devant.
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne canonique en jetons.
/// Supporte :
/// - littéraux f64 : 12, 3.5, .5, 7.2e306 (les résultats réinjectés comme
///   opérande portent parfois un exposant)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi
/// - random() (atome nul-aire)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurEval> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            _ => {}
        }

        // π unicode (le canon n'en émet plus, mais on reste tolérant)
        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if w == "pi" {
                out.push(Tok::Pi);
            } else if w == "random" && i + 1 < chars.len() && chars[i] == '(' && chars[i + 1] == ')'
            {
                out.push(Tok::Alea);
                i += 2; // consomme "()"
            } else {
                out.push(Tok::Ident(w));
            }
            continue;
        }

        // Littéral numérique : chiffres et point, exposant éventuel
        if c.is_ascii_digit() || c == '.' {
            let debut = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }

            // exposant scientifique : e / E suivi d'un entier signé
            if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    i = j;
                    while i < chars.len() && chars[i].is_ascii_digit() {
                        i += 1;
                    }
                }
            }

            let texte: String = chars[debut..i].iter().collect();
            // "1.2.3" ou "." seul échouent ici
            let v: f64 = texte.parse().map_err(|_| ErreurEval::Syntaxe)?;
            out.push(Tok::Num(v));
            continue;
        }

        // '!' résolu par le canon ; tout reste est une faute de syntaxe
        return Err(ErreurEval::Syntaxe);
    }

    Ok(out)
}
