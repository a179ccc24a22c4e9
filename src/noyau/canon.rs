// src/noyau/canon.rs
//
// Canonicalisation du texte de surface (clavier) vers la grammaire du noyau :
// - opérateurs unicode (×, ÷) -> * /
// - √( -> sqrt(   et   |( -> abs(
// - factorielles résolues EN AMONT (littéral décimal exact, via BigInt)
// - mode Degrés : enveloppe des arguments trig / des résultats trig inverses
//
// L'ordre des passes compte : la factorielle doit disparaître avant l'analyse,
// et l'enveloppe d'angle travaille sur les noms canoniques.
// Les erreurs de structure restantes (parenthèses, opérandes) sortent à
// l'évaluation, pas ici.

use num_bigint::BigInt;
use num_traits::One;

use super::erreurs::ErreurEval;

/// Au-delà, la factorielle déborde f64 : on refuse avant de développer
/// des milliers de chiffres qui s'évalueraient en ∞.
const FACTORIELLE_MAX: u64 = 170;

/// Interprétation des angles trigonométriques.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeAngle {
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn bascule(self) -> Self {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }

    /// Étiquette courte pour l'affichage.
    pub fn etiquette(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }
}

impl Default for ModeAngle {
    fn default() -> Self {
        ModeAngle::Degres
    }
}

/// Pipeline complet de canonicalisation.
pub fn canoniser(brut: &str, mode: ModeAngle) -> Result<String, ErreurEval> {
    let traduit = traduit_surface(brut);
    let sans_factorielles = resout_factorielles(&traduit)?;
    Ok(applique_mode_angle(&sans_factorielles, mode))
}

/* ------------------------ Passe 1 : vocabulaire ------------------------ */

/// Remplace les symboles de surface par le vocabulaire canonique.
/// sin/cos/tan/asin/acos/atan/log/ln/random sont déjà canoniques.
fn traduit_surface(s: &str) -> String {
    let mut sortie = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '×' => sortie.push('*'),
            '÷' => sortie.push('/'),
            // la parenthèse qui suit sur le clavier complète l'appel
            '√' => sortie.push_str("sqrt"),
            '|' => sortie.push_str("abs"),
            _ => sortie.push(c),
        }
    }
    sortie
}

/* ------------------------ Passe 2 : factorielles ------------------------ */

/// Développe chaque `n!` en littéral décimal exact.
///
/// La factorielle lie plus fort que tout opérateur voisin et ne s'applique
/// qu'à un littéral entier : `3-2!` devient `3-2`, mais `2.5!` et `(-1)!`
/// sont hors domaine dès cette passe.
fn resout_factorielles(s: &str) -> Result<String, ErreurEval> {
    let chars: Vec<char> = s.chars().collect();
    let mut sortie = String::with_capacity(s.len());
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        // '!' sans littéral entier juste devant : après ')', un opérateur,
        // ou en tête d'expression.
        if c == '!' {
            return Err(ErreurEval::Domaine);
        }

        if c.is_ascii_digit() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                i += 1;
            }

            if i < chars.len() && chars[i] == '!' {
                // série collée à un point : partie fractionnaire d'un décimal
                if debut > 0 && chars[debut - 1] == '.' {
                    return Err(ErreurEval::Domaine);
                }
                let texte: String = chars[debut..i].iter().collect();
                let n: u64 = texte.parse().map_err(|_| ErreurEval::Syntaxe)?;
                sortie.push_str(&factorielle_litterale(n)?);
                i += 1; // consomme '!'
            } else {
                for &d in &chars[debut..i] {
                    sortie.push(d);
                }
            }
            continue;
        }

        sortie.push(c);
        i += 1;
    }

    Ok(sortie)
}

/// n! exact, rendu en texte décimal.
fn factorielle_litterale(n: u64) -> Result<String, ErreurEval> {
    if n > FACTORIELLE_MAX {
        return Err(ErreurEval::ResultatInvalide);
    }

    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= BigInt::from(k);
    }
    Ok(acc.to_string())
}

/* ------------------------ Passe 3 : mode d'angle ------------------------ */

/// En Degrés : sin(A) -> sin((A)*pi/180) et asin(A) -> (asin(A)*180/pi).
///
/// L'enveloppe couvre l'argument ENTIER (appariement de parenthèses), pas
/// seulement son premier facteur : sin(30+60) doit lire 90 degrés.
/// En Radians, le texte passe tel quel.
fn applique_mode_angle(s: &str, mode: ModeAngle) -> String {
    if mode == ModeAngle::Radians {
        return s.to_string();
    }

    let chars: Vec<char> = s.chars().collect();
    let mut sortie = String::with_capacity(s.len() + 16);

    // (profondeur de l'argument, texte émis à sa parenthèse fermante)
    let mut en_attente: Vec<(i32, &'static str)> = Vec::new();
    let mut profondeur: i32 = 0;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_alphabetic() {
            let debut = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let mot: String = chars[debut..i].iter().collect();
            let appel = i < chars.len() && chars[i] == '(';

            match (mot.as_str(), appel) {
                // argument en degrés -> radians
                ("sin" | "cos" | "tan", true) => {
                    sortie.push_str(&mot);
                    sortie.push_str("((");
                    en_attente.push((profondeur + 1, ")*pi/180)"));
                    profondeur += 1;
                    i += 1;
                }
                // résultat en radians -> degrés
                ("asin" | "acos" | "atan", true) => {
                    sortie.push('(');
                    sortie.push_str(&mot);
                    sortie.push('(');
                    en_attente.push((profondeur + 1, ")*180/pi)"));
                    profondeur += 1;
                    i += 1;
                }
                _ => sortie.push_str(&mot),
            }
            continue;
        }

        if c == '(' {
            profondeur += 1;
            sortie.push(c);
            i += 1;
            continue;
        }

        if c == ')' {
            if let Some(&(p, fin)) = en_attente.last() {
                if p == profondeur {
                    sortie.push_str(fin);
                    en_attente.pop();
                    profondeur -= 1;
                    i += 1;
                    continue;
                }
            }
            profondeur -= 1;
            sortie.push(c);
            i += 1;
            continue;
        }

        sortie.push(c);
        i += 1;
    }

    // parenthèse fermante absente : on laisse tel quel, l'analyse refusera
    sortie
}
