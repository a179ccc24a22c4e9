// src/session/saisie.rs
//
// Vocabulaire du clavier + règles d'accumulation SANS évaluation.
//
// Chaque touche est un jeton abstrait (la traduction depuis un événement
// clavier physique appartient au collaborateur externe). Les refus sont des
// non-opérations silencieuses : pas d'erreur, pas de changement d'état.
// La règle opérateur (qui peut déclencher une évaluation) vit dans
// commandes.rs ; ici tout est pur.

use crate::session::etat::EtatCalc;

/// Opérateurs binaires du clavier, avec leur symbole de surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Division,
    Puissance,
}

impl Operateur {
    pub fn depuis_car(c: char) -> Option<Operateur> {
        Some(match c {
            '+' => Operateur::Plus,
            '-' => Operateur::Moins,
            '×' | '*' => Operateur::Fois,
            '÷' | '/' => Operateur::Division,
            '^' => Operateur::Puissance,
            _ => return None,
        })
    }

    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Moins => '-',
            Operateur::Fois => '×',
            Operateur::Division => '÷',
            Operateur::Puissance => '^',
        }
    }
}

/// Touches de fonction scientifique. Chacune contribue son texte de surface,
/// mis en attente pour le canon (pas d'évaluation immédiate).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FonctionTouche {
    Sin,
    Cos,
    Tan,
    ArcSin,
    ArcCos,
    ArcTan,
    Log,
    Ln,
    Racine,
    ValeurAbsolue,
    Inverse,
    Aleatoire,
}

impl FonctionTouche {
    pub fn texte(self) -> &'static str {
        match self {
            FonctionTouche::Sin => "sin(",
            FonctionTouche::Cos => "cos(",
            FonctionTouche::Tan => "tan(",
            FonctionTouche::ArcSin => "asin(",
            FonctionTouche::ArcCos => "acos(",
            FonctionTouche::ArcTan => "atan(",
            FonctionTouche::Log => "log(",
            FonctionTouche::Ln => "ln(",
            FonctionTouche::Racine => "√(",
            FonctionTouche::ValeurAbsolue => "|(",
            FonctionTouche::Inverse => "1/(",
            FonctionTouche::Aleatoire => "random()",
        }
    }
}

/// Constantes du clavier, insérées comme texte décimal de leur valeur f64.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn texte(self) -> String {
        match self {
            Constante::Pi => std::f64::consts::PI.to_string(),
            Constante::E => std::f64::consts::E.to_string(),
        }
    }
}

/// Jeton d'entrée abstrait : ce que le clavier envoie à la dépêche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Chiffre(char),
    Point,
    Operateur(Operateur),
    Parenthese(char),
    Fonction(FonctionTouche),
    Constante(Constante),
    Factorielle,
}

/* ------------------------ Règles d'accumulation ------------------------ */

/// Chiffre : refusé si l'opérande tapée atteint la longueur maximale.
pub fn ajoute_chiffre(etat: &mut EtatCalc, chiffre: char, longueur_max: usize) {
    if !chiffre.is_ascii_digit() {
        return;
    }
    if etat.operande_courant.chars().count() >= longueur_max {
        return;
    }
    etat.operande_courant.push(chiffre);
}

/// Point décimal : refusé si la série numérique COURANTE en contient déjà un
/// (la série = la fin de l'opérande en chiffres/point ; "3.5+2.7" est légal).
pub fn ajoute_point(etat: &mut EtatCalc, longueur_max: usize) {
    if etat.operande_courant.chars().count() >= longueur_max {
        return;
    }
    if serie_numerique_courante(&etat.operande_courant).contains('.') {
        return;
    }
    etat.operande_courant.push('.');
}

/// Parenthèse : structurelle, acceptée telle quelle.
pub fn ajoute_parenthese(etat: &mut EtatCalc, c: char) {
    if c == '(' || c == ')' {
        etat.operande_courant.push(c);
    }
}

/// Fonctions, constantes, factorielle : texte littéral, mis en attente
/// pour le canon.
pub fn ajoute_texte(etat: &mut EtatCalc, texte: &str) {
    etat.operande_courant.push_str(texte);
}

/// La série numérique en cours de frappe : suffixe maximal en [0-9.].
fn serie_numerique_courante(operande: &str) -> &str {
    let debut = operande
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(operande.len());
    &operande[debut..]
}
