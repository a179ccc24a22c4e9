//! src/session/etat.rs
//!
//! État de session (sans affichage, sans évaluation).
//!
//! Rôle : contenir l'état de la calculatrice (opérandes, opération en attente,
//! mode d'angle, mémoire, historique borné) et offrir des opérations simples
//! (effacement, purge du marqueur d'erreur, dépôt d'historique).
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas d'analyse).
//! - Actions déterministes, sans effet de bord caché.
//! - Historique borné : insertion en tête, éviction du plus ancien.

use std::collections::VecDeque;

use crate::noyau::ModeAngle;
use crate::session::saisie::Operateur;

/// Capacité de l'historique par défaut (les 3 derniers calculs).
const CAPACITE_HISTORIQUE_DEFAUT: usize = 3;

/// Longueur maximale d'une opérande TAPÉE (chiffres et point).
/// Les textes structurels (fonctions, parenthèses, constantes) ne comptent pas.
const LONGUEUR_OPERANDE_DEFAUT: usize = 15;

/// Valeur affichée à la place d'un résultat quand l'évaluation échoue.
pub const SENTINELLE_ERREUR: &str = "Erreur";

/// Surface de configuration de la session.
#[derive(Clone, Copy, Debug)]
pub struct Reglages {
    pub mode_angle: ModeAngle,
    pub capacite_historique: usize,
    pub longueur_operande_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            mode_angle: ModeAngle::Degres,
            capacite_historique: CAPACITE_HISTORIQUE_DEFAUT,
            longueur_operande_max: LONGUEUR_OPERANDE_DEFAUT,
        }
    }
}

/// Un calcul retenu : texte de l'expression et valeur obtenue.
/// Immuable une fois déposé ; seul l'éviction de capacité le détruit.
#[derive(Clone, Debug)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: f64,
}

#[derive(Clone, Debug)]
pub struct EtatCalc {
    // --- tampon d'expression à deux côtés ---
    pub operande_courant: String,
    pub operande_precedent: String,
    pub operation: Option<Operateur>,

    // --- registres auxiliaires ---
    pub mode_angle: ModeAngle,
    pub memoire: f64,
    pub historique: VecDeque<EntreeHistorique>,
}

impl EtatCalc {
    pub fn nouveau(mode_angle: ModeAngle) -> Self {
        Self {
            operande_courant: String::new(),
            operande_precedent: String::new(),
            operation: None,
            mode_angle,
            memoire: 0.0,
            historique: VecDeque::new(),
        }
    }

    /// Effacement complet du tampon d'expression.
    /// Mémoire, historique et mode d'angle survivent.
    pub fn reinitialise(&mut self) {
        self.operande_courant.clear();
        self.operande_precedent.clear();
        self.operation = None;
    }

    /// Si l'affichage montre le marqueur d'erreur, applique l'effacement
    /// que la réinitialisation différée aurait fait. Sans cette purge, le
    /// marqueur absorberait la frappe suivante ("Erreur5").
    pub fn purge_erreur(&mut self) {
        if self.operande_courant == SENTINELLE_ERREUR {
            self.reinitialise();
        }
    }

    /// Dépose un calcul en tête d'historique, tronqué à la capacité.
    pub fn pousse_historique(&mut self, expression: String, resultat: f64, capacite: usize) {
        self.historique.push_front(EntreeHistorique {
            expression,
            resultat,
        });
        self.historique.truncate(capacite);
    }
}
