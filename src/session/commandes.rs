// src/session/commandes.rs
//
// Dépêche des commandes : l'unique surface appelée par les collaborateurs
// externes (affichage, pavé tactile, traduction clavier).
//
// Modèle d'exécution : mono-fil, coopératif. Chaque commande court jusqu'au
// bout avant la suivante ; aucun blocage dans le noyau. Les comportements
// différés (effacement après erreur) sont des DEMANDES abstraites portées
// par la réponse : le collaborateur d'affichage possède le minuteur, l'arme
// sur `ProgrammeReinitialisation`, l'invalide sur `AnnuleReinitialisation`,
// et rappelle `reinitialisation_differee()` quand il expire.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::noyau::{eval_expression, format_valeur, ErreurEval};
use crate::session::etat::{EtatCalc, Reglages, SENTINELLE_ERREUR};
use crate::session::saisie::{self, Constante, FonctionTouche, Operateur, Touche};

/// Demande d'effet différé adressée au collaborateur d'affichage.
///
/// Toute commande invalide le minuteur en cours (sinon une réinitialisation
/// périmée écraserait une saisie plus récente) ; seul un échec d'évaluation
/// en arme un nouveau.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Effet {
    AnnuleReinitialisation,
    ProgrammeReinitialisation,
}

/// Vue en lecture seule de l'état, prête à rendre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantane {
    /// Opérande en cours de frappe ("0" si vide).
    pub operande_courant: String,
    /// Opérande gauche du calcul en attente ("" sinon).
    pub operande_precedent: String,
    /// Symbole de l'opération en attente ("" sinon).
    pub operateur_en_attente: String,
    /// Derniers calculs, du plus récent au plus ancien, joints par " | ".
    pub historique: String,
    /// "M: v" si la mémoire est non nulle, "" sinon.
    pub indicateur_memoire: String,
    /// "DEG" ou "RAD".
    pub etiquette_mode_angle: String,
}

/// Ce que chaque commande rend : l'état à afficher + la demande d'effet.
#[derive(Clone, Debug)]
pub struct Reponse {
    pub instantane: Instantane,
    pub effet: Effet,
}

/// La calculatrice de session : état possédé, générateur possédé,
/// une méthode par action utilisateur.
#[derive(Clone, Debug)]
pub struct Calculatrice {
    etat: EtatCalc,
    reglages: Reglages,
    rng: StdRng,
}

impl Default for Calculatrice {
    fn default() -> Self {
        Self::nouvelle()
    }
}

impl Calculatrice {
    pub fn nouvelle() -> Self {
        Self::avec_reglages(Reglages::default())
    }

    pub fn avec_reglages(reglages: Reglages) -> Self {
        Self {
            etat: EtatCalc::nouveau(reglages.mode_angle),
            reglages,
            rng: StdRng::from_entropy(),
        }
    }

    /// Générateur sous graine fixe : random() devient rejouable (tests).
    pub fn avec_graine(graine: u64) -> Self {
        let reglages = Reglages::default();
        Self {
            etat: EtatCalc::nouveau(reglages.mode_angle),
            reglages,
            rng: StdRng::seed_from_u64(graine),
        }
    }

    /* ------------------------ Saisie ------------------------ */

    /// Chiffre ou point décimal ('.').
    pub fn ajoute_chiffre(&mut self, c: char) -> Reponse {
        self.etat.purge_erreur();
        if c == '.' {
            saisie::ajoute_point(&mut self.etat, self.reglages.longueur_operande_max);
        } else {
            saisie::ajoute_chiffre(&mut self.etat, c, self.reglages.longueur_operande_max);
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// Opérateur binaire (+ - × ÷ ^) ou parenthèse.
    ///
    /// Règles :
    /// - '(' / ')' : structurelles, toujours acceptées ;
    /// - opérande courante vide et '-' : début d'un nombre négatif ;
    /// - opérande courante vide et opération déjà en attente : l'opérateur
    ///   ré-appuyé remplace l'intention, sans réévaluer ;
    /// - opérande courante vide sinon : refus silencieux ;
    /// - deux opérandes pleines : l'expression en attente est d'abord
    ///   repliée par le noyau, PUIS le nouvel opérateur est enregistré.
    pub fn ajoute_operateur(&mut self, c: char) -> Reponse {
        self.etat.purge_erreur();

        if c == '(' || c == ')' {
            saisie::ajoute_parenthese(&mut self.etat, c);
            return self.reponse(Effet::AnnuleReinitialisation);
        }

        let Some(op) = Operateur::depuis_car(c) else {
            return self.reponse(Effet::AnnuleReinitialisation);
        };

        if self.etat.operande_courant.is_empty() {
            if op == Operateur::Moins {
                // nombre négatif en tête d'opérande
                self.etat.operande_courant.push('-');
            } else if self.etat.operation.is_some() {
                // l'opérateur ré-appuyé remplace l'intention précédente
                self.etat.operation = Some(op);
            }
            return self.reponse(Effet::AnnuleReinitialisation);
        }

        if self.etat.operation.is_some() && !self.etat.operande_precedent.is_empty() {
            if let Err(e) = self.calcule_interne() {
                return self.echec(e);
            }
        }

        self.etat.operation = Some(op);
        self.etat.operande_precedent = std::mem::take(&mut self.etat.operande_courant);
        self.reponse(Effet::AnnuleReinitialisation)
    }

    pub fn ajoute_fonction(&mut self, f: FonctionTouche) -> Reponse {
        self.etat.purge_erreur();
        saisie::ajoute_texte(&mut self.etat, f.texte());
        self.reponse(Effet::AnnuleReinitialisation)
    }

    pub fn ajoute_constante(&mut self, c: Constante) -> Reponse {
        self.etat.purge_erreur();
        saisie::ajoute_texte(&mut self.etat, &c.texte());
        self.reponse(Effet::AnnuleReinitialisation)
    }

    pub fn ajoute_factorielle(&mut self) -> Reponse {
        self.etat.purge_erreur();
        saisie::ajoute_texte(&mut self.etat, "!");
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// Point d'entrée générique : un jeton abstrait du clavier.
    pub fn appuie(&mut self, touche: Touche) -> Reponse {
        match touche {
            Touche::Chiffre(c) => self.ajoute_chiffre(c),
            Touche::Point => self.ajoute_chiffre('.'),
            Touche::Operateur(op) => self.ajoute_operateur(op.symbole()),
            Touche::Parenthese(c) => self.ajoute_operateur(c),
            Touche::Fonction(f) => self.ajoute_fonction(f),
            Touche::Constante(c) => self.ajoute_constante(c),
            Touche::Factorielle => self.ajoute_factorielle(),
        }
    }

    /* ------------------------ Calcul ------------------------ */

    /// Évalue le tampon complet ("=").
    pub fn calcule(&mut self) -> Reponse {
        match self.calcule_interne() {
            Ok(()) => self.reponse(Effet::AnnuleReinitialisation),
            Err(e) => self.echec(e),
        }
    }

    fn calcule_interne(&mut self) -> Result<(), ErreurEval> {
        let etat = &mut self.etat;

        let (affiche, brute) = match etat.operation {
            Some(op) if !etat.operande_precedent.is_empty() => (
                format!(
                    "{} {} {}",
                    etat.operande_precedent,
                    op.symbole(),
                    etat.operande_courant
                ),
                format!(
                    "{}{}{}",
                    etat.operande_precedent,
                    op.symbole(),
                    etat.operande_courant
                ),
            ),
            _ => (etat.operande_courant.clone(), etat.operande_courant.clone()),
        };

        // tampon entièrement vide : rien à calculer
        let valeur = eval_expression(&brute, etat.mode_angle, &mut self.rng)?;

        trace!(expression = %affiche, valeur, "calcul réussi");

        etat.pousse_historique(affiche, valeur, self.reglages.capacite_historique);
        etat.operande_courant = format_valeur(valeur);
        etat.operande_precedent.clear();
        etat.operation = None;
        Ok(())
    }

    /// Échec d'évaluation : marqueur d'erreur + demande de réinitialisation
    /// différée. L'échec ne franchit jamais cette frontière en `Err`.
    fn echec(&mut self, erreur: ErreurEval) -> Reponse {
        debug!(%erreur, "évaluation échouée");
        self.etat.operande_courant = SENTINELLE_ERREUR.to_string();
        self.reponse(Effet::ProgrammeReinitialisation)
    }

    /// Rappel du minuteur d'affichage : applique l'effacement différé.
    pub fn reinitialisation_differee(&mut self) -> Reponse {
        self.etat.reinitialise();
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /* ------------------------ Effacement, signes, puissances ------------------------ */

    /// AC : efface le tampon d'expression (mémoire/historique/mode conservés).
    pub fn efface_tout(&mut self) -> Reponse {
        self.etat.reinitialise();
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// Retire le dernier caractère de l'opérande courante.
    pub fn efface_dernier(&mut self) -> Reponse {
        self.etat.purge_erreur();
        self.etat.operande_courant.pop();
        self.reponse(Effet::AnnuleReinitialisation)
    }

    pub fn carre(&mut self) -> Reponse {
        self.applique_puissance(2)
    }

    pub fn cube(&mut self) -> Reponse {
        self.applique_puissance(3)
    }

    /// Élève l'opérande courante (si c'est un nombre simple) à la puissance n.
    fn applique_puissance(&mut self, n: i32) -> Reponse {
        self.etat.purge_erreur();
        if let Ok(v) = self.etat.operande_courant.parse::<f64>() {
            self.etat.operande_courant = format_valeur(v.powi(n));
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// Bascule le signe de l'opérande courante (sauf vide ou "0").
    pub fn inverse_signe(&mut self) -> Reponse {
        self.etat.purge_erreur();
        let op = &mut self.etat.operande_courant;
        if !op.is_empty() && op != "0" {
            if let Some(reste) = op.strip_prefix('-') {
                *op = reste.to_string();
            } else {
                op.insert(0, '-');
            }
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// Degrés <-> radians. Sans effet sur les calculs déjà faits,
    /// seulement sur les évaluations futures.
    pub fn bascule_mode_angle(&mut self) -> Reponse {
        self.etat.mode_angle = self.etat.mode_angle.bascule();
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /* ------------------------ Mémoire ------------------------ */

    /// MS : mémorise l'opérande courante. Non-opération si l'opérande est
    /// vide ou n'est pas un nombre simple.
    pub fn memoire_stocke(&mut self) -> Reponse {
        self.etat.purge_erreur();
        if let Ok(v) = self.etat.operande_courant.parse::<f64>() {
            self.etat.memoire = v;
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// MR : remplace l'opérande courante par la mémoire.
    pub fn memoire_rappel(&mut self) -> Reponse {
        self.etat.purge_erreur();
        self.etat.operande_courant = format_valeur(self.etat.memoire);
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// MC : remet la mémoire à zéro, quel que soit son contenu.
    pub fn memoire_efface(&mut self) -> Reponse {
        self.etat.memoire = 0.0;
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// M+ : ajoute l'opérande courante à la mémoire.
    pub fn memoire_ajoute(&mut self) -> Reponse {
        self.etat.purge_erreur();
        if let Ok(v) = self.etat.operande_courant.parse::<f64>() {
            self.etat.memoire += v;
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /// M- : retire l'opérande courante de la mémoire.
    pub fn memoire_retire(&mut self) -> Reponse {
        self.etat.purge_erreur();
        if let Ok(v) = self.etat.operande_courant.parse::<f64>() {
            self.etat.memoire -= v;
        }
        self.reponse(Effet::AnnuleReinitialisation)
    }

    /* ------------------------ Lecture ------------------------ */

    /// Vue en lecture seule, prête à rendre.
    pub fn instantane(&self) -> Instantane {
        let etat = &self.etat;

        let historique = etat
            .historique
            .iter()
            .map(|e| format!("{} = {}", e.expression, format_valeur(e.resultat)))
            .collect::<Vec<_>>()
            .join(" | ");

        Instantane {
            operande_courant: if etat.operande_courant.is_empty() {
                "0".to_string()
            } else {
                etat.operande_courant.clone()
            },
            operande_precedent: etat.operande_precedent.clone(),
            operateur_en_attente: etat
                .operation
                .map(|op| op.symbole().to_string())
                .unwrap_or_default(),
            historique,
            indicateur_memoire: if etat.memoire != 0.0 {
                format!("M: {}", format_valeur(etat.memoire))
            } else {
                String::new()
            },
            etiquette_mode_angle: etat.mode_angle.etiquette().to_string(),
        }
    }

    /// Accès lecture à l'état brut (tests, intégration).
    pub fn etat(&self) -> &EtatCalc {
        &self.etat
    }

    fn reponse(&self, effet: Effet) -> Reponse {
        Reponse {
            instantane: self.instantane(),
            effet,
        }
    }
}
