//! Scénarios de session : des suites de touches réalistes, vérifiées sur
//! l'instantané rendu au collaborateur d'affichage.
//!
//! Chaque scénario passe par la dépêche uniquement (jamais par l'état en
//! écriture) : c'est le chemin que prend un vrai clavier.

use crate::session::commandes::{Calculatrice, Effet};
use crate::session::etat::{Reglages, SENTINELLE_ERREUR};
use crate::session::saisie::FonctionTouche;

fn calc() -> Calculatrice {
    Calculatrice::avec_graine(0xBADC0DE)
}

/// Tape une suite de chiffres/points.
fn tape(c: &mut Calculatrice, texte: &str) {
    for ch in texte.chars() {
        c.ajoute_chiffre(ch);
    }
}

/* ------------------------ Accumulation et calcul ------------------------ */

#[test]
fn addition_simple() {
    let mut c = calc();
    tape(&mut c, "5");
    c.ajoute_operateur('+');
    tape(&mut c, "3");
    let r = c.calcule();

    assert_eq!(r.instantane.operande_courant, "8");
    assert_eq!(r.instantane.operande_precedent, "");
    assert_eq!(r.instantane.operateur_en_attente, "");
    assert!(r.instantane.historique.starts_with("5 + 3 = 8"));
}

#[test]
fn repli_sur_operateur_en_chaine() {
    // 5 + 3 × 2 = : le + se replie à l'appui du ×, puis 8 × 2 = 16
    let mut c = calc();
    tape(&mut c, "5");
    c.ajoute_operateur('+');
    tape(&mut c, "3");
    let r = c.ajoute_operateur('×');
    assert_eq!(r.instantane.operande_precedent, "8");
    assert_eq!(r.instantane.operateur_en_attente, "×");

    tape(&mut c, "2");
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, "16");

    // deux calculs retenus, le plus récent en tête
    assert_eq!(r.instantane.historique, "8 × 2 = 16 | 5 + 3 = 8");
}

#[test]
fn operateur_reappuye_remplace_l_intention() {
    let mut c = calc();
    tape(&mut c, "6");
    c.ajoute_operateur('+');
    let r = c.ajoute_operateur('×'); // remplace + par ×
    assert_eq!(r.instantane.operateur_en_attente, "×");

    tape(&mut c, "7");
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, "42");
}

#[test]
fn operande_negative_apres_operateur() {
    let mut c = calc();
    tape(&mut c, "5");
    c.ajoute_operateur('×');
    c.ajoute_operateur('-'); // commence -3
    tape(&mut c, "3");
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, "-15");
}

#[test]
fn moins_en_tete_d_expression() {
    let mut c = calc();
    c.ajoute_operateur('-');
    tape(&mut c, "4");
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, "-4");
}

#[test]
fn operateur_sur_tampon_vide_refuse() {
    let mut c = calc();
    let avant = c.instantane();
    let r = c.ajoute_operateur('+');
    assert_eq!(r.instantane, avant);
}

#[test]
fn fonction_puis_calcul_en_degres() {
    let mut c = calc(); // mode par défaut : degrés
    c.ajoute_fonction(FonctionTouche::Sin);
    tape(&mut c, "90");
    c.ajoute_operateur(')');
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, "1");
}

#[test]
fn bascule_de_mode_change_les_calculs_futurs() {
    let mut c = calc();
    let r = c.bascule_mode_angle();
    assert_eq!(r.instantane.etiquette_mode_angle, "RAD");

    c.ajoute_fonction(FonctionTouche::Sin);
    tape(&mut c, "90");
    c.ajoute_operateur(')');
    let r = c.calcule();
    // sin de 90 radians, pas 90 degrés
    assert!(r.instantane.operande_courant.starts_with("0.89"));
}

#[test]
fn bascule_de_mode_idempotente_en_double() {
    let mut c = calc();
    tape(&mut c, "12");
    let avant = c.instantane();

    c.bascule_mode_angle();
    let r = c.bascule_mode_angle();
    assert_eq!(r.instantane, avant);
}

/* ------------------------ Historique borné ------------------------ */

#[test]
fn historique_evince_le_plus_ancien() {
    let mut c = calc();
    for n in ["1", "2", "3", "4"] {
        c.efface_tout(); // le résultat précédent resterait l'opérande courante
        tape(&mut c, n);
        c.ajoute_operateur('+');
        tape(&mut c, "0");
        c.calcule();
    }

    let inst = c.instantane();
    // 4 calculs faits, 3 retenus, le plus récent en tête
    assert_eq!(inst.historique, "4 + 0 = 4 | 3 + 0 = 3 | 2 + 0 = 2");
    assert_eq!(c.etat().historique.len(), 3);
}

#[test]
fn capacite_historique_configurable() {
    let mut c = Calculatrice::avec_reglages(Reglages {
        capacite_historique: 1,
        ..Reglages::default()
    });
    tape(&mut c, "2");
    c.calcule();
    c.efface_tout();
    tape(&mut c, "3");
    let r = c.calcule();
    assert_eq!(r.instantane.historique, "3 = 3");
}

/* ------------------------ Mémoire ------------------------ */

#[test]
fn memoire_aller_retour() {
    let mut c = calc();
    tape(&mut c, "7");
    c.memoire_stocke();
    c.efface_tout();

    let r = c.memoire_rappel();
    assert_eq!(r.instantane.operande_courant, "7");
    assert_eq!(r.instantane.indicateur_memoire, "M: 7");

    let r = c.memoire_efface();
    assert_eq!(r.instantane.indicateur_memoire, "");
}

#[test]
fn memoire_ajoute_et_retire() {
    let mut c = calc();
    tape(&mut c, "10");
    c.memoire_stocke();
    c.efface_tout();

    tape(&mut c, "4");
    c.memoire_ajoute(); // 14
    c.efface_tout();
    tape(&mut c, "1");
    c.memoire_retire(); // 13
    c.efface_tout();

    let r = c.memoire_rappel();
    assert_eq!(r.instantane.operande_courant, "13");
}

#[test]
fn memoire_sur_operande_vide_sans_effet() {
    let mut c = calc();
    tape(&mut c, "9");
    c.memoire_stocke();
    c.efface_tout();

    // opérande vide : MS/M+/M- ne lisent rien
    c.memoire_stocke();
    c.memoire_ajoute();
    c.memoire_retire();

    let r = c.memoire_rappel();
    assert_eq!(r.instantane.operande_courant, "9");
}

/* ------------------------ Erreurs et réinitialisation différée ------------------------ */

#[test]
fn division_par_zero_arme_le_minuteur() {
    let mut c = calc();
    tape(&mut c, "5");
    c.ajoute_operateur('÷');
    tape(&mut c, "0");
    let r = c.calcule();

    assert_eq!(r.instantane.operande_courant, SENTINELLE_ERREUR);
    assert_eq!(r.effet, Effet::ProgrammeReinitialisation);

    // le minuteur expire : effacement complet
    let r = c.reinitialisation_differee();
    assert_eq!(r.instantane.operande_courant, "0");
}

#[test]
fn frappe_apres_erreur_remplace_le_marqueur() {
    let mut c = calc();
    tape(&mut c, "5");
    c.ajoute_operateur('÷');
    tape(&mut c, "0");
    c.calcule();

    // la commande suivante invalide le minuteur ET purge le marqueur
    let r = c.ajoute_chiffre('7');
    assert_eq!(r.effet, Effet::AnnuleReinitialisation);
    assert_eq!(r.instantane.operande_courant, "7");
}

#[test]
fn tampon_vide_rien_a_calculer() {
    let mut c = calc();
    let r = c.calcule();
    assert_eq!(r.instantane.operande_courant, SENTINELLE_ERREUR);
    assert_eq!(r.effet, Effet::ProgrammeReinitialisation);
}

#[test]
fn echec_ne_touche_pas_l_historique() {
    let mut c = calc();
    tape(&mut c, "2");
    c.calcule();
    c.efface_tout();

    c.ajoute_fonction(FonctionTouche::Racine);
    c.ajoute_operateur('-');
    tape(&mut c, "1");
    c.ajoute_operateur(')');
    c.calcule(); // √(-1) : hors domaine

    assert_eq!(c.instantane().historique, "2 = 2");
}

/* ------------------------ Retouches d'opérande ------------------------ */

#[test]
fn efface_dernier_caractere() {
    let mut c = calc();
    tape(&mut c, "123");
    let r = c.efface_dernier();
    assert_eq!(r.instantane.operande_courant, "12");

    c.efface_dernier();
    c.efface_dernier();
    // opérande vide : l'affichage montre "0"
    assert_eq!(c.instantane().operande_courant, "0");
}

#[test]
fn carre_cube_et_signe() {
    let mut c = calc();
    tape(&mut c, "4");
    assert_eq!(c.carre().instantane.operande_courant, "16");
    assert_eq!(c.cube().instantane.operande_courant, "4096");

    assert_eq!(c.inverse_signe().instantane.operande_courant, "-4096");
    assert_eq!(c.inverse_signe().instantane.operande_courant, "4096");
}

#[test]
fn carre_sur_texte_non_numerique_sans_effet() {
    let mut c = calc();
    c.ajoute_fonction(FonctionTouche::Sin);
    let avant = c.instantane();
    let r = c.carre();
    assert_eq!(r.instantane, avant);
}

#[test]
fn random_rejouable_sous_graine() {
    let mut a = Calculatrice::avec_graine(99);
    let mut b = Calculatrice::avec_graine(99);

    a.ajoute_fonction(FonctionTouche::Aleatoire);
    b.ajoute_fonction(FonctionTouche::Aleatoire);

    let ra = a.calcule();
    let rb = b.calcule();
    assert_eq!(
        ra.instantane.operande_courant,
        rb.instantane.operande_courant
    );
}
