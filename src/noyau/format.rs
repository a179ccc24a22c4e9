// src/noyau/format.rs

/// Au-delà, f64 ne distingue plus les entiers voisins : notation scientifique.
const SEUIL_ENTIER: f64 = 1e15;

/// En deçà, l'affichage à 10 décimales tronquerait tout : notation scientifique.
const SEUIL_MINUSCULE: f64 = 1e-9;

/// Formate une valeur pour l'affichage ET pour réinjection comme opérande.
///
/// Contrainte forte : la sortie doit rester lisible par tokenize(), parce
/// qu'un résultat devient l'opérande courante du calcul suivant.
/// - entiers sans point : 7.0 -> "7"
/// - sinon 10 décimales, zéros terminaux retirés : 0.1+0.2 -> "0.3"
/// - magnitudes extrêmes en notation scientifique : "7.257415615307994e306"
pub fn format_valeur(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if abs >= SEUIL_ENTIER || abs < SEUIL_MINUSCULE {
        return format!("{v:e}");
    }

    if v.fract() == 0.0 {
        return format!("{}", v as i64);
    }

    let texte = format!("{v:.10}");
    texte
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
