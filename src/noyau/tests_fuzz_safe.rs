//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler Lexer + Parser avec des lignes quelconques sans brûler la machine.
//! - RNG déterministe (StdRng, graine fixe)
//! - longueur bornée
//! - budget temps global
//! - invariant clé : une erreur pointe toujours DANS la ligne (ou juste après)
//! - invariant clé : une ligne acceptée se relit à l’identique depuis son rendu

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Expression, ParseError};

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération de lignes ------------------------ */

/// Morceaux plausibles (jetons, fragments, intrus).
const MORCEAUX: &[&str] = &[
    "x", "y", "pi", "sin", "cos", "avg", "(", ")", "*", ",", " ", "\t", "p", "si", "av", "q", "#",
    "+", "X", "é", "\u{a0}",
];

fn gen_soupe(rng: &mut StdRng) -> String {
    let n = rng.gen_range(1..=14);
    (0..n)
        .map(|_| MORCEAUX[rng.gen_range(0..MORCEAUX.len())])
        .collect()
}

/// Expression valide en texte (grammaire respectée, blancs aléatoires).
fn gen_valide(rng: &mut StdRng, depth: usize) -> String {
    let blanc = |rng: &mut StdRng| if rng.gen_range(0..3) == 0 { " " } else { "" };

    if depth == 0 {
        return if rng.gen_bool(0.5) { "x" } else { "y" }.to_string();
    }

    match rng.gen_range(0..5) {
        0 => gen_valide(rng, 0),
        1 => format!(
            "({}{}*{}{})",
            gen_valide(rng, depth - 1),
            blanc(rng),
            blanc(rng),
            gen_valide(rng, depth - 1)
        ),
        2 => format!("sin(pi{}*{})", blanc(rng), gen_valide(rng, depth - 1)),
        3 => format!("cos({}pi*{})", blanc(rng), gen_valide(rng, depth - 1)),
        _ => format!(
            "avg({},{}{})",
            gen_valide(rng, depth - 1),
            blanc(rng),
            gen_valide(rng, depth - 1)
        ),
    }
}

fn check_position(ligne: &str, e: &ParseError) {
    let n = ligne.chars().count();
    let p = e.position();
    assert!(
        p >= 1 && p <= n + 1,
        "position hors ligne: ligne={ligne:?} err={e}"
    );
}

fn check_relecture(ligne: &str, e: &Expression) {
    // "0" n’est pas une entrée du langage (ligne vide à la place)
    if e.est_zero() {
        assert!(Expression::parse_line("").is_ok_and(|z| &z == e));
        return;
    }
    let texte = e.render_infix();
    let relue = Expression::parse_line(&texte)
        .unwrap_or_else(|err| panic!("rendu illisible: ligne={ligne:?} rendu={texte:?} err={err}"));
    assert_eq!(&relue, e, "ligne={ligne:?}");
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_soupe_de_jetons() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = StdRng::seed_from_u64(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..2000 {
        budget(t0, max);

        let ligne = gen_soupe(&mut rng);
        match Expression::parse_line(&ligne) {
            Ok(e) => {
                check_relecture(&ligne, &e);
                seen_ok += 1;
            }
            Err(e) => {
                check_position(&ligne, &e);
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 100, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_lignes_valides() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = StdRng::seed_from_u64(0xBADC0DE_u64);

    for _ in 0..300 {
        budget(t0, max);

        let ligne = gen_valide(&mut rng, 6);
        let e = Expression::parse_line(&ligne)
            .unwrap_or_else(|err| panic!("ligne valide refusée: {ligne:?} err={err}"));
        check_relecture(&ligne, &e);
        assert_eq!(e.render_infix(), ligne.replace(' ', ""));
    }
}

#[test]
fn fuzz_safe_troncatures() {
    // Toute troncature d’une ligne valide : erreur bien placée ou expression relisible.
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    let mut rng = StdRng::seed_from_u64(0x5EED_u64);

    for _ in 0..100 {
        budget(t0, max);

        let ligne = gen_valide(&mut rng, 4);
        let chars: Vec<char> = ligne.chars().collect();
        for fin in 1..chars.len() {
            let tronquee: String = chars[..fin].iter().collect();
            match Expression::parse_line(&tronquee) {
                Ok(e) => check_relecture(&tronquee, &e),
                Err(e) => check_position(&tronquee, &e),
            }
        }
    }
}

#[test]
fn fuzz_safe_moyenne_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_secs(1);

    // Arbre avg équilibré de 512 feuilles : profondeur 10
    let mut items: Vec<String> = (0..512)
        .map(|i| if i % 2 == 0 { "x" } else { "y" }.to_string())
        .collect();
    while items.len() > 1 {
        items = items
            .chunks(2)
            .map(|p| format!("avg({},{})", p[0], p[1]))
            .collect();
    }
    let ligne = items.pop().unwrap_or_default();

    let e = Expression::parse_line(&ligne).unwrap_or_else(|err| panic!("err: {err}"));
    budget(t0, max);

    assert_eq!(e.depth(), 10);
    // moyenne de 256 x et 256 y
    assert!((e.evaluate(1.0_f64, 0.0) - 0.5).abs() < 1e-12);
}
