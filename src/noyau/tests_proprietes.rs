//! Propriétés (proptest) : profondeur du générateur, aller-retour texte, déterminisme.
//!
//! Graines tirées par proptest, expressions construites par StdRng::seed_from_u64 :
//! tout échec est rejouable.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::Expression;

/// Grille d’échantillonnage dans [-1, 1]².
fn grille() -> Vec<(f64, f64)> {
    let pas = [-1.0, -0.6, -0.25, 0.0, 0.1, 0.5, 0.9, 1.0];
    pas.iter()
        .flat_map(|&x| pas.iter().map(move |&y| (x, y)))
        .collect()
}

fn aleatoire(profondeur: u32, graine: u64) -> Expression {
    Expression::random(profondeur, &mut StdRng::seed_from_u64(graine))
}

proptest! {
    #[test]
    fn profondeur_generee_exacte(profondeur in 0u32..12, graine in any::<u64>()) {
        let e = aleatoire(profondeur, graine);
        prop_assert_eq!(e.depth(), profondeur, "expr={}", e);
    }

    #[test]
    fn aller_retour_texte(profondeur in 1u32..10, graine in any::<u64>()) {
        let e = aleatoire(profondeur, graine);
        let texte = e.render_infix();

        let relue = Expression::parse_line(&texte)
            .map_err(|err| TestCaseError::fail(format!("{texte:?}: {err}")))?;

        // parenthésage exact : même RPN, même texte, mêmes valeurs
        prop_assert_eq!(relue.render_infix(), texte.clone());
        prop_assert_eq!(relue.symboles(), e.symboles());
        for (x, y) in grille() {
            prop_assert_eq!(relue.evaluate(x, y), e.evaluate(x, y));
        }
    }

    #[test]
    fn evaluation_deterministe(profondeur in 0u32..10, graine in any::<u64>(), x in -1.0f64..=1.0, y in -1.0f64..=1.0) {
        let e = aleatoire(profondeur, graine);
        let copie = e.clone();
        prop_assert_eq!(e.evaluate(x, y), e.evaluate(x, y));
        prop_assert_eq!(e.evaluate(x, y), copie.evaluate(x, y));
    }

    #[test]
    fn valeurs_dans_l_intervalle(profondeur in 0u32..10, graine in any::<u64>(), x in -1.0f64..=1.0, y in -1.0f64..=1.0) {
        // sin, cos, produit et moyenne restent dans [-1, 1]
        let v = aleatoire(profondeur, graine).evaluate(x, y);
        prop_assert!((-1.0..=1.0).contains(&v), "v={}", v);
    }

    #[test]
    fn blancs_sans_effet(profondeur in 1u32..7, graine in any::<u64>()) {
        let e = aleatoire(profondeur, graine);
        // blancs autour de chaque ponctuation (jamais au milieu d’un mot)
        let aere: String = e
            .render_infix()
            .chars()
            .map(|c| match c {
                '(' | ')' | ',' | '*' => format!(" {c}\t"),
                _ => c.to_string(),
            })
            .collect();
        let relue = Expression::parse_line(&aere)
            .map_err(|err| TestCaseError::fail(format!("{aere:?}: {err}")))?;
        prop_assert_eq!(relue, e);
    }
}
