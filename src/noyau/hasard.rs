// src/noyau/hasard.rs
//
// Générateur d’expressions aléatoires, directement en RPN (sans passer par le texte).
//
// Tirages, dans l’ordre :
// - profondeur 1 : x ou y (1 chance sur 2)
// - profondeur d > 1 : sin, cos, avg ou * (1 chance sur 4)
//     - sin/cos : pi, sous-expression de profondeur d-1, *, sin/cos
//     - avg/*   : r dans [1, d-1], puis le côté qui reçoit r (l’autre reçoit d-1)
//
// La source de hasard est passée explicitement : même graine => même expression.

use rand::Rng;

use super::rpn::Symbole;

/// Ajoute à `out` une expression de profondeur exacte `profondeur`.
pub fn generer<R: Rng + ?Sized>(profondeur: u32, rng: &mut R, out: &mut Vec<Symbole>) {
    match profondeur {
        0 => out.push(Symbole::Zero),

        1 => {
            let operande = if rng.gen_range(0..2) == 0 {
                Symbole::X
            } else {
                Symbole::Y
            };
            out.push(operande);
        }

        d => match rng.gen_range(0..4) {
            choix @ (0 | 1) => {
                out.push(Symbole::Pi);
                generer(d - 1, rng, out);
                out.push(Symbole::Fois);
                out.push(if choix == 0 {
                    Symbole::Sin
                } else {
                    Symbole::Cos
                });
            }
            choix => {
                // une branche atteint d-1, l’autre est au plus aussi profonde
                let r = rng.gen_range(1..d);
                let (p1, p2) = if rng.gen_range(0..2) == 0 {
                    (r, d - 1)
                } else {
                    (d - 1, r)
                };
                generer(p1, rng, out);
                generer(p2, rng, out);
                out.push(if choix == 2 {
                    Symbole::Avg
                } else {
                    Symbole::Fois
                });
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::Expression;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn profondeur_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        let e = Expression::random(0, &mut rng);
        assert!(e.est_zero());
        assert_eq!(e.depth(), 0);
    }

    #[test]
    fn profondeur_un() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut vus = Vec::new();
        for _ in 0..64 {
            let e = Expression::random(1, &mut rng);
            assert_eq!(e.symboles().len(), 1);
            vus.push(e.symboles()[0]);
        }
        assert!(vus.contains(&Symbole::X));
        assert!(vus.contains(&Symbole::Y));
    }

    #[test]
    fn profondeur_deux_formes_possibles() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..64 {
            let txt = Expression::random(2, &mut rng).render_infix();
            let ok = ["sin(pi*", "cos(pi*", "avg(", "("]
                .iter()
                .any(|debut| txt.starts_with(debut));
            assert!(ok, "forme inattendue: {txt}");
            assert_eq!(txt.matches('(').count(), 1, "{txt}");
        }
    }

    #[test]
    fn profondeur_exacte() {
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        for d in 0..12 {
            for _ in 0..20 {
                let e = Expression::random(d, &mut rng);
                assert_eq!(e.depth(), d, "expr={e}");
            }
        }
    }

    #[test]
    fn meme_graine_meme_expression() {
        let a = Expression::random(9, &mut StdRng::seed_from_u64(2024));
        let b = Expression::random(9, &mut StdRng::seed_from_u64(2024));
        assert_eq!(a, b);
    }

    #[test]
    fn suite_bien_formee() {
        let mut rng = StdRng::seed_from_u64(3);
        for d in 1..10 {
            let e = Expression::random(d, &mut rng);
            // simulation de pile : jamais à vide, une seule valeur à la fin
            let mut hauteur: i64 = 0;
            for s in e.symboles() {
                hauteur -= s.arite() as i64;
                assert!(hauteur >= 0);
                hauteur += 1;
            }
            assert_eq!(hauteur, 1);
        }
    }
}
