// src/noyau/expr.rs
//
// Expression de couleur = suite RPN (immuable une fois construite).
// - construite par le Parser (texte) ou par le générateur (hasard)
// - évaluée pour chaque pixel (x, y) ; aucun état partagé entre deux appels
// - rendue en infixe, profondeur = imbrication maximale des parenthèses
//
// IMPORTANT:
// - Une suite RPN ne vient QUE de Parser::parse ou de hasard::generer :
//   elle est donc toujours bien formée (aucun dépilement à vide).
// - [Zero] seul = littéral de profondeur 0 (traité à part).

use std::fmt;
use std::str::FromStr;

use num_traits::{Float, FloatConst};
use rand::Rng;

use super::erreur::ParseError;
use super::hasard::generer;
use super::rpn::{format_rpn, Symbole};
use super::syntaxe::Parser;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression {
    rpn: Vec<Symbole>,
}

impl Default for Expression {
    fn default() -> Self {
        Self::zero()
    }
}

impl Expression {
    /// Littéral de profondeur 0 : vaut 0 partout.
    pub fn zero() -> Self {
        Self {
            rpn: vec![Symbole::Zero],
        }
    }

    /// Expression aléatoire de profondeur exacte `profondeur`.
    pub fn random<R: Rng + ?Sized>(profondeur: u32, rng: &mut R) -> Self {
        let mut rpn = Vec::new();
        generer(profondeur, rng, &mut rpn);
        Self { rpn }
    }

    /// Analyse une ligne de texte (jusqu’au premier saut de ligne).
    /// Ligne vide ou blanche => Expression::zero().
    pub fn parse_line(ligne: &str) -> Result<Self, ParseError> {
        let rpn = Parser::new(ligne).parse()?;
        Ok(Self { rpn })
    }

    pub fn symboles(&self) -> &[Symbole] {
        &self.rpn
    }

    pub fn est_zero(&self) -> bool {
        matches!(self.rpn.as_slice(), [Symbole::Zero])
    }

    /// Valeur de l’expression au point (x, y).
    pub fn evaluate<F: Float + FloatConst>(&self, x: F, y: F) -> F {
        if self.est_zero() {
            return F::zero();
        }

        fn depiler<F>(pile: &mut Vec<F>) -> F {
            pile.pop().expect("RPN bien formée")
        }

        let deux = F::one() + F::one();
        let mut pile: Vec<F> = Vec::with_capacity(self.rpn.len());

        for &s in &self.rpn {
            match s {
                Symbole::X => pile.push(x),
                Symbole::Y => pile.push(y),
                Symbole::Pi => pile.push(F::PI()),
                Symbole::Zero => pile.push(F::zero()),

                Symbole::Sin => {
                    let op = depiler(&mut pile);
                    pile.push(op.sin());
                }
                Symbole::Cos => {
                    let op = depiler(&mut pile);
                    pile.push(op.cos());
                }

                Symbole::Fois => {
                    let op2 = depiler(&mut pile);
                    let op1 = depiler(&mut pile);
                    pile.push(op1 * op2);
                }
                Symbole::Avg => {
                    let op2 = depiler(&mut pile);
                    let op1 = depiler(&mut pile);
                    pile.push((op1 + op2) / deux);
                }
            }
        }

        debug_assert_eq!(pile.len(), 1);
        depiler(&mut pile)
    }

    /// Rendu infixe (inverse exact de la conversion RPN) :
    /// sin/cos collés à leur argument "(pi*…)", avg(a,b), (a*b).
    pub fn render_infix(&self) -> String {
        if self.est_zero() {
            return Symbole::Zero.texte().to_string();
        }

        let mut pile: Vec<String> = Vec::with_capacity(self.rpn.len());

        for &s in &self.rpn {
            let fragment = match s {
                Symbole::X | Symbole::Y | Symbole::Pi | Symbole::Zero => s.texte().to_string(),
                Symbole::Sin | Symbole::Cos => {
                    let op = pile.pop().expect("RPN bien formée");
                    format!("{s}{op}")
                }
                Symbole::Avg => {
                    let op2 = pile.pop().expect("RPN bien formée");
                    let op1 = pile.pop().expect("RPN bien formée");
                    format!("avg({op1},{op2})")
                }
                Symbole::Fois => {
                    let op2 = pile.pop().expect("RPN bien formée");
                    let op1 = pile.pop().expect("RPN bien formée");
                    format!("({op1}*{op2})")
                }
            };
            pile.push(fragment);
        }

        pile.pop().unwrap_or_default()
    }

    /// Imbrication maximale des parenthèses dans le rendu infixe
    /// (1 sans parenthèse, 0 pour le littéral zéro).
    pub fn depth(&self) -> u32 {
        if self.est_zero() {
            return 0;
        }

        let infixe = self.render_infix();
        if infixe.is_empty() {
            return 0;
        }

        let mut courant: u32 = 1;
        let mut max: u32 = 1;
        for c in infixe.chars() {
            match c {
                '(' => {
                    courant += 1;
                    max = max.max(courant);
                }
                ')' if courant > 1 => courant -= 1,
                _ => {}
            }
        }
        max
    }

    /// RPN en texte (ex: "pi x * sin").
    pub fn format_rpn(&self) -> String {
        format_rpn(&self.rpn)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_infix())
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        Expression::parse_line(s)
    }
}
