//! Martiste : images générées par des expressions de couleur.
//!
//! - noyau    : le langage (jetons, syntaxe, RPN, évaluation, hasard)
//! - toile    : tampon RVB, une expression par canal
//! - reglages : taille, profondeurs, graine (avec bornes)

pub mod noyau;
pub mod reglages;
pub mod toile;

pub use noyau::{Expression, ParseError};
pub use reglages::Reglages;
pub use toile::{Canal, ErreurToile, Toile};
