//! Noyau du langage d’expressions de couleur
//!
//! Organisation interne :
//! - jetons.rs   : Lexer (jetons + Span, fin de ligne explicite)
//! - syntaxe.rs  : validation de la grammaire (descente récursive)
//! - rpn.rs      : shunting-yard infixe -> RPN + Symbole
//! - expr.rs     : Expression (évaluation, rendu infixe, profondeur)
//! - hasard.rs   : génération aléatoire à profondeur exacte
//! - erreur.rs   : ParseError
//!
//! Deux chemins, une seule représentation :
//!   texte  -> Lexer -> Parser -> to_rpn -> Expression
//!   hasard -> generer                   -> Expression

pub mod erreur;
pub mod expr;
pub mod hasard;
pub mod jetons;
pub mod rpn;
pub mod syntaxe;

#[cfg(test)]
mod tests_proprietes;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ParseError;
pub use expr::Expression;
pub use rpn::Symbole;
