// src/noyau/erreur.rs
//
// Erreurs d’analyse d’une ligne d’expression.
// Toutes les positions sont des colonnes (caractères) comptées à partir de 1 :
// - BadToken, Syntax, TooDeep : colonne du premier caractère du lexème fautif,
//   soit aussi le nombre de caractères lus juste après ce caractère
//   ("x*" : Syntax à 2, le '*' ; "ping" : BadToken à 3, le 'n')
// - Incomplete : colonne qui suit le dernier caractère lu ("(x*" : 4)

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Suite de caractères qui ne forme aucun jeton (ex: "n" dans "ping").
    #[error("jeton invalide à la position {position} : {lexeme:?}")]
    BadToken { position: usize, lexeme: String },

    /// Jeton valide, mais interdit à cet endroit de la grammaire
    /// (position : le jeton lui-même, pas le caractère suivant).
    #[error("erreur de syntaxe à la position {position}")]
    Syntax { position: usize },

    /// Fin de ligne atteinte avec des parenthèses encore ouvertes.
    #[error("expression incomplète à la position {position}")]
    Incomplete { position: usize },

    /// Garde-fou : imbrication au-delà de MAX_IMBRICATION.
    #[error("imbrication trop profonde à la position {position}")]
    TooDeep { position: usize },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::BadToken { position, .. }
            | ParseError::Syntax { position }
            | ParseError::Incomplete { position }
            | ParseError::TooDeep { position } => *position,
        }
    }
}
