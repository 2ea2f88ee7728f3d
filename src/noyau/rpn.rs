// src/noyau/rpn.rs
//
// Shunting-yard : suite infixe validée -> RPN (postfix)
//
// Règles de précédence (propres à ce langage) :
// - x, y, pi          : sortie directe
// - ','               : dépile tant que le sommet est avg / sin / cos
// - '*'               : dépile tant que le sommet est * / sin / cos, puis empile
// - sin, cos          : dépile tant que le sommet est sin / cos, puis empile
// - avg, '('          : toujours empilés
// - ')'               : dépile jusqu’à '(' (jamais sortie), puis sort la fonction
//                       qui l’ouvrait (avg / sin / cos) : avg(…) est alors complet
//
// NOTE: la virgule n’est jamais empilée ; elle ne sert qu’à vider la pile.

use std::fmt;

use super::jetons::Token;

/// Symbole d’une expression en notation polonaise inversée.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbole {
    X,
    Y,
    Pi,
    Sin,
    Cos,
    Avg,
    Fois,
    /// Littéral de profondeur 0 (seul dans sa suite).
    Zero,
}

impl Symbole {
    pub fn texte(self) -> &'static str {
        match self {
            Symbole::X => "x",
            Symbole::Y => "y",
            Symbole::Pi => "pi",
            Symbole::Sin => "sin",
            Symbole::Cos => "cos",
            Symbole::Avg => "avg",
            Symbole::Fois => "*",
            Symbole::Zero => "0",
        }
    }

    /// Nombre d’opérandes consommés sur la pile.
    pub fn arite(self) -> usize {
        match self {
            Symbole::X | Symbole::Y | Symbole::Pi | Symbole::Zero => 0,
            Symbole::Sin | Symbole::Cos => 1,
            Symbole::Avg | Symbole::Fois => 2,
        }
    }
}

impl fmt::Display for Symbole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texte())
    }
}

impl TryFrom<Token> for Symbole {
    type Error = Token;

    /// Ponctuation ('(', ')', ',') : pas de symbole RPN.
    fn try_from(t: Token) -> Result<Self, Token> {
        match t {
            Token::X => Ok(Symbole::X),
            Token::Y => Ok(Symbole::Y),
            Token::Pi => Ok(Symbole::Pi),
            Token::Sin => Ok(Symbole::Sin),
            Token::Cos => Ok(Symbole::Cos),
            Token::Avg => Ok(Symbole::Avg),
            Token::Times => Ok(Symbole::Fois),
            Token::OpenParen | Token::CloseParen | Token::Comma => Err(t),
        }
    }
}

/// Vrai si `sommet` doit sortir de la pile avant de traiter `tok`.
fn depile_avant(tok: Token, sommet: Token) -> bool {
    match tok {
        Token::Comma => matches!(sommet, Token::Avg | Token::Sin | Token::Cos),
        Token::Times => matches!(sommet, Token::Times | Token::Sin | Token::Cos),
        Token::Sin | Token::Cos => matches!(sommet, Token::Sin | Token::Cos),
        _ => false,
    }
}

/// Convertit une suite infixe (déjà validée par le Parser) en RPN.
///
/// Exemple:
///   infixe: [Sin, OpenParen, Pi, Times, X, CloseParen]
///   rpn:    [Pi, X, Fois, Sin]
pub fn to_rpn(infixe: &[Token]) -> Vec<Symbole> {
    let mut out: Vec<Symbole> = Vec::with_capacity(infixe.len());
    let mut ops: Vec<Token> = Vec::new();

    for &tok in infixe {
        match tok {
            Token::X | Token::Y | Token::Pi => sortir(&mut out, tok),

            Token::Avg | Token::OpenParen => ops.push(tok),

            Token::Comma | Token::Times | Token::Sin | Token::Cos => {
                while let Some(&sommet) = ops.last() {
                    if !depile_avant(tok, sommet) {
                        break;
                    }
                    ops.pop();
                    sortir(&mut out, sommet);
                }
                if tok != Token::Comma {
                    ops.push(tok);
                }
            }

            Token::CloseParen => {
                // dépile jusqu’à '('
                while let Some(sommet) = ops.pop() {
                    if sommet == Token::OpenParen {
                        break;
                    }
                    sortir(&mut out, sommet);
                }
                if let Some(&f) = ops.last() {
                    if matches!(f, Token::Avg | Token::Sin | Token::Cos) {
                        ops.pop();
                        sortir(&mut out, f);
                    }
                }
            }
        }
    }

    // vide la pile ops (aucune '(' restante : la suite est équilibrée)
    while let Some(op) = ops.pop() {
        sortir(&mut out, op);
    }

    out
}

fn sortir(out: &mut Vec<Symbole>, op: Token) {
    if let Ok(s) = Symbole::try_from(op) {
        out.push(s);
    }
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[Symbole]) -> String {
    rpn.iter()
        .map(|s| s.texte())
        .collect::<Vec<_>>()
        .join(" ")
}
