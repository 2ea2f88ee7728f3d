// src/noyau/jetons.rs
//
// Lexer : une ligne de texte -> jetons, un à la fois.
// - blancs ignorés entre jetons
// - un saut de ligne termine toujours l’expression
// - chaque jeton porte son Span (début + longueur), pour des erreurs précises
// - fin de ligne = Lu::Fin (pas une erreur ; c’est l’appelant qui décide)

use std::fmt;

use super::erreur::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    X,
    Y,
    Sin,
    Cos,
    Pi,
    OpenParen,
    CloseParen,
    Times,
    Avg,
    Comma,
}

impl Token {
    /// Vrai si le jeton peut ouvrir une expression.
    pub fn ouvre_expression(self) -> bool {
        matches!(
            self,
            Token::X | Token::Y | Token::OpenParen | Token::Sin | Token::Cos | Token::Avg
        )
    }

    pub fn texte(self) -> &'static str {
        match self {
            Token::X => "x",
            Token::Y => "y",
            Token::Sin => "sin",
            Token::Cos => "cos",
            Token::Pi => "pi",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
            Token::Times => "*",
            Token::Avg => "avg",
            Token::Comma => ",",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.texte())
    }
}

/// Emplacement d’un lexème dans la ligne (début compté à partir de 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub debut: usize,
    pub longueur: usize,
}

impl Span {
    /// Colonne (à partir de 1) du premier caractère.
    pub fn position(&self) -> usize {
        self.debut + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Jeton {
    pub token: Token,
    pub span: Span,
}

/// Résultat d’une lecture : un jeton, ou la fin de la ligne.
/// `Fin` porte le nombre de caractères consommés au moment où l’entrée s’arrête.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lu {
    Jeton(Jeton),
    Fin(usize),
}

#[derive(Clone, Debug)]
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    compteur: usize,
}

impl Lexer {
    pub fn new(ligne: &str) -> Self {
        Self {
            chars: ligne.chars().collect(),
            pos: 0,
            compteur: 0,
        }
    }

    /// Jeton suivant (consommé).
    pub fn next(&mut self) -> Result<Lu, ParseError> {
        // Blancs ASCII (le saut de ligne n’en est pas un : il termine la ligne)
        while let Some(c) = self.courant() {
            if c == '\n' || !c.is_ascii_whitespace() {
                break;
            }
            self.avancer();
        }

        let debut = self.pos;
        let c = match self.courant() {
            Some(c) if c != '\n' => c,
            _ => return Ok(Lu::Fin(self.pos)),
        };
        self.avancer();

        let token = match c {
            'x' => Token::X,
            'y' => Token::Y,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '*' => Token::Times,
            ',' => Token::Comma,

            // "pi"
            'p' => {
                if !self.lire(1) {
                    return Ok(Lu::Fin(self.pos));
                }
                if self.chars[debut + 1] != 'i' {
                    return Err(self.jeton_invalide(debut));
                }
                Token::Pi
            }

            // "sin", "cos", "avg"
            's' | 'c' | 'a' => {
                if !self.lire(2) {
                    return Ok(Lu::Fin(self.pos));
                }
                match &self.chars[debut..self.pos] {
                    ['s', 'i', 'n'] => Token::Sin,
                    ['c', 'o', 's'] => Token::Cos,
                    ['a', 'v', 'g'] => Token::Avg,
                    _ => return Err(self.jeton_invalide(debut)),
                }
            }

            _ => return Err(self.jeton_invalide(debut)),
        };

        Ok(Lu::Jeton(Jeton {
            token,
            span: Span {
                debut,
                longueur: self.pos - debut,
            },
        }))
    }

    /// Jeton suivant, sans rien consommer (position et compteur restaurés, blancs compris).
    pub fn peek(&mut self) -> Result<Lu, ParseError> {
        let (pos, compteur) = (self.pos, self.compteur);
        let lu = self.next();
        self.pos = pos;
        self.compteur = compteur;
        lu
    }

    /// Nombre de caractères lus depuis le dernier reset().
    pub fn count(&self) -> usize {
        self.compteur
    }

    pub fn reset(&mut self) {
        self.compteur = 0;
    }

    fn courant(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn avancer(&mut self) {
        self.pos += 1;
        self.compteur += 1;
    }

    /// Lit `n` caractères de plus dans le lexème courant.
    /// Faux si la ligne se termine avant (fin d’entrée, pas jeton invalide).
    fn lire(&mut self, n: usize) -> bool {
        for _ in 0..n {
            match self.courant() {
                Some(c) if c != '\n' => self.avancer(),
                _ => return false,
            }
        }
        true
    }

    fn jeton_invalide(&self, debut: usize) -> ParseError {
        ParseError::BadToken {
            position: debut + 1,
            lexeme: self.chars[debut..self.pos].iter().collect(),
        }
    }
}

/// Tous les jetons d’une ligne (jusqu’à la fin de ligne).
pub fn lire_ligne(ligne: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(ligne);
    let mut out = Vec::new();
    while let Lu::Jeton(j) = lexer.next()? {
        out.push(j.token);
    }
    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.texte())
        .collect::<Vec<_>>()
        .join(" ")
}
