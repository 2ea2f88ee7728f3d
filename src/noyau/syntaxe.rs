// src/noyau/syntaxe.rs
//
// Validation de la grammaire (descente récursive, un jeton d’avance) :
//
//   expr := x | y
//         | '(' expr '*' expr ')'
//         | 'sin' '(' 'pi' '*' expr ')'
//         | 'cos' '(' 'pi' '*' expr ')'
//         | 'avg' '(' expr ',' expr ')'
//
// Règles:
// - la suite infixe validée est accumulée dans `infixe`, puis passée à rpn::to_rpn
// - après un opérande ou une ')', seul '*', ',' ou ')' (ou la fin de ligne) peut suivre
// - fin de ligne au milieu d’une production => Incomplete
// - les erreurs lexicales de la ligne passent avant les erreurs de syntaxe

use super::erreur::ParseError;
use super::jetons::{Jeton, Lexer, Lu, Token};
use super::rpn::{to_rpn, Symbole};

/// Garde-fou : imbrication maximale acceptée (évite un débordement de pile).
pub const MAX_IMBRICATION: usize = 256;

pub struct Parser {
    lexer: Lexer,
    infixe: Vec<Token>,
    nb_par: usize,
    imbrication: usize,
}

impl Parser {
    pub fn new(ligne: &str) -> Self {
        Self {
            lexer: Lexer::new(ligne),
            infixe: Vec::new(),
            nb_par: 0,
            imbrication: 0,
        }
    }

    /// Analyse la ligne complète et renvoie la suite RPN.
    /// Ligne vide (ou blanche) => littéral de profondeur 0.
    pub fn parse(mut self) -> Result<Vec<Symbole>, ParseError> {
        self.balayage_lexical()?;

        if let Lu::Fin(_) = self.lexer.peek()? {
            return Ok(vec![Symbole::Zero]);
        }

        self.expression()?;

        // Une seule expression par ligne
        if let Lu::Jeton(j) = self.lexer.next()? {
            return Err(erreur_syntaxe(j));
        }
        debug_assert_eq!(self.nb_par, 0);

        Ok(to_rpn(&self.infixe))
    }

    /// Jetons validés jusqu’ici (ordre infixe).
    pub fn infixe(&self) -> &[Token] {
        &self.infixe
    }

    fn balayage_lexical(&self) -> Result<(), ParseError> {
        let mut lexer = self.lexer.clone();
        while let Lu::Jeton(_) = lexer.next()? {}
        Ok(())
    }

    fn expression(&mut self) -> Result<(), ParseError> {
        let j = self.suivant()?;

        self.imbrication += 1;
        if self.imbrication > MAX_IMBRICATION {
            return Err(ParseError::TooDeep {
                position: j.span.position(),
            });
        }

        match j.token {
            Token::X | Token::Y => {
                self.infixe.push(j.token);
                self.verifier_suite()?;
            }

            // (expr * expr)
            Token::OpenParen => {
                self.ouvrir(j);
                self.sous_expression()?;
                self.attendre(Token::Times)?;
                self.sous_expression()?;
                self.fermer()?;
            }

            // sin(pi * expr) / cos(pi * expr)
            Token::Sin | Token::Cos => {
                self.infixe.push(j.token);
                self.attendre(Token::OpenParen)?;
                self.attendre(Token::Pi)?;
                self.attendre(Token::Times)?;
                self.sous_expression()?;
                self.fermer()?;
            }

            // avg(expr , expr)
            Token::Avg => {
                self.infixe.push(j.token);
                self.attendre(Token::OpenParen)?;
                self.sous_expression()?;
                self.attendre(Token::Comma)?;
                self.sous_expression()?;
                self.fermer()?;
            }

            _ => return Err(erreur_syntaxe(j)),
        }

        self.imbrication -= 1;
        Ok(())
    }

    /// Refuse tout de suite un jeton qui ne peut pas ouvrir une expression,
    /// avant de descendre.
    fn sous_expression(&mut self) -> Result<(), ParseError> {
        match self.lexer.peek()? {
            Lu::Jeton(j) if !j.token.ouvre_expression() => Err(erreur_syntaxe(j)),
            _ => self.expression(),
        }
    }

    /// Consomme le jeton attendu et l’ajoute à la suite infixe.
    fn attendre(&mut self, attendu: Token) -> Result<(), ParseError> {
        let j = self.suivant()?;
        if j.token != attendu {
            return Err(erreur_syntaxe(j));
        }
        if attendu == Token::OpenParen {
            self.ouvrir(j);
        } else {
            self.infixe.push(j.token);
        }
        Ok(())
    }

    fn ouvrir(&mut self, j: Jeton) {
        self.nb_par += 1;
        self.infixe.push(j.token);
    }

    fn fermer(&mut self) -> Result<(), ParseError> {
        let j = self.suivant()?;
        if j.token != Token::CloseParen {
            return Err(erreur_syntaxe(j));
        }
        self.nb_par -= 1;
        self.infixe.push(j.token);
        self.verifier_suite()
    }

    /// Après un opérande ou une ')' : '*', ',', ')' ou fin de ligne.
    fn verifier_suite(&mut self) -> Result<(), ParseError> {
        match self.lexer.peek()? {
            Lu::Fin(_) => Ok(()),
            Lu::Jeton(j) => match j.token {
                Token::Times | Token::Comma | Token::CloseParen => Ok(()),
                _ => Err(erreur_syntaxe(j)),
            },
        }
    }

    /// Jeton suivant ; la fin de ligne ici veut dire expression inachevée.
    fn suivant(&mut self) -> Result<Jeton, ParseError> {
        match self.lexer.next()? {
            Lu::Jeton(j) => Ok(j),
            Lu::Fin(consommes) => Err(ParseError::Incomplete {
                position: consommes + 1,
            }),
        }
    }
}

fn erreur_syntaxe(j: Jeton) -> ParseError {
    ParseError::Syntax {
        position: j.span.position(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rpn(ligne: &str) -> Vec<&'static str> {
        Parser::new(ligne)
            .parse()
            .unwrap_or_else(|e| panic!("parse({ligne:?}) erreur: {e}"))
            .into_iter()
            .map(|s| s.texte())
            .collect()
    }

    #[rstest]
    #[case("x", &["x"])]
    #[case("  y  ", &["y"])]
    #[case("(x*y)", &["x", "y", "*"])]
    #[case("avg(x,y)", &["x", "y", "avg"])]
    #[case("sin(pi*x)", &["pi", "x", "*", "sin"])]
    #[case("cos( pi * (x*y) )", &["pi", "x", "y", "*", "*", "cos"])]
    #[case("avg(sin(pi*x),(y*x))", &["pi", "x", "*", "sin", "y", "x", "*", "avg"])]
    #[case("", &["0"])]
    #[case(" \t ", &["0"])]
    #[case("x p", &["x"])]
    #[case("x\n)))", &["x"])]
    fn lignes_valides(#[case] ligne: &str, #[case] attendu: &[&str]) {
        assert_eq!(rpn(ligne), attendu);
    }

    #[rstest]
    #[case("x*", 2)]
    #[case("x)", 2)]
    #[case("xy", 2)]
    #[case("x y", 3)]
    #[case("pi", 1)]
    #[case("*", 1)]
    #[case("(*x)", 2)]
    #[case("(x,y)", 3)]
    #[case("(x*pi)", 4)]
    #[case("(x*y)x", 6)]
    #[case("sin(x)", 5)]
    #[case("sin pi", 5)]
    #[case("cos(pi,x)", 7)]
    #[case("avg(x*y)", 6)]
    #[case("avg(x,)", 7)]
    #[case("avg(x,y,x)", 8)]
    #[case("(x*y)(x*y)", 6)]
    #[case("sin(pi*x)avg(x,y)", 10)]
    fn erreurs_de_syntaxe(#[case] ligne: &str, #[case] position: usize) {
        assert_eq!(
            Parser::new(ligne).parse(),
            Err(ParseError::Syntax { position }),
            "ligne={ligne:?}"
        );
    }

    #[rstest]
    #[case("(x*", 4)]
    #[case("(x*y", 5)]
    #[case("avg(x,", 7)]
    #[case("sin", 4)]
    #[case("sin(pi*x", 9)]
    #[case("(x* ", 5)]
    #[case("(x*p", 5)]
    #[case("(x*y\n)", 5)]
    fn expressions_incompletes(#[case] ligne: &str, #[case] position: usize) {
        assert_eq!(
            Parser::new(ligne).parse(),
            Err(ParseError::Incomplete { position }),
            "ligne={ligne:?}"
        );
    }

    #[test]
    fn erreur_lexicale_prioritaire() {
        assert_eq!(
            Parser::new("ping").parse(),
            Err(ParseError::BadToken {
                position: 3,
                lexeme: "n".into()
            })
        );
        // Même si la syntaxe casse avant
        assert_eq!(
            Parser::new(") x # y").parse(),
            Err(ParseError::BadToken {
                position: 5,
                lexeme: "#".into()
            })
        );
    }

    #[test]
    fn suite_infixe_accumulee() {
        let mut p = Parser::new("avg(x,(y*x))");
        p.expression().unwrap();
        assert_eq!(
            p.infixe(),
            &[
                Token::Avg,
                Token::OpenParen,
                Token::X,
                Token::Comma,
                Token::OpenParen,
                Token::Y,
                Token::Times,
                Token::X,
                Token::CloseParen,
                Token::CloseParen,
            ]
        );
        assert_eq!(p.nb_par, 0);
    }

    #[test]
    fn imbrication_bornee() {
        let n = MAX_IMBRICATION + 1;
        let ligne = format!("{}x{}", "sin(pi*".repeat(n), ")".repeat(n));
        assert!(matches!(
            Parser::new(&ligne).parse(),
            Err(ParseError::TooDeep { .. })
        ));

        let n = MAX_IMBRICATION - 1;
        let ligne = format!("{}x{}", "sin(pi*".repeat(n), ")".repeat(n));
        assert!(Parser::new(&ligne).parse().is_ok());
    }
}
