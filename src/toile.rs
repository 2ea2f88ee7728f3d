//! src/toile.rs
//!
//! Toile RVB : trois expressions (rouge, vert, bleu) évaluées pour chaque pixel.
//!
//! Rôle :
//! - posséder le tampon de pixels (largeur × hauteur × 3 octets)
//! - peindre au hasard (profondeurs configurées) ou charger trois lignes "red= …"
//! - ramener chaque valeur [-1, 1] sur un octet
//!
//! Contrats :
//! - Un chargement raté ne touche à rien (les trois canaux sont remplacés ensemble).
//! - Le pixel (i, j) correspond à x = 2i/(largeur-1) - 1, y = 2j/(hauteur-1) - 1.

use std::fmt;
use std::io::{self, BufRead, Write};

use rand::Rng;
use thiserror::Error;

use crate::noyau::{Expression, ParseError};
use crate::reglages::Profondeurs;

/// 255/2 en division entière (-1 -> 0, 1 -> 254).
const DEMI_ECHELLE: f64 = 127.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Canal {
    Rouge,
    Vert,
    Bleu,
}

impl Canal {
    pub const TOUS: [Canal; 3] = [Canal::Rouge, Canal::Vert, Canal::Bleu];

    /// Mot-clé utilisé en entrée ("red=") comme en sortie ("red = …").
    pub fn nom(self) -> &'static str {
        match self {
            Canal::Rouge => "red",
            Canal::Vert => "green",
            Canal::Bleu => "blue",
        }
    }

    fn indice(self) -> usize {
        match self {
            Canal::Rouge => 0,
            Canal::Vert => 1,
            Canal::Bleu => 2,
        }
    }
}

#[derive(Debug, Error)]
pub enum ErreurToile {
    #[error("dimensions nulles : {largeur}×{hauteur}")]
    DimensionsNulles { largeur: usize, hauteur: usize },

    #[error("ligne « {canal}= » attendue")]
    EnteteAttendue { canal: &'static str },

    #[error("canal {canal} : {source}")]
    Analyse {
        canal: &'static str,
        #[source]
        source: ParseError,
    },

    #[error("lecture/écriture impossible : {0}")]
    Io(#[from] io::Error),
}

#[derive(Clone, Debug)]
pub struct Toile {
    largeur: usize,
    hauteur: usize,
    pixels: Vec<u8>,
    profondeurs: Profondeurs,
    canaux: [Expression; 3],
}

impl Toile {
    pub fn new(
        largeur: usize,
        hauteur: usize,
        profondeurs: Profondeurs,
    ) -> Result<Self, ErreurToile> {
        verifier_dimensions(largeur, hauteur)?;
        Ok(Self {
            largeur,
            hauteur,
            // canaux à zéro => tampon noir
            pixels: vec![0; 3 * largeur * hauteur],
            profondeurs,
            canaux: Default::default(),
        })
    }

    pub fn largeur(&self) -> usize {
        self.largeur
    }

    pub fn hauteur(&self) -> usize {
        self.hauteur
    }

    /// Tampon RVB, ligne par ligne.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn profondeurs(&self) -> Profondeurs {
        self.profondeurs
    }

    pub fn profondeur(&self, canal: Canal) -> u32 {
        self.profondeurs.get(canal)
    }

    /// Profondeur du prochain tirage (ne repeint pas).
    pub fn set_profondeur(&mut self, canal: Canal, profondeur: u32) {
        self.profondeurs.set(canal, profondeur);
    }

    pub fn expression(&self, canal: Canal) -> &Expression {
        &self.canaux[canal.indice()]
    }

    /// Nouveau tampon (ancien contenu perdu), recalculé avec les canaux actuels.
    pub fn redimensionner(&mut self, largeur: usize, hauteur: usize) -> Result<(), ErreurToile> {
        verifier_dimensions(largeur, hauteur)?;
        self.largeur = largeur;
        self.hauteur = hauteur;
        self.pixels = vec![0; 3 * largeur * hauteur];
        self.calculer();
        Ok(())
    }

    /// Trois nouvelles expressions au hasard, puis recalcul.
    pub fn peindre<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for canal in Canal::TOUS {
            self.canaux[canal.indice()] = Expression::random(self.profondeur(canal), rng);
        }
        self.calculer();
    }

    /// Remplace les trois canaux d’un coup ; les profondeurs suivent les expressions.
    pub fn remplacer(&mut self, canaux: [Expression; 3]) {
        for canal in Canal::TOUS {
            self.profondeurs.set(canal, canaux[canal.indice()].depth());
        }
        self.canaux = canaux;
        self.calculer();
    }

    /// Lit trois lignes "red= e", "green= e", "blue= e" (dans cet ordre).
    /// Expression vide => littéral zéro. Rien n’est modifié en cas d’erreur.
    pub fn charger<B: BufRead>(&mut self, mut lecteur: B) -> Result<(), ErreurToile> {
        let mut lues: [Expression; 3] = Default::default();

        for canal in Canal::TOUS {
            let mut ligne = String::new();
            if lecteur.read_line(&mut ligne)? == 0 {
                return Err(ErreurToile::EnteteAttendue { canal: canal.nom() });
            }

            let reste = ligne
                .trim_start()
                .strip_prefix(canal.nom())
                .and_then(|r| r.strip_prefix('='))
                .ok_or(ErreurToile::EnteteAttendue { canal: canal.nom() })?;

            lues[canal.indice()] =
                Expression::parse_line(reste).map_err(|source| ErreurToile::Analyse {
                    canal: canal.nom(),
                    source,
                })?;
        }

        self.remplacer(lues);
        Ok(())
    }

    /// Recalcule tout le tampon.
    pub fn calculer(&mut self) {
        let (largeur, hauteur) = (self.largeur, self.hauteur);

        for j in 0..hauteur {
            let y = coordonnee(j, hauteur);
            for i in 0..largeur {
                let x = coordonnee(i, largeur);
                let k = (i + j * largeur) * 3;
                for (c, exp) in self.canaux.iter().enumerate() {
                    self.pixels[k + c] = echelle(exp.evaluate(x, y));
                }
            }
        }
    }

    /// Image PPM binaire (P6).
    pub fn en_ppm<W: Write>(&self, mut sortie: W) -> io::Result<()> {
        write!(sortie, "P6\n{} {}\n255\n", self.largeur, self.hauteur)?;
        sortie.write_all(&self.pixels)?;
        sortie.flush()
    }
}

impl fmt::Display for Toile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for canal in Canal::TOUS {
            writeln!(f, "{} = {}", canal.nom(), self.expression(canal))?;
        }
        Ok(())
    }
}

fn verifier_dimensions(largeur: usize, hauteur: usize) -> Result<(), ErreurToile> {
    if largeur == 0 || hauteur == 0 {
        return Err(ErreurToile::DimensionsNulles { largeur, hauteur });
    }
    Ok(())
}

/// Indice de pixel -> [-1, 1] (une seule colonne/ligne => 0).
fn coordonnee(i: usize, n: usize) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    (2 * i) as f64 / (n - 1) as f64 - 1.0
}

/// Valeur [-1, 1] -> octet. 0.0 exact => 0 (noir).
pub fn echelle(valeur: f64) -> u8 {
    if valeur == 0.0 {
        return 0;
    }
    // `as u8` sature (et NaN -> 0)
    (DEMI_ECHELLE * (valeur + 1.0)) as u8
}
