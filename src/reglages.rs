//! src/reglages.rs
//!
//! Réglages de l’image : taille, profondeur de chaque canal, graine.
//!
//! Contrats :
//! - Valeurs par défaut : 8 / 7 / 6, image 512×512.
//! - Défense en profondeur : bornes sur la taille et la profondeur
//!   (une profondeur d peut produire jusqu’à 2^(d-1) feuilles).

use crate::toile::Canal;

/// Profondeurs par défaut (rouge, vert, bleu).
const PROFONDEURS_DEFAUT: (u32, u32, u32) = (8, 7, 6);

/// Taille par défaut (pixels).
const TAILLE_DEFAUT: usize = 512;

/// Garde-fou : profondeur maximale (anti-gel).
pub const PROFONDEUR_MAX: u32 = 20;

/// Garde-fou : côté maximal de l’image.
pub const TAILLE_MAX: usize = 4096;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Profondeurs {
    pub rouge: u32,
    pub vert: u32,
    pub bleu: u32,
}

impl Default for Profondeurs {
    fn default() -> Self {
        let (rouge, vert, bleu) = PROFONDEURS_DEFAUT;
        Self { rouge, vert, bleu }
    }
}

impl Profondeurs {
    pub fn get(&self, canal: Canal) -> u32 {
        match canal {
            Canal::Rouge => self.rouge,
            Canal::Vert => self.vert,
            Canal::Bleu => self.bleu,
        }
    }

    pub fn set(&mut self, canal: Canal, profondeur: u32) {
        match canal {
            Canal::Rouge => self.rouge = profondeur,
            Canal::Vert => self.vert = profondeur,
            Canal::Bleu => self.bleu = profondeur,
        }
    }

    pub fn borner(self) -> Self {
        Self {
            rouge: self.rouge.min(PROFONDEUR_MAX),
            vert: self.vert.min(PROFONDEUR_MAX),
            bleu: self.bleu.min(PROFONDEUR_MAX),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reglages {
    pub largeur: usize,
    pub hauteur: usize,
    pub profondeurs: Profondeurs,
    pub graine: u64,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            largeur: TAILLE_DEFAUT,
            hauteur: TAILLE_DEFAUT,
            profondeurs: Profondeurs::default(),
            graine: 0,
        }
    }
}

impl Reglages {
    /// Ramène chaque valeur dans ses bornes (taille 1..=TAILLE_MAX).
    pub fn borner(self) -> Self {
        Self {
            largeur: self.largeur.clamp(1, TAILLE_MAX),
            hauteur: self.hauteur.clamp(1, TAILLE_MAX),
            profondeurs: self.profondeurs.borner(),
            graine: self.graine,
        }
    }
}
