//! src/app/etat.rs
//!
//! État UI (sans dessin).
//!
//! Rôle : contenir la toile, les trois lignes éditables, les réglages et l’erreur,
//! et offrir des opérations simples (peindre / appliquer / AC) sans logique d’affichage.
//!
//! Contrats :
//! - Appliquer est tout-ou-rien : une ligne fausse => l’image précédente reste.
//! - Le hasard vient d’une graine explicite (même graine => même suite d’images).
//! - Défense en profondeur : bornes sur profondeur et taille (reglages.rs).

use std::io::BufRead;

use eframe::egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use martiste::reglages::PROFONDEUR_MAX;
use martiste::{Canal, ErreurToile, Expression, Reglages, Toile};

pub struct AppMartiste {
    // --- entrées utilisateur (une ligne par canal : rouge, vert, bleu) ---
    pub sources: [String; 3],

    // --- paramètres ---
    pub reglages: Reglages,

    // --- sorties ---
    pub toile: Toile,
    pub erreur: String,

    // --- texture (téléversée par vue.rs quand image_a_jour == false) ---
    pub texture: Option<egui::TextureHandle>,
    pub image_a_jour: bool,

    rng: StdRng,
}

impl AppMartiste {
    /// Démarre avec une première image au hasard.
    pub fn new(reglages: Reglages) -> Result<Self, ErreurToile> {
        let reglages = reglages.borner();
        let toile = Toile::new(reglages.largeur, reglages.hauteur, reglages.profondeurs)?;

        let mut app = Self {
            sources: Default::default(),
            rng: StdRng::seed_from_u64(reglages.graine),
            reglages,
            toile,
            erreur: String::new(),
            texture: None,
            image_a_jour: false,
        };
        app.peindre();
        Ok(app)
    }

    /* ------------------------ Actions “boutons” ------------------------ */

    /// Trois nouvelles expressions au hasard (profondeurs des réglages).
    pub fn peindre(&mut self) {
        self.toile.peindre(&mut self.rng);
        self.apres_changement();
    }

    /// Analyse les trois lignes ; tout-ou-rien.
    pub fn appliquer(&mut self) {
        let mut lues: [Expression; 3] = Default::default();

        for (i, canal) in Canal::TOUS.into_iter().enumerate() {
            match Expression::parse_line(&self.sources[i]) {
                Ok(e) => lues[i] = e,
                Err(e) => {
                    self.set_erreur(format!("{} : {e}", canal.nom()));
                    return;
                }
            }
        }

        self.toile.remplacer(lues);
        self.apres_changement();
    }

    /// Lit "red= …", "green= …", "blue= …" (fichier ou entrée standard).
    pub fn charger<B: BufRead>(&mut self, lecteur: B) -> Result<(), ErreurToile> {
        self.toile.charger(lecteur)?;
        self.apres_changement();
        Ok(())
    }

    /// Esc : lignes éditées remises sur les expressions affichées.
    pub fn annuler_sources(&mut self) {
        self.sources_depuis_toile();
        self.erreur.clear();
    }

    /// AC : réglages par défaut (taille conservée), graine remise, nouvelle image.
    pub fn reset_total(&mut self) {
        let (largeur, hauteur) = (self.reglages.largeur, self.reglages.hauteur);
        self.reglages = Reglages {
            largeur,
            hauteur,
            ..Reglages::default()
        };
        for canal in Canal::TOUS {
            self.toile.set_profondeur(canal, self.reglages.profondeurs.get(canal));
        }
        self.set_graine(self.reglages.graine);
        self.peindre();
    }

    /* ------------------------ Réglages ------------------------ */

    pub fn set_profondeur(&mut self, canal: Canal, profondeur: u32) {
        let p = profondeur.min(PROFONDEUR_MAX);
        self.reglages.profondeurs.set(canal, p);
        self.toile.set_profondeur(canal, p);
    }

    /// Nouvelle graine : la suite des tirages repart de zéro.
    pub fn set_graine(&mut self, graine: u64) {
        self.reglages.graine = graine;
        self.rng = StdRng::seed_from_u64(graine);
    }

    pub fn redimensionner(&mut self, largeur: usize, hauteur: usize) {
        let r = Reglages {
            largeur,
            hauteur,
            ..self.reglages.clone()
        }
        .borner();

        match self.toile.redimensionner(r.largeur, r.hauteur) {
            Ok(()) => {
                self.reglages = r;
                self.image_a_jour = false;
            }
            Err(e) => self.set_erreur(e.to_string()),
        }
    }

    /* ------------------------ Utilitaires ------------------------ */

    /// Choix UX : on CONSERVE l’image et les lignes (pour corriger la faute).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
    }

    fn apres_changement(&mut self) {
        self.reglages.profondeurs = self.toile.profondeurs();
        self.sources_depuis_toile();
        self.erreur.clear();
        self.image_a_jour = false;
    }

    fn sources_depuis_toile(&mut self) {
        for (i, canal) in Canal::TOUS.into_iter().enumerate() {
            let e = self.toile.expression(canal);
            // le littéral zéro s’écrit comme une ligne vide
            self.sources[i] = if e.est_zero() {
                String::new()
            } else {
                e.render_infix()
            };
        }
    }
}
