// src/main.rs
//
// Martiste : point d’entrée NATIF + WEB (WASM)
// --------------------------------------------
// But:
// - NATIF : options en ligne de commande (clap), puis fenêtre eframe
//           ou rendu sans fenêtre (--sortie image.ppm)
// - WEB   : eframe::WebRunner + WebOptions + <canvas>, réglages par défaut
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppMartiste;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Martiste";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
mod natif {
    use std::error::Error;
    use std::fs::File;
    use std::io::{self, BufRead, BufReader, BufWriter};
    use std::path::{Path, PathBuf};
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use martiste::reglages::Profondeurs;
    use martiste::{Reglages, Toile};

    /// Art aléatoire : trois expressions en x, y pour le rouge, le vert et le bleu.
    #[derive(Parser, Debug)]
    #[command(name = "martiste", version)]
    pub struct Options {
        /// Largeur de l’image (pixels)
        #[arg(long, default_value_t = Reglages::default().largeur)]
        pub largeur: usize,

        /// Hauteur de l’image (pixels)
        #[arg(long, default_value_t = Reglages::default().hauteur)]
        pub hauteur: usize,

        /// Profondeur du canal rouge
        #[arg(long, default_value_t = Profondeurs::default().rouge)]
        pub rouge: u32,

        /// Profondeur du canal vert
        #[arg(long, default_value_t = Profondeurs::default().vert)]
        pub vert: u32,

        /// Profondeur du canal bleu
        #[arg(long, default_value_t = Profondeurs::default().bleu)]
        pub bleu: u32,

        /// Graine du hasard (défaut : l’heure courante)
        #[arg(long)]
        pub graine: Option<u64>,

        /// Trois lignes "red= …", "green= …", "blue= …" ("-" = entrée standard)
        #[arg(long, value_name = "FICHIER")]
        pub expressions: Option<PathBuf>,

        /// Écrit l’image (PPM binaire) sans ouvrir de fenêtre
        #[arg(long, value_name = "FICHIER.ppm")]
        pub sortie: Option<PathBuf>,
    }

    impl Options {
        pub fn reglages(&self) -> Reglages {
            Reglages {
                largeur: self.largeur,
                hauteur: self.hauteur,
                profondeurs: Profondeurs {
                    rouge: self.rouge,
                    vert: self.vert,
                    bleu: self.bleu,
                },
                graine: self.graine.unwrap_or_else(graine_horloge),
            }
            .borner()
        }

        /// Lecteur des expressions demandées, s’il y en a.
        pub fn lecteur(&self) -> io::Result<Option<Box<dyn BufRead>>> {
            let Some(chemin) = &self.expressions else {
                return Ok(None);
            };
            if chemin.as_os_str() == "-" {
                return Ok(Some(Box::new(io::stdin().lock())));
            }
            Ok(Some(Box::new(BufReader::new(File::open(chemin)?))))
        }
    }

    fn graine_horloge() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    /// Rendu sans fenêtre : image PPM + les trois expressions sur la sortie standard.
    pub fn rendu_sans_fenetre(
        reglages: &Reglages,
        lecteur: Option<Box<dyn BufRead>>,
        sortie: &Path,
    ) -> Result<(), Box<dyn Error>> {
        let mut toile = Toile::new(reglages.largeur, reglages.hauteur, reglages.profondeurs)?;

        match lecteur {
            Some(l) => toile.charger(l)?,
            None => toile.peindre(&mut StdRng::seed_from_u64(reglages.graine)),
        }

        toile.en_ppm(BufWriter::new(File::create(sortie)?))?;
        print!("{toile}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use clap::Parser;

    let options = natif::Options::parse();
    let reglages = options.reglages();
    let lecteur = options.lecteur()?;

    if let Some(sortie) = &options.sortie {
        return natif::rendu_sans_fenetre(&reglages, lecteur, sortie);
    }

    // Lecture avant la fenêtre : une erreur de fichier s’affiche dans le terminal.
    let mut app = AppMartiste::new(reglages)?;
    if let Some(l) = lecteur {
        app.charger(l)?;
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([640.0, 900.0])
            .with_min_inner_size([420.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        native_options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )?;
    Ok(())
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppMartiste, TITRE_APP};

    use martiste::Reglages;
    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        // Pas d’horloge fiable ici : graine 0, l’utilisateur la change dans l’UI.
        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| Ok(Box::new(AppMartiste::new(Reglages::default())?))),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
