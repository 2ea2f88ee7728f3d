// src/app/vue.rs
//
// Vue (UI egui) : natif + web
// ---------------------------
// Objectifs :
// - Même AppMartiste (etat.rs) pour natif + wasm
// - Trois lignes éditables (rouge, vert, bleu) : Enter applique
// - Réglages : profondeur par canal, graine, taille
// - Image : texture egui, téléversée seulement quand la toile a changé

use eframe::egui;

use martiste::noyau::jetons::{format_tokens, lire_ligne};
use martiste::reglages::{PROFONDEUR_MAX, TAILLE_MAX};
use martiste::Canal;

use super::etat::AppMartiste;

impl AppMartiste {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Martiste");
                ui.add_space(6.0);

                self.ui_sources(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_reglages(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_image(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_sources(&mut self, ui: &mut egui::Ui) {
        let mut appliquer = false;

        egui::Grid::new("sources_rvb")
            .num_columns(2)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, canal) in Canal::TOUS.into_iter().enumerate() {
                    ui.label(format!("{} =", canal.nom()));
                    let resp = ui.add(
                        egui::TextEdit::singleline(&mut self.sources[i])
                            .desired_width(ui.available_width())
                            .hint_text("Ex: avg(sin(pi*x), (x*y))")
                            .id_salt(("source", i))
                            .code_editor(),
                    );
                    // singleline : Enter rend le focus
                    if resp.lost_focus() && ui.input(|inp| inp.key_pressed(egui::Key::Enter)) {
                        appliquer = true;
                    }
                    ui.end_row();
                }
            });

        if appliquer {
            self.appliquer();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if bouton(ui, "Peindre", "Trois nouvelles expressions au hasard") {
                self.peindre();
            }
            if bouton(ui, "Appliquer", "Analyse les trois lignes") {
                self.appliquer();
            }
            if bouton(ui, "AC", "Réglages par défaut + nouvelle image") {
                self.reset_total();
            }
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Profondeurs :");
            for canal in Canal::TOUS {
                let mut d = self.reglages.profondeurs.get(canal);
                let resp = ui.add(
                    egui::DragValue::new(&mut d)
                        .speed(0.1)
                        .range(0..=PROFONDEUR_MAX)
                        .prefix(format!("{} ", canal.nom())),
                );
                if resp.changed() {
                    self.set_profondeur(canal, d);
                }
            }

            ui.separator();

            ui.label("Graine :");
            let mut g = self.reglages.graine;
            if ui.add(egui::DragValue::new(&mut g).speed(1)).changed() {
                self.set_graine(g);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Taille :");
            let (mut l, mut h) = (self.reglages.largeur, self.reglages.hauteur);
            let rl = ui.add(egui::DragValue::new(&mut l).speed(4).range(1..=TAILLE_MAX));
            ui.label("×");
            let rh = ui.add(egui::DragValue::new(&mut h).speed(4).range(1..=TAILLE_MAX));

            // recalcul seulement au relâchement (une image 4096² coûte cher)
            if rl.drag_stopped() || rh.drag_stopped() || rl.lost_focus() || rh.lost_focus() {
                if (l, h) != (self.reglages.largeur, self.reglages.hauteur) {
                    self.redimensionner(l, h);
                }
            } else if rl.changed() || rh.changed() {
                self.reglages.largeur = l;
                self.reglages.hauteur = h;
            }
        });
    }

    fn ui_image(&mut self, ui: &mut egui::Ui) {
        self.rafraichir_texture(ui.ctx());

        let Some(texture) = &self.texture else {
            return;
        };

        let (l, h) = (self.toile.largeur() as f32, self.toile.hauteur() as f32);
        let largeur = ui.available_width().min(l.max(256.0));
        let taille = egui::vec2(largeur, largeur * h / l);

        ui.image(egui::load::SizedTexture::new(texture.id(), taille));
    }

    fn rafraichir_texture(&mut self, ctx: &egui::Context) {
        if self.image_a_jour && self.texture.is_some() {
            return;
        }

        let image = egui::ColorImage::from_rgb(
            [self.toile.largeur(), self.toile.hauteur()],
            self.toile.pixels(),
        );
        // pixels nets quand l’image est agrandie
        let options = egui::TextureOptions::NEAREST;

        if let Some(texture) = self.texture.as_mut() {
            texture.set(image, options);
        } else {
            self.texture = Some(ctx.load_texture("toile", image, options));
        }
        self.image_a_jour = true;
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| {
                for (i, canal) in Canal::TOUS.into_iter().enumerate() {
                    let e = self.toile.expression(canal);
                    ui.add_space(4.0);
                    ui.label(format!("{} (profondeur {}) :", canal.nom(), e.depth()));
                    // jetons de la ligne éditée (pas forcément appliquée)
                    let jetons = match lire_ligne(&self.sources[i]) {
                        Ok(t) => format_tokens(&t),
                        Err(err) => err.to_string(),
                    };
                    champ_monospace(ui, ("jetons", canal.nom()), &jetons);
                    champ_monospace(ui, ("infixe", canal.nom()), &e.render_infix());
                    champ_monospace(ui, ("rpn", canal.nom()), &e.format_rpn());
                }
            });
    }
}

fn champ_monospace(ui: &mut egui::Ui, id: impl std::hash::Hash, contenu: &str) {
    // Affichage lecture seule, cadre visuel via Frame + Label monospace.
    egui::Frame::group(ui.style())
        .fill(ui.visuals().extreme_bg_color)
        .show(ui, |ui| {
            ui.push_id(id, |ui| {
                ui.set_min_width(ui.available_width());
                ui.monospace(contenu);
            });
        });
}

fn bouton(ui: &mut egui::Ui, label: &str, tip: &str) -> bool {
    ui.add_sized([88.0, 30.0], egui::Button::new(label))
        .on_hover_text(tip)
        .clicked()
}
