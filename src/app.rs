// src/app.rs
//
// Martiste : module App (racine)
// ------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppMartiste (pour main.rs: use app::AppMartiste;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - La gestion Enter est faite dans vue.rs (quand une ligne a le focus).

pub mod etat;
pub mod vue;

pub use etat::AppMartiste;

use eframe::egui;

impl eframe::App for AppMartiste {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = lignes remises sur les expressions affichées (l’image ne bouge pas).
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.annuler_sources();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
