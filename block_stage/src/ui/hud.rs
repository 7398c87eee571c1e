//! HUD overlay: day summary, hovered block, camera depth, FPS counter.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPlugin};
use chrono::NaiveDate;

use crate::data::DayBlocks;
use crate::scene::{BlockSlab, HoveredBlock};
use crate::stage::{CameraMoved, StageController};

const SATOSHI_PER_BTC: f64 = 100_000_000.0;

/// Live HUD state, refreshed whenever a day lands on stage.
#[derive(Resource, Default)]
pub struct HudState {
    pub day: Option<NaiveDate>,
    pub block_count: usize,
    pub total_fee: u64,
    pub mean_tx_count: f64,
    /// TH/s, as charted.
    pub hash_rate: Option<f64>,
    pub camera_moves: u64,
}

impl HudState {
    pub fn update_from_day(&mut self, day: &DayBlocks) {
        self.day = Some(day.day);
        self.block_count = day.blocks.len();
        self.total_fee = day.total_fee();
        self.mean_tx_count = day.mean_tx_count();
        self.hash_rate = day.hash_rate;
    }
}

pub fn hud_plugin(app: &mut App) {
    app.add_plugins(EguiPlugin)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .init_resource::<HudState>()
        .add_systems(Update, (count_camera_moves, hud_overlay_system));
}

fn count_camera_moves(mut moved: EventReader<CameraMoved>, mut hud: ResMut<HudState>) {
    hud.camera_moves += moved.read().count() as u64;
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    hud: Res<HudState>,
    controller: Res<StageController>,
    diagnostics: Res<DiagnosticsStore>,
    hovered: Option<Res<HoveredBlock>>,
    slabs: Query<&BlockSlab>,
) {
    let hovered_slab = hovered
        .and_then(|hovered| hovered.entity)
        .and_then(|entity| slabs.get(entity).ok());
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);
    let (current_bucket, target_bucket) = controller.depth_buckets();

    egui::Window::new("Block Stage")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            let title = hud
                .day
                .map_or_else(|| "Loading…".to_string(), |day| day.format("%a %d %b %Y").to_string());
            ui.label(
                egui::RichText::new(title)
                    .size(16.0)
                    .color(egui::Color32::from_rgb(253, 128, 84)),
            );
            ui.add_space(4.0);

            ui.label(format!("Blocks {}", hud.block_count));
            ui.label(format!("Fees   {}", format_btc(hud.total_fee)));
            ui.label(format!("Avg txns/block  {:.0}", hud.mean_tx_count));
            if let Some(rate) = hud.hash_rate {
                ui.label(format!("Hash rate  {}", format_hash_rate(rate)));
            }
            ui.add_space(4.0);

            if let Some(slab) = hovered_slab {
                ui.separator();
                ui.label(
                    egui::RichText::new(format!("Block #{}", slab.height))
                        .color(egui::Color32::WHITE),
                );
                ui.label(short_hash(&slab.hash));
                ui.label(format!("Txns {}  Fee {}", slab.n_tx, format_btc(slab.fee)));
            }

            ui.separator();
            ui.label(format!("Depth  {current_bucket} → {target_bucket}"));
            ui.label(format!("Camera moves  {}", hud.camera_moves));
            ui.label(format!("FPS  {fps:.0}"));
        });
}

fn format_btc(satoshi: u64) -> String {
    format!("{:.4} BTC", satoshi as f64 / SATOSHI_PER_BTC)
}

fn short_hash(hash: &str) -> String {
    match hash.get(..16) {
        Some(head) if hash.len() > 16 => format!("{head}…"),
        _ => hash.to_string(),
    }
}

fn format_hash_rate(terahash: f64) -> String {
    if terahash >= 1_000_000.0 {
        format!("{:.2} EH/s", terahash / 1_000_000.0)
    } else if terahash >= 1_000.0 {
        format!("{:.2} PH/s", terahash / 1_000.0)
    } else {
        format!("{terahash:.2} TH/s")
    }
}
