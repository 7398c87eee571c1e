//! Shared colour and material helpers.

use bevy::prelude::*;

use crate::render::SlabMaterialSettings;

/// `0xRRGGBB` as an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Polished, double-sided block material.
pub fn crystal_material(settings: &SlabMaterialSettings) -> StandardMaterial {
    StandardMaterial {
        base_color: hex_color(settings.color),
        metallic: settings.metallic,
        perceptual_roughness: settings.roughness,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}
