//! Helligkeits-/Kontrast-Anpassung der Quelltextur.
//!
//! Läuft unabhängig vom Höhen-Pfad auf einer Kopie des Rasters.
//! Die Reihenfolge ist Teil des Vertrags: erst Helligkeit, dann Kontrast,
//! beide um Mittelgrau 128 zentriert. Der Alpha-Kanal bleibt unangetastet.

use image::RgbaImage;

use crate::raster::Raster;

/// Passt Helligkeit und Kontrast des Rasters an.
///
/// Gibt `None` zurück, wenn beide Faktoren exakt 1.0 sind — der Renderer
/// verwendet dann das unveränderte Original.
pub fn adjust_texture(raster: &Raster, brightness: f32, contrast: f32) -> Option<RgbaImage> {
    if brightness == 1.0 && contrast == 1.0 {
        return None;
    }

    let factor = 259.0 * (contrast + 255.0) / (255.0 * (259.0 - contrast));
    let mut data = raster.as_bytes().to_vec();

    for pixel in data.chunks_exact_mut(4) {
        for channel in pixel.iter_mut().take(3) {
            let shifted = ((*channel as f32 - 128.0) * brightness + 128.0).clamp(0.0, 255.0);
            let adjusted = (factor * (shifted - 128.0) + 128.0).clamp(0.0, 255.0);
            *channel = adjusted as u8;
        }
    }

    log::info!(
        "Textur angepasst: Helligkeit {:.2}, Kontrast {:.2}",
        brightness,
        contrast
    );
    RgbaImage::from_raw(raster.size(), raster.size(), data)
}
