//! Pixel-Klassifikation: Terrain, Straße oder Gebäude (Pass 1).
//!
//! Farb-Heuristiken auf dem RGBA-Sample entscheiden die Feature-Klasse.
//! Die Schwellwerte sind empirisch auf typische Stadtplan-Renderings
//! abgestimmt; die Regelkette ist erst-Treffer-gewinnt und ihre
//! Reihenfolge Teil des Vertrags.

use crate::options::{MeshOptions, SUPPRESSED_HEIGHT};
use crate::raster::{Raster, RgbaSample};

/// Semantische Klasse einer Gitterzelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Terrain,
    Road,
    Building,
}

/// Ergebnis von Pass 1: Feature-Gitter plus Roh-Höhen-Gitter,
/// beide zeilenweise in Rastergröße.
pub struct FeatureField {
    /// Feature-Klasse pro Zelle
    pub features: Vec<Feature>,
    /// Helligkeitsbasierte Roh-Höhe [0, 1] pro Zelle
    pub raw_heights: Vec<f32>,
    /// Seitenlänge des Gitters
    pub size: u32,
}

impl FeatureField {
    /// Feature an (col, row); außerhalb des Gitters Terrain (Sentinel).
    pub fn feature_at(&self, col: i32, row: i32) -> Feature {
        let n = self.size as i32;
        if col < 0 || row < 0 || col >= n || row >= n {
            return Feature::Terrain;
        }
        self.features[(row * n + col) as usize]
    }
}

/// Klassifiziert ein einzelnes RGBA-Sample.
///
/// Liefert `(Feature, Roh-Höhe)`. Ohne `remove_text` wird nie gefiltert:
/// jedes Sample ist Terrain mit reiner Helligkeits-Höhe.
pub fn classify_pixel(
    sample: RgbaSample,
    invert_height: bool,
    remove_text: bool,
) -> (Feature, f32) {
    let [r, g, b, a] = sample;
    let brightness = (r as f32 + g as f32 + b as f32) / 3.0 / 255.0;
    let raw_height = if invert_height {
        1.0 - brightness
    } else {
        brightness
    };

    if !remove_text {
        return (Feature::Terrain, raw_height);
    }

    let saturation = r.max(g).max(b) - r.min(g).min(b);
    let mean = (r as f32 + g as f32 + b as f32) / 3.0;

    // 1. Störpixel (Text-Overlays, Marker, Icons): einebnen
    let red_marker = r > 220 && g < 80 && b < 80;
    let green_marker = g > 200 && r < 150 && b < 150 && (g as i16 - r as i16) > 50;
    let saturated_icon = saturation > 130 && mean > 150.0;
    let near_black = r < 30 && g < 30 && b < 30;
    if a < 200 || red_marker || green_marker || saturated_icon || near_black {
        return (Feature::Terrain, SUPPRESSED_HEIGHT);
    }

    // 2. Straße: gelblich hervorgehobene Hauptstraßen oder helle Grautöne
    let yellow_road = r > 200 && g > 150 && b < 130;
    let pale_road = r > 210
        && g > 210
        && b > 210
        && (r as i16 - g as i16).abs() < 20
        && (g as i16 - b as i16).abs() < 20;
    if yellow_road || pale_road {
        return (Feature::Road, raw_height);
    }

    // 3. Gebäude: mittlere Helligkeit bei geringer Sättigung
    if mean > 90.0 && mean < 220.0 && saturation < 40 {
        return (Feature::Building, raw_height);
    }

    (Feature::Terrain, raw_height)
}

/// Pass 1: klassifiziert jede Zelle des Rasters.
///
/// Rein und deterministisch, kein Zell-übergreifender Zustand. Die
/// Nachbarschafts-Analyse (Pass 2) braucht das vollständige Feature-Gitter
/// und läuft deshalb als eigener Schritt dahinter.
pub fn build_feature_field(raster: &Raster, options: &MeshOptions) -> FeatureField {
    let n = raster.size();
    let cells = n as usize * n as usize;
    let mut features = Vec::with_capacity(cells);
    let mut raw_heights = Vec::with_capacity(cells);

    for row in 0..n as i32 {
        for col in 0..n as i32 {
            let (feature, raw_height) = classify_pixel(
                raster.sample(col, row),
                options.invert_height,
                options.remove_text,
            );
            features.push(feature);
            raw_heights.push(raw_height);
        }
    }

    let buildings = features.iter().filter(|f| **f == Feature::Building).count();
    let roads = features.iter().filter(|f| **f == Feature::Road).count();
    log::info!(
        "Pass 1: {} Zellen klassifiziert ({} Gebäude, {} Straße)",
        cells,
        buildings,
        roads
    );

    FeatureField {
        features,
        raw_heights,
        size: n,
    }
}
