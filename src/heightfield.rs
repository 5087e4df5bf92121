//! Höhenfeld-Synthese aus dem Feature-Gitter (Pass 2).
//!
//! Wendet pro Zelle die Feature-Höhenregel an. Gebäude werden über die
//! Dichte ihrer 8er-Nachbarschaft in Kern, Rand und Einzelpixel unterteilt —
//! dafür muss das Feature-Gitter aus Pass 1 vollständig vorliegen, die
//! beiden Pässe dürfen nie verschmolzen werden.

use crate::classify::{Feature, FeatureField};
use crate::options::{
    BUILDING_CORE_HEIGHT, BUILDING_CORE_HEIGHT_INVERTED, BUILDING_CORE_NEIGHBORS,
    BUILDING_EDGE_HEIGHT, BUILDING_EDGE_HEIGHT_INVERTED, BUILDING_EDGE_NEIGHBORS,
    BUILDING_ISOLATED_BASE, BUILDING_ISOLATED_RAW_WEIGHT, ROAD_HEIGHT, TERRAIN_COMPRESSION,
};

/// Finales Höhenfeld, Werte in [0, 1] vor der Höhenskala.
#[derive(Debug, Clone)]
pub struct HeightField {
    /// Höhenwerte pro Zelle, zeilenweise
    pub values: Vec<f32>,
    /// Seitenlänge des Gitters
    pub size: u32,
}

impl HeightField {
    /// Höhenwert an (col, row).
    pub fn at(&self, col: u32, row: u32) -> f32 {
        self.values[(row * self.size + col) as usize]
    }
}

/// Zählt Gebäude-Zellen in der 8er-Nachbarschaft.
///
/// Nur Zellen innerhalb des Gitters zählen; Randzellen haben
/// entsprechend weniger mögliche Nachbarn.
fn building_neighbors(field: &FeatureField, col: i32, row: i32) -> u8 {
    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if field.feature_at(col + dc, row + dr) == Feature::Building {
                count += 1;
            }
        }
    }
    count
}

/// Pass 2: Feature-Höhenregeln auf das komplette Gitter.
///
/// - Straße: flache Fahrbahn, unabhängig von Nachbarn und Roh-Höhe.
/// - Gebäude: Kern (≥5 Nachbarn), Rand (3–4) oder Einzelpixel (<3);
///   Kern und Rand tauschen bei `invert_height` die Höhenstufen,
///   Einzelpixel bekommen Sockel plus Rest-Helligkeit.
/// - Terrain: gestauchte Roh-Höhe.
pub fn resolve_height_field(field: &FeatureField, invert_height: bool) -> HeightField {
    let n = field.size as i32;
    let mut values = vec![0.0f32; field.features.len()];

    for row in 0..n {
        for col in 0..n {
            let index = (row * n + col) as usize;
            let height = match field.features[index] {
                Feature::Road => ROAD_HEIGHT,
                Feature::Building => {
                    let neighbors = building_neighbors(field, col, row);
                    if neighbors >= BUILDING_CORE_NEIGHBORS {
                        if invert_height {
                            BUILDING_CORE_HEIGHT_INVERTED
                        } else {
                            BUILDING_CORE_HEIGHT
                        }
                    } else if neighbors >= BUILDING_EDGE_NEIGHBORS {
                        if invert_height {
                            BUILDING_EDGE_HEIGHT_INVERTED
                        } else {
                            BUILDING_EDGE_HEIGHT
                        }
                    } else {
                        BUILDING_ISOLATED_BASE
                            + field.raw_heights[index] * BUILDING_ISOLATED_RAW_WEIGHT
                    }
                }
                Feature::Terrain => field.raw_heights[index] * TERRAIN_COMPRESSION,
            };
            values[index] = height.clamp(0.0, 1.0);
        }
    }

    log::info!("Pass 2: Höhenfeld {}x{} aufgelöst", n, n);
    HeightField {
        values,
        size: field.size,
    }
}
