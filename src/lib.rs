//! `map_relief` — Wandelt Karten-Rasterbilder in klassifizierte 3D-Terrain-Meshes.
//!
//! Aus einem RGBA-Raster entsteht in klar getrennten Stufen ein Gitter-Mesh:
//! - Pixel-Klassifikation (Terrain, Straße, Gebäude) per Farb-Heuristik
//! - Höhenfeld-Synthese mit Gebäudedichte-Analyse (8er-Nachbarschaft)
//! - Optionale Box-Blur-Glättung des Höhenfelds
//! - Optionale Helligkeits-/Kontrast-Anpassung der Textur
//! - Reguläres Gitter-Mesh mit Normalen, UVs und Dreiecks-Indizes
//!
//! Bildupload, Szene, Kamera, Renderer und Mesh-Export sind Sache des
//! Aufrufers — die Crate rechnet nur: Raster + Optionen → Geometrie.
//!
//! # Beispiel
//! ```no_run
//! use map_relief::{MeshOptions, Raster, generate_terrain_mesh};
//!
//! let options = MeshOptions::default();
//! let raster = Raster::load("stadtplan.png", options.segments)?;
//! let output = generate_terrain_mesh(&raster, &options)?;
//! println!("{} Dreiecke", output.mesh.triangle_count());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod classify;
pub mod heightfield;
pub mod mesh;
pub mod options;
pub mod raster;
pub mod smooth;
pub mod texture;

use anyhow::{Result, ensure};
use image::RgbaImage;

pub use classify::{Feature, FeatureField};
pub use heightfield::HeightField;
pub use mesh::TerrainMesh;
pub use options::MeshOptions;
pub use raster::Raster;

/// Ergebnis eines Pipeline-Durchlaufs.
///
/// Gehört exklusiv dem Aufrufer; die Pipeline behält nichts zurück.
pub struct TerrainOutput {
    /// Das fertige Gitter-Mesh (Positionen, Normalen, UVs, Indizes)
    pub mesh: TerrainMesh,
    /// Angepasste Textur, falls Helligkeit/Kontrast ≠ 1 (sonst Original verwenden)
    pub texture: Option<RgbaImage>,
    /// Sampling-Filter-Flag für den Renderer (reine Durchreichung)
    pub texture_smoothing: bool,
}

/// Führt die komplette Pipeline aus: Raster + Optionen → Mesh (+ Textur).
///
/// Reine Funktion ohne Crate-internen Zustand. Bei jeder Parameteränderung
/// ruft der Aufrufer erneut auf und verwirft das alte Ergebnis; veraltete
/// laufende Berechnungen abzubrechen ist ebenfalls seine Sache.
pub fn generate_terrain_mesh(raster: &Raster, options: &MeshOptions) -> Result<TerrainOutput> {
    let n = raster.size();
    ensure!(
        n >= 2,
        "Raster {}x{} ist zu klein für ein Gitter-Mesh (Minimum 2x2)",
        n,
        n
    );
    if options.segments != n {
        log::warn!(
            "Optionen nennen {} Segmente, Raster hat {} — die Rastergröße gewinnt",
            options.segments,
            n
        );
    }
    log::info!("Pipeline-Start: {}x{} Raster", n, n);

    // Pass 1: Klassifikation + Roh-Höhen
    let field = classify::build_feature_field(raster, options);

    // Pass 2: Feature-Regeln + Gebäudedichte → finales Höhenfeld
    let mut heights = heightfield::resolve_height_field(&field, options.invert_height);

    // Optionale Glättung (liest nur das ungeglättete Feld)
    if options.vertex_smoothing > 0.0 {
        heights = smooth::smooth_height_field(&heights, options.vertex_smoothing);
    }

    // Mesh-Aufbau inklusive starrer Platzierung
    let mesh = mesh::build_terrain_mesh(&heights, options)?;

    // Textur-Anpassung, unabhängig vom Höhen-Pfad
    let texture = texture::adjust_texture(raster, options.brightness, options.contrast);

    log::info!(
        "Pipeline fertig: {} Vertices, {} Dreiecke",
        mesh.positions.len(),
        mesh.triangle_count()
    );

    Ok(TerrainOutput {
        mesh,
        texture,
        texture_smoothing: options.texture_smoothing,
    })
}
