//! Zentrale Konfiguration der Mesh-Pipeline.
//!
//! `MeshOptions` enthält alle pro Durchlauf konstanten Parameter; jede
//! Änderung löst beim Aufrufer einen kompletten Neuaufbau aus. Die
//! `const`-Werte dokumentieren Defaults und praktische Regler-Grenzen —
//! erzwungen wird nur die Mindestauflösung für eine Gitter-Topologie.

use serde::{Deserialize, Serialize};

// ── Auflösung ───────────────────────────────────────────────────────

/// Standard-Auflösung des Sampling-Gitters (Samples pro Seite).
pub const SEGMENTS_DEFAULT: u32 = 400;
/// Untere Regler-Grenze der Auflösung.
pub const SEGMENTS_MIN: u32 = 100;
/// Obere Regler-Grenze der Auflösung (größte beobachtete Konfiguration).
pub const SEGMENTS_MAX: u32 = 2370;
/// Harte Untergrenze: unter 2×2 existiert keine Gitter-Topologie.
pub const SEGMENTS_FLOOR: u32 = 2;

// ── Höhen ───────────────────────────────────────────────────────────

/// Standard-Höhenskala (normierte Höhe × Skala = Y-Weltkoordinate).
pub const HEIGHT_SCALE_DEFAULT: f32 = 50.0;
/// Untere Regler-Grenze; negativ = Senken statt Erhebungen.
pub const HEIGHT_SCALE_MIN: f32 = -100.0;
/// Obere Regler-Grenze der Höhenskala.
pub const HEIGHT_SCALE_MAX: f32 = 100.0;

/// Kantenlänge des Mesh-Footprints in Welteinheiten.
pub const MESH_FOOTPRINT: f32 = 200.0;

// ── Feature-Höhenregeln ─────────────────────────────────────────────

/// Fahrbahn-Höhe (flach, nachbarschaftsunabhängig).
pub const ROAD_HEIGHT: f32 = 0.05;
/// Roh-Höhe unterdrückter Störpixel (Text, Marker, Icons).
pub const SUPPRESSED_HEIGHT: f32 = 0.05;
/// Gebäudekern-Höhe (normal / invertiert).
pub const BUILDING_CORE_HEIGHT: f32 = 0.8;
pub const BUILDING_CORE_HEIGHT_INVERTED: f32 = 0.2;
/// Gebäuderand-Höhe (normal / invertiert).
pub const BUILDING_EDGE_HEIGHT: f32 = 0.6;
pub const BUILDING_EDGE_HEIGHT_INVERTED: f32 = 0.4;
/// Ab so vielen Gebäude-Nachbarn gilt eine Zelle als Kern bzw. Rand.
pub const BUILDING_CORE_NEIGHBORS: u8 = 5;
pub const BUILDING_EDGE_NEIGHBORS: u8 = 3;
/// Höhensockel für isolierte Gebäudepixel plus Gewicht des Rest-Helligkeitssignals.
pub const BUILDING_ISOLATED_BASE: f32 = 0.2;
pub const BUILDING_ISOLATED_RAW_WEIGHT: f32 = 0.8;
/// Stauchungsfaktor für Terrain, damit Gebäude und Straßen höher wirken.
pub const TERRAIN_COMPRESSION: f32 = 0.2;

// ── Glättung ────────────────────────────────────────────────────────

/// Kernel-Radius bei voller Glättung (`vertex_smoothing = 1`).
pub const SMOOTHING_RADIUS_MAX: f32 = 5.0;

// ── Platzierung ─────────────────────────────────────────────────────

/// Regler-Grenzen der vertikalen Verschiebung.
pub const Y_POSITION_MIN: f32 = -50.0;
pub const Y_POSITION_MAX: f32 = 50.0;

/// Parameter eines Pipeline-Durchlaufs.
///
/// Read-only während der Berechnung; die Pipeline hält keinerlei Zustand
/// über einen Durchlauf hinaus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshOptions {
    /// Auflösung des Sampling-Gitters (N → N×N Vertices)
    pub segments: u32,
    /// Multiplikator der normierten Höhe
    pub height_scale: f32,
    /// Helligkeit-zu-Höhe-Abbildung spiegeln (hell = tief)
    pub invert_height: bool,
    /// Text-/Marker-Filterung aktivieren (Klassifikations-Regelkette)
    pub remove_text: bool,
    /// Glättungsfaktor des Höhenfelds in [0, 1]; 0 = aus
    pub vertex_smoothing: f32,
    /// Sampling-Filter der Textur (true = weich); reine Renderer-Information
    pub texture_smoothing: bool,
    /// Helligkeits-Faktor der Textur (1.0 = neutral)
    pub brightness: f32,
    /// Kontrast-Faktor der Textur (1.0 = neutral)
    pub contrast: f32,
    /// Vertikale Verschiebung des fertigen Meshes
    pub y_position: f32,
    /// Kippwinkel um die X-Achse in Radiant
    pub tilt_x: f32,
    /// Kippwinkel um die Z-Achse in Radiant
    pub tilt_z: f32,
}

impl Default for MeshOptions {
    fn default() -> Self {
        Self {
            segments: SEGMENTS_DEFAULT,
            height_scale: HEIGHT_SCALE_DEFAULT,
            invert_height: false,
            remove_text: true,
            vertex_smoothing: 0.0,
            texture_smoothing: true,
            brightness: 1.0,
            contrast: 1.0,
            y_position: 0.0,
            tilt_x: 0.0,
            tilt_z: 0.0,
        }
    }
}
