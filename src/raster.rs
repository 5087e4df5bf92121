//! RGBA-Raster als Eingabe der Mesh-Pipeline.
//!
//! Quadratisches Sampling-Gitter fester Seitenlänge, zeilenweise gespeichert
//! (Ursprung oben links). Beliebige Bilder werden beim Erstellen auf die
//! Zielauflösung skaliert — das entspricht dem Abtasten des Kartenbilds
//! mit `segments × segments` Samples.

use anyhow::{Context, Result, ensure};
use image::{DynamicImage, RgbaImage};

/// Ein RGBA-Sample (Kanäle 0–255).
pub type RgbaSample = [u8; 4];

/// Sentinel für Zugriffe außerhalb des Gitters: voll transparentes Schwarz.
/// Hält Nachbarschafts-Scans an den Rändern wohldefiniert.
pub const OUT_OF_BOUNDS_SAMPLE: RgbaSample = [0, 0, 0, 0];

/// Quadratisches RGBA-Raster, unveränderlich für einen Pipeline-Durchlauf.
pub struct Raster {
    /// RGBA-Bytes, 4 pro Pixel, zeilenweise
    data: Vec<u8>,
    /// Seitenlänge des Gitters
    size: u32,
}

impl Raster {
    /// Lädt ein Kartenbild und skaliert es auf `segments × segments`.
    pub fn load(path: &str, segments: u32) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Fehler beim Laden des Kartenbilds: {}", path))?;
        Self::from_image(&image, segments)
    }

    /// Erstellt ein Raster aus einem bereits dekodierten Bild.
    ///
    /// Das Bild wird nach RGBA konvertiert und falls nötig auf
    /// `segments × segments` skaliert (Lanczos3).
    pub fn from_image(image: &DynamicImage, segments: u32) -> Result<Self> {
        let rgba = image.to_rgba8();
        let rgba = if rgba.width() != segments || rgba.height() != segments {
            image::imageops::resize(
                &rgba,
                segments,
                segments,
                image::imageops::FilterType::Lanczos3,
            )
        } else {
            rgba
        };

        log::info!("Raster erstellt: {}x{} Samples", segments, segments);
        Self::from_rgba_bytes(rgba.into_raw(), segments)
    }

    /// Erstellt ein Raster aus rohen RGBA-Bytes (4 pro Pixel, zeilenweise).
    pub fn from_rgba_bytes(data: Vec<u8>, size: u32) -> Result<Self> {
        ensure!(size > 0, "Rastergröße 0 ist ungültig");
        let expected = size as usize * size as usize * 4;
        ensure!(
            data.len() == expected,
            "RGBA-Datenlänge {} passt nicht zu {}x{} ({} Bytes erwartet)",
            data.len(),
            size,
            size,
            expected
        );
        Ok(Self { data, size })
    }

    /// Seitenlänge des Gitters.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Liest das RGBA-Sample an (col, row).
    ///
    /// Außerhalb des Gitters kommt [`OUT_OF_BOUNDS_SAMPLE`] zurück.
    pub fn sample(&self, col: i32, row: i32) -> RgbaSample {
        if col < 0 || row < 0 || col >= self.size as i32 || row >= self.size as i32 {
            return OUT_OF_BOUNDS_SAMPLE;
        }
        let index = (row as usize * self.size as usize + col as usize) * 4;
        [
            self.data[index],
            self.data[index + 1],
            self.data[index + 2],
            self.data[index + 3],
        ]
    }

    /// Rohe RGBA-Bytes (für die Textur-Anpassung).
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Kopie als `image::RgbaImage`, z.B. zum Abspeichern.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_raw(self.size, self.size, self.data.clone())
            .unwrap_or_else(|| RgbaImage::new(self.size, self.size))
    }
}
