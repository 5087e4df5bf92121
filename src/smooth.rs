//! Box-Blur-Glättung des finalen Höhenfelds.
//!
//! Separabler Box-Blur mit randreplizierendem Fenster (Index-Clamping,
//! kein Wrap-Around), anschließend Überblendung mit dem Original über
//! den Glättungsfaktor.

use crate::heightfield::HeightField;
use crate::options::SMOOTHING_RADIUS_MAX;

/// Glättet das Höhenfeld mit `vertex_smoothing ∈ [0, 1]`.
///
/// Faktor 0 lässt das Feld elementweise unverändert. Sonst bestimmt der
/// Faktor sowohl den Kernel-Radius (`ceil(faktor × 5)`, Fensterseite
/// `2r+1`) als auch den Mischanteil:
/// `out = geglättet × faktor + original × (1 − faktor)`.
pub fn smooth_height_field(field: &HeightField, vertex_smoothing: f32) -> HeightField {
    if vertex_smoothing <= 0.0 {
        return field.clone();
    }
    let factor = vertex_smoothing.min(1.0);
    let radius = (factor * SMOOTHING_RADIUS_MAX).ceil() as i32;
    let n = field.size as i32;

    // Separabel: erst Zeilen, dann Spalten. Beide Pässe lesen nur aus dem
    // jeweiligen Eingangspuffer, nie aus teilgeglätteten eigenen Werten.
    let rows_blurred = blur_axis(&field.values, n, radius, Axis::Row);
    let smoothed = blur_axis(&rows_blurred, n, radius, Axis::Column);

    let values = field
        .values
        .iter()
        .zip(smoothed.iter())
        .map(|(original, blurred)| blurred * factor + original * (1.0 - factor))
        .collect();

    log::info!(
        "Höhenfeld geglättet: Radius {}, Faktor {:.2}",
        radius,
        factor
    );
    HeightField {
        values,
        size: field.size,
    }
}

enum Axis {
    Row,
    Column,
}

/// Box-Blur entlang einer Achse mit randreplizierendem Index-Clamping.
fn blur_axis(values: &[f32], n: i32, radius: i32, axis: Axis) -> Vec<f32> {
    let window = (2 * radius + 1) as f32;
    let mut out = vec![0.0f32; values.len()];

    for row in 0..n {
        for col in 0..n {
            let mut sum = 0.0;
            for offset in -radius..=radius {
                let (sample_col, sample_row) = match axis {
                    Axis::Row => ((col + offset).clamp(0, n - 1), row),
                    Axis::Column => (col, (row + offset).clamp(0, n - 1)),
                };
                sum += values[(sample_row * n + sample_col) as usize];
            }
            out[(row * n + col) as usize] = sum / window;
        }
    }
    out
}
