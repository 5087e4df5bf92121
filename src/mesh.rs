//! Gitter-Mesh-Aufbau aus dem finalen Höhenfeld.
//!
//! Reguläres N×N-Vertexgitter auf einem festen 200×200-Footprint in der
//! XZ-Ebene (+Y oben, zentriert im Ursprung). Höhenwerte skalieren in die
//! Y-Koordinate, Normalen entstehen durch Mittelung der angrenzenden
//! Flächennormalen. Bei jeder Parameteränderung wird das Mesh komplett
//! neu gebaut — es gibt kein inkrementelles Update.

use anyhow::{Result, bail};
use glam::{Mat3, Vec3};

use crate::heightfield::HeightField;
use crate::options::{MESH_FOOTPRINT, MeshOptions};

/// Fertiges Gitter-Mesh für Renderer oder Exporter.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    /// Vertex-Positionen (x, y, z), zeilenweise
    pub positions: Vec<[f32; 3]>,
    /// Geglättete Vertex-Normalen
    pub normals: Vec<[f32; 3]>,
    /// UV = Gitterposition in [0, 1]²
    pub uvs: Vec<[f32; 2]>,
    /// Dreiecksliste, CCW von +Y aus gesehen
    pub indices: Vec<u32>,
}

impl TerrainMesh {
    /// Anzahl Dreiecke.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Baut das Mesh aus dem Höhenfeld.
///
/// Vertex (row, col) liegt bei `x = col·spacing − half`,
/// `z = row·spacing − half`, `y = Höhe × height_scale` mit
/// `spacing = 200 / (N−1)`. Anschließend wird das fertige Mesh starr
/// platziert: Tilt um X und Z, dann Verschiebung um `y_position` —
/// reine Ausgabe-Platzierung, die Höhenberechnung bleibt unberührt.
pub fn build_terrain_mesh(heights: &HeightField, options: &MeshOptions) -> Result<TerrainMesh> {
    let n = heights.size as usize;
    if n < 2 {
        bail!(
            "Gitter {}x{} hat keine Dreiecks-Topologie (Minimum 2x2)",
            n,
            n
        );
    }

    let spacing = MESH_FOOTPRINT / (n as f32 - 1.0);
    let half = MESH_FOOTPRINT / 2.0;

    let mut positions = Vec::with_capacity(n * n);
    let mut uvs = Vec::with_capacity(n * n);
    for row in 0..n {
        let z = row as f32 * spacing - half;
        let v = row as f32 / (n as f32 - 1.0);
        for col in 0..n {
            let x = col as f32 * spacing - half;
            let u = col as f32 / (n as f32 - 1.0);
            let y = heights.values[row * n + col] * options.height_scale;
            positions.push([x, y, z]);
            uvs.push([u, v]);
        }
    }

    // Zwei CCW-Dreiecke pro Quad, festes Regular-Grid-Schema
    let mut indices = Vec::with_capacity((n - 1) * (n - 1) * 6);
    for row in 0..n - 1 {
        for col in 0..n - 1 {
            let i0 = (row * n + col) as u32;
            let i1 = i0 + 1;
            let i2 = i0 + n as u32;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    let mut normals = vertex_normals(&positions, &indices);

    // Starre Platzierung des fertigen Meshes
    if options.tilt_x != 0.0 || options.tilt_z != 0.0 || options.y_position != 0.0 {
        let rotation =
            Mat3::from_rotation_x(options.tilt_x) * Mat3::from_rotation_z(options.tilt_z);
        for (position, normal) in positions.iter_mut().zip(normals.iter_mut()) {
            let p = rotation * Vec3::from_array(*position);
            *position = [p.x, p.y + options.y_position, p.z];
            *normal = (rotation * Vec3::from_array(*normal)).to_array();
        }
    }

    log::info!(
        "Mesh gebaut: {} Vertices, {} Dreiecke",
        positions.len(),
        indices.len() / 3
    );
    Ok(TerrainMesh {
        positions,
        normals,
        uvs,
        indices,
    })
}

/// Geglättete Vertex-Normalen: Flächennormalen aufsummieren, normalisieren.
///
/// Die Flächennormalen gehen unnormalisiert in die Summe ein, größere
/// Dreiecke wiegen dadurch stärker.
fn vertex_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for triangle in indices.chunks_exact(3) {
        let (a, b, c) = (
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        );
        let pa = Vec3::from_array(positions[a]);
        let pb = Vec3::from_array(positions[b]);
        let pc = Vec3::from_array(positions[c]);
        let face = (pb - pa).cross(pc - pa);
        accumulated[a] += face;
        accumulated[b] += face;
        accumulated[c] += face;
    }

    accumulated
        .iter()
        .map(|normal| normal.normalize_or_zero().to_array())
        .collect()
}
