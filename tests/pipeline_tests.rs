//! Integrationstests für die komplette Mesh-Pipeline:
//! - Ende-zu-Ende-Szenarien über Klassifikation, Höhenfeld und Mesh
//! - Glättungs- und Textur-Verhalten über die öffentliche API

use approx::assert_abs_diff_eq;
use map_relief::classify::build_feature_field;
use map_relief::heightfield::resolve_height_field;
use map_relief::mesh::build_terrain_mesh;
use map_relief::{Feature, MeshOptions, Raster, generate_terrain_mesh};

/// Erstellt ein einfarbiges Raster der Seitenlänge `size`.
fn uniform_raster(size: u32, rgba: [u8; 4]) -> Raster {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for _ in 0..size * size {
        data.extend_from_slice(&rgba);
    }
    Raster::from_rgba_bytes(data, size).unwrap()
}

/// 9x9-Raster: 3x3-Gebäudeblock in Mittelgrau auf dunklem Terrain.
fn block_raster() -> Raster {
    let size = 9u32;
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for row in 0..size {
        for col in 0..size {
            if (3..6).contains(&row) && (3..6).contains(&col) {
                data.extend_from_slice(&[150, 150, 150, 255]);
            } else {
                data.extend_from_slice(&[70, 110, 70, 255]);
            }
        }
    }
    Raster::from_rgba_bytes(data, size).unwrap()
}

fn options_for(size: u32) -> MeshOptions {
    MeshOptions {
        segments: size,
        ..MeshOptions::default()
    }
}

// ─── Ende-zu-Ende-Szenarien ──────────────────────────────────────────────────

#[test]
fn test_weisses_raster_wird_ueberall_strasse() {
    // Reines Weiß erfüllt die Hellgrau-Straßenregel → Fahrbahnhöhe 0.05,
    // unabhängig von der Höhenskala
    let raster = uniform_raster(4, [255, 255, 255, 255]);

    for height_scale in [10.0, 50.0, 80.0] {
        let mut options = options_for(4);
        options.height_scale = height_scale;
        let output = generate_terrain_mesh(&raster, &options).unwrap();
        for position in &output.mesh.positions {
            assert_abs_diff_eq!(position[1], 0.05 * height_scale, epsilon = 1e-5);
        }
    }
}

#[test]
fn test_mittelgraues_raster_bildet_gebaeudekern() {
    // Mittelgrau (150er-Kanäle) klassifiziert überall Gebäude; das Zentrum
    // eines 5x5-Blocks hat 8 Gebäude-Nachbarn → Kernhöhe 0.8
    let raster = uniform_raster(5, [150, 150, 150, 255]);
    let options = options_for(5);

    let field = build_feature_field(&raster, &options);
    assert!(field.features.iter().all(|f| *f == Feature::Building));

    let output = generate_terrain_mesh(&raster, &options).unwrap();
    let center = output.mesh.positions[2 * 5 + 2];
    assert_abs_diff_eq!(center[1], 0.8 * options.height_scale, epsilon = 1e-4);

    // Die Ecke hat nur 3 Nachbarn → Randhöhe 0.6
    let corner = output.mesh.positions[0];
    assert_abs_diff_eq!(corner[1], 0.6 * options.height_scale, epsilon = 1e-4);
}

#[test]
fn test_gebaeudekern_invertiert_tauscht_stufen() {
    let raster = uniform_raster(5, [150, 150, 150, 255]);
    let mut options = options_for(5);
    options.invert_height = true;

    let output = generate_terrain_mesh(&raster, &options).unwrap();
    let center = output.mesh.positions[2 * 5 + 2];
    assert_abs_diff_eq!(center[1], 0.2 * options.height_scale, epsilon = 1e-4);
}

#[test]
fn test_transparentes_raster_ergibt_flaches_terrain() {
    // Volltransparenz trifft die Störpixel-Regel: Roh-Höhe 0.05,
    // danach Terrain-Stauchung × 0.2 → finale Höhe 0.01
    let raster = uniform_raster(4, [0, 0, 0, 0]);
    let options = options_for(4);

    let output = generate_terrain_mesh(&raster, &options).unwrap();
    for position in &output.mesh.positions {
        assert_abs_diff_eq!(position[1], 0.01 * options.height_scale, epsilon = 1e-5);
    }
}

#[test]
fn test_ohne_remove_text_folgt_hoehe_der_helligkeit() {
    // Deckende Samples ohne Filterung: immer Terrain, Roh-Höhe = Helligkeit
    let raster = uniform_raster(3, [60, 120, 180, 255]);
    let mut options = options_for(3);
    options.remove_text = false;

    let field = build_feature_field(&raster, &options);
    let brightness = (60.0 + 120.0 + 180.0) / 3.0 / 255.0;
    assert!(field.features.iter().all(|f| *f == Feature::Terrain));
    for raw in &field.raw_heights {
        assert_abs_diff_eq!(*raw, brightness, epsilon = 1e-6);
    }

    options.invert_height = true;
    let inverted = build_feature_field(&raster, &options);
    for raw in &inverted.raw_heights {
        assert_abs_diff_eq!(*raw, 1.0 - brightness, epsilon = 1e-6);
    }
}

// ─── Glättung ────────────────────────────────────────────────────────────────

#[test]
fn test_glaettung_null_nimmt_den_skip_pfad() {
    // Faktor 0: das Pipeline-Mesh entspricht exakt dem direkt aus
    // Pass 1 + Pass 2 gebauten Mesh, ohne Glättungs-Einfluss
    let raster = block_raster();
    let options = options_for(raster.size());

    let output = generate_terrain_mesh(&raster, &options).unwrap();

    let field = build_feature_field(&raster, &options);
    let heights = resolve_height_field(&field, options.invert_height);
    let direct = build_terrain_mesh(&heights, &options).unwrap();

    assert_eq!(output.mesh.positions, direct.positions);
    assert_eq!(output.mesh.normals, direct.normals);
}

#[test]
fn test_glaettung_daempft_gebaeudekanten() {
    // Gebäudeblock: an der Blockkante liegt eine Höhenstufe, die die
    // Glättung abflacht — der Kern sinkt, das Umfeld steigt
    let raster = block_raster();
    let size = raster.size();

    let options = options_for(size);
    let mut smoothed_options = options.clone();
    smoothed_options.vertex_smoothing = 0.6;

    let plain = generate_terrain_mesh(&raster, &options).unwrap();
    let smoothed = generate_terrain_mesh(&raster, &smoothed_options).unwrap();

    let center = (4 * size + 4) as usize;
    assert!(smoothed.mesh.positions[center][1] < plain.mesh.positions[center][1]);
    let far_corner = 0usize;
    assert!(smoothed.mesh.positions[far_corner][1] >= plain.mesh.positions[far_corner][1]);
}

// ─── Textur ──────────────────────────────────────────────────────────────────

#[test]
fn test_neutrale_textur_bleibt_aus() {
    let raster = uniform_raster(4, [150, 150, 150, 255]);
    let options = options_for(4);
    let output = generate_terrain_mesh(&raster, &options).unwrap();
    assert!(output.texture.is_none());
    assert!(output.texture_smoothing);
}

#[test]
fn test_angepasste_textur_wird_mitgeliefert() {
    let raster = uniform_raster(4, [150, 150, 150, 255]);
    let mut options = options_for(4);
    options.brightness = 1.5;
    options.texture_smoothing = false;

    let output = generate_terrain_mesh(&raster, &options).unwrap();
    let texture = output.texture.expect("Textur erwartet");
    assert_eq!(texture.dimensions(), (4, 4));
    // (150-128)*1.5 + 128 = 161, Kontrast 1.0 rückt minimal nach
    assert!(texture.get_pixel(0, 0).0[0] > 150);
    assert!(!output.texture_smoothing);
}

// ─── Fehlerfälle und Determinismus ───────────────────────────────────────────

#[test]
fn test_einzelpixel_raster_wird_abgelehnt() {
    let raster = uniform_raster(1, [100, 100, 100, 255]);
    let result = generate_terrain_mesh(&raster, &options_for(1));
    assert!(result.is_err());
}

#[test]
fn test_pipeline_ist_deterministisch() {
    let raster = uniform_raster(6, [150, 150, 150, 255]);
    let mut options = options_for(6);
    options.vertex_smoothing = 0.3;

    let first = generate_terrain_mesh(&raster, &options).unwrap();
    let second = generate_terrain_mesh(&raster, &options).unwrap();
    assert_eq!(first.mesh.positions, second.mesh.positions);
    assert_eq!(first.mesh.normals, second.mesh.normals);
    assert_eq!(first.mesh.indices, second.mesh.indices);
}
