// Copyright @yucwang 2026

use viewfactor::core::detector::Detector;
use viewfactor::core::shape::Source;
use viewfactor::math::constants::Vector3f;
use viewfactor::shapes::flat::{ CircleXY, Square };
use viewfactor::shapes::low_dim::{ LineSource, PointSource };
use viewfactor::shapes::shell::CylinderZaxis;
use viewfactor::sweep::calculate_weights;

use std::env;
use std::fs::File;
use std::io::{ BufWriter, Write };

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <output.csv> [--threads N]", args[0]);
        std::process::exit(1);
    }
    let output_path = &args[1];
    let mut thread_count: usize = 0;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--threads" => {
                i += 1;
                thread_count = args.get(i).and_then(|v| v.parse::<usize>().ok()).unwrap_or(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let detectors = make_panel_grid();
    let (names, sources) = make_demo_sources();
    let matrix = calculate_weights(&detectors, &sources, thread_count);

    if let Err(err) = write_weight_table(output_path, &names, &matrix) {
        eprintln!("Failed to write {}: {}", output_path, err);
        std::process::exit(1);
    }
    log::info!("Wrote {} weights to {}.", matrix.len() * detectors.len(), output_path);
}

/// A 3x3 grid of 20x20 cm panels in the z=0 plane, all facing +z.
fn make_panel_grid() -> Vec<Detector> {
    let mut detectors = Vec::with_capacity(9);
    for _row in 0..3 {
        for _col in 0..3 {
            // panel positions are baked into the sources, so every panel
            // shares the same local frame
            detectors.push(Detector::new(Vector3f::new(0.1, 0.0, 0.0),
                                         Vector3f::new(0.0, 0.1, 0.0),
                                         Vector3f::new(0.0, 0.0, 1.0)));
        }
    }
    detectors
}

fn make_demo_sources() -> (Vec<&'static str>, Vec<Source>) {
    let names = vec!["point", "line", "ceiling_patch", "floor_disc", "column"];
    let sources = vec![
        Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, 2.0))),
        Source::Line(LineSource::new(Vector3f::new(-1.0, 0.5, 2.5),
                                     Vector3f::new(1.0, 0.5, 2.5))),
        Source::Square(Square::new(Vector3f::new(0.0, 0.0, 3.0),
                                   Vector3f::new(1.5, 0.0, 0.0),
                                   Vector3f::new(0.0, 1.5, 0.0))),
        Source::CircleXY(CircleXY::new(Vector3f::new(0.5, -0.5, 0.5), 0.75)),
        Source::CylinderZaxis(CylinderZaxis::new(Vector3f::new(2.0, 2.0, 1.5), 0.3, 1.5)),
    ];
    (names, sources)
}

fn write_weight_table(path: &str, names: &[&str],
                      matrix: &[Vec<viewfactor::calculation::calculator::IntegralResult>])
                      -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "Det, Source Name, Weight, Recursion Depth, \
                      Single Axis Recursions, All Axis Recursions, \
                      Integrand Evaluations")?;
    for (name, row) in names.iter().zip(matrix.iter()) {
        for (det_index, result) in row.iter().enumerate() {
            writeln!(writer, "{0:d$}, {1:s$}, {2:e}, {3}, {4}, {5}, {6}",
                     det_index, name, result.value, result.max_depth,
                     result.single_axis_recursions, result.full_recursions,
                     result.calls, d = 3, s = 14)?;
        }
    }
    Ok(())
}
