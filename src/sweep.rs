// Copyright @yucwang 2026

use crate::calculation::calculator::{ Calculator, IntegralResult };
use crate::core::detector::Detector;
use crate::core::shape::Source;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

/// Computes the full weight matrix for every (source, detector) pair. Row
/// `i` holds the weights of `sources[i]` at every detector position.
///
/// Each pair gets its own `Calculator` (the integrator is non-reentrant), so
/// the workers share nothing but the atomic pair counter; results complete in
/// any order and each output slot is written exactly once by the aggregating
/// thread.
pub fn calculate_weights(detectors: &[Detector], sources: &[Source],
                         thread_count: usize) -> Vec<Vec<IntegralResult>> {
    let total_pairs = detectors.len() * sources.len();
    if total_pairs == 0 {
        return vec![Vec::new(); sources.len()];
    }
    let thread_count = match thread_count {
        0 => thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        n => n,
    };
    log::info!("Sweeping {} sources against {} detectors on {} threads.",
               sources.len(), detectors.len(), thread_count);

    let progress = ProgressBar::new(total_pairs as u64);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} pairs")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let next_pair = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel::<(usize, usize, IntegralResult)>();
    let mut matrix = vec![vec![IntegralResult::default(); detectors.len()]; sources.len()];

    thread::scope(|scope| {
        for _ in 0..thread_count {
            let next_pair = Arc::clone(&next_pair);
            let tx = tx.clone();
            scope.spawn(move || {
                loop {
                    let pair_index = next_pair.fetch_add(1, Ordering::Relaxed);
                    if pair_index >= total_pairs {
                        break;
                    }
                    let src_index = pair_index / detectors.len();
                    let det_index = pair_index % detectors.len();
                    let mut calc = Calculator::new(detectors[det_index].clone(),
                                                   sources[src_index].clone());
                    let result = calc.calc_integral();
                    if tx.send((src_index, det_index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(tx);

        for (src_index, det_index, result) in rx {
            matrix[src_index][det_index] = result;
            progress.inc(1);
        }
    });

    progress.finish_and_clear();
    matrix
}

#[cfg(test)]
mod tests {
    use super::calculate_weights;
    use crate::calculation::calculator::Calculator;
    use crate::core::detector::Detector;
    use crate::core::shape::Source;
    use crate::math::constants::Vector3f;
    use crate::shapes::low_dim::{ LineSource, PointSource };

    fn panel(normal_z: f64) -> Detector {
        Detector::new(Vector3f::new(1.0, 0.0, 0.0),
                      Vector3f::new(0.0, 1.0, 0.0),
                      Vector3f::new(0.0, 0.0, normal_z))
    }

    #[test]
    fn test_sweep_matches_individual_calculations() {
        let detectors = vec![panel(1.0), panel(-1.0)];
        let sources = vec![
            Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, 5.0))),
            Source::Line(LineSource::new(Vector3f::new(-0.5, 0.0, 5.0),
                                         Vector3f::new(0.5, 0.0, 5.0))),
        ];

        let matrix = calculate_weights(&detectors, &sources, 2);
        assert_eq!(matrix.len(), 2);
        for (i, src) in sources.iter().enumerate() {
            for (j, det) in detectors.iter().enumerate() {
                let mut calc = Calculator::new(det.clone(), src.clone());
                let expected = calc.calc_integral();
                assert_eq!(matrix[i][j].value, expected.value,
                           "mismatch at source {} detector {}", i, j);
            }
        }
        // the flipped panel faces away from every source
        assert_eq!(matrix[0][1].value, 0.0);
        assert_eq!(matrix[1][1].value, 0.0);
    }

    #[test]
    fn test_sweep_empty_inputs() {
        let matrix = calculate_weights(&[], &[], 1);
        assert!(matrix.is_empty());
    }
}
