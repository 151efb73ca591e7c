use crate::depth_pipeline::frame::DepthGrid;

/// Separable Gaussian blur over an averaged depth grid, in place.
///
/// Horizontal pass into a scratch buffer, then vertical pass back into the
/// grid. Edge windows are clamped to the grid and renormalized over the
/// in-bounds taps only, so no wraparound and no out-of-bounds reads.
///
/// `radius <= 1` is a no-op: the grid is returned bit-identical.
pub fn gaussian_blur(grid: &mut DepthGrid<f64>, radius: usize) {
    if radius < 2 {
        return;
    }

    let width = grid.width();
    let height = grid.height();
    let kernel = gaussian_kernel(radius);
    let mut scratch = vec![0.0f64; grid.len()];

    {
        let src = grid.as_slice();
        for row in 0..height {
            for col in 0..width {
                let mut acc = 0.0;
                let mut weight = 0.0;
                for (k, &w) in kernel.iter().enumerate() {
                    let tap = col as isize + k as isize - radius as isize;
                    if tap >= 0 && tap < width as isize {
                        acc += src[row * width + tap as usize] * w;
                        weight += w;
                    }
                }
                scratch[row * width + col] = acc / weight;
            }
        }
    }

    {
        let dst = grid.as_mut_slice();
        for row in 0..height {
            for col in 0..width {
                let mut acc = 0.0;
                let mut weight = 0.0;
                for (k, &w) in kernel.iter().enumerate() {
                    let tap = row as isize + k as isize - radius as isize;
                    if tap >= 0 && tap < height as isize {
                        acc += scratch[tap as usize * width + col] * w;
                        weight += w;
                    }
                }
                dst[row * width + col] = acc / weight;
            }
        }
    }
}

/// Symmetric kernel of `2 * radius + 1` taps, sigma tied to the radius.
/// Unnormalized; each output window renormalizes over its in-bounds taps.
fn gaussian_kernel(radius: usize) -> Vec<f64> {
    let sigma = radius as f64 / 2.0;
    let denom = 2.0 * sigma * sigma;
    (0..=2 * radius)
        .map(|k| {
            let d = k as f64 - radius as f64;
            (-d * d / denom).exp()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp_grid() -> DepthGrid<f64> {
        let data = (0..20).map(|i| i as f64 * 10.0).collect();
        DepthGrid::from_vec(5, 4, data)
    }

    #[test]
    fn radius_below_two_is_bit_identical() {
        let original = ramp_grid();
        for radius in [0, 1] {
            let mut grid = original.clone();
            gaussian_blur(&mut grid, radius);
            assert_eq!(grid.as_slice(), original.as_slice());
        }
    }

    #[test]
    fn uniform_grid_is_unchanged() {
        let mut grid = DepthGrid::filled(6, 5, 512.0);
        gaussian_blur(&mut grid, 3);
        assert!(grid.as_slice().iter().all(|&d| (d - 512.0).abs() < 1e-9));
    }

    #[test]
    fn blur_preserves_dimensions_and_finiteness() {
        let mut grid = ramp_grid();
        gaussian_blur(&mut grid, 2);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert!(grid.as_slice().iter().all(|d| d.is_finite()));
    }

    #[test]
    fn blur_flattens_a_spike() {
        let mut grid = DepthGrid::filled(7, 7, 100.0);
        grid.set(3, 3, 1000.0);
        let before_peak = grid.get(3, 3).unwrap();
        gaussian_blur(&mut grid, 2);
        let after_peak = grid.get(3, 3).unwrap();
        assert!(after_peak < before_peak);
        assert!(after_peak > 100.0);
        // Mass leaks into the neighborhood.
        assert!(grid.get(3, 2).unwrap() > 100.0);
    }

    #[test]
    fn kernel_is_symmetric_and_peaks_at_center() {
        let kernel = gaussian_kernel(3);
        assert_eq!(kernel.len(), 7);
        for k in 0..3 {
            assert!((kernel[k] - kernel[6 - k]).abs() < 1e-12);
            assert!(kernel[k] < kernel[3]);
        }
    }
}
