use ndarray::Array3;
use tracing::debug;

/// Guards the divide when the clipped range collapses to a single value.
const RESCALE_EPSILON: f32 = 1e-8;

/// Linear-interpolated percentile of an ascending-sorted slice, `q` in
/// percent. Matches the numpy default method.
fn percentile_sorted(sorted: &[f32], q: f64) -> f32 {
    debug_assert!(!sorted.is_empty());
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (q / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = (rank - lo as f64) as f32;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Per-volume contrast window: 0.5th and 99.5th percentile of the strictly
/// positive voxels. Background (zero or negative) voxels are excluded from
/// the percentile estimate but still get clipped and rescaled.
fn intensity_window(volume: &Array3<f32>) -> Option<(f32, f32)> {
    let mut positive: Vec<f32> = volume.iter().copied().filter(|&v| v > 0.0).collect();
    if positive.is_empty() {
        return None;
    }
    positive.sort_unstable_by(|a, b| a.total_cmp(b));
    let lower = percentile_sorted(&positive, 0.5);
    let upper = percentile_sorted(&positive, 99.5);
    Some((lower, upper))
}

/// Maps raw voxel intensities to an 8-bit contrast-normalized range.
///
/// Clips every voxel to the volume's intensity window, then rescales the
/// clipped range linearly to [0, 255] and truncates to `u8`. A volume with
/// no strictly positive voxel is passed through unscaled (cast only); a
/// volume with zero dynamic range after clipping comes out uniform near 0.
pub fn normalize_volume(volume: &Array3<f32>) -> Array3<u8> {
    let Some((lower, upper)) = intensity_window(volume) else {
        debug!("no positive voxels, passing volume through unscaled");
        return volume.mapv(|v| v as u8);
    };
    debug!(lower, upper, "intensity window");

    let clipped = volume.mapv(|v| v.clamp(lower, upper));

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in clipped.iter() {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }

    let span = max - min + RESCALE_EPSILON;
    clipped.mapv(|v| ((v - min) / span * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn percentile_interpolates_linearly() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile_sorted(&v, 0.0), 1.0);
        assert_eq!(percentile_sorted(&v, 100.0), 4.0);
        assert_eq!(percentile_sorted(&v, 50.0), 2.5);
    }

    #[test]
    fn output_spans_zero_to_at_most_255() {
        let mut volume = Array3::<f32>::zeros((4, 8, 8));
        for (i, v) in volume.iter_mut().enumerate() {
            *v = (i as f32) - 30.0;
        }
        let out = normalize_volume(&volume);
        assert_eq!(out.dim(), (4, 8, 8));
        assert_eq!(*out.iter().min().unwrap(), 0);
        assert!(*out.iter().max().unwrap() <= 255);
        // The spread must survive normalization.
        assert!(*out.iter().max().unwrap() > 200);
    }

    #[test]
    fn negative_background_is_clipped_not_excluded() {
        let mut volume = Array3::<f32>::from_elem((1, 2, 2), -100.0);
        volume[[0, 0, 0]] = 50.0;
        volume[[0, 0, 1]] = 100.0;
        let out = normalize_volume(&volume);
        // Negative voxels clip to the lower bound and land at 0.
        assert_eq!(out[[0, 1, 0]], 0);
        assert_eq!(out[[0, 1, 1]], 0);
        assert!(out[[0, 0, 1]] > out[[0, 0, 0]]);
    }

    #[test]
    fn volume_without_positive_voxels_passes_through() {
        let volume = Array3::<f32>::zeros((3, 4, 4));
        let out = normalize_volume(&volume);
        assert_eq!(out.dim(), (3, 4, 4));
        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn zero_dynamic_range_yields_uniform_output() {
        let volume = Array3::<f32>::from_elem((2, 3, 3), 42.0);
        let out = normalize_volume(&volume);
        let first = out[[0, 0, 0]];
        assert!(out.iter().all(|&v| v == first));
        // Epsilon keeps the rescale finite; result sits near 0.
        assert!(first < 2);
    }
}
