//! K-means color quantization.

use crate::color::Rgb;

/// Iteration count. The palette converges well before this on typical
/// cell counts; a fixed count keeps the stage deterministic.
const ITERATIONS: usize = 10;

/// Quantize `colors` to at most `k` representative colors and return
/// each input mapped to its representative.
///
/// Centroids initialize by an even stride through the input, so the
/// result is a pure function of its arguments. Distance is squared
/// RGB. Empty clusters keep their previous centroid.
pub(crate) fn quantize(colors: &[Rgb], k: usize) -> Vec<Rgb> {
    if colors.is_empty() || k == 0 {
        return Vec::new();
    }
    let k = k.min(colors.len());

    let mut centroids: Vec<[f32; 3]> = (0..k)
        .map(|i| colors[i * colors.len() / k].to_f32())
        .collect();
    let mut assignment = vec![0usize; colors.len()];

    for _ in 0..ITERATIONS {
        for (color, slot) in colors.iter().zip(assignment.iter_mut()) {
            *slot = nearest(color.to_f32(), &centroids);
        }

        let mut sums = vec![[0.0f32; 3]; k];
        let mut counts = vec![0usize; k];
        for (color, &cluster) in colors.iter().zip(&assignment) {
            let [r, g, b] = color.to_f32();
            sums[cluster][0] += r;
            sums[cluster][1] += g;
            sums[cluster][2] += b;
            counts[cluster] += 1;
        }
        for (cluster, count) in counts.iter().enumerate() {
            if *count > 0 {
                let n = *count as f32;
                centroids[cluster] = [
                    sums[cluster][0] / n,
                    sums[cluster][1] / n,
                    sums[cluster][2] / n,
                ];
            }
        }
    }

    for (color, slot) in colors.iter().zip(assignment.iter_mut()) {
        *slot = nearest(color.to_f32(), &centroids);
    }
    assignment
        .iter()
        .map(|&cluster| Rgb::from_f32(centroids[cluster]))
        .collect()
}

fn nearest(color: [f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut best = 0;
    let mut best_d = f32::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let dr = color[0] - c[0];
        let dg = color[1] - c[1];
        let db = color[2] - c[2];
        let d = dr * dr + dg * dg + db * db;
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    best
}
