//! Canny edge detection: gradients, non-maximum suppression, and
//! two-threshold hysteresis. Emits a binary map (0 or 1).

use crate::pipeline::CancelToken;

use super::{par_rows, sobel};

/// Gradient direction binned to 0°, 45°, 90° or 135°.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Horizontal,
    DiagonalUp,
    Vertical,
    DiagonalDown,
}

fn bin_direction(gx: f32, gy: f32) -> Direction {
    let angle = gy.atan2(gx).to_degrees();
    // Fold into [0, 180) and bin to the nearest 45°.
    let angle = (angle + 180.0) % 180.0;
    if !(22.5..157.5).contains(&angle) {
        Direction::Horizontal
    } else if angle < 67.5 {
        Direction::DiagonalUp
    } else if angle < 112.5 {
        Direction::Vertical
    } else {
        Direction::DiagonalDown
    }
}

/// Neighbor offsets along the gradient direction.
fn neighbors(direction: Direction) -> [(i32, i32); 2] {
    match direction {
        Direction::Horizontal => [(1, 0), (-1, 0)],
        Direction::DiagonalUp => [(1, 1), (-1, -1)],
        Direction::Vertical => [(0, 1), (0, -1)],
        Direction::DiagonalDown => [(1, -1), (-1, 1)],
    }
}

pub(crate) fn detect(
    plane: &[f32],
    width: usize,
    height: usize,
    sensitivity: f32,
    token: &CancelToken,
) -> Option<Vec<f32>> {
    // 1. Gradients.
    let mut gx_plane = vec![0.0f32; width * height];
    let mut gy_plane = vec![0.0f32; width * height];
    for y in 0..height {
        for x in 0..width {
            let (gx, gy) = sobel::gradient(plane, width, height, x, y);
            gx_plane[y * width + x] = gx;
            gy_plane[y * width + x] = gy;
        }
    }
    if token.is_cancelled() {
        return None;
    }

    // 2. Non-maximum suppression along the binned gradient direction.
    let magnitude: Vec<f32> = gx_plane
        .iter()
        .zip(&gy_plane)
        .map(|(gx, gy)| (gx * gx + gy * gy).sqrt())
        .collect();

    let suppressed = par_rows(height, width, token, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let index = y * width + x;
            let mag = magnitude[index];
            if mag == 0.0 {
                *out = 0.0;
                continue;
            }
            let direction = bin_direction(gx_plane[index], gy_plane[index]);
            let keep = neighbors(direction).iter().all(|&(dx, dy)| {
                let nx = x as i32 + dx;
                let ny = y as i32 + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    return true;
                }
                mag >= magnitude[ny as usize * width + nx as usize]
            });
            *out = if keep { mag } else { 0.0 };
        }
    })?;

    // 3. Hysteresis: seed at the strong threshold, then flood to weak
    // 8-neighbors until a fixed point.
    let low = (50.0 - 0.4 * sensitivity).max(5.0);
    let high = (100.0 - 0.7 * sensitivity).max(20.0);

    let mut out = vec![0.0f32; width * height];
    let mut stack: Vec<usize> = Vec::new();
    for (index, &mag) in suppressed.iter().enumerate() {
        if mag >= high {
            out[index] = 1.0;
            stack.push(index);
        }
    }
    while let Some(index) = stack.pop() {
        let x = (index % width) as i32;
        let y = (index / width) as i32;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 || nx >= width as i32 || ny >= height as i32 {
                    continue;
                }
                let neighbor = ny as usize * width + nx as usize;
                if out[neighbor] == 0.0 && suppressed[neighbor] >= low {
                    out[neighbor] = 1.0;
                    stack.push(neighbor);
                }
            }
        }
    }

    if token.is_cancelled() {
        return None;
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_plane(width: usize, height: usize, split: usize) -> Vec<f32> {
        let mut plane = vec![0.0; width * height];
        for y in 0..height {
            for x in split..width {
                plane[y * width + x] = 255.0;
            }
        }
        plane
    }

    #[test]
    fn direction_binning_covers_the_axes() {
        assert_eq!(bin_direction(1.0, 0.0), Direction::Horizontal);
        assert_eq!(bin_direction(0.0, 1.0), Direction::Vertical);
        assert_eq!(bin_direction(1.0, 1.0), Direction::DiagonalUp);
        assert_eq!(bin_direction(1.0, -1.0), Direction::DiagonalDown);
        assert_eq!(bin_direction(-1.0, 0.0), Direction::Horizontal);
    }

    #[test]
    fn step_edge_survives_as_a_thin_binary_line() {
        let plane = step_plane(16, 16, 8);
        let map = detect(&plane, 16, 16, 50.0, &CancelToken::new()).unwrap();

        assert!(map.iter().all(|&v| v == 0.0 || v == 1.0));
        // Suppression keeps at most a band near the step, never the
        // flat regions.
        for y in 0..16usize {
            for x in 0..16usize {
                if !(6..=9).contains(&x) {
                    assert_eq!(map[y * 16 + x], 0.0, "flat region lit at ({}, {})", x, y);
                }
            }
        }
        assert!(map.iter().any(|&v| v == 1.0), "the edge must be detected");
    }

    #[test]
    fn weak_edges_need_a_strong_seed() {
        // A plane whose gradients all sit between low and high at
        // sensitivity 0 (low = 50, high = 100): weak-only edges vanish.
        let mut plane = vec![0.0; 16 * 16];
        for y in 0..16 {
            for x in 8..16 {
                plane[y * 16 + x] = 20.0;
            }
        }
        let map = detect(&plane, 16, 16, 0.0, &CancelToken::new()).unwrap();
        assert!(
            map.iter().all(|&v| v == 0.0),
            "weak edges without a strong seed must not survive"
        );
    }

    #[test]
    fn thresholds_respect_their_floors() {
        // At sensitivity 100: low = max(5, 10) = 10, high = max(20, 30) = 30.
        let low = (50.0 - 0.4 * 100.0f32).max(5.0);
        let high = (100.0 - 0.7 * 100.0f32).max(20.0);
        assert_eq!(low, 10.0);
        assert_eq!(high, 30.0);
    }
}
