//! Windowed SSIM over grayscale buffers
//!
//! Classic Wang et al. structural similarity with a 7x7 uniform window,
//! computed densely via integral images so the per-pixel map costs O(1)
//! per pixel regardless of window size. Windows are clamped at the image
//! border; the scalar score averages the interior only, where windows
//! are complete.

/// Half-width of the 7x7 comparison window
pub(crate) const WINDOW_RADIUS: usize = 3;

// Stabilizers (K1*L)^2 and (K2*L)^2 with K1=0.01, K2=0.03, L=255
const C1: f64 = 6.5025;
const C2: f64 = 58.5225;

/// Summed-area table with a zero top row and left column, so the sum
/// over [x0, x1) x [y0, y1) is four lookups
struct Integral {
    width: usize,
    table: Vec<f64>,
}

impl Integral {
    fn build(width: usize, height: usize, values: impl Fn(usize) -> f64) -> Self {
        let w1 = width + 1;
        let mut table = vec![0.0f64; w1 * (height + 1)];
        for y in 0..height {
            let mut row_sum = 0.0f64;
            for x in 0..width {
                row_sum += values(y * width + x);
                table[(y + 1) * w1 + (x + 1)] = table[y * w1 + (x + 1)] + row_sum;
            }
        }
        Self { width: w1, table }
    }

    fn window_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
        self.table[y1 * self.width + x1] + self.table[y0 * self.width + x0]
            - self.table[y0 * self.width + x1]
            - self.table[y1 * self.width + x0]
    }
}

/// Dense SSIM map plus the interior-mean scalar score
///
/// Both buffers must be `width * height` grayscale values. Map entries
/// lie in [-1, 1]; negative values indicate anti-correlated structure.
pub(crate) fn ssim_map(
    reference: &[u8],
    candidate: &[u8],
    width: usize,
    height: usize,
) -> (f64, Vec<f64>) {
    debug_assert_eq!(reference.len(), width * height);
    debug_assert_eq!(candidate.len(), width * height);

    let ix = Integral::build(width, height, |i| reference[i] as f64);
    let iy = Integral::build(width, height, |i| candidate[i] as f64);
    let ixx = Integral::build(width, height, |i| {
        let v = reference[i] as f64;
        v * v
    });
    let iyy = Integral::build(width, height, |i| {
        let v = candidate[i] as f64;
        v * v
    });
    let ixy = Integral::build(width, height, |i| reference[i] as f64 * candidate[i] as f64);

    let mut map = vec![0.0f64; width * height];
    for y in 0..height {
        let y0 = y.saturating_sub(WINDOW_RADIUS);
        let y1 = (y + WINDOW_RADIUS + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(WINDOW_RADIUS);
            let x1 = (x + WINDOW_RADIUS + 1).min(width);
            let n = ((x1 - x0) * (y1 - y0)) as f64;

            let mx = ix.window_sum(x0, y0, x1, y1) / n;
            let my = iy.window_sum(x0, y0, x1, y1) / n;
            let var_x = (ixx.window_sum(x0, y0, x1, y1) / n - mx * mx).max(0.0);
            let var_y = (iyy.window_sum(x0, y0, x1, y1) / n - my * my).max(0.0);
            let cov = ixy.window_sum(x0, y0, x1, y1) / n - mx * my;

            let numerator = (2.0 * mx * my + C1) * (2.0 * cov + C2);
            let denominator = (mx * mx + my * my + C1) * (var_x + var_y + C2);
            map[y * width + x] = numerator / denominator;
        }
    }

    (interior_mean(&map, width, height), map)
}

/// Mean over the region where 7x7 windows fit entirely; tiny images
/// fall back to the whole map
fn interior_mean(map: &[f64], width: usize, height: usize) -> f64 {
    let r = WINDOW_RADIUS;
    if width <= 2 * r || height <= 2 * r {
        return map.iter().sum::<f64>() / map.len() as f64;
    }

    let mut sum = 0.0f64;
    let mut count = 0usize;
    for y in r..height - r {
        for x in r..width - r {
            sum += map[y * width + x];
            count += 1;
        }
    }
    sum / count as f64
}
