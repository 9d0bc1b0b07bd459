//! Deterministic k-means clustering in RGB space
//!
//! Outputs feed an automated pass/fail gate, so clustering must produce
//! identical results for identical inputs: a fixed-seed xorshift PRNG
//! drives k-means++ initialization and iteration is bounded by both a
//! convergence tolerance and a hard cap.

/// Maximum Lloyd iterations before giving up on convergence
const MAX_ITERATIONS: usize = 100;

/// Stop iterating once no centroid moves farther than this
const CONVERGENCE_TOLERANCE: f32 = 1e-4;

/// Clustering outcome: parallel centroid/count vectors
#[derive(Debug, Clone)]
pub(crate) struct KmeansResult {
    pub centroids: Vec<[f32; 3]>,
    pub counts: Vec<usize>,
}

/// xorshift64* PRNG; tiny, seedable, and stable across platforms
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        // A zero state would be a fixed point
        Self {
            state: seed.max(1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Uniform float in [0, 1)
    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn next_index(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }
}

#[inline]
fn distance_sq(a: [f32; 3], b: [f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// Index of the nearest centroid; ties go to the lowest index
fn nearest_centroid(sample: [f32; 3], centroids: &[[f32; 3]]) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let d = distance_sq(sample, c);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// k-means++ initialization: spread the initial centroids out by
/// sampling proportionally to squared distance from the chosen set
fn init_centroids(samples: &[[f32; 3]], k: usize, rng: &mut XorShift64) -> Vec<[f32; 3]> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(samples[rng.next_index(samples.len())]);

    let mut dist_sq: Vec<f32> = samples
        .iter()
        .map(|&s| distance_sq(s, centroids[0]))
        .collect();

    while centroids.len() < k {
        let total: f32 = dist_sq.iter().sum();
        if total <= f32::EPSILON {
            // Fewer distinct samples than clusters; duplicates end up as
            // empty clusters and are dropped by the caller
            centroids.push(samples[rng.next_index(samples.len())]);
            continue;
        }

        let mut threshold = rng.next_f32() * total;
        let mut chosen = samples.len() - 1;
        for (i, &d) in dist_sq.iter().enumerate() {
            threshold -= d;
            if threshold <= 0.0 {
                chosen = i;
                break;
            }
        }

        let next = samples[chosen];
        centroids.push(next);
        for (d, &s) in dist_sq.iter_mut().zip(samples.iter()) {
            let nd = distance_sq(s, next);
            if nd < *d {
                *d = nd;
            }
        }
    }

    centroids
}

/// Run k-means over RGB samples with a fixed seed
///
/// Preconditions (checked by the caller): `k >= 1` and
/// `samples.len() >= k`. Empty clusters keep their stale centroid and a
/// zero count; callers drop them.
pub(crate) fn run_kmeans(samples: &[[f32; 3]], k: usize, seed: u64) -> KmeansResult {
    let mut rng = XorShift64::new(seed);
    let mut centroids = init_centroids(samples, k, &mut rng);
    let mut counts = vec![0usize; k];

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![[0.0f64; 3]; k];
        counts = vec![0usize; k];

        for &sample in samples {
            let cluster = nearest_centroid(sample, &centroids);
            counts[cluster] += 1;
            for c in 0..3 {
                sums[cluster][c] += sample[c] as f64;
            }
        }

        let mut max_movement = 0.0f32;
        for i in 0..k {
            if counts[i] == 0 {
                continue;
            }
            let updated = [
                (sums[i][0] / counts[i] as f64) as f32,
                (sums[i][1] / counts[i] as f64) as f32,
                (sums[i][2] / counts[i] as f64) as f32,
            ];
            let movement = distance_sq(updated, centroids[i]).sqrt();
            if movement > max_movement {
                max_movement = movement;
            }
            centroids[i] = updated;
        }

        if max_movement < CONVERGENCE_TOLERANCE {
            break;
        }
    }

    KmeansResult { centroids, counts }
}
