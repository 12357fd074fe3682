//! Procedural terrain height
//!
//! Two octaves of seeded 2D simplex noise with a flattened circular arena
//! around the origin. The field is immutable after construction, so it can be
//! shared (`Arc<HeightField>`) between the simulation and a mesh builder.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use crate::consts::ARENA_FLAT_RADIUS;
use crate::smoothstep;

/// One noise octave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Octave {
    pub frequency: f64,
    pub amplitude: f64,
}

/// Broad rolling hills
pub const BASE_OCTAVE: Octave = Octave {
    frequency: 0.05,
    amplitude: 2.0,
};

/// Small bumps on top of the hills
pub const DETAIL_OCTAVE: Octave = Octave {
    frequency: 0.2,
    amplitude: 0.5,
};

/// Residual relief left at the edge of the flattened arena
const ARENA_RELIEF: f64 = 0.2;

const GRADIENTS: [(f64, f64); 12] = [
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (0.0, 1.0),
    (0.0, -1.0),
];

/// Seeded 2D simplex noise, output roughly in [-1, 1]
#[derive(Debug, Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        let mut rng = Pcg32::seed_from_u64(seed);
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn gradient_index(&self, i: i64, j: i64) -> usize {
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        self.perm[ii + self.perm[jj] as usize] as usize % GRADIENTS.len()
    }

    pub fn noise2d(&self, x: f64, y: f64) -> f64 {
        let f2 = 0.5 * (3.0_f64.sqrt() - 1.0);
        let g2 = (3.0 - 3.0_f64.sqrt()) / 6.0;

        // Skew into simplex cell space
        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let i = i as i64;
        let j = j as i64;
        let corners = [
            (x0, y0, self.gradient_index(i, j)),
            (x1, y1, self.gradient_index(i + i1, j + j1)),
            (x2, y2, self.gradient_index(i + 1, j + 1)),
        ];

        let mut sum = 0.0;
        for (cx, cy, g) in corners {
            let falloff = 0.5 - cx * cx - cy * cy;
            if falloff > 0.0 {
                let (gx, gy) = GRADIENTS[g];
                let f2 = falloff * falloff;
                sum += f2 * f2 * (gx * cx + gy * cy);
            }
        }
        70.0 * sum
    }
}

/// Terrain height field shared by gameplay placement and mesh generation
#[derive(Debug, Clone)]
pub struct HeightField {
    noise: SimplexNoise,
    octaves: [Octave; 2],
    flat_radius: f64,
}

impl HeightField {
    pub fn new(seed: u64) -> Self {
        Self {
            noise: SimplexNoise::new(seed),
            octaves: [BASE_OCTAVE, DETAIL_OCTAVE],
            flat_radius: ARENA_FLAT_RADIUS,
        }
    }

    /// Sum of both octaves without arena flattening
    pub fn unflattened(&self, x: f64, z: f64) -> f64 {
        self.octaves
            .iter()
            .map(|o| self.noise.noise2d(x * o.frequency, z * o.frequency) * o.amplitude)
            .sum()
    }

    /// Terrain height at world position (x, z)
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let height = self.unflattened(x, z);
        let r = (x * x + z * z).sqrt();
        if r < self.flat_radius {
            height * smoothstep(r, 0.0, self.flat_radius) * ARENA_RELIEF
        } else {
            height
        }
    }
}
