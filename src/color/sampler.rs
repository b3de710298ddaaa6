//! Perceptual palette sampling.
//!
//! Picks a well-spread subset of a palette by greedy farthest-point
//! selection in a cylindrical hue/saturation/brightness embedding. This is a
//! single deterministic pass, not an iterative clustering.

use crate::color::Swatch;
use crate::color::codec::Hsb;

/// A color's position in the sampling space.
#[derive(Debug, Clone, Copy)]
struct SamplePoint {
    hue: f64,
    x: f64,
    y: f64,
    z: f64,
    vividness: f64,
}

impl SamplePoint {
    fn new(hsb: Hsb) -> Self {
        let radians = hsb.hue.to_radians();
        Self {
            hue: hsb.hue,
            x: hsb.saturation * radians.cos(),
            y: hsb.saturation * radians.sin(),
            z: hsb.brightness,
            vividness: hsb.saturation * (1.0 - (hsb.brightness - 0.5).abs()),
        }
    }

    fn distance(&self, other: &SamplePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Select `count` perceptually distinct colors from `colors`, returned in hue order.
///
/// When `count` is zero or not smaller than the source, the source is
/// returned unchanged.
pub fn sample_colors<T: Swatch + Clone>(colors: &[T], count: usize) -> Vec<T> {
    if count == 0 || count >= colors.len() {
        return colors.to_vec();
    }

    let mut remaining: Vec<(SamplePoint, &T)> = colors
        .iter()
        .map(|c| (SamplePoint::new(c.hex().hsb()), c))
        .collect();
    let mut selected: Vec<(SamplePoint, &T)> = Vec::with_capacity(count);

    // Seed with the most vivid color; ties keep the earliest.
    let mut seed = 0;
    for (idx, (point, _)) in remaining.iter().enumerate() {
        if point.vividness > remaining[seed].0.vividness {
            seed = idx;
        }
    }
    selected.push(remaining.remove(seed));

    while selected.len() < count && !remaining.is_empty() {
        let mut best_idx = 0;
        let mut best_min_dist = f64::NEG_INFINITY;

        for (idx, (candidate, _)) in remaining.iter().enumerate() {
            let min_dist = selected
                .iter()
                .map(|(chosen, _)| candidate.distance(chosen))
                .fold(f64::INFINITY, f64::min);
            if min_dist > best_min_dist {
                best_min_dist = min_dist;
                best_idx = idx;
            }
        }

        selected.push(remaining.remove(best_idx));
    }

    log::trace!("Sampled {} of {} colors", selected.len(), colors.len());

    selected.sort_by(|a, b| a.0.hue.total_cmp(&b.0.hue));
    selected.into_iter().map(|(_, color)| color.clone()).collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::color::codec::{HexColor, normalize};

    fn hexes(list: &[&str]) -> Vec<HexColor> {
        list.iter().map(|s| normalize(s).unwrap()).collect()
    }

    fn rainbow() -> Vec<HexColor> {
        hexes(&[
            "#E5191D", "#4376AC", "#4AA75A", "#87648F", "#D77F32", "#727690", "#D690C6",
            "#B17B7D", "#857B74", "#4386BF", "#204B75", "#588257", "#B7DB7B", "#E3BD05",
            "#FA9C93", "#E9358C", "#A1094E", "#999999",
        ])
    }

    #[test]
    fn test_returns_exact_count_without_duplicates() {
        let source = rainbow();
        for k in 2..source.len() {
            let sampled = sample_colors(&source, k);
            assert_eq!(sampled.len(), k);

            let unique: HashSet<_> = sampled.iter().collect();
            assert_eq!(unique.len(), k);
            assert!(sampled.iter().all(|c| source.contains(c)));
        }
    }

    #[test]
    fn test_out_of_range_count_returns_source() {
        let source = rainbow();
        assert_eq!(sample_colors(&source, 0), source);
        assert_eq!(sample_colors(&source, source.len()), source);
        assert_eq!(sample_colors(&source, source.len() + 5), source);
    }

    #[test]
    fn test_result_is_hue_ordered() {
        let sampled = sample_colors(&rainbow(), 6);
        for pair in sampled.windows(2) {
            assert!(pair[0].hsb().hue <= pair[1].hsb().hue);
        }
    }

    #[test]
    fn test_seed_prefers_vivid_mid_brightness() {
        // Pure red scores 0.5; the washed-out and dark colors score lower.
        let source = hexes(&["#F0F0F0", "#FF0000", "#202020", "#FFC0C0"]);
        let sampled = sample_colors(&source, 1);
        assert_eq!(sampled, hexes(&["#FF0000"]));
    }

    #[test]
    fn test_farthest_point_picks_opposite() {
        // After seeding with red, cyan is farthest away in the embedding.
        let source = hexes(&["#FF0000", "#FF2000", "#00FFFF", "#FF4000"]);
        let sampled = sample_colors(&source, 2);
        assert_eq!(sampled, hexes(&["#FF0000", "#00FFFF"]));
    }

    #[test]
    fn test_is_deterministic() {
        let source = rainbow();
        assert_eq!(sample_colors(&source, 5), sample_colors(&source, 5));
    }
}
