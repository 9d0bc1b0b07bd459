//! Localized difference regions from an SSIM map
//!
//! The per-pixel similarity map is thresholded into a binary mismatch
//! mask, then grouped into 8-connected components. Only the first few
//! components found in scan order are reported, and tiny speckles are
//! dropped.

use crate::models::{BoundingBox, DiffRegion};

/// Map values at or below this (in 0-255 scale) count as mismatched
const DIFF_THRESHOLD: u8 = 200;

/// Components covering this many pixels or fewer are noise
const MIN_REGION_AREA: u32 = 100;

/// At most this many components are examined, in scan order
const MAX_REGIONS: usize = 5;

/// Extract difference regions from a dense SSIM map
pub(crate) fn find_diff_regions(map: &[f64], width: usize, height: usize) -> Vec<DiffRegion> {
    let mask: Vec<bool> = map
        .iter()
        .map(|&v| ((v.clamp(0.0, 1.0) * 255.0) as u8) <= DIFF_THRESHOLD)
        .collect();

    let mut visited = vec![false; mask.len()];
    let mut regions = Vec::new();
    let mut examined = 0usize;
    let mut stack = Vec::new();

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }
        if examined >= MAX_REGIONS {
            break;
        }
        examined += 1;

        // Flood fill one component, tracking its bounding box
        let mut min_x = width;
        let mut max_x = 0usize;
        let mut min_y = height;
        let mut max_y = 0usize;
        let mut area = 0u32;

        visited[start] = true;
        stack.push(start);
        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
            area += 1;

            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                        continue;
                    }
                    let nidx = ny as usize * width + nx as usize;
                    if mask[nidx] && !visited[nidx] {
                        visited[nidx] = true;
                        stack.push(nidx);
                    }
                }
            }
        }

        if area > MIN_REGION_AREA {
            regions.push(DiffRegion {
                bbox: BoundingBox {
                    x: min_x as u32,
                    y: min_y as u32,
                    w: (max_x - min_x + 1) as u32,
                    h: (max_y - min_y + 1) as u32,
                },
                area,
            });
        }
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_from_mask(mask: &[bool]) -> Vec<f64> {
        mask.iter().map(|&m| if m { 0.0 } else { 1.0 }).collect()
    }

    #[test]
    fn test_no_regions_on_clean_map() {
        let map = vec![1.0f64; 20 * 20];
        assert!(find_diff_regions(&map, 20, 20).is_empty());
    }

    #[test]
    fn test_single_block_region() {
        let width = 40;
        let height = 40;
        let mut mask = vec![false; width * height];
        for y in 5..25 {
            for x in 10..22 {
                mask[y * width + x] = true;
            }
        }
        let regions = find_diff_regions(&map_from_mask(&mask), width, height);

        assert_eq!(regions.len(), 1);
        let r = &regions[0];
        assert_eq!(r.bbox, BoundingBox { x: 10, y: 5, w: 12, h: 20 });
        assert_eq!(r.area, 240);
    }

    #[test]
    fn test_small_speckles_are_dropped() {
        let width = 30;
        let height = 30;
        let mut mask = vec![false; width * height];
        // 3x3 speckle, well under the area floor
        for y in 2..5 {
            for x in 2..5 {
                mask[y * width + x] = true;
            }
        }
        assert!(find_diff_regions(&map_from_mask(&mask), width, height).is_empty());
    }

    #[test]
    fn test_diagonal_pixels_join_one_component() {
        let width = 60;
        let height = 60;
        let mut mask = vec![false; width * height];
        // Two 8x8 blocks touching only at a corner
        for y in 0..8 {
            for x in 0..8 {
                mask[y * width + x] = true;
                mask[(y + 8) * width + (x + 8)] = true;
            }
        }
        let regions = find_diff_regions(&map_from_mask(&mask), width, height);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 128);
    }

    #[test]
    fn test_region_cap() {
        let width = 100;
        let height = 100;
        let mut mask = vec![false; width * height];
        // Seven separated 11x11 blocks (area 121 > floor); only the
        // first five scan-order components are examined
        for block in 0..7 {
            let bx = (block % 4) * 25;
            let by = (block / 4) * 30;
            for y in by..by + 11 {
                for x in bx..bx + 11 {
                    mask[y * width + x] = true;
                }
            }
        }
        let regions = find_diff_regions(&map_from_mask(&mask), width, height);
        assert_eq!(regions.len(), 5);
    }
}
