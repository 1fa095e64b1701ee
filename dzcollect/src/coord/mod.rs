//! Morton addressing and collection grid arithmetic
//!
//! Maps linear item ids onto the 2D tile grid of the deepest collection
//! level and derives the collection-wide constants (`max_level`, Morton bit
//! depth, reduction grid size) from the item count.

mod types;

pub use types::{MortonCoord, TileCoord, TILE_SIZE};

/// Converts a linear item index to its (row, col) grid position.
///
/// This is the half-resolution interleave used by Deep Zoom collection tile
/// naming: for each bit position `i` below `bit_depth`, bit `2i` of the index
/// becomes bit `i` of the row and bit `2i + 1` becomes bit `i` of the column.
/// Even bit planes feed the row, odd bit planes feed the column.
///
/// Pure and total: every index maps to exactly one position, and distinct
/// indices below `2^(2 * bit_depth)` never collide.
#[inline]
pub fn morton_coords(index: u32, bit_depth: u32) -> MortonCoord {
    let mut row = 0;
    let mut col = 0;
    for i in 0..bit_depth {
        row |= ((index >> (2 * i)) & 1) << i;
        col |= ((index >> (2 * i + 1)) & 1) << i;
    }
    MortonCoord { row, col }
}

/// Deepest level of a collection with `item_count` items:
/// `floor(log2(item_count))`.
///
/// # Panics
///
/// Panics if `item_count` is zero. The builder rejects empty inputs before
/// any level arithmetic runs.
#[inline]
pub fn max_level_for(item_count: u32) -> u32 {
    assert!(item_count > 0, "collection requires at least one item");
    item_count.ilog2()
}

/// Morton bit depth for a collection with `item_count` items:
/// `ceil(log2(item_count) / 2)`, i.e. the smallest `l` with
/// `4^l >= item_count`.
#[inline]
pub fn bit_depth_for(item_count: u32) -> u32 {
    let mut depth = 0;
    while (1u64 << (2 * depth)) < item_count as u64 {
        depth += 1;
    }
    depth
}

/// Side length of the 2×2 block scan at every reduction level:
/// `ceil(sqrt(item_count))` rounded up to the next even integer, widened to
/// the full Morton address range `2^bit_depth` when that is larger (some
/// counts, e.g. 22, place an item beyond the square-root bound).
///
/// The same bound is reused at every level; occupancy, not grid size,
/// shrinks as levels coarsen.
#[inline]
pub fn grid_size_for(item_count: u32) -> u32 {
    let mut size = (item_count as f64).sqrt().ceil() as u32;
    if size % 2 != 0 {
        size += 1;
    }
    size.max(1 << bit_depth_for(item_count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_morton_zero_maps_to_origin() {
        for depth in 0..8 {
            assert_eq!(morton_coords(0, depth), MortonCoord { row: 0, col: 0 });
        }
    }

    #[test]
    fn test_morton_first_quad() {
        // Bit 0 drives the row, bit 1 the column.
        assert_eq!(morton_coords(1, 1), MortonCoord { row: 1, col: 0 });
        assert_eq!(morton_coords(2, 1), MortonCoord { row: 0, col: 1 });
        assert_eq!(morton_coords(3, 1), MortonCoord { row: 1, col: 1 });
    }

    #[test]
    fn test_morton_injective_and_confined() {
        for depth in 0..=4u32 {
            let count = 1u32 << (2 * depth);
            let mut seen = HashSet::new();
            for index in 0..count {
                let coord = morton_coords(index, depth);
                assert!(coord.row < (1 << depth), "row out of range for {index}");
                assert!(coord.col < (1 << depth), "col out of range for {index}");
                assert!(
                    seen.insert((coord.row, coord.col)),
                    "collision at index {index}, depth {depth}"
                );
            }
        }
    }

    #[test]
    fn test_morton_five_items() {
        // The five distinct addresses exercised by a 5-item collection.
        let coords: Vec<_> = (0..5).map(|i| morton_coords(i, bit_depth_for(5))).collect();
        assert_eq!(coords[0], MortonCoord { row: 0, col: 0 });
        assert_eq!(coords[1], MortonCoord { row: 1, col: 0 });
        assert_eq!(coords[2], MortonCoord { row: 0, col: 1 });
        assert_eq!(coords[3], MortonCoord { row: 1, col: 1 });
        assert_eq!(coords[4], MortonCoord { row: 2, col: 0 });
    }

    #[test]
    fn test_max_level() {
        assert_eq!(max_level_for(1), 0);
        assert_eq!(max_level_for(2), 1);
        assert_eq!(max_level_for(4), 2);
        assert_eq!(max_level_for(5), 2);
        assert_eq!(max_level_for(8), 3);
        assert_eq!(max_level_for(1000), 9);
    }

    #[test]
    #[should_panic(expected = "at least one item")]
    fn test_max_level_rejects_zero() {
        max_level_for(0);
    }

    #[test]
    fn test_bit_depth() {
        assert_eq!(bit_depth_for(1), 0);
        assert_eq!(bit_depth_for(2), 1);
        assert_eq!(bit_depth_for(4), 1);
        assert_eq!(bit_depth_for(5), 2);
        assert_eq!(bit_depth_for(16), 2);
        assert_eq!(bit_depth_for(17), 3);
    }

    #[test]
    fn test_bit_depth_covers_item_count() {
        // Every id below the item count must fit the depth's address space.
        for count in 1..200u32 {
            let depth = bit_depth_for(count);
            assert!(1u64 << (2 * depth) >= count as u64);
        }
    }

    #[test]
    fn test_grid_size_even_and_covering() {
        assert_eq!(grid_size_for(1), 2);
        assert_eq!(grid_size_for(4), 2);
        assert_eq!(grid_size_for(5), 4);
        assert_eq!(grid_size_for(10), 4);
        assert_eq!(grid_size_for(17), 8);
        assert_eq!(grid_size_for(22), 8);

        // The scan bound must cover every Morton address in use.
        for count in 1..300u32 {
            let size = grid_size_for(count);
            assert_eq!(size % 2, 0);
            let depth = bit_depth_for(count);
            for index in 0..count {
                let coord = morton_coords(index, depth);
                assert!(coord.row < size, "row {} escapes grid {}", coord.row, size);
                assert!(coord.col < size, "col {} escapes grid {}", coord.col, size);
            }
        }
    }

    #[test]
    fn test_tile_coord_display_and_stem() {
        let coord = TileCoord::new(3, 2, 5);
        assert_eq!(coord.to_string(), "3/2_5");
        assert_eq!(coord.file_stem(), "2_5");
    }
}
