use crate::drag::clamp_to_viewport;
use mindfull_core::Vec2;

/// Initial placement of memory cards: row-major grid from the top-left.
#[derive(Debug, Clone, Copy)]
pub struct GridLayouter {
    /// Space between the viewport edge and the first row/column
    pub margin: f32,
    /// Space between neighbouring cards
    pub gap: f32,
}

impl Default for GridLayouter {
    fn default() -> Self {
        Self {
            margin: 40.0,
            gap: 60.0,
        }
    }
}

impl GridLayouter {
    /// Top-left positions for `count` cards of `node_size`.
    ///
    /// As many columns as fit the viewport width (at least one). Cells that
    /// would overflow the viewport are clamped inside it, so every card starts
    /// fully visible even when they end up overlapping.
    pub fn positions(&self, count: usize, node_size: Vec2, viewport: Vec2) -> Vec<Vec2> {
        let cell = node_size + Vec2::new(self.gap, self.gap);
        let usable = viewport.x - self.margin * 2.0 + self.gap;
        let columns = if cell.x > 0.0 {
            ((usable / cell.x).floor() as usize).max(1)
        } else {
            1
        };

        (0..count)
            .map(|i| {
                let (row, col) = (i / columns, i % columns);
                let candidate = Vec2::new(
                    self.margin + col as f32 * cell.x,
                    self.margin + row as f32 * cell.y,
                );
                clamp_to_viewport(candidate, node_size, viewport)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rows_and_columns() {
        let layouter = GridLayouter::default();
        let positions =
            layouter.positions(4, Vec2::new(220.0, 140.0), Vec2::new(1000.0, 800.0));

        // 1000 - 80 + 60 = 980 usable, 280 per cell: three columns
        assert_eq!(positions[0], Vec2::new(40.0, 40.0));
        assert_eq!(positions[1], Vec2::new(320.0, 40.0));
        assert_eq!(positions[2], Vec2::new(600.0, 40.0));
        assert_eq!(positions[3], Vec2::new(40.0, 240.0));
    }

    #[test]
    fn test_narrow_viewport_single_column() {
        let positions = GridLayouter::default().positions(
            2,
            Vec2::new(220.0, 140.0),
            Vec2::new(250.0, 800.0),
        );
        assert_eq!(positions[0].x, positions[1].x);
        assert!(positions[0].x + 220.0 <= 250.0);
    }

    #[test]
    fn test_overflow_is_clamped() {
        let viewport = Vec2::new(400.0, 300.0);
        let size = Vec2::new(220.0, 140.0);
        for pos in GridLayouter::default().positions(6, size, viewport) {
            assert!(pos.x + size.x <= viewport.x);
            assert!(pos.y + size.y <= viewport.y);
        }
    }
}
