use crate::config::LayoutConfig;
use serde::Serialize;

/// Card edge, in traversal order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    /// Top to bottom
    Left,
    /// Left to right
    Bottom,
    /// Bottom to top
    Right,
    /// Right to left
    Top,
}

impl Edge {
    pub const CLOCKWISE: [Edge; 4] = [Edge::Left, Edge::Bottom, Edge::Right, Edge::Top];
}

/// Badge position relative to the card's top-left corner, in px
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

/// Places badges clockwise around the card perimeter.
///
/// Placement depends only on the slot index, never on slot contents.
#[derive(Debug, Clone, Copy)]
pub struct PerimeterLayout {
    config: LayoutConfig,
}

impl PerimeterLayout {
    pub const fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    /// Total perimeter capacity
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.config.max_slots()
    }

    const fn edge_capacity(&self, edge: Edge) -> usize {
        match edge {
            Edge::Left => self.config.edges.left,
            Edge::Bottom => self.config.edges.bottom,
            Edge::Right => self.config.edges.right,
            Edge::Top => self.config.edges.top,
        }
    }

    /// Edge and position along that edge for a slot index
    #[must_use]
    pub fn locate(&self, index: usize) -> Option<(Edge, usize)> {
        let mut offset = index;
        for edge in Edge::CLOCKWISE {
            let capacity = self.edge_capacity(edge);
            if offset < capacity {
                return Some((edge, offset));
            }
            offset -= capacity;
        }
        None
    }

    /// Badge position for a slot index; `None` past capacity
    #[must_use]
    pub fn position(&self, index: usize) -> Option<Position> {
        let (edge, i) = self.locate(index)?;
        let width = self.config.card_width;
        let height = self.config.card_height;
        let offset = self.config.badge_offset();
        let step = |length: f64| length / (self.edge_capacity(edge) as f64 + 1.0);
        let along = (i + 1) as f64;

        let position = match edge {
            Edge::Left => Position {
                top: step(height) * along - offset,
                left: -offset,
            },
            Edge::Bottom => Position {
                top: height - offset,
                left: step(width) * along - offset,
            },
            Edge::Right => Position {
                top: height - step(height) * along - offset,
                left: width - offset,
            },
            Edge::Top => Position {
                top: -offset,
                left: width - step(width) * along - offset,
            },
        };

        Some(position)
    }
}

impl Default for PerimeterLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_slot_of_each_edge() {
        let layout = PerimeterLayout::default();

        // left: 420 / 10 = 42 spacing
        assert_eq!(layout.position(0), Some(Position { top: 30.0, left: -12.0 }));
        // bottom: 280 / 7 = 40 spacing
        assert_eq!(layout.position(9), Some(Position { top: 408.0, left: 28.0 }));
        // right, from the bottom up
        assert_eq!(layout.position(15), Some(Position { top: 366.0, left: 268.0 }));
        // top, from the right
        assert_eq!(layout.position(24), Some(Position { top: -12.0, left: 228.0 }));
    }

    #[test]
    fn test_locate_walks_edges_clockwise() {
        let layout = PerimeterLayout::default();
        assert_eq!(layout.locate(0), Some((Edge::Left, 0)));
        assert_eq!(layout.locate(8), Some((Edge::Left, 8)));
        assert_eq!(layout.locate(9), Some((Edge::Bottom, 0)));
        assert_eq!(layout.locate(15), Some((Edge::Right, 0)));
        assert_eq!(layout.locate(29), Some((Edge::Top, 5)));
        assert_eq!(layout.locate(30), None);
        assert_eq!(layout.position(30), None);
    }

    #[test]
    fn test_position_is_pure() {
        let layout = PerimeterLayout::default();
        for index in 0..layout.capacity() {
            assert_eq!(layout.position(index), layout.position(index));
        }
    }

    #[test]
    fn test_positions_monotonic_along_each_edge() {
        let layout = PerimeterLayout::default();
        let positions: Vec<_> = (0..layout.capacity())
            .map(|i| (layout.locate(i).unwrap().0, layout.position(i).unwrap()))
            .collect();

        for pair in positions.windows(2) {
            let ((edge_a, a), (edge_b, b)) = (pair[0], pair[1]);
            if edge_a != edge_b {
                continue;
            }
            match edge_a {
                Edge::Left => assert!(b.top > a.top && b.left == a.left),
                Edge::Bottom => assert!(b.left > a.left && b.top == a.top),
                Edge::Right => assert!(b.top < a.top && b.left == a.left),
                Edge::Top => assert!(b.left < a.left && b.top == a.top),
            }
        }
    }

    #[test]
    fn test_no_badge_centered_on_a_corner() {
        let config = LayoutConfig::default();
        let layout = PerimeterLayout::new(config);
        let offset = config.badge_offset();
        let corners = [
            (0.0, 0.0),
            (0.0, config.card_width),
            (config.card_height, 0.0),
            (config.card_height, config.card_width),
        ];

        for index in 0..layout.capacity() {
            let pos = layout.position(index).unwrap();
            let center = (pos.top + offset, pos.left + offset);
            assert!(!corners.contains(&center), "slot {index} sits on a corner");
        }
    }

    #[test]
    fn test_unvalidated_huge_capacity_does_not_overflow() {
        let mut config = LayoutConfig::default();
        config.edges.left = usize::MAX;
        config.edges.bottom = usize::MAX;
        let layout = PerimeterLayout::new(config);
        assert_eq!(layout.capacity(), usize::MAX);
        assert_eq!(layout.locate(usize::MAX - 1), Some((Edge::Left, usize::MAX - 1)));
        assert!(layout.position(0).is_some());
    }

    #[test]
    fn test_skipped_edges_with_zero_capacity() {
        let mut config = LayoutConfig::default();
        config.edges.bottom = 0;
        let layout = PerimeterLayout::new(config);
        assert_eq!(layout.capacity(), 24);
        assert_eq!(layout.locate(9), Some((Edge::Right, 0)));
    }
}
