use serde::{Deserialize, Serialize};

/// Grid coordinate, `y` before `x` to match the row-major grids everywhere
/// else in the crate. Used for both block-space and tile-space positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dy: i32, dx: i32) -> Pos {
        Pos { y: self.y + dy, x: self.x + dx }
    }
}

/// Which edge of its room an opening sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningDirection {
    Top,
    Right,
    Bottom,
    Left,
}

impl OpeningDirection {
    /// Unit step pointing out of the room, toward the block a corridor
    /// attaches to.
    pub fn outward(self) -> Pos {
        match self {
            OpeningDirection::Top => Pos { y: -1, x: 0 },
            OpeningDirection::Right => Pos { y: 0, x: 1 },
            OpeningDirection::Bottom => Pos { y: 1, x: 0 },
            OpeningDirection::Left => Pos { y: 0, x: -1 },
        }
    }
}

/// A declared corridor attachment point: a block-local position on the
/// room's edge plus the edge it faces. The block one `outward` step from
/// `pos` is the opening's entry block, where carved corridors terminate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(i32, i32, OpeningDirection)", into = "(i32, i32, OpeningDirection)")]
pub struct Opening {
    pub pos: Pos,
    pub direction: OpeningDirection,
}

impl From<(i32, i32, OpeningDirection)> for Opening {
    fn from((y, x, direction): (i32, i32, OpeningDirection)) -> Self {
        Opening { pos: Pos { y, x }, direction }
    }
}

impl From<Opening> for (i32, i32, OpeningDirection) {
    fn from(opening: Opening) -> Self {
        (opening.pos.y, opening.pos.x, opening.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openings_serialize_as_row_col_direction_triples() {
        let opening = Opening { pos: Pos { y: 2, x: 0 }, direction: OpeningDirection::Left };
        let json = serde_json::to_string(&opening).expect("serialize");
        assert_eq!(json, r#"[2,0,"left"]"#);

        let parsed: Opening = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, opening);
    }

    #[test]
    fn outward_steps_leave_the_room_on_the_named_edge() {
        assert_eq!(OpeningDirection::Top.outward(), Pos { y: -1, x: 0 });
        assert_eq!(OpeningDirection::Right.outward(), Pos { y: 0, x: 1 });
        assert_eq!(OpeningDirection::Bottom.outward(), Pos { y: 1, x: 0 });
        assert_eq!(OpeningDirection::Left.outward(), Pos { y: 0, x: -1 });
    }
}
