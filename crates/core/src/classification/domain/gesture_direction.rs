/// Outcome of one classification call.
///
/// `None` is both the initial state and the answer whenever the classifier
/// is not sure. Integral codes are stable across the C boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum GestureDirection {
    #[default]
    None = 0,
    Left = 1,
    Right = 2,
}

impl GestureDirection {
    pub const ALL: &[GestureDirection] = &[
        GestureDirection::None,
        GestureDirection::Left,
        GestureDirection::Right,
    ];

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Swaps Left and Right; None is unchanged.
    pub fn mirrored(self) -> Self {
        match self {
            GestureDirection::Left => GestureDirection::Right,
            GestureDirection::Right => GestureDirection::Left,
            GestureDirection::None => GestureDirection::None,
        }
    }
}

impl std::fmt::Display for GestureDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GestureDirection::None => write!(f, "none"),
            GestureDirection::Left => write!(f, "left"),
            GestureDirection::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_none() {
        assert_eq!(GestureDirection::default(), GestureDirection::None);
    }

    #[test]
    fn test_codes() {
        let codes: Vec<i32> = GestureDirection::ALL.iter().map(|d| d.code()).collect();
        assert_eq!(codes, vec![0, 1, 2]);
    }

    #[test]
    fn test_mirrored() {
        assert_eq!(GestureDirection::Left.mirrored(), GestureDirection::Right);
        assert_eq!(GestureDirection::Right.mirrored(), GestureDirection::Left);
        assert_eq!(GestureDirection::None.mirrored(), GestureDirection::None);
    }

    #[test]
    fn test_display() {
        assert_eq!(GestureDirection::Right.to_string(), "right");
    }
}
