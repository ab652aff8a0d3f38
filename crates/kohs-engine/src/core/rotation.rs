use serde::{Deserialize, Serialize};

/// Clockwise rotation of a block, restricted to quarter turns.
///
/// Serialized as integer degrees (`0`, `90`, `180`, `270`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    #[display("0")]
    Deg0,
    #[display("90")]
    Deg90,
    #[display("180")]
    Deg180,
    #[display("270")]
    Deg270,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid rotation: {_0} (expected 0, 90, 180 or 270)")]
pub struct InvalidRotation(#[error(not(source))] u16);

impl Rotation {
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    #[must_use]
    pub const fn from_degrees(degrees: u16) -> Option<Self> {
        match degrees {
            0 => Some(Self::Deg0),
            90 => Some(Self::Deg90),
            180 => Some(Self::Deg180),
            270 => Some(Self::Deg270),
            _ => None,
        }
    }

    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Returns the rotation after one more quarter turn (+90° mod 360).
    #[must_use]
    pub const fn rotated_clockwise(self) -> Self {
        match self {
            Self::Deg0 => Self::Deg90,
            Self::Deg90 => Self::Deg180,
            Self::Deg180 => Self::Deg270,
            Self::Deg270 => Self::Deg0,
        }
    }
}

impl TryFrom<u16> for Rotation {
    type Error = InvalidRotation;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::from_degrees(value).ok_or(InvalidRotation(value))
    }
}

impl From<Rotation> for u16 {
    fn from(value: Rotation) -> Self {
        value.degrees()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_quarter_turns_return_home() {
        for rotation in Rotation::ALL {
            let mut r = rotation;
            for _ in 0..4 {
                r = r.rotated_clockwise();
            }
            assert_eq!(r, rotation);
            assert_eq!(
                rotation.rotated_clockwise().degrees(),
                (rotation.degrees() + 90) % 360
            );
        }
    }

    #[test]
    fn test_serialized_as_degrees() {
        assert_eq!(serde_json::to_string(&Rotation::Deg270).unwrap(), "270");
        assert_eq!(
            serde_json::from_str::<Rotation>("90").unwrap(),
            Rotation::Deg90
        );

        let err = serde_json::from_str::<Rotation>("45").unwrap_err();
        assert!(err.to_string().contains("invalid rotation"));
    }
}
