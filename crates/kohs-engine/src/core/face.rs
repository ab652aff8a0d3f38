use serde::{Deserialize, Serialize};

use super::rotation::Rotation;

/// Number of entries in the face catalog.
pub const FACE_COUNT: usize = 6;

/// Color painted on a block face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceColor {
    #[display("red")]
    Red,
    #[display("white")]
    White,
    #[display("blue")]
    Blue,
    #[display("yellow")]
    Yellow,
}

/// Visual pattern family of a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceKind {
    /// A uniformly colored square. Looks the same at every rotation.
    Solid,
    /// A square split along its anti-diagonal into two colored triangles.
    Diagonal,
}

/// An immutable face definition from the global catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct Face {
    kind: FaceKind,
    colors: &'static [FaceColor],
}

/// The global face catalog, indexed by [`FaceIndex`].
///
/// Indices 0-3 are solid faces and indices 4-5 are diagonal bicolor splits.
/// Blocks refer to entries here by index and never own a copy.
pub static FACES: [Face; FACE_COUNT] = [
    Face::solid(&[FaceColor::Red]),
    Face::solid(&[FaceColor::White]),
    Face::solid(&[FaceColor::Blue]),
    Face::solid(&[FaceColor::Yellow]),
    Face::diagonal(&[FaceColor::Red, FaceColor::White]),
    Face::diagonal(&[FaceColor::Blue, FaceColor::Yellow]),
];

impl Face {
    const fn solid(colors: &'static [FaceColor; 1]) -> Self {
        Self {
            kind: FaceKind::Solid,
            colors,
        }
    }

    const fn diagonal(colors: &'static [FaceColor; 2]) -> Self {
        Self {
            kind: FaceKind::Diagonal,
            colors,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FaceKind {
        self.kind
    }

    /// Returns the face colors in catalog order (one for solid, two for diagonal).
    #[must_use]
    pub const fn colors(&self) -> &'static [FaceColor] {
        self.colors
    }

    /// Resolves the color visible at a normalized point of the face.
    ///
    /// `u` grows to the right and `v` grows downwards, both in `[0, 1)`.
    /// At [`Rotation::Deg0`] a diagonal face shows its first color in the
    /// upper-left triangle; each quarter turn moves that triangle clockwise.
    #[must_use]
    pub fn color_at(&self, rotation: Rotation, u: f32, v: f32) -> FaceColor {
        let [first, second] = match self.colors {
            [solid] => return *solid,
            [first, second] => [*first, *second],
            _ => unreachable!("catalog faces have one or two colors"),
        };
        let in_first = match rotation {
            Rotation::Deg0 => u + v < 1.0,
            Rotation::Deg90 => u > v,
            Rotation::Deg180 => u + v > 1.0,
            Rotation::Deg270 => v > u,
        };
        if in_first { first } else { second }
    }
}

/// Index into [`FACES`], guaranteed to be in range.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display, Serialize, Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct FaceIndex(u8);

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("face index {_0} out of range (expected 0-5)")]
pub struct FaceIndexOutOfRange(#[error(not(source))] u8);

impl FaceIndex {
    /// Solid faces occupy the first four catalog entries.
    pub const SOLID: [Self; 4] = [Self(0), Self(1), Self(2), Self(3)];
    /// Diagonal faces occupy the last two catalog entries.
    pub const DIAGONAL: [Self; 2] = [Self(4), Self(5)];

    #[must_use]
    pub fn new(index: u8) -> Option<Self> {
        if usize::from(index) < FACE_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Looks up the shared catalog entry.
    #[must_use]
    pub fn face(self) -> &'static Face {
        &FACES[usize::from(self.0)]
    }
}

impl TryFrom<u8> for FaceIndex {
    type Error = FaceIndexOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(FaceIndexOutOfRange(value))
    }
}

impl From<FaceIndex> for u8 {
    fn from(value: FaceIndex) -> Self {
        value.0
    }
}
