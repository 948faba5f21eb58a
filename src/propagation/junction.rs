//! Junction classification and angle-dependent transmission
//!
//! A junction is seen from the path crossing it: directions are relative
//! to the edge the wave arrives on (`Backward` points back along that
//! edge). Classification only depends on which of the four relative
//! directions carry a street and on their widths.

use crate::model::components::COMPASS_SLOTS;
use crate::{Error, NodeId};

/// Direction of a street at a junction, relative to the entry edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Forward,
    Right,
    Backward,
}

impl Direction {
    /// Relative direction of an edge in compass slot `orientation` at a
    /// node entered through the edge in compass slot `entry`.
    pub fn relative_to(orientation: u8, entry: u8) -> Direction {
        match (orientation + COMPASS_SLOTS - entry) % COMPASS_SLOTS {
            0 => Direction::Backward,
            1 => Direction::Right,
            2 => Direction::Forward,
            _ => Direction::Left,
        }
    }

    pub fn is_lateral(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Street widths present at a junction, keyed by relative direction.
/// `backward` is the entry street and is always present on a walked path.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ApproachWidths {
    pub left: Option<f64>,
    pub forward: Option<f64>,
    pub right: Option<f64>,
    pub backward: Option<f64>,
}

impl ApproachWidths {
    pub fn get(&self, direction: Direction) -> Option<f64> {
        match direction {
            Direction::Left => self.left,
            Direction::Forward => self.forward,
            Direction::Right => self.right,
            Direction::Backward => self.backward,
        }
    }

    pub fn set(&mut self, direction: Direction, width: f64) {
        match direction {
            Direction::Left => self.left = Some(width),
            Direction::Forward => self.forward = Some(width),
            Direction::Right => self.right = Some(width),
            Direction::Backward => self.backward = Some(width),
        }
    }

    /// Number of intersecting streets
    pub fn arms(&self) -> usize {
        [self.left, self.forward, self.right, self.backward]
            .iter()
            .filter(|w| w.is_some())
            .count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JunctionKind {
    DeadEnd,
    Bend,
    TJunction,
    SideStreet,
    Crossroads,
}

/// Classified junction on a walked path, one per interior node.
///
/// Discarded once its [`Transmission`] and rotation flag are consumed.
#[derive(Debug, Clone, Copy)]
pub struct Junction {
    kind: JunctionKind,
    exit: Direction,
    /// Exit street width over entry street width
    ratio: f64,
}

impl Junction {
    /// Classifies the junction and validates its geometry.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedJunction`] when the number of intersecting
    /// streets is outside `1..=4`, [`Error::UnimplementedGeometry`] when a
    /// t-junction, side-street or crossroads has opposite streets of
    /// unequal width. Only junctions with equal-width opposite streets
    /// have a closed-form transmission model.
    pub fn new(widths: &ApproachWidths, exit: Direction, node: NodeId) -> Result<Self, Error> {
        let arms = widths.arms();
        let kind = match arms {
            1 => JunctionKind::DeadEnd,
            2 => JunctionKind::Bend,
            3 => {
                if widths.left.is_some() && widths.right.is_some() {
                    JunctionKind::TJunction
                } else {
                    JunctionKind::SideStreet
                }
            }
            4 => JunctionKind::Crossroads,
            _ => return Err(Error::UnsupportedJunction { node, arms }),
        };
        validate_symmetry(kind, widths, node)?;

        let entry = widths
            .backward
            .ok_or_else(|| Error::InvalidData(format!("no entry street at node {node}")))?;
        let exiting = widths
            .get(exit)
            .ok_or_else(|| Error::InvalidData(format!("no exit street at node {node}")))?;

        Ok(Self {
            kind,
            exit,
            ratio: exiting / entry,
        })
    }

    pub fn kind(&self) -> JunctionKind {
        self.kind
    }

    /// Whether crossing this junction flips the lateral angle convention,
    /// so downstream incidence angles read `π/2 − θ`
    pub fn rotates(&self) -> bool {
        self.exit.is_lateral()
    }

    /// Transmission coefficient as a function of the incidence angle,
    /// selected per junction kind and exit direction.
    pub fn transmission(&self) -> Transmission {
        use Direction::{Backward, Forward};
        use JunctionKind::{Bend, Crossroads, DeadEnd, SideStreet, TJunction};

        let r = self.ratio;
        match (self.kind, self.exit) {
            // A dead-end has a single egress, everything returns
            (DeadEnd, _) => Transmission::Constant(1.0),
            (Bend, Backward) => Transmission::Crossing { ratio: r },
            (Bend, _) => Transmission::Turning {
                ratio: r,
                lanes: 2.0,
            },
            (TJunction, Backward) => Transmission::Crossing { ratio: 2.0 * r },
            (TJunction, _) => Transmission::Turning {
                ratio: 2.0 * r,
                lanes: 1.0,
            },
            // No return through a side branch
            (SideStreet, Backward) => Transmission::Constant(0.0),
            (SideStreet, Forward) => Transmission::Crossing { ratio: 0.5 * r },
            (SideStreet, _) => Transmission::Turning {
                ratio: 0.5 * r,
                lanes: 2.0,
            },
            (Crossroads, Backward) => Transmission::Constant(0.0),
            (Crossroads, Forward) => Transmission::Crossing { ratio: r },
            (Crossroads, _) => Transmission::Turning {
                ratio: r,
                lanes: 1.0,
            },
        }
    }
}

fn validate_symmetry(
    kind: JunctionKind,
    widths: &ApproachWidths,
    node: NodeId,
) -> Result<(), Error> {
    let laterals_match = widths.left == widths.right;
    let through_matches = widths.backward == widths.forward;
    let symmetric = match kind {
        JunctionKind::DeadEnd | JunctionKind::Bend => true,
        JunctionKind::TJunction => laterals_match,
        JunctionKind::SideStreet => through_matches,
        JunctionKind::Crossroads => laterals_match && through_matches,
    };
    if symmetric {
        Ok(())
    } else {
        Err(Error::UnimplementedGeometry { node })
    }
}

/// Angle-dependent transmission coefficient of one junction crossing.
///
/// A small value object holding the effective width ratio, rather than a
/// boxed closure, so integrands stay `Copy` and inspectable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transmission {
    Constant(f64),
    /// `max(1 − ratio·tanθ, 0)`: passing straight through
    Crossing { ratio: f64 },
    /// `lanes · 0.5 · min(ratio·tanθ, 1)`: turning laterally; `lanes` is
    /// 2 where a single lateral street collects both turning directions
    Turning { ratio: f64, lanes: f64 },
}

impl Transmission {
    pub fn evaluate(&self, theta: f64) -> f64 {
        match *self {
            Transmission::Constant(value) => value,
            Transmission::Crossing { ratio } => (1.0 - ratio * theta.tan()).max(0.0),
            Transmission::Turning { ratio, lanes } => {
                lanes * 0.5 * (ratio * theta.tan()).min(1.0)
            }
        }
    }

    /// Angle where the piecewise formula saturates and stops being
    /// smooth, used to split the quadrature domain. `None` for constant
    /// transmissions.
    pub fn breaking_point(&self) -> Option<f64> {
        match *self {
            Transmission::Constant(_) => None,
            Transmission::Crossing { ratio } | Transmission::Turning { ratio, .. } => {
                (ratio > 0.0).then(|| (1.0 / ratio).atan())
            }
        }
    }
}
