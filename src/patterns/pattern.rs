use super::*;
use crate::Meters;
use crate::pointcloud::Sampling;
use crate::waypoint::*;
use serde::Deserialize;
use serde::Serialize;

/// Pattern selection, resolved by name from configuration or the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Pattern {
    #[default]
    Smiley,
    Spiral {
        #[serde(default = "Pattern::turns")]
        turns: usize,
        #[serde(default = "Pattern::points_per_turn")]
        points_per_turn: usize,
    },
    Square {
        #[serde(default = "Pattern::size")]
        size: Meters,
        #[serde(default = "Pattern::points_per_side")]
        points_per_side: usize,
    },
    Pointcloud {
        source: std::path::PathBuf,
        #[serde(flatten)]
        sampling: Sampling,
    },
}

impl Pattern {
    pub const NAMES: [&'static str; 4] = ["smiley", "spiral", "square", "pointcloud"];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smiley => "smiley",
            Self::Spiral { .. } => "spiral",
            Self::Square { .. } => "square",
            Self::Pointcloud { .. } => "pointcloud",
        }
    }

    /// Build the path for this pattern.
    /// Shapes never fail; the pointcloud pattern fails on unreadable sources.
    pub fn generate(&self, config: &PatternConfig) -> Result<Path, PatternError> {
        let path = match self {
            Self::Smiley => smiley(config),
            Self::Spiral {
                turns,
                points_per_turn,
            } => spiral(config, *turns, *points_per_turn),
            Self::Square {
                size,
                points_per_side,
            } => square(config, *size, *points_per_side),
            Self::Pointcloud { source, sampling } => {
                crate::pointcloud::generate(source, config, sampling)?
            }
        };
        log::info!("[pattern] {} generated {} waypoints", self.name(), path.len());
        Ok(path)
    }

    fn turns() -> usize {
        crate::SPIRAL_TURNS
    }
    fn points_per_turn() -> usize {
        crate::SPIRAL_POINTS_PER_TURN
    }
    fn size() -> Meters {
        crate::SQUARE_SIZE
    }
    fn points_per_side() -> usize {
        crate::SQUARE_POINTS_PER_SIDE
    }
}

/// Shapes by name with default parameters.
/// `pointcloud` needs a source and is only reachable through configuration.
impl std::str::FromStr for Pattern {
    type Err = PatternError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "smiley" => Ok(Self::Smiley),
            "spiral" => Ok(Self::Spiral {
                turns: Self::turns(),
                points_per_turn: Self::points_per_turn(),
            }),
            "square" => Ok(Self::Square {
                size: Self::size(),
                points_per_side: Self::points_per_side(),
            }),
            "pointcloud" => Ok(Self::Pointcloud {
                source: std::path::PathBuf::new(),
                sampling: Sampling::default(),
            }),
            other => Err(PatternError::Unknown(other.to_string())),
        }
    }
}
