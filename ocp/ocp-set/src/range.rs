//! Stage range resolution.
//!
//! Every field declares a [`StageExtent`]: which stages it can be addressed
//! at, and which stages a whole-horizon request covers. Resolution turns the
//! caller's [`Addressing`] into a half-open [`StageRange`].

use ocp_types::{OcpError, Result};

/// How the caller addresses the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Every stage the field covers.
    WholeHorizon,
    /// One stage.
    Stage(usize),
}

impl From<Option<usize>> for Addressing {
    fn from(stage: Option<usize>) -> Self {
        stage.map_or(Self::WholeHorizon, Self::Stage)
    }
}

/// The stages a field can be addressed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageExtent {
    /// Shooting intervals `0..N`; whole horizon covers `[0, N)`.
    Intervals,
    /// Stages `0..=N`; whole horizon covers the intervals `[0, N)`.
    Stages,
    /// Stages `0..=N`; whole horizon covers every node `[0, N + 1)`.
    Nodes,
    /// Stages `0..=N`, one at a time only.
    SingleNode,
    /// Stage 0 only, implied.
    Initial,
    /// Stage N only, implied.
    Terminal,
    /// Not stage-indexed.
    Global,
}

/// Half-open range of stages `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageRange {
    /// First stage.
    pub start: usize,
    /// One past the last stage.
    pub end: usize,
}

impl StageRange {
    /// A range covering one stage.
    #[must_use]
    pub fn single(stage: usize) -> Self {
        Self {
            start: stage,
            end: stage + 1,
        }
    }

    /// Resolve `addressing` for `field` on a horizon of `n` intervals.
    ///
    /// [`StageExtent::Global`] fields resolve to an empty range.
    pub fn resolve(
        field: &str,
        addressing: Addressing,
        extent: StageExtent,
        n: usize,
    ) -> Result<Self> {
        match (extent, addressing) {
            (StageExtent::Global, Addressing::WholeHorizon) => Ok(Self { start: 0, end: 0 }),
            (StageExtent::Initial, Addressing::WholeHorizon) => Ok(Self::single(0)),
            (StageExtent::Terminal, Addressing::WholeHorizon) => Ok(Self::single(n)),
            (
                StageExtent::Global | StageExtent::Initial | StageExtent::Terminal,
                Addressing::Stage(_),
            ) => Err(unsupported(field, "single-stage")),
            (StageExtent::SingleNode, Addressing::WholeHorizon) => {
                Err(unsupported(field, "whole-horizon"))
            }
            (StageExtent::Intervals | StageExtent::Stages, Addressing::WholeHorizon) => {
                Ok(Self { start: 0, end: n })
            }
            (StageExtent::Nodes, Addressing::WholeHorizon) => Ok(Self { start: 0, end: n + 1 }),
            (_, Addressing::Stage(stage)) => {
                let last = if extent == StageExtent::Intervals {
                    n.saturating_sub(1)
                } else {
                    n
                };
                if stage > last {
                    return Err(OcpError::StageOutOfRange {
                        field: field.to_string(),
                        stage,
                        last,
                    });
                }
                Ok(Self::single(stage))
            }
        }
    }

    /// Iterate over the stages.
    pub fn iter(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the range covers no stage.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn unsupported(field: &str, mode: &'static str) -> OcpError {
    OcpError::UnsupportedAddressingMode {
        field: field.to_string(),
        mode,
    }
}
