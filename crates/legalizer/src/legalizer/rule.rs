//! Branching rules: how the overlapping pair to split on is chosen.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Score used to pick the overlapping pair to branch on; the highest score
/// wins and ties go to the pair enumerated first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BranchRule {
    /// Area of the overlap.
    #[default]
    Area,
    /// Smallest displacement that resolves the pair.
    MinDisplacement,
    /// Largest displacement among the four separations.
    MaxDisplacement,
    /// Mean displacement over the four separations.
    AvgDisplacement,
    /// Smallest dimension of the two rectangles.
    MinDimension,
    MaxDimension,
    AvgDimension,
    /// Cheapest projected cost over the separations, via `FlowNetwork::try_edge`.
    CostProbe,
    /// Same as `CostProbe`, but by applying each separation to a scratch copy.
    CostTrial,
}

impl BranchRule {
    pub const ALL: [BranchRule; 9] = [
        BranchRule::Area,
        BranchRule::MinDisplacement,
        BranchRule::MaxDisplacement,
        BranchRule::AvgDisplacement,
        BranchRule::MinDimension,
        BranchRule::MaxDimension,
        BranchRule::AvgDimension,
        BranchRule::CostProbe,
        BranchRule::CostTrial,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BranchRule::Area => "area",
            BranchRule::MinDisplacement => "min-displacement",
            BranchRule::MaxDisplacement => "max-displacement",
            BranchRule::AvgDisplacement => "avg-displacement",
            BranchRule::MinDimension => "min-dimension",
            BranchRule::MaxDimension => "max-dimension",
            BranchRule::AvgDimension => "avg-dimension",
            BranchRule::CostProbe => "cost-probe",
            BranchRule::CostTrial => "cost-trial",
        }
    }
}

impl fmt::Display for BranchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown branching rule `{0}`")]
pub struct RuleParseError(pub String);

impl FromStr for BranchRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        BranchRule::ALL
            .into_iter()
            .find(|rule| rule.name() == key)
            .ok_or_else(|| RuleParseError(s.to_string()))
    }
}
