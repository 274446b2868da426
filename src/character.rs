//! Stat-block generation: a fixed set of named stats, each backed by a
//! dice-expression formula, rolled (or averaged) through the interpreter.

use crate::interp::Environment;
use crate::{parse_and_run_script, Error, Outcome};
use std::fmt;

/// The stats a block always contains, in declaration order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Stat {
    Strength,
    Constitution,
    Size,
    Dexterity,
    Appearance,
    Intelligence,
    Power,
    Education,
}

impl Stat {
    pub const ALL: [Stat; 8] = [
        Stat::Strength,
        Stat::Constitution,
        Stat::Size,
        Stat::Dexterity,
        Stat::Appearance,
        Stat::Intelligence,
        Stat::Power,
        Stat::Education,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Constitution => "CON",
            Self::Size => "SIZ",
            Self::Dexterity => "DEX",
            Self::Appearance => "APP",
            Self::Intelligence => "INT",
            Self::Power => "POW",
            Self::Education => "EDU",
        }
    }

    fn default_formula(&self) -> &'static str {
        match self {
            Self::Strength
            | Self::Constitution
            | Self::Dexterity
            | Self::Appearance
            | Self::Power => "3d6 * 5",
            Self::Size | Self::Intelligence | Self::Education => "(2d6 + 6) * 5",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One formula per [`Stat`]. The stat set is closed; only the formulas can
/// be swapped out.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct StatBlock {
    formulas: [String; 8],
}

impl Default for StatBlock {
    fn default() -> Self {
        Self {
            formulas: Stat::ALL.map(|stat| stat.default_formula().to_owned()),
        }
    }
}

impl StatBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn formula(&self, stat: Stat) -> &str {
        &self.formulas[stat.index()]
    }

    pub fn set_formula(&mut self, stat: Stat, formula: impl Into<String>) -> &mut Self {
        self.formulas[stat.index()] = formula.into();
        self
    }

    /// The declaration script equivalent of this block.
    pub fn script(&self) -> String {
        Stat::ALL
            .iter()
            .map(|stat| format!("{}: {}\n", stat, self.formula(*stat)))
            .collect()
    }

    /// Roll every stat, yielding a name-to-value environment.
    pub fn generate(&self, average: bool) -> Result<Outcome<Environment>, Error> {
        parse_and_run_script(&self.script(), average)
    }
}
