use std::fmt;

/// Identity of an addressable, storable step. Every non-negative wire integer
/// is a valid index.
pub type StepIndex = u64;

/// The wire value reserved for "end of flow".
pub const TERMINAL_WIRE: i64 = -1;

/// Where a step's success or failure path leads.
///
/// On the wire a target is a plain integer with `-1` meaning [`Target::End`].
/// Keeping the terminal case as its own variant means no real index can ever be
/// mistaken for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Target {
    /// Continue at the step stored under this index. The step may be absent.
    Step(StepIndex),
    /// The flow ends here.
    #[default]
    End,
}

impl Target {
    /// Decodes a wire integer. Every negative value is read as [`Target::End`].
    pub fn from_wire(raw: i64) -> Self {
        StepIndex::try_from(raw).map_or(Target::End, Target::Step)
    }

    /// Encodes as the wire integer, `-1` for [`Target::End`]. Indices beyond
    /// the wire range saturate at `i64::MAX` and never turn into `-1`.
    pub fn to_wire(self) -> i64 {
        match self {
            Target::Step(index) => i64::try_from(index).unwrap_or(i64::MAX),
            Target::End => TERMINAL_WIRE,
        }
    }

    /// The referenced index, or `None` for the terminal target.
    pub fn resolve(self) -> Option<StepIndex> {
        match self {
            Target::Step(index) => Some(index),
            Target::End => None,
        }
    }

    pub fn is_end(self) -> bool {
        matches!(self, Target::End)
    }
}

impl From<i64> for Target {
    fn from(raw: i64) -> Self {
        Target::from_wire(raw)
    }
}

impl From<Option<StepIndex>> for Target {
    fn from(index: Option<StepIndex>) -> Self {
        index.map_or(Target::End, Target::Step)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Step(index) => write!(f, "#{}", index),
            Target::End => write!(f, "END"),
        }
    }
}
