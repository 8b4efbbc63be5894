use crate::errors::DomainError;
use std::fmt;

/// Successful outcome of one PTR query, before any tree-depth reasoning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PtrLookup {
    /// NOERROR with PTR records; holds the target names.
    Answer(Vec<String>),
    /// NOERROR, the name exists but has no PTR records.
    NoData,
    /// NXDOMAIN.
    NxDomain,
}

/// What the walker does with a probed node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    LeafAnswer(Vec<String>),
    InteriorAmbiguous,
    Nonexistent,
    Timeout,
    TransportError(DomainError),
}

impl ProbeResult {
    pub fn label(&self) -> &'static str {
        match self {
            Self::LeafAnswer(_) => "LEAF",
            Self::InteriorAmbiguous => "NODATA",
            Self::Nonexistent => "NXDOMAIN",
            Self::Timeout => "TIMEOUT",
            Self::TransportError(_) => "ERROR",
        }
    }
}

impl fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeafAnswer(names) => {
                let count = names.len();
                write!(f, "{} PTR RR{}", count, if count == 1 { "" } else { "s" })
            }
            Self::InteriorAmbiguous => write!(f, "NoAnswer"),
            Self::Nonexistent => write!(f, "NXDOMAIN"),
            Self::Timeout => write!(f, "Timeout"),
            Self::TransportError(e) => write!(f, "Error ({})", e),
        }
    }
}
