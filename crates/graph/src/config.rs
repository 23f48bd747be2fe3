//! Construction-time graph configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two flags fixed when a graph is created.
///
/// Algorithms read these to choose between directed and undirected behaviour
/// (in/out-degree versus total degree, strong versus plain connectivity) and
/// to decide whether edge weights are available.
///
/// # Example
///
/// ```rust
/// use graphkit::GraphConfig;
///
/// let config = GraphConfig::directed().weighted(true);
/// assert!(config.directed);
/// assert!(config.weighted);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GraphConfig {
    /// Whether `(a, b)` and `(b, a)` are distinct edges.
    pub directed: bool,
    /// Whether edges carry a floating-point weight.
    pub weighted: bool,
}

impl GraphConfig {
    /// An undirected, unweighted configuration.
    #[must_use]
    pub const fn undirected() -> Self {
        Self {
            directed: false,
            weighted: false,
        }
    }

    /// A directed, unweighted configuration.
    #[must_use]
    pub const fn directed() -> Self {
        Self {
            directed: true,
            weighted: false,
        }
    }

    /// Set whether edges carry weights.
    #[must_use]
    pub const fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_undirected_unweighted() {
        assert_eq!(GraphConfig::default(), GraphConfig::undirected());
    }

    #[test]
    fn test_builder() {
        let config = GraphConfig::undirected().weighted(true);
        assert!(!config.directed);
        assert!(config.weighted);
        assert!(GraphConfig::directed().directed);
    }
}
