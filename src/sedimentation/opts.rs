//! Process switches for the sedimentation pass.

/// Options of the bulk scheme that the sedimentation pass reads.
///
/// Only the sedimentation switch lives here; droplet-distribution and other
/// process options belong to the caller's configuration layer.
///
/// # Example
///
/// ```
/// use blk2m_rs::sedimentation::Opts;
///
/// let opts = Opts::default();
/// assert!(opts.sedi);
///
/// let off = Opts::default().with_sedi(false);
/// assert_eq!(off, Opts::disabled());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opts {
    /// Whether rain sedimentation is active for this pass.
    pub sedi: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self { sedi: true }
    }
}

impl Opts {
    /// Options with sedimentation switched off.
    pub fn disabled() -> Self {
        Self { sedi: false }
    }

    /// Set whether sedimentation is active.
    pub fn with_sedi(mut self, sedi: bool) -> Self {
        self.sedi = sedi;
        self
    }
}
