//! Rain sedimentation forcings for the bulk two-moment scheme.
//!
//! Rain mass and rain-drop number are moved down a column with a
//! first-order upstream (donor-cell) finite-volume flux. The pass only adds
//! forcings (rates of change); time integration is left to the caller.
//!
//! # Submodules
//!
//! - [`column`]: the columnwise sweep ([`forcings_columnwise`])
//! - [`budget`]: column mass budget check of a sweep
//! - [`opts`]: the sedimentation switch
//!
//! # Example
//!
//! ```
//! use blk2m_rs::physics::SimmelTerminalVelocity;
//! use blk2m_rs::sedimentation::{
//!     forcings_columnwise, ColumnFields, ColumnForcings, MassBudget, Opts,
//! };
//! use blk2m_rs::types::Length;
//!
//! // five 200 m layers, rain in the middle, top first
//! let rhod = [0.9, 0.95, 1.0, 1.05, 1.1];
//! let rhod_rr = [0.0, 2e-4, 5e-4, 1e-4, 0.0];
//! let rhod_nr = [0.0, 2e2, 4e2, 1e2, 0.0];
//!
//! // other processes may already have written here
//! let mut drhod_rr = vec![0.0; 5];
//! let mut drhod_nr = vec![0.0; 5];
//! let before = drhod_rr.clone();
//!
//! let outflow = forcings_columnwise(
//!     &Opts::default(),
//!     &SimmelTerminalVelocity,
//!     &ColumnFields::new(&rhod, &rhod_rr, &rhod_nr),
//!     &mut ColumnForcings::new(&mut drhod_rr, &mut drhod_nr),
//!     Length::from_metres(200.0),
//! )
//! .unwrap();
//!
//! let budget = MassBudget::from_forcings(&before, &drhod_rr, outflow).unwrap();
//! assert!(budget.is_closed(1e-12));
//! ```

pub mod budget;
pub mod column;
pub mod opts;

pub use budget::MassBudget;
pub use column::{ColumnFields, ColumnForcings, forcings_columnwise};
pub use opts::Opts;
