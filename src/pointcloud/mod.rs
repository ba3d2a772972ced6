//! Point-cloud patterns.
//!
//! A cloud is loaded from PLY, then, strictly in this order: colors are
//! normalized to [0, 1]; the cloud is centered on its centroid and scaled so
//! its largest absolute coordinate equals `scale`; it is voxel-downsampled at
//! `density` (in those final units); optionally re-ordered into a zig-zag; and
//! finally mapped into the flight's NED frame.
//!
//! Native cloud axes: x horizontal, y vertical (up positive), z depth
//! (negative, more negative is farther).
mod cloud;
mod pipeline;
mod ply;
mod point;
mod sampling;
mod voxel;
mod zigzag;

pub use cloud::*;
pub use pipeline::*;
pub use ply::*;
pub use point::*;
pub use sampling::*;
