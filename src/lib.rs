//! earclip - Ear-clipping triangulation for geographic polygon rings
//!
//! Decomposes simple (possibly non-convex) polygon rings into triangles by
//! iterative ear clipping over a mutable vertex ring with logical deletion.
//! Built for vector map data: rings arrive as ordered coordinate sequences
//! with no implied winding, get canonicalized in place, and stream out as
//! triangles ready for a rendering layer. Entities triangulate concurrently
//! and independently; a pathological ring fails with a structured
//! diagnostic instead of hanging or poisoning its siblings.
//!
//! ```
//! use earclip::{triangulate, Point2, Ring};
//!
//! let mut ring = Ring::new();
//! for (x, y) in [(0.0, 0.0), (2.0, 0.0), (2.0, 1.0), (1.0, 1.0), (1.0, 2.0), (0.0, 2.0)] {
//!     ring.push_back(Point2::new(x, y), 0.0);
//! }
//! ring.set_clockwise();
//! ring.set_to_leftmost();
//!
//! let result = triangulate(&mut ring);
//! assert_eq!(result.triangles.len(), 4);
//! ```

pub mod batch;
pub mod error;
pub mod point;
pub mod predicates;
pub mod ring;
pub mod triangulate;

pub use batch::{
    default_workers, triangulate_entities, BatchConfig, BatchSummary, Entity, EntityReport,
};
pub use error::NonConvergence;
pub use point::Point2;
pub use predicates::{is_colinear, is_convex, point_in_triangle};
pub use ring::{Ring, Vertex};
pub use triangulate::{triangulate, triangulation_area, Ears, RingTriangulation, Triangle};
