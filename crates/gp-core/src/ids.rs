//! Graph handles.
//!
//! `NodeId` indexes the node arrays of a built graph and `EdgeId` its CSR
//! half-edge arrays.  The inner `u32` is public so ids can be minted from a
//! loop counter.

use std::fmt;

macro_rules! typed_id {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub u32);

        impl $name {
            /// Position in the graph's `Vec`s.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of a deduplicated segment endpoint.  Assigned densely from 0 in
    /// the order endpoints are first seen by the graph builder.
    NodeId
}

typed_id! {
    /// Index of a directed half-edge in CSR order.
    EdgeId
}
