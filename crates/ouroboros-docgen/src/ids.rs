//! Strongly typed handles shared by the oracle interface and the output model.
//!
//! Oracle handles ([`SymbolId`], [`TypeId`], [`NodeId`]) are opaque to the
//! engine; model handles ([`ModuleId`], [`ReferenceId`]) are allocated by the
//! extraction session and stay valid in the serialized output.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Construct an identifier from a raw value.
            pub const fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            /// Retrieve the underlying integer value.
            pub const fn to_raw(self) -> u32 {
                self.0
            }

            pub(crate) fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(SymbolId);
define_id!(TypeId);
define_id!(NodeId);
define_id!(ModuleId);
define_id!(ReferenceId);
