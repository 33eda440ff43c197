//! Ids for use in typed collections.
//!
//! Both kinds of id are 0-based positions in the workflow document's
//! `processes` and `signals` arrays.

macro_rules! id {
    ($name:ident, $ty:ty) => {
        #[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name($ty);

        impl From<$name> for usize {
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl From<usize> for $name {
            fn from(val: usize) -> $name {
                Self(val as $ty)
            }
        }

        impl From<$name> for $ty {
            fn from(id: $name) -> $ty {
                id.0
            }
        }

        impl From<$ty> for $name {
            fn from(val: $ty) -> $name {
                Self(val)
            }
        }
    };
}

id!(ProcessId, u32);
id!(SignalId, u32);

// graph node identifiers are 1-based, e.g. "process:1" for the first process.
impl std::fmt::Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "process:{}", self.0 + 1)
    }
}

impl std::fmt::Display for SignalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "signal:{}", self.0 + 1)
    }
}
