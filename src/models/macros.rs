/// Generates an integer-backed id newtype for a timetable entity.
///
/// Every id in the engine follows one convention: a `pub` tuple struct over
/// `i64` with the full comparison/hash/serde derive set, `Display`, `From`
/// conversions in both directions, and `new`/`value` accessors. Leading
/// attributes (doc comments included) are forwarded onto the generated
/// struct.
///
/// Usage:
///   define_id_type!(
///       /// Subject reference carried on lesson instances.
///       i64, SubjectId
///   );
#[macro_export]
macro_rules! define_id_type {
    ($(#[$meta:meta])* $inner:ty, $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}
