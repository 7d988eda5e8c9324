//! Utility code.


/// Derive an implementation of From<InnerType> for one variant of a unary enum.
/// Adapter from the source of error_derive crate.
macro_rules! derive_enum_from(
    ($inner:ty => $enum_:ident::$variant:ident) => {
        impl ::std::convert::From<$inner> for $enum_ {
            fn from(v: $inner) -> $enum_ {
                $enum_::$variant(v)
            }
        }
    }
);
