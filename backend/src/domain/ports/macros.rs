//! `define_port_error!`: error enums for driven ports.
//!
//! Each variant becomes a `thiserror` variant with the given display string
//! plus a snake_case constructor. Field constructors take `impl Into<T>` so
//! adapters can write `GameRepositoryError::query(err.to_string())` or pass
//! a `&str` directly.

macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$doc:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $display:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$doc])*
                #[error($display)]
                $variant $( { $($field: $ty),* } )?,
            )*
        }

        impl $name {
            $( define_port_error!(@constructor $variant $( { $($field: $ty),* } )?); )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Builds [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = "Builds [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;
