//! `define_port_error!`: error enums for the account ports.
//!
//! Variants are either bare (`DuplicateEmail => "…"`) or carry the adapter's
//! description of the fault (`Query(message) => "…: {message}"`). For every
//! variant the macro emits a snake-case constructor taking
//! `impl Into<String>`, plus `detail()`, which returns the adapter's message
//! without the display prefix. An optional `unavailable = [..];` clause
//! names the variants that mean the store could not be reached and generates
//! `is_unavailable()`; services map those to `503` rather than `500`.

macro_rules! define_port_error {
    (@variant $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@variant $variant:ident $field:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($field: impl Into<String>) -> Self {
                Self::$variant { $field: $field.into() }
            }
        }
    };

    (@detail $message:literal) => {
        ::std::string::String::from($message)
    };

    (@detail $message:literal $field:ident) => {
        ::std::clone::Clone::clone($field)
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( ( $field:ident ) )? => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $field: String } )?,
            )+
        }

        impl $name {
            $(
                define_port_error!(@variant $variant $( $field )?);
            )+

            /// Adapter-supplied description of the failure.
            pub fn detail(&self) -> String {
                match self {
                    $(
                        Self::$variant $( { $field } )? => {
                            define_port_error!(@detail $message $( $field )?)
                        }
                    )+
                }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident { $($body:tt)* }
        unavailable = [ $($unavailable:ident),+ $(,)? ];
    ) => {
        define_port_error! {
            $(#[$outer])*
            pub enum $name { $($body)* }
        }

        impl $name {
            /// Whether the backing store could not be reached at all.
            pub fn is_unavailable(&self) -> bool {
                matches!(self, $( Self::$unavailable { .. } )|+)
            }
        }
    };
}

pub(crate) use define_port_error;
