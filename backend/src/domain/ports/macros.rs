//! `define_port_error!`: builds a port error enum with `thiserror` messages
//! and one snake_case constructor per variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $(
                    #[doc = concat!("`", stringify!($field), "` detail for this failure.")]
                    $field : $ty
                ),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor coverage for generated port errors.
    define_port_error! {
        pub enum StockPortError {
            Connection { message: String } => "stock store unavailable: {message}",
            Shortfall { requested: u32 } => "shortfall of {requested} units",
            Rejected { producto: String, requested: u32 } => "{producto}: {requested} units rejected",
            Closed => "stock store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = StockPortError::connection("pool timed out");
        assert_eq!(err.to_string(), "stock store unavailable: pool timed out");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = StockPortError::shortfall(3_u32);
        assert_eq!(err, StockPortError::Shortfall { requested: 3 });
    }

    #[test]
    fn mixed_and_unit_variants_have_constructors() {
        assert_eq!(
            StockPortError::rejected("Teclado", 2_u32).to_string(),
            "Teclado: 2 units rejected"
        );
        assert_eq!(StockPortError::closed(), StockPortError::Closed);
    }
}
