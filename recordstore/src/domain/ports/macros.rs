//! Helper macro for declaring port error enums.
//!
//! `define_port_error!` expands a compact `Variant { field: Type } => "message"`
//! list into a `thiserror` enum plus one snake_case constructor per variant.
//! Constructor parameters take `impl Into<T>`, so adapters can pass `&str`
//! where the variant stores a `String`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Construct the `" $variant "` variant."]
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
            #[doc = "Construct the `" $variant "` variant."]
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
                $variant $( { $($field : $ty),* } )?,
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
    //! Regression coverage for the port error macro.
    define_port_error! {
        pub enum ProbeError {
            Timeout => "probe timed out",
            Rejected { reason: String } => "probe rejected: {reason}",
            Partial { table: String, rows: u64 } => "partial result from {table} ({rows} rows)",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(ProbeError::timeout(), ProbeError::Timeout);
        assert_eq!(ProbeError::timeout().to_string(), "probe timed out");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = ProbeError::rejected("locked");
        assert_eq!(err.to_string(), "probe rejected: locked");
    }

    #[test]
    fn mixed_fields_keep_their_types() {
        let err = ProbeError::partial("records", 3_u64);
        assert_eq!(
            err,
            ProbeError::Partial {
                table: "records".to_owned(),
                rows: 3,
            }
        );
        assert_eq!(err.to_string(), "partial result from records (3 rows)");
    }
}
