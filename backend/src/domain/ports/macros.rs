//! Helper macro for declaring port error enums.
//!
//! Each variant carries named fields and a display template; the macro adds a
//! snake-case constructor per variant that accepts anything convertible into
//! the field types.

macro_rules! define_port_error {
    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
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
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field : $ty),* },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Lost { message: String } => "lost: {message}",
            Counted { message: String, count: u32 } => "counted {count}: {message}",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        assert_eq!(SamplePortError::lost("socket").to_string(), "lost: socket");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = SamplePortError::counted("retries", 3_u32);
        assert_eq!(err.to_string(), "counted 3: retries");
    }
}
