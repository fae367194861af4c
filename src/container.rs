use crate::{Constant, Constants, ConstantsError, Result, ValuedConstant};

/// A type standing for a container of constants.
///
/// Container types are uninhabited: they exist only to name a set of
/// constants and to carry its accessors, and [`instantiate`] always fails.
/// Implementations are normally generated by [`constants!`](macro@crate::constants).
///
/// [`instantiate`]: ConstantsContainer::instantiate
pub trait ConstantsContainer: Sized + 'static {
    type Constant: Constant;

    /// The descriptor holding this container's constants.
    fn constants() -> &'static Constants<Self::Constant>;

    /// The declared name of this container.
    fn container_name() -> &'static str { Self::constants().name() }

    /// Looks up a constant by its declared name.
    fn lookup_by_name(name: &str) -> Result<&'static Self::Constant> {
        Self::constants().lookup_by_name(name)
    }

    /// Looks up the first-declared constant carrying `value`.
    fn lookup_by_value(
        value: &<Self::Constant as ValuedConstant>::Value,
    ) -> Result<&'static Self::Constant>
    where
        Self::Constant: ValuedConstant,
    {
        Self::constants().lookup_by_value(value)
    }

    /// Iterates over the constants in declaration order.
    fn iter_constants() -> impl ExactSizeIterator<Item = &'static Self::Constant> {
        Self::constants().iter_constants()
    }

    /// Always fails with [`ConstantsError::Instantiation`] naming the
    /// container.
    fn instantiate() -> Result<Self> {
        Err(ConstantsError::Instantiation { container: Self::container_name() })
    }
}

/// A macro that declares a container of constants.
///
/// Each invocation declares one container, of one of three kinds:
///
/// - `names`: [`NamedConstant`](crate::NamedConstant)s, which are nothing but
///   their name.
/// - `values`: [`ValueConstant`](crate::ValueConstant)s carrying a value of
///   the given type, written `NAME = value`. The value may be any expression
///   that does not borrow local variables; it is evaluated once, when the
///   container is first used.
/// - `flags`: [`FlagConstant`](crate::FlagConstant)s, optionally with an
///   explicit bit value; the others are assigned successive powers of two.
///
/// The container becomes an uninhabited type implementing
/// [`ConstantsContainer`], with one accessor per constant whose name is the
/// constant's name in lowercase.
///
/// # Examples
///
/// ```
/// use symbolic_constants::*;
///
/// constants! {
///     /// Message types supported by an SSH transport.
///     pub values TRANSPORT_MESSAGE: u8 {
///         KEX_DH_GEX_REQUEST_OLD = 30,
///         KEXDH_INIT = 30,
///     }
/// }
///
/// assert_eq!(TRANSPORT_MESSAGE::kexdh_init().name(), "KEXDH_INIT");
/// assert_eq!(TRANSPORT_MESSAGE::kexdh_init().value(), &30);
/// assert!(std::ptr::eq(
///     TRANSPORT_MESSAGE::lookup_by_value(&30).unwrap(),
///     TRANSPORT_MESSAGE::kex_dh_gex_request_old(),
/// ));
/// assert_eq!(
///     TRANSPORT_MESSAGE::instantiate().unwrap_err().to_string(),
///     "TRANSPORT_MESSAGE may not be instantiated."
/// );
/// ```
#[macro_export]
macro_rules! constants {
    (@flag_value) => { ::core::option::Option::None };
    (@flag_value $value:expr) => { ::core::option::Option::Some($value) };
    (@container
        $(#[$attr:meta])* $vis:vis $container:ident, $constant:ty, $declared:ty,
        $( $(#[$constant_attr:meta])* $name:ident = $declared_value:expr ),*
    ) => {
        $(#[$attr])*
        #[allow(non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Debug)]
        $vis enum $container {}

        impl $crate::ConstantsContainer for $container {
            type Constant = $constant;

            fn constants() -> &'static $crate::Constants<$constant> {
                const DECLARATIONS: &[$crate::Declaration<$declared>] = &[
                    $( $crate::Declaration::new(stringify!($name), || $declared_value) ),*
                ];
                static CONSTANTS: $crate::Constants<$constant> =
                    $crate::Constants::new(stringify!($container), DECLARATIONS);
                &CONSTANTS
            }
        }

        $crate::paste::paste! {
            impl $container {
                $(
                    $(#[$constant_attr])*
                    #[allow(dead_code)]
                    $vis fn [<$name:lower>]() -> &'static $constant {
                        <Self as $crate::ConstantsContainer>::constants()
                            .__declared(stringify!($name))
                    }
                )*
            }
        }
    };
    (
        $(#[$attr:meta])*
        $vis:vis names $container:ident {
            $( $(#[$constant_attr:meta])* $name:ident ),* $(,)?
        }
    ) => {
        $crate::constants!(@container
            $(#[$attr])* $vis $container, $crate::NamedConstant, (),
            $( $(#[$constant_attr])* $name = () ),*
        );
    };
    (
        $(#[$attr:meta])*
        $vis:vis values $container:ident : $value_type:ty {
            $( $(#[$constant_attr:meta])* $name:ident = $value:expr ),* $(,)?
        }
    ) => {
        $crate::constants!(@container
            $(#[$attr])* $vis $container, $crate::ValueConstant<$value_type>, $value_type,
            $( $(#[$constant_attr])* $name = $value ),*
        );
    };
    (
        $(#[$attr:meta])*
        $vis:vis flags $container:ident {
            $( $(#[$constant_attr:meta])* $name:ident $(= $value:expr)? ),* $(,)?
        }
    ) => {
        $crate::constants!(@container
            $(#[$attr])* $vis $container, $crate::FlagConstant, ::core::option::Option<u64>,
            $( $(#[$constant_attr])* $name = $crate::constants!(@flag_value $($value)?) ),*
        );
    };
}
