use std::fmt;
use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::{
    Constant, ConstantsError, Declaration, FlagConstant, NamedConstant, Result,
    ValueConstant, ValuedConstant,
};

/// A closed set of constants declared together.
///
/// A `Constants` is a descriptor built from an ordered list of
/// [`Declaration`]s. It is meant to live in a `static`; the constants it
/// holds are realized lazily, the first time any of them is asked for, and
/// are handed out as `&'static` references from then on:
///
/// - Discovery walks the declarations in order, builds an unrealized
///   placeholder for each and realizes it with its declared name. It runs
///   exactly once per container, even when several threads race on first
///   access.
/// - The realized constants are kept in declaration order, which is the
///   order [`iter_constants`](Self::iter_constants) yields them in.
/// - Nothing can be added to a container once it has been declared.
///
/// Most code declares containers with [`constants!`](macro@crate::constants)
/// rather than building the descriptor by hand.
///
/// # Examples
///
/// ```
/// use symbolic_constants::{Declaration, Values};
///
/// const MESSAGES: &[Declaration<u8>] = &[
///     Declaration::new("KEX_DH_GEX_REQUEST_OLD", || 30),
///     Declaration::new("KEXDH_INIT", || 30),
/// ];
///
/// static TRANSPORT_MESSAGE: Values<u8> =
///     Values::new("TRANSPORT_MESSAGE", MESSAGES);
///
/// // Duplicate values resolve to the constant declared first.
/// let message = TRANSPORT_MESSAGE.lookup_by_value(&30).unwrap();
/// assert_eq!(message.name(), "KEX_DH_GEX_REQUEST_OLD");
///
/// let names: Vec<&str> =
///     TRANSPORT_MESSAGE.iter_constants().map(|c| c.name()).collect();
/// assert_eq!(names, ["KEX_DH_GEX_REQUEST_OLD", "KEXDH_INIT"]);
/// ```
pub struct Constants<C: Constant> {
    name: &'static str,
    declarations: &'static [Declaration<C::Declared>],
    enumerants: OnceLock<IndexMap<&'static str, C>>,
}

/// A container of [`NamedConstant`]s.
pub type Names = Constants<NamedConstant>;

/// A container of [`ValueConstant`]s carrying values of type `V`.
pub type Values<V> = Constants<ValueConstant<V>>;

/// A container of [`FlagConstant`]s.
pub type Flags = Constants<FlagConstant>;

impl<C: Constant> Constants<C> {
    /// Declares a container named `name` holding one constant per
    /// declaration, in order.
    pub const fn new(
        name: &'static str,
        declarations: &'static [Declaration<C::Declared>],
    ) -> Self {
        Self { name, declarations, enumerants: OnceLock::new() }
    }

    /// The declared name of this container.
    pub fn name(&self) -> &'static str { self.name }

    /// The number of declared constants.
    pub fn len(&self) -> usize { self.declarations.len() }

    pub fn is_empty(&self) -> bool { self.declarations.is_empty() }

    /// The realized constants by name, in declaration order.
    ///
    /// The first call performs discovery; every call returns the same map.
    pub fn enumerants(&'static self) -> &'static IndexMap<&'static str, C> {
        self.enumerants.get_or_init(|| self.discover())
    }

    /// Looks up a constant by its declared name.
    ///
    /// Only declared constants are found; any other name fails with
    /// [`ConstantsError::NameNotFound`].
    pub fn lookup_by_name(&'static self, name: &str) -> Result<&'static C> {
        self.enumerants().get(name).ok_or_else(|| {
            #[cfg(feature = "logging")]
            tracing::trace!(container = self.name, name, "no constant by name");
            ConstantsError::NameNotFound {
                container: self.name,
                name: name.to_string(),
            }
        })
    }

    /// Iterates over the realized constants in declaration order.
    ///
    /// Each call starts a fresh traversal over the same constants.
    pub fn iter_constants(
        &'static self,
    ) -> impl ExactSizeIterator<Item = &'static C> + DoubleEndedIterator {
        self.enumerants().values()
    }

    /// Fails with [`ConstantsError::Instantiation`]: containers have no
    /// instances.
    pub fn instantiate(&self) -> Result<std::convert::Infallible> {
        Err(ConstantsError::Instantiation { container: self.name })
    }

    #[doc(hidden)]
    pub fn __declared(&'static self, name: &str) -> &'static C {
        &self.enumerants()[name]
    }

    fn discover(&'static self) -> IndexMap<&'static str, C> {
        let mut discovery = C::Discovery::default();
        let mut enumerants = IndexMap::with_capacity(self.declarations.len());
        for declaration in self.declarations {
            let name = declaration.name();
            if enumerants.contains_key(name) {
                panic!("{} declares {} more than once", self.name, name);
            }
            let constant = C::placeholder(declaration.declared());
            if let Err(error) = constant.realize(self, name, &mut discovery) {
                panic!("{}", error);
            }
            enumerants.insert(name, constant);
        }
        #[cfg(feature = "logging")]
        tracing::debug!(
            container = self.name,
            constants = enumerants.len(),
            "discovered constants"
        );
        enumerants
    }
}

impl<C: ValuedConstant> Constants<C> {
    /// Looks up the first-declared constant whose value equals `value`.
    ///
    /// Fails with [`ConstantsError::ValueNotFound`] if no constant carries
    /// that value.
    pub fn lookup_by_value(&'static self, value: &C::Value) -> Result<&'static C> {
        self.iter_constants()
            .find(|constant| constant.value() == value)
            .ok_or_else(|| {
                #[cfg(feature = "logging")]
                tracing::trace!(container = self.name, ?value, "no constant by value");
                ConstantsError::ValueNotFound {
                    container: self.name,
                    value: format!("{:?}", value),
                }
            })
    }
}

impl<C: Constant> fmt::Debug for Constants<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> =
            self.declarations.iter().map(Declaration::name).collect();
        f.debug_struct("Constants")
            .field("name", &self.name)
            .field("constants", &names)
            .field("discovered", &self.enumerants.get().is_some())
            .finish()
    }
}
