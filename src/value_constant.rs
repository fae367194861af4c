use std::borrow::Cow;
use std::fmt;

use crate::constant::impl_constant_identity;
use crate::{Constant, ConstantCore, Constants, Result, ValuedConstant};

/// A constant that carries an associated value distinct from its name.
///
/// The value is fixed when the constant is declared and carried through
/// realization unchanged. Several constants of one container may share a
/// value; [`Constants::lookup_by_value`] then returns the one declared
/// first.
///
/// ```
/// use symbolic_constants::{ConstantsContainer, constants};
///
/// constants! {
///     pub values STATUS: &'static str {
///         OK = "200",
///         NOT_FOUND = "404",
///     }
/// }
///
/// assert_eq!(STATUS::not_found().value(), &"404");
/// assert!(std::ptr::eq(STATUS::lookup_by_value(&"200").unwrap(), STATUS::ok()));
/// ```
pub struct ValueConstant<V: Send + Sync + 'static> {
    core: ConstantCore<ValueConstant<V>>,
    value: V,
}

impl<V: Send + Sync + 'static> ValueConstant<V> {
    /// Creates an unrealized constant carrying `value`.
    pub fn new(value: V) -> Self {
        Self { core: ConstantCore::new(), value }
    }

    pub fn value(&self) -> &V { &self.value }
}

impl<V: Send + Sync + 'static> Constant for ValueConstant<V> {
    type Declared = V;
    type Discovery = ();

    fn placeholder(declared: V) -> Self { Self::new(declared) }

    fn core(&self) -> &ConstantCore<Self> { &self.core }

    fn realize(
        &self,
        container: &'static Constants<Self>,
        name: &'static str,
        _discovery: &mut (),
    ) -> Result<()> {
        self.core.bind(container, Cow::Borrowed(name))
    }
}

impl<V> ValuedConstant for ValueConstant<V>
where
    V: PartialEq + fmt::Debug + Send + Sync + 'static,
{
    type Value = V;

    fn value(&self) -> &V { &self.value }
}

impl_constant_identity!(ValueConstant<V>);
