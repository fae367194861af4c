use std::borrow::Cow;

use crate::constant::impl_constant_identity;
use crate::{Constant, ConstantCore, Constants, Result};

/// A constant that is nothing but its name.
///
/// Named constants are declared in a [`Names`](crate::Names) container, for
/// example with [`constants!`](macro@crate::constants):
///
/// ```
/// use symbolic_constants::{ConstantsContainer, constants};
///
/// constants! {
///     pub names METHOD {
///         GET,
///         PUT,
///     }
/// }
///
/// assert_eq!(METHOD::get().name(), "GET");
/// assert_eq!(format!("{:?}", METHOD::put()), "<METHOD=PUT>");
/// ```
pub struct NamedConstant {
    core: ConstantCore<NamedConstant>,
}

impl NamedConstant {
    /// Creates an unrealized named constant.
    pub fn new() -> Self {
        Self { core: ConstantCore::new() }
    }
}

impl Default for NamedConstant {
    fn default() -> Self { Self::new() }
}

impl Constant for NamedConstant {
    type Declared = ();
    type Discovery = ();

    fn placeholder(_declared: ()) -> Self { Self::new() }

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

impl_constant_identity!(NamedConstant);
