use std::borrow::Cow;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{Constants, ConstantsError, Result};

/// A process-unique identity token carried by every constant.
///
/// Identifiers are handed out in construction order, so the constants of a
/// container carry increasing identifiers in declaration order. Equality,
/// hashing and ordering of constants are all defined in terms of this token
/// rather than the name or value a constant carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstantId(u64);

impl ConstantId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ConstantId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identifier.
    pub fn value(&self) -> u64 { self.0 }
}

/// One entry in a container's declaration list.
///
/// `declare` builds whatever the constant kind needs besides its name:
/// nothing for named constants, the value for valued constants, and an
/// optional explicit bit value for flags. It runs once, when the container
/// is discovered, so the payload need not be a constant expression.
#[derive(Debug)]
pub struct Declaration<D: 'static> {
    name: &'static str,
    declare: fn() -> D,
}

impl<D: 'static> Declaration<D> {
    pub const fn new(name: &'static str, declare: fn() -> D) -> Self {
        Self { name, declare }
    }

    pub fn name(&self) -> &'static str { self.name }

    /// Builds the declared payload.
    pub fn declared(&self) -> D { (self.declare)() }
}

struct Binding<C: Constant> {
    name: Cow<'static, str>,
    container: &'static Constants<C>,
}

/// The state every constant shares: its identity and, once realized, its
/// name and container.
pub struct ConstantCore<C: Constant> {
    id: ConstantId,
    binding: OnceLock<Binding<C>>,
}

impl<C: Constant> ConstantCore<C> {
    /// A fresh, unbound core.
    pub fn new() -> Self {
        Self { id: ConstantId::next(), binding: OnceLock::new() }
    }

    /// A core that is bound from the moment it exists. Used for synthetic
    /// constants such as combined flags.
    pub(crate) fn bound(
        container: &'static Constants<C>,
        name: Cow<'static, str>,
    ) -> Self {
        Self {
            id: ConstantId::next(),
            binding: OnceLock::from(Binding { name, container }),
        }
    }

    /// Binds this core to `container` under `name`.
    ///
    /// Fails with [`ConstantsError::AlreadyRealized`] if the core is already
    /// bound, leaving the original binding in place.
    pub fn bind(
        &self,
        container: &'static Constants<C>,
        name: Cow<'static, str>,
    ) -> Result<()> {
        self.binding.set(Binding { name, container }).map_err(|rejected| {
            let existing = self.binding.get().unwrap_or(&rejected);
            ConstantsError::AlreadyRealized {
                container: existing.container.name(),
                name: existing.name.to_string(),
            }
        })
    }

    pub fn id(&self) -> ConstantId { self.id }

    pub fn is_bound(&self) -> bool { self.binding.get().is_some() }

    /// The bound name, or the empty string before realization.
    pub fn name(&self) -> &str {
        self.binding.get().map_or("", |binding| &binding.name)
    }

    pub fn container(&self) -> Option<&'static Constants<C>> {
        self.binding.get().map(|binding| binding.container)
    }
}

impl<C: Constant> Default for ConstantCore<C> {
    fn default() -> Self { Self::new() }
}

/// The capability shared by named, valued and flag constants.
///
/// A constant starts life as an unrealized placeholder built from its
/// [`Declaration`] and is bound exactly once, by [`Constant::realize`], to
/// a name and a container.
pub trait Constant: Sized + Send + Sync + 'static {
    /// What a declaration of this kind carries besides its name.
    type Declared: 'static;

    /// State threaded through one container's discovery, in declaration
    /// order.
    type Discovery: Default;

    /// Builds the unrealized placeholder for a declaration.
    fn placeholder(declared: Self::Declared) -> Self;

    fn core(&self) -> &ConstantCore<Self>;

    /// Binds this constant to `container` under `name`.
    ///
    /// Realizing a constant twice is a programming error and fails with
    /// [`ConstantsError::AlreadyRealized`].
    fn realize(
        &self,
        container: &'static Constants<Self>,
        name: &'static str,
        discovery: &mut Self::Discovery,
    ) -> Result<()>;
}

/// A constant that carries a value, and so can be looked up by it.
pub trait ValuedConstant: Constant {
    type Value: PartialEq + std::fmt::Debug;

    fn value(&self) -> &Self::Value;
}

/// Implements identity semantics and representation for a constant type:
/// `PartialEq`/`Eq`/`Hash` by [`ConstantId`], ordering by declaration
/// within one container, `Debug` as `<Container=name>` and `Display` as the
/// bare name.
macro_rules! impl_constant_identity {
    ($ty:ident $(<$generic:ident>)?) => {
        impl$(<$generic: Send + Sync + 'static>)? $ty$(<$generic>)? {
            /// The name this constant was realized with.
            ///
            /// Empty until the constant is realized.
            pub fn name(&self) -> &str {
                $crate::Constant::core(self).name()
            }

            /// The container this constant belongs to, once realized.
            pub fn container(&self) -> Option<&'static $crate::Constants<Self>> {
                $crate::Constant::core(self).container()
            }

            pub fn id(&self) -> $crate::ConstantId {
                $crate::Constant::core(self).id()
            }

            pub fn is_realized(&self) -> bool {
                $crate::Constant::core(self).is_bound()
            }
        }

        impl$(<$generic: Send + Sync + 'static>)? PartialEq for $ty$(<$generic>)? {
            fn eq(&self, other: &Self) -> bool { self.id() == other.id() }
        }

        impl$(<$generic: Send + Sync + 'static>)? Eq for $ty$(<$generic>)? {}

        impl$(<$generic: Send + Sync + 'static>)? std::hash::Hash for $ty$(<$generic>)? {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(&self.id(), state);
            }
        }

        impl$(<$generic: Send + Sync + 'static>)? PartialOrd for $ty$(<$generic>)? {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                match (self.container(), other.container()) {
                    (Some(left), Some(right)) if std::ptr::eq(left, right) => {
                        Some(self.id().cmp(&other.id()))
                    }
                    _ if self == other => Some(std::cmp::Ordering::Equal),
                    _ => None,
                }
            }
        }

        impl$(<$generic: Send + Sync + 'static>)? std::fmt::Debug for $ty$(<$generic>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.container() {
                    Some(container) => {
                        write!(f, "<{}={}>", container.name(), self.name())
                    }
                    None => write!(f, "<unrealized {}>", stringify!($ty)),
                }
            }
        }

        impl$(<$generic: Send + Sync + 'static>)? std::fmt::Display for $ty$(<$generic>)? {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

pub(crate) use impl_constant_identity;
