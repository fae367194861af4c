use std::borrow::Cow;
use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr, BitXor, Not};
use std::sync::OnceLock;

use crate::constant::impl_constant_identity;
use crate::{
    Constant, ConstantCore, Constants, ConstantsError, Flags, Result,
    ValuedConstant,
};

/// A combinable bit-flag constant.
///
/// Flags declared without a value are assigned the next power of two above
/// the largest value seen so far in their container, in declaration order.
/// Flags of one container combine with `|`, `&`, `^` and `!` (or the named
/// methods [`union`](Self::union), [`intersection`](Self::intersection),
/// [`symmetric_difference`](Self::symmetric_difference) and
/// [`complement`](Self::complement)) into new composite flags. Composite
/// flags are never registered in the container. A composite is named after
/// the declared flags whose bits are all set in its value, so two flags
/// declared with the same bits both appear in the name:
///
/// ```
/// use symbolic_constants::{ConstantsContainer, constants};
///
/// constants! {
///     pub flags FXF {
///         READ,
///         WRITE,
///         APPEND,
///         EXCLUSIVE = 0x20,
///         TEXT,
///     }
/// }
///
/// assert_eq!(FXF::text().value(), 0x40);
///
/// let read_write = FXF::read() | FXF::write();
/// assert_eq!(read_write.value(), 0x03);
/// assert_eq!(read_write.name(), "{READ,WRITE}");
/// assert_eq!(format!("{:?}", !FXF::write()), "<FXF={APPEND,EXCLUSIVE,READ,TEXT}>");
/// ```
pub struct FlagConstant {
    core: ConstantCore<FlagConstant>,
    value: OnceLock<u64>,
}

impl FlagConstant {
    /// Creates an unrealized flag whose value is assigned at realization.
    pub fn new() -> Self {
        Self {
            core: ConstantCore::new(),
            value: OnceLock::new(),
        }
    }

    /// Creates an unrealized flag with an explicit value.
    pub fn with_value(value: u64) -> Self {
        Self {
            core: ConstantCore::new(),
            value: OnceLock::from(value),
        }
    }

    fn composite(container: &'static Flags, value: u64) -> Self {
        let flags: BTreeSet<&'static str> =
            container.members(value).map(FlagConstant::name).collect();
        let name = composite_name(&flags);
        Self {
            core: ConstantCore::bound(container, Cow::Owned(name)),
            value: OnceLock::from(value),
        }
    }

    /// The bitmask of this flag. Zero for a flag whose value has not been
    /// assigned yet.
    pub fn value(&self) -> u64 { self.value.get().copied().unwrap_or(0) }

    /// True when no bit is set.
    pub fn is_empty(&self) -> bool { self.value() == 0 }

    /// The names of the declared flags this flag is made of, sorted.
    pub fn flag_names(&self) -> impl Iterator<Item = &'static str> + use<> {
        self.iter()
            .map(FlagConstant::name)
            .collect::<BTreeSet<_>>()
            .into_iter()
    }

    /// The declared flags whose bits are all set in this flag, in
    /// declaration order. A declared flag is among its own members.
    pub fn iter(&self) -> impl Iterator<Item = &'static FlagConstant> + use<> {
        let value = self.value();
        self.container()
            .into_iter()
            .flat_map(move |container| container.members(value))
    }

    /// True when `other` belongs to the same container and all of its bits
    /// are set in this flag.
    pub fn contains(&self, other: &FlagConstant) -> bool {
        self.shared_container(other).is_ok()
            && self.value() & other.value() == other.value()
    }

    /// The flags set in either operand.
    pub fn union(&self, other: &FlagConstant) -> Result<FlagConstant> {
        self.combine(other, |left, right| left | right)
    }

    /// The flags set in both operands.
    pub fn intersection(&self, other: &FlagConstant) -> Result<FlagConstant> {
        self.combine(other, |left, right| left & right)
    }

    /// The flags set in exactly one of the operands.
    pub fn symmetric_difference(
        &self,
        other: &FlagConstant,
    ) -> Result<FlagConstant> {
        self.combine(other, |left, right| left ^ right)
    }

    /// The bits of this flag's container that are not set in this flag.
    ///
    /// Its members are the declared flags sharing no bit with this flag.
    pub fn complement(&self) -> Result<FlagConstant> {
        let container = self.container().ok_or(ConstantsError::Unrealized)?;
        let value = !self.value() & container.universe();
        Ok(Self::composite(container, value))
    }

    fn shared_container(&self, other: &FlagConstant) -> Result<&'static Flags> {
        match (self.container(), other.container()) {
            (Some(left), Some(right)) if std::ptr::eq(left, right) => Ok(left),
            (Some(left), Some(right)) => Err(ConstantsError::ContainerMismatch {
                left: left.name(),
                right: right.name(),
            }),
            _ => Err(ConstantsError::Unrealized),
        }
    }

    fn combine(
        &self,
        other: &FlagConstant,
        bits: impl FnOnce(u64, u64) -> u64,
    ) -> Result<FlagConstant> {
        let container = self.shared_container(other)?;
        Ok(Self::composite(container, bits(self.value(), other.value())))
    }
}

impl Default for FlagConstant {
    fn default() -> Self { Self::new() }
}

/// Hands out flag values during one container's discovery.
#[derive(Debug, Default)]
pub struct FlagAllocator {
    largest: u64,
}

impl FlagAllocator {
    /// The smallest power of two strictly greater than every value seen so
    /// far, or `None` once the 64 bits are used up.
    pub fn next_value(&self) -> Option<u64> {
        self.largest
            .checked_add(1)
            .and_then(u64::checked_next_power_of_two)
    }

    pub fn observe(&mut self, value: u64) {
        self.largest = self.largest.max(value);
    }
}

impl Constant for FlagConstant {
    type Declared = Option<u64>;
    type Discovery = FlagAllocator;

    fn placeholder(declared: Option<u64>) -> Self {
        match declared {
            Some(value) => Self::with_value(value),
            None => Self::new(),
        }
    }

    fn core(&self) -> &ConstantCore<Self> { &self.core }

    fn realize(
        &self,
        container: &'static Constants<Self>,
        name: &'static str,
        allocator: &mut FlagAllocator,
    ) -> Result<()> {
        let value = match self.value.get() {
            Some(value) => *value,
            None => allocator.next_value().ok_or_else(|| {
                ConstantsError::FlagBitsExhausted {
                    container: container.name(),
                    name: name.to_string(),
                }
            })?,
        };
        self.core.bind(container, Cow::Borrowed(name))?;
        allocator.observe(*self.value.get_or_init(|| value));
        Ok(())
    }
}

impl ValuedConstant for FlagConstant {
    type Value = u64;

    fn value(&self) -> &u64 { self.value.get().unwrap_or(&0) }
}

impl_constant_identity!(FlagConstant);

impl Constants<FlagConstant> {
    /// The bits of every declared flag.
    pub fn universe(&'static self) -> u64 {
        self.iter_constants().fold(0, |bits, flag| bits | flag.value())
    }

    /// Builds the (unregistered) flag for an arbitrary bitmask out of the
    /// declared flags whose bits are all set in `value`.
    ///
    /// Fails with [`ConstantsError::ValueNotFound`] if `value` has bits that
    /// no declared flag accounts for. Use
    /// [`lookup_by_value`](Constants::lookup_by_value) to find a declared
    /// flag itself.
    pub fn flags_for_value(&'static self, value: u64) -> Result<FlagConstant> {
        let covered =
            self.members(value).fold(0, |bits, flag| bits | flag.value());
        if covered != value {
            return Err(ConstantsError::ValueNotFound {
                container: self.name(),
                value: format!("{:#x}", value),
            });
        }
        Ok(FlagConstant::composite(self, value))
    }

    /// The declared flags whose bits are all set in `value`. Flags declared
    /// with no bits are never members.
    fn members(
        &'static self,
        value: u64,
    ) -> impl Iterator<Item = &'static FlagConstant> + use<> {
        self.iter_constants().filter(move |flag| {
            let bits = flag.value();
            bits != 0 && bits & value == bits
        })
    }
}

fn composite_name(flags: &BTreeSet<&'static str>) -> String {
    match flags.first() {
        Some(only) if flags.len() == 1 => only.to_string(),
        _ => {
            let names: Vec<&str> = flags.iter().copied().collect();
            format!("{{{}}}", names.join(","))
        }
    }
}

macro_rules! flag_operator {
    ($op:ident, $method:ident, $combine:ident) => {
        impl $op<&FlagConstant> for &FlagConstant {
            type Output = FlagConstant;

            fn $method(self, rhs: &FlagConstant) -> FlagConstant {
                self.$combine(rhs).unwrap_or_else(|error| panic!("{}", error))
            }
        }

        impl $op<FlagConstant> for &FlagConstant {
            type Output = FlagConstant;

            fn $method(self, rhs: FlagConstant) -> FlagConstant {
                $op::$method(self, &rhs)
            }
        }

        impl $op<&FlagConstant> for FlagConstant {
            type Output = FlagConstant;

            fn $method(self, rhs: &FlagConstant) -> FlagConstant {
                $op::$method(&self, rhs)
            }
        }

        impl $op<FlagConstant> for FlagConstant {
            type Output = FlagConstant;

            fn $method(self, rhs: FlagConstant) -> FlagConstant {
                $op::$method(&self, &rhs)
            }
        }
    };
}

flag_operator!(BitOr, bitor, union);
flag_operator!(BitAnd, bitand, intersection);
flag_operator!(BitXor, bitxor, symmetric_difference);

impl Not for &FlagConstant {
    type Output = FlagConstant;

    fn not(self) -> FlagConstant {
        self.complement().unwrap_or_else(|error| panic!("{}", error))
    }
}

impl Not for FlagConstant {
    type Output = FlagConstant;

    fn not(self) -> FlagConstant { !&self }
}
