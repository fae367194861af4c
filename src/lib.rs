//! Symbolic Constants: closed, named sets of constants with identity
//! semantics.
//!
//! This crate lets you declare a container of related constants as a unit,
//! in one of three kinds:
//!
//! - [`Names`]: plain [`NamedConstant`]s, which are nothing but their name.
//! - [`Values`]: [`ValueConstant`]s, each carrying an associated value.
//! - [`Flags`]: [`FlagConstant`]s, bit flags that combine with `|`, `&`, `^`
//!   and `!`.
//!
//! Every constant is a singleton. Two constants are equal only if they are
//! the same constant, whatever names or values they carry, and the
//! constants of a container are realized lazily, exactly once, on first use.
//!
//! # Basic Usage
//!
//! ```rust
//! use symbolic_constants::{ConstantsContainer, constants};
//!
//! constants! {
//!     /// HTTP request methods.
//!     pub names METHOD {
//!         GET,
//!         PUT,
//!         POST,
//!         DELETE,
//!     }
//! }
//!
//! // Accessors always return the same constant
//! assert!(std::ptr::eq(METHOD::get(), METHOD::lookup_by_name("GET").unwrap()));
//! assert_eq!(format!("{:?}", METHOD::get()), "<METHOD=GET>");
//!
//! // Iteration follows declaration order
//! let names: Vec<&str> = METHOD::iter_constants().map(|m| m.name()).collect();
//! assert_eq!(names, ["GET", "PUT", "POST", "DELETE"]);
//!
//! // Only declared constants can be looked up
//! assert!(METHOD::lookup_by_name("lookup_by_name").unwrap_err().is_not_found());
//! ```
//!
//! # Values
//!
//! ```rust
//! use symbolic_constants::{ConstantsContainer, constants};
//!
//! constants! {
//!     pub values STATUS: &'static str {
//!         OK = "200",
//!         NOT_FOUND = "404",
//!     }
//! }
//!
//! assert_eq!(STATUS::not_found().value(), &"404");
//! assert_eq!(STATUS::lookup_by_value(&"200").unwrap().name(), "OK");
//! ```
//!
//! # Flags
//!
//! Flags declared without a value get the next power of two above the
//! largest value declared before them:
//!
//! ```rust
//! use symbolic_constants::{ConstantsContainer, constants};
//!
//! constants! {
//!     pub flags FXF {
//!         READ,
//!         WRITE,
//!         APPEND,
//!         EXCLUSIVE = 0x20,
//!         TEXT,
//!     }
//! }
//!
//! assert_eq!(FXF::append().value(), 0x04);
//! assert_eq!(FXF::text().value(), 0x40);
//!
//! let flag = (FXF::read() | FXF::write()) & (FXF::write() | FXF::append());
//! assert_eq!(flag.name(), "WRITE");
//! assert_eq!(flag.value(), FXF::write().value());
//! assert!(!std::ptr::eq(&flag, FXF::write()));
//! ```
//!
//! # Features
//!
//! - `logging` (default): emits [`tracing`](https://docs.rs/tracing) events
//!   when a container is discovered and when a lookup misses. Disable
//!   default features to drop the `tracing` dependency.

mod error;
pub use error::{ConstantsError, Result};

mod constant;
pub use constant::{
    Constant, ConstantCore, ConstantId, Declaration, ValuedConstant,
};

mod named_constant;
pub use named_constant::NamedConstant;

mod value_constant;
pub use value_constant::ValueConstant;

mod flag_constant;
pub use flag_constant::{FlagAllocator, FlagConstant};

mod constants;
pub use constants::{Constants, Flags, Names, Values};

mod container;
pub use container::ConstantsContainer;

#[doc(hidden)]
pub use paste;
