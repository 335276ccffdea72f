//! Runtime multiple dispatch over dynamic values.
//!
//! Several native functions can share one name; an [`Overloader`] picks,
//! at call time, the candidate whose declared signature fits the actual
//! argument values, most type-constrained first, and invokes it. Classes
//! registered at runtime get the same treatment for their methods,
//! including class-bound and static-bound ones.
//!
//! ```
//! use kasane::{Args, FnSpec, Overloader, ParamSpec, Value};
//!
//! let mut ov = Overloader::new();
//! ov.register(FnSpec::new("double", [ParamSpec::typed("n", "Int")], |args| {
//!     match &args[0] {
//!         Value::Int(n) => Ok(Value::Int(n * 2)),
//!         _ => unreachable!("binding already checked the type"),
//!     }
//! }))
//! .unwrap();
//! ov.register(FnSpec::new("double", [ParamSpec::pos("s")], |args| {
//!     Ok(Value::str(format!("{0}{0}", args[0])))
//! }))
//! .unwrap();
//!
//! let n = ov.call("double", Args::positional([Value::Int(21)])).unwrap();
//! assert_eq!(n, Value::Int(42));
//! let s = ov.call("double", Args::positional([Value::str("ab")])).unwrap();
//! assert_eq!(s, Value::str("abab"));
//! ```

mod runtime;
pub mod value;

pub use runtime::{Args, BindingKind, ClassDef, Handle, MethodDecl, OverloadSet, Overloader, global};
pub use value::signature::{FnSpec, NativeFn, ParamSpec};
pub use value::{RuntimeError, Value, value_type_name};
