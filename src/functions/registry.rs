//! The table of every function the host can call, by name.

use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use crate::error::{Error, Result};
use crate::functions::context::Context;
use crate::functions::{duration, instant, localdate, localdatetime, localtime};
use crate::functions::{offsetdatetime, period, zoneddatetime, zoneid, zoneoffset};
use crate::record::{DataType, Value};


/// The prefix shared by every function name, as in `dt_localdate_plus`.
pub const NAMESPACE: &str = "dt";

/// Decodes positional arguments, calls a function, and encodes its result.
pub type Call = fn(&Context, &[Value]) -> Result<Value>;


/// One overload of a function: what it accepts, what it returns, and how
/// to call it.
#[derive(Clone)]
pub struct Signature {
    pub params: Vec<DataType>,
    pub returns: DataType,
    pub description: &'static str,
    call: Call,
}

impl Signature {

    /// Whether this overload takes these arguments. A null argument is
    /// accepted in place of any type.
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.params.len() == args.len()
            && self.params.iter().zip(args).all(|(param, arg)| arg.fits(*param))
    }

    /// The host’s descriptors for each parameter type, in order.
    pub fn param_descriptors(&self) -> Vec<String> {
        self.params.iter().map(DataType::descriptor).collect()
    }

    pub fn return_descriptor(&self) -> String {
        self.returns.descriptor()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Signature")
         .field("params", &self.params)
         .field("returns", &self.returns)
         .finish()
    }
}


/// Every function, with each of its overloads in the order they’re tried.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    functions: BTreeMap<&'static str, Vec<Signature>>,
}

impl Registry {

    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry holding every function this crate provides.
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        instant::register(&mut registry);
        duration::register(&mut registry);
        period::register(&mut registry);
        localdate::register(&mut registry);
        localtime::register(&mut registry);
        localdatetime::register(&mut registry);
        zoneoffset::register(&mut registry);
        zoneid::register(&mut registry);
        offsetdatetime::register(&mut registry);
        zoneddatetime::register(&mut registry);

        registry
    }

    /// Adds an overload, which gets tried after any already added under
    /// the same name.
    pub fn add(&mut self, name: &'static str, params: &[DataType], returns: DataType, description: &'static str, call: Call) {
        debug_assert!(name.starts_with(NAMESPACE) && name[NAMESPACE.len() ..].starts_with('_'), "bad name {}", name);

        let signature = Signature { params: params.to_vec(), returns, description, call };
        self.functions.entry(name).or_default().push(signature);
    }

    /// The name of every function, in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.functions.keys().copied()
    }

    pub fn signatures(&self, name: &str) -> Option<&[Signature]> {
        self.functions.get(name).map(Vec::as_slice)
    }

    /// Calls the first overload of the named function that accepts these
    /// arguments.
    ///
    /// If any argument is null, or is an array with a null in it, the
    /// result is null, and nothing gets decoded or computed.
    pub fn invoke(&self, context: &Context, name: &str, args: &[Value]) -> Result<Value> {
        let overloads = self.signatures(name)
                            .ok_or_else(|| Error::UnknownFunction(name.to_owned()))?;

        let signature = overloads.iter()
                                 .find(|signature| signature.accepts(args))
                                 .ok_or_else(|| Error::NoMatchingOverload { name: name.to_owned(), arity: args.len() })?;

        if args.iter().any(is_absent) {
            trace!("{} called with a missing argument", name);
            return Ok(Value::Null);
        }

        (signature.call)(context, args)
    }
}

fn is_absent(arg: &Value) -> bool {
    match arg {
        Value::Null         => true,
        Value::Array(items) => items.iter().any(Value::is_null),
        _                   => false,
    }
}
