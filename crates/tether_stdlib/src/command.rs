//! Declarative command definitions.
//!
//! A [`CommandDef`] names a command, its subcommands and parameters, and an
//! overload table. Overload resolution is an explicit lookup keyed on the
//! subcommand and the piped type; the first matching entry wins, and its
//! [`ReturnRule`] computes the static return type without invoking anything.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tether_foundation::{Result, Type, Value};
use tether_language::{
    ArgumentContext, Bundle, Command, CommandResult, Cursor, HostContext, Invocable,
    ParsedArguments,
};

use crate::grammar::{Param, parse_params};

// =============================================================================
// Overloads
// =============================================================================

/// Which piped types an overload accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputPattern {
    /// Exactly this type.
    Exact(Type),
    /// Any list type.
    AnyList,
    /// Any type at all.
    Any,
}

impl InputPattern {
    /// Returns true if the piped type matches.
    #[must_use]
    pub fn matches(&self, piped: &Type) -> bool {
        match self {
            Self::Exact(expected) => expected == piped,
            Self::AnyList => piped.is_list(),
            Self::Any => true,
        }
    }
}

/// How an overload's static return type is computed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnRule {
    /// Always this type.
    Fixed(Type),
    /// The piped type.
    SameAsInput,
    /// The element type of a piped list.
    ElementOfInput,
    /// A list of the type argument at this index.
    ListOfTypeArg(usize),
    /// The type argument at this index.
    TypeArg(usize),
}

impl ReturnRule {
    /// Computes the return type, or `None` if the inputs do not fit the rule.
    #[must_use]
    pub fn resolve(&self, piped: &Type, type_args: &[Type]) -> Option<Type> {
        match self {
            Self::Fixed(t) => Some(t.clone()),
            Self::SameAsInput => Some(piped.clone()),
            Self::ElementOfInput => piped.element().cloned(),
            Self::ListOfTypeArg(i) => type_args.get(*i).cloned().map(Type::list),
            Self::TypeArg(i) => type_args.get(*i).cloned(),
        }
    }
}

/// One entry in a command's overload table.
#[derive(Clone)]
pub struct Overload {
    /// Subcommand this overload is keyed to; `None` matches any.
    pub subcommand: Option<String>,
    /// Accepted piped types.
    pub input: InputPattern,
    /// Return type computation.
    pub returns: ReturnRule,
    invocable: Invocable,
}

impl Overload {
    fn matches(&self, piped: &Type, subcommand: Option<&str>) -> bool {
        let keyed = match &self.subcommand {
            Some(expected) => subcommand == Some(expected.as_str()),
            None => true,
        };
        keyed && self.input.matches(piped)
    }
}

impl fmt::Debug for Overload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overload")
            .field("subcommand", &self.subcommand)
            .field("input", &self.input)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// CommandDef
// =============================================================================

/// A command registered in a [`CommandRegistry`](crate::CommandRegistry).
#[derive(Clone, Debug)]
pub struct CommandDef {
    name: String,
    summary: String,
    subcommands: Option<Vec<String>>,
    params: Vec<Param>,
    invertible: bool,
    overloads: Vec<Overload>,
}

impl CommandDef {
    /// Creates a command with no parameters and no overloads.
    #[must_use]
    pub fn new(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
            subcommands: None,
            params: Vec::new(),
            invertible: false,
            overloads: Vec::new(),
        }
    }

    /// Declares the valid subcommands.
    #[must_use]
    pub fn with_subcommands(mut self, names: &[&str]) -> Self {
        self.subcommands = Some(names.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Appends a parameter.
    #[must_use]
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Lets the argument grammar accept `not` before the parameters.
    #[must_use]
    pub const fn invertible(mut self) -> Self {
        self.invertible = true;
        self
    }

    /// Adds an overload that matches any subcommand.
    #[must_use]
    pub fn overload<F>(self, input: InputPattern, returns: ReturnRule, run: F) -> Self
    where
        F: Fn(&Bundle, Value, &mut dyn HostContext) -> CommandResult + Send + Sync + 'static,
    {
        self.push_overload(None, input, returns, Arc::new(run))
    }

    /// Adds an overload keyed to one subcommand.
    #[must_use]
    pub fn overload_for<F>(
        self,
        subcommand: &str,
        input: InputPattern,
        returns: ReturnRule,
        run: F,
    ) -> Self
    where
        F: Fn(&Bundle, Value, &mut dyn HostContext) -> CommandResult + Send + Sync + 'static,
    {
        self.push_overload(Some(subcommand.to_string()), input, returns, Arc::new(run))
    }

    fn push_overload(
        mut self,
        subcommand: Option<String>,
        input: InputPattern,
        returns: ReturnRule,
        invocable: Invocable,
    ) -> Self {
        self.overloads.push(Overload {
            subcommand,
            input,
            returns,
            invocable,
        });
        self
    }

    /// Returns the one-line summary.
    #[must_use]
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// Returns the parameters.
    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Returns the overload table.
    #[must_use]
    pub fn overloads(&self) -> &[Overload] {
        &self.overloads
    }

    /// Returns a usage line such as `filter:bytag|byname [not] <tag>`.
    #[must_use]
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        if let Some(subs) = &self.subcommands {
            let _ = write!(usage, ":{}", subs.join("|"));
        }
        if self.invertible {
            usage.push_str(" [not]");
        }
        for param in &self.params {
            let _ = write!(usage, " {param}");
        }
        usage
    }

    /// Finds the first overload matching the signature whose return rule resolves.
    fn resolve(
        &self,
        piped: &Type,
        subcommand: Option<&str>,
        type_args: &[Type],
    ) -> Option<(&Overload, Type)> {
        self.overloads
            .iter()
            .filter(|overload| overload.matches(piped, subcommand))
            .find_map(|overload| {
                overload
                    .returns
                    .resolve(piped, type_args)
                    .map(|returns| (overload, returns))
            })
    }
}

impl Command for CommandDef {
    fn name(&self) -> &str {
        &self.name
    }

    fn subcommands(&self) -> Option<&[String]> {
        self.subcommands.as_deref()
    }

    fn parse_arguments(
        &self,
        cursor: &mut Cursor,
        context: &ArgumentContext<'_>,
    ) -> Result<ParsedArguments> {
        parse_params(cursor, &self.params, self.invertible, context)
    }

    fn implementation(
        &self,
        piped: &Type,
        subcommand: Option<&str>,
        type_args: &[Type],
    ) -> Option<Invocable> {
        self.resolve(piped, subcommand, type_args)
            .map(|(overload, _)| Arc::clone(&overload.invocable))
    }

    fn return_type(
        &self,
        subcommand: Option<&str>,
        piped: &Type,
        type_args: &[Type],
    ) -> Option<Type> {
        self.resolve(piped, subcommand, type_args)
            .map(|(_, returns)| returns)
    }
}
