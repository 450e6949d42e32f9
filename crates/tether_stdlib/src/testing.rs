//! Helpers for evaluating lines against the standard registry in tests.

use tether_foundation::{Item, Result, Value};
use tether_language::{BufferedContext, ParseOptions, Pipeline, parse_line};

use crate::{standard_registry, standard_registry_with_items};

pub fn parse(source: &str) -> Result<Pipeline> {
    parse_line(source, &standard_registry(), &ParseOptions::new())
}

pub fn eval(source: &str) -> Result<Value> {
    parse(source)?.run(Value::Unit, &mut BufferedContext::new())
}

pub fn eval_with(items: Vec<Item>, source: &str) -> Result<Value> {
    let registry = standard_registry_with_items(items);
    parse_line(source, &registry, &ParseOptions::new())?.run(Value::Unit, &mut BufferedContext::new())
}

/// Names of the items in a list value, in order.
pub fn names(value: &Value) -> Vec<String> {
    value
        .as_list()
        .into_iter()
        .flatten()
        .filter_map(Value::as_item)
        .map(|item| item.name().to_string())
        .collect()
}
