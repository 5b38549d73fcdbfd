mod csrf;
mod database;
mod debug;
mod deserialization;
mod execution;
mod inclusion;
mod input;
mod output;
mod secrets;

use crate::rules::types::Rule;
use std::sync::LazyLock;

static ALL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = Vec::with_capacity(24);
    rules.extend(input::rules());
    rules.extend(output::rules());
    rules.extend(database::rules());
    rules.extend(inclusion::rules());
    rules.extend(execution::rules());
    rules.extend(deserialization::rules());
    rules.extend(secrets::rules());
    rules.extend(debug::rules());
    rules.extend(csrf::rules());
    rules
});

pub fn all_rules() -> &'static [Rule] {
    &ALL_RULES
}
