pub mod builtin;
pub mod mitigation;
pub mod types;

pub use builtin::all_rules;
pub use types::*;

/// Rule metadata for the `list_rules` operation, optionally filtered by
/// category. Order matches registration order.
pub fn list_rules(category: Option<Category>) -> Vec<RuleInfo> {
    all_rules()
        .iter()
        .filter(|rule| category.is_none_or(|c| rule.category == c))
        .map(RuleInfo::from)
        .collect()
}
