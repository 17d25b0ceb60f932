mod combine;
mod create;
mod evaluate;
mod list;

pub use combine::CombineRulesPage;
pub use create::CreateRulePage;
pub use evaluate::EvaluateRulePage;
pub use list::RuleListPanel;
