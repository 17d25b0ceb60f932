use contracts::rules::api::STATUS_SUCCESS;
use contracts::rules::ast::StoredRule;
use leptos::prelude::*;

use crate::rules::api;

/// ViewModel for the create-rule form
#[derive(Clone)]
pub struct CreateRuleViewModel {
    pub rule_text: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub created: RwSignal<Option<StoredRule>>,
}

impl CreateRuleViewModel {
    pub fn new() -> Self {
        Self {
            rule_text: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            created: RwSignal::new(None),
        }
    }

    pub fn is_form_valid(&self) -> impl Fn() -> bool + '_ {
        move || !self.rule_text.get().trim().is_empty()
    }

    /// Send the rule text to the server
    pub fn create_command(&self) {
        let rule_text = self.rule_text.get();
        if rule_text.trim().is_empty() {
            self.error.set(Some("Rule text is required".to_string()));
            return;
        }

        let error = self.error;
        let created = self.created;
        wasm_bindgen_futures::spawn_local(async move {
            match api::create_rule(rule_text).await {
                Ok(response) if response.status == STATUS_SUCCESS => {
                    error.set(None);
                    created.set(response.rule);
                }
                Ok(response) => {
                    created.set(None);
                    error.set(Some(
                        response.error.unwrap_or_else(|| "Unknown error".to_string()),
                    ));
                }
                Err(e) => {
                    created.set(None);
                    error.set(Some(e));
                }
            }
        });
    }
}
