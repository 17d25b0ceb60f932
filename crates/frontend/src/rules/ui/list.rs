use contracts::rules::ast::StoredRule;
use leptos::prelude::*;

use crate::rules::api;

/// Read-only table of the stored rules.
#[component]
pub fn RuleListPanel() -> impl IntoView {
    let rules = RwSignal::new(Vec::<StoredRule>::new());
    let error = RwSignal::new(None::<String>);

    wasm_bindgen_futures::spawn_local(async move {
        match api::list_rules().await {
            Ok(list) => rules.set(list),
            Err(e) => error.set(Some(format!("Failed to load rules: {}", e))),
        }
    });

    view! {
        <div class="page rule-list">
            <div class="page-header">
                <h3>"Stored rules"</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <table class="data-table">
                <thead>
                    <tr>
                        <th>"Id"</th>
                        <th>"Rule"</th>
                        <th>"Created"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rules.get()
                        key=|rule| rule.id
                        children=move |rule: StoredRule| {
                            view! {
                                <tr>
                                    <td>{rule.id}</td>
                                    <td>{rule.rule_text.clone()}</td>
                                    <td>{rule.created_at.format("%Y-%m-%d %H:%M").to_string()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>
        </div>
    }
}
