use contracts::rules::api::STATUS_SUCCESS;
use contracts::rules::ast::StoredRule;
use leptos::prelude::*;

use crate::rules::api;

/// Pick stored rules by id and combine them into a new rule under the
/// dominant operator.
#[component]
pub fn CombineRulesPage() -> impl IntoView {
    let rules = RwSignal::new(Vec::<StoredRule>::new());
    let selected = RwSignal::new(Vec::<i64>::new());
    let error = RwSignal::new(None::<String>);
    let combined = RwSignal::new(None::<StoredRule>);

    // Load the stored rules once on mount
    wasm_bindgen_futures::spawn_local(async move {
        match api::list_rules().await {
            Ok(list) => rules.set(list),
            Err(e) => error.set(Some(format!("Failed to load rules: {}", e))),
        }
    });

    let toggle = move |id: i64| {
        selected.update(|ids| {
            if let Some(pos) = ids.iter().position(|&x| x == id) {
                ids.remove(pos);
            } else {
                ids.push(id);
            }
        });
    };

    let combine_command = move |_| {
        let rule_ids = selected.get();
        if rule_ids.is_empty() {
            error.set(Some("Select at least one rule".to_string()));
            return;
        }
        wasm_bindgen_futures::spawn_local(async move {
            match api::combine_rules(rule_ids).await {
                Ok(response) if response.status == STATUS_SUCCESS => {
                    error.set(None);
                    combined.set(response.combined_rule);
                }
                Ok(response) => {
                    combined.set(None);
                    error.set(Some(
                        response.error.unwrap_or_else(|| "Unknown error".to_string()),
                    ));
                }
                Err(e) => {
                    combined.set(None);
                    error.set(Some(e));
                }
            }
        });
    };

    view! {
        <div class="page combine-rules">
            <div class="page-header">
                <h3>"Combine rules"</h3>
            </div>

            {move || error.get().map(|e| view! { <div class="error">{e}</div> })}

            <table class="data-table">
                <thead>
                    <tr>
                        <th></th>
                        <th>"Id"</th>
                        <th>"Rule"</th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rules.get()
                        key=|rule| rule.id
                        children=move |rule: StoredRule| {
                            let id = rule.id;
                            view! {
                                <tr>
                                    <td>
                                        <input
                                            type="checkbox"
                                            prop:checked=move || selected.get().contains(&id)
                                            on:change=move |_| toggle(id)
                                        />
                                    </td>
                                    <td>{id}</td>
                                    <td>{rule.rule_text.clone()}</td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click=combine_command
                    disabled=move || selected.get().is_empty()
                >
                    "Combine"
                </button>
            </div>

            {move || {
                combined.get().map(|rule| {
                    view! {
                        <div class="result-panel">
                            <p>{format!("Stored as rule {}: {}", rule.id, rule.rule_text)}</p>
                        </div>
                    }
                })
            }}
        </div>
    }
}
