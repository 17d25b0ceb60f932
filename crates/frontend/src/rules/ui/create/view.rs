use super::view_model::CreateRuleViewModel;
use leptos::prelude::*;

#[component]
pub fn CreateRulePage() -> impl IntoView {
    let vm = CreateRuleViewModel::new();

    // Clone vm for multiple closures
    let vm_clone = vm.clone();

    view! {
        <div class="page create-rule">
            <div class="page-header">
                <h3>"New rule"</h3>
            </div>

            {
                let vm = vm_clone.clone();
                move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })
            }

            <div class="details-form">
                <div class="form-group">
                    <label for="rule-text">"Rule"</label>
                    <textarea
                        id="rule-text"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.rule_text.get()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.rule_text.set(event_target_value(&ev))
                        }
                        placeholder="(age > 18 AND department = 'Sales') OR experience >= 5"
                        rows="3"
                    />
                </div>
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-primary"
                    on:click={
                        let vm = vm_clone.clone();
                        move |_| vm.create_command()
                    }
                    disabled={
                        let vm = vm_clone.clone();
                        move || !vm.is_form_valid()()
                    }
                >
                    "Create"
                </button>
            </div>

            {
                let vm = vm_clone.clone();
                move || {
                    vm.created.get().map(|rule| {
                        let ast_json = serde_json::to_string_pretty(&rule.ast)
                            .unwrap_or_else(|_| "<unserializable>".to_string());
                        view! {
                            <div class="result-panel">
                                <p>{format!("Stored as rule {}", rule.id)}</p>
                                <pre>{ast_json}</pre>
                            </div>
                        }
                    })
                }
            }
        </div>
    }
}
