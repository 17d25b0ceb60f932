use leptos::prelude::*;

use crate::shared::api_utils::api_url;
use crate::shared::submit_bridge::init_submit_bridge;

const EVALUATE_FORM_ID: &str = "evaluate-form";

/// Evaluate a stored rule against user data typed into a plain HTML form.
///
/// Submission is handled by the form bridge: it reads the fields off the
/// live form and posts them as JSON to the form's action URL, so this
/// component carries no submit logic of its own.
#[component]
pub fn EvaluateRulePage() -> impl IntoView {
    Effect::new(move |_| {
        init_submit_bridge(EVALUATE_FORM_ID);
    });

    view! {
        <div class="page evaluate-rule">
            <div class="page-header">
                <h3>"Evaluate rule"</h3>
            </div>

            <form id=EVALUATE_FORM_ID action=api_url("/api/rules/evaluate") method="post">
                <div class="form-group">
                    <label for="ruleId">"Rule id"</label>
                    <input
                        type="text"
                        id="ruleId"
                        name="ruleId"
                        placeholder="Id of a stored rule"
                    />
                </div>

                <div class="form-group">
                    <label for="userData">"User data (JSON)"</label>
                    <textarea
                        id="userData"
                        name="userData"
                        rows="6"
                        placeholder=r#"{"age": 30, "department": "Sales"}"#
                    />
                </div>

                <div class="details-actions">
                    <button type="submit" class="btn btn-primary">
                        "Evaluate"
                    </button>
                </div>
            </form>
        </div>
    }
}
