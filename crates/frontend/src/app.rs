use leptos::prelude::*;

use crate::rules::ui::{CombineRulesPage, CreateRulePage, EvaluateRulePage, RuleListPanel};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Create,
    Combine,
    Evaluate,
    List,
}

impl Page {
    fn title(self) -> &'static str {
        match self {
            Page::Create => "Create",
            Page::Combine => "Combine",
            Page::Evaluate => "Evaluate",
            Page::List => "Rules",
        }
    }
}

const PAGES: [Page; 4] = [Page::Create, Page::Combine, Page::Evaluate, Page::List];

#[component]
pub fn App() -> impl IntoView {
    let page = RwSignal::new(Page::Evaluate);

    view! {
        <div class="app-shell">
            <nav class="app-nav">
                {PAGES
                    .into_iter()
                    .map(|p| {
                        view! {
                            <button
                                class="nav-item"
                                class:active=move || page.get() == p
                                on:click=move |_| page.set(p)
                            >
                                {p.title()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
            <main class="app-main">
                {move || match page.get() {
                    Page::Create => view! { <CreateRulePage /> }.into_any(),
                    Page::Combine => view! { <CombineRulesPage /> }.into_any(),
                    Page::Evaluate => view! { <EvaluateRulePage /> }.into_any(),
                    Page::List => view! { <RuleListPanel /> }.into_any(),
                }}
            </main>
        </div>
    }
}
