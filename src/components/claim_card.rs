use dioxus::prelude::*;
use js_sys::Date;

use crate::api::{EnsClient, LocalStorageCache};
use crate::buttons::{ButtonController, ButtonState};
use crate::error::ClaimError;
use crate::config::{explorer_tx_url, rpc_url, CLAIM_PARAM};
use crate::flow::run_claim;
use crate::permit::{decode_claim, TransferAuthorization};
use crate::render::{
    deadline_display, resolve_name, resolve_symbol, short_address, ClaimView, DeadlineDisplay,
};
use crate::rpc::{HttpRpc, ReadProvider};
use crate::wallet::detect_provider;

const ROW_STYLE: &str = "display: flex; justify-content: space-between; gap: 12px; padding: 10px 12px; border-radius: 10px; background: #0b1220; border: 1px solid #334155; font-size: 13px;";
const ERROR_COLOR: &str = "#fca5a5";
const SUCCESS_COLOR: &str = "#6ee7b7";
const BUTTON_STYLE: &str = "width: 100%; padding: 14px; border-radius: 10px; border: none; font-weight: 600; font-size: 14px;";

#[derive(Debug, Clone, PartialEq, Eq)]
struct Toast {
    message: String,
    success: bool,
}

impl Toast {
    fn error(message: String) -> Self {
        Self {
            message,
            success: false,
        }
    }

    fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: true,
        }
    }

    fn color(&self) -> &'static str {
        if self.success {
            SUCCESS_COLOR
        } else {
            ERROR_COLOR
        }
    }
}

#[component]
pub fn ClaimCard() -> Element {
    let authorization = use_hook(|| decode_claim(read_claim_param().as_deref()));

    let (initial_state, initial_message) = initial_view(&authorization);
    let mut buttons = use_signal(|| {
        let mut controller = ButtonController::new();
        controller.set_state(initial_state);
        controller
    });
    let mut toast = use_signal(|| initial_message.map(Toast::error));
    let owner_name = use_signal(|| Option::<String>::None);
    let beneficiary_name = use_signal(|| Option::<String>::None);
    let token_symbol = use_signal(|| Option::<String>::None);
    let mut tx_hash = use_signal(|| Option::<String>::None);
    let mut connected = use_signal(|| Option::<String>::None);

    {
        let authorization = authorization.clone();
        use_hook(move || match authorization {
            Ok(auth) => {
                spawn_enrichments(&auth, owner_name, beneficiary_name, token_symbol);
                if let Ok(provider) = detect_provider() {
                    provider.on_accounts_changed(move |accounts| {
                        connected.set(accounts.into_iter().next());
                    });
                }
            }
            Err(e) => log::warn!("claim link unusable: {}", e),
        });
    }

    let claim_auth = authorization.clone();
    let on_claim = move |_| {
        if buttons.read().state() == ButtonState::Loading {
            return;
        }
        let Ok(auth) = claim_auth.clone() else {
            return;
        };
        spawn(async move {
            toast.set(None);
            let result = run_claim(
                detect_provider(),
                &auth,
                |state| {
                    buttons.write().set_state(state);
                },
                |address| connected.set(Some(address.to_string())),
            )
            .await;
            match result {
                Ok(hash) => {
                    tx_hash.set(Some(hash));
                    toast.set(Some(Toast::success("Claim successful!")));
                }
                Err(e) => toast.set(Some(Toast::error(e.user_message()))),
            }
        });
    };

    let fields = authorization.as_ref().ok().map(|auth| {
        display_fields(
            &ClaimView::project(auth),
            token_symbol.read().as_deref(),
            owner_name.read().as_deref(),
            beneficiary_name.read().as_deref(),
        )
    });
    let visibility = buttons.read().visibility();
    let account = connected.read().as_deref().map(short_address);
    let notice = toast.read().as_ref().map(|t| (t.message.clone(), t.color()));

    rsx! {
        div {
            style: "max-width: 560px; margin: 0 auto; padding: 24px; background: linear-gradient(135deg, #1e293b 0%, #0f172a 100%); border-radius: 16px; box-shadow: 0 8px 32px rgba(0,0,0,0.4); border: 2px solid #334155;",
            h2 { style: "color: #e0e0e0; margin-bottom: 16px; font-size: 22px; text-align: center;", "Claim Reward" }

            if let Some(account) = account {
                div { style: "color: #94a3b8; margin-bottom: 16px; font-size: 12px; text-align: center;",
                    "Connected: {account}"
                }
            }

            if let Some(fields) = fields {
                div { style: "display: grid; gap: 8px; margin-bottom: 16px;",
                    for (label, value) in fields {
                        Field { key: "{label}", label, value }
                    }
                }
            }

            if visibility.make_claim {
                button { onclick: on_claim, style: "{BUTTON_STYLE} background: #1d4ed8; color: #fff;", "Claim" }
            }
            if visibility.loading {
                button { disabled: true, style: "{BUTTON_STYLE} background: #334155; color: #cbd5f5;", "Claiming..." }
            }
            if visibility.view_claim {
                if let Some(hash) = tx_hash.read().as_ref() {
                    a {
                        href: explorer_tx_url(hash),
                        target: "_blank",
                        rel: "noopener noreferrer",
                        style: "{BUTTON_STYLE} display: block; text-align: center; text-decoration: none; background: #10b981; color: #fff;",
                        "View Claim"
                    }
                }
            }
            if visibility.invalidated {
                button { disabled: true, style: "{BUTTON_STYLE} background: #111827; color: #fecaca; border: 1px solid #ef4444;", "Claim Invalid" }
            }

            if let Some((message, color)) = notice {
                div { style: "margin-top: 12px; color: {color}; font-size: 12px; text-align: center;", "{message}" }
            }
        }
    }
}

#[component]
fn Field(label: &'static str, value: String) -> Element {
    rsx! {
        div { style: ROW_STYLE,
            span { style: "color: #94a3b8;", "{label}" }
            span { style: "color: #e0e0e0; word-break: break-all; text-align: right;", "{value}" }
        }
    }
}

/// Starting control and toast for a decode result. Unusable links hide every
/// control and explain why.
fn initial_view(
    decoded: &Result<TransferAuthorization, ClaimError>,
) -> (ButtonState, Option<String>) {
    match decoded {
        Ok(_) => (ButtonState::MakeClaim, None),
        Err(e) => (ButtonState::Unavailable, Some(e.user_message())),
    }
}

/// Rows shown for a claim. Enrichments replace raw values once they arrive.
fn display_fields(
    view: &ClaimView,
    symbol: Option<&str>,
    owner_name: Option<&str>,
    beneficiary_name: Option<&str>,
) -> Vec<(&'static str, String)> {
    let token = match symbol {
        Some(symbol) => format!("{} ({})", symbol, view.token),
        None => view.token.clone(),
    };
    vec![
        ("Amount", with_symbol(&view.requested_amount, symbol)),
        ("Token", token),
        ("From", owner_name.unwrap_or(&view.owner).to_string()),
        ("To", beneficiary_name.unwrap_or(&view.beneficiary).to_string()),
        ("Allowance", with_symbol(&view.permitted_amount, symbol)),
        ("Nonce", view.nonce.clone()),
        ("Deadline", format_deadline(&view.deadline)),
        ("Signature", short_address(&view.signature)),
    ]
}

fn spawn_enrichments(
    auth: &TransferAuthorization,
    mut owner_name: Signal<Option<String>>,
    mut beneficiary_name: Signal<Option<String>>,
    mut token_symbol: Signal<Option<String>>,
) {
    let owner = auth.owner.clone();
    spawn(async move {
        if let Some(name) = resolve_name(&EnsClient::new(), &LocalStorageCache, &owner).await {
            owner_name.set(Some(name));
        }
    });

    let beneficiary = auth.transfer_details.to.clone();
    spawn(async move {
        if let Some(name) = resolve_name(&EnsClient::new(), &LocalStorageCache, &beneficiary).await {
            beneficiary_name.set(Some(name));
        }
    });

    let token = auth.permit.permitted.token.clone();
    spawn(async move {
        let provider = match detect_provider() {
            Ok(injected) => ReadProvider::Injected(injected),
            Err(_) => ReadProvider::Http(HttpRpc::new(rpc_url())),
        };
        if let Some(symbol) = resolve_symbol(&provider, &token).await {
            token_symbol.set(Some(symbol));
        }
    });
}

fn read_claim_param() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    web_sys::UrlSearchParams::new_with_str(&search)
        .ok()?
        .get(CLAIM_PARAM)
}

fn with_symbol(amount: &str, symbol: Option<&str>) -> String {
    match symbol {
        Some(symbol) => format!("{} {}", amount, symbol),
        None => amount.to_string(),
    }
}

fn format_deadline(deadline: &str) -> String {
    match deadline_display(deadline) {
        DeadlineDisplay::Timestamp(seconds) => {
            let millis = seconds as f64 * 1000.0;
            Date::new(&wasm_bindgen::JsValue::from_f64(millis)).to_string().into()
        }
        DeadlineDisplay::NoExpiry => "No expiry".to_string(),
        DeadlineDisplay::Raw(raw) => raw,
    }
}
