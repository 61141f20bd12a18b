use dioxus::prelude::*;

mod abi;
mod api;
mod buttons;
mod components;
mod config;
mod error;
mod flow;
mod permit;
mod render;
mod rpc;
mod submit;
mod wallet;

#[cfg(test)]
mod test_helpers;

use components::ClaimCard;

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        div {
            style: "width: 100%; min-height: 100vh; display: flex; align-items: center; justify-content: center; background: #0f172a;",
            ClaimCard {}
        }
    }
}
