use dioxus::prelude::*;
use scriba_core::SessionState;

/// Passphrase prompt shown until the session holds an API key.
#[component]
pub fn GateView(session: Signal<SessionState>) -> Element {
    let mut passphrase = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut denied = use_signal(|| false);

    let submit = move |_| {
        let mut session = session.clone();
        spawn(async move {
            let typed = passphrase();
            let address = email();
            let address = (!address.trim().is_empty()).then(|| address.trim().to_string());
            match unlock_impl(typed, address).await {
                Ok(Some(api_key)) => {
                    denied.set(false);
                    session.write().unlock_with(api_key);
                }
                Ok(None) => denied.set(true),
                Err(e) => {
                    tracing::error!("unlock failed: {}", e);
                    denied.set(true);
                }
            }
        });
    };

    rsx! {
        div {
            style: "max-width: 24rem; margin: 2rem auto; text-align: center;",
            h3 { "Enter the access passphrase" }
            input {
                r#type: "password",
                style: "width: 100%; padding: 0.5rem; margin-bottom: 0.5rem;",
                placeholder: "Passphrase",
                value: "{passphrase}",
                oninput: move |evt| passphrase.set(evt.value()),
            }
            input {
                r#type: "email",
                style: "width: 100%; padding: 0.5rem; margin-bottom: 0.5rem;",
                placeholder: "Email (only if an allow-list is configured)",
                value: "{email}",
                oninput: move |evt| email.set(evt.value()),
            }
            button {
                style: "
                    background: #007bff;
                    color: white;
                    border: none;
                    padding: 0.6rem 1.4rem;
                    border-radius: 5px;
                    cursor: pointer;
                ",
                onclick: submit,
                "Unlock"
            }
            if denied() {
                p {
                    style: "color: #721c24; margin-top: 0.8rem;",
                    "Access denied. Check the passphrase (and email) and try again."
                }
            }
        }
    }
}

// Server-backed unlock (when the api crate is available)
#[cfg(feature = "api")]
async fn unlock_impl(passphrase: String, email: Option<String>) -> Result<Option<String>, String> {
    api::unlock(passphrase, email).await.map_err(|e| e.to_string())
}

// Fallback: gate against the local environment (desktop/dev without a server)
#[cfg(not(feature = "api"))]
async fn unlock_impl(passphrase: String, email: Option<String>) -> Result<Option<String>, String> {
    use scriba_core::{AppConfig, CredentialGate};

    let config = AppConfig::from_env();
    let gate = CredentialGate::from_config(&config).map_err(|e| e.to_string())?;
    if let Some(ref email) = email {
        if !gate.email_allowed(email) {
            return Ok(None);
        }
    }
    Ok(gate.unlock(&passphrase).ok())
}
