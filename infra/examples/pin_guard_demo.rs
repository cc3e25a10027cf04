//! Example wiring the PIN guard in front of an SMS notification
//!
//! Run with: cargo run --example pin_guard_demo

use std::sync::Arc;

use async_trait::async_trait;
use bp_core::{GuardListenerTrait, Pin, PinError, PinGuard, PinStoreTrait};
use bp_infra::sms::{MockGatewayTransport, SmsRequest, TweetSmsClient};
use bp_infra::{init_tracing, load_config};
use bp_shared::Language;

struct DemoStore {
    pin: &'static str,
}

#[async_trait]
impl PinStoreTrait for DemoStore {
    async fn store_pin(&self, _pin: &Pin) -> Result<(), String> {
        Ok(())
    }

    async fn verify_pin(&self, pin: &Pin) -> Result<bool, String> {
        Ok(pin.as_str() == self.pin)
    }
}

struct PrintListener;

impl GuardListenerTrait for PrintListener {
    fn on_success(&self, _pin: &Pin) {
        println!("  -> access granted");
    }

    fn on_close(&self) {
        println!("  -> verification closed");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = load_config()?;
    init_tracing(&config.logging)?;
    config.pin_guard = config.pin_guard.with_max_attempts(3);

    let store = Arc::new(DemoStore { pin: "284619" });
    let mut guard = PinGuard::new(store, Arc::new(PrintListener), &config.pin_guard, "401234567")?;

    println!("\n=== Wrong PINs until lockout ===");
    for attempt in ["000000", "111222", "987650"] {
        match guard.submit(attempt).await {
            Ok(_) => println!("{}: accepted", attempt),
            Err(e @ PinError::Locked { .. }) => {
                println!("{}: {}", attempt, e.localized(Language::English));
                println!("  support: {}", guard.support_link());
            }
            Err(e) => println!("{}: {}", attempt, e.localized(Language::English)),
        }
    }

    if let Some(countdown) = guard.countdown() {
        println!("Countdown shows {}", countdown.borrow().display);
    }
    guard.close();

    println!("\n=== Notify the beneficiary ===");
    let transport = Arc::new(MockGatewayTransport::new());
    transport.push_ok("1:demo-1:972592106099");
    config.sms.api_key = "demo-key".to_string();
    let client = TweetSmsClient::with_transport(config.sms.clone(), transport)?;

    let request = SmsRequest::new("0592106099", "تم قفل التحقق من رمز الدخول مؤقتاً");
    match client.send(&request).await {
        Ok(receipt) => println!("Sent {} in {} part(s)", receipt.sms_id, receipt.parts),
        Err(failure) => println!("Failed: {}", failure.message(Language::Arabic)),
    }

    Ok(())
}
