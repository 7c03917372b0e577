//! Cosmic Coin Flip entry point
//!
//! The browser build is driven from JavaScript through `cosmic_coin::web`.
//! Natively this runs a short demo session: one animated-style flip and an
//! optional batch whose size is the first argument.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cosmic_coin::export::ExportFormat;
    use cosmic_coin::{FlipSession, Settings, now_ms, parse_batch_count};

    env_logger::init();
    log::info!("Cosmic Coin Flip (native) starting...");

    let mut settings = Settings::load();
    let seed = now_ms() as u64;
    let mut session = FlipSession::new(seed);
    settings.coin = session.restore_coin(&settings.coin).id.to_string();
    log::info!("Session seed: {}", seed);

    if let Some((side, rotation)) = session.begin_flip(None) {
        log::info!("Tossing {} -> {} degrees", session.coin().display_name(), rotation);
        session.settle(now_ms());
        println!("{}", side);
    }

    let Some(count) = std::env::args().nth(1) else {
        return;
    };
    let batch = session.run_batch(parse_batch_count(&count) as i64);
    println!(
        "{} flips: {} heads ({:.1}%), {} tails ({:.1}%)",
        batch.len(),
        batch.heads,
        batch.heads_percent(),
        batch.tails,
        batch.tails_percent()
    );
    println!("{}", session.export_batch(ExportFormat::Text, &settings.batch_labels()));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is cosmic_coin::web::start, this is just to satisfy the compiler
}
