#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes as a charger response body
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let payload = goecharger::client::response::parse_body(text);

    // Classification and mapping must never panic
    let _ = goecharger::client::response::interpret(payload.clone());
    if let Some(value) = payload {
        let status = goecharger::status::map(&goecharger::RawStatus::from_value(value));
        let _ = serde_json::to_string(&status);
    }
});
