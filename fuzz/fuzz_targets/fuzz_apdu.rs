#![no_main]
use libfuzzer_sys::fuzz_target;
use sedh_apdu::Device;
use sedh_crypto::kex::DomainParams;

fuzz_target!(|data: &[u8]| {
    // Toy group keeps the modexp cheap; every frame must produce a response
    // and never panic, whatever the bytes.
    let domain = match DomainParams::from_parts(
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 11],
        &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2],
    ) {
        Ok(d) => d,
        Err(_) => return,
    };
    let mut device = Device::with_domain(domain);
    for frame in data.split(|&b| b == 0xFF) {
        let resp = device.process(frame);
        assert!(resp.len() >= 2);
    }
});
