#![no_main]

use libfuzzer_sys::fuzz_target;
use sweeplog::reader::{MultiSweepMode, TextSweepReader};
use sweeplog::sweep::{parse, ReadOptions};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must decode or fail with an error, never panic
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let reader = TextSweepReader::new();
    for mode in MultiSweepMode::FALLBACK_ORDER {
        let Ok(raw) = reader.parse_str(text, mode) else {
            continue;
        };
        let Ok(mut sweep) = parse(raw) else {
            continue;
        };

        let titles: Vec<String> = sweep.output_titles().iter().map(|t| t.to_string()).collect();
        for title in &titles {
            let _ = sweep.channel_data(title, ReadOptions::new().alternate(true));
        }
        if let [first, second, ..] = titles.as_slice() {
            let _ = sweep.generate_polar_from_cartesian(first, second, sweep.alternate());
        }
        let _ = sweep.extent();
    }
});
