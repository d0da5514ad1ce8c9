#![no_main]

use libfuzzer_sys::fuzz_target;
use pfile_classifier::efile::{normalize, EFileParser, ParserOptions};

fuzz_target!(|data: &[u8]| {
    // E-files are text; anything else is rejected before parsing
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };

    // Parsing must either succeed or return an error, never panic
    for options in [
        ParserOptions::default(),
        ParserOptions {
            skip_blank_lines: false,
            convert_dates: false,
        },
    ] {
        if let Ok(parsed) = EFileParser::new(options).parse_str(content) {
            // Exercise both serialization paths
            let _ = parsed.record.to_lines();
            let _ = serde_json::to_string(&parsed);
        }
    }

    for line in content.lines() {
        let _ = normalize(line.trim());
    }
});
