#![no_main]
use libfuzzer_sys::fuzz_target;
use lalr_rt::lexer::{Pattern, Terminal};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Literals always compile and match exactly themselves
    let literal = Pattern::literal(text);
    let terminal = Terminal::regexp("LIT", &literal).unwrap();
    assert_eq!(terminal.match_at(text, 0), Some(0..text.len()));

    // Arbitrary regex sources may be rejected, but never panic, and any
    // match found respects the computed bounds
    let regex = Pattern::regex(text);
    if let (Ok(width), Ok(compiled)) = (regex.width(), regex.compile()) {
        if let Some(found) = compiled.find(text) {
            assert!(width.max.map_or(true, |max| found.len() <= max));
        }
    }
});
