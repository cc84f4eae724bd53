// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_sn_content(sections: usize) -> String {
    let mut content = String::from("<super-notation-v1>\nmeta: author=bench\ntitle: Benchmark {b:document}\n\n");
    for section in 0..sections {
        content.push_str(&format!("sec:s{section}\n"));
        content.push_str("para: Some text with {b:bold}, {i:italic} and {color=#336699:colored {u:nested} } parts.\n");
        content.push_str("olist:bullet\nfirst item\nsecond {b:item}\n\n");
        content.push_str("code:\nfn example() {\n    println!(\"{b:not markup}\");\n}\nendcode:\n");
        content.push_str(&format!("sec=s{section}: back to {{i:top}}\n"));
        content.push_str("linktxt: Example | https://example.com\nbreak-line\n\n");
    }
    content
}

#[allow(dead_code)]
pub fn generate_nested_markup(depth: usize) -> String {
    let mut line = "{b:".repeat(depth);
    line.push('x');
    line.push_str(&" }".repeat(depth));
    line
}
